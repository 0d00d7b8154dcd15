// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status evaluation.
//!
//! [`evaluate_status`] computes the status an event should hold at a given
//! instant. It is pure: no clock access, no I/O. Rules apply in order and the
//! first match wins:
//!
//! 1. terminal statuses (`cancelled`, `finished`) are returned unchanged
//! 2. `start <= now <= end` yields `in_progress` (both bounds inclusive)
//! 3. before `start`, the event type's capacity rule decides `ready` or `incomplete`
//! 4. after `end`, the current status is kept; finishing is a manual decision

use crate::event::Event;
use crate::event_status::EventStatus;
use crate::event_type::CapacityRule;
use time::OffsetDateTime;

/// Why the evaluator produced a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusReason {
    /// The event is cancelled or finished.
    Terminal,
    /// The event is within its schedule.
    Started,
    /// Collection with enough volunteers and a merchant.
    EnoughVolunteersAndMerchant,
    /// Market with enough volunteers.
    EnoughVolunteers,
    /// Fewer volunteers than expected.
    InsufficientVolunteers,
    /// Collection with enough volunteers but no merchant.
    NoMerchant,
    /// Event type without capacity gating.
    Scheduled,
    /// The schedule is over and the event awaits a manual finish.
    EndedAwaitingFinalization,
}

impl StatusReason {
    /// The reason text written to status history.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Terminal => "terminal — no recomputation",
            Self::Started => "event has started",
            Self::EnoughVolunteersAndMerchant => "enough volunteers and at least one merchant",
            Self::EnoughVolunteers => "enough volunteers",
            Self::InsufficientVolunteers => "insufficient volunteers",
            Self::NoMerchant => "no merchant registered",
            Self::Scheduled => "event scheduled",
            Self::EndedAwaitingFinalization => "event has ended — awaiting finalization",
        }
    }
}

impl std::fmt::Display for StatusReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of evaluating an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEvaluation {
    /// The status the event should hold.
    pub status: EventStatus,
    /// Why.
    pub reason: StatusReason,
}

impl StatusEvaluation {
    const fn new(status: EventStatus, reason: StatusReason) -> Self {
        Self { status, reason }
    }
}

/// Computes the status an event should hold at `now`.
#[must_use]
pub fn evaluate_status(event: &Event, now: OffsetDateTime) -> StatusEvaluation {
    if event.status.is_terminal() {
        return StatusEvaluation::new(event.status, StatusReason::Terminal);
    }

    if event.is_running_at(now) {
        return StatusEvaluation::new(EventStatus::InProgress, StatusReason::Started);
    }

    if now < event.start {
        return evaluate_capacity(event);
    }

    StatusEvaluation::new(event.status, StatusReason::EndedAwaitingFinalization)
}

fn evaluate_capacity(event: &Event) -> StatusEvaluation {
    match event.event_type.capacity_rule() {
        CapacityRule::VolunteersAndMerchant => {
            // Volunteer shortage is reported even when the merchant is also missing.
            if !event.has_enough_volunteers() {
                StatusEvaluation::new(
                    EventStatus::Incomplete,
                    StatusReason::InsufficientVolunteers,
                )
            } else if !event.has_merchant() {
                StatusEvaluation::new(EventStatus::Incomplete, StatusReason::NoMerchant)
            } else {
                StatusEvaluation::new(
                    EventStatus::Ready,
                    StatusReason::EnoughVolunteersAndMerchant,
                )
            }
        }
        CapacityRule::VolunteersOnly => {
            if event.has_enough_volunteers() {
                StatusEvaluation::new(EventStatus::Ready, StatusReason::EnoughVolunteers)
            } else {
                StatusEvaluation::new(
                    EventStatus::Incomplete,
                    StatusReason::InsufficientVolunteers,
                )
            }
        }
        CapacityRule::Ungated => StatusEvaluation::new(EventStatus::Ready, StatusReason::Scheduled),
    }
}

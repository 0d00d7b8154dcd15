// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Guards for manual status changes.
//!
//! Manual changes bypass the evaluator. The only restricted target is
//! `finished`, which requires the scheduled end to have been reached.

use crate::error::DomainError;
use crate::event::Event;
use crate::event_status::EventStatus;
use time::OffsetDateTime;

/// Refusal reason for finishing an event early.
pub const FINISHED_BEFORE_END: &str = "cannot mark finished before scheduled end";

/// Validates a manual change of `event` to `new_status` at `now`.
///
/// # Errors
///
/// Returns `DomainError::InvalidTransition` when `new_status` is `finished`
/// and `now` is before the scheduled end.
pub fn validate_manual_transition(
    event: &Event,
    new_status: EventStatus,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    if new_status == EventStatus::Finished && now < event.end {
        return Err(DomainError::InvalidTransition {
            from: event.status,
            to: new_status,
            reason: FINISHED_BEFORE_END.to_string(),
        });
    }
    Ok(())
}

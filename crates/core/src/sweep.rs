// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk operations over many events.

use crate::clock::Clock;
use crate::engine::{BACKFILL_REASON, StatusEngine};
use crate::error::CoreError;
use crate::store::{EventFilter, EventStore};
use gleaner_audit::Actor;
use gleaner_domain::{Event, EventId, StatusHistoryEntry};
use time::OffsetDateTime;
use tracing::{info, warn};

/// An event the sweep could not process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepFailure {
    /// The event.
    pub event_id: EventId,
    /// What went wrong.
    pub error: CoreError,
}

/// Outcome of one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Events that were evaluated.
    pub examined: usize,
    /// Events whose status changed.
    pub changed: usize,
    /// Events that failed; they are not retried.
    pub failures: Vec<SweepFailure>,
}

impl<S: EventStore, C: Clock> StatusEngine<S, C> {
    /// Re-evaluates every non-terminal event that has not yet ended.
    ///
    /// Events are processed one at a time in id order. A failure on one event
    /// is recorded in the report and the sweep moves on.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Storage` if the candidate events cannot be queried.
    pub fn sweep_all(&mut self, actor: Option<&Actor>) -> Result<SweepReport, CoreError> {
        let now: OffsetDateTime = self.now();
        let candidates: Vec<Event> = self.store_mut().query_events(&EventFilter::sweepable(now))?;

        let mut report: SweepReport = SweepReport::default();
        for candidate in candidates {
            report.examined += 1;
            match self.check_and_update(candidate.id, actor) {
                Ok(event) => {
                    if event.status != candidate.status {
                        report.changed += 1;
                    }
                }
                Err(error) => {
                    warn!("Sweep failed for event {}: {}", candidate.id, error);
                    report.failures.push(SweepFailure {
                        event_id: candidate.id,
                        error,
                    });
                }
            }
        }

        info!(
            "Status sweep examined {} events, changed {}, failed {}",
            report.examined,
            report.changed,
            report.failures.len()
        );
        Ok(report)
    }

    /// Lists non-terminal events whose scheduled end has passed.
    ///
    /// These are candidates for a manual finish; nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Storage` if the query fails.
    pub fn suggest_finishable(&mut self) -> Result<Vec<Event>, CoreError> {
        let now: OffsetDateTime = self.now();
        Ok(self.store_mut().query_events(&EventFilter::finishable(now))?)
    }

    /// Gives every event without status history an entry for its current status.
    ///
    /// Returns the number of events that were backfilled.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails; events already backfilled stay so.
    pub fn backfill_status_history(&mut self, actor: &Actor) -> Result<usize, CoreError> {
        let now: OffsetDateTime = self.now();
        let events: Vec<Event> = self.store_mut().query_events(&EventFilter::all())?;

        let mut backfilled: usize = 0;
        for event in events.iter().filter(|e| e.status_history.is_empty()) {
            let entry: StatusHistoryEntry = StatusHistoryEntry::new(
                event.status,
                now,
                Some(actor.clone()),
                BACKFILL_REASON.to_string(),
            );
            self.store_mut()
                .save_status(event.id, event.version, &entry)?;
            backfilled += 1;
        }

        info!("Backfilled status history for {} events", backfilled);
        Ok(backfilled)
    }
}

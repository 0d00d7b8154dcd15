// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::clock::Clock;
use crate::error::CoreError;
use crate::store::EventStore;
use gleaner_audit::Actor;
use gleaner_domain::{
    Event, EventId, EventStatus, MerchantId, NewEvent, StatusEvaluation, StatusHistoryEntry,
    VolunteerId, evaluate_status, validate_manual_transition, validate_merchant_attachment,
    validate_new_event, validate_volunteer_registration, validate_volunteer_unregistration,
};
use std::str::FromStr;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

/// History reason for the first entry of a new event.
pub const INITIAL_REASON: &str = "initial";

/// History reason for manual changes made without an explicit reason.
pub const MANUAL_CHANGE_REASON: &str = "manual status change";

/// History reason for entries added to events that had none.
pub const BACKFILL_REASON: &str = "initial (backfilled)";

/// Drives event status through its lifecycle.
///
/// The engine owns its store and clock. Every status write goes through
/// [`EventStore::save_status`] with the version that was evaluated, so a
/// concurrent change surfaces as [`CoreError::ConcurrentModification`].
#[derive(Debug)]
pub struct StatusEngine<S, C> {
    store: S,
    clock: C,
}

impl<S: EventStore, C: Clock> StatusEngine<S, C> {
    /// Creates an engine over `store`, reading time from `clock`.
    pub const fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The underlying store, mutably.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// The clock.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// The clock, mutably.
    pub const fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// The current instant according to the engine's clock.
    pub fn now(&self) -> OffsetDateTime {
        self.clock.now()
    }

    /// Creates an event in `incomplete` status with an `initial` history entry.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DomainViolation` if the event fails validation.
    pub fn create_event(&mut self, new_event: NewEvent, actor: &Actor) -> Result<Event, CoreError> {
        validate_new_event(&new_event)?;

        let initial: StatusHistoryEntry = StatusHistoryEntry::new(
            EventStatus::Incomplete,
            self.clock.now(),
            Some(actor.clone()),
            INITIAL_REASON.to_string(),
        );
        let event: Event = self.store.insert_event(&new_event, &initial)?;
        info!("Created event {} ('{}') by {}", event.id, event.title, actor);
        Ok(event)
    }

    /// Loads an event with its participants and history.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the event does not exist.
    pub fn get_event(&mut self, event_id: EventId) -> Result<Event, CoreError> {
        Ok(self.store.load_event(event_id)?)
    }

    /// Re-evaluates one event and persists the result if the status changed.
    ///
    /// When the computed status equals the stored one nothing is written and
    /// the event is returned as loaded.
    ///
    /// # Errors
    ///
    /// - `CoreError::NotFound` if the event does not exist
    /// - `CoreError::ConcurrentModification` if the event changed after it was loaded
    /// - `CoreError::EvaluationFailure` if the store failed during the evaluation
    pub fn check_and_update(
        &mut self,
        event_id: EventId,
        actor: Option<&Actor>,
    ) -> Result<Event, CoreError> {
        let event: Event = self
            .store
            .load_event(event_id)
            .map_err(|e| CoreError::from(e).during_evaluation(event_id))?;
        let now: OffsetDateTime = self.clock.now();
        let evaluation: StatusEvaluation = evaluate_status(&event, now);

        if evaluation.status == event.status {
            debug!(
                "Event {} stays {} ({})",
                event_id, event.status, evaluation.reason
            );
            return Ok(event);
        }

        let entry: StatusHistoryEntry = StatusHistoryEntry::new(
            evaluation.status,
            now,
            actor.cloned(),
            evaluation.reason.to_string(),
        );
        let updated: Event = self
            .store
            .save_status(event_id, event.version, &entry)
            .map_err(|e| CoreError::from(e).during_evaluation(event_id))?;

        info!(
            "Event {} moved from {} to {} ({})",
            event_id, event.status, updated.status, evaluation.reason
        );
        Ok(updated)
    }

    /// Forces an event into `requested` status.
    ///
    /// Bypasses the evaluator. A blank or missing `reason` is recorded as
    /// [`MANUAL_CHANGE_REASON`]. The change is recorded even when the status
    /// does not differ.
    ///
    /// # Errors
    ///
    /// - `CoreError::InvalidStatus` if `requested` is not a known status
    /// - `CoreError::NotFound` if the event does not exist
    /// - `CoreError::InvalidTransition` when finishing before the scheduled end
    /// - `CoreError::ConcurrentModification` if the event changed after it was loaded
    pub fn change_status(
        &mut self,
        event_id: EventId,
        requested: &str,
        actor: &Actor,
        reason: Option<&str>,
    ) -> Result<Event, CoreError> {
        let new_status: EventStatus = EventStatus::from_str(requested)?;
        let event: Event = self.store.load_event(event_id)?;
        let now: OffsetDateTime = self.clock.now();

        validate_manual_transition(&event, new_status, now)?;

        let reason: String = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(MANUAL_CHANGE_REASON)
            .to_string();
        let entry: StatusHistoryEntry =
            StatusHistoryEntry::new(new_status, now, Some(actor.clone()), reason);
        let updated: Event = self.store.save_status(event_id, event.version, &entry)?;

        info!(
            "Event {} manually changed from {} to {} by {}",
            event_id, event.status, updated.status, actor
        );
        Ok(updated)
    }

    /// Registers a volunteer and re-evaluates the event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event does not exist, is terminal, or the
    /// volunteer is already registered. Re-evaluation failures are logged only.
    pub fn register_volunteer(
        &mut self,
        event_id: EventId,
        volunteer_id: VolunteerId,
        actor: &Actor,
    ) -> Result<Event, CoreError> {
        let event: Event = self.store.load_event(event_id)?;
        validate_volunteer_registration(&event, volunteer_id)?;

        let now: OffsetDateTime = self.clock.now();
        let updated: Event = self.store.add_volunteer(event_id, volunteer_id, now)?;
        debug!("Volunteer {} registered for event {}", volunteer_id, event_id);
        Ok(self.refresh(updated, actor))
    }

    /// Withdraws a volunteer and re-evaluates the event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event does not exist, is terminal, or the
    /// volunteer is not registered. Re-evaluation failures are logged only.
    pub fn unregister_volunteer(
        &mut self,
        event_id: EventId,
        volunteer_id: VolunteerId,
        actor: &Actor,
    ) -> Result<Event, CoreError> {
        let event: Event = self.store.load_event(event_id)?;
        validate_volunteer_unregistration(&event, volunteer_id)?;

        let updated: Event = self.store.remove_volunteer(event_id, volunteer_id)?;
        debug!("Volunteer {} withdrew from event {}", volunteer_id, event_id);
        Ok(self.refresh(updated, actor))
    }

    /// Attaches a merchant donation and re-evaluates the event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event does not exist or is terminal.
    /// Re-evaluation failures are logged only.
    pub fn attach_merchant_donation(
        &mut self,
        event_id: EventId,
        merchant_id: MerchantId,
        note: Option<&str>,
        actor: &Actor,
    ) -> Result<Event, CoreError> {
        let event: Event = self.store.load_event(event_id)?;
        validate_merchant_attachment(&event)?;

        let now: OffsetDateTime = self.clock.now();
        let updated: Event = self.store.add_merchant(event_id, merchant_id, note, now)?;
        debug!("Merchant {} attached to event {}", merchant_id, event_id);
        Ok(self.refresh(updated, actor))
    }

    /// Best-effort re-evaluation after a participation change.
    fn refresh(&mut self, committed: Event, actor: &Actor) -> Event {
        match self.check_and_update(committed.id, Some(actor)) {
            Ok(event) => event,
            Err(e) => {
                warn!(
                    "Status re-evaluation of event {} failed after participation change: {}",
                    committed.id, e
                );
                committed
            }
        }
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod evaluator;
mod event;
mod event_status;
mod event_type;
mod transition;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use evaluator::{StatusEvaluation, StatusReason, evaluate_status};
pub use event::{Event, NewEvent, StatusHistory, StatusHistoryEntry};
pub use event_status::EventStatus;
pub use event_type::{CapacityRule, EventType};
pub use transition::{FINISHED_BEFORE_END, validate_manual_transition};
pub use types::{EventId, MerchantId, VolunteerId};
pub use validation::{
    validate_merchant_attachment, validate_new_event, validate_volunteer_registration,
    validate_volunteer_unregistration,
};

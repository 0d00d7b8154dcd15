// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the event status engine.
//!
//! Callers authenticate, are authorized by role and then reach the engine
//! through the handler functions. Domain and engine errors never cross this
//! boundary untranslated.

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
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role, authenticate_stub};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use handlers::{
    attach_merchant_donation, backfill_status_history, change_event_status, check_event_status,
    create_event, get_event, list_finishable, register_volunteer, sweep, unregister_volunteer,
};
pub use request_response::{
    AttachDonationRequest, BackfillResponse, ChangeEventStatusRequest, CreateEventRequest,
    EventInfo, ListFinishableResponse, StatusHistoryInfo, SweepFailureInfo, SweepResponse,
    VolunteerRequest,
};

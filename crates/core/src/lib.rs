// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The event status lifecycle engine.
//!
//! [`StatusEngine`] ties together the pure evaluator from `gleaner-domain`,
//! an [`EventStore`] for persistence and a [`Clock`] for the current time.
//! It exposes the single-event check, the manual override, the participation
//! hooks that trigger re-evaluation, and the scheduled sweep.

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

mod clock;
mod engine;
mod error;
mod memory;
mod store;
mod sweep;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{BACKFILL_REASON, INITIAL_REASON, MANUAL_CHANGE_REASON, StatusEngine};
pub use error::CoreError;
pub use memory::InMemoryEventStore;
pub use store::{EndBound, EventFilter, EventStore, StoreError};
pub use sweep::{SweepFailure, SweepReport};

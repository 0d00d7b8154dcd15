// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit primitives for the Gleaner event engine.
//!
//! Two things live here:
//! - [`Actor`], the identity a change is attributed to
//! - [`History`], an append-only log of values with timestamp, actor and reason
//!
//! `History` exposes no way to remove, reorder or rewrite entries. Reconstruction
//! from storage goes through [`History::from_entries`], which keeps the stored order.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod actor;
mod history;

#[cfg(test)]
mod tests;

pub use actor::{Actor, ActorKind, AuditError};
pub use history::{History, HistoryEntry};

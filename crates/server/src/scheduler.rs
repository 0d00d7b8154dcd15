// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Periodic status sweep.

use gleaner::{CoreError, SweepReport};
use gleaner_audit::Actor;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::SharedEngine;

/// Actor id recorded on transitions made by the scheduled sweep.
pub const SCHEDULED_SWEEP_ACTOR: &str = "scheduled-sweep";

/// Runs one sweep as the scheduler's system actor.
///
/// # Errors
///
/// Returns an error if the candidate events cannot be queried.
pub async fn run_scheduled_sweep(engine: &SharedEngine) -> Result<SweepReport, CoreError> {
    let actor: Actor = Actor::system(SCHEDULED_SWEEP_ACTOR);
    engine.lock().await.sweep_all(Some(&actor))
}

/// Spawns the sweep loop. The first sweep runs immediately.
///
/// Ticks missed while a sweep is still running are skipped, so sweeps never overlap.
pub fn spawn_sweep_scheduler(engine: SharedEngine, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker: Interval = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            match run_scheduled_sweep(&engine).await {
                Ok(report) if report.failures.is_empty() => {
                    info!(
                        examined = report.examined,
                        changed = report.changed,
                        "Scheduled sweep completed"
                    );
                }
                Ok(report) => {
                    warn!(
                        examined = report.examined,
                        changed = report.changed,
                        failed = report.failures.len(),
                        "Scheduled sweep completed with failures"
                    );
                }
                Err(e) => {
                    error!(error = %e, "Scheduled sweep failed");
                }
            }
        }
    })
}

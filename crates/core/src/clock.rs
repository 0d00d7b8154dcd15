// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Duration, OffsetDateTime};

/// Source of the current time for status evaluation.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> OffsetDateTime;
}

/// Wall-clock time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: OffsetDateTime,
}

impl FixedClock {
    /// Creates a clock stopped at `now`.
    #[must_use]
    pub const fn new(now: OffsetDateTime) -> Self {
        Self { now }
    }

    /// Moves the clock to `now`.
    pub const fn set(&mut self, now: OffsetDateTime) {
        self.now = now;
    }

    /// Moves the clock forward (or backward, for a negative duration).
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.now
    }
}

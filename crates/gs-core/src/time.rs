//! Simulation time model.
//!
//! # Design
//!
//! A session counts completed model ticks with a monotonically increasing
//! `Tick`.  How often a tick is *allowed* is governed by a `Throttle`: an
//! external caller polls the session at a fixed clock granularity (e.g. a UI
//! frame loop every 100 ms) and every poll accounts for exactly that much
//! elapsed time.  Once the accumulated time reaches the session's tick
//! interval a model tick runs and the accumulator resets.
//!
//! Using poll counts rather than wall-clock reads keeps throttling exact and
//! testable: N polls always equal N × granularity milliseconds.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// Number of completed model ticks in a session.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── Throttle ──────────────────────────────────────────────────────────────────

/// Accumulates polled time and releases one tick per elapsed interval.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Throttle {
    interval_ms:    u64,
    granularity_ms: u64,
    accumulated_ms: u64,
}

impl Throttle {
    /// `granularity_ms` is the time one [`poll`](Self::poll) accounts for.
    pub fn new(interval_ms: u64, granularity_ms: u64) -> Self {
        Self { interval_ms, granularity_ms, accumulated_ms: 0 }
    }

    /// Account for one clock increment.  Returns `true` (and resets the
    /// accumulator) once the accumulated time reaches the interval.
    pub fn poll(&mut self) -> bool {
        self.accumulated_ms = self.accumulated_ms.saturating_add(self.granularity_ms);
        if self.accumulated_ms >= self.interval_ms {
            self.accumulated_ms = 0;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Time accounted since the last released tick.
    #[inline]
    pub fn accumulated_ms(&self) -> u64 {
        self.accumulated_ms
    }

    /// Change the interval.  Time already accumulated is kept, so shortening
    /// the interval may release the next tick sooner.
    pub fn set_interval_ms(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms;
    }
}

// ── SessionConfig ─────────────────────────────────────────────────────────────

/// Per-session timing and seeding configuration.
///
/// Typically deserialized by the embedding application and passed to the
/// session controller when a session is created.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Minimum simulated time between two model ticks, in milliseconds.
    pub tick_interval_ms: u64,

    /// Time one step call accounts for, in milliseconds.  Must be non-zero.
    pub clock_granularity_ms: u64,

    /// RNG seed.  `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms:     1_000,
            clock_granularity_ms: 100,
            seed:                 None,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if self.clock_granularity_ms == 0 {
            return Err(CoreError::Config("clock granularity must be non-zero".into()));
        }
        Ok(())
    }

    /// Construct a `Throttle` pre-configured for this session.
    pub fn make_throttle(&self) -> Throttle {
        Throttle::new(self.tick_interval_ms, self.clock_granularity_ms)
    }
}

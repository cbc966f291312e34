// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Time sources for record timestamps.
//!
//! The ledger reads the clock while holding its lock, so a clock only has
//! to be monotonic with respect to its own successive calls.

use crate::types::Timestamp;
use std::sync::atomic::{AtomicI64, Ordering};

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// UTC wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let now = chrono::Utc::now();
        // Out of range only after the year 2262.
        Timestamp(now.timestamp_nanos_opt().unwrap_or(i64::MAX))
    }
}

/// Deterministic clock that advances by a fixed step on every read.
#[derive(Debug)]
pub struct ManualClock {
    next: AtomicI64,
    step: i64,
}

impl ManualClock {
    pub fn new(start: i64, step: i64) -> Self {
        Self {
            next: AtomicI64::new(start),
            step,
        }
    }

    /// Move the clock to `nanos` without advancing it.
    pub fn set(&self, nanos: i64) {
        self.next.store(nanos, Ordering::SeqCst);
    }

    /// The value the next `now()` will return.
    pub fn peek(&self) -> Timestamp {
        Timestamp(self.next.load(Ordering::SeqCst))
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(1_700_000_000_000_000_000, 1_000)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.next.fetch_add(self.step, Ordering::SeqCst))
    }
}

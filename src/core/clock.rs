//! Time source abstraction
//!
//! The engine consumes time through a trait so that timestamping and the
//! daily-limit window can be pinned in tests - in particular across the
//! midnight boundary, where two transfers a few minutes apart fall into
//! different limit windows.

use chrono::{DateTime, Utc};
use std::sync::RwLock;

/// Current time source
///
/// Implementations must be cheap to call; the engine reads the clock once
/// per transfer, inside the atomic scope, so the recorded timestamp and
/// the limit window always agree.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock for tests
///
/// Returns a fixed instant until `set` is called with a new one.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        FixedClock {
            now: RwLock::new(now),
        }
    }

    /// Move the clock to a new instant
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write().expect("clock lock poisoned") = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().expect("clock lock poisoned")
    }
}

//! Current-instant source
//!
//! All "now" queries go through [`current_time_millis`]. Tests swap the
//! process-wide clock with [`set_clock`] and restore it by dropping the guard.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// A source of epoch milliseconds.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn millis(&self) -> i64;
}

/// Wall clock backed by `SystemTime`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn millis(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_millis() as i64,
            Err(e) => -(e.duration().as_millis() as i64),
        }
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn millis(&self) -> i64 {
        self.0
    }
}

/// System clock shifted by a constant offset.
#[derive(Debug, Clone, Copy)]
pub struct OffsetClock {
    pub offset_millis: i64,
}

impl Clock for OffsetClock {
    fn millis(&self) -> i64 {
        SystemClock.millis().saturating_add(self.offset_millis)
    }
}

static CURRENT: Lazy<RwLock<Arc<dyn Clock>>> = Lazy::new(|| RwLock::new(Arc::new(SystemClock)));

/// Current instant from the process-wide clock.
pub fn current_time_millis() -> i64 {
    CURRENT.read().millis()
}

/// Replace the process-wide clock until the returned guard is dropped.
#[must_use = "the previous clock is restored when the guard drops"]
pub fn set_clock(clock: Arc<dyn Clock>) -> ClockGuard {
    tracing::debug!(clock = ?clock, "installing clock");
    let previous = std::mem::replace(&mut *CURRENT.write(), clock);
    ClockGuard { previous: Some(previous) }
}

/// Restores the previous clock on drop.
pub struct ClockGuard {
    previous: Option<Arc<dyn Clock>>,
}

impl Drop for ClockGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            tracing::debug!(clock = ?previous, "restoring clock");
            *CURRENT.write() = previous;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_fixed_clock_override() {
        {
            let _guard = set_clock(Arc::new(FixedClock(1_234)));
            assert_eq!(current_time_millis(), 1_234);
        }
        assert!(current_time_millis() > 1_000_000_000_000);
    }

    #[test]
    #[serial]
    fn test_nested_guards_restore_in_order() {
        let outer = set_clock(Arc::new(FixedClock(10)));
        {
            let _inner = set_clock(Arc::new(FixedClock(20)));
            assert_eq!(current_time_millis(), 20);
        }
        assert_eq!(current_time_millis(), 10);
        drop(outer);
    }

    #[test]
    fn test_offset_clock_moves_with_system() {
        let base = SystemClock.millis();
        let shifted = OffsetClock { offset_millis: 86_400_000 }.millis();
        assert!(shifted - base >= 86_400_000);
    }
}

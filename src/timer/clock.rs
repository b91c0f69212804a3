//! Timestamp sources for the countdown timer.
//!
//! The countdown core never reads the system clock directly; it asks a
//! [`TimeSource`] for the current timestamp. Two production sources exist:
//! - [`MonotonicSource`]: high-resolution, backed by `std::time::Instant`
//! - [`WallSource`]: wall-clock fallback, backed by `std::time::SystemTime`
//!
//! [`ManualSource`] is a deterministic source advanced by hand, used by the
//! scenario tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

// ============================================================================
// TimeSource
// ============================================================================

/// A source of timestamps suitable for elapsed-time subtraction.
///
/// Timestamps are durations since an epoch chosen by the source. Only
/// differences between two timestamps from the same source are meaningful.
pub trait TimeSource: Send {
    /// Returns the current timestamp.
    fn now(&self) -> Duration;
}

// ============================================================================
// MonotonicSource
// ============================================================================

/// High-resolution monotonic time source.
///
/// Timestamps are measured from the moment the source was created and never
/// go backwards.
#[derive(Debug)]
pub struct MonotonicSource {
    origin: Instant,
}

impl MonotonicSource {
    /// Creates a new monotonic source anchored at the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicSource {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

// ============================================================================
// WallSource
// ============================================================================

/// Wall-clock time source, used when high precision is not requested.
///
/// Timestamps are measured from the Unix epoch. A system clock set before
/// the epoch reads as zero rather than failing.
#[derive(Debug, Default)]
pub struct WallSource;

impl TimeSource for WallSource {
    fn now(&self) -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
    }
}

// ============================================================================
// ManualSource
// ============================================================================

/// Manually advanced time source for deterministic tests.
///
/// Clones share the same underlying clock, so a test can hold one handle
/// while the timer owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualSource {
    nanos: Arc<AtomicU64>,
}

impl ManualSource {
    /// Creates a new source at timestamp zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by the given duration.
    pub fn advance(&self, duration: Duration) {
        self.nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::SeqCst);
    }

    /// Sets the clock to an absolute timestamp.
    pub fn set(&self, timestamp: Duration) {
        self.nanos
            .store(timestamp.as_nanos() as u64, Ordering::SeqCst);
    }
}

impl TimeSource for ManualSource {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

// ============================================================================
// Tests
// ============================================================================

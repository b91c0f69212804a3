//! Countdown timer core.
//!
//! [`CountdownTimer`] produces a monotonically decreasing time-remaining
//! signal from a pluggable time source, notifies its expiry hook exactly
//! once when the countdown reaches zero, and supports pause/reset/restart
//! without leaking a scheduled callback.
//!
//! The timer is driven cooperatively: the host calls [`poll`] from its loop
//! (a tokio interval in the interactive session, manual pumping in tests)
//! and the timer runs whichever scheduled task has come due. Each task
//! schedules at most the next one, so ticks are strictly sequential.
//!
//! [`poll`]: CountdownTimer::poll

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::types::TimerConfig;

use super::clock::{MonotonicSource, TimeSource, WallSource};
use super::sched::{TickHandle, TickScheduler, TickTask};

// ============================================================================
// DurationCell
// ============================================================================

/// Shared mutable countdown length in seconds.
///
/// The timer re-reads the cell on every scheduling decision, so the host can
/// change the duration while the countdown is running and the in-flight run
/// picks up the new value at the next tick without restarting.
#[derive(Debug, Clone)]
pub struct DurationCell {
    bits: Arc<AtomicU64>,
}

impl DurationCell {
    /// Creates a cell holding the given duration in seconds.
    pub fn new(seconds: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(seconds.to_bits())),
        }
    }

    /// Returns the current duration in seconds.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::SeqCst))
    }

    /// Replaces the duration.
    pub fn set(&self, seconds: f64) {
        self.bits.store(seconds.to_bits(), Ordering::SeqCst);
    }
}

// ============================================================================
// CountdownTimer
// ============================================================================

/// Self-correcting countdown with pluggable clock sources.
///
/// The countdown starts automatically on creation. A non-positive duration
/// makes the timer expire immediately and turns `start()` into a no-op
/// until it is reset with a positive duration.
///
/// Dropping the timer drops its pending slot, so no callback can fire
/// after disposal.
pub struct CountdownTimer {
    duration: DurationCell,
    config: TimerConfig,
    clock: Box<dyn TimeSource>,
    sched: TickScheduler,
    /// Timestamp captured when the timer last started.
    started_at: Option<Duration>,
    /// Last computed remaining time in seconds, clamped at zero.
    remaining: f64,
    /// Ceiling-rounded remaining seconds, updated only when the rounded
    /// value actually changes.
    time_left: u32,
    running: bool,
    /// Sticky until reset; set exactly once per run-to-completion cycle.
    expired: bool,
    /// Handle to the outstanding scheduled task, used for cancellation.
    tick_handle: Option<TickHandle>,
    on_expire: Option<Box<dyn FnMut() + Send>>,
}

impl CountdownTimer {
    /// Creates a timer and starts the countdown.
    ///
    /// High precision selects the monotonic time source; otherwise the wall
    /// clock is used. Terminal hosts have no frame source, so scheduling
    /// falls back to the delay-based path; a frame-driven host injects one
    /// through [`with_parts`](Self::with_parts).
    pub fn new(duration_seconds: f64, config: TimerConfig) -> Self {
        let clock: Box<dyn TimeSource> = if config.use_high_precision {
            Box::new(MonotonicSource::new())
        } else {
            Box::new(WallSource)
        };
        Self::with_parts(duration_seconds, config, clock, TickScheduler::new(None))
    }

    /// Creates a timer from explicit parts.
    ///
    /// Used by hosts that provide their own time source or a scheduler with
    /// a frame interval, and by tests injecting a manual clock.
    pub fn with_parts(
        duration_seconds: f64,
        config: TimerConfig,
        clock: Box<dyn TimeSource>,
        sched: TickScheduler,
    ) -> Self {
        let remaining = duration_seconds.max(0.0);
        let mut timer = Self {
            duration: DurationCell::new(duration_seconds),
            config,
            clock,
            sched,
            started_at: None,
            remaining,
            time_left: remaining.ceil() as u32,
            running: false,
            expired: duration_seconds <= 0.0,
            tick_handle: None,
            on_expire: None,
        };
        timer.start();
        timer
    }

    // ------------------------------------------------------------------------
    // Control surface
    // ------------------------------------------------------------------------

    /// Starts the countdown. No-op once expired or while already running.
    pub fn start(&mut self) {
        if self.expired || self.running {
            return;
        }
        self.cancel_scheduled();
        self.running = true;
        let now = self.clock.now();
        self.started_at = Some(now);
        self.schedule_next(now, Duration::ZERO);
        tracing::trace!(duration = self.duration.get(), "countdown started");
    }

    /// Stops scheduling ticks and cancels the pending one, whichever kind
    /// is outstanding. Idempotent.
    pub fn pause(&mut self) {
        self.running = false;
        self.cancel_scheduled();
    }

    /// Pauses and restores the full configured duration.
    pub fn reset(&mut self) {
        self.pause();
        self.started_at = None;
        let duration = self.duration.get();
        if duration > 0.0 {
            self.remaining = duration;
            self.time_left = duration.ceil() as u32;
            self.expired = false;
        } else {
            self.remaining = 0.0;
            self.time_left = 0;
            self.expired = true;
        }
    }

    /// Resets, then starts on the next turn of the host loop.
    ///
    /// The start is posted as a zero-delay task rather than called inline,
    /// so a restart issued from inside a tick never touches scheduling
    /// state that is still being torn down.
    pub fn restart(&mut self) {
        self.reset();
        if self.expired {
            return;
        }
        let now = self.clock.now();
        self.tick_handle = Some(self.sched.schedule_delay(now, Duration::ZERO, TickTask::Start));
    }

    /// Runs any scheduled task that has come due.
    ///
    /// Returns true when an observable output changed (the reported
    /// `time_left` moved or the timer expired).
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        loop {
            let now = self.clock.now();
            match self.sched.take_due(now) {
                Some(task) => {
                    // The popped task's handle is stale from here on.
                    self.tick_handle = None;
                    match task {
                        TickTask::Start => self.start(),
                        TickTask::Tick => changed |= self.tick(),
                    }
                }
                None => break,
            }
        }
        changed
    }

    // ------------------------------------------------------------------------
    // Observable outputs
    // ------------------------------------------------------------------------

    /// Remaining whole seconds, ceiling-rounded. Never negative.
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Remaining time as a percentage of the configured duration, in 0-100.
    ///
    /// Shrinking the duration below the current remaining time reports 100
    /// until the next tick recomputes the remaining time.
    pub fn percentage(&self) -> f64 {
        let duration = self.duration.get();
        if duration > 0.0 {
            100.0 * (self.remaining / duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Returns true once the countdown has reached zero.
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Returns true while the timer is actively scheduling ticks.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns true while a tick or deferred start is scheduled.
    pub fn is_scheduled(&self) -> bool {
        !self.sched.is_idle()
    }

    /// Deadline of the pending scheduled task, in the time source's
    /// timebase.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.sched.next_deadline()
    }

    // ------------------------------------------------------------------------
    // Host inputs
    // ------------------------------------------------------------------------

    /// Returns a handle to the shared duration cell.
    pub fn duration_cell(&self) -> DurationCell {
        self.duration.clone()
    }

    /// Replaces the configured duration. Takes effect at the next tick.
    pub fn set_duration(&self, seconds: f64) {
        self.duration.set(seconds);
    }

    /// Replaces the expiry hook. The most recently set hook is the one
    /// invoked on expiry.
    pub fn set_on_expire<F>(&mut self, hook: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.on_expire = Some(Box::new(hook));
    }

    /// Removes the expiry hook. Expiry is then silent.
    pub fn clear_on_expire(&mut self) {
        self.on_expire = None;
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    /// One scheduled evaluation of elapsed time against the duration.
    fn tick(&mut self) -> bool {
        if self.expired {
            return false;
        }
        let Some(started_at) = self.started_at else {
            return false;
        };

        let now = self.clock.now();
        let elapsed = now.saturating_sub(started_at);
        let duration = self.duration.get();
        let remaining = (duration - elapsed.as_secs_f64()).max(0.0);
        self.remaining = remaining;

        let mut changed = false;
        let time_left = remaining.ceil() as u32;
        if time_left != self.time_left {
            self.time_left = time_left;
            changed = true;
        }

        if remaining <= 0.0 {
            self.running = false;
            self.expired = true;
            tracing::debug!("countdown expired");
            if let Some(on_expire) = self.on_expire.as_mut() {
                on_expire();
            }
            return true;
        }

        if self.running {
            self.schedule_next(now, elapsed);
        }
        changed
    }

    fn schedule_next(&mut self, now: Duration, elapsed: Duration) {
        if self.config.use_high_precision {
            if let Some(handle) = self.sched.schedule_frame(now, TickTask::Tick) {
                self.tick_handle = Some(handle);
                return;
            }
        }
        // Align the next tick to the precision grid instead of drifting by
        // however long the previous callback took. Integer milliseconds keep
        // the delay in 1..=precision; a float remainder can round a
        // grid-aligned elapsed value to a zero-length delay, which would pin
        // the deadline at `now` and spin the pump.
        let precision_ms = self.config.precision_ms.max(1);
        let delay_ms = precision_ms - (elapsed.as_millis() as u64 % precision_ms);
        self.tick_handle = Some(self.sched.schedule_delay(
            now,
            Duration::from_millis(delay_ms),
            TickTask::Tick,
        ));
    }

    /// Cancels the outstanding scheduled task, if any.
    fn cancel_scheduled(&mut self) {
        if let Some(handle) = self.tick_handle.take() {
            self.sched.cancel(handle);
        }
    }
}

impl std::fmt::Debug for CountdownTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountdownTimer")
            .field("duration", &self.duration.get())
            .field("time_left", &self.time_left)
            .field("running", &self.running)
            .field("expired", &self.expired)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

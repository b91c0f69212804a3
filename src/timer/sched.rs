//! Single-slot tick scheduler for the countdown timer.
//!
//! The countdown timer keeps at most one scheduled callback outstanding at a
//! time: either the next elapsed-time evaluation or a deferred start posted
//! by `restart()`. This module owns that single slot. Scheduling a task
//! fills the slot and returns a handle, cancellation through the handle
//! empties it synchronously, and the host pump pops the task once its
//! deadline has passed.
//!
//! Two scheduling primitives are modeled:
//! - frame-based: fires once per display refresh; only available when the
//!   scheduler was built with a frame interval
//! - delay-based: fires after an explicit millisecond delay

use std::time::Duration;

// ============================================================================
// TickHandle
// ============================================================================

/// Identifies one scheduled task.
///
/// Handles are generation-tagged: a handle from a previous scheduling round
/// no longer cancels anything once the slot has been refilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickHandle(u64);

// ============================================================================
// TickTask
// ============================================================================

/// The work a due slot should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickTask {
    /// Evaluate elapsed time against the configured duration.
    Tick,
    /// Run the start deferred by `restart()`.
    Start,
}

// ============================================================================
// TickScheduler
// ============================================================================

#[derive(Debug)]
struct Pending {
    handle: TickHandle,
    due: Duration,
    task: TickTask,
}

/// Schedules at most one pending task at a time.
#[derive(Debug)]
pub struct TickScheduler {
    /// Refresh interval of the frame source; `None` when no frame source
    /// exists in the host environment.
    frame_interval: Option<Duration>,
    next_handle: u64,
    pending: Option<Pending>,
}

impl TickScheduler {
    /// Creates a scheduler.
    ///
    /// Pass a frame interval to make frame-based scheduling available;
    /// `None` leaves only the delay-based path.
    pub fn new(frame_interval: Option<Duration>) -> Self {
        Self {
            frame_interval,
            next_handle: 0,
            pending: None,
        }
    }

    /// Returns true if no task is pending.
    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }

    /// Returns the deadline of the pending task, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Schedules a task on the frame source.
    ///
    /// Returns `None` when no frame source is available; the caller is
    /// expected to fall back to [`schedule_delay`](Self::schedule_delay).
    pub fn schedule_frame(&mut self, now: Duration, task: TickTask) -> Option<TickHandle> {
        let interval = self.frame_interval?;
        Some(self.fill_slot(now + interval, task))
    }

    /// Schedules a task to run once `delay` has elapsed.
    pub fn schedule_delay(&mut self, now: Duration, delay: Duration, task: TickTask) -> TickHandle {
        self.fill_slot(now + delay, task)
    }

    /// Cancels the pending task if `handle` still identifies it. A stale
    /// handle cancels nothing.
    pub fn cancel(&mut self, handle: TickHandle) {
        if self.pending.as_ref().is_some_and(|p| p.handle == handle) {
            self.pending = None;
        }
    }

    /// Pops the pending task if its deadline has passed.
    pub fn take_due(&mut self, now: Duration) -> Option<TickTask> {
        if self.pending.as_ref().is_some_and(|p| p.due <= now) {
            self.pending.take().map(|p| p.task)
        } else {
            None
        }
    }

    fn fill_slot(&mut self, due: Duration, task: TickTask) -> TickHandle {
        // Filling an occupied slot would orphan a live callback.
        debug_assert!(
            self.pending.is_none(),
            "scheduled a task while another was pending"
        );
        self.next_handle += 1;
        let handle = TickHandle(self.next_handle);
        self.pending = Some(Pending { handle, due, task });
        handle
    }
}

// ============================================================================
// Tests
// ============================================================================

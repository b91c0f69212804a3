//! Countdown timer core.
//!
//! This module contains the turn timer:
//! - `clock`: pluggable timestamp sources (monotonic, wall-clock, manual)
//! - `sched`: single-slot tick scheduler with frame/delay primitives
//! - `countdown`: the self-correcting countdown with exactly-once expiry

pub mod clock;
pub mod countdown;
pub mod sched;

pub use clock::{ManualSource, MonotonicSource, TimeSource, WallSource};
pub use countdown::{CountdownTimer, DurationCell};
pub use sched::{TickHandle, TickScheduler, TickTask};

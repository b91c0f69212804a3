//! Countdown timer scenario tests.
//!
//! These tests drive the timer through its public API with a manually
//! advanced time source, so every elapsed-time computation is exact and
//! deterministic.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tictactoe::{CountdownTimer, ManualSource, TickScheduler, TimeSource, TimerConfig};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Timer on a manual clock without a frame source (delay-based fallback).
fn fallback_timer(duration_seconds: f64, precision_ms: u64) -> (CountdownTimer, ManualSource) {
    let clock = ManualSource::new();
    let config = TimerConfig {
        precision_ms,
        ..TimerConfig::default()
    };
    let timer = CountdownTimer::with_parts(
        duration_seconds,
        config,
        Box::new(clock.clone()),
        TickScheduler::new(None),
    );
    (timer, clock)
}

/// Timer on a manual clock with a 60Hz frame source available.
fn frame_timer(duration_seconds: f64) -> (CountdownTimer, ManualSource) {
    let clock = ManualSource::new();
    let timer = CountdownTimer::with_parts(
        duration_seconds,
        TimerConfig::default(),
        Box::new(clock.clone()),
        TickScheduler::new(Some(ms(16))),
    );
    (timer, clock)
}

fn attach_counter(timer: &mut CountdownTimer) -> Arc<AtomicU32> {
    let counter = Arc::new(AtomicU32::new(0));
    let hook_counter = Arc::clone(&counter);
    timer.set_on_expire(move || {
        hook_counter.fetch_add(1, Ordering::SeqCst);
    });
    counter
}

// ============================================================================
// Construction Properties
// ============================================================================

#[test]
fn positive_duration_starts_running_at_full_value() {
    for duration in [1.0, 5.0, 7.3, 60.0] {
        let (timer, _clock) = fallback_timer(duration, 100);
        assert_eq!(timer.time_left(), duration.ceil() as u32);
        assert_eq!(timer.percentage(), 100.0);
        assert!(!timer.is_expired());
        assert!(timer.is_running());
    }
}

#[test]
fn non_positive_duration_is_born_expired() {
    for duration in [0.0, -0.5, -10.0] {
        let (timer, _clock) = fallback_timer(duration, 100);
        assert!(timer.is_expired());
        assert_eq!(timer.time_left(), 0);
        assert_eq!(timer.percentage(), 0.0);
        assert!(!timer.is_running());
    }
}

// ============================================================================
// Idempotence and Round Trips
// ============================================================================

#[test]
fn pause_twice_equals_pause_once() {
    let (mut timer, clock) = fallback_timer(5.0, 100);
    clock.advance(ms(1100));
    timer.poll();

    timer.pause();
    let time_left = timer.time_left();
    let running = timer.is_running();
    let scheduled = timer.is_scheduled();

    timer.pause();
    assert_eq!(timer.time_left(), time_left);
    assert_eq!(timer.is_running(), running);
    assert_eq!(timer.is_scheduled(), scheduled);
}

#[test]
fn reset_restores_initial_state_regardless_of_elapsed_time() {
    for elapsed_ms in [0u64, 500, 2600, 4900, 20_000] {
        let (mut timer, clock) = fallback_timer(5.0, 100);
        clock.advance(ms(elapsed_ms));
        timer.poll();

        timer.reset();
        assert_eq!(timer.time_left(), 5);
        assert_eq!(timer.percentage(), 100.0);
        assert!(!timer.is_expired());
    }
}

#[test]
fn no_negative_time_for_any_overshoot() {
    for overshoot_ms in [5000u64, 5001, 6000, 3_600_000] {
        let (mut timer, clock) = fallback_timer(5.0, 100);
        clock.advance(ms(overshoot_ms));
        timer.poll();
        assert_eq!(timer.time_left(), 0);
        assert!(timer.percentage() >= 0.0);
    }
}

#[test]
fn expiry_fires_once_per_completed_run() {
    let (mut timer, clock) = fallback_timer(2.0, 100);
    let fired = attach_counter(&mut timer);

    // Pump well past expiry in many small steps.
    for _ in 0..100 {
        clock.advance(ms(100));
        timer.poll();
    }
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // A reset does not re-fire by itself.
    timer.reset();
    clock.advance(ms(10_000));
    timer.poll();
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // A full second run fires a second time.
    timer.restart();
    timer.poll();
    clock.advance(ms(2100));
    timer.poll();
    assert_eq!(fired.load(Ordering::SeqCst), 2);
}

// ============================================================================
// Scenario A: high precision run to completion
// ============================================================================

#[test]
fn scenario_a_high_precision_expiry() {
    let (mut timer, clock) = frame_timer(5.0);
    let fired = attach_counter(&mut timer);

    clock.advance(Duration::from_millis(5100));
    timer.poll();

    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert!(timer.is_expired());
    assert_eq!(timer.time_left(), 0);
    assert!(!timer.is_running());
}

// ============================================================================
// Scenario B: zero duration
// ============================================================================

#[test]
fn scenario_b_zero_duration_start_is_a_noop() {
    let (mut timer, clock) = fallback_timer(0.0, 100);
    let fired = attach_counter(&mut timer);
    assert!(timer.is_expired());

    timer.start();
    assert!(!timer.is_running());
    assert!(!timer.is_scheduled());

    clock.advance(ms(5000));
    timer.poll();
    assert!(timer.is_expired());
    assert_eq!(timer.time_left(), 0);
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Scenario C: restart mid-countdown
// ============================================================================

#[test]
fn scenario_c_restart_mid_countdown() {
    let (mut timer, clock) = fallback_timer(10.0, 100);
    clock.advance(ms(4100));
    timer.poll();
    assert_eq!(timer.time_left(), 6);

    timer.restart();
    assert_eq!(timer.time_left(), 10);
    assert_eq!(timer.percentage(), 100.0);
    assert!(!timer.is_running());

    // The deferred start runs on the next pump.
    timer.poll();
    assert!(timer.is_running());

    clock.advance(ms(1100));
    timer.poll();
    assert_eq!(timer.time_left(), 9);
}

// ============================================================================
// Scenario D: delay-based fallback scheduling
// ============================================================================

#[test]
fn scenario_d_fallback_delays_stay_within_precision() {
    let (mut timer, clock) = fallback_timer(5.0, 100);
    let mut elapsed_ms = 0u64;

    // Irregular pump steps; every scheduled delay must stay in (0, 100].
    for step in [33u64, 120, 77, 100, 240, 61] {
        clock.advance(ms(step));
        elapsed_ms += step;
        timer.poll();

        let deadline = timer
            .next_deadline()
            .expect("a tick should remain scheduled");
        let delay_ms = deadline.as_millis() as u64 - elapsed_ms;
        assert!(delay_ms > 0, "delay was not positive: {delay_ms}");
        assert!(delay_ms <= 100, "delay exceeded the precision: {delay_ms}");
        assert_eq!(deadline.as_millis() % 100, 0, "tick left the precision grid");
    }
}

#[test]
fn scenario_d_grid_aligned_elapsed_does_not_stall_the_pump() {
    // At elapsed values like 32.3s a float millisecond conversion rounds to
    // just under the grid multiple; the next deadline must still be in the
    // future so poll() terminates.
    let (mut timer, clock) = fallback_timer(40.0, 100);
    clock.advance(ms(32_300));
    timer.poll();

    assert_eq!(timer.time_left(), 8);
    let deadline = timer
        .next_deadline()
        .expect("a tick should remain scheduled");
    assert!(deadline > clock.now());
    assert_eq!(deadline, ms(32_400));
}

// ============================================================================
// Mutable duration
// ============================================================================

#[test]
fn duration_change_applies_at_the_next_tick_without_restart() {
    let (mut timer, clock) = fallback_timer(5.0, 100);
    clock.advance(ms(2100));
    timer.poll();
    assert_eq!(timer.time_left(), 3);

    timer.duration_cell().set(20.0);
    clock.advance(ms(100));
    timer.poll();
    assert_eq!(timer.time_left(), 18);
    assert!(timer.is_running());
}

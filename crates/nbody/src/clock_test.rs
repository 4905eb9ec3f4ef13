use approx::assert_relative_eq;

use crate::clock::AveragedClock;

#[test]
fn test_first_tick_anchors() {
    let mut clock = AveragedClock::default();
    assert!(clock.tick(1000.0).is_none());
    assert_eq!(clock.ticks(), 0);
}

#[test]
fn test_running_average() {
    let mut clock = AveragedClock::new(1.0);
    clock.tick(0.0);

    assert_relative_eq!(clock.tick(10.0).unwrap(), 0.010, epsilon = 1e-12);
    assert_relative_eq!(clock.tick(40.0).unwrap(), 0.020, epsilon = 1e-12);
    assert_relative_eq!(clock.tick(50.0).unwrap(), 0.050 / 3.0, epsilon = 1e-12);
    assert_eq!(clock.ticks(), 3);
}

#[test]
fn test_time_warp_scales_step() {
    let mut clock = AveragedClock::new(3600.0);
    clock.tick(0.0);
    assert_relative_eq!(clock.tick(10.0).unwrap(), 36.0, epsilon = 1e-9);
}

#[test]
fn test_resume_skips_hidden_time() {
    let mut clock = AveragedClock::new(1.0);
    clock.tick(0.0);
    clock.tick(10.0);

    // Hidden for a minute
    clock.resume(60_010.0);
    let dt = clock.tick(60_020.0).unwrap();

    assert_relative_eq!(dt, 0.010, epsilon = 1e-12);
}

#[test]
fn test_suspend_reanchors() {
    let mut clock = AveragedClock::new(1.0);
    clock.tick(0.0);
    clock.tick(10.0);
    clock.suspend();

    assert!(clock.tick(5_000.0).is_none());
    assert_relative_eq!(clock.tick(5_010.0).unwrap(), 0.010, epsilon = 1e-12);
}

#[test]
fn test_clock_going_backwards_counts_as_zero() {
    let mut clock = AveragedClock::new(1.0);
    clock.tick(100.0);
    assert_relative_eq!(clock.tick(50.0).unwrap(), 0.0);
}

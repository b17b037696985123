/// Tests for FpsCounter
///
/// Deltas are binary fractions so accumulation is exact.

use super::*;

// ============================================================================
// Throttling
// ============================================================================

#[test]
fn test_first_tick_displays() {
    let mut counter = FpsCounter::default();
    assert_eq!(counter.tick(0.0625), Some(16));
    assert_eq!(counter.last_fps(), Some(16));
}

#[test]
fn test_updates_only_when_interval_reached() {
    let mut counter = FpsCounter::default();
    counter.tick(0.0625);

    assert_eq!(counter.tick(0.0625), None);
    assert_eq!(counter.tick(0.0625), None);
    assert_eq!(counter.tick(0.0625), None);
    assert_eq!(counter.tick(0.0625), Some(16));
    assert_eq!(counter.tick(0.0625), None);
}

#[test]
fn test_uses_instantaneous_delta() {
    let mut counter = FpsCounter::default();
    counter.tick(0.0625);

    assert_eq!(counter.tick(0.125), None);
    // 0.125 + 0.25 crosses the interval; the value comes from 0.25 alone
    assert_eq!(counter.tick(0.25), Some(4));
}

#[test]
fn test_value_is_rounded_up() {
    let mut counter = FpsCounter::default();
    // 1 / 0.375 = 2.67
    assert_eq!(counter.tick(0.375), Some(3));
}

#[test]
fn test_zero_delta_is_clamped() {
    let mut counter = FpsCounter::default();
    let fps = counter.tick(0.0).unwrap();
    assert!((10_000..=10_001).contains(&fps), "fps = {}", fps);
}

#[test]
fn test_custom_interval() {
    let mut counter = FpsCounter::new(FpsConfig { update_interval: 1.0, min_delta: 1e-4 });
    assert_eq!(counter.tick(0.5), Some(2));

    assert_eq!(counter.tick(0.5), None);
    assert_eq!(counter.tick(0.5), Some(2));
}

// ============================================================================
// Real-time driven updates
// ============================================================================

#[test]
fn test_update_derives_delta_from_realtime() {
    let mut counter = FpsCounter::default();

    assert_eq!(counter.update(0.5), Some(2));
    assert_eq!(counter.update(0.5625), None);
    assert_eq!(counter.update(0.625), None);
    assert_eq!(counter.update(0.75), Some(8));
}

#[test]
fn test_format() {
    assert_eq!(FpsCounter::format(60), "FPS: 60");
}

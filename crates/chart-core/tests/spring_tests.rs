// Host-side tests for the spring integrator: time-accumulated, idempotent at
// dt = 0, convergent, and rest fires exactly once.

use chart_core::{Animator, Spring, SpringConfig, SPRING_BAR_VALUE, SPRING_CAROUSEL_CARET};

const TICK: f32 = 1.0 / 60.0;

fn run_until_rest(spring: &mut Spring, max_ticks: usize) -> Option<usize> {
    for tick in 0..max_ticks {
        if spring.step(TICK) {
            return Some(tick);
        }
    }
    None
}

#[test]
fn zero_elapsed_time_changes_nothing() {
    let mut spring = Spring::with_target(0.0, 1.0, SPRING_BAR_VALUE);
    spring.step(TICK);
    let value = spring.value();
    for _ in 0..10 {
        assert!(!spring.step(0.0));
    }
    assert_eq!(spring.value(), value);
}

#[test]
fn negative_and_nonfinite_dt_are_ignored() {
    let mut spring = Spring::with_target(0.0, 1.0, SPRING_BAR_VALUE);
    spring.step(TICK);
    let value = spring.value();
    assert!(!spring.step(-1.0));
    assert!(!spring.step(f32::NAN));
    assert_eq!(spring.value(), value);
}

#[test]
fn converges_to_target() {
    let mut spring = Spring::with_target(0.0, 1.0, SPRING_BAR_VALUE);
    let rested_at = run_until_rest(&mut spring, 600);
    assert!(rested_at.is_some(), "spring never settled");
    assert!((spring.value() - 1.0).abs() < 1e-3);
    assert!(spring.is_resting());
}

#[test]
fn overshoot_stays_bounded() {
    // underdamped pair: overshoot exists but never exceeds the initial
    // displacement
    let mut spring = Spring::with_target(0.0, 1.0, SPRING_BAR_VALUE);
    let mut max_value = 0.0f32;
    for _ in 0..600 {
        spring.step(TICK);
        max_value = max_value.max(spring.value());
    }
    assert!(max_value > 1.0, "expected some overshoot, got {max_value}");
    assert!(max_value < 2.0, "overshoot unbounded: {max_value}");
}

#[test]
fn rest_fires_exactly_once() {
    let mut spring = Spring::with_target(0.0, 1.0, SPRING_CAROUSEL_CARET);
    let mut rest_events = 0;
    for _ in 0..600 {
        if spring.step(TICK) {
            rest_events += 1;
        }
    }
    assert_eq!(rest_events, 1);
}

#[test]
fn new_target_wakes_a_resting_spring() {
    let mut spring = Spring::with_target(0.0, 1.0, SPRING_BAR_VALUE);
    run_until_rest(&mut spring, 600).expect("first settle");
    spring.set_target(0.25);
    assert!(!spring.is_resting());
    run_until_rest(&mut spring, 600).expect("second settle");
    assert!((spring.value() - 0.25).abs() < 1e-3);
}

#[test]
fn setting_the_current_value_as_target_keeps_rest() {
    let mut spring = Spring::new(0.5, SPRING_BAR_VALUE);
    spring.set_target(0.5);
    assert!(spring.is_resting());
    assert!(!spring.step(TICK));
}

#[test]
fn snap_pins_value_and_velocity() {
    let mut spring = Spring::with_target(0.0, 1.0, SPRING_BAR_VALUE);
    spring.step(TICK);
    spring.snap_to(0.7);
    assert_eq!(spring.value(), 0.7);
    assert!(spring.is_resting());
    assert!(!spring.step(TICK));
    assert_eq!(spring.value(), 0.7);
}

#[test]
fn large_frame_gaps_do_not_destabilize_integration() {
    // a dropped-frame sized dt must not explode the oscillator
    let mut spring = Spring::with_target(0.0, 1.0, SpringConfig::new(600.0, 18.0));
    spring.step(5.0);
    assert!(spring.value().is_finite());
    assert!(spring.value().abs() < 3.0);
}

#[test]
fn animator_steps_all_springs_in_one_batch() {
    let mut animator = Animator::new();
    let a = animator.push(Spring::with_target(0.0, 1.0, SPRING_BAR_VALUE));
    let b = animator.push(Spring::with_target(0.0, 0.5, SPRING_BAR_VALUE));
    animator.advance(TICK);
    // both springs observed the same tick
    assert!(animator.value(a) > 0.0);
    assert!(animator.value(b) > 0.0);
    assert!(!animator.all_resting());
}

#[test]
fn animator_reports_handles_that_came_to_rest() {
    let mut animator = Animator::new();
    let fast = animator.push(Spring::with_target(0.0, 1.0, SPRING_CAROUSEL_CARET));
    let _slow = animator.push(Spring::with_target(0.0, 1.0, SpringConfig::new(40.0, 3.0)));
    let mut rested_handles = Vec::new();
    for _ in 0..240 {
        rested_handles.extend(animator.advance(TICK));
        if rested_handles.contains(&fast) {
            break;
        }
    }
    assert!(rested_handles.contains(&fast));
    assert!(!animator.all_resting(), "slow spring should still be moving");
}

#[test]
fn animator_clear_drops_entity_state() {
    let mut animator = Animator::new();
    animator.push(Spring::new(1.0, SPRING_BAR_VALUE));
    animator.clear();
    assert!(animator.is_empty());
    assert_eq!(animator.advance(TICK).len(), 0);
}

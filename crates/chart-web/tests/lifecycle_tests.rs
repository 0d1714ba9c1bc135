// Host-side tests for the composer surface lifecycle. The main crate is
// wasm-only, so the pure phase module is included directly.

#![allow(dead_code)]
mod lifecycle {
    include!("../src/lifecycle.rs");
}

use lifecycle::*;

#[test]
fn starts_uninitialized_and_skips_drawing() {
    let tracker = PhaseTracker::new();
    assert_eq!(tracker.phase(), SurfacePhase::Uninitialized);
    // missing context is a no-op, not an error
    assert!(!tracker.should_draw());
    assert!(tracker.can_attach());
}

#[test]
fn context_is_acquired_exactly_once_per_surface() {
    let mut tracker = PhaseTracker::new();
    tracker.mark_ready();
    assert_eq!(tracker.phase(), SurfacePhase::Ready);
    assert!(tracker.should_draw());
    // a second attach on a live surface is rejected
    assert!(!tracker.can_attach());
}

#[test]
fn failed_acquisition_allows_a_retry_by_reattaching() {
    let mut tracker = PhaseTracker::new();
    tracker.mark_failed();
    assert_eq!(tracker.phase(), SurfacePhase::Failed);
    assert!(!tracker.should_draw());
    assert!(tracker.can_attach());

    tracker.mark_ready();
    assert!(tracker.should_draw());
}

#[test]
fn surface_loss_after_ready_reenters_failed() {
    let mut tracker = PhaseTracker::new();
    tracker.mark_ready();
    tracker.mark_failed();
    assert_eq!(tracker.phase(), SurfacePhase::Failed);
    assert!(tracker.can_attach(), "host may retry by reattaching");
}

#[test]
fn detach_mid_animation_makes_later_ticks_noops() {
    let mut tracker = PhaseTracker::new();
    tracker.mark_ready();
    tracker.mark_destroyed();
    assert_eq!(tracker.phase(), SurfacePhase::Destroyed);
    assert!(!tracker.should_draw());
    assert!(!tracker.can_attach());
}

#[test]
fn destroyed_is_terminal() {
    let mut tracker = PhaseTracker::new();
    tracker.mark_destroyed();
    // neither failure reporting nor anything else revives the surface
    tracker.mark_failed();
    assert_eq!(tracker.phase(), SurfacePhase::Destroyed);
    assert!(!tracker.can_attach());
    assert!(!tracker.should_draw());
}

#[test]
fn detach_is_valid_from_every_phase() {
    let setups: [fn(&mut PhaseTracker); 3] =
        [|_| {}, PhaseTracker::mark_ready, PhaseTracker::mark_failed];
    for setup in setups {
        let mut tracker = PhaseTracker::new();
        setup(&mut tracker);
        tracker.mark_destroyed();
        assert_eq!(tracker.phase(), SurfacePhase::Destroyed);
    }
}

// Host-side tests for chart layout math and the carousel caret state.

use chart_core::{
    pie_slices, BarLayout, CarouselState, BAR_SPACING, CAROUSEL_ITEM_SPACING, CHART_AREA_WIDTH,
    PIE_SLICE_HEIGHT_MAX, PIE_SLICE_HEIGHT_MIN, PIE_START_OFFSET,
};

#[test]
fn bar_cells_split_the_chart_area_evenly() {
    let layout = BarLayout::new(5);
    assert!((layout.cell_size - CHART_AREA_WIDTH / 5.0).abs() < 1e-6);
    assert!((layout.radius - (layout.cell_size / 2.0 - BAR_SPACING)).abs() < 1e-6);
}

#[test]
fn bar_radius_never_collapses_for_dense_series() {
    // with many bars the padded radius would go negative; it clamps instead
    let layout = BarLayout::new(40);
    assert!(layout.radius >= BAR_SPACING / 2.0);
}

#[test]
fn bar_row_is_centered_on_the_chart_origin() {
    let layout = BarLayout::new(4);
    let first = layout.base(0);
    let last = layout.base(3);
    assert!((first.x + last.x).abs() < 1e-4, "row not centered");
    assert_eq!(first.y, last.y);
}

#[test]
fn bar_top_center_tracks_the_animated_height() {
    let layout = BarLayout::new(3);
    let top = layout.top_center(1, 123.0);
    let base = layout.base(1);
    assert_eq!(top.x, base.x);
    assert_eq!(top.y, base.y);
    assert_eq!(top.z, 123.0);
}

#[test]
fn pie_spans_accumulate_from_the_start_offset() {
    let slices = pie_slices(&[0.2, 0.3, 0.1]);
    assert_eq!(slices.len(), 3);
    assert!((slices[0].start - PIE_START_OFFSET).abs() < 1e-6);
    assert!((slices[0].end - (PIE_START_OFFSET + 0.2)).abs() < 1e-6);
    assert!((slices[1].start - slices[0].end).abs() < 1e-6);
    assert!((slices[2].end - (PIE_START_OFFSET + 0.6)).abs() < 1e-6);
}

#[test]
fn pie_heights_ramp_from_min_to_max() {
    let slices = pie_slices(&[0.1, 0.1, 0.1, 0.1, 0.1]);
    assert_eq!(slices[0].height_at(1.0), PIE_SLICE_HEIGHT_MIN);
    assert!((slices[4].height_at(1.0) - PIE_SLICE_HEIGHT_MAX).abs() < 1e-4);
    // the reveal animation scales only the ramp, not the resting height
    for slice in &slices {
        assert_eq!(slice.height_at(0.0), PIE_SLICE_HEIGHT_MIN);
    }
}

#[test]
fn single_slice_keeps_a_finite_height_ramp() {
    let slices = pie_slices(&[1.0]);
    assert_eq!(slices.len(), 1);
    assert!(slices[0].height_at(1.0).is_finite());
    assert_eq!(slices[0].height_at(1.0), PIE_SLICE_HEIGHT_MIN);
}

#[test]
fn pie_mid_angle_bisects_the_span() {
    let slices = pie_slices(&[0.5]);
    let expected = (PIE_START_OFFSET + 0.25) * std::f32::consts::TAU;
    assert!((slices[0].mid_angle() - expected).abs() < 1e-5);
}

#[test]
fn carousel_intent_widens_the_prerendered_range_first() {
    let mut state = CarouselState::new();
    state.start_intent(1);
    // target item exists before the displayed caret moves
    assert_eq!(state.positions(), 0..=1);
    assert_eq!(state.displayed(), 0);

    let target = state.commit_display();
    assert_eq!(state.displayed(), 1);
    assert!((target - CAROUSEL_ITEM_SPACING).abs() < 1e-6);
}

#[test]
fn carousel_settle_clobbers_nondisplayed_items() {
    let mut state = CarouselState::new();
    state.start_intent(1);
    state.start_intent(1);
    state.commit_display();
    assert_eq!(state.positions(), 0..=2);

    state.settle();
    assert_eq!(state.positions(), 2..=2);
}

#[test]
fn carousel_supports_negative_slots() {
    let mut state = CarouselState::new();
    state.start_intent(-1);
    state.start_intent(-1);
    assert_eq!(state.positions(), -2..=0);
    let target = state.commit_display();
    assert!((target + 2.0 * CAROUSEL_ITEM_SPACING).abs() < 1e-6);
}

#[test]
fn carousel_item_offsets_follow_the_caret() {
    let caret_x = 0.5 * CAROUSEL_ITEM_SPACING;
    assert!((CarouselState::item_left(0, caret_x) + caret_x).abs() < 1e-6);
    assert!(
        (CarouselState::item_left(1, caret_x) - (CAROUSEL_ITEM_SPACING - caret_x)).abs() < 1e-6
    );
}

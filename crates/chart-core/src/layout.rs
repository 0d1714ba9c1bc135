//! Chart-space layout rules and the carousel caret state machine.

use crate::constants::{
    BAR_SPACING, CAROUSEL_ITEM_SPACING, CHART_AREA_WIDTH, PIE_SLICE_HEIGHT_MAX,
    PIE_SLICE_HEIGHT_MIN, PIE_START_OFFSET,
};
use glam::{Vec2, Vec3};
use std::ops::RangeInclusive;

/// Horizontal placement of `count` bars across the chart area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarLayout {
    pub cell_size: f32,
    pub radius: f32,
    pub start_x: f32,
    pub base_y: f32,
}

impl BarLayout {
    pub fn new(count: usize) -> Self {
        let cell_size = CHART_AREA_WIDTH / count.max(1) as f32;
        // padding on both sides of a cell, but never thinner than the gap
        let radius = (cell_size / 2.0 - BAR_SPACING).max(BAR_SPACING / 2.0);
        Self {
            cell_size,
            radius,
            start_x: -cell_size * (count.max(1) as f32 - 1.0) / 2.0,
            base_y: radius - 40.0,
        }
    }

    /// Chart-plane center of bar `index`.
    pub fn base(&self, index: usize) -> Vec2 {
        Vec2::new(self.start_x + index as f32 * self.cell_size, self.base_y)
    }

    /// World-space top-center of bar `index` at the given animated height;
    /// where the overlay label sits.
    pub fn top_center(&self, index: usize, height: f32) -> Vec3 {
        let base = self.base(index);
        Vec3::new(base.x, base.y, height)
    }
}

/// Angular span and height ramp of one pie slice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliceLayout {
    /// Start of the span as a fraction of a full turn.
    pub start: f32,
    /// End of the span as a fraction of a full turn.
    pub end: f32,
    /// Height with the reveal animation fully settled at 0.
    pub height_rest: f32,
    /// Extra height gained as the reveal animation reaches 1.
    pub height_ramp: f32,
}

impl SliceLayout {
    pub fn height_at(&self, reveal: f32) -> f32 {
        self.height_rest + self.height_ramp * reveal
    }

    /// Mid-span azimuth in radians; where the overlay label sits.
    pub fn mid_angle(&self) -> f32 {
        (self.start + self.end) * 0.5 * std::f32::consts::TAU
    }
}

/// Accumulate coerced series values into slice spans. Slices stack from the
/// fixed start offset; heights climb from the shortest slice to the tallest.
pub fn pie_slices(values: &[f32]) -> Vec<SliceLayout> {
    let increment =
        (PIE_SLICE_HEIGHT_MAX - PIE_SLICE_HEIGHT_MIN) / (values.len().saturating_sub(1)).max(1) as f32;
    let mut start = PIE_START_OFFSET;
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let end = start + value;
            let slice = SliceLayout {
                start,
                end,
                height_rest: PIE_SLICE_HEIGHT_MIN,
                height_ramp: index as f32 * increment,
            };
            start = end;
            slice
        })
        .collect()
}

/// Caret state of the carousel: which slot is targeted, which is displayed,
/// and the inclusive range of slots kept pre-rendered for the transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CarouselState {
    caret: i32,
    displayed: i32,
    position_min: i32,
    position_max: i32,
}

impl CarouselState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn caret(&self) -> i32 {
        self.caret
    }

    pub fn displayed(&self) -> i32 {
        self.displayed
    }

    /// Slots that currently need DOM nodes.
    pub fn positions(&self) -> RangeInclusive<i32> {
        self.position_min..=self.position_max
    }

    /// Begin moving by `delta` slots: widen the pre-rendered range first so
    /// the target item exists before the caret advances.
    pub fn start_intent(&mut self, delta: i32) {
        self.caret += delta;
        self.position_min = self.position_min.min(self.caret);
        self.position_max = self.position_max.max(self.caret);
    }

    /// Advance the displayed caret once the pre-rendered target exists
    /// (the tick after `start_intent`). Returns the new spring target in
    /// pixels.
    pub fn commit_display(&mut self) -> f32 {
        self.displayed = self.caret;
        self.target_x()
    }

    /// Called exactly once when the caret spring comes to rest: clobber all
    /// non-displayed items.
    pub fn settle(&mut self) {
        self.position_min = self.caret;
        self.position_max = self.caret;
        log::debug!("[carousel] settled at slot {}", self.caret);
    }

    pub fn target_x(&self) -> f32 {
        self.displayed as f32 * CAROUSEL_ITEM_SPACING
    }

    /// Pixel offset of the item at `position` for the current animated caret
    /// position.
    pub fn item_left(position: i32, caret_x: f32) -> f32 {
        position as f32 * CAROUSEL_ITEM_SPACING - caret_x
    }
}

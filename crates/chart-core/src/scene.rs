//! Per-entity draw description and overlay placement helpers.

use crate::color::Color;
use crate::constants::{
    BAR_EXTRA_RADIUS, CHART_AREA_HEIGHT, PIE_HOVER_SPACING, PIE_INNER_RADIUS, PIE_RADIUS,
};
use crate::layout::{BarLayout, SliceLayout};
use glam::Vec2;

/// Procedural surface pattern, selected per instance by an integer uniform in
/// the fragment stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternKind {
    Stripe,
    Checker,
    CounterStripe,
    Dot,
    /// No pattern; the fragment stage keeps the base color.
    Solid,
}

impl PatternKind {
    /// Cycle through the four patterned variants by entity index.
    pub fn for_index(index: usize) -> Self {
        match index % 4 {
            0 => Self::Stripe,
            1 => Self::Checker,
            2 => Self::CounterStripe,
            _ => Self::Dot,
        }
    }

    pub fn shader_index(self) -> i32 {
        match self {
            Self::Stripe => 0,
            Self::Checker => 1,
            Self::CounterStripe => 2,
            Self::Dot => 3,
            Self::Solid => -1,
        }
    }
}

/// Geometry-specific part of a draw instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawShape {
    /// Box bar standing at `base` in the chart plane with half-extent
    /// `radius`.
    Bar { base: Vec2, radius: f32 },
    /// Annular wedge from `start` to `end` (fractions of a full turn),
    /// `radius` to `radius + width` radially, with an angular `spacing` inset
    /// in turns.
    Wedge {
        radius: f32,
        width: f32,
        start: f32,
        end: f32,
        spacing: f32,
    },
}

/// Everything one draw call needs beyond the shared camera: uniforms for one
/// live entity, rebuilt every frame from the animated values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawInstance {
    pub shape: DrawShape,
    pub height: f32,
    pub pattern: PatternKind,
    pub highlight: f32,
}

/// Palette colors resolved to the uniform layout shared by all entities of a
/// scene, plus the clear color behind them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneColors {
    pub base: Color,
    pub secondary: Color,
    pub highlight: Color,
    pub clear: Color,
}

/// Build the per-bar draw list for one frame from a consistent snapshot of
/// animated values. `values` and `extra_radii` are the batch-stepped spring
/// outputs for this tick.
pub fn bar_instances(layout: &BarLayout, values: &[f32], extra_radii: &[f32]) -> Vec<DrawInstance> {
    values
        .iter()
        .zip(extra_radii)
        .enumerate()
        .map(|(index, (&value, &extra))| DrawInstance {
            shape: DrawShape::Bar {
                base: layout.base(index),
                radius: layout.radius + extra,
            },
            height: CHART_AREA_HEIGHT * value,
            pattern: PatternKind::for_index(index),
            highlight: extra / BAR_EXTRA_RADIUS,
        })
        .collect()
}

/// Build the per-slice draw list for one frame. `reveal` is the shared
/// reveal spring; `spacings` are the per-slice hover insets in turns.
pub fn wedge_instances(
    slices: &[SliceLayout],
    reveal: f32,
    spacings: &[f32],
) -> Vec<DrawInstance> {
    slices
        .iter()
        .zip(spacings)
        .map(|(slice, &spacing)| DrawInstance {
            shape: DrawShape::Wedge {
                radius: PIE_INNER_RADIUS,
                width: PIE_RADIUS - PIE_INNER_RADIUS,
                start: slice.start,
                end: slice.end,
                spacing,
            },
            height: slice.height_at(reveal),
            pattern: PatternKind::Solid,
            highlight: spacing / PIE_HOVER_SPACING,
        })
        .collect()
}

/// Map the raw highlight input to the blend factor used by the fragment
/// stage: 0 at or below 0.25, 1 at or above 0.75, linear between. Clipping
/// the bouncy edges of the spring range keeps the glow from popping.
pub fn highlight_mix(highlight: f32) -> f32 {
    ((highlight - 0.25) * 2.0).clamp(0.0, 1.0)
}

/// Transform for one overlay node inside the camera-mapped container: the
/// node's model transform, then a y-flip back into CSS text orientation.
pub fn node_transform(model_transform: &str) -> String {
    format!("{model_transform} scale(1, -1)")
}

/// Inline style for an absolutely positioned overlay node carrying a 3D
/// transform. `extra` is appended verbatim (font, color, layout).
pub fn overlay_style(transform: &str, extra: &str) -> String {
    format!(
        "position:absolute;top:0;left:0;transform-style:preserve-3d;\
         transform-origin:0 0;transform:{transform};{extra}"
    )
}

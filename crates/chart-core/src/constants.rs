use crate::spring::SpringConfig;

// Shared chart tuning constants used by the layout math and the web frontend.

// Bar chart 3D layout
pub const CHART_AREA_WIDTH: f32 = 500.0;
pub const CHART_AREA_HEIGHT: f32 = 300.0;
pub const BAR_SPACING: f32 = 10.0; // gap between neighboring bar cells
pub const BAR_EXTRA_RADIUS: f32 = BAR_SPACING * 0.3; // hover growth in world units
pub const PATTERN_SIZE: f32 = 50.0; // world-space period of the surface patterns

// Pie chart 3D layout
pub const PIE_RADIUS: f32 = 250.0;
pub const PIE_INNER_RADIUS: f32 = 100.0;
pub const PIE_SLICE_HEIGHT_MIN: f32 = 10.0;
pub const PIE_SLICE_HEIGHT_MAX: f32 = 90.0;
pub const PIE_START_OFFSET: f32 = -0.2; // fraction of a full turn
pub const PIE_HOVER_SPACING: f32 = 0.004; // angular inset of a hovered slice, in turns

// Camera orbit (fixed for all charts)
pub const CAMERA_FOV: f32 = 0.5; // radians
pub const CAMERA_PITCH: f32 = -1.0; // radians, tilts the chart toward the viewer
pub const CAMERA_YAW: f32 = std::f32::consts::FRAC_PI_6;
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR_FACTOR: f32 = 2.5; // far plane as a multiple of orbit distance
pub const BAR_CAMERA_DISTANCE: f32 = CHART_AREA_HEIGHT * 4.0;
pub const BAR_CAMERA_LIFT: f32 = CHART_AREA_HEIGHT / 2.0; // orbit center sits mid-bar
pub const PIE_CAMERA_DISTANCE: f32 = PIE_RADIUS * 4.8;
pub const PIE_CAMERA_LIFT: f32 = 80.0;

// Wedge tessellation: 64 segments for an entire circle keeps the angular step
// small regardless of how many slices share the turn.
pub const WEDGE_SEGMENTS_PER_TURN: f32 = 64.0;

// Carousel layout
pub const CAROUSEL_ITEM_WIDTH: f32 = 800.0;
pub const CAROUSEL_ITEM_SPACING: f32 = CAROUSEL_ITEM_WIDTH + 20.0;

// Spring presets (stiffness, damping per second)
pub const SPRING_BAR_VALUE: SpringConfig = SpringConfig::new(320.0, 12.0);
pub const SPRING_BAR_RADIUS: SpringConfig = SpringConfig::new(600.0, 18.0);
pub const SPRING_PIE_REVEAL: SpringConfig = SpringConfig::new(320.0, 15.0);
pub const SPRING_PIE_SPACING: SpringConfig = SpringConfig::new(600.0, 18.0);
pub const SPRING_CAROUSEL_CARET: SpringConfig = SpringConfig::new(600.0, 25.0);

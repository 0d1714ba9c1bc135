use thiserror::Error;

/// Construction-time configuration failures.
///
/// Out-of-range data values are the one deliberate leniency and are clamped
/// instead (see [`crate::series::coerce_value`]); everything here is a caller
/// bug and is rejected before any rendering state exists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("series must contain at least one value")]
    EmptyValues,

    #[error("viewport dimensions must be positive, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("degenerate camera parameter `{name}` = {value}")]
    DegenerateCamera { name: &'static str, value: f32 },

    #[error("invalid hex color {0:?}")]
    InvalidColor(String),
}

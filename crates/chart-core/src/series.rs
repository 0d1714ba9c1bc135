//! Data value coercion.
//!
//! Chart data is an array of fractions in [0, 1]. Individual out-of-range or
//! non-numeric samples are coerced rather than rejected; an empty series is a
//! configuration error.

use crate::error::ConfigError;

/// Clamp one sample to [0, 1]; NaN and infinities map to 0.
pub fn coerce_value(value: f64) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 1.0) as f32
}

/// Copy and coerce a whole series. The result replaces any previous series
/// wholesale; it is never mutated in place.
pub fn coerce_values(input: &[f64]) -> Result<Vec<f32>, ConfigError> {
    if input.is_empty() {
        return Err(ConfigError::EmptyValues);
    }
    Ok(input.iter().copied().map(coerce_value).collect())
}

// Host-side tests for data value coercion.

use chart_core::{coerce_value, coerce_values, ConfigError};

#[test]
fn in_range_values_pass_through() {
    assert_eq!(coerce_value(0.0), 0.0);
    assert_eq!(coerce_value(0.5), 0.5);
    assert_eq!(coerce_value(1.0), 1.0);
}

#[test]
fn out_of_range_values_clamp() {
    assert_eq!(coerce_value(-0.25), 0.0);
    assert_eq!(coerce_value(1.75), 1.0);
    assert_eq!(coerce_value(1e12), 1.0);
}

#[test]
fn non_numeric_values_map_to_zero() {
    assert_eq!(coerce_value(f64::NAN), 0.0);
    assert_eq!(coerce_value(f64::INFINITY), 0.0);
    assert_eq!(coerce_value(f64::NEG_INFINITY), 0.0);
}

#[test]
fn series_is_copied_and_coerced_wholesale() {
    let input = [0.2, f64::NAN, -3.0, 0.8, 2.0];
    let coerced = coerce_values(&input).expect("non-empty series");
    assert_eq!(coerced, vec![0.2, 0.0, 0.0, 0.8, 1.0]);
}

#[test]
fn empty_series_is_a_configuration_error() {
    assert_eq!(coerce_values(&[]).unwrap_err(), ConfigError::EmptyValues);
}

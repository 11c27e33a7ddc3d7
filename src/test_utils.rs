#![cfg(test)]

use crate::tabulated::TabulatedFunction;

// Helper function to assert floating point equality with tolerance
pub fn assert_float_eq(a: f64, b: f64, tolerance: f64) {
    assert!(
        (a - b).abs() < tolerance,
        "Expected {} to be approximately equal to {} (tolerance: {})",
        a,
        b,
        tolerance
    );
}

/// Asserts that the x-values of `function` are strictly ascending.
pub fn assert_ascending(function: &dyn TabulatedFunction) {
    let xs: Vec<f64> = function.points().map(|p| p.x).collect();
    assert!(
        xs.windows(2).all(|w| w[0] < w[1]),
        "x-values are not strictly ascending: {:?}",
        xs
    );
}

#![allow(dead_code)]

use tabfn::{BackendKind, TabulatedFunction};

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

/// Routes `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// `{(1, 10), (2, 20), (3, 30)}` in the given backend.
pub fn create_linear(kind: BackendKind) -> Box<dyn TabulatedFunction> {
    kind.factory()
        .create(vec![1.0, 2.0, 3.0], vec![10.0, 20.0, 30.0])
        .expect("valid samples")
}

pub fn xs(function: &dyn TabulatedFunction) -> Vec<f64> {
    function.points().map(|p| p.x).collect()
}

pub fn ys(function: &dyn TabulatedFunction) -> Vec<f64> {
    function.points().map(|p| p.y).collect()
}

pub const BACKENDS: [BackendKind; 2] = [BackendKind::Array, BackendKind::LinkedList];

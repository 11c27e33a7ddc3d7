//! Error types for tabulated function construction, access and arithmetic.

use thiserror::Error;

/// Errors raised by tabulated functions and the operators built on them.
///
/// Every error is raised synchronously by the call that violates the contract;
/// nothing in the engine retries internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TabulatedError {
    /// Malformed construction input (too few samples, bad bounds, bad settings).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The x and y coordinate arrays differ in length.
    #[error("Coordinate arrays differ in length: {x_len} x-values, {y_len} y-values")]
    DifferentLengths { x_len: usize, y_len: usize },

    /// The x coordinates are not strictly ascending.
    #[error("x-values are not strictly ascending at index {index}")]
    NotSorted { index: usize },

    /// Positional access outside `[0, count)`.
    #[error("Index {index} out of range for function with {count} samples")]
    IndexOutOfRange { index: usize, count: usize },

    /// A mutation that would break a backend invariant.
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// An operation rejected by a decorator policy.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Interpolation requested outside the segment it was anchored on.
    #[error("Cannot interpolate at x = {x}: outside segment [{left}, {right}]")]
    Interpolation { x: f64, left: f64, right: f64 },

    /// Extrapolation requested on a function without two anchor samples.
    #[error("Cannot extrapolate at x = {x}: {reason}")]
    Extrapolation { x: f64, reason: String },

    /// Pointwise combination of functions with different x-grids.
    #[error("Inconsistent functions: {0}")]
    InconsistentFunctions(String),

    /// Division by an exact zero or a similar arithmetic failure.
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),

    /// An operator applied outside the domain it is defined on.
    #[error("Domain error: {0}")]
    Domain(String),
}

impl TabulatedError {
    pub(crate) fn unsupported(operation: &str, policy: &str) -> Self {
        TabulatedError::UnsupportedOperation(format!("{} is not allowed: function is {}", operation, policy))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TabulatedError>;

use crate::error::Result;

use super::MathFunction;

/// `x -> x`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IdentityFunction;

impl MathFunction for IdentityFunction {
    fn apply(&self, x: f64) -> Result<f64> {
        Ok(x)
    }
}

/// `x -> x * x`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SqrFunction;

impl MathFunction for SqrFunction {
    fn apply(&self, x: f64) -> Result<f64> {
        Ok(x * x)
    }
}

/// A function returning the same value for every argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantFunction {
    value: f64,
}

impl ConstantFunction {
    pub fn new(value: f64) -> Self {
        ConstantFunction { value }
    }

    /// The constant `0.0`.
    pub fn zero() -> Self {
        ConstantFunction::new(0.0)
    }

    /// The constant `1.0`.
    pub fn unit() -> Self {
        ConstantFunction::new(1.0)
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl MathFunction for ConstantFunction {
    fn apply(&self, _x: f64) -> Result<f64> {
        Ok(self.value)
    }
}

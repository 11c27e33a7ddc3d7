use crate::{
    error::{Result, TabulatedError},
    function::MathFunction,
};

use super::DifferenceScheme;

/// Numerical derivative of an arbitrary function with a fixed step.
///
/// ```rust
/// use tabfn::{DifferenceScheme, MathFunction, SqrFunction, SteppingDifferentialOperator};
///
/// let op = SteppingDifferentialOperator::new(1e-3, DifferenceScheme::Middle).unwrap();
/// let d = op.derive(SqrFunction);
/// assert!((d.apply(3.0).unwrap() - 6.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteppingDifferentialOperator {
    step: f64,
    scheme: DifferenceScheme,
}

impl SteppingDifferentialOperator {
    pub fn new(step: f64, scheme: DifferenceScheme) -> Result<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(TabulatedError::InvalidArgument(format!(
                "step must be positive and finite, got {}",
                step
            )));
        }
        Ok(SteppingDifferentialOperator { step, scheme })
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn scheme(&self) -> DifferenceScheme {
        self.scheme
    }

    pub fn derive<F: MathFunction>(&self, function: F) -> SteppingDerivative<F> {
        SteppingDerivative {
            function,
            step: self.step,
            scheme: self.scheme,
        }
    }
}

/// The derivative produced by [`SteppingDifferentialOperator::derive`].
#[derive(Debug, Clone)]
pub struct SteppingDerivative<F> {
    function: F,
    step: f64,
    scheme: DifferenceScheme,
}

impl<F: MathFunction> MathFunction for SteppingDerivative<F> {
    fn apply(&self, x: f64) -> Result<f64> {
        let h = self.step;
        let f = &self.function;
        match self.scheme {
            DifferenceScheme::Left => Ok((f.apply(x)? - f.apply(x - h)?) / h),
            DifferenceScheme::Right => Ok((f.apply(x + h)? - f.apply(x)?) / h),
            DifferenceScheme::Middle => Ok((f.apply(x + h)? - f.apply(x - h)?) / (2.0 * h)),
        }
    }
}

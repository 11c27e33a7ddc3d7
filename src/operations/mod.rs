//! # Operators over tabulated functions
//!
//! - [`TabulatedFunctionOperationService`]: pointwise arithmetic of two
//!   functions sharing an x-grid
//! - [`TabulatedDifferentialOperator`]: finite-difference derivatives of
//!   tabulated functions
//! - [`SteppingDifferentialOperator`]: finite-difference derivatives of any
//!   [`MathFunction`](crate::MathFunction)

pub mod differential;
pub mod stepping;

pub use differential::{DifferenceScheme, TabulatedDifferentialOperator};
pub use stepping::{SteppingDerivative, SteppingDifferentialOperator};

use itertools::Itertools;
use log::debug;

use crate::{
    error::{Result, TabulatedError},
    tabulated::{ArrayTabulatedFunctionFactory, Point, TabulatedFunction, TabulatedFunctionFactory},
};

/// Largest difference between x-values still treated as the same grid point.
pub const CONSISTENCY_TOLERANCE: f64 = 1e-9;

/// Pointwise arithmetic on two tabulated functions.
///
/// Both operands must have the same number of samples and x-values equal
/// within [`CONSISTENCY_TOLERANCE`] at every index. Results take the
/// left operand's x-values and are built by the service's factory.
///
/// ```rust
/// use tabfn::{ArrayTabulatedFunction, MathFunction, TabulatedFunctionOperationService};
///
/// let f = ArrayTabulatedFunction::new(vec![0.0, 1.0], vec![1.0, 2.0]).unwrap();
/// let g = ArrayTabulatedFunction::new(vec![0.0, 1.0], vec![3.0, 4.0]).unwrap();
///
/// let sum = TabulatedFunctionOperationService::default().add(&f, &g).unwrap();
/// assert_eq!(sum.apply(1.0).unwrap(), 6.0);
/// ```
#[derive(Debug)]
pub struct TabulatedFunctionOperationService {
    factory: Box<dyn TabulatedFunctionFactory>,
}

impl Default for TabulatedFunctionOperationService {
    fn default() -> Self {
        TabulatedFunctionOperationService::new(Box::new(ArrayTabulatedFunctionFactory))
    }
}

impl TabulatedFunctionOperationService {
    pub fn new(factory: Box<dyn TabulatedFunctionFactory>) -> Self {
        TabulatedFunctionOperationService { factory }
    }

    pub fn factory(&self) -> &dyn TabulatedFunctionFactory {
        self.factory.as_ref()
    }

    pub fn set_factory(&mut self, factory: Box<dyn TabulatedFunctionFactory>) {
        self.factory = factory;
    }

    /// Copies the samples of `function` in ascending x order.
    pub fn as_points(function: &dyn TabulatedFunction) -> Vec<Point> {
        function.to_points()
    }

    pub fn add(&self, a: &dyn TabulatedFunction, b: &dyn TabulatedFunction) -> Result<Box<dyn TabulatedFunction>> {
        self.combine(a, b, |_, ya, yb| Ok(ya + yb))
    }

    pub fn subtract(
        &self,
        a: &dyn TabulatedFunction,
        b: &dyn TabulatedFunction,
    ) -> Result<Box<dyn TabulatedFunction>> {
        self.combine(a, b, |_, ya, yb| Ok(ya - yb))
    }

    pub fn multiply(
        &self,
        a: &dyn TabulatedFunction,
        b: &dyn TabulatedFunction,
    ) -> Result<Box<dyn TabulatedFunction>> {
        self.combine(a, b, |_, ya, yb| Ok(ya * yb))
    }

    /// Divides `a` by `b`; any exactly zero sample of `b` is an error.
    pub fn divide(&self, a: &dyn TabulatedFunction, b: &dyn TabulatedFunction) -> Result<Box<dyn TabulatedFunction>> {
        self.combine(a, b, |x, ya, yb| {
            if yb == 0.0 {
                Err(TabulatedError::Arithmetic(format!("division by zero sample at x = {}", x)))
            } else {
                Ok(ya / yb)
            }
        })
    }

    fn combine<F>(
        &self,
        a: &dyn TabulatedFunction,
        b: &dyn TabulatedFunction,
        operation: F,
    ) -> Result<Box<dyn TabulatedFunction>>
    where
        F: Fn(f64, f64, f64) -> Result<f64>,
    {
        check_consistent(a, b)?;

        let (x_values, y_values): (Vec<f64>, Vec<f64>) = a
            .points()
            .zip_eq(b.points())
            .map(|(pa, pb)| operation(pa.x, pa.y, pb.y).map(|y| (pa.x, y)))
            .process_results(|pairs| pairs.unzip())?;

        debug!(
            "Combined two functions of {} samples into a {} function",
            x_values.len(),
            self.factory.kind()
        );
        self.factory.create(x_values, y_values)
    }
}

/// Checks that `a` and `b` share a sample count and an x-grid.
pub fn check_consistent(a: &dyn TabulatedFunction, b: &dyn TabulatedFunction) -> Result<()> {
    if a.count() != b.count() {
        return Err(TabulatedError::InconsistentFunctions(format!(
            "sample counts differ: {} and {}",
            a.count(),
            b.count()
        )));
    }
    match a
        .points()
        .zip(b.points())
        .find_position(|(pa, pb)| (pa.x - pb.x).abs() > CONSISTENCY_TOLERANCE)
    {
        Some((index, (pa, pb))) => Err(TabulatedError::InconsistentFunctions(format!(
            "x-values differ at index {}: {} and {}",
            index, pa.x, pb.x
        ))),
        None => Ok(()),
    }
}

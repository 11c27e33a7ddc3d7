use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TabulatedError},
    tabulated::{Point, TabulatedFunction},
};

/// Finite-difference stencil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceScheme {
    /// Backward difference, placed at the right end of each gap.
    Left,
    /// Forward difference, placed at the left end of each gap.
    Right,
    /// Secant slope of each gap, placed at its midpoint.
    #[default]
    Middle,
}

impl DifferenceScheme {
    /// The x-value a gap `[x0, x1]` contributes to the derivative grid.
    fn anchor(self, x0: f64, x1: f64) -> f64 {
        match self {
            DifferenceScheme::Left => x1,
            DifferenceScheme::Right => x0,
            DifferenceScheme::Middle => x0 + (x1 - x0) / 2.0,
        }
    }
}

/// Differentiates tabulated functions by finite differences.
///
/// Each pass turns `n` samples into `n - 1`, one per gap, and builds the
/// result with the factory of the source's backend kind. Decorators on the
/// source are not carried over.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabulatedDifferentialOperator {
    scheme: DifferenceScheme,
}

impl TabulatedDifferentialOperator {
    pub fn new(scheme: DifferenceScheme) -> Self {
        TabulatedDifferentialOperator { scheme }
    }

    pub fn scheme(&self) -> DifferenceScheme {
        self.scheme
    }

    /// First derivative of `function`.
    ///
    /// The result must itself be a valid function, so at least 3 samples are
    /// required; fewer is a `Domain` error.
    pub fn derive(&self, function: &dyn TabulatedFunction) -> Result<Box<dyn TabulatedFunction>> {
        let count = function.count();
        if count < 3 {
            return Err(TabulatedError::Domain(format!(
                "differentiation needs at least 3 samples, got {}",
                count
            )));
        }

        let (x_values, y_values): (Vec<f64>, Vec<f64>) = function
            .points()
            .tuple_windows()
            .map(|(p0, p1): (Point, Point)| {
                let slope = (p1.y - p0.y) / (p1.x - p0.x);
                (self.scheme.anchor(p0.x, p1.x), slope)
            })
            .unzip();

        debug!(
            "Differentiated {} samples with the {:?} scheme",
            count, self.scheme
        );
        function.kind().factory().create(x_values, y_values)
    }

    /// Derivative of the given order, applying [`derive`](Self::derive) repeatedly.
    ///
    /// Order 0 returns an undecorated copy of `function`.
    pub fn derive_n(&self, function: &dyn TabulatedFunction, order: usize) -> Result<Box<dyn TabulatedFunction>> {
        let count = function.count();
        if count < order + 2 {
            return Err(TabulatedError::Domain(format!(
                "a derivative of order {} needs at least {} samples, got {}",
                order,
                order + 2,
                count
            )));
        }

        let (x_values, y_values) = function.points().map(|p| (p.x, p.y)).unzip();
        let mut current = function.kind().factory().create(x_values, y_values)?;
        for _ in 0..order {
            current = self.derive(current.as_ref())?;
        }
        Ok(current)
    }
}

use crate::{
    error::{Result, TabulatedError},
    function::MathFunction,
    tabulated::{BackendKind, Point, Policy, TabulatedFunction},
};

/// Restricts evaluation to the exact sample x-values.
///
/// Any evaluation that would interpolate or extrapolate fails with
/// `UnsupportedOperation`. Reads and mutations pass through unchanged.
#[derive(Debug)]
pub struct StrictTabulatedFunction {
    inner: Box<dyn TabulatedFunction>,
}

impl StrictTabulatedFunction {
    pub fn new(inner: Box<dyn TabulatedFunction>) -> Self {
        StrictTabulatedFunction { inner }
    }

    /// Wraps `inner` unless its chain is already strict.
    pub fn wrap(inner: Box<dyn TabulatedFunction>) -> Box<dyn TabulatedFunction> {
        if inner.has_policy(Policy::Strict) {
            inner
        } else {
            Box::new(StrictTabulatedFunction::new(inner))
        }
    }

    pub fn inner(&self) -> &dyn TabulatedFunction {
        self.inner.as_ref()
    }

    pub fn into_inner(self) -> Box<dyn TabulatedFunction> {
        self.inner
    }
}

fn rejected(operation: &str) -> TabulatedError {
    TabulatedError::unsupported(operation, Policy::Strict.name())
}

impl MathFunction for StrictTabulatedFunction {
    fn apply(&self, x: f64) -> Result<f64> {
        match self.inner.index_of_x(x) {
            Some(index) => self.inner.y(index),
            None => Err(rejected("evaluation between or outside samples")),
        }
    }
}

impl TabulatedFunction for StrictTabulatedFunction {
    fn count(&self) -> usize {
        self.inner.count()
    }

    fn x(&self, index: usize) -> Result<f64> {
        self.inner.x(index)
    }

    fn y(&self, index: usize) -> Result<f64> {
        self.inner.y(index)
    }

    fn set_y(&mut self, index: usize, value: f64) -> Result<()> {
        self.inner.set_y(index, value)
    }

    fn index_of_x(&self, x: f64) -> Option<usize> {
        self.inner.index_of_x(x)
    }

    fn index_of_y(&self, y: f64) -> Option<usize> {
        self.inner.index_of_y(y)
    }

    fn left_bound(&self) -> f64 {
        self.inner.left_bound()
    }

    fn right_bound(&self) -> f64 {
        self.inner.right_bound()
    }

    fn insert(&mut self, x: f64, y: f64) -> Result<()> {
        self.inner.insert(x, y)
    }

    fn remove(&mut self, index: usize) -> Result<()> {
        self.inner.remove(index)
    }

    fn points(&self) -> Box<dyn Iterator<Item = Point> + '_> {
        self.inner.points()
    }

    fn kind(&self) -> BackendKind {
        self.inner.kind()
    }

    fn policies(&self) -> Vec<Policy> {
        let mut policies = vec![Policy::Strict];
        policies.extend(self.inner.policies());
        policies
    }

    fn floor_index_of_x(&self, x: f64) -> Result<usize> {
        self.inner.floor_index_of_x(x)
    }

    fn interpolate(&self, _x: f64, _floor_index: usize) -> Result<f64> {
        Err(rejected("interpolation"))
    }

    fn extrapolate_left(&self, _x: f64) -> Result<f64> {
        Err(rejected("extrapolation"))
    }

    fn extrapolate_right(&self, _x: f64) -> Result<f64> {
        Err(rejected("extrapolation"))
    }
}

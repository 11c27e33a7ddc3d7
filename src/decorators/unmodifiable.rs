use crate::{
    error::{Result, TabulatedError},
    function::MathFunction,
    tabulated::{BackendKind, Point, Policy, TabulatedFunction},
};

/// Rejects every mutation of the wrapped function.
///
/// `set_y`, `insert` and `remove` fail with `UnsupportedOperation`. Reads,
/// including interpolating and extrapolating evaluation, pass through. The
/// iterator returned by `points` is read-only, so there is no removal path
/// through iteration either.
#[derive(Debug)]
pub struct UnmodifiableTabulatedFunction {
    inner: Box<dyn TabulatedFunction>,
}

impl UnmodifiableTabulatedFunction {
    pub fn new(inner: Box<dyn TabulatedFunction>) -> Self {
        UnmodifiableTabulatedFunction { inner }
    }

    /// Wraps `inner` unless its chain is already unmodifiable.
    pub fn wrap(inner: Box<dyn TabulatedFunction>) -> Box<dyn TabulatedFunction> {
        if inner.has_policy(Policy::Unmodifiable) {
            inner
        } else {
            Box::new(UnmodifiableTabulatedFunction::new(inner))
        }
    }

    pub fn inner(&self) -> &dyn TabulatedFunction {
        self.inner.as_ref()
    }
}

fn rejected(operation: &str) -> TabulatedError {
    TabulatedError::unsupported(operation, Policy::Unmodifiable.name())
}

impl MathFunction for UnmodifiableTabulatedFunction {
    fn apply(&self, x: f64) -> Result<f64> {
        self.inner.apply(x)
    }
}

impl TabulatedFunction for UnmodifiableTabulatedFunction {
    fn count(&self) -> usize {
        self.inner.count()
    }

    fn x(&self, index: usize) -> Result<f64> {
        self.inner.x(index)
    }

    fn y(&self, index: usize) -> Result<f64> {
        self.inner.y(index)
    }

    fn set_y(&mut self, _index: usize, _value: f64) -> Result<()> {
        Err(rejected("set_y"))
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

    fn insert(&mut self, _x: f64, _y: f64) -> Result<()> {
        Err(rejected("insert"))
    }

    fn remove(&mut self, _index: usize) -> Result<()> {
        Err(rejected("remove"))
    }

    fn points(&self) -> Box<dyn Iterator<Item = Point> + '_> {
        self.inner.points()
    }

    fn kind(&self) -> BackendKind {
        self.inner.kind()
    }

    fn policies(&self) -> Vec<Policy> {
        let mut policies = vec![Policy::Unmodifiable];
        policies.extend(self.inner.policies());
        policies
    }

    fn floor_index_of_x(&self, x: f64) -> Result<usize> {
        self.inner.floor_index_of_x(x)
    }

    fn interpolate(&self, x: f64, floor_index: usize) -> Result<f64> {
        self.inner.interpolate(x, floor_index)
    }

    fn extrapolate_left(&self, x: f64) -> Result<f64> {
        self.inner.extrapolate_left(x)
    }

    fn extrapolate_right(&self, x: f64) -> Result<f64> {
        self.inner.extrapolate_right(x)
    }
}

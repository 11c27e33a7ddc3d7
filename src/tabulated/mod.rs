//! # Tabulated Functions
//!
//! A tabulated function is an ordered set of `(x, y)` samples with unique,
//! strictly ascending x-values. Values between samples are found by linear
//! interpolation and values outside the sampled range by linear
//! extrapolation from the two nearest boundary samples.
//!
//! ## Quick Start
//!
//! ```rust
//! use tabfn::{ArrayTabulatedFunction, MathFunction, TabulatedFunction};
//!
//! let mut f = ArrayTabulatedFunction::new(vec![1.0, 2.0, 3.0], vec![10.0, 20.0, 30.0]).unwrap();
//!
//! assert_eq!(f.apply(1.5).unwrap(), 15.0); // interpolation
//! assert_eq!(f.apply(0.5).unwrap(), 5.0); // left extrapolation
//! assert_eq!(f.apply(4.0).unwrap(), 40.0); // right extrapolation
//!
//! f.insert(1.5, 15.0).unwrap();
//! assert_eq!(f.count(), 4);
//! ```
//!
//! ## Backends
//!
//! - [`ArrayTabulatedFunction`]: parallel growable vectors, binary search
//! - [`LinkedListTabulatedFunction`]: circular doubly-linked ring of nodes
//!
//! Both implement [`TabulatedFunction`] and share the approximation
//! algorithm in [`approximation`].

pub mod approximation;
pub mod array;
pub mod factory;
pub mod linked_list;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TabulatedError},
    function::MathFunction,
};

pub use array::ArrayTabulatedFunction;
pub use factory::{
    ArrayTabulatedFunctionFactory, LinkedListTabulatedFunctionFactory, TabulatedFunctionFactory,
};
pub use linked_list::LinkedListTabulatedFunction;

/// One `(x, y)` sample of a tabulated function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The storage representation behind a tabulated function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Array,
    LinkedList,
}

impl BackendKind {
    /// Returns the factory producing functions of this kind.
    pub fn factory(self) -> Box<dyn TabulatedFunctionFactory> {
        match self {
            BackendKind::Array => Box::new(ArrayTabulatedFunctionFactory),
            BackendKind::LinkedList => Box::new(LinkedListTabulatedFunctionFactory),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BackendKind::Array => "array",
            BackendKind::LinkedList => "linked_list",
        }
    }

    /// Inverse of [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        [BackendKind::Array, BackendKind::LinkedList]
            .into_iter()
            .find(|kind| kind.name() == name)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A behavioural guarantee added by a decorator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Only exact samples may be evaluated.
    Strict,
    /// No mutation is allowed.
    Unmodifiable,
}

impl Policy {
    pub fn name(self) -> &'static str {
        match self {
            Policy::Strict => "strict",
            Policy::Unmodifiable => "unmodifiable",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [Policy::Strict, Policy::Unmodifiable]
            .into_iter()
            .find(|policy| policy.name() == name)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The contract shared by every backend and decorator.
///
/// A tabulated function always holds at least one sample. Construction
/// requires two, and removal refuses to drop the last one. Decoders restore
/// stored functions through `restore`, which also accepts a single sample.
///
/// The approximation methods have default implementations in terms of the
/// indexed accessors; backends override them only for speed, decorators to
/// enforce their policy.
pub trait TabulatedFunction: MathFunction + fmt::Debug {
    /// Number of samples.
    fn count(&self) -> usize;

    /// The x-value at `index`.
    fn x(&self, index: usize) -> Result<f64>;

    /// The y-value at `index`.
    fn y(&self, index: usize) -> Result<f64>;

    /// Replaces the y-value at `index`; ordering is unaffected.
    fn set_y(&mut self, index: usize, value: f64) -> Result<()>;

    /// Index of the sample whose x equals `x` exactly.
    fn index_of_x(&self, x: f64) -> Option<usize>;

    /// Index of the first sample whose y equals `y` exactly.
    fn index_of_y(&self, y: f64) -> Option<usize>;

    /// Smallest x-value.
    fn left_bound(&self) -> f64;

    /// Largest x-value.
    fn right_bound(&self) -> f64;

    /// Inserts a sample, overwriting `y` when `x` is already present.
    fn insert(&mut self, x: f64, y: f64) -> Result<()>;

    /// Removes the sample at `index`.
    fn remove(&mut self, index: usize) -> Result<()>;

    /// Iterates over the samples in ascending x order.
    fn points(&self) -> Box<dyn Iterator<Item = Point> + '_>;

    /// The storage kind at the bottom of any decorator chain.
    fn kind(&self) -> BackendKind;

    /// Decorator policies applied to this function, outermost first.
    fn policies(&self) -> Vec<Policy> {
        Vec::new()
    }

    /// Returns `true` if `policy` is enforced anywhere in the chain.
    fn has_policy(&self, policy: Policy) -> bool {
        self.policies().contains(&policy)
    }

    /// Index `i` of the segment `[x(i), x(i + 1))` containing `x`.
    fn floor_index_of_x(&self, x: f64) -> Result<usize> {
        approximation::floor_index_of_x(self, x)
    }

    /// Linear interpolation on the segment starting at `floor_index`.
    fn interpolate(&self, x: f64, floor_index: usize) -> Result<f64> {
        approximation::interpolate(self, x, floor_index)
    }

    /// Linear extrapolation from the two leftmost samples.
    fn extrapolate_left(&self, x: f64) -> Result<f64> {
        approximation::extrapolate_left(self, x)
    }

    /// Linear extrapolation from the two rightmost samples.
    fn extrapolate_right(&self, x: f64) -> Result<f64> {
        approximation::extrapolate_right(self, x)
    }

    /// Copies the samples into a vector.
    fn to_points(&self) -> Vec<Point> {
        self.points().collect()
    }
}

/// Lets boxed functions from factories and operators take part in composition.
impl MathFunction for Box<dyn TabulatedFunction> {
    fn apply(&self, x: f64) -> Result<f64> {
        (**self).apply(x)
    }
}

/// Fewest samples a new function may be built from.
pub(crate) const MIN_CREATE_COUNT: usize = 2;

/// Fewest samples a stored function may be restored from.
pub(crate) const MIN_RESTORE_COUNT: usize = 1;

/// Most points a function may be sampled at.
pub const MAX_SAMPLE_COUNT: usize = 1 << 24;

/// Validates raw coordinate arrays holding at least `min_count` samples.
pub(crate) fn check_coordinates(x_values: &[f64], y_values: &[f64], min_count: usize) -> Result<()> {
    if x_values.len() != y_values.len() {
        return Err(TabulatedError::DifferentLengths {
            x_len: x_values.len(),
            y_len: y_values.len(),
        });
    }
    if x_values.len() < min_count {
        return Err(TabulatedError::InvalidArgument(format!(
            "a tabulated function needs at least {} samples, got {}",
            min_count,
            x_values.len()
        )));
    }
    check_sorted(x_values)
}

/// Checks that `x_values` is strictly ascending.
pub(crate) fn check_sorted(x_values: &[f64]) -> Result<()> {
    match x_values.windows(2).position(|w| !(w[0] < w[1])) {
        Some(i) => Err(TabulatedError::NotSorted { index: i + 1 }),
        None => Ok(()),
    }
}

/// Samples `source` at `count` evenly spaced points over `[from, to]`.
///
/// The bounds may be given in either order.
pub(crate) fn sample<S>(source: &S, from: f64, to: f64, count: usize) -> Result<(Vec<f64>, Vec<f64>)>
where
    S: MathFunction + ?Sized,
{
    if count < 2 {
        return Err(TabulatedError::InvalidArgument(format!(
            "sampling needs at least 2 points, got {}",
            count
        )));
    }
    if count > MAX_SAMPLE_COUNT {
        return Err(TabulatedError::InvalidArgument(format!(
            "sampling is limited to {} points, got {}",
            MAX_SAMPLE_COUNT, count
        )));
    }
    if !from.is_finite() || !to.is_finite() || from == to {
        return Err(TabulatedError::InvalidArgument(format!(
            "sampling interval [{}, {}] must be finite and non-empty",
            from, to
        )));
    }
    let (from, to) = if from > to { (to, from) } else { (from, to) };

    let step = (to - from) / (count - 1) as f64;
    let mut x_values = Vec::with_capacity(count);
    let mut y_values = Vec::with_capacity(count);
    for i in 0..count {
        let x = if i == count - 1 { to } else { from + i as f64 * step };
        x_values.push(x);
        y_values.push(source.apply(x)?);
    }
    check_sorted(&x_values)?;
    Ok((x_values, y_values))
}

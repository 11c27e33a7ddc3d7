//! # Single-argument functions
//!
//! [`MathFunction`] is the evaluation contract shared by plain formulas,
//! closures, tabulated functions and derived functions. Anything that maps
//! one `f64` to another can take part in composition, differentiation and
//! root-finding.
//!
//! ```rust
//! use tabfn::{MathFunction, SqrFunction};
//!
//! let shifted = SqrFunction.and_then(|y: f64| y + 1.0);
//! assert_eq!(shifted.apply(3.0).unwrap(), 10.0);
//! ```
//!
//! Evaluation is fallible because some functions refuse certain inputs; a
//! strict tabulated function, for example, rejects any argument that is not
//! one of its samples.

pub mod formulas;

pub use formulas::{ConstantFunction, IdentityFunction, SqrFunction};

use crate::error::Result;

/// A pure function of one real argument.
pub trait MathFunction {
    /// Evaluates the function at `x`.
    fn apply(&self, x: f64) -> Result<f64>;

    /// Returns the composition `x -> after(self(x))`.
    ///
    /// Chains compose left to right: `f.and_then(g).and_then(h)` evaluates
    /// `f` first and `h` last.
    fn and_then<G>(self, after: G) -> CompositeFunction<Self, G>
    where
        Self: Sized,
        G: MathFunction,
    {
        CompositeFunction::new(self, after)
    }
}

impl<F> MathFunction for F
where
    F: Fn(f64) -> f64,
{
    fn apply(&self, x: f64) -> Result<f64> {
        Ok(self(x))
    }
}

/// Two functions applied one after the other.
#[derive(Debug, Clone)]
pub struct CompositeFunction<F, G> {
    first: F,
    second: G,
}

impl<F, G> CompositeFunction<F, G>
where
    F: MathFunction,
    G: MathFunction,
{
    pub fn new(first: F, second: G) -> Self {
        CompositeFunction { first, second }
    }

    pub fn first(&self) -> &F {
        &self.first
    }

    pub fn second(&self) -> &G {
        &self.second
    }
}

impl<F, G> MathFunction for CompositeFunction<F, G>
where
    F: MathFunction,
    G: MathFunction,
{
    fn apply(&self, x: f64) -> Result<f64> {
        let inner = self.first.apply(x)?;
        self.second.apply(inner)
    }
}

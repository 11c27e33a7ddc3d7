//! Factories producing tabulated functions of a chosen backend.
//!
//! Operators that build new functions (the operation service, the
//! differential operator, the codec readers) take a factory instead of
//! naming a concrete backend, so callers decide the storage kind.

use std::fmt;

use super::{
    ArrayTabulatedFunction, BackendKind, LinkedListTabulatedFunction, TabulatedFunction, sample,
};
use crate::{
    decorators::{StrictTabulatedFunction, UnmodifiableTabulatedFunction},
    error::Result,
    function::MathFunction,
};

/// Creates tabulated functions of one backend kind.
pub trait TabulatedFunctionFactory: fmt::Debug {
    /// The backend kind this factory produces.
    fn kind(&self) -> BackendKind;

    /// Creates a function from coordinate vectors.
    fn create(&self, x_values: Vec<f64>, y_values: Vec<f64>) -> Result<Box<dyn TabulatedFunction>>;

    /// Rebuilds a stored function. Unlike [`create`](Self::create), a single
    /// sample is accepted.
    fn restore(&self, x_values: Vec<f64>, y_values: Vec<f64>) -> Result<Box<dyn TabulatedFunction>>;

    /// Creates a function by sampling `source` at `count` points over `[from, to]`.
    fn create_from_function(
        &self,
        source: &dyn MathFunction,
        from: f64,
        to: f64,
        count: usize,
    ) -> Result<Box<dyn TabulatedFunction>> {
        let (x_values, y_values) = sample(source, from, to, count)?;
        self.create(x_values, y_values)
    }

    /// Creates a function that only evaluates at its samples.
    fn create_strict(&self, x_values: Vec<f64>, y_values: Vec<f64>) -> Result<Box<dyn TabulatedFunction>> {
        Ok(StrictTabulatedFunction::wrap(self.create(x_values, y_values)?))
    }

    /// Creates a function that rejects every mutation.
    fn create_unmodifiable(
        &self,
        x_values: Vec<f64>,
        y_values: Vec<f64>,
    ) -> Result<Box<dyn TabulatedFunction>> {
        Ok(UnmodifiableTabulatedFunction::wrap(self.create(x_values, y_values)?))
    }

    /// Creates a function that is both strict and unmodifiable.
    fn create_strict_unmodifiable(
        &self,
        x_values: Vec<f64>,
        y_values: Vec<f64>,
    ) -> Result<Box<dyn TabulatedFunction>> {
        Ok(UnmodifiableTabulatedFunction::wrap(
            StrictTabulatedFunction::wrap(self.create(x_values, y_values)?),
        ))
    }
}

/// Produces [`ArrayTabulatedFunction`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayTabulatedFunctionFactory;

impl TabulatedFunctionFactory for ArrayTabulatedFunctionFactory {
    fn kind(&self) -> BackendKind {
        BackendKind::Array
    }

    fn create(&self, x_values: Vec<f64>, y_values: Vec<f64>) -> Result<Box<dyn TabulatedFunction>> {
        Ok(Box::new(ArrayTabulatedFunction::new(x_values, y_values)?))
    }

    fn restore(&self, x_values: Vec<f64>, y_values: Vec<f64>) -> Result<Box<dyn TabulatedFunction>> {
        Ok(Box::new(ArrayTabulatedFunction::restore(x_values, y_values)?))
    }
}

/// Produces [`LinkedListTabulatedFunction`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedListTabulatedFunctionFactory;

impl TabulatedFunctionFactory for LinkedListTabulatedFunctionFactory {
    fn kind(&self) -> BackendKind {
        BackendKind::LinkedList
    }

    fn create(&self, x_values: Vec<f64>, y_values: Vec<f64>) -> Result<Box<dyn TabulatedFunction>> {
        Ok(Box::new(LinkedListTabulatedFunction::new(x_values, y_values)?))
    }

    fn restore(&self, x_values: Vec<f64>, y_values: Vec<f64>) -> Result<Box<dyn TabulatedFunction>> {
        Ok(Box::new(LinkedListTabulatedFunction::restore(x_values, y_values)?))
    }
}

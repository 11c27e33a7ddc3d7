//! # tabfn
//!
//! Discretely sampled functions of one real variable: storage backends,
//! linear approximation, behavioural decorators, pointwise arithmetic,
//! finite-difference differentiation, iterative solvers and persistence
//! codecs.
//!
//! ```rust
//! use tabfn::{
//!     DifferenceScheme, LinkedListTabulatedFunction, MathFunction, SqrFunction,
//!     TabulatedDifferentialOperator, TabulatedFunction,
//! };
//!
//! let f = LinkedListTabulatedFunction::from_function(&SqrFunction, 0.0, 4.0, 5).unwrap();
//! assert_eq!(f.apply(2.5).unwrap(), 6.5);
//!
//! let df = TabulatedDifferentialOperator::new(DifferenceScheme::Middle).derive(&f).unwrap();
//! assert_eq!(df.apply(2.5).unwrap(), 5.0);
//! ```

pub mod codec;
pub mod decorators;
pub mod error;
pub mod function;
pub mod operations;
pub mod solvers;
pub mod tabulated;

mod test_utils;

pub use crate::codec::{CodecError, ErrorContext};
pub use crate::decorators::{StrictTabulatedFunction, UnmodifiableTabulatedFunction};
pub use crate::error::{Result, TabulatedError};
pub use crate::function::{CompositeFunction, ConstantFunction, IdentityFunction, MathFunction, SqrFunction};
pub use crate::operations::{
    CONSISTENCY_TOLERANCE, DifferenceScheme, SteppingDerivative, SteppingDifferentialOperator,
    TabulatedDifferentialOperator, TabulatedFunctionOperationService,
};
pub use crate::solvers::{Solution, SolverSettings, fixed_point, newton_raphson};
pub use crate::tabulated::{
    ArrayTabulatedFunction, ArrayTabulatedFunctionFactory, BackendKind, LinkedListTabulatedFunction,
    LinkedListTabulatedFunctionFactory, Point, Policy, TabulatedFunction, TabulatedFunctionFactory,
};

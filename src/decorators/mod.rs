//! # Behavioural decorators
//!
//! Wrappers that add a guarantee to any tabulated function without touching
//! its backend:
//!
//! - [`StrictTabulatedFunction`]: evaluation only at existing samples
//! - [`UnmodifiableTabulatedFunction`]: no `set_y`, `insert` or `remove`
//!
//! Decorators own the function they wrap and can be nested in any order.
//! Each one only provides its own guarantee, so a function that must be both
//! strict and read-only needs both wrappers.
//!
//! ```rust
//! use tabfn::{
//!     ArrayTabulatedFunction, MathFunction, StrictTabulatedFunction, TabulatedError,
//!     TabulatedFunction, UnmodifiableTabulatedFunction,
//! };
//!
//! let base = ArrayTabulatedFunction::new(vec![0.0, 1.0], vec![0.0, 10.0]).unwrap();
//! let mut f = UnmodifiableTabulatedFunction::wrap(StrictTabulatedFunction::wrap(Box::new(base)));
//!
//! assert_eq!(f.apply(1.0).unwrap(), 10.0);
//! assert!(matches!(f.apply(0.5), Err(TabulatedError::UnsupportedOperation(_))));
//! assert!(matches!(f.set_y(0, 1.0), Err(TabulatedError::UnsupportedOperation(_))));
//! ```

pub mod strict;
pub mod unmodifiable;

pub use strict::StrictTabulatedFunction;
pub use unmodifiable::UnmodifiableTabulatedFunction;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::TabulatedError,
        function::MathFunction,
        tabulated::{ArrayTabulatedFunction, LinkedListTabulatedFunction, Policy, TabulatedFunction},
    };

    fn create_base() -> Box<dyn TabulatedFunction> {
        Box::new(LinkedListTabulatedFunction::new(vec![1.0, 2.0, 3.0], vec![10.0, 20.0, 30.0]).unwrap())
    }

    fn assert_unsupported<T: std::fmt::Debug>(result: Result<T, TabulatedError>) {
        assert!(
            matches!(result, Err(TabulatedError::UnsupportedOperation(_))),
            "expected UnsupportedOperation, got {:?}",
            result
        );
    }

    #[test]
    fn test_both_orders_reject_mutation_and_approximation() {
        let chains: Vec<Box<dyn TabulatedFunction>> = vec![
            StrictTabulatedFunction::wrap(UnmodifiableTabulatedFunction::wrap(create_base())),
            UnmodifiableTabulatedFunction::wrap(StrictTabulatedFunction::wrap(create_base())),
        ];

        for mut f in chains {
            assert_eq!(f.apply(2.0).unwrap(), 20.0);
            assert_unsupported(f.apply(2.5));
            assert_unsupported(f.apply(0.0));
            assert_unsupported(f.set_y(0, 1.0));
            assert_unsupported(f.insert(4.0, 40.0));
            assert_unsupported(f.remove(0));
            assert_eq!(f.count(), 3);
            assert_eq!(f.y(0).unwrap(), 10.0);
        }
    }

    #[test]
    fn test_single_decorator_gives_single_guarantee() {
        let mut strict = StrictTabulatedFunction::wrap(create_base());
        strict.insert(4.0, 40.0).unwrap();
        assert_eq!(strict.count(), 4);
        assert_unsupported(strict.apply(3.5));

        let unmodifiable = UnmodifiableTabulatedFunction::wrap(create_base());
        assert_eq!(unmodifiable.apply(2.5).unwrap(), 25.0);
    }

    #[test]
    fn test_wrapping_is_idempotent() {
        let once = StrictTabulatedFunction::wrap(create_base());
        let twice = StrictTabulatedFunction::wrap(once);
        assert_eq!(twice.policies(), vec![Policy::Strict]);

        let mixed = UnmodifiableTabulatedFunction::wrap(StrictTabulatedFunction::wrap(create_base()));
        let mixed = StrictTabulatedFunction::wrap(UnmodifiableTabulatedFunction::wrap(mixed));
        assert_eq!(mixed.policies(), vec![Policy::Unmodifiable, Policy::Strict]);
    }

    #[test]
    fn test_decorators_preserve_kind() {
        let f = UnmodifiableTabulatedFunction::wrap(StrictTabulatedFunction::wrap(Box::new(
            ArrayTabulatedFunction::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap(),
        )));
        assert_eq!(f.kind(), crate::tabulated::BackendKind::Array);
    }
}

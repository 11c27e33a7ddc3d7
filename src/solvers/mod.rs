//! # Iterative solvers
//!
//! Newton-Raphson root-finding and fixed-point iteration over any
//! [`MathFunction`]. Both stop when two consecutive iterates differ by less
//! than the tolerance or when the iteration budget runs out. Running out of
//! budget is not an error: the last iterate comes back with
//! `converged == false`.
//!
//! ```rust
//! use tabfn::solvers::{newton_raphson, SolverSettings};
//!
//! // sqrt(2) as the root of x^2 - 2
//! let solution = newton_raphson(
//!     &|x: f64| x * x - 2.0,
//!     &|x: f64| 2.0 * x,
//!     1.0,
//!     &SolverSettings::default(),
//! )
//! .unwrap();
//!
//! assert!(solution.converged);
//! assert!((solution.x - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

use log::{debug, warn};

use crate::{
    error::{Result, TabulatedError},
    function::MathFunction,
};

/// Stopping rule shared by the solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverSettings {
    /// Convergence threshold on `|x_{n+1} - x_n|`.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 100,
        }
    }
}

impl SolverSettings {
    pub fn new(tolerance: f64, max_iterations: usize) -> Result<Self> {
        let settings = SolverSettings {
            tolerance,
            max_iterations,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(TabulatedError::InvalidArgument(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(TabulatedError::InvalidArgument(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of an iterative solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Last iterate.
    pub x: f64,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the stopping tolerance was reached within the budget.
    pub converged: bool,
}

/// Finds a root of `f` with Newton's method, starting from `x0`.
///
/// # Errors
///
/// - `InvalidArgument` for invalid `settings`
/// - `Arithmetic` when `df` is zero at an iterate or an iterate is not finite
/// - any error raised while evaluating `f` or `df`
pub fn newton_raphson<F, D>(f: &F, df: &D, x0: f64, settings: &SolverSettings) -> Result<Solution>
where
    F: MathFunction + ?Sized,
    D: MathFunction + ?Sized,
{
    iterate("Newton-Raphson", x0, settings, |x| {
        let slope = df.apply(x)?;
        if slope == 0.0 {
            return Err(TabulatedError::Arithmetic(format!("zero derivative at x = {}", x)));
        }
        Ok(x - f.apply(x)? / slope)
    })
}

/// Iterates `x_{n+1} = phi(x_n)` from `x0`.
///
/// # Errors
///
/// - `InvalidArgument` for invalid `settings`
/// - `Arithmetic` when an iterate is not finite
/// - any error raised while evaluating `phi`
pub fn fixed_point<P>(phi: &P, x0: f64, settings: &SolverSettings) -> Result<Solution>
where
    P: MathFunction + ?Sized,
{
    iterate("fixed-point", x0, settings, |x| phi.apply(x))
}

fn iterate<S>(method: &str, x0: f64, settings: &SolverSettings, mut step: S) -> Result<Solution>
where
    S: FnMut(f64) -> Result<f64>,
{
    settings.validate()?;

    let mut x = x0;
    for iteration in 1..=settings.max_iterations {
        let next = step(x)?;
        if !next.is_finite() {
            return Err(TabulatedError::Arithmetic(format!(
                "{} iteration {} produced a non-finite value from x = {}",
                method, iteration, x
            )));
        }
        let delta = (next - x).abs();
        x = next;
        if delta < settings.tolerance {
            debug!("{} converged to {} after {} iterations", method, x, iteration);
            return Ok(Solution {
                x,
                iterations: iteration,
                converged: true,
            });
        }
    }

    warn!(
        "{} did not converge within {} iterations, returning last iterate {}",
        method, settings.max_iterations, x
    );
    Ok(Solution {
        x,
        iterations: settings.max_iterations,
        converged: false,
    })
}

//! Linear interpolation and extrapolation shared by every backend.
//!
//! These functions only use the indexed accessors of [`TabulatedFunction`],
//! so they work unchanged on both backends and through decorators. The
//! trait's default methods delegate here.

use super::TabulatedFunction;
use crate::error::{Result, TabulatedError};

/// Straight line through `(x0, y0)` and `(x1, y1)` evaluated at `x`.
pub fn linear(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Index `i` such that `x(i) <= x < x(i + 1)`.
///
/// `x == right_bound()` and `x > right_bound()` both map to the last segment
/// `count - 2`. Values left of the domain are rejected; callers extrapolate
/// those instead.
pub fn floor_index_of_x<T>(function: &T, x: f64) -> Result<usize>
where
    T: TabulatedFunction + ?Sized,
{
    let count = function.count();
    let left = function.left_bound();
    if x < left || x.is_nan() {
        return Err(TabulatedError::InvalidArgument(format!(
            "x = {} is left of the domain starting at {}",
            x, left
        )));
    }
    if count < 2 {
        return Ok(0);
    }
    if x >= function.right_bound() {
        return Ok(count - 2);
    }

    let mut index = 0;
    for i in 1..count {
        if function.x(i)? <= x {
            index = i;
        } else {
            break;
        }
    }
    Ok(index)
}

/// Interpolates on the segment `[x(floor_index), x(floor_index + 1)]`.
pub fn interpolate<T>(function: &T, x: f64, floor_index: usize) -> Result<f64>
where
    T: TabulatedFunction + ?Sized,
{
    let x0 = function.x(floor_index)?;
    let x1 = function.x(floor_index + 1)?;
    if !(x0 <= x && x <= x1) {
        return Err(TabulatedError::Interpolation {
            x,
            left: x0,
            right: x1,
        });
    }
    let y0 = function.y(floor_index)?;
    let y1 = function.y(floor_index + 1)?;
    Ok(linear(x, x0, x1, y0, y1))
}

/// Extrapolates along the line through the two leftmost samples.
pub fn extrapolate_left<T>(function: &T, x: f64) -> Result<f64>
where
    T: TabulatedFunction + ?Sized,
{
    if function.count() < 2 {
        return Err(TabulatedError::Extrapolation {
            x,
            reason: "at least 2 samples are required".to_string(),
        });
    }
    let (x0, x1) = (function.x(0)?, function.x(1)?);
    let (y0, y1) = (function.y(0)?, function.y(1)?);
    Ok(linear(x, x0, x1, y0, y1))
}

/// Extrapolates along the line through the two rightmost samples.
pub fn extrapolate_right<T>(function: &T, x: f64) -> Result<f64>
where
    T: TabulatedFunction + ?Sized,
{
    let count = function.count();
    if count < 2 {
        return Err(TabulatedError::Extrapolation {
            x,
            reason: "at least 2 samples are required".to_string(),
        });
    }
    let (x0, x1) = (function.x(count - 2)?, function.x(count - 1)?);
    let (y0, y1) = (function.y(count - 2)?, function.y(count - 1)?);
    Ok(linear(x, x0, x1, y0, y1))
}

/// Evaluates a tabulated function at `x`.
///
/// Exact samples are returned as stored. Otherwise the function extrapolates
/// left of the domain, extrapolates right of it, or interpolates inside it.
/// A function reduced to a single sample is constant.
pub fn apply<T>(function: &T, x: f64) -> Result<f64>
where
    T: TabulatedFunction + ?Sized,
{
    if let Some(index) = function.index_of_x(x) {
        return function.y(index);
    }
    if function.count() < 2 {
        return function.y(0);
    }
    if x < function.left_bound() {
        function.extrapolate_left(x)
    } else if x > function.right_bound() {
        function.extrapolate_right(x)
    } else {
        let floor = function.floor_index_of_x(x)?;
        function.interpolate(x, floor)
    }
}

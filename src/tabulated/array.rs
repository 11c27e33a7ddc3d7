use log::{debug, trace};

use super::{
    BackendKind, MIN_CREATE_COUNT, MIN_RESTORE_COUNT, Point, TabulatedFunction, approximation,
    check_coordinates, sample,
};
use crate::{
    error::{Result, TabulatedError},
    function::MathFunction,
};

/// Tabulated function stored in two parallel, x-sorted vectors.
///
/// Lookups by x use binary search. Inserting a new x shifts the tail of both
/// vectors; the vectors grow geometrically when full.
///
/// # Examples
///
/// ```rust
/// use tabfn::{ArrayTabulatedFunction, MathFunction, SqrFunction, TabulatedFunction};
///
/// let f = ArrayTabulatedFunction::from_function(&SqrFunction, 0.0, 4.0, 5).unwrap();
/// assert_eq!(f.count(), 5);
/// assert_eq!(f.y(3).unwrap(), 9.0);
/// assert_eq!(f.apply(2.5).unwrap(), 6.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayTabulatedFunction {
    x_values: Vec<f64>,
    y_values: Vec<f64>,
}

impl ArrayTabulatedFunction {
    /// Creates a function from coordinate vectors.
    ///
    /// # Errors
    /// - `DifferentLengths` if the vectors differ in length
    /// - `InvalidArgument` if fewer than 2 samples are given
    /// - `NotSorted` if the x-values are not strictly ascending
    pub fn new(x_values: Vec<f64>, y_values: Vec<f64>) -> Result<Self> {
        Self::build(x_values, y_values, MIN_CREATE_COUNT)
    }

    /// Rebuilds a stored function, which may have been reduced to a single
    /// sample by removal.
    pub fn restore(x_values: Vec<f64>, y_values: Vec<f64>) -> Result<Self> {
        Self::build(x_values, y_values, MIN_RESTORE_COUNT)
    }

    fn build(x_values: Vec<f64>, y_values: Vec<f64>, min_count: usize) -> Result<Self> {
        check_coordinates(&x_values, &y_values, min_count)?;
        debug!("Created array tabulated function with {} samples", x_values.len());
        Ok(ArrayTabulatedFunction { x_values, y_values })
    }

    /// Samples `source` at `count` evenly spaced points over `[from, to]`.
    pub fn from_function<S>(source: &S, from: f64, to: f64, count: usize) -> Result<Self>
    where
        S: MathFunction + ?Sized,
    {
        let (x_values, y_values) = sample(source, from, to, count)?;
        Self::new(x_values, y_values)
    }

    /// Creates a function from samples in any order.
    ///
    /// Duplicate x-values are rejected with `NotSorted`.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| a.x.total_cmp(&b.x));
        let (x_values, y_values): (Vec<f64>, Vec<f64>) = sorted.iter().map(|p| (p.x, p.y)).unzip();
        Self::new(x_values, y_values)
    }

    pub fn x_values(&self) -> &[f64] {
        &self.x_values
    }

    pub fn y_values(&self) -> &[f64] {
        &self.y_values
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.x_values.len() {
            return Err(TabulatedError::IndexOutOfRange {
                index,
                count: self.x_values.len(),
            });
        }
        Ok(())
    }
}

impl MathFunction for ArrayTabulatedFunction {
    fn apply(&self, x: f64) -> Result<f64> {
        approximation::apply(self, x)
    }
}

impl TabulatedFunction for ArrayTabulatedFunction {
    fn count(&self) -> usize {
        self.x_values.len()
    }

    fn x(&self, index: usize) -> Result<f64> {
        self.check_index(index)?;
        Ok(self.x_values[index])
    }

    fn y(&self, index: usize) -> Result<f64> {
        self.check_index(index)?;
        Ok(self.y_values[index])
    }

    fn set_y(&mut self, index: usize, value: f64) -> Result<()> {
        self.check_index(index)?;
        self.y_values[index] = value;
        Ok(())
    }

    fn index_of_x(&self, x: f64) -> Option<usize> {
        let index = self.x_values.partition_point(|&v| v < x);
        (index < self.x_values.len() && self.x_values[index] == x).then_some(index)
    }

    fn index_of_y(&self, y: f64) -> Option<usize> {
        self.y_values.iter().position(|&v| v == y)
    }

    fn left_bound(&self) -> f64 {
        self.x_values[0]
    }

    fn right_bound(&self) -> f64 {
        self.x_values[self.x_values.len() - 1]
    }

    fn insert(&mut self, x: f64, y: f64) -> Result<()> {
        if x.is_nan() {
            return Err(TabulatedError::InvalidArgument("cannot insert a NaN x-value".to_string()));
        }
        let index = self.x_values.partition_point(|&v| v < x);
        if index < self.x_values.len() && self.x_values[index] == x {
            trace!("Overwriting y at x = {} (index {})", x, index);
            self.y_values[index] = y;
        } else {
            trace!("Inserting ({}, {}) at index {}", x, y, index);
            self.x_values.insert(index, x);
            self.y_values.insert(index, y);
        }
        Ok(())
    }

    fn remove(&mut self, index: usize) -> Result<()> {
        if self.x_values.len() <= 1 {
            return Err(TabulatedError::IllegalState(
                "cannot remove the last remaining sample".to_string(),
            ));
        }
        self.check_index(index)?;
        trace!("Removing sample at index {}", index);
        self.x_values.remove(index);
        self.y_values.remove(index);
        Ok(())
    }

    fn points(&self) -> Box<dyn Iterator<Item = Point> + '_> {
        Box::new(
            self.x_values
                .iter()
                .zip(self.y_values.iter())
                .map(|(&x, &y)| Point { x, y }),
        )
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Array
    }

    fn floor_index_of_x(&self, x: f64) -> Result<usize> {
        let left = self.left_bound();
        if x < left || x.is_nan() {
            return Err(TabulatedError::InvalidArgument(format!(
                "x = {} is left of the domain starting at {}",
                x, left
            )));
        }
        let count = self.x_values.len();
        if count < 2 {
            return Ok(0);
        }
        // Number of samples <= x, minus one, capped at the last segment
        let upper = self.x_values.partition_point(|&v| v <= x);
        Ok((upper - 1).min(count - 2))
    }
}

impl<'a> IntoIterator for &'a ArrayTabulatedFunction {
    type Item = Point;
    type IntoIter = Box<dyn Iterator<Item = Point> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.points()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::SqrFunction;
    use crate::test_utils::{assert_ascending, assert_float_eq};

    fn create_function() -> ArrayTabulatedFunction {
        ArrayTabulatedFunction::new(vec![1.0, 2.0, 3.0], vec![10.0, 20.0, 30.0]).unwrap()
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            ArrayTabulatedFunction::new(vec![1.0, 2.0], vec![1.0]),
            Err(TabulatedError::DifferentLengths { x_len: 2, y_len: 1 })
        );
        assert!(matches!(
            ArrayTabulatedFunction::new(vec![1.0], vec![1.0]),
            Err(TabulatedError::InvalidArgument(_))
        ));
        assert!(matches!(
            ArrayTabulatedFunction::new(vec![2.0, 1.0], vec![1.0, 1.0]),
            Err(TabulatedError::NotSorted { index: 1 })
        ));
    }

    #[test]
    fn test_accessors() {
        let f = create_function();
        assert_eq!(f.count(), 3);
        assert_eq!(f.x(1).unwrap(), 2.0);
        assert_eq!(f.y(2).unwrap(), 30.0);
        assert_eq!(f.left_bound(), 1.0);
        assert_eq!(f.right_bound(), 3.0);
        assert_eq!(f.x(3), Err(TabulatedError::IndexOutOfRange { index: 3, count: 3 }));
        assert_eq!(f.y(7), Err(TabulatedError::IndexOutOfRange { index: 7, count: 3 }));
    }

    #[test]
    fn test_index_of() {
        let f = create_function();
        assert_eq!(f.index_of_x(2.0), Some(1));
        assert_eq!(f.index_of_x(2.5), None);
        assert_eq!(f.index_of_x(4.0), None);
        assert_eq!(f.index_of_y(30.0), Some(2));
        assert_eq!(f.index_of_y(25.0), None);
    }

    #[test]
    fn test_set_y() {
        let mut f = create_function();
        f.set_y(1, -5.0).unwrap();
        assert_eq!(f.y(1).unwrap(), -5.0);
        assert!(f.set_y(3, 0.0).is_err());
    }

    #[test]
    fn test_insert_middle() {
        let mut f = create_function();
        f.insert(1.5, 15.0).unwrap();
        assert_eq!(f.count(), 4);
        assert_eq!(f.x_values(), &[1.0, 1.5, 2.0, 3.0]);
        assert_eq!(f.y_values(), &[10.0, 15.0, 20.0, 30.0]);
    }

    #[test]
    fn test_insert_ends_and_overwrite() {
        let mut f = create_function();
        f.insert(0.0, 0.0).unwrap();
        f.insert(4.0, 40.0).unwrap();
        f.insert(2.0, 99.0).unwrap();
        assert_eq!(f.x_values(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(f.y_values(), &[0.0, 10.0, 99.0, 30.0, 40.0]);
        assert!(f.insert(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_remove() {
        let mut f = create_function();
        f.remove(1).unwrap();
        assert_eq!(f.x_values(), &[1.0, 3.0]);
        assert!(matches!(f.remove(2), Err(TabulatedError::IndexOutOfRange { .. })));
        f.remove(0).unwrap();
        assert_eq!(f.count(), 1);
        assert!(matches!(f.remove(0), Err(TabulatedError::IllegalState(_))));
    }

    #[test]
    fn test_interleaved_mutation_keeps_order() {
        let mut f = create_function();
        for (i, x) in [2.5, 0.5, 7.0, 1.25, 6.0, 2.0].iter().enumerate() {
            f.insert(*x, i as f64).unwrap();
            f.remove(i % f.count()).unwrap();
            assert_ascending(&f);
        }
        assert_eq!(f.x_values(), &[1.25, 2.5, 6.0]);
    }

    #[test]
    fn test_floor_index_matches_linear_scan() {
        let f = ArrayTabulatedFunction::new(vec![0.0, 0.5, 2.0, 2.5, 10.0], vec![0.0; 5]).unwrap();
        for &x in &[0.0, 0.1, 0.5, 1.9, 2.0, 2.4, 2.5, 9.9, 10.0, 11.0] {
            assert_eq!(
                f.floor_index_of_x(x).unwrap(),
                approximation::floor_index_of_x(&f, x).unwrap(),
                "x = {}",
                x
            );
        }
    }

    #[test]
    fn test_from_function() {
        let f = ArrayTabulatedFunction::from_function(&SqrFunction, 2.0, -2.0, 5).unwrap();
        assert_eq!(f.x_values(), &[-2.0, -1.0, 0.0, 1.0, 2.0]);
        assert_eq!(f.y_values(), &[4.0, 1.0, 0.0, 1.0, 4.0]);
        assert_float_eq(f.apply(0.5).unwrap(), 0.5, 1e-12);
    }

    #[test]
    fn test_from_points() {
        let f = ArrayTabulatedFunction::from_points(&[Point::new(1.0, 2.0), Point::new(0.0, 1.0)]).unwrap();
        assert_eq!(f.to_points(), vec![Point::new(0.0, 1.0), Point::new(1.0, 2.0)]);

        let duplicate = ArrayTabulatedFunction::from_points(&[Point::new(1.0, 2.0), Point::new(1.0, 3.0)]);
        assert_eq!(duplicate, Err(TabulatedError::NotSorted { index: 1 }));
    }

    #[test]
    fn test_independent_iterators() {
        let f = create_function();
        let mut first = f.points();
        let mut second = f.points();
        assert_eq!(first.next(), Some(Point::new(1.0, 10.0)));
        assert_eq!(first.next(), Some(Point::new(2.0, 20.0)));
        assert_eq!(second.next(), Some(Point::new(1.0, 10.0)));

        let xs: Vec<f64> = (&f).into_iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    }
}

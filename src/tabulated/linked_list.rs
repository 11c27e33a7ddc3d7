use log::{debug, trace};

use super::{
    BackendKind, MIN_CREATE_COUNT, MIN_RESTORE_COUNT, Point, TabulatedFunction, approximation,
    check_coordinates, sample,
};
use crate::{
    error::{Result, TabulatedError},
    function::MathFunction,
};

/// A ring node. `prev` and `next` are slots in the owning arena.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Node {
    x: f64,
    y: f64,
    prev: usize,
    next: usize,
}

/// Tabulated function stored as a circular doubly-linked list.
///
/// Nodes live in an arena and link to each other by slot index. `head` is
/// the node with the smallest x; its `prev` is the node with the largest x,
/// so both ends are reachable in constant time and insertion at the
/// beginning, middle or end rewires the same four links.
///
/// # Examples
///
/// ```rust
/// use tabfn::{LinkedListTabulatedFunction, MathFunction, TabulatedFunction};
///
/// let mut f = LinkedListTabulatedFunction::new(vec![0.0, 1.0], vec![0.0, 2.0]).unwrap();
/// f.insert(0.5, 5.0).unwrap();
/// assert_eq!(f.y(1).unwrap(), 5.0);
/// assert_eq!(f.apply(2.0).unwrap(), 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct LinkedListTabulatedFunction {
    nodes: Vec<Node>,
    head: Option<usize>,
}

impl LinkedListTabulatedFunction {
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
        let mut function = LinkedListTabulatedFunction {
            nodes: Vec::with_capacity(x_values.len()),
            head: None,
        };
        for (x, y) in x_values.into_iter().zip(y_values) {
            function.push_back(x, y);
        }
        debug!(
            "Created linked list tabulated function with {} samples",
            function.nodes.len()
        );
        Ok(function)
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

    /// Appends a node after the current tail. Callers keep x ascending.
    fn push_back(&mut self, x: f64, y: f64) {
        match self.head {
            Some(head) => {
                self.link_before(head, x, y);
            }
            None => {
                self.nodes.push(Node {
                    x,
                    y,
                    prev: 0,
                    next: 0,
                });
                self.head = Some(0);
            }
        }
    }

    /// Links a new node in front of `next` and returns its slot.
    fn link_before(&mut self, next: usize, x: f64, y: f64) -> usize {
        let prev = self.nodes[next].prev;
        let slot = self.nodes.len();
        self.nodes.push(Node { x, y, prev, next });
        self.nodes[prev].next = slot;
        self.nodes[next].prev = slot;
        slot
    }

    /// Unlinks and frees the node at `slot`.
    ///
    /// The arena stays dense: the node in the last slot moves into the
    /// freed one and its neighbours are re-pointed.
    fn unlink(&mut self, slot: usize) {
        if self.nodes.len() == 1 {
            self.nodes.clear();
            self.head = None;
            return;
        }

        let Node { prev, next, .. } = self.nodes[slot];
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        if self.head == Some(slot) {
            self.head = Some(next);
        }

        let last = self.nodes.len() - 1;
        self.nodes.swap_remove(slot);
        if slot != last {
            let relocate = |i: usize| if i == last { slot } else { i };
            let moved = self.nodes[slot];
            let (p, n) = (relocate(moved.prev), relocate(moved.next));
            self.nodes[slot].prev = p;
            self.nodes[slot].next = n;
            self.nodes[p].next = slot;
            self.nodes[n].prev = slot;
            if self.head == Some(last) {
                self.head = Some(slot);
            }
        }
    }

    /// Arena slot of the node at list position `index`.
    ///
    /// Walks from the head or from the tail, whichever is closer.
    fn slot_of(&self, index: usize) -> Result<usize> {
        let count = self.nodes.len();
        let head = match self.head {
            Some(head) if index < count => head,
            _ => return Err(TabulatedError::IndexOutOfRange { index, count }),
        };

        let mut slot = head;
        if index <= count / 2 {
            for _ in 0..index {
                slot = self.nodes[slot].next;
            }
        } else {
            for _ in index..count {
                slot = self.nodes[slot].prev;
            }
        }
        Ok(slot)
    }

    /// Walks the ring from the head, yielding `(position, node)`.
    fn walk(&self) -> impl Iterator<Item = (usize, &Node)> + '_ {
        let mut slot = self.head;
        (0..self.nodes.len()).filter_map(move |position| {
            let current = slot?;
            let node = &self.nodes[current];
            slot = Some(node.next);
            Some((position, node))
        })
    }
}

impl PartialEq for LinkedListTabulatedFunction {
    fn eq(&self, other: &Self) -> bool {
        self.points().eq(other.points())
    }
}

impl MathFunction for LinkedListTabulatedFunction {
    fn apply(&self, x: f64) -> Result<f64> {
        approximation::apply(self, x)
    }
}

impl TabulatedFunction for LinkedListTabulatedFunction {
    fn count(&self) -> usize {
        self.nodes.len()
    }

    fn x(&self, index: usize) -> Result<f64> {
        let slot = self.slot_of(index)?;
        Ok(self.nodes[slot].x)
    }

    fn y(&self, index: usize) -> Result<f64> {
        let slot = self.slot_of(index)?;
        Ok(self.nodes[slot].y)
    }

    fn set_y(&mut self, index: usize, value: f64) -> Result<()> {
        let slot = self.slot_of(index)?;
        self.nodes[slot].y = value;
        Ok(())
    }

    fn index_of_x(&self, x: f64) -> Option<usize> {
        self.walk()
            .take_while(|(_, node)| node.x <= x)
            .find(|(_, node)| node.x == x)
            .map(|(position, _)| position)
    }

    fn index_of_y(&self, y: f64) -> Option<usize> {
        self.walk()
            .find(|(_, node)| node.y == y)
            .map(|(position, _)| position)
    }

    fn left_bound(&self) -> f64 {
        self.head.map_or(f64::NAN, |head| self.nodes[head].x)
    }

    fn right_bound(&self) -> f64 {
        self.head
            .map_or(f64::NAN, |head| self.nodes[self.nodes[head].prev].x)
    }

    fn insert(&mut self, x: f64, y: f64) -> Result<()> {
        if x.is_nan() {
            return Err(TabulatedError::InvalidArgument("cannot insert a NaN x-value".to_string()));
        }
        let Some(head) = self.head else {
            self.push_back(x, y);
            return Ok(());
        };

        let mut slot = head;
        for _ in 0..self.nodes.len() {
            let node = self.nodes[slot];
            if node.x == x {
                trace!("Overwriting y at x = {}", x);
                self.nodes[slot].y = y;
                return Ok(());
            }
            if node.x > x {
                trace!("Inserting ({}, {}) before x = {}", x, y, node.x);
                let new_slot = self.link_before(slot, x, y);
                if slot == head {
                    self.head = Some(new_slot);
                }
                return Ok(());
            }
            slot = node.next;
        }

        // Larger than every x: the new node becomes the tail, just before the head
        trace!("Appending ({}, {})", x, y);
        self.link_before(head, x, y);
        Ok(())
    }

    fn remove(&mut self, index: usize) -> Result<()> {
        if self.nodes.len() <= 1 {
            return Err(TabulatedError::IllegalState(
                "cannot remove the last remaining sample".to_string(),
            ));
        }
        let slot = self.slot_of(index)?;
        trace!("Removing sample at index {}", index);
        self.unlink(slot);
        Ok(())
    }

    fn points(&self) -> Box<dyn Iterator<Item = Point> + '_> {
        Box::new(self.walk().map(|(_, node)| Point {
            x: node.x,
            y: node.y,
        }))
    }

    fn kind(&self) -> BackendKind {
        BackendKind::LinkedList
    }

    fn floor_index_of_x(&self, x: f64) -> Result<usize> {
        let left = self.left_bound();
        if x < left || x.is_nan() {
            return Err(TabulatedError::InvalidArgument(format!(
                "x = {} is left of the domain starting at {}",
                x, left
            )));
        }
        let count = self.nodes.len();
        if count < 2 {
            return Ok(0);
        }
        let upper = self.walk().take_while(|(_, node)| node.x <= x).count();
        Ok((upper - 1).min(count - 2))
    }
}

impl<'a> IntoIterator for &'a LinkedListTabulatedFunction {
    type Item = Point;
    type IntoIter = Box<dyn Iterator<Item = Point> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.points()
    }
}

use std::fmt::{self, Debug};

use geo::Coordinate;
use rstar::RTree;

use crate::SweepFloat;

/// A detected crossing of two input segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection<T: SweepFloat> {
    /// The crossing point.
    pub point: Coordinate<T>,
    /// Keys of the crossing segments, smaller key first.
    pub segments: (usize, usize),
}

impl<T: SweepFloat> Intersection<T> {
    pub fn new(point: Coordinate<T>, a: usize, b: usize) -> Self {
        let segments = if a <= b { (a, b) } else { (b, a) };
        Intersection { point, segments }
    }
}

/// Set of intersection points, de-duplicated by coordinate.
///
/// Two points closer than `tolerance` (Euclidean) are considered the
/// same; only the first record inserted for a point is retained. A
/// spatial index over the retained points keeps the duplicate check
/// logarithmic.
pub struct IntersectionSet<T: SweepFloat> {
    records: Vec<Intersection<T>>,
    index: RTree<[T; 2]>,
    tolerance: T,
}

impl<T: SweepFloat> Debug for IntersectionSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntersectionSet")
            .field("tolerance", &self.tolerance)
            .field("records", &self.records)
            .finish()
    }
}

impl<T: SweepFloat> IntersectionSet<T> {
    pub fn new(tolerance: T) -> Self {
        IntersectionSet {
            records: Vec::new(),
            index: RTree::new(),
            tolerance,
        }
    }

    /// Add a record unless its point is already present.
    ///
    /// Returns `true` if the record was added.
    pub fn insert(&mut self, record: Intersection<T>) -> bool {
        if self.contains_point(record.point) {
            return false;
        }
        self.index.insert([record.point.x, record.point.y]);
        self.records.push(record);
        true
    }

    /// Check if a point within `tolerance` of `pt` is present.
    pub fn contains_point(&self, pt: Coordinate<T>) -> bool {
        match self.index.nearest_neighbor(&[pt.x, pt.y]) {
            Some(&[x, y]) => {
                let (dx, dy) = (x - pt.x, y - pt.y);
                dx * dx + dy * dy <= self.tolerance * self.tolerance
            }
            None => false,
        }
    }

    /// Check both sets contain the same points, up to `tolerance`.
    pub fn matches(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.points().all(|pt| other.contains_point(pt))
            && other.points().all(|pt| self.contains_point(pt))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn tolerance(&self) -> T {
        self.tolerance
    }

    pub fn iter(&self) -> impl Iterator<Item = &Intersection<T>> + '_ {
        self.records.iter()
    }

    pub fn points(&self) -> impl Iterator<Item = Coordinate<T>> + '_ {
        self.records.iter().map(|r| r.point)
    }

    pub fn into_vec(self) -> Vec<Intersection<T>> {
        self.records
    }
}

impl<'a, T: SweepFloat> IntoIterator for &'a IntersectionSet<T> {
    type Item = &'a Intersection<T>;
    type IntoIter = std::slice::Iter<'a, Intersection<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

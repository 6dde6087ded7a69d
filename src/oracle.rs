//! Brute-force intersection search.
//!
//! Tests every pair of segments with [`check_intersection`]. This is
//! O(n²) and only meant to cross-check the sweep.
use itertools::Itertools;

use crate::{
    intersections::{Intersection, IntersectionSet},
    segment::{check_intersection, Segment},
    SweepFloat,
};

/// All pairwise intersections, de-duplicated within `tolerance`.
pub fn brute_force_intersections<T: SweepFloat>(
    segments: &[Segment<T>],
    tolerance: T,
) -> IntersectionSet<T> {
    let mut set = IntersectionSet::new(tolerance);
    (0..segments.len())
        .tuple_combinations()
        .filter_map(|(i, j)| {
            check_intersection(&segments[i], &segments[j]).map(|pt| Intersection::new(pt, i, j))
        })
        .for_each(|record| {
            set.insert(record);
        });
    set
}

/// Number of crossing pairs (without de-duplicating points).
pub fn brute_force_count<T: SweepFloat>(segments: &[Segment<T>]) -> usize {
    (0..segments.len())
        .tuple_combinations()
        .filter(|&(i, j)| check_intersection(&segments[i], &segments[j]).is_some())
        .count()
}

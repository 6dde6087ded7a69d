use std::{cmp::Ordering, ops::RangeInclusive};

use geo::GeoFloat;

use crate::{
    error::{Error, Result},
    segment::Segment,
};

/// Vertical order of segments `a` and `b` at sweep coordinate `x`.
///
/// `Ordering::Less` means `a` is above `b` (larger `y`); the active
/// segments are kept in increasing order of this relation, i.e. top
/// to bottom. The order is recomputed from the segments on every
/// call, as it changes while the sweep advances.
pub(crate) fn vertical_order<T: GeoFloat>(segments: &[Segment<T>], x: T, a: usize, b: usize) -> Ordering {
    let ya = segments[a].y_at(x);
    let yb = segments[b].y_at(x);
    yb.partial_cmp(&ya).unwrap_or(Ordering::Equal)
}

/// Vertical order of segments `a` and `b` just right of a point
/// they both pass through: the steeper one ends up above.
pub(crate) fn crossing_order<T: GeoFloat>(segments: &[Segment<T>], a: usize, b: usize) -> Ordering {
    let (ma, _) = segments[a].slope_intercept();
    let (mb, _) = segments[b].slope_intercept();
    mb.partial_cmp(&ma).unwrap_or(Ordering::Equal)
}

/// Keys of the segments crossed by the sweep line, top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSegments {
    order: Vec<usize>,
}

impl ActiveSegments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key` before the first active segment that it is
    /// above of, as per `cmp`.
    ///
    /// `cmp(a, b)` must return `Less` if `a` is above `b`; it is
    /// expected to be evaluated at the current sweep coordinate.
    /// Returns the position of the inserted key.
    pub fn insert_ordered<F>(&mut self, key: usize, mut cmp: F) -> usize
    where
        F: FnMut(usize, usize) -> Ordering,
    {
        debug_assert!(!self.order.contains(&key), "segment {} is already active", key);
        let idx = self
            .order
            .partition_point(|&other| cmp(other, key) != Ordering::Greater);
        self.order.insert(idx, key);
        idx
    }

    /// Remove `key`, returning its former position.
    ///
    /// Fails with [`Error::NotActive`] if the key isn't present.
    pub fn remove(&mut self, key: usize) -> Result<usize> {
        let idx = self.position(key).ok_or(Error::NotActive(key))?;
        self.order.remove(idx);
        Ok(idx)
    }

    /// The keys immediately above and below `key`.
    pub fn neighbors(&self, key: usize) -> Result<(Option<usize>, Option<usize>)> {
        let idx = self.position(key).ok_or(Error::NotActive(key))?;
        let above = idx.checked_sub(1).map(|i| self.order[i]);
        let below = self.order.get(idx + 1).copied();
        Ok((above, below))
    }

    /// Re-sort the run of keys meeting at a crossing of `a` and `b`.
    ///
    /// The run covers every key between `a` and `b`, and is extended
    /// over the adjacent keys for which `through` holds. It is then
    /// sorted with `cmp`, which follows the same convention as in
    /// [`ActiveSegments::insert_ordered`]. Returns the positions the
    /// run occupies.
    pub fn reorder_run<P, F>(
        &mut self,
        a: usize,
        b: usize,
        mut through: P,
        mut cmp: F,
    ) -> Result<RangeInclusive<usize>>
    where
        P: FnMut(usize) -> bool,
        F: FnMut(usize, usize) -> Ordering,
    {
        let ia = self.position(a).ok_or(Error::NotActive(a))?;
        let ib = self.position(b).ok_or(Error::NotActive(b))?;
        let mut start = ia.min(ib);
        let mut end = ia.max(ib);
        while start > 0 && through(self.order[start - 1]) {
            start -= 1;
        }
        while end + 1 < self.order.len() && through(self.order[end + 1]) {
            end += 1;
        }
        self.order[start..=end].sort_by(|&x, &y| cmp(x, y));
        Ok(start..=end)
    }

    #[inline]
    pub fn position(&self, key: usize) -> Option<usize> {
        self.order.iter().position(|&k| k == key)
    }

    #[inline]
    pub fn contains(&self, key: usize) -> bool {
        self.order.contains(&key)
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    /// Check the keys are in top to bottom order at `x`.
    ///
    /// # Panics
    ///
    /// If an active key is out of bounds of `segments`.
    pub fn is_sorted_at<T: GeoFloat>(&self, segments: &[Segment<T>], x: T) -> bool {
        self.order
            .windows(2)
            .all(|w| vertical_order(segments, x, w[0], w[1]) != Ordering::Greater)
    }
}

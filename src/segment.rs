use geo::{Coordinate, GeoFloat, Line};

/// A line segment stored with its end points ordered by `x`.
///
/// The input may list the end points in any order; construction
/// swaps them so that `left().x <= right().x`. Segments used in a
/// sweep must additionally satisfy `left().x < right().x` (no
/// vertical segments), which is checked when the sweep is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<T: GeoFloat> {
    left: Coordinate<T>,
    right: Coordinate<T>,
}

impl<T: GeoFloat> Segment<T> {
    pub fn new(start: Coordinate<T>, end: Coordinate<T>) -> Self {
        if end.x < start.x {
            Segment {
                left: end,
                right: start,
            }
        } else {
            Segment {
                left: start,
                right: end,
            }
        }
    }

    /// The end point with the smaller `x`.
    #[inline]
    pub fn left(&self) -> Coordinate<T> {
        self.left
    }

    /// The end point with the larger `x`.
    #[inline]
    pub fn right(&self) -> Coordinate<T> {
        self.right
    }

    #[inline]
    pub fn min_x(&self) -> T {
        self.left.x
    }

    #[inline]
    pub fn max_x(&self) -> T {
        self.right.x
    }

    /// Convert back into a geo [`Line`] running left to right.
    pub fn line(&self) -> Line<T> {
        Line::new(self.left, self.right)
    }

    /// Slope and y-intercept `(m, b)` of the supporting line `y = m·x + b`.
    ///
    /// Undefined (non-finite) for vertical segments.
    #[inline]
    pub fn slope_intercept(&self) -> (T, T) {
        let m = (self.right.y - self.left.y) / (self.right.x - self.left.x);
        let b = self.right.y - m * self.right.x;
        (m, b)
    }

    /// Evaluate the supporting line at `x`.
    #[inline]
    pub fn y_at(&self, x: T) -> T {
        let (m, b) = self.slope_intercept();
        m * x + b
    }
}

impl<T: GeoFloat> From<Line<T>> for Segment<T> {
    fn from(l: Line<T>) -> Self {
        Segment::new(l.start, l.end)
    }
}

impl<T: GeoFloat> From<&Line<T>> for Segment<T> {
    fn from(l: &Line<T>) -> Self {
        Segment::new(l.start, l.end)
    }
}

impl<T: GeoFloat> From<[(T, T); 2]> for Segment<T> {
    fn from([a, b]: [(T, T); 2]) -> Self {
        Segment::new(a.into(), b.into())
    }
}

/// Intersect two segments, returning the crossing point if any.
///
/// Parallel segments (equal slopes) never intersect, even when
/// collinear. A crossing is reported only if its `x` lies strictly
/// inside the common `x`-range of both segments; touching at an end
/// point's `x` does not count.
pub fn check_intersection<T: GeoFloat>(a: &Segment<T>, b: &Segment<T>) -> Option<Coordinate<T>> {
    let (m1, b1) = a.slope_intercept();
    let (m2, b2) = b.slope_intercept();
    if m1 == m2 {
        return None;
    }

    // m1·x + b1 = m2·x + b2
    let x = (b1 - b2) / (m2 - m1);
    let lower = a.min_x().max(b.min_x());
    let upper = a.max_x().min(b.max_x());
    if !(lower < x && x < upper) {
        return None;
    }
    Some(Coordinate { x, y: m1 * x + b1 })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_normalized_end_points() {
        let seg = Segment::from([(10., 0.), (0., 10.)]);
        assert_eq!(seg.left(), Coordinate { x: 0., y: 10. });
        assert_eq!(seg.right(), Coordinate { x: 10., y: 0. });
        assert_eq!(seg, Segment::from(Line::from([(0., 10.), (10., 0.)])));
    }

    #[test]
    fn test_slope_intercept() {
        let (m, b) = Segment::from([(1., 3.), (3., 7.)]).slope_intercept();
        assert_relative_eq!(m, 2.);
        assert_relative_eq!(b, 1.);

        let seg = Segment::from([(0., 10.), (10., 0.)]);
        assert_relative_eq!(seg.y_at(2.5), 7.5);
    }

    #[test]
    fn test_crossing() {
        let a = Segment::from([(0., 0.), (10., 10.)]);
        let b = Segment::from([(0., 10.), (10., 0.)]);
        let pt = check_intersection(&a, &b).unwrap();
        assert_relative_eq!(pt.x, 5.);
        assert_relative_eq!(pt.y, 5.);
        assert_eq!(check_intersection(&b, &a), Some(pt));
    }

    #[test]
    fn test_no_crossing() {
        // Parallel
        let a = Segment::from([(0., 0.), (10., 10.)]);
        let b = Segment::from([(0., 1.), (10., 11.)]);
        assert_eq!(check_intersection(&a, &b), None);

        // Collinear overlap is not reported.
        let c = Segment::from([(2., 2.), (12., 12.)]);
        assert_eq!(check_intersection(&a, &c), None);

        // Lines cross outside the common x-range.
        let d = Segment::from([(0., 20.), (4., 16.)]);
        assert_eq!(check_intersection(&a, &d), None);
    }

    #[test]
    fn test_touching_end_point_is_not_a_crossing() {
        // Supporting lines meet at (5, 5), which is the right end of `a`.
        let a = Segment::from([(0., 0.), (5., 5.)]);
        let b = Segment::from([(0., 10.), (10., 0.)]);
        assert_eq!(check_intersection(&a, &b), None);
        assert_eq!(check_intersection(&b, &a), None);
    }
}

use geo::{
    kernels::{Kernel, Orientation},
    Coordinate, GeoFloat,
};
use itertools::Itertools;

use crate::{
    error::{Degeneracy, Error, Result},
    segment::Segment,
};

/// Check a single segment can be swept.
pub(crate) fn check_segment<T: GeoFloat>(index: usize, seg: &Segment<T>) -> Result<()> {
    let (l, r) = (seg.left(), seg.right());
    let reason = if ![l.x, l.y, r.x, r.y].iter().all(|c| c.is_finite()) {
        Degeneracy::NonFinite
    } else if l.x == r.x {
        Degeneracy::Vertical
    } else if l.y == r.y {
        Degeneracy::Horizontal
    } else {
        return Ok(());
    };
    Err(Error::DegenerateInput { index, reason })
}

/// Check every pair of segments is in general position.
///
/// Errors name the later segment of the offending pair. This is
/// quadratic in the number of segments.
pub(crate) fn check_general_position<T: GeoFloat>(segments: &[Segment<T>]) -> Result<()> {
    for (i, j) in (0..segments.len()).tuple_combinations() {
        if let Some(reason) = pair_degeneracy(&segments[i], &segments[j], i) {
            return Err(Error::DegenerateInput { index: j, reason });
        }
    }
    Ok(())
}

fn pair_degeneracy<T: GeoFloat>(a: &Segment<T>, b: &Segment<T>, a_key: usize) -> Option<Degeneracy> {
    let ends_a = [a.left(), a.right()];
    let ends_b = [b.left(), b.right()];
    if ends_a.iter().any(|p| ends_b.contains(p)) {
        return Some(Degeneracy::SharedEndpoint(a_key));
    }

    let collinear_a = ends_b.iter().filter(|&&p| is_collinear(a, p)).count();
    if collinear_a == 2 {
        if a.min_x() < b.max_x() && b.min_x() < a.max_x() {
            return Some(Degeneracy::CollinearOverlap(a_key));
        }
        return None;
    }

    let touches = ends_b
        .iter()
        .any(|&p| is_collinear(a, p) && strictly_inside(a, p.x))
        || ends_a
            .iter()
            .any(|&p| is_collinear(b, p) && strictly_inside(b, p.x));
    if touches {
        Some(Degeneracy::EndpointOnSegment(a_key))
    } else {
        None
    }
}

#[inline]
fn is_collinear<T: GeoFloat>(seg: &Segment<T>, p: Coordinate<T>) -> bool {
    T::Ker::orient2d(seg.left(), seg.right(), p) == Orientation::Collinear
}

#[inline]
fn strictly_inside<T: GeoFloat>(seg: &Segment<T>, x: T) -> bool {
    seg.min_x() < x && x < seg.max_x()
}

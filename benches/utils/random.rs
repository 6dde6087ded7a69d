#![allow(dead_code)]

use geo::{Coordinate, Line, Rect};

use rand::Rng;
use rand_distr::Standard;

/// Bounds used by [`uniform_segments`].
pub const BBOX: [f64; 2] = [1024., 1024.];

#[inline]
pub fn uniform_point<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> Coordinate<f64> {
    let coords: [f64; 2] = rng.sample(Standard);
    let dims = bounds.max() - bounds.min();
    Coordinate {
        x: bounds.min().x + dims.x * coords[0],
        y: bounds.min().y + dims.y * coords[1],
    }
}

/// A random line that can be swept: end points at least `min_dx`
/// apart in `x`, and never at the same `y`.
#[inline]
pub fn uniform_line<R: Rng>(rng: &mut R, bounds: Rect<f64>, min_dx: f64) -> Line<f64> {
    loop {
        let start = uniform_point(rng, bounds);
        let end = uniform_point(rng, bounds);
        if (end.x - start.x).abs() >= min_dx && end.y != start.y {
            return Line::new(start, end);
        }
    }
}

/// Lines of fixed `length` with a random slope, avoiding
/// near-vertical ones.
#[inline]
pub fn uniform_line_with_length<R: Rng>(rng: &mut R, bounds: Rect<f64>, length: f64) -> Line<f64> {
    let start = uniform_point(rng, bounds);
    let angle = rng.gen_range(-1.3..1.3f64);
    let end = Coordinate {
        x: start.x + length * angle.cos(),
        y: start.y + length * angle.sin(),
    };
    if end.y == start.y {
        return uniform_line_with_length(rng, bounds, length);
    }
    Line::new(start, end)
}

/// `n` random well-formed lines in [`BBOX`].
pub fn uniform_segments<R: Rng>(rng: &mut R, n: usize) -> Vec<Line<f64>> {
    let bbox: Rect<f64> = Rect::new([0., 0.], BBOX);
    (0..n).map(|_| uniform_line(rng, bbox, BBOX[0] / 64.)).collect()
}

//! Plane-sweep detection of line segment intersections.
//!
//! This is an implementation of the [Bentley-Ottman] algorithm to
//! compute all crossings of a collection of line segments. A vertical
//! sweep line moves left to right over the input; the segments it
//! currently crosses are kept ordered top to bottom, and only
//! segments that become adjacent in that order are tested for
//! intersection. Each found crossing is queued as a future event,
//! where the two segments swap places.
//!
//! The input is assumed to be in general position: no vertical
//! segments, no shared end points, no end point on another segment,
//! and no collinear overlaps. Per-segment conditions are always
//! checked; the pairwise ones on request (see [`SweepOptions`]).
//!
//! ## Usage
//!
//! Collect the intersections of any iterator of items convertible to
//! a [`Segment`], such as a geo [`Line`]:
//!
//! ```rust
//! use geo::Line;
//! use geo_sweepline::{sweep_intersections, IntersectionSet};
//! let input = vec![
//!     Line::from([(0., 0.), (10., 10.)]),
//!     Line::from([(0., 10.), (10., 0.)]),
//!     Line::from([(0., 3.), (10., 5.)]),
//! ];
//! let found: IntersectionSet<f64> = sweep_intersections(&input).unwrap();
//! // All pairs intersect
//! assert_eq!(found.len(), 3);
//! ```
//!
//! For step-wise consumers (such as visualizations), build a
//! [`Sweep`] and call [`Sweep::step_once`]; the sweep coordinate and
//! the active segments can be read between steps. The
//! [`brute_force_intersections`] oracle computes the same set in
//! quadratic time.
//!
//! [Bentley-Ottman]: //en.wikipedia.org/wiki/Bentley%E2%80%93Ottmann_algorithm
//! [`Line`]: geo::Line
use geo::GeoFloat;
use rstar::RTreeNum;

mod segment;
pub use segment::{check_intersection, Segment};

mod events;
pub use events::{Event, EventKind, EventQueue, EventType};

mod active;
pub use active::ActiveSegments;

mod intersections;
pub use intersections::{Intersection, IntersectionSet};

mod error;
pub use error::{Degeneracy, Error, Result};

mod options;
pub use options::SweepOptions;

mod trace;
pub use trace::{Trace, TraceStep};

mod validate;

pub mod oracle;
pub use oracle::{brute_force_count, brute_force_intersections};

mod sweep;
pub use sweep::{Sweep, SweepState};

/// Scalar types usable by the sweep.
pub trait SweepFloat: GeoFloat + RTreeNum {}
impl<T: GeoFloat + RTreeNum> SweepFloat for T {}

/// Compute all intersections of `iter` with default options.
pub fn sweep_intersections<T, I, S>(iter: I) -> Result<IntersectionSet<T>>
where
    T: SweepFloat,
    I: IntoIterator<Item = S>,
    S: Into<Segment<T>>,
{
    let mut sweep = Sweep::new(iter)?;
    sweep.run()?;
    Ok(sweep.into_intersections())
}

#[cfg(test)]
#[path = "../benches/utils/random.rs"]
pub mod random;

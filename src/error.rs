use std::fmt::{self, Display};

/// Errors surfaced by the sweep and its data-structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An event was requested from an exhausted queue.
    #[error("event queue is empty")]
    EmptyQueue,

    /// An input segment breaks the general-position assumptions of
    /// the sweep.
    #[error("input segment {index} is degenerate: {reason}")]
    DegenerateInput { index: usize, reason: Degeneracy },

    /// The segment is not in the active structure.
    #[error("segment {0} is not active")]
    NotActive(usize),
}

/// Reason an input segment was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// A coordinate is NaN or infinite.
    NonFinite,
    /// Both end points have the same `x`.
    Vertical,
    /// Both end points have the same `y`.
    Horizontal,
    /// Shares an end point with the given segment.
    SharedEndpoint(usize),
    /// An end point lies on the interior of the given segment.
    EndpointOnSegment(usize),
    /// Collinear with, and overlapping, the given segment.
    CollinearOverlap(usize),
}

impl Display for Degeneracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degeneracy::NonFinite => write!(f, "coordinates must be finite"),
            Degeneracy::Vertical => write!(f, "vertical segments are not supported"),
            Degeneracy::Horizontal => write!(f, "end points must have distinct y-coordinates"),
            Degeneracy::SharedEndpoint(other) => {
                write!(f, "shares an end point with segment {}", other)
            }
            Degeneracy::EndpointOnSegment(other) => {
                write!(f, "has an end point on segment {}", other)
            }
            Degeneracy::CollinearOverlap(other) => {
                write!(f, "overlaps collinear segment {}", other)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

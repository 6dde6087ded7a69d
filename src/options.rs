use crate::SweepFloat;

/// Configuration of a single sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepOptions<T: SweepFloat> {
    /// Distance below which two intersection points are reported
    /// once. Defaults to the square root of machine epsilon.
    pub tolerance: T,

    /// Run the O(n²) general-position checks (shared end points,
    /// end points on other segments, collinear overlaps) when the
    /// sweep is built. Per-segment checks always run.
    pub check_general_position: bool,

    /// Keep a [`Trace`](crate::Trace) of every processed event.
    pub record_trace: bool,
}

impl<T: SweepFloat> Default for SweepOptions<T> {
    fn default() -> Self {
        SweepOptions {
            tolerance: T::epsilon().sqrt(),
            check_general_position: false,
            record_trace: false,
        }
    }
}

impl<T: SweepFloat> SweepOptions<T> {
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_general_position_check(mut self, check: bool) -> Self {
        self.check_general_position = check;
        self
    }

    pub fn with_trace(mut self, record: bool) -> Self {
        self.record_trace = record;
        self
    }
}

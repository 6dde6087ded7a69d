use std::fmt::{self, Display};

use crate::{
    events::{Event, EventType},
    intersections::Intersection,
    SweepFloat,
};

/// What happened while processing one event.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceStep<T: SweepFloat> {
    /// The processed event.
    pub event: Event<T>,
    /// Sweep coordinate after the event.
    pub sweep_x: T,
    /// Active segments after the event, top to bottom. Only filled
    /// for single steps and when tracing is enabled.
    pub active: Vec<usize>,
    /// Intersection events queued by this step.
    pub scheduled: Vec<Intersection<T>>,
    /// The intersection added to the result set, if any. `None` for
    /// an intersection event whose point was already reported.
    pub recorded: Option<Intersection<T>>,
}

impl<T: SweepFloat> TraceStep<T> {
    pub(crate) fn new(event: Event<T>) -> Self {
        TraceStep {
            sweep_x: event.x(),
            event,
            active: Vec::new(),
            scheduled: Vec::new(),
            recorded: None,
        }
    }
}

impl<T: SweepFloat> Display for TraceStep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.event.ty() {
            EventType::Enter(key) => write!(f, "x={:?} enter {}", self.sweep_x, key)?,
            EventType::Exit(key) => write!(f, "x={:?} exit {}", self.sweep_x, key)?,
            EventType::Intersection { point, segments } => write!(
                f,
                "x={:?} cross {}/{} at ({:?}, {:?})",
                self.sweep_x, segments.0, segments.1, point.x, point.y
            )?,
        }
        if !self.scheduled.is_empty() {
            write!(f, "; scheduled {}", self.scheduled.len())?;
        }
        Ok(())
    }
}

/// Every step of a sweep, in processing order.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace<T: SweepFloat> {
    pub steps: Vec<TraceStep<T>>,
}

impl<T: SweepFloat> Default for Trace<T> {
    fn default() -> Self {
        Trace { steps: Vec::new() }
    }
}

impl<T: SweepFloat> Trace<T> {
    /// Number of crossing events processed.
    pub fn swap_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.event.ty(), EventType::Intersection { .. }))
            .count()
    }
}

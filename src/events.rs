use std::{cmp::Ordering, collections::VecDeque};

use geo::{Coordinate, GeoFloat};

use crate::error::{Error, Result};

/// A sweep event.
///
/// Events are ordered by `x`, and then by [`EventKind`]. Events that
/// compare equal keep the order in which they were queued.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event<T: GeoFloat> {
    x: T,
    ty: EventType<T>,
}

/// Event payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventType<T: GeoFloat> {
    /// The segment starts at the event `x`.
    Enter(usize),
    /// The pair of segments cross at `point`. The pair is stored
    /// with the smaller key first.
    Intersection {
        point: Coordinate<T>,
        segments: (usize, usize),
    },
    /// The segment ends at the event `x`.
    Exit(usize),
}

/// Tie-break rank of events at the same `x`.
///
/// The ordering of the variants is important for the algorithm:
/// entering segments must be active before crossings at the same `x`
/// are resolved, and exits go last so that the neighbours of a
/// leaving segment get a final adjacency check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    Enter,
    Intersection,
    Exit,
}

impl<T: GeoFloat> Event<T> {
    pub(crate) fn enter(x: T, segment: usize) -> Self {
        Event {
            x,
            ty: EventType::Enter(segment),
        }
    }

    pub(crate) fn exit(x: T, segment: usize) -> Self {
        Event {
            x,
            ty: EventType::Exit(segment),
        }
    }

    pub(crate) fn intersection(point: Coordinate<T>, a: usize, b: usize) -> Self {
        let segments = if a <= b { (a, b) } else { (b, a) };
        Event {
            x: point.x,
            ty: EventType::Intersection { point, segments },
        }
    }

    /// Sweep coordinate of the event.
    #[inline]
    pub fn x(&self) -> T {
        self.x
    }

    #[inline]
    pub fn ty(&self) -> &EventType<T> {
        &self.ty
    }

    pub fn kind(&self) -> EventKind {
        match self.ty {
            EventType::Enter(_) => EventKind::Enter,
            EventType::Intersection { .. } => EventKind::Intersection,
            EventType::Exit(_) => EventKind::Exit,
        }
    }

    /// Queue ordering: by `x` and then by kind.
    ///
    /// Coordinates are validated to be finite before any event is
    /// created, so `x` is always comparable.
    fn queue_cmp(&self, other: &Self) -> Ordering {
        self.x
            .partial_cmp(&other.x)
            .expect("event coordinates must be finite")
            .then_with(|| self.kind().cmp(&other.kind()))
    }
}

/// Events of a sweep, kept sorted by [`Event`] ordering.
#[derive(Debug, Clone)]
pub struct EventQueue<T: GeoFloat> {
    events: VecDeque<Event<T>>,
}

impl<T: GeoFloat> Default for EventQueue<T> {
    fn default() -> Self {
        EventQueue {
            events: VecDeque::new(),
        }
    }
}

impl<T: GeoFloat> EventQueue<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        EventQueue {
            events: VecDeque::with_capacity(capacity),
        }
    }

    /// Insert an event at its sorted position.
    ///
    /// The position is the first queued event that does not belong
    /// before `event`; equal events therefore stay in FIFO order.
    pub fn insert(&mut self, event: Event<T>) {
        let idx = self
            .events
            .partition_point(|queued| queued.queue_cmp(&event) != Ordering::Greater);
        self.events.insert(idx, event);
    }

    /// Remove and return the smallest event.
    pub fn pop_min(&mut self) -> Result<Event<T>> {
        self.events.pop_front().ok_or(Error::EmptyQueue)
    }

    #[inline]
    pub fn peek(&self) -> Option<&Event<T>> {
        self.events.front()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Iterate over the pending events in the order they will be popped.
    pub fn iter(&self) -> impl Iterator<Item = &Event<T>> + '_ {
        self.events.iter()
    }
}

use std::collections::HashSet;

use geo::Coordinate;
use log::{debug, trace, warn};
use smallvec::SmallVec;

use crate::{
    active::{crossing_order, vertical_order, ActiveSegments},
    error::Result,
    events::{Event, EventQueue, EventType},
    intersections::{Intersection, IntersectionSet},
    options::SweepOptions,
    segment::{check_intersection, Segment},
    trace::{Trace, TraceStep},
    validate, SweepFloat,
};

/// Lifecycle of a [`Sweep`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepState {
    /// Built, no event processed yet.
    Idle,
    /// Events are being consumed.
    Running,
    /// The event queue is exhausted.
    Done,
}

/// Plane sweep detecting all crossings of a set of segments.
///
/// Implements the [Bentley-Ottman] sweep: maintains a queue of
/// end-point and crossing events, and the segments currently crossed
/// by the sweep line ordered top to bottom. Only segments that become
/// adjacent in that order are tested for intersection.
///
/// Each `Sweep` owns all of its state; independent sweeps share
/// nothing. Drive it to completion with [`Sweep::run`], or one event
/// at a time with [`Sweep::step_once`] and inspect
/// [`Sweep::current_x`] and [`Sweep::active`] in between.
///
/// [Bentley-Ottman]: //en.wikipedia.org/wiki/Bentley%E2%80%93Ottmann_algorithm
#[derive(Debug)]
pub struct Sweep<T: SweepFloat> {
    segments: Vec<Segment<T>>,
    events: EventQueue<T>,
    active: ActiveSegments,
    current_x: T,
    scheduled: HashSet<(usize, usize)>,
    intersections: IntersectionSet<T>,
    options: SweepOptions<T>,
    state: SweepState,
    trace: Option<Trace<T>>,
}

impl<T: SweepFloat> Sweep<T> {
    /// Build a sweep over `iter` with default options.
    pub fn new<I, S>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Segment<T>>,
    {
        Self::with_options(iter, SweepOptions::default())
    }

    /// Build a sweep over `iter`.
    ///
    /// Validates the input, and queues one enter and one exit event
    /// per segment. Segment keys are the positions in `iter`.
    pub fn with_options<I, S>(iter: I, options: SweepOptions<T>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Segment<T>>,
    {
        let segments: Vec<Segment<T>> = iter.into_iter().map(Into::into).collect();
        for (index, seg) in segments.iter().enumerate() {
            validate::check_segment(index, seg)?;
        }
        if options.check_general_position {
            validate::check_general_position(&segments)?;
        }

        let mut events = EventQueue::with_capacity(2 * segments.len());
        for (key, seg) in segments.iter().enumerate() {
            events.insert(Event::enter(seg.min_x(), key));
            events.insert(Event::exit(seg.max_x(), key));
        }
        debug!("initialized sweep with {} segments", segments.len());

        let state = if events.is_empty() {
            SweepState::Done
        } else {
            SweepState::Idle
        };
        Ok(Sweep {
            segments,
            events,
            active: ActiveSegments::new(),
            current_x: T::neg_infinity(),
            scheduled: HashSet::new(),
            intersections: IntersectionSet::new(options.tolerance),
            trace: options.record_trace.then(Trace::default),
            options,
            state,
        })
    }

    /// Process events until the queue is empty.
    pub fn run(&mut self) -> Result<&IntersectionSet<T>> {
        let snapshot = self.options.record_trace;
        while !self.events.is_empty() {
            self.advance(snapshot)?;
        }
        Ok(&self.intersections)
    }

    /// Process one event, if any is left.
    ///
    /// Returns `Ok(None)` once the sweep is done.
    pub fn step_once(&mut self) -> Result<Option<TraceStep<T>>> {
        if self.events.is_empty() {
            return Ok(None);
        }
        self.advance(true).map(Some)
    }

    /// Process the next event.
    ///
    /// Unlike [`Sweep::step_once`], fails with
    /// [`Error::EmptyQueue`](crate::Error::EmptyQueue) if the sweep is
    /// already done.
    pub fn process_next_event(&mut self) -> Result<TraceStep<T>> {
        self.advance(true)
    }

    fn advance(&mut self, snapshot: bool) -> Result<TraceStep<T>> {
        let event = self.events.pop_min()?;
        self.state = SweepState::Running;
        debug_assert!(event.x() >= self.current_x, "sweep moved backwards");
        self.current_x = event.x();

        let mut step = TraceStep::new(event);
        trace!("handling event: {:?}", event);
        match *event.ty() {
            EventType::Enter(key) => self.handle_enter(key, &mut step)?,
            EventType::Exit(key) => self.handle_exit(key, &mut step)?,
            EventType::Intersection { point, segments } => {
                self.handle_intersection(point, segments, &mut step)?
            }
        }

        if self.events.is_empty() {
            debug!("sweep done: {} intersections", self.intersections.len());
            self.state = SweepState::Done;
        }
        if snapshot {
            step.active = self.active.as_slice().to_vec();
        }
        if let Some(trace) = &mut self.trace {
            trace.steps.push(step.clone());
        }
        Ok(step)
    }

    fn handle_enter(&mut self, key: usize, step: &mut TraceStep<T>) -> Result<()> {
        let segments = &self.segments;
        let x = self.current_x;
        self.active
            .insert_ordered(key, |a, b| vertical_order(segments, x, a, b));

        let (above, below) = self.active.neighbors(key)?;
        for adj_key in above.into_iter().chain(below) {
            self.check_pair(key, adj_key, step);
        }
        Ok(())
    }

    fn handle_exit(&mut self, key: usize, step: &mut TraceStep<T>) -> Result<()> {
        // The neighbours become adjacent once `key` is removed.
        if let (Some(above), Some(below)) = self.active.neighbors(key)? {
            self.check_pair(above, below, step);
        }
        self.active.remove(key)?;
        Ok(())
    }

    /// Resolve a crossing of `a` and `b` at `point`.
    ///
    /// Every active segment passing through `point` (within the
    /// tolerance) crosses there too, so the whole run is re-sorted in
    /// its order right of the point, and only the ends of the run are
    /// checked against their outer neighbours. The remaining crossing
    /// events at the same point find the run already sorted.
    fn handle_intersection(
        &mut self,
        point: Coordinate<T>,
        (a, b): (usize, usize),
        step: &mut TraceStep<T>,
    ) -> Result<()> {
        let record = Intersection::new(point, a, b);
        if self.intersections.insert(record) {
            debug!("recorded intersection of {} and {} at {:?}", a, b, point);
            step.recorded = Some(record);
        } else {
            debug!("intersection of {} and {} at {:?} already recorded", a, b, point);
        }

        let segments = &self.segments;
        let x = self.current_x;
        let tolerance = self.options.tolerance;
        let through = |key: usize| (segments[key].y_at(x) - point.y).abs() <= tolerance;
        let run = self
            .active
            .reorder_run(a, b, through, |p, q| crossing_order(segments, p, q))?;
        let keys = &self.active.as_slice()[run];
        if !keys.iter().all(|&key| through(key)) {
            warn!(
                "segments between crossing pair {} and {} miss the crossing at {:?}",
                a, b, point
            );
        }
        trace!("crossing at {:?} reordered run {:?}", point, keys);

        let (upper, lower) = (keys[0], keys[keys.len() - 1]);
        let mut pairs: SmallVec<[(usize, usize); 2]> = SmallVec::new();
        if let (Some(above), _) = self.active.neighbors(upper)? {
            pairs.push((upper, above));
        }
        if let (_, Some(below)) = self.active.neighbors(lower)? {
            pairs.push((lower, below));
        }
        for (key, adj_key) in pairs {
            self.check_pair(key, adj_key, step);
        }
        Ok(())
    }

    /// Queue the crossing of segments `a` and `b`, if it lies ahead of
    /// the sweep and the pair isn't queued yet.
    fn check_pair(&mut self, a: usize, b: usize, step: &mut TraceStep<T>) {
        let pair = if a <= b { (a, b) } else { (b, a) };
        if self.scheduled.contains(&pair) {
            return;
        }
        let point = match check_intersection(&self.segments[a], &self.segments[b]) {
            Some(pt) => pt,
            None => return,
        };
        if point.x <= self.current_x {
            trace!(
                "ignoring crossing of {} and {} behind the sweep at {:?}",
                a,
                b,
                point
            );
            return;
        }

        debug!("scheduling crossing of {} and {} at {:?}", a, b, point);
        self.scheduled.insert(pair);
        self.events.insert(Event::intersection(point, a, b));
        step.scheduled.push(Intersection::new(point, a, b));
    }

    #[inline]
    pub fn state(&self) -> SweepState {
        self.state
    }

    /// The `x` of the last processed event (negative infinity before
    /// the first step).
    #[inline]
    pub fn current_x(&self) -> T {
        self.current_x
    }

    /// Active segment keys, top to bottom.
    #[inline]
    pub fn active(&self) -> &[usize] {
        self.active.as_slice()
    }

    /// Intersections found so far.
    #[inline]
    pub fn intersections(&self) -> &IntersectionSet<T> {
        &self.intersections
    }

    pub fn into_intersections(self) -> IntersectionSet<T> {
        self.intersections
    }

    #[inline]
    pub fn events(&self) -> &EventQueue<T> {
        &self.events
    }

    #[inline]
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// The (normalized) input segments, indexed by key.
    #[inline]
    pub fn segments(&self) -> &[Segment<T>] {
        &self.segments
    }

    #[inline]
    pub fn options(&self) -> &SweepOptions<T> {
        &self.options
    }

    /// Steps processed so far, if tracing was enabled.
    #[inline]
    pub fn trace(&self) -> Option<&Trace<T>> {
        self.trace.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use approx::assert_relative_eq;
    use geo::{Line, MultiLineString};
    use rand::{rngs::StdRng, SeedableRng};
    use wkt::TryFromWkt;

    use super::*;
    use crate::{
        error::{Degeneracy, Error as SweepError},
        oracle::brute_force_intersections,
        random::uniform_segments,
        tests::init_log,
    };

    fn lines_from_wkt(wkt: &str) -> std::result::Result<Vec<Line<f64>>, Box<dyn Error>> {
        let mls = MultiLineString::<f64>::try_from_wkt_str(wkt)?;
        Ok(mls.0.iter().flat_map(|ls| ls.lines()).collect())
    }

    /// Run a sweep step by step, checking the queue and active order
    /// invariants along the way, and compare with the oracle.
    fn check_sweep(lines: &[Line<f64>]) -> std::result::Result<Sweep<f64>, Box<dyn Error>> {
        init_log();
        let options = SweepOptions::default().with_trace(true);
        let mut sweep = Sweep::<f64>::with_options(lines, options)?;
        assert_eq!(sweep.state(), SweepState::Idle);
        assert_eq!(sweep.pending_events(), 2 * lines.len());

        loop {
            let before = sweep.pending_events();
            let step = match sweep.step_once()? {
                Some(step) => step,
                None => break,
            };
            assert_eq!(sweep.pending_events(), before - 1 + step.scheduled.len());
            assert_eq!(sweep.active(), step.active.as_slice());

            if let Some(next) = sweep.events().peek() {
                assert_ne!(sweep.state(), SweepState::Done);
                if next.x() > sweep.current_x() {
                    let mid = (next.x() + sweep.current_x()) / 2.;
                    assert!(
                        sweep.active.is_sorted_at(sweep.segments(), mid),
                        "active segments out of order after step: {}",
                        step
                    );
                }
            }
        }
        assert_eq!(sweep.state(), SweepState::Done);
        assert!(sweep.active().is_empty());

        let oracle = brute_force_intersections(sweep.segments(), sweep.options().tolerance);
        assert!(
            sweep.intersections().matches(&oracle),
            "sweep found {} intersections, brute-force found {}",
            sweep.intersections().len(),
            oracle.len()
        );
        Ok(sweep)
    }

    #[test]
    fn test_single_crossing() -> std::result::Result<(), Box<dyn Error>> {
        let lines = lines_from_wkt("MULTILINESTRING((0 0,10 10),(0 10,10 0))")?;
        let sweep = check_sweep(&lines)?;

        let found: Vec<_> = sweep.intersections().iter().collect();
        assert_eq!(found.len(), 1);
        assert_relative_eq!(found[0].point.x, 5.);
        assert_relative_eq!(found[0].point.y, 5.);
        assert_eq!(found[0].segments, (0, 1));
        Ok(())
    }

    #[test]
    fn test_no_crossings() -> std::result::Result<(), Box<dyn Error>> {
        let lines = lines_from_wkt("MULTILINESTRING((0 0,10 1),(1 5,9 7),(2 10,8 13))")?;
        let sweep = check_sweep(&lines)?;
        assert!(sweep.intersections().is_empty());
        assert_eq!(sweep.trace().map(Trace::swap_count), Some(0));
        Ok(())
    }

    #[test]
    fn test_three_crossings() -> std::result::Result<(), Box<dyn Error>> {
        let lines = lines_from_wkt("MULTILINESTRING((0 0,10 10),(0 10,10 0),(0 3,10 5))")?;
        let sweep = check_sweep(&lines)?;
        assert_eq!(sweep.intersections().len(), 3);

        let trace = sweep.trace().unwrap();
        assert_eq!(trace.steps.len(), 2 * lines.len() + 3);
        assert_eq!(trace.swap_count(), 3);

        // Order after every crossing, top to bottom.
        let orders: Vec<_> = trace
            .steps
            .iter()
            .filter(|s| s.recorded.is_some())
            .map(|s| s.active.clone())
            .collect();
        assert_eq!(orders, vec![vec![1, 0, 2], vec![0, 1, 2], vec![0, 2, 1]]);
        Ok(())
    }

    #[test]
    fn test_concurrent_crossings() -> std::result::Result<(), Box<dyn Error>> {
        // 0, 1 and 2 all pass through (5, 5); 3 crosses each of them
        // further right.
        let lines = lines_from_wkt(
            "MULTILINESTRING((0 0,10 10),(0 10,10 0),(0 2.5,10 7.5),(6 9,9 0.5))",
        )?;
        let sweep = check_sweep(&lines)?;
        assert_eq!(sweep.intersections().len(), 4);

        let at_center: Vec<_> = sweep
            .intersections()
            .points()
            .filter(|pt| pt.x == 5. && pt.y == 5.)
            .collect();
        assert_eq!(at_center.len(), 1);

        // Every event at the shared point leaves the run fully crossed.
        let trace = sweep.trace().unwrap();
        let orders: Vec<_> = trace
            .steps
            .iter()
            .filter(|s| s.event.x() == 5.)
            .map(|s| s.active.clone())
            .collect();
        assert_eq!(orders.len(), 3);
        assert!(orders.iter().all(|order| order == &[0, 2, 1]));
        Ok(())
    }

    #[test]
    fn test_end_point_on_crossing_x() -> std::result::Result<(), Box<dyn Error>> {
        // Supporting lines of 0 and 1 meet at (5, 5), the right end of 0.
        let lines = lines_from_wkt("MULTILINESTRING((0 0,5 5),(0 10,10 0))")?;
        let sweep = check_sweep(&lines)?;
        assert!(sweep.intersections().is_empty());

        // Segment 2 starts at the x of the 0/1 crossing.
        let lines = lines_from_wkt("MULTILINESTRING((0 0,10 10),(0 10,10 0),(5 1,9 2))")?;
        let sweep = check_sweep(&lines)?;
        assert_eq!(sweep.intersections().len(), 2);
        let pts: Vec<_> = sweep.intersections().points().collect();
        assert_relative_eq!(pts[0].x, 5.);
        assert_relative_eq!(pts[1].x, 8.2, epsilon = 1e-9);
        assert_relative_eq!(pts[1].y, 1.8, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_step_once() -> std::result::Result<(), Box<dyn Error>> {
        init_log();
        let mut sweep = Sweep::<f64>::new(vec![
            Line::from([(0., 0.), (10., 10.)]),
            Line::from([(10., 0.), (0., 10.)]),
        ])?;
        assert!(sweep.current_x().is_infinite());

        let step = sweep.step_once()?.unwrap();
        assert_eq!(step.event, Event::enter(0., 0));
        assert_eq!(sweep.state(), SweepState::Running);
        assert_eq!(sweep.active(), &[0]);

        let step = sweep.step_once()?.unwrap();
        assert_eq!(step.event, Event::enter(0., 1));
        assert_eq!(step.active, vec![1, 0]);
        assert_eq!(step.scheduled.len(), 1);
        assert_eq!(sweep.pending_events(), 3);

        let step = sweep.step_once()?.unwrap();
        assert!(step.recorded.is_some());
        assert_eq!(sweep.current_x(), 5.);
        assert_eq!(sweep.active(), &[0, 1]);

        assert!(sweep.step_once()?.is_some());
        assert!(sweep.step_once()?.is_some());
        assert_eq!(sweep.state(), SweepState::Done);
        assert_eq!(sweep.step_once()?, None);
        assert_eq!(sweep.process_next_event(), Err(SweepError::EmptyQueue));
        Ok(())
    }

    #[test]
    fn test_empty_input() -> std::result::Result<(), Box<dyn Error>> {
        let mut sweep = Sweep::<f64>::new(Vec::<Line<f64>>::new())?;
        assert_eq!(sweep.state(), SweepState::Done);
        assert!(sweep.run()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_degenerate_input() {
        let res = Sweep::<f64>::new(vec![
            Line::from([(0., 0.), (10., 10.)]),
            Line::from([(3., 0.), (3., 10.)]),
        ]);
        assert_eq!(
            res.err(),
            Some(SweepError::DegenerateInput {
                index: 1,
                reason: Degeneracy::Vertical
            })
        );

        // End point touching another segment is only rejected on request.
        let lines = vec![
            Line::from([(0., 0.), (5., 5.)]),
            Line::from([(0., 10.), (10., 0.)]),
        ];
        assert!(Sweep::<f64>::new(lines.iter()).is_ok());
        let res = Sweep::<f64>::with_options(
            lines.iter(),
            SweepOptions::default().with_general_position_check(true),
        );
        assert_eq!(
            res.err(),
            Some(SweepError::DegenerateInput {
                index: 1,
                reason: Degeneracy::EndpointOnSegment(0)
            })
        );
    }

    #[test]
    fn test_random() -> std::result::Result<(), Box<dyn Error>> {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for &num_lines in [2, 8, 32, 64].iter() {
            let lines = uniform_segments(&mut rng, num_lines);
            let sweep = check_sweep(&lines)?;
            log::info!(
                "{} random lines: {} intersections",
                num_lines,
                sweep.intersections().len()
            );
        }
        Ok(())
    }

    #[test]
    fn test_run_matches_steps() -> std::result::Result<(), Box<dyn Error>> {
        let mut rng = StdRng::seed_from_u64(42);
        let lines = uniform_segments(&mut rng, 24);

        let mut sweep = Sweep::<f64>::new(&lines)?;
        let count = sweep.run()?.len();
        assert!(sweep.trace().is_none());
        assert_eq!(sweep.state(), SweepState::Done);

        let stepped = check_sweep(&lines)?;
        assert_eq!(stepped.intersections().len(), count);
        Ok(())
    }
}

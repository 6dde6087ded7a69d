#![allow(dead_code)]

use geo::Line;
use geo_sweepline::{
    brute_force_intersections, sweep_intersections, IntersectionSet, Segment, SweepOptions,
};

pub fn count_sweep(lines: &[Line<f64>]) -> usize {
    let found: IntersectionSet<f64> =
        sweep_intersections(lines).expect("random lines should be well-formed");
    found.len()
}

pub fn count_brute(lines: &[Line<f64>]) -> usize {
    let segments: Vec<Segment<f64>> = lines.iter().map(Segment::from).collect();
    brute_force_intersections(&segments, SweepOptions::<f64>::default().tolerance).len()
}

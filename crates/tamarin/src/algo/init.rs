use crate::algo::Variant;
use crate::algo::crossing::crossing_reduced_order;
use crate::algo::radial::RadialAnnotation;
use crate::config::Frame;
use crate::coords::Coordinates;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::rng::XorShift64Star;
use std::f64::consts::PI;

/// Fraction of the shorter frame side used as the radius of circular seedings.
const CIRCLE_RADIUS_FACTOR: f64 = 0.38;

/// How the coordinate store is seeded before the first iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initializer {
    /// Uniform in `[0, width) x [0, height)`.
    Random { seed: u64 },
    /// Vertex `v` in slot `v` of the circle.
    CircularOriginal,
    /// Circle slots filled by uniform draws without replacement.
    CircularRandom { seed: u64 },
    /// Circle slots in the order produced by [`crossing_reduced_order`].
    CircularCrossingReduced,
    /// Level-0 vertices at the centre, level-r vertices evenly spread on a circle of radius
    /// `r * ring_radial_distance`. Only valid with [`Variant::Radial`].
    Rings,
}

impl Initializer {
    pub fn name(&self) -> &'static str {
        match self {
            Initializer::Random { .. } => "random",
            Initializer::CircularOriginal => "circular-original",
            Initializer::CircularRandom { .. } => "circular-random",
            Initializer::CircularCrossingReduced => "circular-crossing-reduced",
            Initializer::Rings => "rings",
        }
    }
}

pub(crate) fn seed_positions(
    initializer: Initializer,
    graph: &Graph,
    frame: &Frame,
    variant: &Variant,
    coords: &mut Coordinates,
) -> Result<()> {
    match initializer {
        Initializer::Random { seed } => random(coords, frame, seed),
        Initializer::CircularOriginal => {
            let order: Vec<usize> = (0..coords.len()).collect();
            circular(coords, frame, &order);
        }
        Initializer::CircularRandom { seed } => {
            let order = random_circular_order(coords.len(), seed);
            circular(coords, frame, &order);
        }
        Initializer::CircularCrossingReduced => {
            let order = crossing_reduced_order(graph)?;
            circular(coords, frame, &order);
        }
        Initializer::Rings => {
            let Variant::Radial(annotation) = variant else {
                return Err(Error::invalid_levels(format!(
                    "ring seeding needs a radial annotation, the {} variant has none",
                    variant.name()
                )));
            };
            rings(coords, frame, annotation);
        }
    }
    Ok(())
}

pub(crate) fn random(coords: &mut Coordinates, frame: &Frame, seed: u64) {
    let mut rng = XorShift64Star::new(seed);
    for v in 0..coords.len() {
        let x = rng.next_f64_below(frame.width);
        let y = rng.next_f64_below(frame.height);
        coords.set(v, x, y);
    }
}

/// Places `order[slot]` at angle `pi - slot * 2pi / n` on the frame's inscribed circle.
pub(crate) fn circular(coords: &mut Coordinates, frame: &Frame, order: &[usize]) {
    let n = order.len();
    if n == 0 {
        return;
    }
    let (cx, cy) = frame.centre();
    let r = CIRCLE_RADIUS_FACTOR * frame.width.min(frame.height);
    let step = 2.0 * PI / (n as f64);
    for (slot, &v) in order.iter().enumerate() {
        let fi = PI - (slot as f64) * step;
        coords.set(v, r * fi.cos() + cx, r * fi.sin() + cy);
    }
}

pub(crate) fn random_circular_order(n: usize, seed: u64) -> Vec<usize> {
    let mut rng = XorShift64Star::new(seed);
    let mut remaining: Vec<usize> = (0..n).collect();
    let mut order = Vec::with_capacity(n);
    while !remaining.is_empty() {
        let idx = rng.next_usize(remaining.len());
        order.push(remaining.remove(idx));
    }
    order
}

pub(crate) fn rings(coords: &mut Coordinates, frame: &Frame, annotation: &RadialAnnotation) {
    let (cx, cy) = frame.centre();
    let spacing = annotation.ring_radial_distance();
    let mut members: Vec<Vec<usize>> = vec![Vec::new(); annotation.num_rings()];
    for (v, &level) in annotation.levels().iter().enumerate() {
        members[level].push(v);
    }
    for (level, ring) in members.iter().enumerate() {
        let radius = (level as f64) * spacing;
        let step = 2.0 * PI / (ring.len().max(1) as f64);
        for (slot, &v) in ring.iter().enumerate() {
            let fi = (slot as f64) * step;
            coords.set(v, radius * fi.cos() + cx, radius * fi.sin() + cy);
        }
    }
}

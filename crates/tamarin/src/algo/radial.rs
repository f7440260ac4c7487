//! Ring annotations for the radial and smooth variants.

use crate::config::Frame;
use crate::coords::Coordinates;
use crate::error::{Error, Result};
use crate::graph::Graph;
use std::f64::consts::PI;

/// Ring membership plus the per-ring ideal edge lengths derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialAnnotation {
    levels: Vec<usize>,
    num_rings: usize,
    ring_radial_distance: f64,
    /// `num_rings + 1` entries: one chord length per ring, then the inter-ring length.
    ideal_edge: Vec<f64>,
}

impl RadialAnnotation {
    /// `level[v] < num_rings` must hold for every vertex.
    pub fn new(levels: Vec<usize>, num_rings: usize, ring_radial_distance: f64) -> Result<Self> {
        if levels.is_empty() {
            return Err(Error::invalid_levels("no levels given"));
        }
        if let Some((v, &level)) = levels.iter().enumerate().find(|(_, l)| **l >= num_rings) {
            return Err(Error::invalid_levels(format!(
                "vertex {v} has level {level}, but there are only {num_rings} rings"
            )));
        }
        if !(ring_radial_distance.is_finite() && ring_radial_distance > 0.0) {
            return Err(Error::invalid_schedule(format!(
                "ring radial distance must be positive, got {ring_radial_distance}"
            )));
        }
        let ideal_edge = ring_ideal_lengths(&levels, num_rings, ring_radial_distance);
        Ok(Self {
            levels,
            num_rings,
            ring_radial_distance,
            ideal_edge,
        })
    }

    /// Like [`RadialAnnotation::new`] with `num_rings = max(level) + 1`.
    pub fn from_levels(levels: Vec<usize>, ring_radial_distance: f64) -> Result<Self> {
        let num_rings = levels.iter().max().map_or(0, |m| m + 1);
        Self::new(levels, num_rings, ring_radial_distance)
    }

    /// Rings by hop distance from `centre`; see [`bfs_ring_levels`].
    pub fn from_centre(
        graph: &Graph,
        centre: usize,
        max_rings: usize,
        ring_radial_distance: f64,
    ) -> Result<Self> {
        let levels = bfs_ring_levels(graph, centre, max_rings)?;
        Self::from_levels(levels, ring_radial_distance)
    }

    pub fn levels(&self) -> &[usize] {
        &self.levels
    }

    pub fn num_rings(&self) -> usize {
        self.num_rings
    }

    pub fn ring_radial_distance(&self) -> f64 {
        self.ring_radial_distance
    }

    pub fn ideal_edge(&self) -> &[f64] {
        &self.ideal_edge
    }

    /// Ideal length between `a` and `b`. Rings without a usable chord length (the centre, empty
    /// rings) fall back to `base_k`.
    pub(crate) fn pair_length(&self, a: usize, b: usize, base_k: f64) -> f64 {
        let (la, lb) = (self.levels[a], self.levels[b]);
        if la != lb {
            return self.ideal_edge[self.num_rings];
        }
        let k = self.ideal_edge[la];
        if k > 0.0 { k } else { base_k }
    }
}

/// Undirected BFS depth from `centre`, clamped to `max_rings - 1`. Vertices the BFS never reaches
/// land on the outermost ring.
pub fn bfs_ring_levels(graph: &Graph, centre: usize, max_rings: usize) -> Result<Vec<usize>> {
    if max_rings == 0 {
        return Err(Error::invalid_levels("at least one ring is required"));
    }
    if centre >= graph.vertex_count {
        return Err(Error::invalid_levels(format!(
            "centre {centre} is not a vertex of a {}-vertex graph",
            graph.vertex_count
        )));
    }
    let outer = max_rings - 1;
    Ok(graph
        .bfs_levels(centre)
        .into_iter()
        .map(|l| l.map_or(outer, |l| l.min(outer)))
        .collect())
}

fn ring_ideal_lengths(levels: &[usize], num_rings: usize, ring_radial_distance: f64) -> Vec<f64> {
    let mut population = vec![0usize; num_rings];
    for &level in levels {
        population[level] += 1;
    }
    let mut ideal: Vec<f64> = population
        .iter()
        .enumerate()
        .map(|(ring, &count)| {
            if count == 0 {
                return -1.0;
            }
            2.0 * (ring as f64) * ring_radial_distance * (PI / (count as f64)).sin()
        })
        .collect();
    ideal.push(ring_radial_distance);
    ideal
}

/// Scratch for the ring correction, sized once per run.
#[derive(Debug, Clone)]
pub(crate) struct RingBounds {
    // Squared radii while scanning, radial scale factors afterwards.
    level_min: Vec<f64>,
    level_max: Vec<f64>,
}

impl RingBounds {
    pub(crate) fn new(num_rings: usize) -> Self {
        Self {
            level_min: vec![f64::INFINITY; num_rings],
            level_max: vec![0.0; num_rings],
        }
    }

    /// Snaps level-0 vertices to the centre and rescales stragglers of every other ring towards
    /// its annulus, keeping their polar angle.
    pub(crate) fn apply(
        &mut self,
        annotation: &RadialAnnotation,
        coords: &mut Coordinates,
        frame: &Frame,
    ) {
        let (cx, cy) = frame.centre();
        let spacing = annotation.ring_radial_distance;
        let levels = annotation.levels();

        self.level_min.fill(f64::INFINITY);
        self.level_max.fill(0.0);
        for (v, &level) in levels.iter().enumerate() {
            let (x, y) = coords.point(v);
            let d2 = (x - cx) * (x - cx) + (y - cy) * (y - cy);
            if d2 < self.level_min[level] {
                self.level_min[level] = d2;
            }
            if d2 > self.level_max[level] {
                self.level_max[level] = d2;
            }
        }
        for ring in 1..annotation.num_rings {
            let r = ring as f64;
            self.level_min[ring] = (r - 1.0) * spacing / self.level_min[ring].sqrt();
            self.level_max[ring] = r * spacing / self.level_max[ring].sqrt();
        }

        for (v, &level) in levels.iter().enumerate() {
            if level == 0 {
                coords.set(v, cx, cy);
                continue;
            }
            let (x, y) = coords.point(v);
            let (ox, oy) = (x - cx, y - cy);
            let distance = (ox * ox + oy * oy).sqrt();
            let l = level as f64;

            let factor = if distance > l * spacing - spacing / 2.0 {
                Some(self.level_max[level]).filter(|f| *f < 1.0)
            } else if distance < (l - 1.0) * spacing + spacing / 2.0 {
                Some(self.level_min[level]).filter(|f| *f > 1.0)
            } else {
                None
            };
            // A vertex on the centre has no angle to keep; a ring with such a vertex has an
            // infinite inner factor.
            let Some(factor) = factor.filter(|f| f.is_finite()) else {
                continue;
            };
            if distance == 0.0 {
                continue;
            }
            let fi = polar_angle(ox, oy);
            coords.set(
                v,
                factor * distance * fi.cos() + cx,
                factor * distance * fi.sin() + cy,
            );
        }
    }
}

/// Four-quadrant angle of the offset `(x, y)`, `+-pi/2` on the vertical axis.
fn polar_angle(x: f64, y: f64) -> f64 {
    y.atan2(x)
}

/// Ring membership with three explicit ideal lengths, for [`crate::Variant::Smooth`].
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothRings {
    levels: Vec<usize>,
    pub centre_edge: f64,
    pub ring_edge: f64,
    pub cross_edge: f64,
}

impl SmoothRings {
    /// `lengths` is `[centre_edge, ring_edge, cross_edge]`.
    pub fn new(levels: Vec<usize>, lengths: [f64; 3]) -> Result<Self> {
        if levels.is_empty() {
            return Err(Error::invalid_levels("no levels given"));
        }
        if let Some(bad) = lengths.iter().find(|k| !(k.is_finite() && **k > 0.0)) {
            return Err(Error::invalid_levels(format!(
                "smooth ideal lengths must be positive, got {bad}"
            )));
        }
        let [centre_edge, ring_edge, cross_edge] = lengths;
        Ok(Self {
            levels,
            centre_edge,
            ring_edge,
            cross_edge,
        })
    }

    pub fn levels(&self) -> &[usize] {
        &self.levels
    }

    pub(crate) fn pair_length(&self, a: usize, b: usize) -> f64 {
        match (self.levels[a], self.levels[b]) {
            (0, 0) => self.centre_edge,
            (la, lb) if la == lb => self.ring_edge,
            _ => self.cross_edge,
        }
    }
}

//! One Fruchterman-Reingold iteration.
//!
//! Order inside an iteration is fixed: clear displacement, repulsion over unordered pairs in index
//! order, attraction over edges in edge-list order, then clip-and-apply in vertex order. Changing
//! it changes the floating-point result.

use crate::algo::Variant;
use crate::config::Frame;
use crate::coords::{Coordinates, Displacement};
use crate::graph::Graph;

#[derive(Debug, Clone, Copy)]
pub(crate) struct ForceEngine {
    /// Base ideal length `sqrt(area / n)`.
    k: f64,
    /// Squared repulsion cutoff `(2k)^2`.
    cutoff_sq: f64,
    weighted: bool,
}

impl ForceEngine {
    pub(crate) fn new(frame: &Frame, vertex_count: usize, weighted: bool) -> Self {
        let k2 = frame.area() / (vertex_count.max(1) as f64);
        Self {
            k: k2.sqrt(),
            cutoff_sq: 4.0 * k2,
            weighted,
        }
    }

    pub(crate) fn ideal_length(&self) -> f64 {
        self.k
    }

    /// Ideal length and squared repulsion cutoff for the pair `(a, b)`.
    fn pair(&self, variant: &Variant, a: usize, b: usize) -> (f64, f64) {
        match variant {
            Variant::Plain => (self.k, self.cutoff_sq),
            // The radial model keeps the global cutoff.
            Variant::Radial(annotation) => (annotation.pair_length(a, b, self.k), self.cutoff_sq),
            Variant::Smooth(rings) => {
                let k = rings.pair_length(a, b);
                (k, 4.0 * k * k)
            }
        }
    }

    /// Moves every vertex by its clipped displacement. Cooling and ring correction are the
    /// caller's business.
    pub(crate) fn step(
        &self,
        variant: &Variant,
        graph: &Graph,
        coords: &mut Coordinates,
        disp: &mut Displacement,
        temperature: f64,
    ) {
        disp.clear();
        self.repulse(variant, coords, disp);
        self.attract(variant, graph, coords, disp);
        limit_displacement(coords, disp, temperature);
    }

    fn repulse(&self, variant: &Variant, coords: &Coordinates, disp: &mut Displacement) {
        let (xs, ys) = (coords.xs(), coords.ys());
        let n = xs.len();
        for v in 0..n {
            for u in (v + 1)..n {
                let (k, cutoff_sq) = self.pair(variant, v, u);
                let dx = xs[v] - xs[u];
                let dy = ys[v] - ys[u];
                let mut d2 = dx * dx + dy * dy;
                if d2 >= cutoff_sq {
                    continue;
                }
                // Coincident vertices: substitute 1, not an epsilon.
                if d2 == 0.0 {
                    d2 = 1.0;
                }
                let k2 = k * k;
                disp.push_apart(v, u, dx * k2 / d2, dy * k2 / d2);
            }
        }
    }

    fn attract(
        &self,
        variant: &Variant,
        graph: &Graph,
        coords: &Coordinates,
        disp: &mut Displacement,
    ) {
        for e in &graph.edges {
            let (k, _) = self.pair(variant, e.u, e.v);
            let (ux, uy) = coords.point(e.u);
            let (vx, vy) = coords.point(e.v);
            let dx = ux - vx;
            let dy = uy - vy;
            let d = (dx * dx + dy * dy).sqrt();
            let f = if self.weighted {
                d * e.weight / k
            } else {
                d / k
            };
            // Componentwise scaling by `d / k` makes the pull grow with d^2.
            disp.push_apart(e.u, e.v, -dx * f, -dy * f);
        }
    }
}

/// Applies `disp` with each component capped at `temperature`, then scaled by the displacement
/// magnitude. The cap is per component, not on the vector length.
fn limit_displacement(coords: &mut Coordinates, disp: &Displacement, temperature: f64) {
    let (xs, ys) = coords.rows_mut();
    for v in 0..xs.len() {
        let (dx, dy) = (disp.dx[v], disp.dy[v]);
        let mut d = (dx * dx + dy * dy).sqrt();
        if d == 0.0 {
            d = 1.0;
        }
        xs[v] += dx * dx.abs().min(temperature) / d;
        ys[v] += dy * dy.abs().min(temperature) / d;
    }
}

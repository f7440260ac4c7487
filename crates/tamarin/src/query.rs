//! Read-only queries over a finished (or in-progress) layout.

use crate::coords::Coordinates;

/// The vertex closest to `(x, y)` and its Euclidean distance. Ties go to the lowest index.
pub fn nearest_vertex(coords: &Coordinates, x: f64, y: f64) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    let mut best_d2 = f64::INFINITY;
    for v in 0..coords.len() {
        let (vx, vy) = coords.point(v);
        let d2 = (vx - x) * (vx - x) + (vy - y) * (vy - y);
        if d2 < best_d2 || best.is_none() {
            best_d2 = d2;
            best = Some((v, d2));
        }
    }
    best.map(|(v, d2)| (v, d2.sqrt()))
}

/// `(squared distance, index)` to `(x, y)` for every vertex, in index order.
pub fn vertex_distances(coords: &Coordinates, x: f64, y: f64) -> Vec<(f64, usize)> {
    (0..coords.len())
        .map(|v| {
            let (vx, vy) = coords.point(v);
            ((vx - x) * (vx - x) + (vy - y) * (vy - y), v)
        })
        .collect()
}

/// Vertices inside the rectangle spanned by the two corners, bounds inclusive, in index order.
pub fn vertices_in_rect(coords: &Coordinates, x1: f64, y1: f64, x2: f64, y2: f64) -> Vec<usize> {
    let (lx, hx) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
    let (ly, hy) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
    (0..coords.len())
        .filter(|&v| {
            let (vx, vy) = coords.point(v);
            lx <= vx && vx <= hx && ly <= vy && vy <= hy
        })
        .collect()
}

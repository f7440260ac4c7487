//! Circular vertex orders with few chord crossings.
//!
//! The order is built in two phases: a greedy placement that grows a deque from both ends, then a
//! fixed number of circular sifting passes that move single vertices forward past neighbours they
//! cross too often.

use crate::error::Result;
use crate::graph::{Graph, NeighbourSet};
use rustc_hash::FxHashSet;
use std::cmp::Reverse;
use std::collections::VecDeque;

const SIFTING_PASSES: usize = 5;

/// Circular order (slot -> vertex) for the crossing-reduced circular seeding.
pub fn crossing_reduced_order(graph: &Graph) -> Result<Vec<usize>> {
    graph.validate()?;
    let neighbours = graph.neighbour_sets();
    let mut order = greedy_order(&neighbours);
    circular_sifting(&neighbours, &mut order, SIFTING_PASSES);
    Ok(order)
}

/// Number of crossing chord pairs when `order` (slot -> vertex) is drawn on a circle.
///
/// Parallel and antiparallel edges count as one chord; chords sharing an endpoint never cross.
/// Vertices missing from `order` and their edges are ignored.
pub fn circular_crossings(graph: &Graph, order: &[usize]) -> usize {
    let mut slot_of = vec![usize::MAX; graph.vertex_count];
    for (slot, &v) in order.iter().enumerate() {
        if let Some(s) = slot_of.get_mut(v) {
            *s = slot;
        }
    }

    let mut seen: FxHashSet<(usize, usize)> = FxHashSet::default();
    let mut chords: Vec<(usize, usize)> = Vec::with_capacity(graph.edges.len());
    for e in &graph.edges {
        if e.u == e.v {
            continue;
        }
        let (Some(&a), Some(&b)) = (slot_of.get(e.u), slot_of.get(e.v)) else {
            continue;
        };
        if a == usize::MAX || b == usize::MAX {
            continue;
        }
        if seen.insert((e.u.min(e.v), e.u.max(e.v))) {
            chords.push((a.min(b), a.max(b)));
        }
    }

    let mut crossings = 0;
    for (i, &(a, b)) in chords.iter().enumerate() {
        for &(c, d) in &chords[i + 1..] {
            if a == c || a == d || b == c || b == d {
                continue;
            }
            let c_inside = a < c && c < b;
            let d_inside = a < d && d < b;
            if c_inside != d_inside {
                crossings += 1;
            }
        }
    }
    crossings
}

/// Greedy placement. Each round takes the vertex with the most already-placed neighbours (fewest
/// unplaced ones on ties, then lowest index) and puts it at the cheaper end of the deque.
fn greedy_order(neighbours: &[NeighbourSet]) -> Vec<usize> {
    let n = neighbours.len();
    let mut placed = vec![0usize; n];
    let mut unplaced: Vec<usize> = neighbours.iter().map(|s| s.len()).collect();
    let mut remaining: Vec<usize> = (0..n).collect();
    let mut deque: VecDeque<usize> = VecDeque::with_capacity(n);

    let priority = |v: usize, placed: &[usize], unplaced: &[usize]| {
        (placed[v], Reverse(unplaced[v]), Reverse(v))
    };

    while !remaining.is_empty() {
        let mut best = 0;
        for slot in 1..remaining.len() {
            if priority(remaining[slot], &placed, &unplaced)
                > priority(remaining[best], &placed, &unplaced)
            {
                best = slot;
            }
        }
        let x = remaining.swap_remove(best);

        for &w in &neighbours[x] {
            placed[w] += 1;
            unplaced[w] = unplaced[w].saturating_sub(1);
        }

        if placed[x] == 0 {
            deque.push_back(x);
            continue;
        }
        let (left, right) = insertion_costs(&deque, &neighbours[x], &unplaced);
        if left < right {
            deque.push_front(x);
        } else {
            deque.push_back(x);
        }
    }

    deque.into()
}

/// Crossings created by prepending and by appending a vertex whose placed neighbours are the
/// members of `deque` found in `own`.
///
/// Every deque entry carries `unplaced[w]` open edge stubs. Prepending crosses the stubs that lie
/// before each placed neighbour; appending crosses the stubs behind the first placed neighbour.
fn insertion_costs(
    deque: &VecDeque<usize>,
    own: &NeighbourSet,
    unplaced: &[usize],
) -> (usize, usize) {
    let mut stubs = 0usize;
    let mut left = 0usize;
    let mut after_first: Option<usize> = None;
    for &w in deque {
        if own.contains(&w) {
            left += stubs;
            stubs += unplaced[w];
            after_first.get_or_insert(stubs);
        } else {
            stubs += unplaced[w];
        }
    }
    let right = stubs - after_first.unwrap_or(stubs);
    (left, right)
}

/// Moves each vertex forward around the circle while doing so removes crossings, `passes` times.
fn circular_sifting(neighbours: &[NeighbourSet], order: &mut Vec<usize>, passes: usize) {
    let n = order.len();
    if n < 2 {
        return;
    }
    let mut position = vec![0usize; n];
    for (slot, &v) in order.iter().enumerate() {
        position[v] = slot;
    }

    for pass in 0..passes {
        for i in 0..n {
            let u = order[i];
            let mut target: Option<usize> = None;
            for offset in 1..n {
                let j = (i + offset) % n;
                let (crossings, threshold) = swap_crossings(neighbours, &position, u, order[j]);
                if crossings > threshold {
                    target = Some(j);
                } else {
                    break;
                }
            }
            let Some(j) = target else {
                continue;
            };

            order.remove(i);
            order.insert(j, u);
            for slot in i.min(j)..=i.max(j) {
                position[order[slot]] = slot;
            }
            tracing::trace!(pass, vertex = u, from = i, to = j, "circular sifting move");
        }
    }
}

/// Crossings between the edges of `u` and `v` in their current relative order, and the midpoint
/// above which swapping the two pays off. The midpoint shrinks when `u` and `v` are adjacent.
fn swap_crossings(
    neighbours: &[NeighbourSet],
    position: &[usize],
    u: usize,
    v: usize,
) -> (usize, usize) {
    let n = position.len();
    let (nu, nv) = (&neighbours[u], &neighbours[v]);
    let origin = position[u];
    let clockwise_from_u = |w: usize| (position[w] + n - origin) % n;

    let mut threshold = nu.len() * nv.len() / 2;
    let mut crossings = 0usize;
    for &a in nu {
        for &b in nv {
            if a == v || b == u {
                threshold = (nu.len() - 1) * (nv.len() - 1) / 2;
            } else if clockwise_from_u(a) < clockwise_from_u(b) {
                crossings += 1;
            }
        }
    }
    (crossings, threshold)
}

use crate::error::{Error, Result};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use std::collections::VecDeque;

/// Undirected neighbourhood of one vertex, in first-seen edge-list order.
pub type NeighbourSet = IndexSet<usize, FxBuildHasher>;

/// Attributed graph over dense vertex indices `0..vertex_count`.
///
/// The layout engine only ever borrows a `Graph`; labels and other per-vertex payloads stay with
/// the caller, keyed by index.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub vertex_count: usize,
    /// Only meaningful to consumers; every layout computation treats edges as undirected.
    pub directed: bool,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub u: usize,
    pub v: usize,
    pub weight: f64,
}

impl Edge {
    pub fn new(u: usize, v: usize) -> Self {
        Self { u, v, weight: 1.0 }
    }

    pub fn weighted(u: usize, v: usize, weight: f64) -> Self {
        Self { u, v, weight }
    }
}

impl Graph {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            directed: false,
            edges: Vec::new(),
        }
    }

    pub fn new_directed(vertex_count: usize) -> Self {
        Self {
            directed: true,
            ..Self::new(vertex_count)
        }
    }

    pub fn with_edge(mut self, u: usize, v: usize) -> Self {
        self.add_edge(u, v);
        self
    }

    pub fn with_weighted_edge(mut self, u: usize, v: usize, weight: f64) -> Self {
        self.add_weighted_edge(u, v, weight);
        self
    }

    pub fn add_edge(&mut self, u: usize, v: usize) {
        self.edges.push(Edge::new(u, v));
    }

    pub fn add_weighted_edge(&mut self, u: usize, v: usize, weight: f64) {
        self.edges.push(Edge::weighted(u, v, weight));
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn validate(&self) -> Result<()> {
        if self.vertex_count < 2 {
            return Err(Error::invalid_graph(format!(
                "a layout needs at least two vertices, got {}",
                self.vertex_count
            )));
        }
        for (idx, e) in self.edges.iter().enumerate() {
            if e.u >= self.vertex_count || e.v >= self.vertex_count {
                return Err(Error::invalid_graph(format!(
                    "edge #{idx} ({}, {}) references a vertex outside 0..{}",
                    e.u, e.v, self.vertex_count
                )));
            }
            if e.u == e.v {
                return Err(Error::invalid_graph(format!(
                    "edge #{idx} is a self-loop on vertex {}",
                    e.u
                )));
            }
            // NaN fails this comparison too.
            if !(e.weight >= 0.0 && e.weight.is_finite()) {
                return Err(Error::invalid_graph(format!(
                    "edge #{idx} ({}, {}) has weight {}; weights must be finite and non-negative",
                    e.u, e.v, e.weight
                )));
            }
        }
        Ok(())
    }

    /// Undirected neighbour sets. Parallel and antiparallel edges collapse into one neighbour.
    ///
    /// Endpoints outside `0..vertex_count` are skipped; call [`Graph::validate`] first when that
    /// matters.
    pub fn neighbour_sets(&self) -> Vec<NeighbourSet> {
        let mut sets: Vec<NeighbourSet> = (0..self.vertex_count)
            .map(|_| NeighbourSet::default())
            .collect();
        for e in &self.edges {
            if e.u >= self.vertex_count || e.v >= self.vertex_count || e.u == e.v {
                continue;
            }
            sets[e.u].insert(e.v);
            sets[e.v].insert(e.u);
        }
        sets
    }

    /// Edge-endpoint counts: every edge (duplicates included) adds one to both of its endpoints.
    pub fn degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0usize; self.vertex_count];
        for e in &self.edges {
            if let Some(d) = degrees.get_mut(e.u) {
                *d += 1;
            }
            if let Some(d) = degrees.get_mut(e.v) {
                *d += 1;
            }
        }
        degrees
    }

    /// Hop distance of every vertex from `centre`, ignoring edge direction. Unreachable vertices
    /// (and everything, when `centre` is out of range) map to `None`.
    pub fn bfs_levels(&self, centre: usize) -> Vec<Option<usize>> {
        let mut levels: Vec<Option<usize>> = vec![None; self.vertex_count];
        if centre >= self.vertex_count {
            return levels;
        }
        let neighbours = self.neighbour_sets();

        levels[centre] = Some(0);
        let mut queue: VecDeque<usize> = VecDeque::from([centre]);
        while let Some(v) = queue.pop_front() {
            let next = levels[v].map_or(0, |l| l + 1);
            for &w in &neighbours[v] {
                if levels[w].is_none() {
                    levels[w] = Some(next);
                    queue.push_back(w);
                }
            }
        }
        levels
    }
}

/// Free-function form of [`Graph::degrees`].
pub fn degrees(graph: &Graph) -> Vec<usize> {
    graph.degrees()
}

#![forbid(unsafe_code)]

//! Headless Fruchterman-Reingold graph layout.
//!
//! `tamarin` places the vertices of a [`Graph`] in a rectangular [`Frame`] with cooled
//! force-directed iterations. Three force models are available through [`Variant`]: the classic
//! model, a radial model that keeps vertices on concentric rings, and a smooth ring-aware model
//! without ring correction. Seeding is chosen with [`Initializer`]; the circular seedings include
//! one ordered to reduce chord crossings.
//!
//! Positions come back as one `2 x n` buffer (x row, then y row). Runs are deterministic for a
//! given input and seed. Interactive callers can drive a [`LayoutState`] one step at a time.

pub mod algo;
pub mod config;
pub mod coords;
pub mod driver;
pub mod error;
pub mod graph;
pub mod query;
pub mod rng;

pub use algo::radial::bfs_ring_levels;
pub use algo::{
    Initializer, RadialAnnotation, SmoothRings, Variant, circular_crossings,
    crossing_reduced_order,
};
pub use config::{
    Frame, InitializerKind, LayoutConfig, ResolvedConfig, Schedule, VariantKind,
    default_cooling_factor, default_initial_temperature,
};
pub use coords::Coordinates;
pub use driver::{Layout, LayoutState, layout};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, NeighbourSet, degrees};
pub use query::{nearest_vertex, vertex_distances, vertices_in_rect};

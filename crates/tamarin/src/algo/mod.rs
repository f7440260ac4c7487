pub mod crossing;
pub mod force;
pub mod init;
pub mod radial;

pub use crossing::{circular_crossings, crossing_reduced_order};
pub use init::Initializer;
pub use radial::{RadialAnnotation, SmoothRings};

use crate::error::{Error, Result};

/// Force model used by each iteration.
#[derive(Debug, Clone, Default)]
pub enum Variant {
    /// Classic Fruchterman-Reingold with one ideal length `k = sqrt(area / n)`.
    #[default]
    Plain,
    /// Ring-aware ideal lengths plus a per-iteration correction that pulls every vertex back into
    /// its annulus.
    Radial(RadialAnnotation),
    /// Ring-aware ideal lengths (three of them) with per-pair repulsion cutoff; no ring
    /// correction.
    Smooth(SmoothRings),
}

impl Variant {
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Plain => "plain",
            Variant::Radial(_) => "radial",
            Variant::Smooth(_) => "smooth",
        }
    }

    pub fn levels(&self) -> Option<&[usize]> {
        match self {
            Variant::Plain => None,
            Variant::Radial(a) => Some(a.levels()),
            Variant::Smooth(s) => Some(s.levels()),
        }
    }

    /// Checks that a ring annotation covers exactly `vertex_count` vertices.
    pub fn validate_for(&self, vertex_count: usize) -> Result<()> {
        let Some(levels) = self.levels() else {
            return Ok(());
        };
        if levels.len() != vertex_count {
            return Err(Error::invalid_levels(format!(
                "{} variant has levels for {} vertices, graph has {vertex_count}",
                self.name(),
                levels.len()
            )));
        }
        Ok(())
    }
}

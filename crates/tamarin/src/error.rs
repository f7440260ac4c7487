use crate::coords::Coordinates;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid graph: {reason}")]
    InvalidGraph { reason: String },

    #[error("invalid schedule: {reason}")]
    InvalidSchedule { reason: String },

    #[error("invalid level annotation: {reason}")]
    InvalidLevelAnnotation { reason: String },

    /// A coordinate became non-finite. `last_good` holds the positions from before the failing
    /// iteration.
    #[error("vertex {vertex} left the finite plane at step {step} (temperature {temperature})")]
    NumericalBreakdown {
        step: usize,
        vertex: usize,
        temperature: f64,
        last_good: Box<Coordinates>,
    },

    #[error("invalid layout config: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_graph(reason: impl Into<String>) -> Self {
        Self::InvalidGraph {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_schedule(reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_levels(reason: impl Into<String>) -> Self {
        Self::InvalidLevelAnnotation {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

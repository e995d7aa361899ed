//! Error types shared by the flow algorithms.

use thiserror::Error;

/// Result type for flow computations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a flow network or computing a flow.
///
/// An unreachable sink is not an error: it ends the search normally with
/// whatever flow has been found so far.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Source or sink is not a vertex of the network
    #[error("vertex {0} is not present in the network")]
    InvalidVertex(String),

    /// Source and sink are the same vertex
    #[error("source and sink must differ, both are {0}")]
    DegenerateRequest(String),

    /// Capacity below zero (or not comparable with zero)
    #[error("edge {from} -> {to} has invalid capacity {capacity}")]
    NegativeCapacity {
        from: String,
        to: String,
        capacity: String,
    },

    /// A residual capacity or the running flow total does not fit the
    /// capacity type
    #[error("capacity overflow on {0}")]
    CapacityOverflow(String),

    /// The configured augmentation budget ran out before the flow was maximal
    #[error("augmentation limit of {0} reached before the flow was maximal")]
    AugmentationLimit(usize),
}

impl Error {
    pub fn invalid_vertex<V: std::fmt::Debug>(vertex: &V) -> Self {
        Error::InvalidVertex(format!("{:?}", vertex))
    }

    pub fn negative_capacity<V, C>(from: &V, to: &V, capacity: &C) -> Self
    where
        V: std::fmt::Debug,
        C: std::fmt::Debug,
    {
        Error::NegativeCapacity {
            from: format!("{:?}", from),
            to: format!("{:?}", to),
            capacity: format!("{:?}", capacity),
        }
    }
}

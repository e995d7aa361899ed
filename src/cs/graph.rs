//! Maximum flow on directed, capacitated graphs.
//!
//! - [`network`]: the caller-facing capacity graph
//! - [`residual`]: residual capacities and the shortest augmenting path search
//! - [`edmond_karp`]: the augmentation loop, path records and minimum cut

pub mod edmond_karp;
pub mod network;
pub mod residual;

pub use edmond_karp::{
    compute_max_flow, compute_max_flow_with_config, edmond_karp, max_flow, AugmentingPath,
    FlowResult, MaxFlowConfig, MinCut,
};
pub use network::{FlowCapacity, FlowNetwork};
pub use residual::ResidualGraph;

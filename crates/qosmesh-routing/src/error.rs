//! Routing error types

use qosmesh_topology::NodeId;
use thiserror::Error;

/// Routing-specific errors
#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Invalid cost weights: {0}")]
    InvalidWeights(String),

    #[error("Topology error: {0}")]
    Topology(#[from] qosmesh_topology::TopologyError),
}

/// Result type for routing operations
pub type Result<T> = std::result::Result<T, RoutingError>;

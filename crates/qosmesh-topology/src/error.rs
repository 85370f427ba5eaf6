//! Error types for topology construction

use crate::types::NodeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TopologyError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopologyError {
    #[error("Duplicate node: {0}")]
    DuplicateNode(NodeId),

    #[error("Duplicate link: {0} <-> {1}")]
    DuplicateLink(NodeId, NodeId),

    #[error("Self-loop on node {0}")]
    SelfLoop(NodeId),

    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Invalid reliability {value} for {element} (expected 0.0..=1.0)")]
    InvalidReliability { element: String, value: f64 },

    #[error("Invalid delay {value} for {element} (expected finite, >= 0)")]
    InvalidDelay { element: String, value: f64 },

    #[error("Invalid bandwidth {value} for {element} (expected finite, >= 0)")]
    InvalidBandwidth { element: String, value: f64 },

    #[error("Invalid node ID: {0}")]
    InvalidNodeId(String),
}

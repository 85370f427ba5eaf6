//! QosMesh Topology
//!
//! This module defines the network data model consumed by the path optimizer:
//! - Node identifiers and canonical undirected edge keys
//! - Per-node and per-link quality attributes (delay, bandwidth, reliability)
//! - Traffic demands keyed by (source, target)
//! - The `GraphAccessor` trait and an in-memory `Topology` implementation

pub mod accessor;
pub mod error;
pub mod topology;
pub mod types;

pub use accessor::GraphAccessor;
pub use error::{Result, TopologyError};
pub use topology::{Topology, TopologyBuilder, TopologySpec};
pub use types::{
    Demand, DemandKey, EdgeKey, Link, LinkAttributes, Node, NodeAttributes, NodeId,
};

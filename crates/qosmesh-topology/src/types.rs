//! Core topology types

use crate::error::TopologyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A unique identifier for a node in the network topology
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Create a NodeId from its numeric value
    pub const fn new(value: u32) -> Self {
        NodeId(value)
    }

    /// Get the numeric value of this NodeId
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl From<u32> for NodeId {
    fn from(value: u32) -> Self {
        NodeId(value)
    }
}

impl FromStr for NodeId {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(NodeId)
            .map_err(|_| TopologyError::InvalidNodeId(s.to_string()))
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Undirected edge key
///
/// The endpoints are stored in ascending order so that both traversal
/// directions of a link hash and compare identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey(NodeId, NodeId);

impl EdgeKey {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            EdgeKey(a, b)
        } else {
            EdgeKey(b, a)
        }
    }

    /// Lower endpoint
    pub fn low(&self) -> NodeId {
        self.0
    }

    /// Higher endpoint
    pub fn high(&self) -> NodeId {
        self.1
    }

    /// Check whether the edge touches `node`
    pub fn contains(&self, node: &NodeId) -> bool {
        self.0 == *node || self.1 == *node
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0, self.1)
    }
}

/// Per-node quality attributes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeAttributes {
    /// Processing delay (milliseconds)
    pub s_ms: f64,
    /// Probability the node forwards successfully (0.0-1.0)
    pub reliability: f64,
}

impl Default for NodeAttributes {
    fn default() -> Self {
        Self {
            s_ms: 0.0,
            reliability: 1.0,
        }
    }
}

/// Per-link quality attributes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkAttributes {
    /// Propagation delay (milliseconds)
    pub delay: f64,
    /// Capacity (Mbps)
    pub bandwidth: f64,
    /// Probability the link delivers successfully (0.0-1.0)
    pub reliability: f64,
}

/// A network node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(flatten)]
    pub attributes: NodeAttributes,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, s_ms: f64, reliability: f64) -> Self {
        Self {
            id: id.into(),
            attributes: NodeAttributes { s_ms, reliability },
        }
    }
}

/// A network link between two nodes (undirected)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(flatten)]
    pub attributes: LinkAttributes,
}

impl Link {
    pub fn new(
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        delay: f64,
        bandwidth: f64,
        reliability: f64,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            attributes: LinkAttributes {
                delay,
                bandwidth,
                reliability,
            },
        }
    }

    /// Canonical key of this link
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.source, self.target)
    }

    /// Check whether this link connects `a` and `b` in either direction
    pub fn connects(&self, a: &NodeId, b: &NodeId) -> bool {
        (self.source == *a && self.target == *b) || (self.source == *b && self.target == *a)
    }
}

/// Lookup key of the demand table
///
/// Built by concatenating the textual source and target identifiers, so
/// nodes 1 and 23 produce `"123"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DemandKey(String);

impl DemandKey {
    pub fn new(source: &NodeId, target: &NodeId) -> Self {
        DemandKey(format!("{}{}", source, target))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A traffic demand between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demand {
    pub source: NodeId,
    pub target: NodeId,
    /// Required bandwidth (Mbps)
    pub bandwidth: f64,
}

impl Demand {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, bandwidth: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            bandwidth,
        }
    }

    pub fn key(&self) -> DemandKey {
        DemandKey::new(&self.source, &self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_key_is_direction_insensitive() {
        let a = NodeId::new(7);
        let b = NodeId::new(3);

        assert_eq!(EdgeKey::new(a, b), EdgeKey::new(b, a));
        assert_eq!(EdgeKey::new(a, b).low(), b);
        assert_eq!(EdgeKey::new(a, b).high(), a);
        assert!(EdgeKey::new(a, b).contains(&a));
    }

    #[test]
    fn test_node_id_parse() {
        assert_eq!(" 42 ".parse::<NodeId>().unwrap(), NodeId::new(42));
        assert!("abc".parse::<NodeId>().is_err());
        assert_eq!(NodeId::new(5).to_string(), "5");
    }

    #[test]
    fn test_demand_key_concatenates_ids() {
        let key = DemandKey::new(&NodeId::new(1), &NodeId::new(23));
        assert_eq!(key.as_str(), "123");

        // Concatenation is not injective
        let other = DemandKey::new(&NodeId::new(12), &NodeId::new(3));
        assert_eq!(key, other);

        let key = DemandKey::new(&NodeId::new(40), &NodeId::new(7));
        assert_eq!(key.as_str(), "407");
        assert_eq!(key.as_str().len(), 3);
    }

    #[test]
    fn test_link_connects_both_directions() {
        let link = Link::new(1, 2, 5.0, 100.0, 0.99);
        assert!(link.connects(&NodeId::new(1), &NodeId::new(2)));
        assert!(link.connects(&NodeId::new(2), &NodeId::new(1)));
        assert!(!link.connects(&NodeId::new(1), &NodeId::new(3)));
    }
}

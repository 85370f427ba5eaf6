//! Read-only access to a network topology

use crate::types::{EdgeKey, Link, LinkAttributes, NodeAttributes, NodeId};

/// Read access to the graph the optimizer works on.
///
/// Implementations must treat links as undirected: `edge_attributes(a, b)`
/// and `edge_attributes(b, a)` return the same value. `neighbors` should
/// return nodes in a stable order, otherwise seeded runs are not
/// reproducible.
pub trait GraphAccessor {
    /// Nodes adjacent to `node`; empty for unknown nodes
    fn neighbors(&self, node: &NodeId) -> Vec<NodeId>;

    /// Attributes of the link between `a` and `b`, if any
    fn edge_attributes(&self, a: &NodeId, b: &NodeId) -> Option<LinkAttributes>;

    /// Attributes of a node, if it exists
    fn node_by_id(&self, id: &NodeId) -> Option<NodeAttributes>;

    /// Every link in the graph as a canonical key
    fn all_edges(&self) -> Vec<EdgeKey>;

    /// Required bandwidth for the (source, target) demand
    fn demand(&self, source: &NodeId, target: &NodeId) -> Option<f64>;

    /// The raw link collection
    fn links(&self) -> Vec<Link>;

    fn contains_node(&self, id: &NodeId) -> bool {
        self.node_by_id(id).is_some()
    }
}

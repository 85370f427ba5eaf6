//! In-memory network topology

use crate::accessor::GraphAccessor;
use crate::error::{Result, TopologyError};
use crate::types::{
    Demand, DemandKey, EdgeKey, Link, LinkAttributes, Node, NodeAttributes, NodeId,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Serializable description of a topology
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologySpec {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub demands: Vec<Demand>,
}

/// Network topology backed by ordered maps
///
/// Ordered storage keeps neighbor enumeration stable between runs.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    /// Node attributes by ID
    nodes: BTreeMap<NodeId, NodeAttributes>,

    /// Adjacency sets (undirected)
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,

    /// Link attributes by canonical key
    edges: BTreeMap<EdgeKey, LinkAttributes>,

    /// Links in insertion order
    links: Vec<Link>,

    /// Demand table
    demands: HashMap<DemandKey, f64>,
}

impl Topology {
    /// Create an empty topology
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a topology from its serializable description
    pub fn from_spec(spec: TopologySpec) -> Result<Self> {
        let mut topology = Topology::new();
        for node in spec.nodes {
            topology.add_node(node)?;
        }
        for link in spec.links {
            topology.add_link(link)?;
        }
        for demand in spec.demands {
            topology.add_demand(demand)?;
        }

        debug!(
            "Topology loaded: {} nodes, {} links, {} demands",
            topology.node_count(),
            topology.link_count(),
            topology.demands.len()
        );

        Ok(topology)
    }

    /// Convert back into a serializable description
    pub fn to_spec(&self) -> TopologySpec {
        let mut demands: Vec<Demand> = Vec::new();
        for (key, bandwidth) in &self.demands {
            // The concatenated key cannot be split back reliably; search the node set.
            if let Some((source, target)) = self.split_demand_key(key) {
                demands.push(Demand::new(source, target, *bandwidth));
            }
        }
        demands.sort_by(|a, b| (a.source, a.target).cmp(&(b.source, b.target)));

        TopologySpec {
            nodes: self
                .nodes
                .iter()
                .map(|(id, attributes)| Node {
                    id: *id,
                    attributes: *attributes,
                })
                .collect(),
            links: self.links.clone(),
            demands,
        }
    }

    fn split_demand_key(&self, key: &DemandKey) -> Option<(NodeId, NodeId)> {
        self.nodes.keys().find_map(|source| {
            let rest = key.as_str().strip_prefix(&source.to_string())?;
            let target: NodeId = rest.parse().ok()?;
            self.nodes.contains_key(&target).then_some((*source, target))
        })
    }

    /// Add a node
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(TopologyError::DuplicateNode(node.id));
        }

        let element = format!("node {}", node.id);
        validate_reliability(&element, node.attributes.reliability)?;
        validate_delay(&element, node.attributes.s_ms)?;

        self.nodes.insert(node.id, node.attributes);
        self.adjacency.entry(node.id).or_default();
        Ok(())
    }

    /// Add an undirected link between two existing nodes
    pub fn add_link(&mut self, link: Link) -> Result<()> {
        if link.source == link.target {
            return Err(TopologyError::SelfLoop(link.source));
        }
        for endpoint in [link.source, link.target] {
            if !self.nodes.contains_key(&endpoint) {
                return Err(TopologyError::UnknownNode(endpoint));
            }
        }

        let key = link.key();
        if self.edges.contains_key(&key) {
            return Err(TopologyError::DuplicateLink(link.source, link.target));
        }

        let element = format!("link {}", key);
        validate_delay(&element, link.attributes.delay)?;
        validate_bandwidth(&element, link.attributes.bandwidth)?;
        validate_reliability(&element, link.attributes.reliability)?;

        self.adjacency
            .entry(link.source)
            .or_default()
            .insert(link.target);
        self.adjacency
            .entry(link.target)
            .or_default()
            .insert(link.source);
        self.edges.insert(key, link.attributes);
        self.links.push(link);
        Ok(())
    }

    /// Add or replace a traffic demand
    pub fn add_demand(&mut self, demand: Demand) -> Result<()> {
        for endpoint in [demand.source, demand.target] {
            if !self.nodes.contains_key(&endpoint) {
                return Err(TopologyError::UnknownNode(endpoint));
            }
        }
        validate_bandwidth(
            &format!("demand {}->{}", demand.source, demand.target),
            demand.bandwidth,
        )?;

        self.demands.insert(demand.key(), demand.bandwidth);
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.edges.len()
    }

    /// All node IDs in ascending order
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }
}

impl GraphAccessor for Topology {
    fn neighbors(&self, node: &NodeId) -> Vec<NodeId> {
        self.adjacency
            .get(node)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    fn edge_attributes(&self, a: &NodeId, b: &NodeId) -> Option<LinkAttributes> {
        self.edges.get(&EdgeKey::new(*a, *b)).copied()
    }

    fn node_by_id(&self, id: &NodeId) -> Option<NodeAttributes> {
        self.nodes.get(id).copied()
    }

    fn all_edges(&self) -> Vec<EdgeKey> {
        self.edges.keys().copied().collect()
    }

    fn demand(&self, source: &NodeId, target: &NodeId) -> Option<f64> {
        self.demands.get(&DemandKey::new(source, target)).copied()
    }

    fn links(&self) -> Vec<Link> {
        self.links.clone()
    }

    fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }
}

/// Fluent builder for small topologies
#[derive(Debug, Default)]
pub struct TopologyBuilder {
    spec: TopologySpec,
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, id: u32, s_ms: f64, reliability: f64) -> Self {
        self.spec.nodes.push(Node::new(id, s_ms, reliability));
        self
    }

    /// Add a node with zero processing delay and full reliability
    pub fn ideal_node(self, id: u32) -> Self {
        self.node(id, 0.0, 1.0)
    }

    pub fn link(mut self, a: u32, b: u32, delay: f64, bandwidth: f64, reliability: f64) -> Self {
        self.spec
            .links
            .push(Link::new(a, b, delay, bandwidth, reliability));
        self
    }

    pub fn demand(mut self, source: u32, target: u32, bandwidth: f64) -> Self {
        self.spec
            .demands
            .push(Demand::new(source, target, bandwidth));
        self
    }

    pub fn build(self) -> Result<Topology> {
        Topology::from_spec(self.spec)
    }
}

fn validate_reliability(element: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(TopologyError::InvalidReliability {
            element: element.to_string(),
            value,
        });
    }
    Ok(())
}

fn validate_delay(element: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(TopologyError::InvalidDelay {
            element: element.to_string(),
            value,
        });
    }
    Ok(())
}

fn validate_bandwidth(element: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(TopologyError::InvalidBandwidth {
            element: element.to_string(),
            value,
        });
    }
    Ok(())
}

//! Path metric aggregation
//!
//! Converts a node sequence into the three additive QoS costs used by the
//! optimizer:
//! - total delay: link delays plus processing delay of intermediate nodes
//! - reliability cost: `-ln(r + 1e-12)` summed over links and every node
//!   on the path, endpoints included
//! - bandwidth cost: `1000 / (bw + 1e-9)` summed over links

use crate::weights::CostWeights;
use crate::{BANDWIDTH_EPSILON, DELAY_SCALE_MS, REFERENCE_CAPACITY, RELIABILITY_EPSILON};
use qosmesh_topology::{GraphAccessor, LinkAttributes, NodeId};
use tracing::debug;

/// Aggregated metrics for a path
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PathMetrics {
    /// Sum of link delays and intermediate node delays (milliseconds)
    pub total_delay_ms: f64,
    /// Negative log of the path success probability
    pub reliability_cost: f64,
    /// Sum of reference capacity over link bandwidth
    pub bandwidth_cost: f64,
    /// Consecutive pairs that had no link in the graph
    pub skipped_edges: usize,
}

impl PathMetrics {
    /// Weighted scalar fitness (lower is better)
    pub fn fitness(&self, weights: &CostWeights) -> f64 {
        weights.delay * (self.total_delay_ms / DELAY_SCALE_MS)
            + weights.reliability * self.reliability_cost
            + weights.bandwidth * self.bandwidth_cost
    }

    /// Overall success probability implied by the reliability cost
    pub fn success_probability(&self) -> f64 {
        (-self.reliability_cost).exp()
    }
}

/// Outcome of looking up one traversed edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeContribution {
    Known(LinkAttributes),
    Unknown,
}

/// Computes path metrics against a graph
pub struct MetricAggregator<'g, G: ?Sized> {
    graph: &'g G,
}

impl<'g, G: GraphAccessor + ?Sized> MetricAggregator<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self { graph }
    }

    /// Look up the link between two consecutive path nodes
    pub fn edge_contribution(&self, a: &NodeId, b: &NodeId) -> EdgeContribution {
        match self.graph.edge_attributes(a, b) {
            Some(attributes) => EdgeContribution::Known(attributes),
            None => EdgeContribution::Unknown,
        }
    }

    /// Aggregate delay, reliability cost and bandwidth cost along `path`
    pub fn evaluate(&self, path: &[NodeId]) -> PathMetrics {
        let mut metrics = PathMetrics::default();

        let (first, last) = match (path.first(), path.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return metrics,
        };

        for pair in path.windows(2) {
            match self.edge_contribution(&pair[0], &pair[1]) {
                EdgeContribution::Known(link) => {
                    metrics.total_delay_ms += link.delay;
                    metrics.reliability_cost += reliability_cost(link.reliability);
                    metrics.bandwidth_cost += bandwidth_cost(link.bandwidth);
                }
                EdgeContribution::Unknown => {
                    debug!("No link {} <-> {} on path, skipping", pair[0], pair[1]);
                    metrics.skipped_edges += 1;
                }
            }
        }

        if path.len() > 2 {
            for node_id in &path[1..path.len() - 1] {
                match self.graph.node_by_id(node_id) {
                    Some(node) => {
                        metrics.total_delay_ms += node.s_ms;
                        metrics.reliability_cost += reliability_cost(node.reliability);
                    }
                    None => debug!("Unknown intermediate node {} on path", node_id),
                }
            }
        }

        // Endpoints count towards reliability only. For a single-node path
        // the node is both source and target and is counted twice.
        for endpoint in [first, last] {
            if let Some(node) = self.graph.node_by_id(endpoint) {
                metrics.reliability_cost += reliability_cost(node.reliability);
            }
        }

        metrics
    }

    /// Convenience: evaluate and weight in one step
    pub fn fitness(&self, path: &[NodeId], weights: &CostWeights) -> f64 {
        self.evaluate(path).fitness(weights)
    }
}

/// `-ln(reliability + ε)`
pub fn reliability_cost(reliability: f64) -> f64 {
    -(reliability + RELIABILITY_EPSILON).ln()
}

/// `C / (bandwidth + ε')`
pub fn bandwidth_cost(bandwidth: f64) -> f64 {
    REFERENCE_CAPACITY / (bandwidth + BANDWIDTH_EPSILON)
}

//! Path helpers outside the optimizer loop

use qosmesh_topology::{GraphAccessor, NodeId};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::fmt;

/// Bandwidth reported for a hop whose link cannot be found
pub const MISSING_LINK_BANDWIDTH: f64 = 1.0;

/// Build a random acyclic path by uniform neighbor choice.
///
/// Gives up on a dead end, or once the path holds `max_length` nodes
/// without reaching `target`.
pub fn random_path<G, R>(
    graph: &G,
    source: NodeId,
    target: NodeId,
    max_length: usize,
    rng: &mut R,
) -> Option<Vec<NodeId>>
where
    G: GraphAccessor + ?Sized,
    R: Rng + ?Sized,
{
    let mut current = source;
    let mut path = vec![source];
    let mut visited = HashSet::from([source]);

    while current != target && path.len() < max_length {
        let candidates: Vec<NodeId> = graph
            .neighbors(&current)
            .into_iter()
            .filter(|n| !visited.contains(n))
            .collect();

        let next = *candidates.choose(rng)?;
        path.push(next);
        visited.insert(next);
        current = next;
    }

    (current == target).then_some(path)
}

/// Check that `path` runs from `source` to `target` over real links without
/// revisiting a node
pub fn is_valid_path<G: GraphAccessor + ?Sized>(
    graph: &G,
    path: &[NodeId],
    source: &NodeId,
    target: &NodeId,
) -> bool {
    if path.first() != Some(source) || path.last() != Some(target) {
        return false;
    }

    let mut seen = HashSet::new();
    if !path.iter().all(|node| seen.insert(*node)) {
        return false;
    }

    path.windows(2)
        .all(|pair| graph.edge_attributes(&pair[0], &pair[1]).is_some())
}

/// Bandwidth of the link between `a` and `b`, found by scanning the link
/// collection in either direction
pub fn link_bandwidth<G: GraphAccessor + ?Sized>(graph: &G, a: &NodeId, b: &NodeId) -> f64 {
    graph
        .links()
        .iter()
        .find(|link| link.connects(a, b))
        .map(|link| link.attributes.bandwidth)
        .unwrap_or(MISSING_LINK_BANDWIDTH)
}

/// Per-hop link bandwidths along `path`
pub fn path_bandwidths<G: GraphAccessor + ?Sized>(
    graph: &G,
    path: &[NodeId],
) -> BandwidthSummary {
    BandwidthSummary::for_path(graph, path)
}

/// Demand bandwidth between the endpoints of `path`
pub fn required_bandwidth<G: GraphAccessor + ?Sized>(
    graph: &G,
    path: &[NodeId],
) -> RequiredBandwidth {
    RequiredBandwidth::for_path(graph, path)
}

/// Per-hop bandwidths along a path
#[derive(Debug, Clone, PartialEq)]
pub struct BandwidthSummary {
    pub bandwidths: Vec<f64>,
    path_len: usize,
}

impl BandwidthSummary {
    pub fn for_path<G: GraphAccessor + ?Sized>(graph: &G, path: &[NodeId]) -> Self {
        Self {
            bandwidths: path
                .windows(2)
                .map(|pair| link_bandwidth(graph, &pair[0], &pair[1]))
                .collect(),
            path_len: path.len(),
        }
    }

    /// Smallest hop bandwidth
    pub fn bottleneck(&self) -> Option<f64> {
        self.bandwidths.iter().copied().reduce(f64::min)
    }
}

impl fmt::Display for BandwidthSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path_len == 0 {
            return write!(f, "0");
        }

        write!(f, "Path BWs: [")?;
        for (i, bw) in self.bandwidths.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.1}", bw)?;
        }
        write!(f, "]")
    }
}

/// Demand bandwidth for a path's endpoints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequiredBandwidth {
    pub bandwidth: f64,
}

impl RequiredBandwidth {
    /// Look up the demand between the first and last node of `path`.
    /// Missing demands and empty paths report 0.
    pub fn for_path<G: GraphAccessor + ?Sized>(graph: &G, path: &[NodeId]) -> Self {
        let bandwidth = match (path.first(), path.last()) {
            (Some(source), Some(target)) => graph.demand(source, target).unwrap_or(0.0),
            _ => 0.0,
        };
        Self { bandwidth }
    }
}

impl fmt::Display for RequiredBandwidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Required BW: {}", self.bandwidth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qosmesh_topology::{Topology, TopologyBuilder};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn n(id: u32) -> NodeId {
        NodeId::new(id)
    }

    fn create_test_topology() -> Topology {
        TopologyBuilder::new()
            .ideal_node(1)
            .ideal_node(2)
            .ideal_node(3)
            .ideal_node(4)
            .ideal_node(5)
            .link(1, 2, 1.0, 100.0, 1.0)
            .link(2, 3, 1.0, 50.0, 1.0)
            .link(1, 3, 1.0, 10.0, 1.0)
            .link(3, 4, 1.0, 25.0, 1.0)
            .demand(1, 4, 30.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_random_path_is_valid() {
        let topology = create_test_topology();
        let mut rng = StdRng::seed_from_u64(9);

        // 1 -> 3 -> 2 is a dead end, so some walks give up
        let paths: Vec<Vec<NodeId>> = (0..50)
            .filter_map(|_| random_path(&topology, n(1), n(4), 20, &mut rng))
            .collect();

        assert!(!paths.is_empty());
        for path in &paths {
            assert!(is_valid_path(&topology, path, &n(1), &n(4)), "{:?}", path);
        }
    }

    #[test]
    fn test_random_path_gives_up_at_dead_end() {
        // Star around node 1: every walk that leaves towards 2 is stuck
        let topology = TopologyBuilder::new()
            .ideal_node(1)
            .ideal_node(2)
            .ideal_node(3)
            .link(1, 2, 1.0, 10.0, 1.0)
            .link(1, 3, 1.0, 10.0, 1.0)
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(4);

        let outcomes: Vec<Option<Vec<NodeId>>> = (0..50)
            .map(|_| random_path(&topology, n(1), n(3), 20, &mut rng))
            .collect();

        assert!(outcomes.contains(&None));
        assert!(outcomes.contains(&Some(vec![n(1), n(3)])));
        assert!(outcomes
            .iter()
            .all(|p| p.is_none() || p.as_deref() == Some(&[n(1), n(3)][..])));
    }

    #[test]
    fn test_random_path_unreachable() {
        let topology = create_test_topology();
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(random_path(&topology, n(1), n(5), 20, &mut rng), None);
    }

    #[test]
    fn test_random_path_length_bound() {
        let topology = create_test_topology();
        let mut rng = StdRng::seed_from_u64(9);
        // Node 4 is at least three nodes away from 1
        assert_eq!(random_path(&topology, n(1), n(4), 2, &mut rng), None);
        assert_eq!(
            random_path(&topology, n(1), n(1), 1, &mut rng),
            Some(vec![n(1)])
        );
    }

    #[test]
    fn test_is_valid_path() {
        let topology = create_test_topology();

        assert!(is_valid_path(&topology, &[n(1), n(3), n(4)], &n(1), &n(4)));
        assert!(!is_valid_path(&topology, &[n(1), n(4)], &n(1), &n(4)));
        assert!(!is_valid_path(&topology, &[n(2), n(3), n(4)], &n(1), &n(4)));
        assert!(!is_valid_path(
            &topology,
            &[n(1), n(2), n(1), n(3), n(4)],
            &n(1),
            &n(4)
        ));
        assert!(!is_valid_path(&topology, &[], &n(1), &n(4)));
    }

    #[test]
    fn test_bandwidth_summary() {
        let topology = create_test_topology();

        let summary = BandwidthSummary::for_path(&topology, &[n(4), n(3), n(2)]);
        assert_eq!(summary.bandwidths, vec![25.0, 50.0]);
        assert_eq!(summary.bottleneck(), Some(25.0));
        assert_eq!(summary.to_string(), "Path BWs: [25.0, 50.0]");

        // Missing links report the fallback value
        let summary = BandwidthSummary::for_path(&topology, &[n(1), n(5)]);
        assert_eq!(summary.bandwidths, vec![MISSING_LINK_BANDWIDTH]);

        assert_eq!(BandwidthSummary::for_path(&topology, &[]).to_string(), "0");
        assert_eq!(
            BandwidthSummary::for_path(&topology, &[n(1)]).to_string(),
            "Path BWs: []"
        );
    }

    #[test]
    fn test_named_bandwidth_helpers() {
        let topology = create_test_topology();
        let path = [n(1), n(3), n(4)];

        assert_eq!(
            path_bandwidths(&topology, &path).to_string(),
            "Path BWs: [10.0, 25.0]"
        );
        assert_eq!(
            required_bandwidth(&topology, &path).to_string(),
            "Required BW: 30"
        );
        assert_eq!(path_bandwidths(&topology, &[]).to_string(), "0");
    }

    #[test]
    fn test_required_bandwidth() {
        let topology = create_test_topology();

        let required = RequiredBandwidth::for_path(&topology, &[n(1), n(3), n(4)]);
        assert_eq!(required.bandwidth, 30.0);
        assert_eq!(required.to_string(), "Required BW: 30");

        assert_eq!(
            RequiredBandwidth::for_path(&topology, &[n(4), n(3), n(1)]).bandwidth,
            0.0
        );
        assert_eq!(RequiredBandwidth::for_path(&topology, &[]).bandwidth, 0.0);
    }
}

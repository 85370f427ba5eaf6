//! Topology file loading

use anyhow::{Context, Result};
use qosmesh_topology::{Topology, TopologySpec};
use std::fs;
use std::path::Path;
use tracing::info;

/// Read a YAML topology description and build the topology
pub fn load_topology(path: &Path) -> Result<Topology> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read topology file {}", path.display()))?;

    let spec: TopologySpec = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse topology file {}", path.display()))?;

    let topology = Topology::from_spec(spec)
        .with_context(|| format!("Invalid topology in {}", path.display()))?;

    info!(
        "Loaded topology from {}: {} nodes, {} links",
        path.display(),
        topology.node_count(),
        topology.link_count()
    );

    Ok(topology)
}

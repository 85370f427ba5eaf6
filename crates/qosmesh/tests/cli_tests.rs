use qosmesh::commands::{run_random_path, run_solve, RandomPathOptions, SolveOptions};
use qosmesh::config::Config;
use qosmesh::loader::load_topology;
use qosmesh_topology::{GraphAccessor, NodeId};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const TOPOLOGY_YAML: &str = r#"
nodes:
  - { id: 1, s_ms: 0.0, reliability: 0.99 }
  - { id: 2, s_ms: 2.0, reliability: 0.99 }
  - { id: 3, s_ms: 4.0, reliability: 0.97 }
  - { id: 4, s_ms: 0.0, reliability: 0.99 }
  - { id: 9, s_ms: 0.0, reliability: 1.0 }
links:
  - { source: 1, target: 2, delay: 5.0, bandwidth: 500.0, reliability: 0.999 }
  - { source: 2, target: 4, delay: 5.0, bandwidth: 500.0, reliability: 0.999 }
  - { source: 1, target: 3, delay: 40.0, bandwidth: 20.0, reliability: 0.95 }
  - { source: 3, target: 4, delay: 40.0, bandwidth: 20.0, reliability: 0.95 }
demands:
  - { source: 1, target: 4, bandwidth: 150.0 }
"#;

fn write_topology(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("topology.yaml");
    fs::write(&path, TOPOLOGY_YAML).unwrap();
    path
}

fn solve_options(topology: PathBuf, target: u32) -> SolveOptions {
    SolveOptions {
        topology,
        source: NodeId::new(1),
        target: NodeId::new(target),
        ants: Some(10),
        iterations: Some(10),
        seed: Some(42),
        weights: None,
    }
}

#[test]
fn test_load_topology_file() {
    let dir = TempDir::new().unwrap();
    let topology = load_topology(&write_topology(&dir)).unwrap();

    assert_eq!(topology.node_count(), 5);
    assert_eq!(topology.link_count(), 4);
    assert_eq!(topology.demand(&NodeId::new(1), &NodeId::new(4)), Some(150.0));
}

#[test]
fn test_load_topology_rejects_bad_links() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yaml");
    fs::write(
        &path,
        "nodes:\n  - { id: 1, s_ms: 0.0, reliability: 1.0 }\nlinks:\n  - { source: 1, target: 2, delay: 1.0, bandwidth: 1.0, reliability: 1.0 }\n",
    )
    .unwrap();

    let err = load_topology(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Unknown node: 2"));
}

#[test]
fn test_solve_report() {
    let dir = TempDir::new().unwrap();
    let output = run_solve(&Config::default(), &solve_options(write_topology(&dir), 4)).unwrap();

    assert!(output.contains("Path: 1 -> 2 -> 4"), "{}", output);
    assert!(output.contains("Total delay: 12.000 ms"), "{}", output);
    assert!(output.contains("Path BWs: [500.0, 500.0]"), "{}", output);
    assert!(output.contains("Required BW: 150"), "{}", output);
}

#[test]
fn test_solve_is_reproducible_with_seed() {
    let dir = TempDir::new().unwrap();
    let topology = write_topology(&dir);

    let first = run_solve(&Config::default(), &solve_options(topology.clone(), 4)).unwrap();
    let second = run_solve(&Config::default(), &solve_options(topology, 4)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_solve_unreachable() {
    let dir = TempDir::new().unwrap();
    let output = run_solve(&Config::default(), &solve_options(write_topology(&dir), 9)).unwrap();
    assert!(output.starts_with("No path from 1 to 9"), "{}", output);
}

#[test]
fn test_solve_unknown_node_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(run_solve(&Config::default(), &solve_options(write_topology(&dir), 77)).is_err());
}

#[test]
fn test_random_path() {
    let dir = TempDir::new().unwrap();
    let output = run_random_path(
        &Config::default(),
        &RandomPathOptions {
            topology: write_topology(&dir),
            source: NodeId::new(1),
            target: NodeId::new(4),
            max_length: None,
            seed: Some(3),
        },
    )
    .unwrap();

    assert!(output.starts_with("Random path: 1 -> "), "{}", output);
    assert!(output.contains(" -> 4\n"), "{}", output);
}

#[test]
fn test_create_and_load_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let created = Config::create_default(Some(path.clone())).unwrap();
    assert_eq!(created.config_path(), path.as_path());

    let loaded = Config::load(Some(path.clone())).unwrap();
    assert_eq!(loaded.optimizer.ant_count, created.optimizer.ant_count);
    assert_eq!(loaded.weights.cost_weights(), created.weights.cost_weights());
}

#[test]
fn test_load_missing_config_fails() {
    let dir = TempDir::new().unwrap();
    assert!(Config::load(Some(dir.path().join("missing.yaml"))).is_err());
    assert!(Config::load_or_default(Some(dir.path().join("missing.yaml"))).is_err());
}

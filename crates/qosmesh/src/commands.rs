//! Subcommand implementations

use crate::config::Config;
use crate::loader::load_topology;
use crate::report::{render_random_path, render_solve};
use anyhow::{Context, Result};
use qosmesh_routing::utils::random_path;
use qosmesh_routing::{AntColony, CostWeights};
use qosmesh_topology::NodeId;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;

/// Options for `qosmesh solve`; unset fields fall back to the configuration
#[derive(Debug, Clone)]
pub struct SolveOptions {
    pub topology: PathBuf,
    pub source: NodeId,
    pub target: NodeId,
    pub ants: Option<usize>,
    pub iterations: Option<usize>,
    pub seed: Option<u64>,
    pub weights: Option<CostWeights>,
}

/// Options for `qosmesh random-path`
#[derive(Debug, Clone)]
pub struct RandomPathOptions {
    pub topology: PathBuf,
    pub source: NodeId,
    pub target: NodeId,
    pub max_length: Option<usize>,
    pub seed: Option<u64>,
}

/// Parse `w1,w2,w3` into cost weights
pub fn parse_weights(s: &str) -> Result<CostWeights> {
    let values = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid weight '{}'", part.trim()))
        })
        .collect::<Result<Vec<f64>>>()?;

    match values.as_slice() {
        [delay, reliability, bandwidth] => {
            Ok(CostWeights::new(*delay, *reliability, *bandwidth)?)
        }
        _ => anyhow::bail!("Expected three comma-separated weights, got {}", values.len()),
    }
}

pub fn run_solve(config: &Config, options: &SolveOptions) -> Result<String> {
    let topology = load_topology(&options.topology)?;

    let weights = options
        .weights
        .unwrap_or_else(|| config.weights.cost_weights());
    let ants = options.ants.unwrap_or(config.optimizer.ant_count);
    let iterations = options.iterations.unwrap_or(config.optimizer.iterations);

    info!(
        "Solving {} -> {} with {} ants x {} iterations, weights {:?}",
        options.source, options.target, ants, iterations, weights
    );

    let report = match options.seed.or(config.optimizer.seed) {
        Some(seed) => AntColony::with_seed(&topology, weights, seed).solve_detailed(
            options.source,
            options.target,
            ants,
            iterations,
        ),
        None => AntColony::new(&topology, weights).solve_detailed(
            options.source,
            options.target,
            ants,
            iterations,
        ),
    }
    .context("Optimization failed")?;

    Ok(render_solve(
        &topology,
        options.source,
        options.target,
        &report,
    ))
}

pub fn run_random_path(config: &Config, options: &RandomPathOptions) -> Result<String> {
    let topology = load_topology(&options.topology)?;
    let max_length = options.max_length.unwrap_or(config.random_path.max_length);

    let mut rng = match options.seed.or(config.optimizer.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let path = random_path(
        &topology,
        options.source,
        options.target,
        max_length,
        &mut rng,
    );

    Ok(render_random_path(
        &topology,
        options.source,
        options.target,
        path.as_deref(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weights() {
        let weights = parse_weights("1, 0.5,2").unwrap();
        assert_eq!(weights, CostWeights::new(1.0, 0.5, 2.0).unwrap());

        assert!(parse_weights("1,2").is_err());
        assert!(parse_weights("1,x,2").is_err());
        assert!(parse_weights("1,-2,2").is_err());
    }
}

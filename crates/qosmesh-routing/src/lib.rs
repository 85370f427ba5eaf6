//! QosMesh Path Optimization
//!
//! This module implements multi-objective QoS path selection:
//! - Path metric aggregation (delay, reliability cost, bandwidth cost)
//! - Pheromone memory over undirected edges
//! - Ant-colony path search between a source and a target
//! - Baseline random paths and bandwidth reporting helpers

pub mod aco;
pub mod error;
pub mod metrics;
pub mod pheromone;
pub mod utils;
pub mod weights;

pub use aco::{AntColony, SolveReport};
pub use error::{Result, RoutingError};
pub use metrics::{EdgeContribution, MetricAggregator, PathMetrics};
pub use pheromone::PheromoneStore;
pub use utils::{path_bandwidths, required_bandwidth, BandwidthSummary, RequiredBandwidth};
pub use weights::{CostWeights, RoutingPolicy};

/// Multiplicative pheromone decay applied once per iteration
pub const EVAPORATION_FACTOR: f64 = 0.8;

/// Exponent applied to the local heuristic during edge selection
pub const HEURISTIC_EXPONENT: i32 = 2;

/// Pheromone value every edge starts with
pub const INITIAL_PHEROMONE: f64 = 1.0;

/// Guard added to a path's fitness before inverting it into a deposit
pub const DEPOSIT_EPSILON: f64 = 1e-4;

/// Guard used by the single-edge heuristic
pub const LOCAL_COST_EPSILON: f64 = 1e-4;

/// Guard against ln(0) in reliability costs
pub const RELIABILITY_EPSILON: f64 = 1e-12;

/// Guard against division by zero in bandwidth costs
pub const BANDWIDTH_EPSILON: f64 = 1e-9;

/// Reference capacity (Mbps) used as the bandwidth cost numerator (1 Gbps)
pub const REFERENCE_CAPACITY: f64 = 1000.0;

/// Divisor turning milliseconds of delay into the fitness delay term
pub const DELAY_SCALE_MS: f64 = 1000.0;

/// Default number of ants per iteration
pub const DEFAULT_ANT_COUNT: usize = 20;

/// Default number of iterations
pub const DEFAULT_ITERATIONS: usize = 20;

/// Default node budget for random baseline paths
pub const DEFAULT_MAX_PATH_LENGTH: usize = 20;

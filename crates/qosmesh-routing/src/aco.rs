//! Ant-colony path optimization
//!
//! Each iteration runs in three phases:
//! 1. Construction: every ant walks from the source, choosing unvisited
//!    neighbors at random with probability proportional to
//!    `tau * eta^2`, until it reaches the target or runs out of moves.
//! 2. Evaporation: every pheromone value is multiplied by 0.8.
//! 3. Reinforcement: each complete path deposits `1 / (fitness + 1e-4)` on
//!    all of its edges, and the best path seen so far is updated.
//!
//! Pheromones are only read during construction and only written after all
//! ants of the iteration have finished, so ants within one iteration never
//! influence each other.

use crate::error::{Result, RoutingError};
use crate::metrics::{MetricAggregator, PathMetrics};
use crate::pheromone::PheromoneStore;
use crate::weights::CostWeights;
use crate::{
    DELAY_SCALE_MS, DEPOSIT_EPSILON, EVAPORATION_FACTOR, HEURISTIC_EXPONENT, LOCAL_COST_EPSILON,
};
use qosmesh_topology::{EdgeKey, GraphAccessor, LinkAttributes, NodeId};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tracing::{debug, info};

/// Outcome of an optimization run
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// Lowest-fitness path found, if any ant reached the target
    pub best_path: Option<Vec<NodeId>>,
    /// Metrics of `best_path`
    pub best_metrics: Option<PathMetrics>,
    /// Fitness of `best_path` (infinite when no path was found)
    pub best_fitness: f64,
    /// Best fitness so far, recorded at the end of each iteration
    pub fitness_history: Vec<f64>,
    /// Ants that reached the target
    pub completed_ants: usize,
    /// Ants that hit a dead end
    pub abandoned_ants: usize,
}

impl SolveReport {
    fn empty() -> Self {
        Self {
            best_path: None,
            best_metrics: None,
            best_fitness: f64::INFINITY,
            fitness_history: Vec::new(),
            completed_ants: 0,
            abandoned_ants: 0,
        }
    }

    pub fn found(&self) -> bool {
        self.best_path.is_some()
    }
}

/// Single-edge cost used to bias neighbor selection.
///
/// Unlike the path fitness this uses linear `1 - reliability`, ignores node
/// attributes and only looks at one link.
pub fn local_edge_cost(link: &LinkAttributes, weights: &CostWeights) -> f64 {
    weights.delay * (link.delay / DELAY_SCALE_MS)
        + weights.reliability * (1.0 - link.reliability)
        + weights.bandwidth * (1.0 / (link.bandwidth + LOCAL_COST_EPSILON))
}

/// Heuristic desirability `1 / (local_cost + ε)`
pub fn edge_desirability(link: &LinkAttributes, weights: &CostWeights) -> f64 {
    1.0 / (local_edge_cost(link, weights) + LOCAL_COST_EPSILON)
}

/// Ant-colony optimizer over a graph
pub struct AntColony<'g, G: ?Sized, R = StdRng> {
    graph: &'g G,
    weights: CostWeights,
    pheromones: PheromoneStore,
    rng: R,
}

impl<'g, G: GraphAccessor + ?Sized> AntColony<'g, G, StdRng> {
    /// Create an optimizer with an entropy-seeded random source
    pub fn new(graph: &'g G, weights: CostWeights) -> Self {
        Self::with_rng(graph, weights, StdRng::from_entropy())
    }

    /// Create a reproducible optimizer
    pub fn with_seed(graph: &'g G, weights: CostWeights, seed: u64) -> Self {
        Self::with_rng(graph, weights, StdRng::seed_from_u64(seed))
    }
}

impl<'g, G: GraphAccessor + ?Sized, R: Rng> AntColony<'g, G, R> {
    /// Create an optimizer drawing randomness from `rng`
    pub fn with_rng(graph: &'g G, weights: CostWeights, rng: R) -> Self {
        let pheromones = PheromoneStore::new(graph.all_edges());
        debug!("Pheromone table seeded with {} edges", pheromones.len());

        Self {
            graph,
            weights,
            pheromones,
            rng,
        }
    }

    pub fn weights(&self) -> &CostWeights {
        &self.weights
    }

    pub fn pheromones(&self) -> &PheromoneStore {
        &self.pheromones
    }

    /// Find a low-cost path from `source` to `target`.
    ///
    /// Returns `Ok(None)` when no ant reached the target in any iteration.
    pub fn solve(
        &mut self,
        source: NodeId,
        target: NodeId,
        ant_count: usize,
        iteration_count: usize,
    ) -> Result<Option<Vec<NodeId>>> {
        self.solve_detailed(source, target, ant_count, iteration_count)
            .map(|report| report.best_path)
    }

    /// Like [`solve`](Self::solve), also reporting metrics and run statistics
    pub fn solve_detailed(
        &mut self,
        source: NodeId,
        target: NodeId,
        ant_count: usize,
        iteration_count: usize,
    ) -> Result<SolveReport> {
        if ant_count == 0 {
            return Err(RoutingError::InvalidParameter {
                name: "ant_count",
                reason: "must be at least 1".to_string(),
            });
        }
        if iteration_count == 0 {
            return Err(RoutingError::InvalidParameter {
                name: "iteration_count",
                reason: "must be at least 1".to_string(),
            });
        }
        for node in [source, target] {
            if !self.graph.contains_node(&node) {
                return Err(RoutingError::UnknownNode(node));
            }
        }

        let aggregator = MetricAggregator::new(self.graph);
        let mut report = SolveReport::empty();

        if source == target {
            let path = vec![source];
            let metrics = aggregator.evaluate(&path);
            report.best_fitness = metrics.fitness(&self.weights);
            report.best_metrics = Some(metrics);
            report.best_path = Some(path);
            return Ok(report);
        }

        for iteration in 0..iteration_count {
            let mut paths = Vec::with_capacity(ant_count);
            for _ in 0..ant_count {
                match self.construct_path(source, target) {
                    Some(path) => paths.push(path),
                    None => report.abandoned_ants += 1,
                }
            }
            report.completed_ants += paths.len();

            self.pheromones.decay(EVAPORATION_FACTOR);

            for path in paths {
                let metrics = aggregator.evaluate(&path);
                let fitness = metrics.fitness(&self.weights);
                let deposit = 1.0 / (fitness + DEPOSIT_EPSILON);

                for pair in path.windows(2) {
                    self.pheromones
                        .reinforce(&EdgeKey::new(pair[0], pair[1]), deposit);
                }

                if fitness < report.best_fitness {
                    report.best_fitness = fitness;
                    report.best_metrics = Some(metrics);
                    report.best_path = Some(path);
                }
            }

            debug!(
                "Iteration {}/{}: best fitness {:.6}",
                iteration + 1,
                iteration_count,
                report.best_fitness
            );
            report.fitness_history.push(report.best_fitness);
        }

        match &report.best_path {
            Some(path) => info!(
                "Best path {} -> {}: {} hops, fitness {:.6} ({} ants completed, {} abandoned)",
                source,
                target,
                path.len() - 1,
                report.best_fitness,
                report.completed_ants,
                report.abandoned_ants
            ),
            None => info!(
                "No path {} -> {} after {} iterations of {} ants",
                source, target, iteration_count, ant_count
            ),
        }

        Ok(report)
    }

    /// Let one ant walk from `source` towards `target`.
    ///
    /// Returns `None` if the ant reaches a node with no unvisited neighbor.
    pub fn construct_path(&mut self, source: NodeId, target: NodeId) -> Option<Vec<NodeId>> {
        let mut current = source;
        let mut visited = HashSet::from([source]);
        let mut path = vec![source];

        while current != target {
            let next = self.choose_next_node(&current, &visited)?;
            path.push(next);
            visited.insert(next);
            current = next;
        }

        Some(path)
    }

    /// Pick an unvisited neighbor of `current` by weighted random sampling
    pub fn choose_next_node(
        &mut self,
        current: &NodeId,
        visited: &HashSet<NodeId>,
    ) -> Option<NodeId> {
        let candidates: Vec<NodeId> = self
            .graph
            .neighbors(current)
            .into_iter()
            .filter(|n| !visited.contains(n))
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let weights: Vec<f64> = candidates
            .iter()
            .map(|n| self.selection_weight(current, n))
            .collect();

        match WeightedIndex::new(&weights) {
            Ok(distribution) => Some(candidates[distribution.sample(&mut self.rng)]),
            Err(e) => {
                debug!(
                    "Degenerate selection weights at node {} ({}), choosing uniformly",
                    current, e
                );
                candidates.choose(&mut self.rng).copied()
            }
        }
    }

    /// `tau * eta^2` for the edge `current -> next`
    pub(crate) fn selection_weight(&self, current: &NodeId, next: &NodeId) -> f64 {
        let tau = self.pheromones.get(&EdgeKey::new(*current, *next));
        match self.graph.edge_attributes(current, next) {
            Some(link) => tau * edge_desirability(&link, &self.weights).powi(HEURISTIC_EXPONENT),
            None => {
                debug!("Neighbor {} of {} has no link attributes", next, current);
                0.0
            }
        }
    }
}

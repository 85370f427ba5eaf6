//! Pheromone memory over undirected edges

use crate::INITIAL_PHEROMONE;
use qosmesh_topology::EdgeKey;
use std::collections::HashMap;

/// Desirability value per edge
///
/// The key set is fixed at construction: reinforcement only updates edges
/// that were seeded, it never inserts.
#[derive(Debug, Clone, Default)]
pub struct PheromoneStore {
    trails: HashMap<EdgeKey, f64>,
}

impl PheromoneStore {
    /// Seed every edge with the initial pheromone value
    pub fn new(edges: impl IntoIterator<Item = EdgeKey>) -> Self {
        Self {
            trails: edges
                .into_iter()
                .map(|edge| (edge, INITIAL_PHEROMONE))
                .collect(),
        }
    }

    /// Current value of an edge, or the initial value for unknown edges
    pub fn get(&self, edge: &EdgeKey) -> f64 {
        self.trails.get(edge).copied().unwrap_or(INITIAL_PHEROMONE)
    }

    pub fn contains(&self, edge: &EdgeKey) -> bool {
        self.trails.contains_key(edge)
    }

    /// Multiply every stored value by `factor`
    pub fn decay(&mut self, factor: f64) {
        for value in self.trails.values_mut() {
            *value *= factor;
        }
    }

    /// Add `amount` to an existing edge. Returns false if the edge is unknown.
    pub fn reinforce(&mut self, edge: &EdgeKey, amount: f64) -> bool {
        match self.trails.get_mut(edge) {
            Some(value) => {
                *value += amount;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.trails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EdgeKey, &f64)> {
        self.trails.iter()
    }

    /// Smallest stored value, if any
    pub fn min_value(&self) -> Option<f64> {
        self.trails.values().copied().reduce(f64::min)
    }
}

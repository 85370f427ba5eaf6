//! Cost weights for the fitness function

use crate::error::{Result, RoutingError};
use serde::{Deserialize, Serialize};

/// Cost calculation weights (w1, w2, w3)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostWeights {
    /// Weight of the end-to-end delay term
    pub delay: f64,
    /// Weight of the log-domain reliability cost
    pub reliability: f64,
    /// Weight of the bandwidth cost
    pub bandwidth: f64,
}

impl CostWeights {
    pub fn new(delay: f64, reliability: f64, bandwidth: f64) -> Result<Self> {
        let weights = Self {
            delay,
            reliability,
            bandwidth,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// Check that every weight is finite and non-negative
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("delay", self.delay),
            ("reliability", self.reliability),
            ("bandwidth", self.bandwidth),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RoutingError::InvalidWeights(format!(
                    "{} weight must be finite and >= 0, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            delay: 1.0,
            reliability: 1.0,
            bandwidth: 1.0,
        }
    }
}

/// Routing policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingPolicy {
    /// Equal weights
    Balanced,
    /// Minimize delay
    LowLatency,
    /// Minimize unreliability
    HighReliability,
    /// Prefer high-capacity links
    BandwidthEfficient,
}

impl RoutingPolicy {
    /// Get cost weights for this policy
    pub fn weights(&self) -> CostWeights {
        match self {
            RoutingPolicy::Balanced => CostWeights::default(),
            RoutingPolicy::LowLatency => CostWeights {
                delay: 10.0,
                reliability: 1.0,
                bandwidth: 0.1,
            },
            RoutingPolicy::HighReliability => CostWeights {
                delay: 0.5,
                reliability: 20.0,
                bandwidth: 0.1,
            },
            RoutingPolicy::BandwidthEfficient => CostWeights {
                delay: 0.5,
                reliability: 1.0,
                bandwidth: 5.0,
            },
        }
    }
}

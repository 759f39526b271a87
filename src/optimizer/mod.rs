// src/optimizer/mod.rs

//! Searches for the cycle timing that maximizes profit.
//!
//! The two free variables are T1 (first-lot sellout) and T (cycle end),
//! constrained to the box `[0, tn] x [tn, upper_bound]` while every other
//! parameter stays at its current value. Each candidate is pushed through
//! the model's own update path, so the reported optimum is exactly what a
//! manual evaluation at (T1*, T*) returns.
//!
//! The search is local. The profit surface is near-quadratic inside the box
//! but changes formula at tn, which sits on a box edge, so a simplex run is
//! not guaranteed to land on the global maximum; the default configuration
//! therefore restarts from several seeded points and keeps the best result.

pub mod search;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

use crate::error::{ModelError, ModelResult};
use crate::model::inventory::InventoryModel;
use crate::model::params::ModelParameters;
use crate::optimizer::search::{minimize, SearchConfig};

/// Tunables for the profit search.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Relative convergence tolerance of one simplex run.
    pub tolerance: f64,
    /// Iteration cap of one simplex run.
    pub max_iterations: usize,
    /// Random restarts run in addition to the deterministic midpoint start.
    pub restarts: usize,
    /// Seed for the restart sampler; a fixed seed keeps runs reproducible.
    pub seed: u64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_iterations: 300,
            restarts: 3,
            seed: 42,
        }
    }
}

/// The maximizing timing pair and the profit it achieves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Optimum {
    /// T1*, optimal first-lot sellout time.
    pub t1: f64,
    /// T*, optimal cycle end.
    pub t_end: f64,
    /// Profit at (T1*, T*) under the model's active policy.
    pub profit: f64,
}

/// Bounded maximization of cycle profit over (T1, T).
#[derive(Debug, Clone, Default)]
pub struct ProfitOptimizer {
    config: OptimizerConfig,
}

impl ProfitOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Finds the profit-maximizing (T1, T) for the model's current demand,
    /// price, and saturation parameters.
    ///
    /// `upper_bound` caps the cycle end. The box must be non-degenerate:
    /// `tn > 0` and `upper_bound > tn`, otherwise `InvalidBounds`. The model
    /// itself is untouched; the search works on a private clone.
    pub fn optimize(&self, model: &InventoryModel, upper_bound: f64) -> ModelResult<Optimum> {
        let params = *model.parameters();
        let tn = params.tn;
        if !upper_bound.is_finite() || tn <= 0.0 || upper_bound <= tn {
            return Err(ModelError::InvalidBounds {
                tn,
                upper: upper_bound,
            });
        }

        let bounds = [(0.0, tn), (tn, upper_bound)];
        let mut scratch = model.clone();
        let mut objective = |x: [f64; 2]| -> f64 {
            let candidate = ModelParameters {
                t1: x[0],
                t_end: x[1],
                ..params
            };
            match scratch.set_parameters(candidate) {
                Ok(()) => -scratch.derived().profit,
                // The search only proposes projected points, which always
                // validate; anything else is simply never the minimum.
                Err(_) => f64::INFINITY,
            }
        };

        let search = SearchConfig {
            tolerance: self.config.tolerance,
            max_iterations: self.config.max_iterations,
        };

        let mut starts = vec![[tn / 2.0, (tn + upper_bound) / 2.0]];
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        for _ in 0..self.config.restarts {
            starts.push([
                rng.gen_range(0.0..=tn),
                rng.gen_range(tn..=upper_bound),
            ]);
        }

        let mut best: Option<([f64; 2], f64)> = None;
        for (run, start) in starts.iter().enumerate() {
            let (point, value) = minimize(&mut objective, &bounds, *start, &search);
            debug!(
                run,
                t1 = point[0],
                t_end = point[1],
                profit = -value,
                "simplex run finished"
            );
            if best.map_or(true, |(_, best_value)| value < best_value) {
                best = Some((point, value));
            }
        }

        // At least the midpoint start always runs.
        let (point, value) = match best {
            Some(found) => found,
            None => unreachable!("search ran with no starts"),
        };
        Ok(Optimum {
            t1: point[0],
            t_end: point[1],
            profit: -value,
        })
    }
}

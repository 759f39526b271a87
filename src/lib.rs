//! Economics of a single inventory replenishment cycle with ramp demand and
//! planned shortage.
//!
//! Demand ramps linearly until a saturation time and stays flat afterwards.
//! The first lot covers sales until T1; demand from T1 to the cycle end T
//! accumulates as shortage, cleared by the second lot at a per-unit-time
//! penalty. The model derives the lot sizes, the shortage cost, and the
//! cycle profit from a validated parameter set, and the optimizer searches
//! for the (T1, T) pair that maximizes profit.
//!
//! # Example
//!
//! ```rust
//! use shortage_cycle::{InventoryModel, ModelParameters, ProfitOptimizer, ProfitPolicy};
//!
//! let params = ModelParameters {
//!     shortage_penalty: 300.0,
//!     ..ModelParameters::default()
//! };
//! let model = InventoryModel::new(params, ProfitPolicy::PerCycle)?;
//! assert_eq!(model.derived().initial_lot, 21.0);
//!
//! let optimum = ProfitOptimizer::default().optimize(&model, 15.0)?;
//! assert!(optimum.profit >= model.derived().profit);
//! # Ok::<(), shortage_cycle::ModelError>(())
//! ```

pub mod error;
pub mod io;
pub mod model;
pub mod optimizer;

pub use error::{ModelError, ModelResult};
pub use model::curves::{CurveKind, CurvePoint, CurveSamples};
pub use model::inventory::{DerivedQuantities, InventoryModel};
pub use model::params::{ModelParameters, ProfitPolicy};
pub use optimizer::{Optimum, OptimizerConfig, ProfitOptimizer};

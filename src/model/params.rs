// src/model/params.rs

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Scalar parameters of one replenishment cycle.
///
/// Demand ramps linearly until the saturation time `tn` and stays flat
/// afterwards. The first lot runs out at `t1`; demand between `t1` and the
/// cycle end `t_end` accumulates as shortage, cleared by the second lot.
///
/// Every field is an always-present value. There is no "unset" state, so a
/// legitimate zero (e.g. a free shortage penalty) cannot read as missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// T1, the time the first lot is fully sold. `0 <= t1 <= tn`.
    pub t1: f64,
    /// tn, the demand saturation time. `t1 <= tn <= t_end`.
    pub tn: f64,
    /// T, the end of the replenishment cycle. `tn <= t_end`.
    pub t_end: f64,
    /// a, demand rate at t = 0.
    pub demand_intercept: f64,
    /// b, growth of the demand rate per unit time while t < tn.
    pub demand_slope: f64,
    /// p, price charged per unit. `unit_price >= unit_cost`.
    pub unit_price: f64,
    /// c, purchase cost per unit.
    pub unit_cost: f64,
    /// s, penalty per unit-time of outstanding shortage.
    pub shortage_penalty: f64,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            t1: 3.0,
            tn: 6.0,
            t_end: 15.0,
            demand_intercept: 1.0,
            demand_slope: 4.0,
            unit_price: 15_000.0,
            unit_cost: 10_000.0,
            shortage_penalty: 0.0,
        }
    }
}

impl ModelParameters {
    /// Checks the full parameter domain.
    ///
    /// Rejects non-finite values, a broken timing order, negative demand or
    /// cost coefficients, and a sale price below the purchase cost. Clamping
    /// out-of-range inputs is the caller's job; the model only rejects.
    pub fn validate(&self) -> ModelResult<()> {
        let fields = [
            ("t1", self.t1),
            ("tn", self.tn),
            ("t_end", self.t_end),
            ("demand_intercept", self.demand_intercept),
            ("demand_slope", self.demand_slope),
            ("unit_price", self.unit_price),
            ("unit_cost", self.unit_cost),
            ("shortage_penalty", self.shortage_penalty),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ModelError::InvalidConfiguration {
                    reason: format!("{name} is not finite ({value})"),
                });
            }
        }

        if !(0.0 <= self.t1 && self.t1 <= self.tn && self.tn <= self.t_end) {
            return Err(ModelError::InvalidConfiguration {
                reason: format!(
                    "timing order 0 <= T1 <= tn <= T violated: T1={}, tn={}, T={}",
                    self.t1, self.tn, self.t_end
                ),
            });
        }

        for (name, value) in [
            ("demand_intercept", self.demand_intercept),
            ("demand_slope", self.demand_slope),
            ("unit_cost", self.unit_cost),
            ("shortage_penalty", self.shortage_penalty),
        ] {
            if value < 0.0 {
                return Err(ModelError::InvalidConfiguration {
                    reason: format!("{name} must be non-negative, got {value}"),
                });
            }
        }

        if self.unit_price < self.unit_cost {
            return Err(ModelError::InvalidConfiguration {
                reason: format!(
                    "unit price {} is below unit cost {}",
                    self.unit_price, self.unit_cost
                ),
            });
        }

        Ok(())
    }
}

/// How per-cycle profit is reported.
///
/// The application variants disagreed on this, so it is an explicit switch
/// rather than a baked-in choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProfitPolicy {
    /// Total profit over the whole cycle: (p - c)·Q - V.
    #[default]
    PerCycle,
    /// Revenue averaged over the cycle length: (p - c)·Q/T - V.
    TimeAveraged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parameters_are_valid() {
        assert!(ModelParameters::default().validate().is_ok());
    }

    #[test]
    fn rejects_broken_timing_order() {
        // t1 past the saturation time
        let params = ModelParameters {
            t1: 7.0,
            ..ModelParameters::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ModelError::InvalidConfiguration { .. })
        ));

        // saturation past the cycle end
        let params = ModelParameters {
            tn: 20.0,
            ..ModelParameters::default()
        };
        assert!(params.validate().is_err());

        let params = ModelParameters {
            t1: -1.0,
            ..ModelParameters::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn rejects_price_below_cost() {
        let params = ModelParameters {
            unit_price: 9_999.0,
            ..ModelParameters::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn rejects_negative_coefficients() {
        for field in 0..4 {
            let mut params = ModelParameters::default();
            match field {
                0 => params.demand_intercept = -1.0,
                1 => params.demand_slope = -0.5,
                2 => params.unit_cost = -10.0,
                _ => params.shortage_penalty = -300.0,
            }
            assert!(params.validate().is_err(), "field {field} accepted");
        }
    }

    #[test]
    fn rejects_non_finite_values() {
        let params = ModelParameters {
            t_end: f64::NAN,
            ..ModelParameters::default()
        };
        assert!(params.validate().is_err());

        let params = ModelParameters {
            unit_price: f64::INFINITY,
            ..ModelParameters::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn zero_penalty_is_a_valid_setting() {
        // Zero is a legitimate value, not a missing one.
        let params = ModelParameters {
            shortage_penalty: 0.0,
            ..ModelParameters::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn equal_times_are_allowed() {
        let params = ModelParameters {
            t1: 6.0,
            tn: 6.0,
            t_end: 6.0,
            ..ModelParameters::default()
        };
        assert!(params.validate().is_ok());
    }
}

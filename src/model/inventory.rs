// src/model/inventory.rs

use serde::Serialize;

use crate::error::{ModelError, ModelResult};
use crate::model::curves::{self, CurveKind, CurveSamples};
use crate::model::params::{ModelParameters, ProfitPolicy};

/// The five aggregates derived from the current parameters.
///
/// These have no life of their own: every successful parameter update
/// recomputes all of them together, so they are never partially stale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedQuantities {
    /// q0, units in the first lot (stock on hand at t = 0).
    pub initial_lot: f64,
    /// B, shortage outstanding at the cycle end.
    pub max_shortage: f64,
    /// Q = q0 + B, total units ordered over the cycle.
    pub total_order: f64,
    /// V, penalty accumulated over the shortage interval [T1, T].
    pub shortage_cost: f64,
    /// TP under the active profit policy.
    pub profit: f64,
}

/// One replenishment cycle: parameters, the cached breakpoint value I(tn),
/// and the derived quantities.
///
/// The model is meant to be owned and mutated by a single caller; updates go
/// through [`set_parameters`](Self::set_parameters) and either fully succeed
/// or leave the previous state untouched. Evaluation methods are pure reads.
#[derive(Debug, Clone)]
pub struct InventoryModel {
    params: ModelParameters,
    policy: ProfitPolicy,
    // Ramp-branch value at tn, computed once per update. The post-saturation
    // branch and the shortage integral both continue from this exact value.
    inventory_at_tn: f64,
    derived: DerivedQuantities,
}

impl InventoryModel {
    pub fn new(params: ModelParameters, policy: ProfitPolicy) -> ModelResult<Self> {
        params.validate()?;
        let inventory_at_tn = curves::ramp_inventory(&params, params.tn);
        let derived = Self::compute_derived(&params, policy, inventory_at_tn);
        Ok(Self {
            params,
            policy,
            inventory_at_tn,
            derived,
        })
    }

    /// Replaces the parameter set and recomputes every derived quantity.
    ///
    /// On a validation failure nothing changes.
    pub fn set_parameters(&mut self, params: ModelParameters) -> ModelResult<()> {
        params.validate()?;
        let inventory_at_tn = curves::ramp_inventory(&params, params.tn);
        self.derived = Self::compute_derived(&params, self.policy, inventory_at_tn);
        self.inventory_at_tn = inventory_at_tn;
        self.params = params;
        Ok(())
    }

    /// Switches the profit policy and recomputes the derived quantities.
    pub fn set_policy(&mut self, policy: ProfitPolicy) {
        self.policy = policy;
        self.derived = Self::compute_derived(&self.params, policy, self.inventory_at_tn);
    }

    pub fn parameters(&self) -> &ModelParameters {
        &self.params
    }

    pub fn policy(&self) -> ProfitPolicy {
        self.policy
    }

    pub fn derived(&self) -> DerivedQuantities {
        self.derived
    }

    /// Inventory level I(t). Negative values are outstanding shortage.
    pub fn inventory_level(&self, t: f64) -> ModelResult<f64> {
        self.check_domain(t)?;
        Ok(curves::inventory_at(&self.params, self.inventory_at_tn, t))
    }

    /// Demand rate D(t).
    pub fn demand_rate(&self, t: f64) -> ModelResult<f64> {
        self.check_domain(t)?;
        Ok(curves::demand_at(&self.params, t))
    }

    /// Samples a curve over the whole cycle [0, T) at the given step.
    pub fn sample_curve(&self, kind: CurveKind, step: f64) -> ModelResult<CurveSamples> {
        self.sample_curve_between(kind, 0.0, self.params.t_end, step)
    }

    /// Samples a curve over [from, to) at the given step.
    ///
    /// The range must lie inside the cycle and the step must be positive.
    pub fn sample_curve_between(
        &self,
        kind: CurveKind,
        from: f64,
        to: f64,
        step: f64,
    ) -> ModelResult<CurveSamples> {
        if !(step.is_finite() && step > 0.0) {
            return Err(ModelError::InvalidConfiguration {
                reason: format!("sampling step must be positive and finite, got {step}"),
            });
        }
        self.check_domain(from)?;
        self.check_domain(to)?;
        Ok(CurveSamples::new(
            kind,
            self.params,
            self.inventory_at_tn,
            from,
            to,
            step,
        ))
    }

    fn check_domain(&self, t: f64) -> ModelResult<()> {
        if !t.is_finite() || t < 0.0 || t > self.params.t_end {
            return Err(ModelError::OutOfDomain {
                t,
                t_end: self.params.t_end,
            });
        }
        Ok(())
    }

    fn compute_derived(
        params: &ModelParameters,
        policy: ProfitPolicy,
        inventory_at_tn: f64,
    ) -> DerivedQuantities {
        let a = params.demand_intercept;
        let b = params.demand_slope;
        let t1 = params.t1;
        let tn = params.tn;
        let t_end = params.t_end;

        // q0 = a·T1 + b/2·T1², the ramp branch at t = 0.
        let initial_lot = curves::ramp_inventory(params, 0.0);

        // B = -I(T). Non-negative whenever the timing order holds, so it is
        // not clamped here.
        let max_shortage = -curves::inventory_at(params, inventory_at_tn, t_end);

        let total_order = initial_lot + max_shortage;

        // V = -s·∫[T1,T] I dt, with the integral split at the breakpoint:
        //   ∫[T1,tn] I dt = -(T1 - tn)²/6 · (3a + b·(tn + 2·T1))
        //   ∫[tn,T]  I dt = I(tn)·(T - tn) - (a + b·tn)·(T - tn)²/2
        let ramp_piece = -(t1 - tn) * (t1 - tn) / 6.0 * (3.0 * a + b * (tn + 2.0 * t1));
        let tail = t_end - tn;
        let saturated_piece = inventory_at_tn * tail - (a + b * tn) * tail * tail / 2.0;
        let shortage_cost = -params.shortage_penalty * (ramp_piece + saturated_piece);

        let margin = (params.unit_price - params.unit_cost) * total_order;
        let profit = match policy {
            ProfitPolicy::PerCycle => margin - shortage_cost,
            // Averaged revenue over the cycle length. An all-zero cycle has
            // T = 0 and Q = 0; its averaged revenue is taken as 0.
            ProfitPolicy::TimeAveraged => {
                let averaged = if t_end > 0.0 { margin / t_end } else { 0.0 };
                averaged - shortage_cost
            }
        };

        DerivedQuantities {
            initial_lot,
            max_shortage,
            total_order,
            shortage_cost,
            profit,
        }
    }
}

impl Default for InventoryModel {
    fn default() -> Self {
        // The default parameter set is valid by construction.
        match Self::new(ModelParameters::default(), ProfitPolicy::default()) {
            Ok(model) => model,
            Err(_) => unreachable!("default parameters validate"),
        }
    }
}

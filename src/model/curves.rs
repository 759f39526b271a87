// src/model/curves.rs
//
// Closed-form evaluation of the two cycle curves.
//
// Demand ramps then saturates:
//
//   D(t) = a + b·t          0 <= t < tn
//   D(t) = a + b·tn         t >= tn
//
// Inventory drains at rate D(t), so I'(t) = -D(t) with I(T1) = 0:
//
//   I(t) = a·(T1 - t) + b/2·(T1² - t²)      0 <= t <= tn
//   I(t) = I(tn) - (a + b·tn)·(t - tn)      tn < t <= T
//
// The post-saturation branch continues from the value the ramp branch takes
// at tn. That value is computed once by the owning model and threaded through
// here, so both branches meet at the breakpoint exactly.

use serde::{Deserialize, Serialize};

use crate::model::params::ModelParameters;

/// Ramp-branch inventory level. Also yields q0 when evaluated at t = 0.
pub(crate) fn ramp_inventory(params: &ModelParameters, t: f64) -> f64 {
    let a = params.demand_intercept;
    let b = params.demand_slope;
    a * (params.t1 - t) + b / 2.0 * (params.t1 * params.t1 - t * t)
}

/// Inventory level at `t`, for `t` already known to lie in [0, T].
pub(crate) fn inventory_at(params: &ModelParameters, inventory_at_tn: f64, t: f64) -> f64 {
    if t <= params.tn {
        ramp_inventory(params, t)
    } else {
        let saturated_rate = params.demand_intercept + params.demand_slope * params.tn;
        inventory_at_tn - saturated_rate * (t - params.tn)
    }
}

/// Demand rate at `t`, for `t` already known to lie in [0, T].
pub(crate) fn demand_at(params: &ModelParameters, t: f64) -> f64 {
    if t < params.tn {
        params.demand_intercept + params.demand_slope * t
    } else {
        params.demand_intercept + params.demand_slope * params.tn
    }
}

/// Which of the two cycle curves to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CurveKind {
    /// Inventory level I(t).
    Inventory,
    /// Demand rate D(t).
    Demand,
}

/// One sampled point of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub t: f64,
    pub value: f64,
}

/// Lazy iterator over a curve on the uniform grid `from + i·step` for
/// `t < to` (half-open, so the right endpoint is excluded).
///
/// Carries its own snapshot of the parameters and the cached breakpoint
/// value, so it stays valid and restartable (via `Clone`) regardless of what
/// happens to the model afterwards. Grid points are derived from the index by
/// multiplication to keep long grids free of accumulated addition error.
#[derive(Debug, Clone)]
pub struct CurveSamples {
    kind: CurveKind,
    params: ModelParameters,
    inventory_at_tn: f64,
    from: f64,
    to: f64,
    step: f64,
    index: usize,
}

impl CurveSamples {
    pub(crate) fn new(
        kind: CurveKind,
        params: ModelParameters,
        inventory_at_tn: f64,
        from: f64,
        to: f64,
        step: f64,
    ) -> Self {
        Self {
            kind,
            params,
            inventory_at_tn,
            from,
            to,
            step,
            index: 0,
        }
    }

    pub fn kind(&self) -> CurveKind {
        self.kind
    }
}

impl Iterator for CurveSamples {
    type Item = CurvePoint;

    fn next(&mut self) -> Option<CurvePoint> {
        let t = self.from + self.index as f64 * self.step;
        if t >= self.to {
            return None;
        }
        self.index += 1;
        let value = match self.kind {
            CurveKind::Inventory => inventory_at(&self.params, self.inventory_at_tn, t),
            CurveKind::Demand => demand_at(&self.params, t),
        };
        Some(CurvePoint { t, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> ModelParameters {
        ModelParameters::default()
    }

    #[test]
    fn branches_meet_at_the_saturation_time() {
        let p = params();
        let at_tn = ramp_inventory(&p, p.tn);
        // Approaching tn from either side lands on the same value.
        let below = inventory_at(&p, at_tn, p.tn - 1e-9);
        let above = inventory_at(&p, at_tn, p.tn + 1e-9);
        assert_relative_eq!(below, at_tn, epsilon = 1e-6);
        assert_relative_eq!(above, at_tn, epsilon = 1e-6);
    }

    #[test]
    fn demand_ramps_then_stays_flat() {
        let p = params();
        let mut previous = f64::NEG_INFINITY;
        for i in 0..60 {
            let t = i as f64 * 0.1;
            let d = demand_at(&p, t);
            assert!(d >= previous, "demand decreased at t={t}");
            previous = d;
        }
        let saturated = p.demand_intercept + p.demand_slope * p.tn;
        for i in 0..10 {
            let t = p.tn + i as f64;
            assert_relative_eq!(demand_at(&p, t), saturated);
        }
    }

    #[test]
    fn ramp_at_zero_is_the_first_lot_size() {
        let p = params();
        // a·T1 + b/2·T1² = 1·3 + 2·9 = 21
        assert_relative_eq!(ramp_inventory(&p, 0.0), 21.0);
    }

    #[test]
    fn samples_cover_a_half_open_grid() {
        let p = params();
        let at_tn = ramp_inventory(&p, p.tn);
        let samples = CurveSamples::new(CurveKind::Demand, p, at_tn, 0.0, 1.0, 0.25);
        let ts: Vec<f64> = samples.map(|point| point.t).collect();
        assert_eq!(ts, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn cloned_samples_restart_from_the_beginning() {
        let p = params();
        let at_tn = ramp_inventory(&p, p.tn);
        let mut samples = CurveSamples::new(CurveKind::Inventory, p, at_tn, 0.0, p.t_end, 0.1);
        let fresh = samples.clone();
        let first_pass: Vec<CurvePoint> = samples.by_ref().take(5).collect();
        let second_pass: Vec<CurvePoint> = fresh.take(5).collect();
        assert_eq!(first_pass, second_pass);
    }
}

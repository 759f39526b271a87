// src/optimizer/search.rs
//
// Hand-rolled Nelder-Mead simplex minimization over a 2-D box. Candidate
// vertices are projected onto the box, so the objective is only ever
// evaluated at feasible points. Derivative-free: the profit surface has a
// formula change sitting on a box edge, where finite-difference gradients
// misbehave.

/// Termination controls for one simplex run.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Stop once the spread of objective values across the simplex drops
    /// below this, relative to the best value.
    pub tolerance: f64,
    /// Hard cap on iterations, in case the simplex keeps crawling.
    pub max_iterations: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_iterations: 300,
        }
    }
}

fn clamp_to(bounds: &[(f64, f64); 2], x: [f64; 2]) -> [f64; 2] {
    [
        x[0].clamp(bounds[0].0, bounds[0].1),
        x[1].clamp(bounds[1].0, bounds[1].1),
    ]
}

/// Minimizes `objective` over the box, starting from `start`.
///
/// Returns the best vertex found and its objective value. The start point is
/// projected into the box first; the box must have positive width in both
/// dimensions.
pub fn minimize<F>(
    mut objective: F,
    bounds: &[(f64, f64); 2],
    start: [f64; 2],
    config: &SearchConfig,
) -> ([f64; 2], f64)
where
    F: FnMut([f64; 2]) -> f64,
{
    let start = clamp_to(bounds, start);

    // Initial simplex: the start plus one offset per axis, stepping away
    // from the nearer box edge so no vertex collapses onto another.
    let mut simplex: Vec<([f64; 2], f64)> = Vec::with_capacity(3);
    simplex.push((start, objective(start)));
    for axis in 0..2 {
        let (lo, hi) = bounds[axis];
        let offset = 0.1 * (hi - lo);
        let mut vertex = start;
        vertex[axis] = if start[axis] + offset <= hi {
            start[axis] + offset
        } else {
            start[axis] - offset
        };
        simplex.push((vertex, objective(vertex)));
    }

    for _ in 0..config.max_iterations {
        simplex.sort_by(|lhs, rhs| lhs.1.total_cmp(&rhs.1));
        let (best, second, worst) = (simplex[0], simplex[1], simplex[2]);

        if (worst.1 - best.1).abs() <= config.tolerance * (1.0 + best.1.abs()) {
            break;
        }

        let centroid = [
            (best.0[0] + second.0[0]) / 2.0,
            (best.0[1] + second.0[1]) / 2.0,
        ];

        let reflected = clamp_to(
            bounds,
            [
                centroid[0] + (centroid[0] - worst.0[0]),
                centroid[1] + (centroid[1] - worst.0[1]),
            ],
        );
        let f_reflected = objective(reflected);

        if f_reflected < best.1 {
            // Keep going in the same direction.
            let expanded = clamp_to(
                bounds,
                [
                    centroid[0] + 2.0 * (reflected[0] - centroid[0]),
                    centroid[1] + 2.0 * (reflected[1] - centroid[1]),
                ],
            );
            let f_expanded = objective(expanded);
            simplex[2] = if f_expanded < f_reflected {
                (expanded, f_expanded)
            } else {
                (reflected, f_reflected)
            };
            continue;
        }

        if f_reflected < second.1 {
            simplex[2] = (reflected, f_reflected);
            continue;
        }

        // Pull toward the centroid, from whichever side is better.
        let contracted = if f_reflected < worst.1 {
            [
                centroid[0] + 0.5 * (reflected[0] - centroid[0]),
                centroid[1] + 0.5 * (reflected[1] - centroid[1]),
            ]
        } else {
            [
                centroid[0] + 0.5 * (worst.0[0] - centroid[0]),
                centroid[1] + 0.5 * (worst.0[1] - centroid[1]),
            ]
        };
        let f_contracted = objective(contracted);

        if f_contracted < f_reflected.min(worst.1) {
            simplex[2] = (contracted, f_contracted);
            continue;
        }

        // Shrink everything toward the best vertex.
        for vertex in simplex.iter_mut().skip(1) {
            let shrunk = [
                best.0[0] + 0.5 * (vertex.0[0] - best.0[0]),
                best.0[1] + 0.5 * (vertex.0[1] - best.0[1]),
            ];
            *vertex = (shrunk, objective(shrunk));
        }
    }

    simplex.sort_by(|lhs, rhs| lhs.1.total_cmp(&rhs.1));
    simplex[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn finds_an_interior_quadratic_minimum() {
        let bowl = |x: [f64; 2]| (x[0] - 1.0).powi(2) + (x[1] - 2.0).powi(2);
        let bounds = [(0.0, 4.0), (0.0, 4.0)];
        let (point, value) = minimize(bowl, &bounds, [3.5, 0.5], &SearchConfig::default());
        assert_relative_eq!(point[0], 1.0, epsilon = 1e-4);
        assert_relative_eq!(point[1], 2.0, epsilon = 1e-4);
        assert!(value < 1e-7);
    }

    #[test]
    fn converges_onto_a_box_corner() {
        // Unconstrained minimum at (-1, -1); the box pins it to (0, 0.5).
        let slope = |x: [f64; 2]| (x[0] + 1.0).powi(2) + (x[1] + 1.0).powi(2);
        let bounds = [(0.0, 2.0), (0.5, 2.0)];
        let (point, _) = minimize(slope, &bounds, [1.5, 1.5], &SearchConfig::default());
        assert_relative_eq!(point[0], 0.0, epsilon = 1e-3);
        assert_relative_eq!(point[1], 0.5, epsilon = 1e-3);
    }

    #[test]
    fn tolerates_a_kinked_objective() {
        let kinked = |x: [f64; 2]| (x[0] - 0.7).abs() + (x[1] - 0.3).abs();
        let bounds = [(0.0, 1.0), (0.0, 1.0)];
        let (point, _) = minimize(kinked, &bounds, [0.1, 0.9], &SearchConfig::default());
        assert_relative_eq!(point[0], 0.7, epsilon = 1e-3);
        assert_relative_eq!(point[1], 0.3, epsilon = 1e-3);
    }

    #[test]
    fn start_outside_the_box_is_projected_in() {
        let bowl = |x: [f64; 2]| x[0] * x[0] + x[1] * x[1];
        let bounds = [(1.0, 2.0), (1.0, 2.0)];
        let (point, _) = minimize(bowl, &bounds, [10.0, -10.0], &SearchConfig::default());
        assert_relative_eq!(point[0], 1.0, epsilon = 1e-3);
        assert_relative_eq!(point[1], 1.0, epsilon = 1e-3);
    }
}

// src/error.rs

use thiserror::Error;

/// Result type alias for model and optimizer operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors reported at the boundary of the core.
///
/// All of these are detected synchronously when parameters are set, a curve
/// is evaluated, or the optimizer is invoked. Nothing is retried or clamped
/// internally; a failed update leaves the previous state intact.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Parameter set violates the timing order 0 <= T1 <= tn <= T, the price
    /// order p >= c, a non-negativity bound, or contains a non-finite value.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// A curve was evaluated outside the cycle interval [0, T].
    #[error("time {t} is outside the cycle interval [0, {t_end}]")]
    OutOfDomain { t: f64, t_end: f64 },

    /// The optimizer search box is degenerate (tn <= 0 or upper bound <= tn).
    #[error("degenerate search box: saturation time {tn}, upper bound {upper}")]
    InvalidBounds { tn: f64, upper: f64 },
}

//! Inference Engine - pooled two-proportion z-interval
//!
//! Given control (A) and treatment (B) summaries:
//!
//! ```text
//! p     = (x_A + x_B) / (n_A + n_B)
//! SE    = sqrt(p (1 - p) (1/n_A + 1/n_B))
//! d_hat = p_B - p_A
//! z     = Φ⁻¹(1 - α/2)
//! CI    = (d_hat - z SE, d_hat + z SE)
//! ```
//!
//! A sample with zero trials or a pooled probability of exactly 0 or 1 has
//! `SE = 0` and would yield a zero-width interval that passes any
//! significance check. Those samples are rejected with
//! `Error::DegenerateSample`.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::{debug, warn};

use crate::{Error, Result, Variant, VariantSummary};

/// Pooled statistics for one experiment evaluation.
///
/// Exposed as a plain structure so reporting and plotting code needs no
/// access to intermediate computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PooledStatistics {
    /// Combined conversion rate across both variants.
    pub pooled_probability: f64,
    /// Standard error of the rate difference under the pooled assumption.
    pub pooled_standard_error: f64,
    /// Treatment rate minus control rate.
    pub effect_estimate: f64,
    /// Lower end of the two-sided confidence interval.
    pub lower_bound: f64,
    /// Upper end of the two-sided confidence interval.
    pub upper_bound: f64,
    /// Two-sided critical value of the standard normal.
    pub z_critical: f64,
}

impl PooledStatistics {
    /// Confidence interval as `(lower, upper)`.
    #[must_use]
    pub const fn confidence_interval(&self) -> (f64, f64) {
        (self.lower_bound, self.upper_bound)
    }

    /// Half-width of the confidence interval (`z * SE`).
    #[must_use]
    pub fn margin_of_error(&self) -> f64 {
        self.z_critical * self.pooled_standard_error
    }
}

/// Two-sided critical value `Φ⁻¹(1 - alpha/2)` of the standard normal.
///
/// For `alpha = 0.05` this is ≈1.959964.
///
/// # Errors
///
/// Returns `Error::InvalidInput` if `alpha` is not in (0, 1).
pub fn z_critical(alpha: f64) -> Result<f64> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(Error::InvalidInput(format!(
            "alpha must be in (0, 1), got {alpha}"
        )));
    }
    Ok(standard_normal()?.inverse_cdf(1.0 - alpha / 2.0))
}

/// N(0, 1), shared by the critical value and sample-size planning.
pub(crate) fn standard_normal() -> Result<Normal> {
    Normal::new(0.0, 1.0).map_err(|e| Error::Distribution(e.to_string()))
}

/// Compute pooled statistics for `control` vs `treatment` at level `alpha`.
///
/// # Errors
///
/// - `Error::DegenerateSample` if a variant has zero trials or the pooled
///   probability is 0 or 1
/// - `Error::InvalidInput` if `alpha` is not in (0, 1)
///
/// ## Example
///
/// ```rust
/// use ab_verdict::{pooled_statistics, VariantSummary};
///
/// let control = VariantSummary::from_counts(650, 1078)?;
/// let treatment = VariantSummary::from_counts(756, 1078)?;
/// let stats = pooled_statistics(&control, &treatment, 0.05)?;
///
/// assert!(stats.lower_bound > 0.0);
/// # Ok::<(), ab_verdict::Error>(())
/// ```
pub fn pooled_statistics(
    control: &VariantSummary,
    treatment: &VariantSummary,
    alpha: f64,
) -> Result<PooledStatistics> {
    for (variant, summary) in [(Variant::Control, control), (Variant::Treatment, treatment)] {
        if summary.trials() == 0 {
            warn!(%variant, "variant has zero trials");
            return Err(Error::degenerate(
                Some(variant),
                "zero trials, standard error is undefined",
            ));
        }
    }

    let z = z_critical(alpha)?;

    #[allow(clippy::cast_precision_loss)]
    let (n_a, n_b) = (control.trials() as f64, treatment.trials() as f64);
    // Counts are widened before summing; the u64 sum can overflow
    #[allow(clippy::cast_precision_loss)]
    let pooled_probability =
        (control.successes() as f64 + treatment.successes() as f64) / (n_a + n_b);

    if pooled_probability <= 0.0 || pooled_probability >= 1.0 {
        warn!(pooled_probability, "pooled probability is degenerate");
        return Err(Error::degenerate(
            None,
            format!("pooled probability is {pooled_probability}, standard error would be 0"),
        ));
    }

    let pooled_standard_error =
        (pooled_probability * (1.0 - pooled_probability) * (1.0 / n_a + 1.0 / n_b)).sqrt();
    let effect_estimate = treatment.conversion_rate() - control.conversion_rate();
    let margin = z * pooled_standard_error;

    let stats = PooledStatistics {
        pooled_probability,
        pooled_standard_error,
        effect_estimate,
        lower_bound: effect_estimate - margin,
        upper_bound: effect_estimate + margin,
        z_critical: z,
    };

    debug!(
        pooled_probability,
        pooled_standard_error,
        effect_estimate,
        lower_bound = stats.lower_bound,
        upper_bound = stats.upper_bound,
        z_critical = z,
        "computed pooled statistics"
    );

    Ok(stats)
}

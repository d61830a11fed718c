//! Sample-size planning for a two-sided two-proportion z-test
//!
//! Per-variant sample size needed to detect an absolute lift of `mde` over
//! the baseline rate `p1` with significance `alpha` and the requested power:
//!
//! ```text
//! p2 = p1 + mde,  p̄ = (p1 + p2) / 2
//! n  = ceil( (z_{1-α/2} sqrt(2 p̄ (1 - p̄)) + z_{power} sqrt(p1 (1 - p1) + p2 (1 - p2)))² / mde² )
//! ```

use statrs::distribution::ContinuousCDF;
use tracing::debug;

use crate::inference::{standard_normal, z_critical};
use crate::{Error, ExperimentParams, Result};

/// Per-variant sample size for the experiment described by `params`.
///
/// # Errors
///
/// Returns `Error::InvalidInput` if `baseline + mde >= 1`, since the
/// treatment rate would leave the unit interval.
///
/// ## Example
///
/// ```rust
/// use ab_verdict::{required_sample_size, ExperimentParams};
///
/// let n = required_sample_size(&ExperimentParams::default())?;
/// assert!(n > 1000);
/// # Ok::<(), ab_verdict::Error>(())
/// ```
pub fn required_sample_size(params: &ExperimentParams) -> Result<u64> {
    let p1 = params.baseline_conversion_rate();
    let mde = params.mde();
    let p2 = p1 + mde;
    if p2 >= 1.0 {
        return Err(Error::InvalidInput(format!(
            "baseline_conversion_rate + mde must be below 1, got {p2}"
        )));
    }
    let p_bar = (p1 + p2) / 2.0;

    let z_alpha = z_critical(params.alpha())?;
    let z_power = standard_normal()?.inverse_cdf(params.power());

    let null_term = z_alpha * (2.0 * p_bar * (1.0 - p_bar)).sqrt();
    let alt_term = z_power * p2.mul_add(1.0 - p2, p1 * (1.0 - p1)).sqrt();
    let n = ((null_term + alt_term).powi(2) / (mde * mde)).ceil();

    debug!(p1, p2, z_alpha, z_power, n, "planned sample size");

    // Low power can make the sum negative; one trial is the floor
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = n.max(1.0) as u64;
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(mde: f64, alpha: f64, power: f64) -> ExperimentParams {
        ExperimentParams::builder()
            .mde(mde)
            .alpha(alpha)
            .power(power)
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_design_sample_size() {
        // p1 = 0.12, p2 = 0.16, alpha = 0.05, power = 0.8 → ≈1181
        let n = required_sample_size(&ExperimentParams::default()).unwrap();
        assert!((1170..=1190).contains(&n), "got {n}");
    }

    #[test]
    fn test_smaller_mde_needs_more_samples() {
        let wide = required_sample_size(&params(0.04, 0.05, 0.8)).unwrap();
        let narrow = required_sample_size(&params(0.02, 0.05, 0.8)).unwrap();
        assert!(narrow > wide);
    }

    #[test]
    fn test_stricter_alpha_needs_more_samples() {
        let loose = required_sample_size(&params(0.04, 0.05, 0.8)).unwrap();
        let strict = required_sample_size(&params(0.04, 0.01, 0.8)).unwrap();
        assert!(strict > loose);
    }

    #[test]
    fn test_higher_power_needs_more_samples() {
        let low = required_sample_size(&params(0.04, 0.05, 0.8)).unwrap();
        let high = required_sample_size(&params(0.04, 0.05, 0.95)).unwrap();
        assert!(high > low);
    }

    #[test]
    fn test_rejects_treatment_rate_above_one() {
        let p = ExperimentParams::builder()
            .baseline_conversion_rate(0.9)
            .mde(0.2)
            .build()
            .unwrap();
        assert!(matches!(required_sample_size(&p), Err(Error::InvalidInput(_))));
    }
}

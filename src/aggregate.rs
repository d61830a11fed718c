//! Aggregator - reduce an outcome sequence to a variant summary

use serde::{Deserialize, Deserializer, Serialize};

use crate::sample::check_binary;
use crate::{Error, Result};

/// Decimal digits kept by [`VariantSummary::reported_conversion_rate`].
pub const REPORTED_RATE_DIGITS: i32 = 3;

/// Successes, trials, and conversion rate of one variant.
///
/// Invariant: `successes <= trials`. Summaries produced by [`summarize`]
/// also have `trials > 0`; a zero-trial summary built from counts is
/// representable and is rejected as degenerate by the inference engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VariantSummary {
    successes: u64,
    trials: u64,
    conversion_rate: f64,
}

impl VariantSummary {
    /// Build a summary from pre-aggregated counts.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if `successes > trials`.
    pub fn from_counts(successes: u64, trials: u64) -> Result<Self> {
        if successes > trials {
            return Err(Error::InvalidInput(format!(
                "successes ({successes}) exceed trials ({trials})"
            )));
        }
        #[allow(clippy::cast_precision_loss)]
        let conversion_rate = if trials == 0 {
            0.0
        } else {
            successes as f64 / trials as f64
        };
        Ok(Self {
            successes,
            trials,
            conversion_rate,
        })
    }

    /// Number of successes.
    #[must_use]
    pub const fn successes(&self) -> u64 {
        self.successes
    }

    /// Number of trials.
    #[must_use]
    pub const fn trials(&self) -> u64 {
        self.trials
    }

    /// Unrounded conversion rate, used for all inference.
    #[must_use]
    pub const fn conversion_rate(&self) -> f64 {
        self.conversion_rate
    }

    /// Conversion rate rounded to three decimals, for display only.
    #[must_use]
    pub fn reported_conversion_rate(&self) -> f64 {
        let scale = 10f64.powi(REPORTED_RATE_DIGITS);
        (self.conversion_rate * scale).round() / scale
    }
}

#[derive(Deserialize)]
struct RawSummary {
    successes: u64,
    trials: u64,
}

impl<'de> Deserialize<'de> for VariantSummary {
    // conversion_rate is derived, so only the counts are read back
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawSummary::deserialize(deserializer)?;
        Self::from_counts(raw.successes, raw.trials).map_err(serde::de::Error::custom)
    }
}

/// Reduce a 0/1 outcome sequence to its summary.
///
/// # Errors
///
/// Returns `Error::InvalidInput` if `outcomes` is empty or contains values
/// other than 0 and 1.
///
/// ## Example
///
/// ```rust
/// use ab_verdict::summarize;
///
/// let summary = summarize(&[1, 0, 1, 1])?;
/// assert_eq!(summary.successes(), 3);
/// assert_eq!(summary.trials(), 4);
/// # Ok::<(), ab_verdict::Error>(())
/// ```
pub fn summarize(outcomes: &[u8]) -> Result<VariantSummary> {
    check_binary(outcomes)?;
    let successes = outcomes.iter().map(|&v| u64::from(v)).sum();
    VariantSummary::from_counts(successes, outcomes.len() as u64)
}

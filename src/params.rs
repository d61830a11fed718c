//! Experiment Parameters - immutable design configuration
//!
//! Parameters are set once before analysis. Every construction path
//! (builder, JSON) runs the same validation, so a value of type
//! [`ExperimentParams`] is always in range.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// Default minimum detectable effect (absolute lift).
pub const DEFAULT_MDE: f64 = 0.04;
/// Default baseline conversion rate of the control variant.
pub const DEFAULT_BASELINE_CONVERSION_RATE: f64 = 0.12;
/// Default two-sided significance level.
pub const DEFAULT_ALPHA: f64 = 0.05;
/// Default statistical power.
pub const DEFAULT_POWER: f64 = 0.8;

/// Experiment design parameters.
///
/// ## Fields
///
/// - `mde`: smallest absolute lift in conversion rate worth launching, in (0, 1)
/// - `baseline_conversion_rate`: expected control conversion rate, in (0, 1)
/// - `alpha`: significance level, in (0, 1)
/// - `power`: probability of detecting an effect of size `mde`, in (0, 1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExperimentParams {
    mde: f64,
    baseline_conversion_rate: f64,
    alpha: f64,
    power: f64,
}

impl Default for ExperimentParams {
    fn default() -> Self {
        Self {
            mde: DEFAULT_MDE,
            baseline_conversion_rate: DEFAULT_BASELINE_CONVERSION_RATE,
            alpha: DEFAULT_ALPHA,
            power: DEFAULT_POWER,
        }
    }
}

impl ExperimentParams {
    /// Create validated parameters.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if any parameter is out of range.
    pub fn new(mde: f64, baseline_conversion_rate: f64, alpha: f64, power: f64) -> Result<Self> {
        let params = Self {
            mde,
            baseline_conversion_rate,
            alpha,
            power,
        };
        params.validate()?;
        Ok(params)
    }

    /// Create a builder seeded with the default parameters.
    #[must_use]
    pub fn builder() -> ExperimentParamsBuilder {
        ExperimentParamsBuilder::new()
    }

    /// Parse parameters from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` for malformed JSON and `Error::InvalidInput`
    /// for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self> {
        let partial: PartialParams = serde_json::from_str(json)?;
        partial.into_params()
    }

    /// Check every parameter against its valid range.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` naming the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        check_open_unit("mde", self.mde)?;
        check_open_unit("baseline_conversion_rate", self.baseline_conversion_rate)?;
        check_open_unit("alpha", self.alpha)?;
        check_open_unit("power", self.power)
    }

    /// Minimum detectable effect.
    #[must_use]
    pub const fn mde(&self) -> f64 {
        self.mde
    }

    /// Baseline conversion rate.
    #[must_use]
    pub const fn baseline_conversion_rate(&self) -> f64 {
        self.baseline_conversion_rate
    }

    /// Significance level.
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Statistical power.
    #[must_use]
    pub const fn power(&self) -> f64 {
        self.power
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialParams {
    mde: Option<f64>,
    baseline_conversion_rate: Option<f64>,
    alpha: Option<f64>,
    power: Option<f64>,
}

impl PartialParams {
    fn into_params(self) -> Result<ExperimentParams> {
        let defaults = ExperimentParams::default();
        ExperimentParams::new(
            self.mde.unwrap_or(defaults.mde),
            self.baseline_conversion_rate
                .unwrap_or(defaults.baseline_conversion_rate),
            self.alpha.unwrap_or(defaults.alpha),
            self.power.unwrap_or(defaults.power),
        )
    }
}

impl<'de> Deserialize<'de> for ExperimentParams {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        PartialParams::deserialize(deserializer)?
            .into_params()
            .map_err(serde::de::Error::custom)
    }
}

fn check_open_unit(name: &str, value: f64) -> Result<()> {
    // NaN fails both comparisons
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "{name} must be in (0, 1), got {value}"
        )))
    }
}

/// Builder for `ExperimentParams`.
#[derive(Debug, Clone, Copy)]
pub struct ExperimentParamsBuilder {
    params: ExperimentParams,
}

impl Default for ExperimentParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperimentParamsBuilder {
    /// Create a builder with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: ExperimentParams::default(),
        }
    }

    /// Set the minimum detectable effect.
    #[must_use]
    pub const fn mde(mut self, mde: f64) -> Self {
        self.params.mde = mde;
        self
    }

    /// Set the baseline conversion rate.
    #[must_use]
    pub const fn baseline_conversion_rate(mut self, rate: f64) -> Self {
        self.params.baseline_conversion_rate = rate;
        self
    }

    /// Set the significance level.
    #[must_use]
    pub const fn alpha(mut self, alpha: f64) -> Self {
        self.params.alpha = alpha;
        self
    }

    /// Set the statistical power.
    #[must_use]
    pub const fn power(mut self, power: f64) -> Self {
        self.params.power = power;
        self
    }

    /// Validate and build the parameters.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if any parameter is out of range.
    pub fn build(self) -> Result<ExperimentParams> {
        self.params.validate()?;
        Ok(self.params)
    }
}

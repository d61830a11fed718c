//! Experiment - one evaluation from outcomes to verdict
//!
//! ## Pipeline
//!
//! ```text
//! outcomes (control, treatment)
//!     │  summarize            (Aggregator)
//!     ▼
//! VariantSummary × 2
//!     │  pooled_statistics    (Inference Engine)
//!     ▼
//! PooledStatistics
//!     │  decide               (Decision Rule)
//!     ▼
//! Verdict ──> Analysis
//! ```
//!
//! An [`Experiment`] holds only validated parameters. Each call builds a
//! fresh [`Analysis`]; nothing is carried between evaluations.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    decide, pooled_statistics, summarize, Error, ExperimentParams, PooledStatistics, Result,
    SampleProvider, SimulationDesign, Variant, VariantSummary, Verdict,
};

/// Experiment evaluator bound to a set of design parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Experiment {
    params: ExperimentParams,
}

impl Experiment {
    /// Create an evaluator for `params`.
    #[must_use]
    pub const fn new(params: ExperimentParams) -> Self {
        Self { params }
    }

    /// Design parameters in force.
    #[must_use]
    pub const fn params(&self) -> &ExperimentParams {
        &self.params
    }

    /// Analyze raw 0/1 outcomes for both variants.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidInput` if either sequence is empty or non-binary
    /// - `Error::DegenerateSample` if the pooled probability is 0 or 1
    #[instrument(
        level = "debug",
        skip_all,
        fields(control_trials = control.len(), treatment_trials = treatment.len())
    )]
    pub fn analyze(&self, control: &[u8], treatment: &[u8]) -> Result<Analysis> {
        let control = summarize_variant(Variant::Control, control)?;
        let treatment = summarize_variant(Variant::Treatment, treatment)?;
        self.analyze_summaries(control, treatment)
    }

    /// Analyze pre-aggregated summaries.
    ///
    /// # Errors
    ///
    /// Returns `Error::DegenerateSample` if either variant has zero trials
    /// or the pooled probability is 0 or 1.
    pub fn analyze_summaries(
        &self,
        control: VariantSummary,
        treatment: VariantSummary,
    ) -> Result<Analysis> {
        let statistics = pooled_statistics(&control, &treatment, self.params.alpha())?;
        let verdict = decide(&statistics, self.params.mde());

        info!(
            effect_estimate = statistics.effect_estimate,
            lower_bound = statistics.lower_bound,
            mde = self.params.mde(),
            launch = verdict.is_launch(),
            "experiment evaluated"
        );

        Ok(Analysis {
            params: self.params,
            control,
            treatment,
            statistics,
            verdict,
        })
    }

    /// Draw both variants from `provider` according to `design`, then analyze.
    ///
    /// # Errors
    ///
    /// Propagates provider errors and any error from [`Experiment::analyze`].
    #[instrument(level = "debug", skip_all, fields(
        control_size = design.control_size,
        treatment_size = design.treatment_size,
    ))]
    pub fn run<P: SampleProvider>(
        &self,
        provider: &mut P,
        design: &SimulationDesign,
    ) -> Result<Analysis> {
        let control = provider.provide(design.control_size, design.control_rate)?;
        let treatment = provider.provide(design.treatment_size, design.treatment_rate)?;
        self.analyze(&control, &treatment)
    }
}

fn summarize_variant(variant: Variant, outcomes: &[u8]) -> Result<VariantSummary> {
    summarize(outcomes).map_err(|e| match e {
        Error::InvalidInput(msg) => Error::InvalidInput(format!("{variant} variant: {msg}")),
        other => other,
    })
}

/// Complete result of one experiment evaluation.
///
/// Summaries are keyed by variant name, never by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    params: ExperimentParams,
    control: VariantSummary,
    treatment: VariantSummary,
    statistics: PooledStatistics,
    verdict: Verdict,
}

impl Analysis {
    /// Design parameters used.
    #[must_use]
    pub const fn params(&self) -> &ExperimentParams {
        &self.params
    }

    /// Control variant summary.
    #[must_use]
    pub const fn control(&self) -> &VariantSummary {
        &self.control
    }

    /// Treatment variant summary.
    #[must_use]
    pub const fn treatment(&self) -> &VariantSummary {
        &self.treatment
    }

    /// Summary for `variant`.
    #[must_use]
    pub const fn summary(&self, variant: Variant) -> &VariantSummary {
        match variant {
            Variant::Control => &self.control,
            Variant::Treatment => &self.treatment,
        }
    }

    /// Pooled statistics.
    #[must_use]
    pub const fn statistics(&self) -> &PooledStatistics {
        &self.statistics
    }

    /// Launch verdict.
    #[must_use]
    pub const fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    /// Serialize the analysis as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` if serialization fails (non-finite floats
    /// serialize as `null`, so this is not expected in practice).
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<10} {:>9} {:>7} {:>9}", "group", "successes", "trials", "rate")?;
        for variant in [Variant::Control, Variant::Treatment] {
            let summary = self.summary(variant);
            writeln!(
                f,
                "{:<10} {:>9} {:>7} {:>9.3}",
                variant.to_string(),
                summary.successes(),
                summary.trials(),
                summary.reported_conversion_rate()
            )?;
        }
        let stats = &self.statistics;
        writeln!(
            f,
            "effect {:+.4}, {:.0}% CI [{:.4}, {:.4}], pooled SE {:.4}",
            stats.effect_estimate,
            (1.0 - self.params.alpha()) * 100.0,
            stats.lower_bound,
            stats.upper_bound,
            stats.pooled_standard_error
        )?;
        write!(f, "{}", self.verdict)
    }
}

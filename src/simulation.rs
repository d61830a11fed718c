//! Simulation sweeps - repeated seeded evaluations of one design
//!
//! Each run owns a [`BernoulliProvider`] seeded from the base seed and the
//! run index, so a sweep gives identical results whether runs execute on
//! the rayon pool (`parallel` feature) or sequentially.
//!
//! Degenerate runs are counted rather than aborting the sweep.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{BernoulliProvider, Error, Experiment, ExperimentParams, Result};

/// Sample sizes and true conversion rates for synthetic experiments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationDesign {
    /// Control sample size.
    pub control_size: usize,
    /// True control conversion probability.
    pub control_rate: f64,
    /// Treatment sample size.
    pub treatment_size: usize,
    /// True treatment conversion probability.
    pub treatment_rate: f64,
}

impl SimulationDesign {
    /// Create a design.
    #[must_use]
    pub const fn new(
        control_size: usize,
        control_rate: f64,
        treatment_size: usize,
        treatment_rate: f64,
    ) -> Self {
        Self {
            control_size,
            control_rate,
            treatment_size,
            treatment_rate,
        }
    }

    /// Design with the same size for both variants.
    #[must_use]
    pub const fn balanced(size: usize, control_rate: f64, treatment_rate: f64) -> Self {
        Self::new(size, control_rate, size, treatment_rate)
    }
}

/// Aggregate outcome of a simulation sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Number of runs performed.
    pub runs: usize,
    /// Runs that ended in `Launch`.
    pub launches: usize,
    /// Runs that ended in `Investigate`.
    pub investigations: usize,
    /// Runs rejected as degenerate.
    pub degenerate: usize,
    /// Mean effect estimate over non-degenerate runs.
    pub mean_effect_estimate: Option<f64>,
}

impl SimulationSummary {
    /// Fraction of all runs that launched (empirical power when the true
    /// effect is at least the MDE).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn launch_rate(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        self.launches as f64 / self.runs as f64
    }
}

#[derive(Debug, Clone, Copy)]
enum RunOutcome {
    Launch(f64),
    Investigate(f64),
    Degenerate,
}

/// Derive a well-mixed per-run seed (`SplitMix64` finalizer).
const fn run_seed(seed: u64, run: u64) -> u64 {
    let mut z = seed.wrapping_add(run.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn evaluate_run(
    experiment: &Experiment,
    design: &SimulationDesign,
    seed: u64,
    run: usize,
) -> Result<RunOutcome> {
    let mut provider = BernoulliProvider::seeded(run_seed(seed, run as u64));
    match experiment.run(&mut provider, design) {
        Ok(analysis) => {
            let effect = analysis.statistics().effect_estimate;
            Ok(if analysis.verdict().is_launch() {
                RunOutcome::Launch(effect)
            } else {
                RunOutcome::Investigate(effect)
            })
        }
        Err(Error::DegenerateSample { .. }) => Ok(RunOutcome::Degenerate),
        Err(e) => Err(e),
    }
}

/// Run `runs` independent seeded evaluations of `design` under `params`.
///
/// # Errors
///
/// Returns `Error::InvalidInput` if `runs` is zero or the design is invalid
/// (zero sample size, rate outside [0, 1]).
///
/// ## Example
///
/// ```rust
/// use ab_verdict::{simulate, ExperimentParams, SimulationDesign};
///
/// let design = SimulationDesign::balanced(1078, 0.603, 0.701);
/// let summary = simulate(&ExperimentParams::default(), &design, 50, 7)?;
/// assert_eq!(summary.runs, 50);
/// # Ok::<(), ab_verdict::Error>(())
/// ```
#[instrument(level = "debug", skip(params, design))]
pub fn simulate(
    params: &ExperimentParams,
    design: &SimulationDesign,
    runs: usize,
    seed: u64,
) -> Result<SimulationSummary> {
    if runs == 0 {
        return Err(Error::InvalidInput(
            "simulation needs at least one run".to_string(),
        ));
    }
    let experiment = Experiment::new(*params);

    #[cfg(feature = "parallel")]
    let outcomes: Vec<RunOutcome> = (0..runs)
        .into_par_iter()
        .map(|run| evaluate_run(&experiment, design, seed, run))
        .collect::<Result<_>>()?;

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<RunOutcome> = (0..runs)
        .map(|run| evaluate_run(&experiment, design, seed, run))
        .collect::<Result<_>>()?;

    let mut summary = SimulationSummary {
        runs,
        launches: 0,
        investigations: 0,
        degenerate: 0,
        mean_effect_estimate: None,
    };
    let mut effect_sum = 0.0;
    for outcome in outcomes {
        match outcome {
            RunOutcome::Launch(effect) => {
                summary.launches += 1;
                effect_sum += effect;
            }
            RunOutcome::Investigate(effect) => {
                summary.investigations += 1;
                effect_sum += effect;
            }
            RunOutcome::Degenerate => summary.degenerate += 1,
        }
    }
    let evaluated = summary.launches + summary.investigations;
    #[allow(clippy::cast_precision_loss)]
    let mean_effect_estimate = (evaluated > 0).then(|| effect_sum / evaluated as f64);
    summary.mean_effect_estimate = mean_effect_estimate;

    info!(
        runs,
        launches = summary.launches,
        degenerate = summary.degenerate,
        launch_rate = summary.launch_rate(),
        "simulation complete"
    );

    Ok(summary)
}

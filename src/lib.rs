//! # ab-verdict: Launch Decisions for Two-Variant Experiments
//!
//! **Version**: 0.1.0
//!
//! ab-verdict turns binary conversion outcomes from a control and a treatment
//! variant into a launch recommendation, using a pooled two-proportion z-test
//! and a minimum detectable effect (MDE) threshold.
//!
//! ## Pipeline
//!
//! ```text
//! SampleProvider ──> summarize ──> pooled_statistics ──> decide
//!  (outcomes)       (Aggregator)   (Inference Engine)   (Decision Rule)
//! ```
//!
//! Every stage is a pure function over immutable values. Randomness lives
//! only behind [`sample::SampleProvider`], so the engine is deterministic.
//!
//! ## Example Usage
//!
//! ```rust
//! use ab_verdict::{Experiment, ExperimentParams};
//!
//! let params = ExperimentParams::builder().mde(0.01).alpha(0.05).build()?;
//! let experiment = Experiment::new(params);
//!
//! let control: Vec<u8> = (0..2000).map(|i| u8::from(i % 10 < 6)).collect();
//! let treatment: Vec<u8> = (0..2000).map(|i| u8::from(i % 10 < 7)).collect();
//!
//! let analysis = experiment.analyze(&control, &treatment)?;
//! assert!(analysis.verdict().is_launch());
//! # Ok::<(), ab_verdict::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod aggregate;
pub mod decision;
pub mod error;
pub mod experiment;
pub mod inference;
pub mod params;
pub mod planning;
pub mod sample;
pub mod simulation;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use aggregate::{summarize, VariantSummary};
pub use decision::{decide, Decision, InvestigateReason, Verdict};
pub use error::{Error, Result};
pub use experiment::{Analysis, Experiment};
pub use inference::{pooled_statistics, z_critical, PooledStatistics};
pub use params::{ExperimentParams, ExperimentParamsBuilder};
pub use planning::required_sample_size;
pub use sample::{BernoulliProvider, OutcomeSequence, SampleProvider};
pub use simulation::{simulate, SimulationDesign, SimulationSummary};

/// Experiment arm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Current experience (A)
    Control,
    /// Candidate experience (B)
    Treatment,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Control => f.write_str("control"),
            Self::Treatment => f.write_str("treatment"),
        }
    }
}

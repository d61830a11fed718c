//! Decision Rule - statistical and practical significance
//!
//! Launch requires both:
//!
//! - **Statistical significance**: the two-sided interval excludes zero in
//!   the direction of improvement (`lower_bound > 0`)
//! - **Practical significance**: the lower bound reaches the MDE
//!   (`lower_bound >= mde`)
//!
//! Anything else is an `Investigate` verdict carrying every failing reason.
//! The rule does not try to tell "reject" apart from "collect more data".

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::PooledStatistics;

/// Why an experiment is not ready to launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestigateReason {
    /// Confidence interval does not lie entirely above zero.
    NotStatisticallySignificant,
    /// Lower confidence bound is below the minimum detectable effect.
    BelowMde,
}

impl fmt::Display for InvestigateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStatisticallySignificant => f.write_str("not statistically significant"),
            Self::BelowMde => f.write_str("effect below MDE"),
        }
    }
}

/// Launch recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// Treatment is significantly and meaningfully better.
    Launch,
    /// Do not launch yet; reject or gather more data.
    Investigate {
        /// Contributing reasons, never empty.
        reasons: Vec<InvestigateReason>,
    },
}

/// Decision together with the bound and threshold it was made on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// The recommendation.
    pub decision: Decision,
    /// Lower confidence bound compared against zero and the MDE.
    pub lower_bound: f64,
    /// Minimum detectable effect in force.
    pub mde: f64,
}

impl Verdict {
    /// True when the decision is `Launch`.
    #[must_use]
    pub const fn is_launch(&self) -> bool {
        matches!(self.decision, Decision::Launch)
    }

    /// Reasons for not launching (empty for `Launch`).
    #[must_use]
    pub fn reasons(&self) -> &[InvestigateReason] {
        match &self.decision {
            Decision::Launch => &[],
            Decision::Investigate { reasons } => reasons,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.decision {
            Decision::Launch => write!(
                f,
                "Launch the treatment: lower bound {:.4} >= MDE {:.4}",
                self.lower_bound, self.mde
            ),
            Decision::Investigate { reasons } => {
                let reasons: Vec<String> = reasons.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "Do not launch yet ({}): lower bound {:.4}, MDE {:.4}. Reject the treatment or collect more data.",
                    reasons.join(", "),
                    self.lower_bound,
                    self.mde
                )
            }
        }
    }
}

/// Apply the launch rule to `stats` with minimum detectable effect `mde`.
///
/// ## Example
///
/// ```rust
/// use ab_verdict::{decide, PooledStatistics};
///
/// let stats = PooledStatistics {
///     pooled_probability: 0.65,
///     pooled_standard_error: 0.02,
///     effect_estimate: 0.10,
///     lower_bound: 0.061,
///     upper_bound: 0.139,
///     z_critical: 1.96,
/// };
/// assert!(decide(&stats, 0.04).is_launch());
/// assert!(!decide(&stats, 0.08).is_launch());
/// ```
#[must_use]
pub fn decide(stats: &PooledStatistics, mde: f64) -> Verdict {
    let lower_bound = stats.lower_bound;

    let mut reasons = Vec::new();
    if lower_bound <= 0.0 {
        reasons.push(InvestigateReason::NotStatisticallySignificant);
    }
    // false for a NaN bound, so NaN never launches
    let meets_mde = lower_bound >= mde;
    if !meets_mde {
        reasons.push(InvestigateReason::BelowMde);
    }

    let decision = if reasons.is_empty() {
        Decision::Launch
    } else {
        Decision::Investigate { reasons }
    };

    Verdict {
        decision,
        lower_bound,
        mde,
    }
}

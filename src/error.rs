//! Error types for ab-verdict
//!
//! Every failure is reported as a typed result; the caller decides whether to
//! abort, log, or retry with larger samples.

use thiserror::Error;

use crate::Variant;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// ab-verdict error types
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed outcome sequence or out-of-range experiment parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Sample cannot support a standard error (zero trials or p in {0, 1})
    #[error("Degenerate sample{}: {reason}\nCollect more data before analyzing this experiment.", variant_suffix(.variant))]
    DegenerateSample {
        /// Variant that caused the degeneracy, if attributable to one
        variant: Option<Variant>,
        /// What made the sample degenerate
        reason: String,
    },

    /// Probability distribution could not be constructed.
    ///
    /// Only the fixed N(0, 1) is built, which statrs always accepts, so this
    /// is not expected in practice.
    #[error("Distribution error: {0}")]
    Distribution(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn variant_suffix(variant: &Option<Variant>) -> String {
    variant.map(|v| format!(" in {v} variant")).unwrap_or_default()
}

impl Error {
    /// Build a `DegenerateSample` error attributed to `variant`.
    pub(crate) fn degenerate(variant: Option<Variant>, reason: impl Into<String>) -> Self {
        Self::DegenerateSample {
            variant,
            reason: reason.into(),
        }
    }
}

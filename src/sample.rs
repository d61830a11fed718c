//! Sample Provider - sources of binary outcome sequences
//!
//! The engine never draws random numbers itself. Outcomes arrive through
//! [`SampleProvider`], so analysis code can be tested against fixed
//! sequences and simulations can be replayed from a seed.

use std::ops::Deref;

use rand::SeedableRng;
use rand_distr::{Bernoulli, Distribution};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Ordered sequence of independent Bernoulli outcomes (0 or 1) for one variant.
///
/// Construction guarantees the sequence is non-empty and binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct OutcomeSequence {
    values: Vec<u8>,
}

impl OutcomeSequence {
    /// Wrap a vector of outcomes.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if `values` is empty or contains
    /// anything other than 0 or 1.
    pub fn new(values: Vec<u8>) -> Result<Self> {
        check_binary(&values)?;
        Ok(Self { values })
    }

    /// Number of trials.
    #[must_use]
    pub fn trials(&self) -> usize {
        self.values.len()
    }

    /// Number of successes (ones).
    #[must_use]
    pub fn successes(&self) -> u64 {
        self.values.iter().map(|&v| u64::from(v)).sum()
    }

    /// Consume the sequence and return the raw outcomes.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.values
    }
}

impl Deref for OutcomeSequence {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.values
    }
}

impl AsRef<[u8]> for OutcomeSequence {
    fn as_ref(&self) -> &[u8] {
        &self.values
    }
}

impl TryFrom<Vec<u8>> for OutcomeSequence {
    type Error = Error;

    fn try_from(values: Vec<u8>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<OutcomeSequence> for Vec<u8> {
    fn from(sequence: OutcomeSequence) -> Self {
        sequence.values
    }
}

/// Validate that `values` is a non-empty 0/1 sequence.
pub(crate) fn check_binary(values: &[u8]) -> Result<()> {
    if values.is_empty() {
        return Err(Error::InvalidInput(
            "outcome sequence must contain at least one trial".to_string(),
        ));
    }
    if let Some((index, value)) = values.iter().enumerate().find(|(_, &v)| v > 1) {
        return Err(Error::InvalidInput(format!(
            "outcome at index {index} is {value}, expected 0 or 1"
        )));
    }
    Ok(())
}

/// Source of outcome sequences for one variant at a time.
///
/// Implementations may draw synthetic outcomes or replay recorded ones.
pub trait SampleProvider {
    /// Produce `length` outcomes, each a success with `probability`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if `length` is zero or `probability`
    /// is outside [0, 1].
    fn provide(&mut self, length: usize, probability: f64) -> Result<OutcomeSequence>;
}

/// Synthetic provider drawing i.i.d. Bernoulli outcomes from a seedable RNG.
///
/// ## Example
///
/// ```rust
/// use ab_verdict::{BernoulliProvider, SampleProvider};
///
/// let mut provider = BernoulliProvider::seeded(42);
/// let outcomes = provider.provide(1078, 0.603)?;
/// assert_eq!(outcomes.trials(), 1078);
/// # Ok::<(), ab_verdict::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct BernoulliProvider {
    rng: Xoshiro256PlusPlus,
}

impl BernoulliProvider {
    /// Deterministic provider: the same seed yields the same outcomes.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// Provider seeded from the thread-local RNG.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }
}

impl SampleProvider for BernoulliProvider {
    fn provide(&mut self, length: usize, probability: f64) -> Result<OutcomeSequence> {
        if length == 0 {
            return Err(Error::InvalidInput(
                "sample length must be at least 1".to_string(),
            ));
        }
        let bernoulli = Bernoulli::new(probability).map_err(|e| {
            Error::InvalidInput(format!("success probability {probability}: {e}"))
        })?;

        let values = (0..length)
            .map(|_| u8::from(bernoulli.sample(&mut self.rng)))
            .collect();

        Ok(OutcomeSequence { values })
    }
}

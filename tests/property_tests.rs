//! Property-based tests for the inference pipeline
//!
//! - Test mathematical invariants of the pooled z-interval
//! - Run with ProptestConfig::with_cases(100)

use ab_verdict::{
    decide, pooled_statistics, summarize, Decision, Error, PooledStatistics, VariantSummary,
};
use proptest::prelude::*;

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

/// Generate a binary outcome sequence of 1..=500 trials
fn arb_outcomes() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(0u8..=1, 1..=500)
}

/// Generate (successes, trials) with successes <= trials
fn arb_counts() -> impl Strategy<Value = (u64, u64)> {
    (1u64..5000).prop_flat_map(|trials| (0..=trials, Just(trials)))
}

fn arb_alpha() -> impl Strategy<Value = f64> {
    0.001f64..0.5
}

fn non_degenerate(a: (u64, u64), b: (u64, u64)) -> bool {
    let successes = a.0 + b.0;
    successes > 0 && successes < a.1 + b.1
}

fn stats(a: (u64, u64), b: (u64, u64), alpha: f64) -> PooledStatistics {
    let control = VariantSummary::from_counts(a.0, a.1).unwrap();
    let treatment = VariantSummary::from_counts(b.0, b.1).unwrap();
    pooled_statistics(&control, &treatment, alpha).unwrap()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: summarize counts ones and trials exactly
    #[test]
    fn prop_summarize_counts(outcomes in arb_outcomes()) {
        let k = outcomes.iter().filter(|&&v| v == 1).count();
        let n = outcomes.len();
        let summary = summarize(&outcomes).unwrap();

        prop_assert_eq!(summary.successes(), k as u64);
        prop_assert_eq!(summary.trials(), n as u64);
        prop_assert!((summary.conversion_rate() - k as f64 / n as f64).abs() < 1e-9);
    }

    /// Property: any value above 1 is rejected
    #[test]
    fn prop_summarize_rejects_non_binary(
        mut outcomes in arb_outcomes(),
        bad in 2u8..=255,
        index in any::<prop::sample::Index>()
    ) {
        let i = index.index(outcomes.len());
        outcomes[i] = bad;
        prop_assert!(matches!(summarize(&outcomes), Err(Error::InvalidInput(_))));
    }

    /// Property: pooled probability is label-symmetric, effect flips sign
    #[test]
    fn prop_swap_symmetry(a in arb_counts(), b in arb_counts(), alpha in arb_alpha()) {
        prop_assume!(non_degenerate(a, b));
        let forward = stats(a, b, alpha);
        let swapped = stats(b, a, alpha);

        prop_assert!((forward.pooled_probability - swapped.pooled_probability).abs() < 1e-12);
        prop_assert!((forward.pooled_standard_error - swapped.pooled_standard_error).abs() < 1e-12);
        prop_assert!((forward.effect_estimate + swapped.effect_estimate).abs() < 1e-12);
    }

    /// Property: standard error is strictly positive for non-degenerate samples
    #[test]
    fn prop_standard_error_positive(a in arb_counts(), b in arb_counts(), alpha in arb_alpha()) {
        prop_assume!(non_degenerate(a, b));
        let s = stats(a, b, alpha);
        prop_assert!(s.pooled_standard_error > 0.0);
        prop_assert!((0.0..=1.0).contains(&s.pooled_probability));
    }

    /// Property: degenerate pooled probability never yields statistics
    #[test]
    fn prop_degenerate_is_rejected(n_a in 1u64..2000, n_b in 1u64..2000, all_ones in any::<bool>()) {
        let (s_a, s_b) = if all_ones { (n_a, n_b) } else { (0, 0) };
        let control = VariantSummary::from_counts(s_a, n_a).unwrap();
        let treatment = VariantSummary::from_counts(s_b, n_b).unwrap();
        let is_degenerate = matches!(
            pooled_statistics(&control, &treatment, 0.05),
            Err(Error::DegenerateSample { .. })
        );
        prop_assert!(is_degenerate);
    }

    /// Property: interval is symmetric around the effect estimate
    #[test]
    fn prop_interval_symmetric(a in arb_counts(), b in arb_counts(), alpha in arb_alpha()) {
        prop_assume!(non_degenerate(a, b));
        let s = stats(a, b, alpha);
        let upper_gap = s.upper_bound - s.effect_estimate;
        let lower_gap = s.effect_estimate - s.lower_bound;
        prop_assert!((upper_gap - lower_gap).abs() < 1e-9);
    }

    /// Property: increasing alpha never widens the interval
    #[test]
    fn prop_alpha_monotonic(
        a in arb_counts(),
        b in arb_counts(),
        alpha in 0.001f64..0.25,
        bump in 0.01f64..0.25
    ) {
        prop_assume!(non_degenerate(a, b));
        let strict = stats(a, b, alpha);
        let loose = stats(a, b, alpha + bump);
        prop_assert!(loose.z_critical < strict.z_critical);
        prop_assert!(loose.margin_of_error() <= strict.margin_of_error());
    }

    /// Property: Launch iff lower_bound > 0 and lower_bound >= mde
    #[test]
    fn prop_decision_rule(lower in -0.5f64..0.5, mde in 0.001f64..0.5) {
        let s = PooledStatistics {
            pooled_probability: 0.5,
            pooled_standard_error: 0.01,
            effect_estimate: lower + 0.02,
            lower_bound: lower,
            upper_bound: lower + 0.04,
            z_critical: 1.96,
        };
        let verdict = decide(&s, mde);
        let expected = lower > 0.0 && lower >= mde;
        prop_assert_eq!(verdict.decision == Decision::Launch, expected);
        prop_assert_eq!(verdict.reasons().is_empty(), expected);
    }
}

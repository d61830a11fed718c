//! Tests for error types

use ab_verdict::{Error, ExperimentParams, Variant};

#[test]
fn test_invalid_input_error() {
    let error = Error::InvalidInput("alpha must be in (0, 1), got 2".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Invalid input"));
    assert!(error_str.contains("alpha must be in (0, 1)"));
}

#[test]
fn test_degenerate_sample_with_variant() {
    let error = Error::DegenerateSample {
        variant: Some(Variant::Treatment),
        reason: "zero trials".to_string(),
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("Degenerate sample in treatment variant"));
    assert!(error_str.contains("zero trials"));
    assert!(error_str.contains("Collect more data"));
}

#[test]
fn test_degenerate_sample_without_variant() {
    let error = Error::DegenerateSample {
        variant: None,
        reason: "pooled probability is 1".to_string(),
    };
    let error_str = format!("{error}");
    assert!(error_str.starts_with("Degenerate sample: pooled probability is 1"));
}

#[test]
fn test_distribution_error() {
    let error = Error::Distribution("bad parameters".to_string());
    assert!(format!("{error}").contains("Distribution error"));
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let error: Error = json_error.into();
    assert!(format!("{error}").contains("JSON error"));
}

#[test]
fn test_params_json_error_propagates() {
    let result = ExperimentParams::from_json("[1, 2");
    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn test_error_debug() {
    let error = Error::InvalidInput("x".to_string());
    let debug_str = format!("{error:?}");
    assert!(debug_str.contains("InvalidInput"));
}

#[test]
fn test_result_type_alias() {
    #[allow(clippy::unnecessary_wraps)]
    fn returns_result() -> ab_verdict::Result<i32> {
        Ok(42)
    }

    let result = returns_result();
    assert!(result.is_ok());
    assert_eq!(result.unwrap(), 42);
}

#[test]
fn test_error_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}

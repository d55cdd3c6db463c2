//! Unit tests for error aggregation behaviour.

use std::sync::Arc;

use super::FacetError;

#[test]
fn try_aggregate_none_on_empty() {
    assert!(FacetError::try_aggregate(Vec::<Arc<FacetError>>::new()).is_none());
}

#[test]
fn single_owned_error_unwraps() {
    let err = Arc::new(FacetError::validation("port", "must be positive"));
    let outcome = FacetError::try_aggregate(vec![err]);
    assert!(
        matches!(outcome, Some(FacetError::Validation { .. })),
        "expected the inner Validation error, got {outcome:?}"
    );
}

#[test]
fn single_shared_error_stays_aggregated() {
    let shared = FacetError::validation_arc("port", "must be positive");
    let keep_alive = Arc::clone(&shared);
    match FacetError::try_aggregate(vec![shared]) {
        Some(FacetError::Aggregate(agg)) => assert_eq!(agg.len(), 1),
        other => panic!("expected Aggregate, got {other:?}"),
    }
    drop(keep_alive);
}

#[test]
fn multiple_errors_aggregate_with_numbered_display() {
    let first = FacetError::validation_arc("a", "one");
    let second = FacetError::validation_arc("b", "two");
    let Some(FacetError::Aggregate(agg)) = FacetError::try_aggregate(vec![first, second]) else {
        panic!("expected Aggregate");
    };
    assert_eq!(agg.len(), 2);
    let display = agg.to_string();
    assert!(display.starts_with("1:"), "first entry missing: {display}");
    assert!(display.contains("\n2:"), "second entry missing: {display}");
    let borrowed: Vec<_> = agg.iter().collect();
    assert_eq!(borrowed.len(), 2);
}

use crate::{ApiError, parse_id};

#[test]
fn test_positive_id_parses() {
    assert_eq!(parse_id("42").unwrap(), 42);
}

#[test]
fn test_non_positive_or_garbage_id_is_validation_error() {
    for raw in ["0", "-1", "abc", "", "1.5"] {
        assert!(
            matches!(parse_id(raw), Err(ApiError::Validation { .. })),
            "{raw:?} should be rejected"
        );
    }
}

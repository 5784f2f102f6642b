use spycats::domain::DomainError;
use spycats::error::{Error, Result};

/// Assert that `result` failed with exactly `expected`.
#[track_caller]
pub fn assert_rejected<T: std::fmt::Debug>(result: Result<T>, expected: DomainError) {
    match result {
        Err(Error::Domain(actual)) => assert_eq!(actual, expected),
        other => panic!("expected {expected:?}, got {other:?}"),
    }
}

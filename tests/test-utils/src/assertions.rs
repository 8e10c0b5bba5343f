//! Custom assertions for testing

use std::fmt::Debug;

/// Assert that two floating point values are approximately equal
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "Values not approximately equal: {} != {} (diff: {}, tolerance: {})",
        left,
        right,
        diff,
        tolerance
    );
}

/// Assert that a value is within a range
pub fn assert_in_range<T: PartialOrd + Debug>(value: T, min: T, max: T) {
    assert!(
        value >= min && value <= max,
        "Value {:?} not in range [{:?}, {:?}]",
        value,
        min,
        max
    );
}

/// Assert that an error contains a specific message
pub fn assert_error_contains<E: std::fmt::Display>(error: &E, expected: &str) {
    let error_str = error.to_string();
    assert!(
        error_str.contains(expected),
        "Error message '{}' does not contain '{}'",
        error_str,
        expected
    );
}

/// Assert that a Result is Err and matches a pattern
#[macro_export]
macro_rules! assert_err_matches {
    ($result:expr, $pattern:pat) => {
        match $result {
            Err($pattern) => (),
            Err(other) => panic!("Err value does not match pattern: {:?}", other),
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
        }
    };
}

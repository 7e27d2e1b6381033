//! Expectations on responses and JSON bodies.
//!
//! Every check returns `Err(AssertionError)` instead of panicking, so a failed
//! expectation ends only the scenario that made it.

use crate::booker_client::ApiResponse;
use serde_json::Value;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AssertionError {
    #[error("Expected status {expected}, got {actual}.")]
    UnexpectedStatus { expected: u16, actual: u16 },
    #[error("Expected status text `{expected}`, got `{actual}`.")]
    UnexpectedStatusText { expected: String, actual: String },
    #[error("Expected a 2xx status, got {actual}.")]
    NotSuccessful { actual: u16 },
    #[error("Expected the request to be rejected, got {actual}.")]
    NotRejected { actual: u16 },
    #[error("Missing property `{path}`.")]
    MissingProperty { path: String },
    #[error("Property `{path}` should be absent.")]
    UnexpectedProperty { path: String },
    #[error("Property `{path}`: expected {expected}, got {actual}.")]
    ValueMismatch {
        path: String,
        expected: Value,
        actual: Value,
    },
    #[error("Property `{path}`: expected {expected_type}, got {actual}.")]
    WrongType {
        path: String,
        expected_type: &'static str,
        actual: Value,
    },
}

pub fn assert_status(response: &ApiResponse, expected: u16) -> Result<(), AssertionError> {
    if response.status() != expected {
        return Err(AssertionError::UnexpectedStatus {
            expected,
            actual: response.status(),
        });
    }
    Ok(())
}

pub fn assert_status_text(response: &ApiResponse, expected: &str) -> Result<(), AssertionError> {
    if response.status_text() != expected {
        return Err(AssertionError::UnexpectedStatusText {
            expected: expected.to_string(),
            actual: response.status_text().to_string(),
        });
    }
    Ok(())
}

pub fn assert_ok(response: &ApiResponse) -> Result<(), AssertionError> {
    if !response.ok() {
        return Err(AssertionError::NotSuccessful {
            actual: response.status(),
        });
    }
    Ok(())
}

pub fn assert_rejected(response: &ApiResponse) -> Result<(), AssertionError> {
    if response.ok() {
        return Err(AssertionError::NotRejected {
            actual: response.status(),
        });
    }
    Ok(())
}

/// Look up a dot-separated path, e.g. `bookingdates.checkin` or `0.bookingid`.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

pub fn assert_has_property<'a>(value: &'a Value, path: &str) -> Result<&'a Value, AssertionError> {
    lookup(value, path).ok_or_else(|| AssertionError::MissingProperty {
        path: path.to_string(),
    })
}

pub fn assert_property_eq(
    value: &Value,
    path: &str,
    expected: impl Into<Value>,
) -> Result<(), AssertionError> {
    let expected = expected.into();
    let actual = assert_has_property(value, path)?;
    if *actual != expected {
        return Err(AssertionError::ValueMismatch {
            path: path.to_string(),
            expected,
            actual: actual.clone(),
        });
    }
    Ok(())
}

/// Every leaf of `expected` must be present in `actual` with the same value.
/// Extra properties in `actual` are ignored.
pub fn assert_fields_match(actual: &Value, expected: &Value) -> Result<(), AssertionError> {
    let mut leaves = Vec::new();
    collect_leaves(expected, String::new(), &mut leaves);
    for (path, expected) in leaves {
        assert_property_eq(actual, &path, expected.clone())?;
    }
    Ok(())
}

fn collect_leaves<'a>(value: &'a Value, prefix: String, leaves: &mut Vec<(String, &'a Value)>) {
    match value {
        Value::Object(map) if !map.is_empty() || prefix.is_empty() => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                collect_leaves(child, path, leaves);
            }
        }
        _ => leaves.push((prefix, value)),
    }
}

/// The value must be an array whose elements all carry an integer `key`.
pub fn assert_each_element_has_integer(value: &Value, key: &str) -> Result<(), AssertionError> {
    let items = value.as_array().ok_or_else(|| AssertionError::WrongType {
        path: String::new(),
        expected_type: "an array",
        actual: value.clone(),
    })?;
    for index in 0..items.len() {
        let path = format!("{}.{}", index, key);
        let field = assert_has_property(value, &path)?;
        if !field.is_u64() && !field.is_i64() {
            return Err(AssertionError::WrongType {
                path,
                expected_type: "an integer",
                actual: field.clone(),
            });
        }
    }
    Ok(())
}

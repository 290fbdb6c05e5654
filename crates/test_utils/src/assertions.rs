//! Custom Test Assertions
//!
//! Assertion helpers for registry views and JSON bodies that give more
//! meaningful failure messages than bare `assert_eq!`.

use domain_bank::{BankDetails, BankSummary, CountryBanks, RegistryError};
use serde_json::Value;

/// Asserts that a headquarters view lists the given branch
pub fn assert_has_branch(details: &BankDetails, branch_code: &str) {
    let branches = details.branches.as_ref().unwrap_or_else(|| {
        panic!(
            "Expected {} to carry a branches list, but it is a branch view",
            details.swift_code
        )
    });
    assert!(
        branches.iter().any(|b| b.swift_code.as_str() == branch_code),
        "Expected {} to list branch {}, found [{}]",
        details.swift_code,
        branch_code,
        join_codes(branches)
    );
}

/// Asserts that a country view holds exactly the given codes, in order
pub fn assert_country_codes(view: &CountryBanks, expected: &[&str]) {
    let actual: Vec<&str> = view.swift_codes.iter().map(|s| s.swift_code.as_str()).collect();
    assert_eq!(
        actual, expected,
        "Country {} listed [{}]",
        view.country_code,
        join_codes(&view.swift_codes)
    );
}

/// Asserts that a registry call failed with the expected variant
///
/// Compares variants only, so callers need not rebuild the payload.
pub fn assert_registry_error<T: std::fmt::Debug>(
    result: Result<T, RegistryError>,
    expected: &RegistryError,
) {
    match result {
        Ok(value) => panic!("Expected {:?}, got Ok({:?})", expected, value),
        Err(actual) => assert_eq!(
            std::mem::discriminant(&actual),
            std::mem::discriminant(expected),
            "Expected {:?}, got {:?}",
            expected,
            actual
        ),
    }
}

/// Asserts that a JSON object has `field` set to `expected`
pub fn assert_json_field(body: &Value, field: &str, expected: Value) {
    match body.get(field) {
        Some(actual) => assert_eq!(
            actual, &expected,
            "Field {} mismatch in {}",
            field, body
        ),
        None => panic!("Expected field {} in {}", field, body),
    }
}

/// Asserts that a JSON object does not carry `field` at all
pub fn assert_json_field_absent(body: &Value, field: &str) {
    assert!(
        body.get(field).is_none(),
        "Expected no field {} in {}",
        field,
        body
    );
}

fn join_codes(summaries: &[BankSummary]) -> String {
    summaries
        .iter()
        .map(|s| s.swift_code.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_field_helpers() {
        let body = json!({ "swiftCode": "BPKOPLPWXXX", "address": null });
        assert_json_field(&body, "address", Value::Null);
        assert_json_field_absent(&body, "branches");
    }

    #[test]
    #[should_panic(expected = "Expected field")]
    fn test_missing_field_panics() {
        assert_json_field(&json!({}), "swiftCode", json!("X"));
    }

    #[test]
    fn test_registry_error_matches_variant() {
        let result: Result<(), RegistryError> =
            Err(RegistryError::NotFound("BPKOPLPWXXX".into()));
        assert_registry_error(result, &RegistryError::NotFound(String::new()));
    }
}

//! Tests for core_kernel error types

use core_kernel::{CodeError, CodeKind, PortError};

#[test]
fn test_code_error_fields() {
    let error = CodeError::new(CodeKind::Swift, "ABC", "too short");

    assert_eq!(error.kind, CodeKind::Swift);
    assert_eq!(error.value, "ABC");
    assert!(error.is_swift());
}

#[test]
fn test_code_error_display() {
    let error = CodeError::new(CodeKind::Country, "1X", "must contain only A-Z");
    let display = format!("{}", error);

    assert!(display.contains("Invalid country ISO2 code"));
    assert!(display.contains("'1X'"));
}

#[test]
fn test_port_error_constructors() {
    assert!(matches!(PortError::conflict("dup"), PortError::Conflict { .. }));
    assert!(matches!(
        PortError::reference_violation("fk"),
        PortError::ReferenceViolation { .. }
    ));
    assert!(matches!(
        PortError::transformation("bad row"),
        PortError::Transformation { .. }
    ));
}

#[test]
fn test_port_error_connection_is_transient() {
    let error = PortError::connection("refused");
    assert!(error.is_transient());
    assert!(!error.is_not_found());
}

#[test]
fn test_port_error_validation_has_no_field() {
    match PortError::validation("check failed") {
        PortError::Validation { message, field } => {
            assert_eq!(message, "check failed");
            assert!(field.is_none());
        }
        _ => panic!("Expected Validation error"),
    }
}

//! Structural classification of SWIFT codes
//!
//! These functions work on raw strings so they can be applied to data that
//! has not been through `SwiftCode::parse`, such as rows of a seed file.
//! For validated values prefer the methods on `SwiftCode`.

use core_kernel::{SwiftCode, HEADQUARTERS_LOCATOR};

use crate::error::RegistryError;

/// Length of the branch locator at the end of every code
const LOCATOR_LENGTH: usize = 3;

/// The two record kinds a code can denote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BankKind {
    Headquarters,
    Branch,
}

impl BankKind {
    /// Classifies a validated code
    pub fn of(code: &SwiftCode) -> Self {
        if code.is_headquarters() {
            BankKind::Headquarters
        } else {
            BankKind::Branch
        }
    }

    pub fn is_headquarters(&self) -> bool {
        matches!(self, BankKind::Headquarters)
    }
}

/// True iff `code` has the 11-character `[A-Z0-9]` shape and ends with `XXX`.
pub fn is_headquarters(code: &str) -> bool {
    SwiftCode::parse(code)
        .map(|parsed| parsed.as_str() == code && parsed.is_headquarters())
        .unwrap_or(false)
}

/// Replaces the final three characters of `code` with `XXX`.
///
/// # Errors
///
/// `RegistryError::InvalidCodeShape` when `code` is shorter than three characters.
pub fn derive_headquarters_code(code: &str) -> Result<String, RegistryError> {
    let length = code.chars().count();
    if length < LOCATOR_LENGTH {
        return Err(RegistryError::InvalidCodeShape(code.to_string()));
    }

    let mut derived: String = code.chars().take(length - LOCATOR_LENGTH).collect();
    derived.push_str(HEADQUARTERS_LOCATOR);
    Ok(derived)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_headquarters() {
        assert!(is_headquarters("BPKOPLPWXXX"));
        assert!(!is_headquarters("BPKOPLPWKRK"));
    }

    #[test]
    fn test_is_headquarters_requires_shape() {
        assert!(!is_headquarters("XXX"));
        assert!(!is_headquarters("bpkoplpwXXX"));
        assert!(!is_headquarters("BPKOPLPWXXXX"));
        assert!(!is_headquarters(" BPKOPLPWXXX"));
    }

    #[test]
    fn test_derive_headquarters_code() {
        assert_eq!(derive_headquarters_code("BPKOPLPWKRK").unwrap(), "BPKOPLPWXXX");
        assert_eq!(derive_headquarters_code("BPKOPLPWXXX").unwrap(), "BPKOPLPWXXX");
        assert_eq!(derive_headquarters_code("ABC").unwrap(), "XXX");
    }

    #[test]
    fn test_derive_headquarters_code_rejects_short_input() {
        let err = derive_headquarters_code("AB").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidCodeShape(ref code) if code == "AB"));
    }

    #[test]
    fn test_bank_kind_of() {
        let hq = SwiftCode::parse("BPKOPLPWXXX").unwrap();
        let branch = SwiftCode::parse("BPKOPLPWKRK").unwrap();
        assert_eq!(BankKind::of(&hq), BankKind::Headquarters);
        assert_eq!(BankKind::of(&branch), BankKind::Branch);
    }
}

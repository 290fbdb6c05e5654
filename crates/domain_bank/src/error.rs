//! Registry domain errors
//!
//! Every rule the registry enforces has its own variant so the transport
//! boundary can map each one to a distinct status and message.

use thiserror::Error;

use core_kernel::{CodeError, CodeKind, PortError};

/// Which way a declared headquarters flag contradicts the code shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchDirection {
    /// Declared headquarters, but the locator is not `XXX`
    DeclaredHeadquartersButBranchCode,
    /// Declared branch, but the locator is `XXX`
    DeclaredBranchButHeadquartersCode,
}

/// Errors that can occur in the bank registry domain
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Malformed SWIFT code
    #[error("Invalid SWIFT code: {0}")]
    InvalidCodeShape(String),

    /// ISO2 code is malformed or not in the country table
    #[error("Invalid country ISO2 code: {0}")]
    InvalidCountryCode(String),

    /// Submitted country name does not match the name resolved from the ISO2 code
    #[error("Country name: {submitted} does not match expected country name: {expected}")]
    CountryNameMismatch { submitted: String, expected: String },

    /// Declared headquarters flag contradicts the code shape
    #[error("{}", headquarters_mismatch_message(.0))]
    HeadquartersMismatch(MismatchDirection),

    /// Code is already registered as a headquarters or a branch
    #[error("Bank with SWIFT code {0} already exists")]
    DuplicateCode(String),

    /// Branch submission references a headquarters that is not registered
    #[error("Headquarters not found for branch SWIFT code: {0}")]
    HeadquartersNotFound(String),

    /// Headquarters still has branches referencing it
    #[error("Cannot delete headquarters {0} because it has branches. Delete all branches first.")]
    HasDependentBranches(String),

    /// Lookup or delete of an absent code
    #[error("Bank not found for SWIFT code: {0}")]
    NotFound(String),

    /// Storage collaborator failure
    #[error("Storage error: {0}")]
    Storage(#[from] PortError),
}

fn headquarters_mismatch_message(direction: &MismatchDirection) -> &'static str {
    match direction {
        MismatchDirection::DeclaredHeadquartersButBranchCode => {
            "Headquarters SWIFT code must be 11 chars long and end with 'XXX'"
        }
        MismatchDirection::DeclaredBranchButHeadquartersCode => {
            "Branch SWIFT code must be 11 chars long and must not end with 'XXX'"
        }
    }
}

impl RegistryError {
    /// Creates a NotFound error from any code type
    pub fn not_found(code: impl std::fmt::Display) -> Self {
        RegistryError::NotFound(code.to_string())
    }
}

impl From<CodeError> for RegistryError {
    fn from(error: CodeError) -> Self {
        match error.kind {
            CodeKind::Swift => RegistryError::InvalidCodeShape(error.value),
            CodeKind::Country => RegistryError::InvalidCountryCode(error.value),
        }
    }
}

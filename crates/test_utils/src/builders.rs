//! Test Data Builders
//!
//! Builder for `BankSubmission` with sensible defaults, so tests only spell
//! out the fields they care about.

use core_kernel::{CountryCode, SwiftCode};
use domain_bank::BankSubmission;

use crate::fixtures::CodeFixtures;

/// Builder for constructing bank submissions
///
/// Defaults to the PKO Bank Polski headquarters. Changing the code with
/// [`with_code`](Self::with_code) also updates `is_headquarter` to match the
/// code; call [`declared_as`](Self::declared_as) afterwards to submit an
/// inconsistent flag on purpose.
#[derive(Debug, Clone)]
pub struct BankSubmissionBuilder {
    swift_code: SwiftCode,
    bank_name: String,
    country_code: CountryCode,
    country_name: String,
    address: Option<String>,
    is_headquarter: bool,
}

impl Default for BankSubmissionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BankSubmissionBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            swift_code: CodeFixtures::code(CodeFixtures::PKO_HQ),
            bank_name: "PKO BANK POLSKI S.A.".to_string(),
            country_code: CodeFixtures::country("PL"),
            country_name: "POLAND".to_string(),
            address: None,
            is_headquarter: true,
        }
    }

    pub fn with_code(mut self, code: &str) -> Self {
        self.swift_code = CodeFixtures::code(code);
        self.is_headquarter = self.swift_code.is_headquarters();
        self
    }

    pub fn with_bank_name(mut self, name: impl Into<String>) -> Self {
        self.bank_name = name.into();
        self
    }

    /// Sets both the country code and the name submitted with it
    pub fn with_country(mut self, iso2: &str, name: impl Into<String>) -> Self {
        self.country_code = CodeFixtures::country(iso2);
        self.country_name = name.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn declared_as(mut self, is_headquarter: bool) -> Self {
        self.is_headquarter = is_headquarter;
        self
    }

    pub fn build(self) -> BankSubmission {
        BankSubmission {
            swift_code: self.swift_code,
            bank_name: self.bank_name,
            country_code: self.country_code,
            country_name: self.country_name,
            address: self.address,
            is_headquarter: self.is_headquarter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_code_tracks_kind() {
        let submission = BankSubmissionBuilder::new()
            .with_code(CodeFixtures::PKO_BRANCH)
            .build();
        assert!(!submission.is_headquarter);
    }

    #[test]
    fn test_declared_as_overrides() {
        let submission = BankSubmissionBuilder::new()
            .with_code(CodeFixtures::PKO_BRANCH)
            .declared_as(true)
            .build();
        assert!(submission.is_headquarter);
        assert!(!submission.swift_code.is_headquarters());
    }
}

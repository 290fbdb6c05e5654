//! Registry records and read views
//!
//! Two record kinds are persisted: headquarters and branches. A branch points
//! at its headquarters by code; the headquarters' list of branches is never
//! stored and is assembled at read time.

use serde::{Deserialize, Serialize};

use core_kernel::{CountryCode, SwiftCode};

use crate::classifier::BankKind;

/// A registered headquarters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadquartersRecord {
    pub swift_code: SwiftCode,
    pub bank_name: String,
    pub country_code: CountryCode,
    pub country_name: String,
    pub address: Option<String>,
}

/// A registered branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRecord {
    pub swift_code: SwiftCode,
    pub bank_name: String,
    pub country_code: CountryCode,
    pub country_name: String,
    pub address: Option<String>,
    pub headquarters_code: SwiftCode,
}

/// A validated request to register a code
///
/// The code and country fields are already shape-checked by their types;
/// the registry performs every remaining rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankSubmission {
    pub swift_code: SwiftCode,
    pub bank_name: String,
    pub country_code: CountryCode,
    pub country_name: String,
    pub address: Option<String>,
    pub is_headquarter: bool,
}

impl BankSubmission {
    /// The record kind the submitter claims
    pub fn declared_kind(&self) -> BankKind {
        if self.is_headquarter {
            BankKind::Headquarters
        } else {
            BankKind::Branch
        }
    }

    pub(crate) fn into_headquarters(self, country_name: String) -> HeadquartersRecord {
        HeadquartersRecord {
            swift_code: self.swift_code,
            bank_name: self.bank_name,
            country_code: self.country_code,
            country_name,
            address: self.address,
        }
    }

    pub(crate) fn into_branch(self, country_name: String) -> BranchRecord {
        let headquarters_code = self.swift_code.headquarters_code();
        BranchRecord {
            swift_code: self.swift_code,
            bank_name: self.bank_name,
            country_code: self.country_code,
            country_name,
            address: self.address,
            headquarters_code,
        }
    }
}

/// Summary of one code, as listed under a headquarters or a country
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankSummary {
    pub swift_code: SwiftCode,
    pub bank_name: String,
    pub country_code: CountryCode,
    pub address: Option<String>,
    pub is_headquarter: bool,
}

/// Full detail view of one code
///
/// `branches` is `Some` for a headquarters (possibly empty) and `None` for a branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankDetails {
    pub swift_code: SwiftCode,
    pub bank_name: String,
    pub country_code: CountryCode,
    pub country_name: String,
    pub address: Option<String>,
    pub is_headquarter: bool,
    pub branches: Option<Vec<BankSummary>>,
}

/// Every code registered for one country
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryBanks {
    pub country_code: CountryCode,
    pub country_name: String,
    pub swift_codes: Vec<BankSummary>,
}

impl From<&HeadquartersRecord> for BankSummary {
    fn from(record: &HeadquartersRecord) -> Self {
        Self {
            swift_code: record.swift_code.clone(),
            bank_name: record.bank_name.clone(),
            country_code: record.country_code.clone(),
            address: record.address.clone(),
            is_headquarter: true,
        }
    }
}

impl From<&BranchRecord> for BankSummary {
    fn from(record: &BranchRecord) -> Self {
        Self {
            swift_code: record.swift_code.clone(),
            bank_name: record.bank_name.clone(),
            country_code: record.country_code.clone(),
            address: record.address.clone(),
            is_headquarter: false,
        }
    }
}

impl BankDetails {
    /// Detail view of a headquarters together with its branches
    pub fn headquarters(record: HeadquartersRecord, branches: &[BranchRecord]) -> Self {
        Self {
            swift_code: record.swift_code,
            bank_name: record.bank_name,
            country_code: record.country_code,
            country_name: record.country_name,
            address: record.address,
            is_headquarter: true,
            branches: Some(branches.iter().map(BankSummary::from).collect()),
        }
    }

    /// Detail view of a branch
    pub fn branch(record: BranchRecord) -> Self {
        Self {
            swift_code: record.swift_code,
            bank_name: record.bank_name,
            country_code: record.country_code,
            country_name: record.country_name,
            address: record.address,
            is_headquarter: false,
            branches: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(code: &str, is_headquarter: bool) -> BankSubmission {
        BankSubmission {
            swift_code: SwiftCode::parse(code).unwrap(),
            bank_name: "PKO BANK POLSKI S.A.".to_string(),
            country_code: CountryCode::parse("PL").unwrap(),
            country_name: "POLAND".to_string(),
            address: None,
            is_headquarter,
        }
    }

    #[test]
    fn test_branch_record_references_derived_headquarters() {
        let branch = submission("BPKOPLPWKRK", false).into_branch("Poland".to_string());
        assert_eq!(branch.headquarters_code.as_str(), "BPKOPLPWXXX");
        assert_eq!(branch.country_name, "Poland");
    }

    #[test]
    fn test_headquarters_details_include_branches() {
        let hq = submission("BPKOPLPWXXX", true).into_headquarters("Poland".to_string());
        let branch = submission("BPKOPLPWKRK", false).into_branch("Poland".to_string());

        let details = BankDetails::headquarters(hq, &[branch]);
        let branches = details.branches.unwrap();
        assert_eq!(branches.len(), 1);
        assert!(!branches[0].is_headquarter);
    }

    #[test]
    fn test_branch_details_have_no_branch_list() {
        let branch = submission("BPKOPLPWKRK", false).into_branch("Poland".to_string());
        let details = BankDetails::branch(branch);
        assert!(details.branches.is_none());
        assert!(!details.is_headquarter);
    }

    #[test]
    fn test_declared_kind() {
        assert_eq!(submission("BPKOPLPWXXX", true).declared_kind(), BankKind::Headquarters);
        assert_eq!(submission("BPKOPLPWKRK", false).declared_kind(), BankKind::Branch);
    }
}

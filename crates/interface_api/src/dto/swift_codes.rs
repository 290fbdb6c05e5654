//! SWIFT code DTOs
//!
//! Field names follow the public JSON contract (`swiftCode`, `countryISO2`, ...).

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{CountryCode, SwiftCode};
use domain_bank::{BankDetails, BankSubmission, BankSummary, CountryBanks};

use crate::error::ApiError;

/// Body of `POST /v1/swift-codes`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBankRequest {
    #[serde(default)]
    pub address: Option<String>,

    #[validate(length(min = 1, message = "Bank name is required"))]
    pub bank_name: String,

    #[serde(rename = "countryISO2")]
    #[validate(length(equal = 2, message = "Country ISO2 code must be exactly 2 capital letters"))]
    pub country_iso2: String,

    #[validate(length(min = 1, message = "Country name is required"))]
    pub country_name: String,

    pub is_headquarter: bool,

    #[validate(length(equal = 11, message = "SWIFT code must be exactly 11 characters"))]
    pub swift_code: String,
}

impl CreateBankRequest {
    /// Validates the body and converts it into a typed submission
    pub fn into_submission(self) -> Result<BankSubmission, ApiError> {
        self.validate()?;

        let mut blank = Vec::new();
        if self.bank_name.trim().is_empty() {
            blank.push("bankName: Bank name is required".to_string());
        }
        if self.country_name.trim().is_empty() {
            blank.push("countryName: Country name is required".to_string());
        }
        if !blank.is_empty() {
            return Err(ApiError::validation("Validation failed", blank));
        }

        Ok(BankSubmission {
            swift_code: SwiftCode::parse(&self.swift_code)?,
            bank_name: self.bank_name.trim().to_string(),
            country_code: CountryCode::parse(&self.country_iso2)?,
            country_name: self.country_name,
            address: self
                .address
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty()),
            is_headquarter: self.is_headquarter,
        })
    }
}

/// One code as listed under a headquarters or a country
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BankBranchResponse {
    pub address: Option<String>,
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub is_headquarter: bool,
    pub swift_code: String,
}

/// Detail view of a single code
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BankDetailsResponse {
    pub address: Option<String>,
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub country_name: String,
    pub is_headquarter: bool,
    pub swift_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<Vec<BankBranchResponse>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CountryBanksResponse {
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub country_name: String,
    pub swift_codes: Vec<BankBranchResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn saved(code: &SwiftCode) -> Self {
        Self {
            message: format!("Successfully saved bank information for SWIFT code {}", code),
        }
    }

    pub fn deleted(code: &SwiftCode) -> Self {
        Self {
            message: format!("Successfully deleted bank details for SWIFT code {}", code),
        }
    }
}

impl From<BankSummary> for BankBranchResponse {
    fn from(summary: BankSummary) -> Self {
        Self {
            address: summary.address,
            bank_name: summary.bank_name,
            country_iso2: summary.country_code.into(),
            is_headquarter: summary.is_headquarter,
            swift_code: summary.swift_code.into(),
        }
    }
}

impl From<BankDetails> for BankDetailsResponse {
    fn from(details: BankDetails) -> Self {
        Self {
            address: details.address,
            bank_name: details.bank_name,
            country_iso2: details.country_code.into(),
            country_name: details.country_name,
            is_headquarter: details.is_headquarter,
            swift_code: details.swift_code.into(),
            branches: details
                .branches
                .map(|branches| branches.into_iter().map(BankBranchResponse::from).collect()),
        }
    }
}

impl From<CountryBanks> for CountryBanksResponse {
    fn from(view: CountryBanks) -> Self {
        Self {
            country_iso2: view.country_code.into(),
            country_name: view.country_name,
            swift_codes: view
                .swift_codes
                .into_iter()
                .map(BankBranchResponse::from)
                .collect(),
        }
    }
}

//! Bank registry service
//!
//! `BankRegistry` is the aggregate root over headquarters and branch records.
//! It classifies codes, cross-checks country names, and enforces the
//! hierarchy rules; every write runs inside one store transaction so the
//! checks and the write commit together.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use core_kernel::{CountryCode, PortError, SwiftCode};

use crate::bank::{BankDetails, BankSubmission, BankSummary, CountryBanks};
use crate::classifier::BankKind;
use crate::country::CountryDirectory;
use crate::error::{MismatchDirection, RegistryError};
use crate::ports::{BankStore, BankTransaction};

/// Service exposing the registry operations
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct BankRegistry {
    store: Arc<dyn BankStore>,
    countries: CountryDirectory,
}

impl BankRegistry {
    /// Creates a registry backed by the built-in ISO 3166 country table
    pub fn new(store: Arc<dyn BankStore>) -> Self {
        Self::with_countries(store, CountryDirectory::iso3166())
    }

    /// Creates a registry with a custom country table
    pub fn with_countries(store: Arc<dyn BankStore>, countries: CountryDirectory) -> Self {
        Self { store, countries }
    }

    pub fn store(&self) -> &Arc<dyn BankStore> {
        &self.store
    }

    pub fn countries(&self) -> &CountryDirectory {
        &self.countries
    }

    /// Returns the detail view of one code.
    ///
    /// A headquarters view lists its branches; a branch view has none.
    ///
    /// # Errors
    ///
    /// `RegistryError::NotFound` if the code is not registered under the kind
    /// its shape denotes.
    #[instrument(skip(self), fields(swift_code = %code))]
    pub async fn get_by_code(&self, code: &SwiftCode) -> Result<BankDetails, RegistryError> {
        match BankKind::of(code) {
            BankKind::Headquarters => {
                let record = self
                    .store
                    .get_headquarters(code)
                    .await?
                    .ok_or_else(|| RegistryError::not_found(code))?;
                let branches = self.store.list_branches_by_headquarters(code).await?;
                Ok(BankDetails::headquarters(record, &branches))
            }
            BankKind::Branch => self
                .store
                .get_branch(code)
                .await?
                .map(BankDetails::branch)
                .ok_or_else(|| RegistryError::not_found(code)),
        }
    }

    /// Returns every code registered in a country, headquarters first.
    ///
    /// # Errors
    ///
    /// `RegistryError::InvalidCountryCode` if the code is not in the country table.
    #[instrument(skip(self), fields(country = %country))]
    pub async fn get_by_country(&self, country: &CountryCode) -> Result<CountryBanks, RegistryError> {
        let country_name = self.countries.resolve_name(country.as_str())?.to_string();

        let headquarters = self.store.list_headquarters_by_country(country).await?;
        let branches = self.store.list_branches_by_country(country).await?;

        let mut seen = BTreeSet::new();
        let swift_codes: Vec<BankSummary> = headquarters
            .iter()
            .map(BankSummary::from)
            .chain(branches.iter().map(BankSummary::from))
            .filter(|summary| seen.insert(summary.swift_code.clone()))
            .collect();

        Ok(CountryBanks {
            country_code: country.clone(),
            country_name,
            swift_codes,
        })
    }

    /// Validates and persists a new record, returning the kind stored.
    ///
    /// Checks run in order, stopping at the first failure: country name,
    /// declared kind against code shape, duplicate code, and for branches
    /// the existence of the headquarters.
    #[instrument(skip(self, submission), fields(swift_code = %submission.swift_code))]
    pub async fn register(&self, submission: BankSubmission) -> Result<BankKind, RegistryError> {
        let country_name = self
            .countries
            .confirm_name(submission.country_code.as_str(), &submission.country_name)
            .map_err(|e| {
                warn!(error = %e, "Rejected registration");
                e
            })?
            .to_string();

        let kind = BankKind::of(&submission.swift_code);
        check_declared_kind(kind, submission.declared_kind()).map_err(|e| {
            warn!(error = %e, "Rejected registration");
            e
        })?;

        let code = submission.swift_code.clone();
        let headquarters_code = code.headquarters_code();
        let lock_keys = match kind {
            BankKind::Headquarters => vec![code.clone()],
            BankKind::Branch => vec![code.clone(), headquarters_code.clone()],
        };

        let mut tx = self.store.begin(&lock_keys).await?;
        let result = self
            .register_in(tx.as_mut(), submission, kind, country_name, &headquarters_code)
            .await;

        match result {
            Ok(()) => {
                tx.commit().await.map_err(|e| map_insert_error(e, &code))?;
                info!(kind = ?kind, "Registered SWIFT code");
                Ok(kind)
            }
            Err(e) => {
                warn!(error = %e, "Rejected registration");
                Err(e)
            }
        }
    }

    async fn register_in(
        &self,
        tx: &mut dyn BankTransaction,
        submission: BankSubmission,
        kind: BankKind,
        country_name: String,
        headquarters_code: &SwiftCode,
    ) -> Result<(), RegistryError> {
        let code = submission.swift_code.clone();
        if tx.headquarters_exists(&code).await? || tx.branch_exists(&code).await? {
            return Err(RegistryError::DuplicateCode(code.to_string()));
        }

        match kind {
            BankKind::Headquarters => {
                let record = submission.into_headquarters(country_name);
                tx.insert_headquarters(&record)
                    .await
                    .map_err(|e| map_insert_error(e, &code))
            }
            BankKind::Branch => {
                if !tx.headquarters_exists(headquarters_code).await? {
                    return Err(RegistryError::HeadquartersNotFound(code.to_string()));
                }
                let record = submission.into_branch(country_name);
                tx.insert_branch(&record)
                    .await
                    .map_err(|e| map_insert_error(e, &code))
            }
        }
    }

    /// Removes a code, returning the kind removed.
    ///
    /// # Errors
    ///
    /// - `RegistryError::NotFound` if the code is not registered
    /// - `RegistryError::HasDependentBranches` for a headquarters that still has branches
    #[instrument(skip(self), fields(swift_code = %code))]
    pub async fn delete(&self, code: &SwiftCode) -> Result<BankKind, RegistryError> {
        let kind = BankKind::of(code);
        let mut tx = self.store.begin(std::slice::from_ref(code)).await?;

        let deleted = match kind {
            BankKind::Branch => tx.delete_branch(code).await?,
            BankKind::Headquarters => {
                if !tx.headquarters_exists(code).await? {
                    false
                } else if tx.count_branches_of(code).await? > 0 {
                    let err = RegistryError::HasDependentBranches(code.to_string());
                    warn!(error = %err, "Rejected deletion");
                    return Err(err);
                } else {
                    tx.delete_headquarters(code)
                        .await
                        .map_err(|e| map_delete_error(e, code))?
                }
            }
        };

        if !deleted {
            return Err(RegistryError::not_found(code));
        }

        tx.commit().await.map_err(|e| map_delete_error(e, code))?;
        info!(kind = ?kind, "Deleted SWIFT code");
        Ok(kind)
    }
}

impl std::fmt::Debug for BankRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BankRegistry")
            .field("countries", &self.countries.len())
            .finish_non_exhaustive()
    }
}

fn check_declared_kind(actual: BankKind, declared: BankKind) -> Result<(), RegistryError> {
    match (declared, actual) {
        (BankKind::Headquarters, BankKind::Branch) => Err(RegistryError::HeadquartersMismatch(
            MismatchDirection::DeclaredHeadquartersButBranchCode,
        )),
        (BankKind::Branch, BankKind::Headquarters) => Err(RegistryError::HeadquartersMismatch(
            MismatchDirection::DeclaredBranchButHeadquartersCode,
        )),
        _ => Ok(()),
    }
}

/// Maps the store's key backstops onto registry errors for an insert
fn map_insert_error(error: PortError, code: &SwiftCode) -> RegistryError {
    match error {
        PortError::Conflict { .. } => RegistryError::DuplicateCode(code.to_string()),
        PortError::ReferenceViolation { .. } => {
            RegistryError::HeadquartersNotFound(code.to_string())
        }
        other => RegistryError::Storage(other),
    }
}

fn map_delete_error(error: PortError, code: &SwiftCode) -> RegistryError {
    match error {
        PortError::ReferenceViolation { .. } => {
            RegistryError::HasDependentBranches(code.to_string())
        }
        other => RegistryError::Storage(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_declared_kind() {
        assert!(check_declared_kind(BankKind::Headquarters, BankKind::Headquarters).is_ok());
        assert!(check_declared_kind(BankKind::Branch, BankKind::Branch).is_ok());
        assert!(matches!(
            check_declared_kind(BankKind::Branch, BankKind::Headquarters),
            Err(RegistryError::HeadquartersMismatch(
                MismatchDirection::DeclaredHeadquartersButBranchCode
            ))
        ));
        assert!(matches!(
            check_declared_kind(BankKind::Headquarters, BankKind::Branch),
            Err(RegistryError::HeadquartersMismatch(
                MismatchDirection::DeclaredBranchButHeadquartersCode
            ))
        ));
    }

    #[test]
    fn test_backstop_mapping() {
        let code = SwiftCode::parse("BPKOPLPWKRK").unwrap();
        assert!(matches!(
            map_insert_error(PortError::conflict("dup"), &code),
            RegistryError::DuplicateCode(_)
        ));
        assert!(matches!(
            map_insert_error(PortError::reference_violation("fk"), &code),
            RegistryError::HeadquartersNotFound(_)
        ));
        assert!(matches!(
            map_delete_error(PortError::reference_violation("fk"), &code),
            RegistryError::HasDependentBranches(_)
        ));
    }
}

//! Bulk seed import
//!
//! Loads a delimited file of SWIFT codes into an empty registry. Rows that
//! fail validation are skipped and counted rather than aborting the import.

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;
use tracing::{debug, info, instrument};

use core_kernel::{CountryCode, PortError, SwiftCode};

use crate::bank::{BankSubmission, BranchRecord, HeadquartersRecord};
use crate::country::CountryDirectory;
use crate::registry::BankRegistry;

pub const COUNTRY_ISO2_COLUMN: &str = "COUNTRY ISO2 CODE";
pub const SWIFT_CODE_COLUMN: &str = "SWIFT CODE";
pub const BANK_NAME_COLUMN: &str = "NAME";
pub const COUNTRY_NAME_COLUMN: &str = "COUNTRY NAME";
pub const ADDRESS_COLUMN: &str = "ADDRESS";

const REQUIRED_COLUMNS: [&str; 4] = [
    COUNTRY_ISO2_COLUMN,
    SWIFT_CODE_COLUMN,
    BANK_NAME_COLUMN,
    COUNTRY_NAME_COLUMN,
];

/// Errors that abort an import
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Seed file does not contain all required columns: expected {expected:?}, found {found:?}")]
    MissingColumns {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed seed file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] PortError),
}

/// Counts of an import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub headquarters: usize,
    pub branches: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported(ImportSummary),
    /// The store already held records; nothing was written
    AlreadySeeded,
}

/// Records accepted from a seed file, ready to be written
#[derive(Debug, Clone, Default)]
pub struct ParsedSeed {
    pub headquarters: Vec<HeadquartersRecord>,
    pub branches: Vec<BranchRecord>,
    pub skipped: usize,
}

impl ParsedSeed {
    pub fn summary(&self) -> ImportSummary {
        ImportSummary {
            headquarters: self.headquarters.len(),
            branches: self.branches.len(),
            skipped: self.skipped,
        }
    }
}

/// Positions of the known columns in the header row
struct ColumnMap {
    country_iso2: usize,
    swift_code: usize,
    bank_name: usize,
    country_name: usize,
    address: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, ImportError> {
        let names: Vec<String> = headers.iter().map(|h| h.trim().to_uppercase()).collect();
        let position = |column: &str| names.iter().position(|name| name == column);

        match (
            position(COUNTRY_ISO2_COLUMN),
            position(SWIFT_CODE_COLUMN),
            position(BANK_NAME_COLUMN),
            position(COUNTRY_NAME_COLUMN),
        ) {
            (Some(country_iso2), Some(swift_code), Some(bank_name), Some(country_name)) => {
                Ok(Self {
                    country_iso2,
                    swift_code,
                    bank_name,
                    country_name,
                    address: position(ADDRESS_COLUMN),
                })
            }
            _ => Err(ImportError::MissingColumns {
                expected: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
                found: names,
            }),
        }
    }
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).map(str::trim).unwrap_or("")
}

/// Reads seed files and writes them through a registry's store
#[derive(Debug, Clone)]
pub struct SeedImporter {
    delimiter: u8,
}

impl Default for SeedImporter {
    fn default() -> Self {
        Self { delimiter: b'\t' }
    }
}

impl SeedImporter {
    /// Creates an importer for tab-separated files
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parses and validates every row without touching storage.
    ///
    /// Each row must carry a well-formed code, a known country whose name
    /// matches the file, and a bank name. Codes seen earlier in the file and
    /// branches whose headquarters is not in the file are dropped.
    pub fn parse<R: Read>(
        &self,
        reader: R,
        countries: &CountryDirectory,
    ) -> Result<ParsedSeed, ImportError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let columns = ColumnMap::from_headers(rdr.headers()?)?;

        let mut seed = ParsedSeed::default();
        let mut seen = HashSet::new();
        let mut headquarters = BTreeMap::new();
        let mut branches = Vec::new();

        for (index, result) in rdr.records().enumerate() {
            // Header is line 1
            let line = index + 2;
            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    debug!(line, error = %e, "Skipping unreadable row");
                    seed.skipped += 1;
                    continue;
                }
            };

            let submission = match parse_row(&record, &columns, countries) {
                Ok(submission) => submission,
                Err(reason) => {
                    debug!(line, reason = %reason, "Skipping seed row");
                    seed.skipped += 1;
                    continue;
                }
            };

            if !seen.insert(submission.swift_code.clone()) {
                debug!(line, swift_code = %submission.swift_code, "Skipping duplicate code");
                seed.skipped += 1;
                continue;
            }

            let country_name = submission.country_name.clone();
            if submission.is_headquarter {
                let record = submission.into_headquarters(country_name);
                headquarters.insert(record.swift_code.clone(), record);
            } else {
                branches.push(submission.into_branch(country_name));
            }
        }

        for branch in branches {
            if headquarters.contains_key(&branch.headquarters_code) {
                seed.branches.push(branch);
            } else {
                debug!(
                    swift_code = %branch.swift_code,
                    headquarters = %branch.headquarters_code,
                    "Skipping branch without headquarters"
                );
                seed.skipped += 1;
            }
        }
        seed.headquarters = headquarters.into_values().collect();

        Ok(seed)
    }

    /// Imports from any reader when the registry is empty
    #[instrument(skip(self, registry, reader))]
    pub async fn import_reader<R: Read>(
        &self,
        registry: &BankRegistry,
        reader: R,
    ) -> Result<ImportOutcome, ImportError> {
        if !registry.store().is_empty().await? {
            info!("Registry already seeded, skipping import");
            return Ok(ImportOutcome::AlreadySeeded);
        }

        let seed = self.parse(reader, registry.countries())?;

        let mut tx = registry.store().begin(&[]).await?;
        if !tx.claim_if_empty().await? {
            info!("Registry was populated while parsing, skipping import");
            return Ok(ImportOutcome::AlreadySeeded);
        }
        for record in &seed.headquarters {
            tx.insert_headquarters(record).await?;
        }
        for record in &seed.branches {
            tx.insert_branch(record).await?;
        }
        tx.commit().await?;

        let summary = seed.summary();
        info!(
            headquarters = summary.headquarters,
            branches = summary.branches,
            skipped = summary.skipped,
            "Registry seeded"
        );
        Ok(ImportOutcome::Imported(summary))
    }

    /// Imports from a file on disk when the registry is empty
    pub async fn import_file(
        &self,
        registry: &BankRegistry,
        path: impl AsRef<Path>,
    ) -> Result<ImportOutcome, ImportError> {
        let path = path.as_ref();
        info!(path = %path.display(), "Importing seed file");
        let file = File::open(path)?;
        self.import_reader(registry, file).await
    }
}

fn parse_row(
    record: &StringRecord,
    columns: &ColumnMap,
    countries: &CountryDirectory,
) -> Result<BankSubmission, String> {
    let swift_code = SwiftCode::parse(field(record, columns.swift_code)).map_err(|e| e.to_string())?;

    let iso2 = field(record, columns.country_iso2).to_uppercase();
    let country_code = CountryCode::parse(&iso2).map_err(|e| e.to_string())?;
    let country_name = countries
        .confirm_name(country_code.as_str(), field(record, columns.country_name))
        .map_err(|e| e.to_string())?
        .to_string();

    let bank_name = field(record, columns.bank_name);
    if bank_name.is_empty() {
        return Err("missing bank name".to_string());
    }

    let address = columns
        .address
        .map(|index| field(record, index))
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    let is_headquarter = swift_code.is_headquarters();
    Ok(BankSubmission {
        swift_code,
        bank_name: bank_name.to_string(),
        country_code,
        country_name,
        address,
        is_headquarter,
    })
}

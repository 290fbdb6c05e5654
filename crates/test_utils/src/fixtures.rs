//! Pre-built Test Fixtures
//!
//! Ready-to-use banks for registry tests. The values mirror rows of the
//! public SWIFT code list so failures read naturally.

use std::sync::Arc;

use core_kernel::{CountryCode, SwiftCode};
use domain_bank::{BankRegistry, BankSubmission, BranchRecord, HeadquartersRecord, InMemoryBankStore};

/// Codes used across the fixtures
pub struct CodeFixtures;

impl CodeFixtures {
    /// PKO Bank Polski headquarters
    pub const PKO_HQ: &'static str = "BPKOPLPWXXX";
    /// A PKO Bank Polski branch
    pub const PKO_BRANCH: &'static str = "BPKOPLPWKRK";
    /// A second PKO Bank Polski branch
    pub const PKO_SECOND_BRANCH: &'static str = "BPKOPLPWGDA";
    /// Chilean headquarters with no branches
    pub const BANCO_CHILE_HQ: &'static str = "BCHICLRMXXX";
    /// A code that is never registered by any fixture
    pub const UNKNOWN: &'static str = "ZZZZPLPWXXX";

    pub fn code(value: &str) -> SwiftCode {
        SwiftCode::parse(value).expect("fixture code must be well formed")
    }

    pub fn country(value: &str) -> CountryCode {
        CountryCode::parse(value).expect("fixture country must be well formed")
    }
}

/// Submissions as a client would send them
pub struct BankFixtures;

impl BankFixtures {
    pub fn pko_headquarters() -> BankSubmission {
        BankSubmission {
            swift_code: CodeFixtures::code(CodeFixtures::PKO_HQ),
            bank_name: "PKO BANK POLSKI S.A.".to_string(),
            country_code: CodeFixtures::country("PL"),
            country_name: "POLAND".to_string(),
            address: Some("UL. PULAWSKA 15 WARSZAWA, MAZOWIECKIE, 02-515".to_string()),
            is_headquarter: true,
        }
    }

    pub fn pko_branch() -> BankSubmission {
        BankSubmission {
            swift_code: CodeFixtures::code(CodeFixtures::PKO_BRANCH),
            address: Some("RYNEK GLOWNY 21 KRAKOW, MALOPOLSKIE, 31-008".to_string()),
            is_headquarter: false,
            ..Self::pko_headquarters()
        }
    }

    pub fn pko_second_branch() -> BankSubmission {
        BankSubmission {
            swift_code: CodeFixtures::code(CodeFixtures::PKO_SECOND_BRANCH),
            address: None,
            is_headquarter: false,
            ..Self::pko_headquarters()
        }
    }

    pub fn banco_chile_headquarters() -> BankSubmission {
        BankSubmission {
            swift_code: CodeFixtures::code(CodeFixtures::BANCO_CHILE_HQ),
            bank_name: "BANCO DE CHILE".to_string(),
            country_code: CodeFixtures::country("CL"),
            country_name: "CHILE".to_string(),
            address: None,
            is_headquarter: true,
        }
    }
}

/// Stored records, for seeding stores directly
pub struct RecordFixtures;

impl RecordFixtures {
    pub fn pko_headquarters() -> HeadquartersRecord {
        HeadquartersRecord {
            swift_code: CodeFixtures::code(CodeFixtures::PKO_HQ),
            bank_name: "PKO BANK POLSKI S.A.".to_string(),
            country_code: CodeFixtures::country("PL"),
            country_name: "Poland".to_string(),
            address: Some("UL. PULAWSKA 15 WARSZAWA, MAZOWIECKIE, 02-515".to_string()),
        }
    }

    pub fn pko_branch() -> BranchRecord {
        BranchRecord {
            swift_code: CodeFixtures::code(CodeFixtures::PKO_BRANCH),
            bank_name: "PKO BANK POLSKI S.A.".to_string(),
            country_code: CodeFixtures::country("PL"),
            country_name: "Poland".to_string(),
            address: Some("RYNEK GLOWNY 21 KRAKOW, MALOPOLSKIE, 31-008".to_string()),
            headquarters_code: CodeFixtures::code(CodeFixtures::PKO_HQ),
        }
    }
}

/// A tab-separated seed file in the published column layout
///
/// Holds two headquarters, one branch and one row with an unknown country.
pub const SEED_TSV: &str = "\
COUNTRY ISO2 CODE\tSWIFT CODE\tCODE TYPE\tNAME\tADDRESS\tTOWN NAME\tCOUNTRY NAME\tTIME ZONE
PL\tBPKOPLPWXXX\tBIC11\tPKO BANK POLSKI S.A.\tUL. PULAWSKA 15 WARSZAWA, MAZOWIECKIE, 02-515\tWARSZAWA\tPOLAND\tEurope/Warsaw
PL\tBPKOPLPWKRK\tBIC11\tPKO BANK POLSKI S.A.\tRYNEK GLOWNY 21 KRAKOW, MALOPOLSKIE, 31-008\tKRAKOW\tPOLAND\tEurope/Warsaw
CL\tBCHICLRMXXX\tBIC11\tBANCO DE CHILE\t\tSANTIAGO\tCHILE\tPacific/Easter
QQ\tQQQQQQQQXXX\tBIC11\tNOWHERE BANK\t\tNOWHERE\tNOWHERE\tEtc/UTC
";

/// An empty registry over the in-memory store
pub fn memory_registry() -> BankRegistry {
    BankRegistry::new(Arc::new(InMemoryBankStore::new()))
}

/// An in-memory registry holding the PKO headquarters and one branch
pub async fn seeded_memory_registry() -> BankRegistry {
    let registry = memory_registry();
    registry
        .register(BankFixtures::pko_headquarters())
        .await
        .expect("fixture headquarters registers");
    registry
        .register(BankFixtures::pko_branch())
        .await
        .expect("fixture branch registers");
    registry
}

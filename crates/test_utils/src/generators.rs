//! Property-Based Test Generators
//!
//! Provides proptest strategies for codes that satisfy the SWIFT shape, and
//! `fake`-backed helpers for realistic bank names.

use fake::faker::address::en::StreetName;
use fake::faker::company::en::CompanyName;
use fake::Fake;
use proptest::prelude::*;

use core_kernel::{CountryCode, SwiftCode};
use domain_bank::ISO_3166_COUNTRIES;

/// Strategy for the eight-character bank and location prefix
fn bank_prefix_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{4}[A-Z]{2}[A-Z0-9]{2}"
}

/// Strategy for a three-character branch suffix other than `XXX`
fn branch_suffix_strategy() -> impl Strategy<Value = String> {
    "[A-Z0-9]{3}".prop_filter("branch suffix must not be XXX", |s| s != "XXX")
}

/// Strategy for headquarters codes
fn headquarters_code_strategy() -> impl Strategy<Value = SwiftCode> {
    bank_prefix_strategy().prop_map(|prefix| {
        SwiftCode::parse(&format!("{}XXX", prefix)).expect("generated code is well formed")
    })
}

/// Strategy for branch codes
fn branch_code_strategy() -> impl Strategy<Value = SwiftCode> {
    (bank_prefix_strategy(), branch_suffix_strategy()).prop_map(|(prefix, suffix)| {
        SwiftCode::parse(&format!("{}{}", prefix, suffix)).expect("generated code is well formed")
    })
}

/// Strategy for a headquarters code together with one of its branches
pub fn headquarters_with_branch_strategy() -> impl Strategy<Value = (SwiftCode, SwiftCode)> {
    (bank_prefix_strategy(), branch_suffix_strategy()).prop_map(|(prefix, suffix)| {
        (
            SwiftCode::parse(&format!("{}XXX", prefix)).expect("generated code is well formed"),
            SwiftCode::parse(&format!("{}{}", prefix, suffix))
                .expect("generated code is well formed"),
        )
    })
}

/// Strategy for any well-formed code
pub fn swift_code_strategy() -> impl Strategy<Value = SwiftCode> {
    prop_oneof![headquarters_code_strategy(), branch_code_strategy()]
}

/// Strategy for assigned ISO 3166-1 countries, as code and canonical name
pub fn country_strategy() -> impl Strategy<Value = (CountryCode, String)> {
    proptest::sample::select(ISO_3166_COUNTRIES).prop_map(|(iso2, name)| {
        (
            CountryCode::parse(iso2).expect("directory entries are well formed"),
            name.to_string(),
        )
    })
}

/// A realistic, upper-cased bank name
pub fn fake_bank_name() -> String {
    let name: String = CompanyName().fake();
    format!("{} BANK", name.to_uppercase())
}

/// A realistic, upper-cased street address
pub fn fake_address() -> String {
    let street: String = StreetName().fake();
    let number: u16 = (1..200).fake();
    format!("{} {}", street.to_uppercase(), number)
}

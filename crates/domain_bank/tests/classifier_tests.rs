//! Property tests for code classification

use core_kernel::SwiftCode;
use domain_bank::{derive_headquarters_code, is_headquarters, BankKind};
use proptest::prelude::*;

proptest! {
    #[test]
    fn headquarters_iff_xxx_suffix(code in "[A-Z0-9]{11}") {
        prop_assert_eq!(is_headquarters(&code), code.ends_with("XXX"));
    }

    #[test]
    fn derived_code_differs_only_in_locator(code in "[A-Z0-9]{8}[A-WYZ0-9][A-Z0-9]{2}") {
        let derived = derive_headquarters_code(&code).unwrap();
        prop_assert_eq!(derived.len(), 11);
        prop_assert_eq!(&derived[..8], &code[..8]);
        prop_assert_eq!(&derived[8..], "XXX");
    }

    #[test]
    fn derived_code_is_headquarters(code in "[A-Z0-9]{11}") {
        let derived = derive_headquarters_code(&code).unwrap();
        prop_assert!(is_headquarters(&derived));
    }

    #[test]
    fn kind_agrees_with_string_classifier(code in "[A-Z0-9]{11}") {
        let parsed = SwiftCode::parse(&code).unwrap();
        prop_assert_eq!(BankKind::of(&parsed).is_headquarters(), is_headquarters(&code));
        let headquarters = parsed.headquarters_code();
        prop_assert_eq!(headquarters.as_str(), derive_headquarters_code(&code).unwrap());
    }

    #[test]
    fn malformed_codes_are_never_headquarters(code in "[a-z]{8}XXX") {
        prop_assert!(!is_headquarters(&code));
    }
}

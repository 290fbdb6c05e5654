//! Strongly-typed codes for registry entities
//!
//! Newtype wrappers around validated strings prevent a raw, unchecked string
//! from ever reaching the registry where a SWIFT or country code is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CodeError, CodeKind};

/// Locator that marks a SWIFT code as a headquarters code
pub const HEADQUARTERS_LOCATOR: &str = "XXX";

macro_rules! define_code {
    ($name:ident, $kind:expr, $len:literal, $allowed:expr, $charset:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Required length in characters
            pub const LENGTH: usize = $len;

            /// Parses and validates a code, trimming surrounding whitespace
            pub fn parse(value: &str) -> Result<Self, CodeError> {
                let trimmed = value.trim();
                let length = trimmed.chars().count();
                if length != $len {
                    return Err(CodeError::new(
                        $kind,
                        value,
                        format!("must be exactly {} characters, got {}", $len, length),
                    ));
                }
                if !trimmed.chars().all($allowed) {
                    return Err(CodeError::new(
                        $kind,
                        value,
                        concat!("must contain only ", $charset),
                    ));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the code as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = CodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = CodeError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(code: $name) -> String {
                code.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

fn is_swift_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit()
}

fn is_country_char(c: char) -> bool {
    c.is_ascii_uppercase()
}

define_code!(SwiftCode, CodeKind::Swift, 11, is_swift_char, "A-Z and 0-9");
define_code!(CountryCode, CodeKind::Country, 2, is_country_char, "A-Z");

impl SwiftCode {
    /// The trailing three-character branch locator
    pub fn locator(&self) -> &str {
        &self.0[8..]
    }

    /// The eight-character institution prefix shared by a bank and its branches
    pub fn bank_prefix(&self) -> &str {
        &self.0[..8]
    }

    /// True when the locator is `XXX`
    pub fn is_headquarters(&self) -> bool {
        self.locator() == HEADQUARTERS_LOCATOR
    }

    /// The headquarters code this code belongs to.
    ///
    /// For a headquarters code this is the code itself.
    pub fn headquarters_code(&self) -> SwiftCode {
        SwiftCode(format!("{}{}", self.bank_prefix(), HEADQUARTERS_LOCATOR))
    }
}

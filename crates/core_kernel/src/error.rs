//! Core error types used across the system

use std::fmt;
use thiserror::Error;

/// Which kind of code failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    Swift,
    Country,
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeKind::Swift => write!(f, "SWIFT code"),
            CodeKind::Country => write!(f, "country ISO2 code"),
        }
    }
}

/// A value did not have the shape required for its code type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {kind}: '{value}' ({reason})")]
pub struct CodeError {
    pub kind: CodeKind,
    pub value: String,
    pub reason: String,
}

impl CodeError {
    pub fn new(kind: CodeKind, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn is_swift(&self) -> bool {
        self.kind == CodeKind::Swift
    }
}

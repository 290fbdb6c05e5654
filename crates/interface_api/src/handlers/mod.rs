//! Request handlers

pub mod health;
pub mod swift_codes;

//! Syntactic checks for contact fields.
//!
//! These are pure functions: no I/O, no store access. Callers decide what an
//! empty input means (usually "field not supplied") before calling in here.

use crate::error::{RolodexError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_PHONE_DIGITS: usize = 10;
pub const MAX_PHONE_DIGITS: usize = 15;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Strips everything but ASCII digits and checks the remaining length.
///
/// Returns the digit-only string, which is the form stored on disk.
pub fn validate_phone(raw: &str) -> Result<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len()) {
        Ok(digits)
    } else {
        Err(RolodexError::InvalidPhone(raw.to_string()))
    }
}

pub fn validate_email(raw: &str) -> bool {
    EMAIL_RE.is_match(raw)
}

/// Trims a contact name; names are keys, so an empty one is rejected.
pub fn normalize_name(raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(RolodexError::InvalidName);
    }
    Ok(name.to_string())
}

//! Bangladeshi phone number normalization and validation.
//!
//! All storage and lookup happens on the canonical `+8801XXXXXXXXX` form;
//! normalization accepts the spellings residents actually type.

use once_cell::sync::Lazy;
use regex::Regex;

/// Canonical Bangladeshi mobile number: +880 followed by 1[3-9] and 8 digits
static BD_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+8801[3-9]\d{8}$").unwrap()
});

/// Bare 10-digit local form: 1[3-9] and 8 digits
static BD_LOCAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^1[3-9]\d{8}$").unwrap()
});

/// Normalizes a phone number towards the canonical `+8801XXXXXXXXX` form
///
/// Strips every non-digit character first (spaces, dashes, a leading `+`),
/// then reattaches the country prefix:
/// - `8801XXXXXXXXX` becomes `+8801XXXXXXXXX`
/// - `01XXXXXXXXX` becomes `+8801XXXXXXXXX`
/// - a bare `1[3-9]XXXXXXXX` becomes `+8801[3-9]XXXXXXXX`
///
/// The result is not guaranteed valid; callers validate separately. An input
/// matching no recognizable spelling comes back unchanged, so the error can
/// echo exactly what the resident typed.
pub fn normalize_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if let Some(rest) = digits.strip_prefix("88") {
        format!("+88{}", rest)
    } else if let Some(rest) = digits.strip_prefix("01") {
        format!("+8801{}", rest)
    } else if BD_LOCAL_REGEX.is_match(&digits) {
        format!("+880{}", digits)
    } else {
        phone.to_string()
    }
}

/// Checks whether a phone number is a valid canonical Bangladeshi mobile number
pub fn is_valid_phone(phone: &str) -> bool {
    BD_PHONE_REGEX.is_match(phone)
}

/// Masks a phone number for logging, keeping the prefix and last two digits
pub fn mask_phone(phone: &str) -> String {
    if phone.len() > 8 {
        format!("{}****{}", &phone[..6], &phone[phone.len() - 2..])
    } else {
        "****".to_string()
    }
}

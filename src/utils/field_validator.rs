//! Predicates over user-entered credential fields.
//!
//! The same checks run in the terminal client, before anything is sent, and in
//! [`crate::api::middleware::validate`], which has the final word.

use validator::ValidateEmail;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Returns `true` when the value contains nothing but whitespace.
///
/// # Examples
///
/// ```ignore
/// assert!(is_blank(""));
/// assert!(is_blank("   \t"));
/// assert!(!is_blank(" a "));
/// ```
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Returns `true` when the value is a well-formed email address.
///
/// Uses the HTML5-style grammar of the `validator` crate: a non-empty local
/// part, an `@`, and a domain with valid labels. On top of that the domain
/// must end in a real top-level domain, so `john@localhost` and IP literals
/// are rejected. Surrounding whitespace is rejected rather than trimmed.
pub fn is_valid_email(value: &str) -> bool {
    if !value.validate_email() {
        return false;
    }

    value
        .rsplit_once('@')
        .is_some_and(|(_, domain)| has_top_level_domain(domain))
}

/// `true` when the last label is alphabetic and at least two characters long,
/// or a punycode label.
fn has_top_level_domain(domain: &str) -> bool {
    let Some((_, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    if tld.starts_with("xn--") {
        return tld.len() > 4;
    }

    tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic)
}

/// Returns `true` when both values are identical.
pub fn matches(a: &str, b: &str) -> bool {
    a == b
}

/// Returns `true` when the value is at least `min` characters long.
///
/// Counts Unicode scalar values, not bytes.
pub fn has_min_length(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

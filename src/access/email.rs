use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("e-mail pattern is valid"));

/// Trim and lowercase, the form e-mails are stored in.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Basic shape check: something@something.something, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

//! Detection of login and unauthorised shell pages
//!
//! Measuring a login redirect instead of the real page would silently skew
//! every summary, so samplers check each loaded page with [`looks_like_login`].

use lazy_static::lazy_static;
use regex::Regex;

/// Only this many characters of body text are inspected.
pub const BODY_SNIFF_CHARS: usize = 1000;

lazy_static! {
    static ref LOGIN_URL_PATTERN: Regex = Regex::new(r"(?i)/s/login").unwrap();

    static ref LOGIN_BODY_PATTERN: Regex =
        Regex::new(r"(?i)sign in|log in|enter your email|verify").unwrap();
}

/// Whether a page at `url` with visible text `body_text` is a login page.
pub fn looks_like_login(url: &str, body_text: &str) -> bool {
    let head: String = body_text.chars().take(BODY_SNIFF_CHARS).collect();
    LOGIN_URL_PATTERN.is_match(url) || LOGIN_BODY_PATTERN.is_match(&head)
}

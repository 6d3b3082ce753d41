//! Path and query parameter validation.
//!
//! Invalid optional parameters fall back to their defaults; only the
//! username itself can fail a request.

use serde::Deserialize;

/// Raw query parameters shared by the card endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct CardQuery {
    pub theme: Option<String>,
    pub accent: Option<String>,
    pub bg: Option<String>,
    pub border: Option<String>,
    pub details: Option<String>,
    pub format: Option<String>,
    #[serde(rename = "includeRepos")]
    pub include_repos: Option<String>,
    #[serde(rename = "includeDebug")]
    pub include_debug: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Details {
    Low,
    High,
}

const MAX_USERNAME_LEN: usize = 39;

/// GitHub usernames: 1-39 chars, ASCII alphanumerics and hyphens.
pub fn validate_username(raw: &str) -> Option<&str> {
    let valid = !raw.is_empty()
        && raw.len() <= MAX_USERNAME_LEN
        && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    valid.then_some(raw)
}

/// `auto` renders as light: README backgrounds vary and light degrades
/// better on unknown ones.
pub fn resolve_theme(raw: Option<&str>) -> Theme {
    match raw {
        Some("dark") => Theme::Dark,
        _ => Theme::Light,
    }
}

/// Six hex digits, no leading `#`.
fn is_hex_color(raw: &str) -> bool {
    raw.len() == 6 && raw.chars().all(|c| c.is_ascii_hexdigit())
}

pub fn resolve_color(raw: Option<&str>, fallback: &str) -> String {
    match raw {
        Some(v) if is_hex_color(v) => format!("#{}", v),
        _ => fallback.to_string(),
    }
}

pub fn resolve_border(raw: Option<&str>) -> bool {
    raw != Some("false")
}

pub fn resolve_details(raw: Option<&str>) -> Details {
    match raw {
        Some("high") => Details::High,
        _ => Details::Low,
    }
}

pub fn resolve_flag(raw: Option<&str>) -> bool {
    matches!(raw, Some("true") | Some("1"))
}

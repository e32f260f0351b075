//! String format detection.
//!
//! Recognizes the common JSON Schema `format` values (date, date-time,
//! time, email, uuid, uri, ipv4, ipv6) with cheap byte checks in front of
//! the precompiled regexes, so the hot path rarely pays for a full match.

use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DATETIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(.\d+)?(Z|[+-]\d{2}:\d{2})?$").unwrap()
});

static ISO_DATE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

static ISO_TIME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}:\d{2}:\d{2}(.\d+)?$").unwrap());

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap()
});

static IPV4_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$").unwrap());

static IPV6_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(([0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}|([0-9a-fA-F]{1,4}:){1,7}:|([0-9a-fA-F]{1,4}:){1,6}:[0-9a-fA-F]{1,4})$").unwrap()
});

/// Detect if a string matches a known format.
pub fn detect_format(value: &str) -> Option<&'static str> {
    let len = value.len();
    if len == 0 {
        return None;
    }
    let bytes = value.as_bytes();

    if len > 6
        && (value.starts_with("http://")
            || value.starts_with("https://")
            || value.starts_with("ftp://")
            || value.starts_with("file://"))
    {
        return Some("uri");
    }

    if len == 10 && bytes[4] == b'-' && bytes[7] == b'-' && ISO_DATE_REGEX.is_match(value) {
        return Some("date");
    }

    if len > 5 && len < 255 && value.contains('@') && EMAIL_REGEX.is_match(value) {
        return Some("email");
    }

    if len == 36 && bytes[8] == b'-' && UUID_REGEX.is_match(&value.to_lowercase()) {
        return Some("uuid");
    }

    if len >= 19 && bytes[10] == b'T' && ISO_DATETIME_REGEX.is_match(value) {
        return Some("date-time");
    }

    if len >= 8 && value.contains(':') && ISO_TIME_REGEX.is_match(value) {
        return Some("time");
    }

    if len < 16 && value.contains('.') && is_ipv4(value) {
        return Some("ipv4");
    }

    if value.contains(':') && IPV6_REGEX.is_match(value) {
        return Some("ipv6");
    }

    None
}

fn is_ipv4(s: &str) -> bool {
    IPV4_REGEX.is_match(s) && s.split('.').all(|part| part.parse::<u8>().is_ok())
}

/// What the node knows about the format of the strings seen so far.
///
/// `Uniform` survives only while every observation agrees; once any string
/// without that format (or a fragment without a `format` keyword) arrives,
/// the state degrades to `Mixed` and stays there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatState {
    Unset,
    Uniform(String),
    Mixed,
}

impl FormatState {
    pub fn observe(&mut self, format: Option<&str>) {
        *self = match (std::mem::replace(self, FormatState::Mixed), format) {
            (FormatState::Unset, Some(f)) => FormatState::Uniform(f.to_string()),
            (FormatState::Uniform(current), Some(f)) if current == f => {
                FormatState::Uniform(current)
            }
            _ => FormatState::Mixed,
        };
    }

    pub fn as_uniform(&self) -> Option<&str> {
        match self {
            FormatState::Uniform(f) => Some(f),
            _ => None,
        }
    }
}

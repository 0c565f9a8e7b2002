//! Structured text formats: identifiers, encodings, timestamps, coordinates.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime};
use regex::Regex;
use uuid::{Uuid, Variant};

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("valid regex")
});
static BASE64_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=|[A-Za-z0-9+/]{4})$")
        .expect("valid regex")
});
static DATA_URI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:[^/;,]+/[^;,]+;base64,(.*)$").expect("valid regex")
});
static LATITUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(?:[1-8]?\d(?:\.\d+)?|90(?:\.0+)?)$").expect("valid regex")
});
static LONGITUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(?:180(?:\.0+)?|(?:1[0-7]\d|[1-9]?\d)(?:\.\d+)?)$").expect("valid regex")
});
static SSN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}[- ]?\d{2}[- ]?\d{4}$").expect("valid regex"));
static SEMVER_RE: LazyLock<Regex> = LazyLock::new(|| {
    let ident = r"(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*)";
    Regex::new(&format!(
        r"^v?(?:0|[1-9]\d*)\.(?:0|[1-9]\d*)\.(?:0|[1-9]\d*)(?:-{ident}(?:\.{ident})*)?(?:\+[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*)?$"
    ))
    .expect("valid regex")
});

/// Hyphenated UUID of any version.
pub fn is_uuid(s: &str) -> bool {
    UUID_RE.is_match(s)
}

fn is_uuid_version(s: &str, version: usize) -> bool {
    if !is_uuid(s) {
        return false;
    }
    match Uuid::parse_str(s) {
        Ok(id) => id.get_version_num() == version && id.get_variant() == Variant::RFC4122,
        Err(_) => false,
    }
}

pub fn is_uuid_v3(s: &str) -> bool {
    is_uuid_version(s, 3)
}

pub fn is_uuid_v4(s: &str) -> bool {
    is_uuid_version(s, 4)
}

pub fn is_uuid_v5(s: &str) -> bool {
    is_uuid_version(s, 5)
}

/// 13 to 19 digits (spaces and dashes ignored) passing the Luhn checksum.
pub fn is_credit_card(s: &str) -> bool {
    let digits: Vec<u32> = s
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .map(|c| c.to_digit(10))
        .collect::<Option<_>>()
        .unwrap_or_default();
    if !(13..=19).contains(&digits.len()) {
        return false;
    }
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                *d
            }
        })
        .sum();
    sum % 10 == 0
}

fn isbn_chars(s: &str) -> Vec<char> {
    s.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

/// ISBN-10 with a valid check digit (`X` allowed in the last position).
pub fn is_isbn10(s: &str) -> bool {
    let chars = isbn_chars(s);
    if chars.len() != 10 {
        return false;
    }
    let mut sum = 0;
    for (i, c) in chars.iter().enumerate() {
        let value = match (i, c) {
            (9, 'X') | (9, 'x') => 10,
            (_, c) => match c.to_digit(10) {
                Some(d) => d,
                None => return false,
            },
        };
        sum += value * (10 - i as u32);
    }
    sum % 11 == 0
}

/// ISBN-13 with a valid check digit.
pub fn is_isbn13(s: &str) -> bool {
    let chars = isbn_chars(s);
    if chars.len() != 13 {
        return false;
    }
    let Some(digits) = chars.iter().map(|c| c.to_digit(10)).collect::<Option<Vec<_>>>() else {
        return false;
    };
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
        .sum();
    sum % 10 == 0
}

/// Any well-formed JSON document.
pub fn is_json(s: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(s).is_ok()
}

pub fn is_base64(s: &str) -> bool {
    BASE64_RE.is_match(s)
}

/// `data:<type>/<subtype>;base64,<payload>` with a base64 payload.
pub fn is_data_uri(s: &str) -> bool {
    DATA_URI_RE
        .captures(s)
        .and_then(|caps| caps.get(1))
        .is_some_and(|payload| is_base64(payload.as_str()))
}

pub fn is_latitude(s: &str) -> bool {
    LATITUDE_RE.is_match(s)
}

pub fn is_longitude(s: &str) -> bool {
    LONGITUDE_RE.is_match(s)
}

/// US social security number, optionally separated by dashes or spaces.
pub fn is_ssn(s: &str) -> bool {
    (s.len() == 9 || s.len() == 11) && SSN_RE.is_match(s)
}

/// Semantic version 2.0.0, optionally prefixed with `v`.
pub fn is_semver(s: &str) -> bool {
    SEMVER_RE.is_match(s)
}

pub fn is_rfc3339(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
}

/// RFC 3339 timestamp without the zone offset.
pub fn is_rfc3339_without_zone(s: &str) -> bool {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
}

//! Character-class predicates.
//!
//! An empty string passes every check here except [`is_null`]'s inverse; the
//! engine never hands these an empty value, but callers using them directly
//! get the same permissive behaviour.

use std::sync::LazyLock;

use regex::Regex;

static ALPHA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]+$").expect("valid regex"));
static ALPHANUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("valid regex"));
static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));
static UTF_NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?\p{N}+$").expect("valid regex"));
static UTF_DIGIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?\p{Nd}+$").expect("valid regex"));
static HEXADECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]+$").expect("valid regex"));
static HEXCOLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid regex")
});
static RGBCOLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    let channel = r"\s*(0|[1-9]\d?|1\d\d|2[0-4]\d|25[0-5])\s*";
    Regex::new(&format!(r"^rgb\({channel},{channel},{channel}\)$")).expect("valid regex")
});
static INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?(?:0|[1-9][0-9]*)$").expect("valid regex"));
static FLOAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(?:[0-9]+)?(?:\.[0-9]*)?(?:[eE][-+]?[0-9]+)?$").expect("valid regex")
});
static FULL_WIDTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\x{0020}-\x{007E}\x{FF61}-\x{FF9F}\x{FFA0}-\x{FFDC}\x{FFE8}-\x{FFEE}0-9a-zA-Z]")
        .expect("valid regex")
});
static HALF_WIDTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x{0020}-\x{007E}\x{FF61}-\x{FF9F}\x{FFA0}-\x{FFDC}\x{FFE8}-\x{FFEE}0-9a-zA-Z]")
        .expect("valid regex")
});

/// ASCII letters only.
pub fn is_alpha(s: &str) -> bool {
    s.is_empty() || ALPHA_RE.is_match(s)
}

/// Unicode letters only.
pub fn is_utf_letter(s: &str) -> bool {
    s.chars().all(char::is_alphabetic)
}

/// ASCII letters and digits only.
pub fn is_alphanumeric(s: &str) -> bool {
    s.is_empty() || ALPHANUMERIC_RE.is_match(s)
}

/// Unicode letters and numbers only.
pub fn is_utf_letter_numeric(s: &str) -> bool {
    s.chars().all(char::is_alphanumeric)
}

/// ASCII digits only (no sign, no decimal point).
pub fn is_numeric(s: &str) -> bool {
    s.is_empty() || NUMERIC_RE.is_match(s)
}

/// Unicode numbers with an optional leading sign.
pub fn is_utf_numeric(s: &str) -> bool {
    s.is_empty() || UTF_NUMERIC_RE.is_match(s)
}

/// Unicode decimal digits with an optional leading sign.
pub fn is_utf_digit(s: &str) -> bool {
    s.is_empty() || UTF_DIGIT_RE.is_match(s)
}

pub fn is_hexadecimal(s: &str) -> bool {
    HEXADECIMAL_RE.is_match(s)
}

/// `#fff`, `fff`, `#ffffff` or `ffffff`.
pub fn is_hexcolor(s: &str) -> bool {
    HEXCOLOR_RE.is_match(s)
}

/// `rgb(r, g, b)` with each channel in `0..=255`.
pub fn is_rgbcolor(s: &str) -> bool {
    RGBCOLOR_RE.is_match(s)
}

pub fn is_lowercase(s: &str) -> bool {
    s == s.to_lowercase()
}

pub fn is_uppercase(s: &str) -> bool {
    s == s.to_uppercase()
}

/// Integer literal without leading zeros.
pub fn is_int(s: &str) -> bool {
    s.is_empty() || INT_RE.is_match(s)
}

/// Decimal literal with optional exponent.
pub fn is_float(s: &str) -> bool {
    !s.is_empty() && s != "." && FLOAT_RE.is_match(s)
}

pub fn is_null(s: &str) -> bool {
    s.is_empty()
}

/// Contains at least one non-ASCII character.
pub fn is_multibyte(s: &str) -> bool {
    s.is_empty() || !s.is_ascii()
}

pub fn is_ascii(s: &str) -> bool {
    s.is_ascii()
}

/// ASCII without control characters.
pub fn is_printable_ascii(s: &str) -> bool {
    s.chars().all(|c| (' '..='~').contains(&c))
}

/// Contains at least one full-width character.
pub fn is_full_width(s: &str) -> bool {
    s.is_empty() || FULL_WIDTH_RE.is_match(s)
}

/// Contains at least one half-width character.
pub fn is_half_width(s: &str) -> bool {
    s.is_empty() || HALF_WIDTH_RE.is_match(s)
}

/// Mixes full-width and half-width characters.
pub fn is_variable_width(s: &str) -> bool {
    s.is_empty() || (FULL_WIDTH_RE.is_match(s) && HALF_WIDTH_RE.is_match(s))
}

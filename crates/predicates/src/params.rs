//! Predicates that take literal bounds or option lists.
//!
//! Parameter parsing belongs to the caller; these only compare.

use regex::Regex;

/// Length in bytes within `[min, max]`.
pub fn byte_length(s: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&s.len())
}

/// Length in Unicode scalar values within `[min, max]`.
pub fn rune_length(s: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&s.chars().count())
}

/// Numeric value within `[min, max]`. Non-numeric input fails.
pub fn in_range(s: &str, min: f64, max: f64) -> bool {
    match s.trim().parse::<f64>() {
        Ok(value) => !value.is_nan() && min <= value && value <= max,
        Err(_) => false,
    }
}

/// Exact membership in `options`.
pub fn is_in<S: AsRef<str>>(s: &str, options: &[S]) -> bool {
    options.iter().any(|option| option.as_ref() == s)
}

/// Unanchored regular-expression match, the same as `Regex::is_match`.
pub fn string_matches(s: &str, pattern: &Regex) -> bool {
    pattern.is_match(s)
}

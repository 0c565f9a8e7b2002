//! Rule declaration parser.
//!
//! A declaration is a comma-separated list of rule tokens:
//!
//! ```text
//! required,length(2|40)~name must be 2-40 bytes,in(admin,editor),email
//! ```
//!
//! Commas inside a parenthesized parameter list do not separate tokens, a
//! `~` at depth zero starts a custom message, and a backslash escapes the
//! next character from both. Parameter separators are left to each rule:
//! the registry re-extracts them from [`RuleInvocation::raw`].

use crate::error::ParseError;

/// Declaration that excludes the field from validation entirely.
pub const SKIP_MARKER: &str = "-";
/// Marker making an absent or zero value a failure.
pub const REQUIRED_MARKER: &str = "required";
/// Marker making an absent or zero value acceptable.
pub const OPTIONAL_MARKER: &str = "optional";
/// Separator between a rule and its custom failure message.
pub const MESSAGE_SEPARATOR: char = '~';

const ESCAPE: char = '\\';

/// One parsed rule occurrence on a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInvocation {
    pub name: String,
    /// Rule text without the custom message, e.g. `length(2|40)`.
    pub raw: String,
    /// Comma-split parameters with escapes removed; empty without a
    /// parameter list.
    pub params: Vec<String>,
    pub custom_message: Option<String>,
    /// Zero-based token position within the declaration.
    pub order: usize,
}

impl RuleInvocation {
    pub fn has_parameter_list(&self) -> bool {
        self.raw.len() > self.name.len()
    }
}

/// Presence policy declared by the `required` / `optional` markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presence {
    #[default]
    Unspecified,
    Required,
    Optional,
}

/// Ordered rules for one field. Built fresh from the declaration on every
/// validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub rules: Vec<RuleInvocation>,
    pub presence: Presence,
    /// Custom message attached to the presence marker.
    pub presence_message: Option<String>,
    pub skip: bool,
}

impl RuleSet {
    /// Parse a raw declaration.
    pub fn parse(declaration: &str) -> Result<Self, ParseError> {
        let declaration = declaration.trim();
        let mut set = RuleSet::default();
        if declaration.is_empty() {
            return Ok(set);
        }

        let tokens = split_top_level(declaration, ',').ok_or_else(|| {
            ParseError::UnbalancedParentheses {
                declaration: declaration.to_string(),
            }
        })?;

        let token_count = tokens.len();
        for (order, token) in tokens.into_iter().enumerate() {
            let token = token.trim();
            if token.is_empty() {
                return Err(ParseError::EmptyRule {
                    declaration: declaration.to_string(),
                    position: order,
                });
            }

            let (rule_text, custom_message) = split_message(token);
            let rule_text = rule_text.trim();
            if rule_text == SKIP_MARKER {
                if token_count > 1 {
                    return Err(ParseError::SkipWithRules {
                        declaration: declaration.to_string(),
                    });
                }
                return Ok(RuleSet {
                    skip: true,
                    ..RuleSet::default()
                });
            }

            let invocation = parse_rule(rule_text, custom_message, order)?;
            let presence = if invocation.name == REQUIRED_MARKER {
                Presence::Required
            } else if invocation.name == OPTIONAL_MARKER {
                Presence::Optional
            } else {
                set.rules.push(invocation);
                continue;
            };
            if invocation.has_parameter_list() {
                return Err(ParseError::MarkerWithParameters {
                    name: invocation.name,
                });
            }
            set.presence = presence;
            set.presence_message = invocation.custom_message;
        }

        Ok(set)
    }

    /// No rules and no presence marker.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.presence == Presence::Unspecified
    }

    /// Whether an absent or zero value fails, given the default policy.
    pub fn is_required(&self, required_by_default: bool) -> bool {
        match self.presence {
            Presence::Required => true,
            Presence::Optional => false,
            Presence::Unspecified => required_by_default,
        }
    }
}

fn parse_rule(
    text: &str,
    custom_message: Option<String>,
    order: usize,
) -> Result<RuleInvocation, ParseError> {
    let name_len = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(text.len());
    let (name, rest) = text.split_at(name_len);
    if name.is_empty() {
        return Err(ParseError::InvalidName {
            token: text.to_string(),
        });
    }

    let params = if rest.is_empty() {
        Vec::new()
    } else {
        let inner = parameter_list(rest).ok_or_else(|| {
            if rest.starts_with('(') {
                ParseError::TrailingText {
                    token: text.to_string(),
                }
            } else {
                ParseError::InvalidName {
                    token: text.to_string(),
                }
            }
        })?;
        split_parameters(inner)
    };

    Ok(RuleInvocation {
        name: name.to_string(),
        raw: text.to_string(),
        params,
        custom_message,
        order,
    })
}

/// Text between a leading `(` and the `)` that closes it, which must be the
/// last character.
fn parameter_list(rest: &str) -> Option<&str> {
    if !rest.starts_with('(') {
        return None;
    }
    let mut depth = 0usize;
    let mut escaped = false;
    for (i, c) in rest.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            ESCAPE => escaped = true,
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return (i == rest.len() - 1).then(|| &rest[1..i]);
                }
            }
            _ => {}
        }
    }
    None
}

fn split_parameters(inner: &str) -> Vec<String> {
    if inner.is_empty() {
        return Vec::new();
    }
    split_top_level(inner, ',')
        .unwrap_or_else(|| vec![inner])
        .into_iter()
        .map(unescape)
        .collect()
}

/// Split off a custom message at the first unescaped `~` outside
/// parentheses.
fn split_message(token: &str) -> (&str, Option<String>) {
    match find_top_level(token, MESSAGE_SEPARATOR) {
        Some(i) => (
            &token[..i],
            Some(unescape(&token[i + MESSAGE_SEPARATOR.len_utf8()..])),
        ),
        None => (token, None),
    }
}

fn find_top_level(s: &str, needle: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            ESCAPE => escaped = true,
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == needle && depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// Split on `separator` at parenthesis depth zero. `None` when the
/// parentheses are unbalanced.
fn split_top_level(s: &str, separator: char) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut escaped = false;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            ESCAPE => escaped = true,
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            c if c == separator && depth == 0 => {
                parts.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    parts.push(&s[start..]);
    Some(parts)
}

/// Drop the backslash in front of the characters the tokenizer treats as
/// structural; any other backslash is kept for the rule to interpret.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ESCAPE {
            if let Some(&next) = chars.peek() {
                if matches!(next, ',' | '(' | ')' | '~' | '\\') {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

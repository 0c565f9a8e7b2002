use serde::Serialize;

/// A rule declaration that cannot be tokenized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseError {
    #[error("Unbalanced parentheses in rule declaration {declaration:?}")]
    UnbalancedParentheses { declaration: String },

    #[error("Empty rule in declaration {declaration:?} at position {position}")]
    EmptyRule { declaration: String, position: usize },

    #[error("Invalid rule name {token:?}")]
    InvalidName { token: String },

    #[error("Unexpected text after parameter list in {token:?}")]
    TrailingText { token: String },

    #[error("Marker {name:?} does not take parameters")]
    MarkerWithParameters { name: String },

    #[error("Skip marker must be the whole declaration, got {declaration:?}")]
    SkipWithRules { declaration: String },
}

/// A mistake in the rule declarations themselves, as opposed to bad data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("The following validator is invalid or can't be applied to the field: {name:?}")]
    UnknownRule { name: String },

    #[error("Malformed parameters for rule {name:?}: {raw:?}")]
    MalformedParameters { name: String, raw: String },

    #[error("Invalid parameter for rule {name:?}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Rule {name:?} cannot be applied to a {kind} value")]
    InapplicableRule {
        name: String,
        #[serde(rename = "value_kind")]
        kind: &'static str,
    },

    #[error("Unsupported type: {type_name}")]
    UnsupportedType { type_name: &'static str },

    #[error("Cyclic reference to {type_name}")]
    CyclicReference { type_name: &'static str },

    #[error("{source}")]
    Parse {
        #[from]
        source: ParseError,
    },
}

impl ConfigError {
    /// Whether this is the no-strategy-at-all case rather than a rule mismatch.
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self, Self::UnsupportedType { .. })
    }
}

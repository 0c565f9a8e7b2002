//! Rule name resolution.
//!
//! Two fixed tables (simple and parameterized built-ins) live in process-wide
//! immutable statics. The only mutable part is the per-[`Registry`] custom
//! table, stored copy-on-write behind a `RwLock` so a validation run reads a
//! consistent snapshot while registrations proceed.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use regex::Regex;
use tagcheck_predicates::{formats, iso, network, params, strings};

use crate::context::ValidationContext;
use crate::error::ConfigError;
use crate::tags::RuleInvocation;
use crate::types::{FieldValue, Validate};

/// Zero-argument predicate over a field's text.
pub type SimpleFn = fn(&str) -> bool;

/// Turns the literal parameters extracted from a rule into a ready check.
/// `Err` means the parameters themselves are unusable.
pub type PrepareFn = fn(&[String]) -> Result<ParamCheck, String>;

/// User-supplied validator with access to the context and the root value.
///
/// Returning `Ok(false)` records the generic (or custom) failure message;
/// returning `Err` records the error's text verbatim.
pub trait CustomValidator: Send + Sync {
    fn validate(
        &self,
        ctx: &ValidationContext,
        field: &FieldValue<'_>,
        root: &dyn Validate,
    ) -> anyhow::Result<bool>;
}

impl<F> CustomValidator for F
where
    F: Fn(&ValidationContext, &FieldValue<'_>, &dyn Validate) -> anyhow::Result<bool>
        + Send
        + Sync,
{
    fn validate(
        &self,
        ctx: &ValidationContext,
        field: &FieldValue<'_>,
        root: &dyn Validate,
    ) -> anyhow::Result<bool> {
        self(ctx, field, root)
    }
}

/// How a parameterized rule's literal parameters are read from its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSyntax {
    /// Regex capture groups, e.g. `length(<min>|<max>)`.
    Captures,
    /// Comma-separated list with `\,` escapes, e.g. `in(a,b,c)`.
    CommaList,
}

/// A parameterized built-in: predicate plus the pattern its rule text must
/// match.
pub struct ParamRule {
    pub prepare: PrepareFn,
    pub pattern: Regex,
    pub syntax: ParamSyntax,
}

impl ParamRule {
    fn new(prepare: PrepareFn, pattern: &str, syntax: ParamSyntax) -> Self {
        Self {
            prepare,
            pattern: Regex::new(pattern).expect("valid regex"),
            syntax,
        }
    }

    /// Extract parameters from a rule occurrence, or `None` if the rule text
    /// does not match this rule's pattern.
    pub fn extract(&self, invocation: &RuleInvocation) -> Option<Vec<String>> {
        let captures = self.pattern.captures(&invocation.raw)?;
        Some(match self.syntax {
            ParamSyntax::Captures => captures
                .iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str().to_string())
                .collect(),
            ParamSyntax::CommaList => invocation.params.clone(),
        })
    }
}

impl fmt::Debug for ParamRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamRule")
            .field("pattern", &self.pattern.as_str())
            .field("syntax", &self.syntax)
            .finish()
    }
}

static SIMPLE_RULES: LazyLock<HashMap<&'static str, SimpleFn>> = LazyLock::new(|| {
    let table: &[(&'static str, SimpleFn)] = &[
        ("email", network::is_email),
        ("url", network::is_url),
        ("dialstring", network::is_dial_string),
        ("requrl", network::is_request_url),
        ("requri", network::is_request_uri),
        ("alpha", strings::is_alpha),
        ("utfletter", strings::is_utf_letter),
        ("alphanum", strings::is_alphanumeric),
        ("utfletternum", strings::is_utf_letter_numeric),
        ("numeric", strings::is_numeric),
        ("utfnumeric", strings::is_utf_numeric),
        ("utfdigit", strings::is_utf_digit),
        ("hexadecimal", strings::is_hexadecimal),
        ("hexcolor", strings::is_hexcolor),
        ("rgbcolor", strings::is_rgbcolor),
        ("lowercase", strings::is_lowercase),
        ("uppercase", strings::is_uppercase),
        ("int", strings::is_int),
        ("float", strings::is_float),
        ("null", strings::is_null),
        ("uuid", formats::is_uuid),
        ("uuidv3", formats::is_uuid_v3),
        ("uuidv4", formats::is_uuid_v4),
        ("uuidv5", formats::is_uuid_v5),
        ("creditcard", formats::is_credit_card),
        ("isbn10", formats::is_isbn10),
        ("isbn13", formats::is_isbn13),
        ("json", formats::is_json),
        ("multibyte", strings::is_multibyte),
        ("ascii", strings::is_ascii),
        ("printableascii", strings::is_printable_ascii),
        ("fullwidth", strings::is_full_width),
        ("halfwidth", strings::is_half_width),
        ("variablewidth", strings::is_variable_width),
        ("base64", formats::is_base64),
        ("datauri", formats::is_data_uri),
        ("ip", network::is_ip),
        ("port", network::is_port),
        ("ipv4", network::is_ipv4),
        ("ipv6", network::is_ipv6),
        ("dns", network::is_dns_name),
        ("host", network::is_host),
        ("mac", network::is_mac),
        ("latitude", formats::is_latitude),
        ("longitude", formats::is_longitude),
        ("ssn", formats::is_ssn),
        ("semver", formats::is_semver),
        ("rfc3339", formats::is_rfc3339),
        ("rfc3339WithoutZone", formats::is_rfc3339_without_zone),
        ("ISO3166Alpha2", iso::is_iso3166_alpha2),
        ("ISO3166Alpha3", iso::is_iso3166_alpha3),
        ("ISO4217", iso::is_iso4217),
    ];
    table.iter().copied().collect()
});

static PARAM_RULES: LazyLock<HashMap<&'static str, ParamRule>> = LazyLock::new(|| {
    use ParamSyntax::{Captures, CommaList};
    HashMap::from([
        (
            "length",
            ParamRule::new(prepare_byte_length, r"^length\((\d+)\|(\d+)\)$", Captures),
        ),
        (
            "runelength",
            ParamRule::new(prepare_rune_length, r"^runelength\((\d+)\|(\d+)\)$", Captures),
        ),
        (
            "stringlength",
            ParamRule::new(prepare_rune_length, r"^stringlength\((\d+)\|(\d+)\)$", Captures),
        ),
        (
            "range",
            ParamRule::new(
                prepare_range,
                r"^range\((-?\d+(?:\.\d+)?)\|(-?\d+(?:\.\d+)?)\)$",
                Captures,
            ),
        ),
        ("in", ParamRule::new(prepare_in, r"^in\((.*)\)$", CommaList)),
        (
            "matches",
            ParamRule::new(prepare_matches, r"^matches\((.+)\)$", Captures),
        ),
    ])
});

/// A parameterized built-in with its parameters parsed, ready to run
/// against any number of values.
#[derive(Debug, Clone)]
pub enum ParamCheck {
    ByteLength { min: usize, max: usize },
    RuneLength { min: usize, max: usize },
    Range { min: f64, max: f64 },
    In(Vec<String>),
    Matches(Regex),
}

impl ParamCheck {
    pub fn check(&self, value: &str) -> bool {
        match self {
            Self::ByteLength { min, max } => params::byte_length(value, *min, *max),
            Self::RuneLength { min, max } => params::rune_length(value, *min, *max),
            Self::Range { min, max } => params::in_range(value, *min, *max),
            Self::In(options) => params::is_in(value, options),
            Self::Matches(pattern) => params::string_matches(value, pattern),
        }
    }
}

fn bounds<T: std::str::FromStr>(args: &[String]) -> Result<(T, T), String> {
    let [min, max] = args else {
        return Err(format!("expected 2 parameters, got {}", args.len()));
    };
    let parse = |raw: &String| {
        raw.parse::<T>()
            .map_err(|_| format!("{raw:?} is not a valid bound"))
    };
    Ok((parse(min)?, parse(max)?))
}

fn prepare_byte_length(args: &[String]) -> Result<ParamCheck, String> {
    let (min, max) = bounds(args)?;
    Ok(ParamCheck::ByteLength { min, max })
}

fn prepare_rune_length(args: &[String]) -> Result<ParamCheck, String> {
    let (min, max) = bounds(args)?;
    Ok(ParamCheck::RuneLength { min, max })
}

fn prepare_range(args: &[String]) -> Result<ParamCheck, String> {
    let (min, max) = bounds(args)?;
    Ok(ParamCheck::Range { min, max })
}

fn prepare_in(args: &[String]) -> Result<ParamCheck, String> {
    Ok(ParamCheck::In(args.to_vec()))
}

fn prepare_matches(args: &[String]) -> Result<ParamCheck, String> {
    let [expr] = args else {
        return Err(format!("expected 1 parameter, got {}", args.len()));
    };
    Regex::new(expr)
        .map(ParamCheck::Matches)
        .map_err(|e| e.to_string())
}

type CustomMap = HashMap<String, Arc<dyn CustomValidator>>;

/// Resolved rule, selected once and invoked through [`Resolved::evaluate`].
#[derive(Clone)]
pub enum Resolved {
    Custom(Arc<dyn CustomValidator>),
    Simple(SimpleFn),
    Parameterized(ParamCheck),
}

/// Result of running one resolved rule against one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    /// Failed; carries the custom validator's own error text, if any.
    Fail(Option<String>),
}

impl Resolved {
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// Run the rule. Built-ins need a scalar value; anything else is a
    /// configuration error.
    pub fn evaluate(
        &self,
        invocation: &RuleInvocation,
        ctx: &ValidationContext,
        value: &FieldValue<'_>,
        root: &dyn Validate,
    ) -> Result<Verdict, ConfigError> {
        let passed = match self {
            Self::Custom(validator) => match validator.validate(ctx, value, root) {
                Ok(passed) => passed,
                Err(err) => return Ok(Verdict::Fail(Some(err.to_string()))),
            },
            Self::Simple(check) => check(&scalar_text(invocation, value)?),
            Self::Parameterized(check) => check.check(&scalar_text(invocation, value)?),
        };
        Ok(if passed { Verdict::Pass } else { Verdict::Fail(None) })
    }
}

fn scalar_text<'a>(
    invocation: &RuleInvocation,
    value: &FieldValue<'a>,
) -> Result<std::borrow::Cow<'a, str>, ConfigError> {
    value.text().ok_or_else(|| ConfigError::InapplicableRule {
        name: invocation.name.clone(),
        kind: value.kind(),
    })
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(_) => f.write_str("Custom(..)"),
            Self::Simple(_) => f.write_str("Simple(..)"),
            Self::Parameterized(check) => f.debug_tuple("Parameterized").field(check).finish(),
        }
    }
}

/// Built-in tables plus this instance's custom validators.
#[derive(Default)]
pub struct Registry {
    custom: RwLock<Arc<CustomMap>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `validator` under `name`, replacing any earlier entry.
    ///
    /// Returns `true` when an entry was replaced. In-flight validations keep
    /// the snapshot they started with.
    pub fn register_custom(&self, name: &str, validator: Arc<dyn CustomValidator>) -> bool {
        let mut guard = self.custom.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = CustomMap::clone(&guard);
        let replaced = next.insert(name.to_string(), validator).is_some();
        *guard = Arc::new(next);
        replaced
    }

    pub fn resolve_simple(name: &str) -> Option<SimpleFn> {
        SIMPLE_RULES.get(name).copied()
    }

    pub fn resolve_parameterized(name: &str) -> Option<&'static ParamRule> {
        PARAM_RULES.get(name)
    }

    pub fn resolve_custom(&self, name: &str) -> Option<Arc<dyn CustomValidator>> {
        self.snapshot().custom.get(name).cloned()
    }

    /// Consistent view of the custom table for one validation run.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let custom = self
            .custom
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        RegistrySnapshot { custom }
    }

    pub fn custom_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.snapshot().custom.keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("custom", &self.custom_names())
            .finish()
    }
}

/// Frozen custom table; built-ins are always current.
#[derive(Clone)]
pub struct RegistrySnapshot {
    custom: Arc<CustomMap>,
}

impl RegistrySnapshot {
    /// Resolve one rule occurrence. Custom validators shadow built-ins of
    /// the same name.
    pub fn resolve(&self, invocation: &RuleInvocation) -> Result<Resolved, ConfigError> {
        let name = invocation.name.as_str();
        let malformed = || ConfigError::MalformedParameters {
            name: invocation.name.clone(),
            raw: invocation.raw.clone(),
        };

        if let Some(validator) = self.custom.get(name) {
            if invocation.has_parameter_list() {
                return Err(malformed());
            }
            return Ok(Resolved::Custom(Arc::clone(validator)));
        }

        if let Some(rule) = Registry::resolve_parameterized(name) {
            let args = rule.extract(invocation).ok_or_else(malformed)?;
            let check = (rule.prepare)(&args).map_err(|reason| ConfigError::InvalidParameter {
                name: invocation.name.clone(),
                reason,
            })?;
            return Ok(Resolved::Parameterized(check));
        }

        if let Some(check) = Registry::resolve_simple(name) {
            if invocation.has_parameter_list() {
                return Err(malformed());
            }
            return Ok(Resolved::Simple(check));
        }

        Err(ConfigError::UnknownRule {
            name: invocation.name.clone(),
        })
    }
}

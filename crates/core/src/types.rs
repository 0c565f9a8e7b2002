//! Shape description for validated values.
//!
//! Types opt in by implementing [`Validate`], listing each field together
//! with its raw rule declaration and a borrowed [`FieldValue`] view.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;

/// A value whose fields can be walked by the engine.
///
/// ```
/// use tagcheck_core::types::{Field, FieldValue, Validate};
///
/// struct Account {
///     email: String,
///     age: u32,
/// }
///
/// impl Validate for Account {
///     fn fields(&self) -> Vec<Field<'_>> {
///         vec![
///             Field::new("Email", "required,email", FieldValue::from(&self.email)),
///             Field::new("Age", "range(18|130)", FieldValue::from(self.age)),
///         ]
///     }
/// }
/// ```
pub trait Validate: Any {
    /// Fields in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl dyn Validate {
    /// Downcast to the concrete type, e.g. inside a custom validator.
    pub fn downcast_ref<T: Validate>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }

    pub fn is<T: Validate>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}

/// One field of a record: its name, raw rule declaration and current value.
pub struct Field<'a> {
    pub name: &'static str,
    pub rules: &'static str,
    pub value: FieldValue<'a>,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, rules: &'static str, value: FieldValue<'a>) -> Self {
        Self { name, rules, value }
    }
}

/// Borrowed view of a field value.
///
/// The set is closed: every shape the walker knows how to handle has a
/// variant, and anything else is reported through [`FieldValue::Unsupported`].
pub enum FieldValue<'a> {
    Str(&'a str),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    /// Pointer or optional: `None` is absent, `Some` is dereferenced.
    Optional(Option<Box<FieldValue<'a>>>),
    /// Nested record, walked with the same algorithm.
    Record(&'a dyn Validate),
    Seq(Vec<FieldValue<'a>>),
    /// Map entries, kept sorted by key.
    Map(Vec<(String, FieldValue<'a>)>),
    /// A value with no validation strategy (closures, handles, ...).
    Unsupported(&'static str),
}

impl<'a> FieldValue<'a> {
    pub fn record<T: Validate>(value: &'a T) -> Self {
        Self::Record(value)
    }

    pub fn optional(value: Option<FieldValue<'a>>) -> Self {
        Self::Optional(value.map(Box::new))
    }

    /// Optional nested record, the common `Option<Box<T>>` case.
    pub fn optional_record<T: Validate>(value: Option<&'a T>) -> Self {
        Self::optional(value.map(Self::record))
    }

    pub fn seq<I>(items: I) -> Self
    where
        I: IntoIterator<Item = FieldValue<'a>>,
    {
        Self::Seq(items.into_iter().collect())
    }

    /// Build a map view; entries are sorted by key so traversal never
    /// depends on the source container's iteration order.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: ToString,
        I: IntoIterator<Item = (K, FieldValue<'a>)>,
    {
        let mut entries: Vec<(String, FieldValue<'a>)> = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Self::Map(entries)
    }

    pub fn unsupported<T: ?Sized>() -> Self {
        Self::Unsupported(std::any::type_name::<T>())
    }

    /// Strip present optional layers.
    pub fn deref(&self) -> &FieldValue<'a> {
        let mut value = self;
        while let FieldValue::Optional(Some(inner)) = value {
            value = inner;
        }
        value
    }

    /// Zero value: empty text, `0`, `false`, absent, or an empty container.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Str(s) => s.is_empty(),
            Self::Int(n) => *n == 0,
            Self::UInt(n) => *n == 0,
            Self::Float(n) => *n == 0.0,
            Self::Bool(b) => !b,
            Self::Optional(None) => true,
            Self::Optional(Some(inner)) => inner.is_zero(),
            Self::Seq(items) => items.is_empty(),
            Self::Map(entries) => entries.is_empty(),
            Self::Record(_) | Self::Unsupported(_) => false,
        }
    }

    /// Textual form handed to built-in predicates; `None` for non-scalars.
    pub fn text(&self) -> Option<Cow<'a, str>> {
        match self {
            Self::Str(s) => Some(Cow::Borrowed(*s)),
            Self::Int(n) => Some(Cow::Owned(n.to_string())),
            Self::UInt(n) => Some(Cow::Owned(n.to_string())),
            Self::Float(n) => Some(Cow::Owned(n.to_string())),
            Self::Bool(b) => Some(Cow::Owned(b.to_string())),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&'a dyn Validate> {
        match self.deref() {
            Self::Record(record) => Some(*record),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Optional(None))
    }

    /// Short name of the shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::UInt(_) => "unsigned integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
            Self::Optional(_) => "optional",
            Self::Record(_) => "record",
            Self::Seq(_) => "sequence",
            Self::Map(_) => "map",
            Self::Unsupported(name) => *name,
        }
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "Str({s:?})"),
            Self::Int(n) => write!(f, "Int({n})"),
            Self::UInt(n) => write!(f, "UInt({n})"),
            Self::Float(n) => write!(f, "Float({n})"),
            Self::Bool(b) => write!(f, "Bool({b})"),
            Self::Optional(inner) => f.debug_tuple("Optional").field(inner).finish(),
            Self::Record(_) => f.write_str("Record(..)"),
            Self::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
            Self::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Self::Unsupported(name) => write!(f, "Unsupported({name})"),
        }
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(value)
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(value: &'a String) -> Self {
        Self::Str(value.as_str())
    }
}

impl From<bool> for FieldValue<'_> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! from_number {
    ($variant:ident: $target:ty => $($source:ty),+) => {
        $(
            impl From<$source> for FieldValue<'_> {
                fn from(value: $source) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

from_number!(Int: i64 => i8, i16, i32, i64);
from_number!(UInt: u64 => u8, u16, u32, u64);
from_number!(Float: f64 => f32, f64);

impl From<usize> for FieldValue<'_> {
    fn from(value: usize) -> Self {
        Self::UInt(value as u64)
    }
}

impl From<isize> for FieldValue<'_> {
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Leaf;

    impl Validate for Leaf {
        fn fields(&self) -> Vec<Field<'_>> {
            Vec::new()
        }
    }

    #[test]
    fn zero_values() {
        assert!(FieldValue::from("").is_zero());
        assert!(FieldValue::from(0u32).is_zero());
        assert!(FieldValue::from(false).is_zero());
        assert!(FieldValue::optional(None).is_zero());
        assert!(FieldValue::seq(Vec::new()).is_zero());
        assert!(!FieldValue::from("x").is_zero());
        assert!(!FieldValue::record(&Leaf).is_zero());
    }

    #[test]
    fn deref_strips_present_optionals() {
        let value = FieldValue::optional(Some(FieldValue::optional(Some(FieldValue::from(7i32)))));
        assert!(matches!(value.deref(), FieldValue::Int(7)));
        let absent = FieldValue::optional(None);
        assert!(absent.deref().is_absent());
    }

    #[test]
    fn map_entries_sorted_by_key() {
        let value = FieldValue::map([("b", FieldValue::from(2u8)), ("a", FieldValue::from(1u8))]);
        let FieldValue::Map(entries) = value else {
            panic!("expected map");
        };
        let keys: Vec<_> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn text_of_scalars() {
        assert_eq!(FieldValue::from(-3i64).text().as_deref(), Some("-3"));
        assert_eq!(FieldValue::from(true).text().as_deref(), Some("true"));
        assert_eq!(FieldValue::from(1.5f64).text().as_deref(), Some("1.5"));
        assert!(FieldValue::seq(Vec::new()).text().is_none());
    }

    #[test]
    fn downcast_record() {
        let leaf = Leaf;
        let value = FieldValue::record(&leaf);
        let record = value.as_record().expect("record");
        assert!(record.is::<Leaf>());
    }
}

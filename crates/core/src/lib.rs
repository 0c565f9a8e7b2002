//! Tag-driven validation engine.
//!
//! Fields carry rule declarations such as `required,length(2|40),email`.
//! A [`Validator`] parses them, resolves each rule against its registry of
//! built-in and custom rules, walks nested records, sequences and maps, and
//! returns every failure in one [`ValidationResult`].

pub mod context;
pub mod error;
pub mod options;
pub mod registry;
pub mod result;
pub mod tags;
pub mod types;
pub mod validator;
pub mod walker;

pub use context::ValidationContext;
pub use error::{ConfigError, ParseError};
pub use options::{ConfigErrorPolicy, ValidatorOptions};
pub use registry::CustomValidator;
pub use result::{FieldViolation, ValidationErrors, ValidationResult, ViolationKind};
pub use types::{Field, FieldValue, Validate};
pub use validator::Validator;

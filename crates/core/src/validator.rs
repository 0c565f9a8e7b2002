//! Public entry point.

use std::sync::Arc;

use crate::context::ValidationContext;
use crate::options::ValidatorOptions;
use crate::registry::{CustomValidator, Registry};
use crate::result::ValidationResult;
use crate::types::{FieldValue, Validate};
use crate::walker::Walker;

/// A validation engine instance: built-in rules, this instance's custom
/// rules and fixed options.
///
/// Shareable across threads; registering a custom rule while other threads
/// validate is safe and affects only runs that start afterwards.
#[derive(Debug, Default)]
pub struct Validator {
    registry: Registry,
    options: ValidatorOptions,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ValidatorOptions) -> Self {
        Self {
            registry: Registry::new(),
            options,
        }
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Register `f` as the custom rule `name`, replacing any earlier rule of
    /// that name. Custom rules shadow built-ins.
    pub fn add_custom_type_tag_fn<F>(&self, name: &str, f: F)
    where
        F: Fn(&ValidationContext, &FieldValue<'_>, &dyn Validate) -> anyhow::Result<bool>
            + Send
            + Sync
            + 'static,
    {
        self.add_custom_validator(name, Arc::new(f));
    }

    /// Register a prebuilt [`CustomValidator`].
    pub fn add_custom_validator(&self, name: &str, validator: Arc<dyn CustomValidator>) {
        let replaced = self.registry.register_custom(name, validator);
        tracing::debug!(rule = name, replaced, "Registered custom validator");
    }

    /// Validate `value` with an empty context.
    pub fn validate_struct<T: Validate>(&self, value: &T) -> ValidationResult {
        self.validate_struct_ctx(&ValidationContext::background(), value)
    }

    /// Validate `value`, handing `ctx` to every custom validator.
    pub fn validate_struct_ctx<T: Validate>(
        &self,
        ctx: &ValidationContext,
        value: &T,
    ) -> ValidationResult {
        self.validate_dyn(ctx, value)
    }

    /// Validate a type-erased root.
    pub fn validate_dyn(&self, ctx: &ValidationContext, root: &dyn Validate) -> ValidationResult {
        let result = Walker::new(self.registry.snapshot(), self.options, ctx, root).run();
        tracing::debug!(
            root = root.type_name(),
            is_valid = result.is_valid,
            violations = result.errors.len(),
            aborted = result.aborted,
            "Validation finished"
        );
        result
    }
}

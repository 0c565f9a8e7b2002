//! Depth-first traversal of a [`Validate`] value.
//!
//! Each field's declaration is parsed, its presence checked, and its rules
//! resolved and run in order until the first failure. Nested records are
//! walked with the same algorithm; sequence elements and map values inherit
//! the container's built-in rules, while custom rules run once against the
//! whole container.

use std::any::{Any, TypeId};
use std::borrow::Cow;

use crate::context::ValidationContext;
use crate::error::ConfigError;
use crate::options::ValidatorOptions;
use crate::registry::{RegistrySnapshot, Verdict};
use crate::result::{Aggregator, ValidationResult, REQUIRED_MESSAGE, REQUIRED_RULE};
use crate::tags::{RuleInvocation, RuleSet};
use crate::types::{FieldValue, Validate};

/// Identity of a record on the current path: address plus concrete type.
type RecordKey = (usize, TypeId);

fn record_key(record: &dyn Validate) -> RecordKey {
    let address = (record as *const dyn Validate).cast::<()>() as usize;
    let any: &dyn Any = record;
    (address, any.type_id())
}

/// Path of a named field below `prefix`.
pub fn field_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

/// Default failure text for a rule that evaluated to false.
pub fn failure_message(value: &FieldValue<'_>, rule: &str) -> String {
    let shown = value
        .text()
        .unwrap_or_else(|| Cow::Borrowed(value.kind()));
    format!("{shown} does not validate as {rule}")
}

/// State for one validation run.
pub struct Walker<'a> {
    registry: RegistrySnapshot,
    options: ValidatorOptions,
    ctx: &'a ValidationContext,
    root: &'a dyn Validate,
    ancestors: Vec<RecordKey>,
    aggregator: Aggregator,
}

impl<'a> Walker<'a> {
    pub fn new(
        registry: RegistrySnapshot,
        options: ValidatorOptions,
        ctx: &'a ValidationContext,
        root: &'a dyn Validate,
    ) -> Self {
        Self {
            registry,
            options,
            ctx,
            root,
            ancestors: Vec::new(),
            aggregator: Aggregator::new(options.aborts_on_config_error()),
        }
    }

    /// Walk from the root and return the aggregated result.
    pub fn run(mut self) -> ValidationResult {
        let root = self.root;
        self.enter_record("", root);
        self.aggregator.finish()
    }

    fn enter_record(&mut self, path: &str, record: &dyn Validate) {
        let key = record_key(record);
        if self.ancestors.contains(&key) {
            self.aggregator.configuration(
                path,
                "",
                ConfigError::CyclicReference {
                    type_name: record.type_name(),
                },
            );
            return;
        }

        self.ancestors.push(key);
        for field in record.fields() {
            if self.aggregator.should_stop() {
                break;
            }
            let path = field_path(path, field.name);
            self.visit_field(&path, field.rules, &field.value);
        }
        self.ancestors.pop();
    }

    fn visit_field(&mut self, path: &str, declaration: &str, value: &FieldValue<'_>) {
        tracing::trace!(field = path, rules = declaration, "Visiting field");
        let set = match RuleSet::parse(declaration) {
            Ok(set) => set,
            Err(err) => {
                self.aggregator.configuration(path, "", err.into());
                return;
            }
        };
        if set.skip {
            return;
        }
        self.check_value(path, &set, value, self.options.fields_required_by_default);
    }

    /// `default_required` is the presence policy when the declaration has
    /// no marker: the configured default for fields, `false` for elements.
    fn check_value(
        &mut self,
        path: &str,
        set: &RuleSet,
        value: &FieldValue<'_>,
        default_required: bool,
    ) {
        let target = value.deref();

        if let FieldValue::Unsupported(type_name) = target {
            if !set.is_empty() {
                self.aggregator.configuration(
                    path,
                    "",
                    ConfigError::UnsupportedType {
                        type_name: *type_name,
                    },
                );
            }
            return;
        }

        let mut rules = Vec::with_capacity(set.rules.len());
        for invocation in &set.rules {
            match self.registry.resolve(invocation) {
                Ok(resolved) => rules.push((invocation, resolved)),
                Err(err) => {
                    self.aggregator.configuration(path, &invocation.name, err);
                    return;
                }
            }
        }

        if value.is_zero() {
            if set.is_required(default_required) {
                let message = set
                    .presence_message
                    .clone()
                    .unwrap_or_else(|| REQUIRED_MESSAGE.to_string());
                self.aggregator.failure(path, REQUIRED_RULE, message);
            }
            return;
        }

        let is_container = matches!(target, FieldValue::Seq(_) | FieldValue::Map(_));
        let mut element_rules = Vec::new();

        for (invocation, resolved) in rules {
            if is_container && !resolved.is_custom() {
                element_rules.push(invocation.clone());
                continue;
            }
            match resolved.evaluate(invocation, self.ctx, target, self.root) {
                Ok(Verdict::Pass) => {}
                Ok(Verdict::Fail(reason)) => {
                    let message = invocation
                        .custom_message
                        .clone()
                        .or(reason)
                        .unwrap_or_else(|| failure_message(target, &invocation.name));
                    self.aggregator.failure(path, &invocation.name, message);
                    return;
                }
                Err(err) => {
                    self.aggregator.configuration(path, &invocation.name, err);
                    return;
                }
            }
        }

        match target {
            FieldValue::Record(record) => self.enter_record(path, *record),
            FieldValue::Seq(items) => {
                let elements = element_set(set, element_rules);
                for (index, item) in items.iter().enumerate() {
                    if self.aggregator.should_stop() {
                        break;
                    }
                    self.check_value(&format!("{path}[{index}]"), &elements, item, false);
                }
            }
            FieldValue::Map(entries) => {
                let elements = element_set(set, element_rules);
                for (key, item) in entries {
                    if self.aggregator.should_stop() {
                        break;
                    }
                    self.check_value(&format!("{path}[{key}]"), &elements, item, false);
                }
            }
            _ => {}
        }
    }
}

/// Rules applied to each element of a container: the deferred built-ins
/// and the container's presence marker, if any.
fn element_set(container: &RuleSet, rules: Vec<RuleInvocation>) -> RuleSet {
    RuleSet {
        rules,
        presence: container.presence,
        presence_message: container.presence_message.clone(),
        skip: false,
    }
}

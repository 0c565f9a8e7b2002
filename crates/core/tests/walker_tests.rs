//! Integration tests for traversal: nesting, containers, paths, ordering and
//! the cycle guard.

mod common;

use std::collections::HashMap;
use std::rc::Rc;

use assert_matches::assert_matches;
use common::{Address, LineItem, Link, Order, Pair};
use tagcheck_core::{ConfigError, Field, FieldValue, Validate, Validator};

fn failing_fields(result: &tagcheck_core::ValidationResult) -> Vec<&str> {
    result.errors.iter().map(|v| v.field.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Nested records and containers
// ---------------------------------------------------------------------------

#[test]
fn valid_order_passes() {
    let result = Validator::new().validate_struct(&Order::valid());
    assert!(result.is_valid, "unexpected errors: {}", result.errors);
    assert!(result.errors.is_empty());
}

#[test]
fn nested_failures_carry_full_path() {
    let mut order = Order::valid();
    order.address.zip = "12a45".to_string();
    order.billing = Some(Address {
        street: String::new(),
        zip: "99999".to_string(),
    });

    let result = Validator::new().validate_struct(&order);
    assert!(!result.is_valid);
    assert_eq!(failing_fields(&result), ["Address.Zip", "Billing.Street"]);
    assert_eq!(result.errors.0[0].rule_type, "numeric");
    assert_eq!(result.errors.0[0].message, "12a45 does not validate as numeric");
    assert_eq!(result.errors.0[1].rule_type, "required");
    assert_eq!(result.errors.0[1].message, "non zero value required");
}

#[test]
fn sequence_elements_are_indexed() {
    let mut order = Order::valid();
    order.items.push(LineItem {
        sku: "abc".to_string(),
        quantity: 5,
    });
    order.items.push(LineItem {
        sku: "XYZ".to_string(),
        quantity: 120,
    });
    order.tags = vec!["gift".to_string(), "x1".to_string()];

    let result = Validator::new().validate_struct(&order);
    assert_eq!(
        failing_fields(&result),
        ["Items[1].Sku", "Items[2].Quantity", "Tags[1]"]
    );
    let tag_failure = &result.errors.0[2];
    assert_eq!(tag_failure.rule_type, "alpha");
    assert_eq!(tag_failure.message, "x1 does not validate as alpha");
}

#[test]
fn map_values_are_keyed() {
    let mut order = Order::valid();
    order.labels.insert("channel".to_string(), "Web".to_string());
    order.labels.insert("zone".to_string(), "EU".to_string());

    let result = Validator::new().validate_struct(&order);
    assert_eq!(failing_fields(&result), ["Labels[channel]", "Labels[zone]"]);
}

#[test]
fn custom_message_replaces_generic_text() {
    let mut order = Order::valid();
    order.status = "pending".to_string();

    let result = Validator::new().validate_struct(&order);
    assert_eq!(failing_fields(&result), ["Status"]);
    assert_eq!(result.errors.0[0].message, "status must be open or closed");
}

#[test]
fn absent_optional_is_never_dereferenced() {
    let mut order = Order::valid();
    order.note = None;
    order.billing = None;
    assert!(Validator::new().validate_struct(&order).is_valid);

    order.note = Some("caf\u{e9}".to_string());
    let result = Validator::new().validate_struct(&order);
    assert_eq!(failing_fields(&result), ["Note"]);
    assert_eq!(result.errors.0[0].rule_type, "printableascii");
}

// ---------------------------------------------------------------------------
// Ordering and idempotence
// ---------------------------------------------------------------------------

struct Inventory {
    counts: HashMap<String, String>,
}

impl Validate for Inventory {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new(
            "Counts",
            "int",
            FieldValue::map(self.counts.iter().map(|(k, v)| (k, FieldValue::from(v)))),
        )]
    }
}

#[test]
fn map_order_is_sorted_regardless_of_hashing() {
    let counts: HashMap<String, String> = ["delta", "alpha", "charlie", "bravo"]
        .into_iter()
        .map(|k| (k.to_string(), "n/a".to_string()))
        .collect();
    let inventory = Inventory { counts };

    let result = Validator::new().validate_struct(&inventory);
    assert_eq!(
        failing_fields(&result),
        [
            "Counts[alpha]",
            "Counts[bravo]",
            "Counts[charlie]",
            "Counts[delta]"
        ]
    );
}

#[test]
fn repeated_validation_is_identical() {
    let mut order = Order::valid();
    order.email = "not-an-email".to_string();
    order.items[0].quantity = 0;
    order.tags.push("7".to_string());

    let validator = Validator::new();
    let first = validator.validate_struct(&order);
    let second = validator.validate_struct(&order);
    assert_eq!(first, second);
    assert!(!first.is_valid);
}

#[test]
fn failures_follow_declaration_order() {
    let mut order = Order::valid();
    order.note = Some("\u{7}".to_string());
    order.email = "nope".to_string();
    order.address.street = String::new();

    let result = Validator::new().validate_struct(&order);
    assert_eq!(failing_fields(&result), ["Email", "Address.Street", "Note"]);
}

#[test]
fn zero_quantity_skips_range_check() {
    let mut order = Order::valid();
    order.items[0].quantity = 0;
    assert!(Validator::new().validate_struct(&order).is_valid);
}

// ---------------------------------------------------------------------------
// Shared and cyclic graphs
// ---------------------------------------------------------------------------

#[test]
fn shared_acyclic_record_is_validated_per_occurrence() {
    let shared = Link::new("s1");
    let pair = Pair {
        left: Rc::clone(&shared),
        right: Rc::clone(&shared),
    };

    let result = Validator::new().validate_struct(&pair);
    assert_eq!(failing_fields(&result), ["Left.Name", "Right.Name"]);
    assert!(!result.has_config_errors());
}

#[test]
fn cycle_is_reported_as_configuration_error() {
    let a = Link::new("a");
    let b = Link::new("b");
    assert!(a.next.set(Rc::clone(&b)).is_ok());
    assert!(b.next.set(Rc::clone(&a)).is_ok());

    let result = Validator::new().validate_struct(&*a);
    assert!(!result.is_valid);
    assert_eq!(failing_fields(&result), ["Next.Next"]);
    let error = result.errors.0[0].config_error().expect("configuration error");
    assert_matches!(error, ConfigError::CyclicReference { type_name } if type_name.ends_with("Link"));
}

#[test]
fn self_loop_is_detected_at_first_field() {
    let a = Link::new("a");
    assert!(a.next.set(Rc::clone(&a)).is_ok());

    let result = Validator::new().validate_struct(&*a);
    assert_eq!(failing_fields(&result), ["Next"]);
    assert!(result.has_config_errors());
}

// ---------------------------------------------------------------------------
// Unsupported shapes
// ---------------------------------------------------------------------------

struct Job {
    name: String,
    run: fn() -> bool,
    rules: &'static str,
}

impl Validate for Job {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("Name", "alpha", FieldValue::from(&self.name)),
            Field::new("Run", self.rules, FieldValue::unsupported::<fn() -> bool>()),
        ]
    }
}

fn noop() -> bool {
    true
}

#[test]
fn unsupported_field_with_rules_is_configuration_error() {
    let job = Job {
        name: "nightly".to_string(),
        run: noop,
        rules: "required",
    };
    assert!((job.run)());

    let result = Validator::new().validate_struct(&job);
    assert!(!result.is_valid);
    let violation = &result.errors.0[0];
    assert_eq!(violation.field, "Run");
    let error = violation.config_error().expect("configuration error");
    assert!(error.is_unsupported_type());
}

#[test]
fn unsupported_field_without_rules_is_ignored() {
    let job = Job {
        name: "nightly".to_string(),
        run: noop,
        rules: "",
    };
    assert!(Validator::new().validate_struct(&job).is_valid);
}

struct Hooks {
    callbacks: Vec<fn() -> bool>,
    rules: &'static str,
}

impl Validate for Hooks {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new(
            "Callbacks",
            self.rules,
            FieldValue::seq(
                self.callbacks
                    .iter()
                    .map(|_| FieldValue::unsupported::<fn() -> bool>()),
            ),
        )]
    }
}

#[test]
fn unsupported_elements_without_rules_are_ignored() {
    let hooks = Hooks {
        callbacks: vec![noop, noop],
        rules: "",
    };
    let result = Validator::new().validate_struct(&hooks);
    assert!(result.is_valid, "unexpected errors: {}", result.errors);
}

#[test]
fn unsupported_elements_with_marker_are_reported() {
    let hooks = Hooks {
        callbacks: vec![noop, noop],
        rules: "required",
    };
    let result = Validator::new().validate_struct(&hooks);
    assert_eq!(failing_fields(&result), ["Callbacks[0]", "Callbacks[1]"]);
    assert!(result.errors.iter().all(|v| v
        .config_error()
        .is_some_and(ConfigError::is_unsupported_type)));
}

#[test]
fn zero_elements_ignore_required_by_default() {
    let options = tagcheck_core::ValidatorOptions::default().required_by_default(true);
    let mut order = Order::valid();
    order.billing = Some(Address {
        street: "Side St".to_string(),
        zip: "54321".to_string(),
    });
    order.tags = vec![String::new(), "gift".to_string()];
    let result = Validator::with_options(options).validate_struct(&order);
    assert!(result.is_valid, "unexpected errors: {}", result.errors);
}

#[test]
fn builtin_rule_on_record_is_inapplicable() {
    struct Wrapper {
        address: Address,
    }

    impl Validate for Wrapper {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![Field::new("Address", "email", FieldValue::record(&self.address))]
        }
    }

    let wrapper = Wrapper {
        address: Address {
            street: "Main St".to_string(),
            zip: "12345".to_string(),
        },
    };
    let result = Validator::new().validate_struct(&wrapper);
    let error = result.errors.0[0].config_error().expect("configuration error");
    assert_matches!(error, ConfigError::InapplicableRule { name, kind: "record" } if name == "email");
}

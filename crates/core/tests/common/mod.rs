//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tagcheck_core::{Field, FieldValue, Validate};

/// Self-referential record from the custom-rule examples.
pub struct Node {
    pub name: String,
    pub child: Option<Box<Node>>,
}

impl Node {
    pub fn leaf(name: &str) -> Self {
        Self {
            name: name.to_string(),
            child: None,
        }
    }

    pub fn with_child(name: &str, child: Node) -> Self {
        Self {
            name: name.to_string(),
            child: Some(Box::new(child)),
        }
    }
}

impl Validate for Node {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("Name", "alpha", FieldValue::from(&self.name)),
            Field::new(
                "Child",
                "childless",
                FieldValue::optional_record(self.child.as_deref()),
            ),
        ]
    }
}

pub struct Address {
    pub street: String,
    pub zip: String,
}

impl Validate for Address {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("Street", "required", FieldValue::from(&self.street)),
            Field::new("Zip", "numeric,length(5|5)", FieldValue::from(&self.zip)),
        ]
    }
}

pub struct LineItem {
    pub sku: String,
    pub quantity: u32,
}

impl Validate for LineItem {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("Sku", "required,uppercase", FieldValue::from(&self.sku)),
            Field::new("Quantity", "range(1|99)", FieldValue::from(self.quantity)),
        ]
    }
}

/// Record exercising every container shape.
pub struct Order {
    pub email: String,
    pub status: String,
    pub address: Address,
    pub billing: Option<Address>,
    pub items: Vec<LineItem>,
    pub tags: Vec<String>,
    pub labels: BTreeMap<String, String>,
    pub note: Option<String>,
}

impl Order {
    pub fn valid() -> Self {
        Self {
            email: "buyer@example.com".to_string(),
            status: "open".to_string(),
            address: Address {
                street: "Main St".to_string(),
                zip: "12345".to_string(),
            },
            billing: None,
            items: vec![LineItem {
                sku: "ABC".to_string(),
                quantity: 2,
            }],
            tags: vec!["gift".to_string()],
            labels: BTreeMap::from([("region".to_string(), "emea".to_string())]),
            note: None,
        }
    }
}

impl Validate for Order {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("Email", "required,email", FieldValue::from(&self.email)),
            Field::new(
                "Status",
                "in(open,closed)~status must be open or closed",
                FieldValue::from(&self.status),
            ),
            Field::new("Address", "required", FieldValue::record(&self.address)),
            Field::new(
                "Billing",
                "",
                FieldValue::optional_record(self.billing.as_ref()),
            ),
            Field::new(
                "Items",
                "",
                FieldValue::seq(self.items.iter().map(FieldValue::record)),
            ),
            Field::new(
                "Tags",
                "alpha",
                FieldValue::seq(self.tags.iter().map(FieldValue::from)),
            ),
            Field::new(
                "Labels",
                "lowercase",
                FieldValue::map(self.labels.iter().map(|(k, v)| (k, FieldValue::from(v)))),
            ),
            Field::new(
                "Note",
                "optional,printableascii",
                FieldValue::optional(self.note.as_ref().map(FieldValue::from)),
            ),
        ]
    }
}

/// Node of a shared-ownership graph that may loop back on itself.
pub struct Link {
    pub name: String,
    pub next: OnceCell<Rc<Link>>,
}

impl Link {
    pub fn new(name: &str) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_string(),
            next: OnceCell::new(),
        })
    }
}

impl Validate for Link {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("Name", "alpha", FieldValue::from(&self.name)),
            Field::new(
                "Next",
                "",
                FieldValue::optional_record(self.next.get().map(|link| &**link)),
            ),
        ]
    }
}

/// Two fields pointing at the same shared record.
pub struct Pair {
    pub left: Rc<Link>,
    pub right: Rc<Link>,
}

impl Validate for Pair {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("Left", "", FieldValue::record(&*self.left)),
            Field::new("Right", "", FieldValue::record(&*self.right)),
        ]
    }
}

/// Single string field with an arbitrary declaration.
pub struct Sample {
    pub rules: &'static str,
    pub value: String,
}

impl Sample {
    pub fn new(rules: &'static str, value: &str) -> Self {
        Self {
            rules,
            value: value.to_string(),
        }
    }
}

impl Validate for Sample {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new("Value", self.rules, FieldValue::from(&self.value))]
    }
}

/// Three independent fields: bad data, a bad declaration, bad data.
pub struct Mixed {
    pub first: String,
    pub second: String,
    pub third: String,
}

impl Mixed {
    pub fn all_bad() -> Self {
        Self {
            first: "a1".to_string(),
            second: "anything".to_string(),
            third: "b2".to_string(),
        }
    }
}

impl Validate for Mixed {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("First", "alpha", FieldValue::from(&self.first)),
            Field::new("Second", "nosuchrule", FieldValue::from(&self.second)),
            Field::new("Third", "alpha", FieldValue::from(&self.third)),
        ]
    }
}

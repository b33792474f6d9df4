//! Descriptor registry — the declarative list of supported REST operations.
//!
//! Each entry pairs the rich parameter annotation (function-calling face)
//! with the generated request-body JSON Schema (OpenAPI face) and the
//! handler that executes the operation.

use crate::orders::handlers;
use crate::orders::params::{CaptureOrderParameters, CreateOrderParameters, OrderIdParameters};
use crate::schema::{Annotation, Bounds, FieldDef, ObjectAnnotation};
use crate::tools::descriptor::ToolDescriptor;
use crate::types::ActionMap;
use schemars::JsonSchema;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

static REGISTRY: OnceLock<Vec<ToolDescriptor>> = OnceLock::new();

/// All supported operations, in registration order.
pub fn all() -> &'static [ToolDescriptor] {
    REGISTRY.get_or_init(build_registry).as_slice()
}

/// Look up a descriptor by method name.
pub fn find(method: &str) -> Option<&'static ToolDescriptor> {
    all().iter().find(|descriptor| descriptor.method == method)
}

fn build_registry() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            method: "create_order".to_string(),
            description: "Create a PayPal order from line items in a given currency. \
                          Returns the order id and its approval status."
                .to_string(),
            args: create_order_args(),
            request_schema: schema_value::<CreateOrderParameters>(),
            actions: action_map("orders", &["create"]),
            handler: handlers::create_order_handler,
        },
        ToolDescriptor {
            method: "capture_order".to_string(),
            description: "Capture payment for a previously approved PayPal order."
                .to_string(),
            args: ObjectAnnotation::new(
                "CaptureOrderParameters",
                vec![FieldDef::new(
                    "order_id",
                    Annotation::constrained(Annotation::String, Bounds::length(1, 64)),
                )
                .with_description("Id of the order to capture, as returned by the create call")],
            ),
            request_schema: schema_value::<CaptureOrderParameters>(),
            actions: action_map("orders", &["capture"]),
            handler: handlers::capture_order_handler,
        },
        ToolDescriptor {
            method: "get_order_details".to_string(),
            description: "Fetch the current status and payment details of a PayPal order."
                .to_string(),
            args: ObjectAnnotation::new(
                "OrderIdParameters",
                vec![FieldDef::new(
                    "order_id",
                    Annotation::constrained(Annotation::String, Bounds::length(1, 64)),
                )
                .with_description("Id of the order to look up")],
            ),
            request_schema: schema_value::<OrderIdParameters>(),
            actions: action_map("orders", &["get"]),
            handler: handlers::get_order_details_handler,
        },
    ]
}

fn create_order_args() -> ObjectAnnotation {
    let item = ObjectAnnotation::new(
        "OrderItem",
        vec![
            FieldDef::new(
                "name",
                Annotation::constrained(Annotation::String, Bounds::length(1, 127)),
            )
            .with_description("Item name"),
            FieldDef::new("description", Annotation::optional(Annotation::String))
                .with_description("Item description"),
            FieldDef::new(
                "quantity",
                Annotation::constrained(Annotation::Integer, Bounds::range(1.0, 999.0)),
            )
            .with_description("Item quantity"),
            FieldDef::new("price", Annotation::Float)
                .with_description("Per-unit price in the order currency"),
        ],
    );
    ObjectAnnotation::new(
        "CreateOrderParameters",
        vec![
            FieldDef::new(
                "currency_code",
                Annotation::constrained(
                    Annotation::String,
                    Bounds {
                        pattern: Some("^[A-Z]{3}$".to_string()),
                        ..Bounds::default()
                    },
                ),
            )
            .with_description("Three-letter ISO currency code applied to all amounts in the order"),
            FieldDef::new("items", Annotation::list(Annotation::Object(item)))
                .with_description("Line items to include in the order"),
            FieldDef::new(
                "intent",
                Annotation::optional(Annotation::literal(&["CAPTURE", "AUTHORIZE"])),
            )
            .with_description("Processing intent; defaults to CAPTURE"),
            FieldDef::new("discount", Annotation::optional(Annotation::Float))
                .with_description("Flat discount applied to the order total"),
            FieldDef::new("shipping_cost", Annotation::optional(Annotation::Float))
                .with_description("Shipping cost added to the order total"),
            FieldDef::new("return_url", Annotation::optional(Annotation::Url))
                .with_description("Redirect target after buyer approval"),
            FieldDef::new("cancel_url", Annotation::optional(Annotation::Url))
                .with_description("Redirect target after cancelled approval"),
            FieldDef::new(
                "notes",
                Annotation::optional(Annotation::constrained(
                    Annotation::String,
                    Bounds::length(1, 256),
                )),
            )
            .with_description("Free-form note attached to the purchase unit"),
        ],
    )
}

fn schema_value<T: JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(T))
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

fn action_map(resource: &str, actions: &[&str]) -> ActionMap {
    let mut inner = HashMap::new();
    for action in actions {
        inner.insert((*action).to_string(), true);
    }
    HashMap::from([(resource.to_string(), inner)])
}

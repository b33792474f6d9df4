//! Typed parameter models for the orders operations.
//!
//! These are the validation boundary: handler arguments deserialize into
//! these structs before any payload is built. The derived JSON Schemas feed
//! the OpenAPI tool variant.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Processing intent for order creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderIntent {
    Capture,
    Authorize,
}

impl OrderIntent {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderIntent::Capture => "CAPTURE",
            OrderIntent::Authorize => "AUTHORIZE",
        }
    }
}

/// One purchasable line item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct OrderItem {
    /// Item name.
    pub name: String,
    /// Item description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Item quantity.
    pub quantity: u32,
    /// Per-unit price in the order currency.
    pub price: f64,
}

/// Arguments accepted by the create-order operation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateOrderParameters {
    /// Three-letter ISO currency code applied to all amounts in the order.
    pub currency_code: String,
    /// Line items to include in the order.
    pub items: Vec<OrderItem>,
    /// Processing intent; defaults to CAPTURE.
    #[serde(default)]
    pub intent: Option<OrderIntent>,
    /// Flat discount applied to the order total.
    #[serde(default)]
    pub discount: Option<f64>,
    /// Shipping cost added to the order total.
    #[serde(default)]
    pub shipping_cost: Option<f64>,
    /// Redirect target after buyer approval.
    #[serde(default)]
    pub return_url: Option<String>,
    /// Redirect target after cancelled approval.
    #[serde(default)]
    pub cancel_url: Option<String>,
    /// Free-form note attached to the purchase unit.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Arguments accepted by the capture-order operation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CaptureOrderParameters {
    /// Id of the order to capture, as returned by the create call.
    pub order_id: String,
}

/// Arguments identifying an existing order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct OrderIdParameters {
    /// Id of the order to look up.
    pub order_id: String,
}

//! Order payload construction.
//!
//! Translates validated create-order parameters into the PayPal orders wire
//! format: purchase units with an amount breakdown and stringified
//! two-decimal money values.

use crate::orders::params::{CreateOrderParameters, OrderIntent};
use crate::types::{Error, Result};
use serde_json::{json, Value};

/// Two-decimal money string, the wire format PayPal amounts use.
pub(crate) fn money(value: f64) -> String {
    format!("{:.2}", value)
}

fn amount(currency_code: &str, value: f64) -> Value {
    json!({"currency_code": currency_code, "value": money(value)})
}

/// Build the `/v2/checkout/orders` request body.
pub fn order_payload(params: &CreateOrderParameters) -> Result<Value> {
    if params.items.is_empty() {
        return Err(Error::validation("order must contain at least one item"));
    }
    for item in &params.items {
        if item.quantity == 0 {
            return Err(Error::validation(format!(
                "item '{}' must have a positive quantity",
                item.name
            )));
        }
        if item.price < 0.0 {
            return Err(Error::validation(format!(
                "item '{}' must not have a negative price",
                item.name
            )));
        }
    }
    let shipping = params.shipping_cost.unwrap_or(0.0);
    let discount = params.discount.unwrap_or(0.0);
    if shipping < 0.0 || discount < 0.0 {
        return Err(Error::validation(
            "shipping cost and discount must not be negative",
        ));
    }

    let item_total: f64 = params
        .items
        .iter()
        .map(|item| f64::from(item.quantity) * item.price)
        .sum();
    let total = item_total + shipping - discount;
    if total < 0.0 {
        return Err(Error::validation("discount exceeds the order total"));
    }

    let items: Vec<Value> = params
        .items
        .iter()
        .map(|item| {
            let mut entry = json!({
                "name": item.name,
                "quantity": item.quantity.to_string(),
                "unit_amount": amount(&params.currency_code, item.price),
            });
            if let Some(description) = &item.description {
                entry["description"] = json!(description);
            }
            entry
        })
        .collect();

    let mut breakdown = json!({
        "item_total": amount(&params.currency_code, item_total),
    });
    if shipping > 0.0 {
        breakdown["shipping"] = amount(&params.currency_code, shipping);
    }
    if discount > 0.0 {
        breakdown["discount"] = amount(&params.currency_code, discount);
    }

    let mut purchase_unit = json!({
        "amount": {
            "currency_code": params.currency_code,
            "value": money(total),
            "breakdown": breakdown,
        },
        "items": items,
    });
    if let Some(notes) = &params.notes {
        purchase_unit["description"] = json!(notes);
    }

    let mut payload = json!({
        "intent": params.intent.unwrap_or(OrderIntent::Capture).as_str(),
        "purchase_units": [purchase_unit],
    });

    if params.return_url.is_some() || params.cancel_url.is_some() {
        let mut application_context = serde_json::Map::new();
        if let Some(return_url) = &params.return_url {
            application_context.insert("return_url".to_string(), json!(return_url));
        }
        if let Some(cancel_url) = &params.cancel_url {
            application_context.insert("cancel_url".to_string(), json!(cancel_url));
        }
        payload["application_context"] = Value::Object(application_context);
    }

    Ok(payload)
}

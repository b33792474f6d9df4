//! Handlers for the orders operations.
//!
//! Each handler validates its raw argument object into the typed parameter
//! model, performs one REST call through the client, and shapes the response
//! for the calling agent.

use crate::client::PayPalClient;
use crate::orders::params::{CaptureOrderParameters, CreateOrderParameters, OrderIdParameters};
use crate::orders::payload::order_payload;
use crate::types::{Error, Result};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// Peel a double-wrapped argument object. Some runtimes nest all tool
/// arguments under a single `kwargs` key.
fn unwrap_args(args: Value) -> Value {
    match args {
        Value::Object(mut map) if matches!(map.get("kwargs"), Some(Value::Object(_))) => map
            .remove("kwargs")
            .unwrap_or_else(|| Value::Object(serde_json::Map::new())),
        other => other,
    }
}

fn parse_args<T: DeserializeOwned>(method: &str, args: Value) -> Result<T> {
    serde_json::from_value(unwrap_args(args))
        .map_err(|e| Error::validation(format!("invalid {} arguments: {}", method, e)))
}

/// Create an order from line items and a currency.
pub async fn create_order(client: &PayPalClient, args: Value) -> Result<Value> {
    let params: CreateOrderParameters = parse_args("create_order", args)?;
    let payload = order_payload(&params)?;
    let response = client.post("/v2/checkout/orders", Some(&payload)).await?;
    tracing::info!(
        order_id = response.get("id").and_then(Value::as_str).unwrap_or(""),
        "created paypal order"
    );
    Ok(response)
}

/// Capture payment for a previously approved order.
pub async fn capture_order(client: &PayPalClient, args: Value) -> Result<Value> {
    let params: CaptureOrderParameters = parse_args("capture_order", args)?;
    let path = format!("/v2/checkout/orders/{}/capture", params.order_id);
    let result = client.post(&path, None).await?;
    Ok(order_summary(&params.order_id, "captured", result))
}

/// Fetch the current state of an order.
pub async fn get_order_details(client: &PayPalClient, args: Value) -> Result<Value> {
    let params: OrderIdParameters = parse_args("get_order_details", args)?;
    let path = format!("/v2/checkout/orders/{}", params.order_id);
    let result = client.get(&path).await?;
    Ok(order_summary(&params.order_id, "retrieved", result))
}

/// Shape an orders response for the agent: human message, status, captured
/// amount as "{currency} {value}" when present, raw response attached.
fn order_summary(order_id: &str, verb: &str, result: Value) -> Value {
    let status = result.get("status").cloned().unwrap_or(Value::Null);
    let value = result
        .pointer("/purchase_units/0/payments/captures/0/amount/value")
        .and_then(Value::as_str);
    let currency = result
        .pointer("/purchase_units/0/payments/captures/0/amount/currency_code")
        .and_then(Value::as_str);
    let amount = match (currency, value) {
        (Some(currency), Some(value)) => format!("{} {}", currency, value),
        _ => "N/A".to_string(),
    };
    json!({
        "message": format!("The PayPal order {} has been successfully {}.", order_id, verb),
        "status": status,
        "amount": amount,
        "raw": result,
    })
}

// ---------------------------------------------------------------------------
// Boxed wrappers consumed by the descriptor registry
// ---------------------------------------------------------------------------

pub fn create_order_handler(client: &PayPalClient, args: Value) -> BoxFuture<'_, Result<Value>> {
    create_order(client, args).boxed()
}

pub fn capture_order_handler(client: &PayPalClient, args: Value) -> BoxFuture<'_, Result<Value>> {
    capture_order(client, args).boxed()
}

pub fn get_order_details_handler(
    client: &PayPalClient,
    args: Value,
) -> BoxFuture<'_, Result<Value>> {
    get_order_details(client, args).boxed()
}

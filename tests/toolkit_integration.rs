//! Toolkit integration tests — full stack against a stub PayPal server.
//!
//! Covers toolkit construction and filtering, token acquisition, the three
//! orders operations end to end, and error propagation.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use paypal_agent_toolkit::types::{Configuration, Context};
use paypal_agent_toolkit::PayPalToolkit;
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::net::SocketAddr;

/// Spin up a stub PayPal API on a random port.
async fn start_stub_paypal() -> SocketAddr {
    let app = Router::new()
        .route(
            "/v1/oauth2/token",
            post(|| async {
                Json(json!({
                    "access_token": "stub-token",
                    "token_type": "Bearer",
                    "expires_in": 32400,
                }))
            }),
        )
        .route(
            "/v2/checkout/orders",
            post(|Json(payload): Json<Value>| async move {
                Json(json!({
                    "id": "5O190127TN364715T",
                    "status": "CREATED",
                    "intent": payload["intent"],
                }))
            }),
        )
        .route(
            "/v2/checkout/orders/{id}/capture",
            post(|Path(id): Path<String>| async move {
                if id == "MISSING" {
                    return (
                        StatusCode::NOT_FOUND,
                        Json(json!({"name": "RESOURCE_NOT_FOUND"})),
                    );
                }
                (
                    StatusCode::OK,
                    Json(json!({
                        "id": id,
                        "status": "COMPLETED",
                        "purchase_units": [{"payments": {"captures": [{
                            "amount": {"value": "49.99", "currency_code": "USD"},
                        }]}}],
                    })),
                )
            }),
        )
        .route(
            "/v2/checkout/orders/{id}",
            get(|Path(id): Path<String>| async move {
                Json(json!({"id": id, "status": "APPROVED", "purchase_units": []}))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Toolkit wired to the stub via the context base_url override.
fn toolkit_against(addr: SocketAddr, actions: &[&str]) -> PayPalToolkit {
    let mut context = Context::default();
    context
        .extra
        .insert("base_url".to_string(), json!(format!("http://{}", addr)));
    let mut inner = HashMap::new();
    for action in actions {
        inner.insert((*action).to_string(), true);
    }
    let configuration = Configuration::new(HashMap::from([("orders".to_string(), inner)]))
        .with_context(context);
    PayPalToolkit::new("test-client", "test-secret", Some(configuration)).unwrap()
}

fn args(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn test_create_order_round_trip() {
    let addr = start_stub_paypal().await;
    let toolkit = toolkit_against(addr, &["create"]);
    let tool = toolkit
        .tools()
        .iter()
        .find(|t| t.name() == "create_order")
        .unwrap();

    // Optional fields omitted; only the required arguments are supplied.
    let result = tool
        .call(args(json!({
            "currency_code": "USD",
            "items": [{"name": "hoodie", "quantity": 1, "price": 49.99}],
        })))
        .await
        .unwrap();

    let decoded: Value = serde_json::from_str(&result).unwrap();
    assert_eq!(decoded["id"], "5O190127TN364715T");
    assert_eq!(decoded["status"], "CREATED");
    assert_eq!(decoded["intent"], "CAPTURE");
}

#[tokio::test]
async fn test_create_order_with_all_arguments() {
    let addr = start_stub_paypal().await;
    let toolkit = toolkit_against(addr, &["create"]);
    let tool = toolkit
        .tools()
        .iter()
        .find(|t| t.name() == "create_order")
        .unwrap();

    let result = tool
        .call(args(json!({
            "currency_code": "EUR",
            "items": [
                {"name": "hoodie", "description": "zip", "quantity": 2, "price": 30.0},
            ],
            "intent": "AUTHORIZE",
            "discount": 5.0,
            "shipping_cost": 4.5,
            "return_url": "https://shop.example/return",
            "cancel_url": "https://shop.example/cancel",
            "notes": "gift wrap",
        })))
        .await
        .unwrap();

    let decoded: Value = serde_json::from_str(&result).unwrap();
    assert_eq!(decoded["intent"], "AUTHORIZE");
}

#[tokio::test]
async fn test_capture_order_reports_amount() {
    let addr = start_stub_paypal().await;
    let toolkit = toolkit_against(addr, &["capture"]);
    let tool = toolkit
        .tools()
        .iter()
        .find(|t| t.name() == "capture_order")
        .unwrap();

    let result = tool
        .call(args(json!({"order_id": "5O190127TN364715T"})))
        .await
        .unwrap();

    let decoded: Value = serde_json::from_str(&result).unwrap();
    assert_eq!(decoded["status"], "COMPLETED");
    assert_eq!(decoded["amount"], "USD 49.99");
    assert_eq!(
        decoded["message"],
        "The PayPal order 5O190127TN364715T has been successfully captured."
    );
}

#[tokio::test]
async fn test_get_order_details() {
    let addr = start_stub_paypal().await;
    let toolkit = toolkit_against(addr, &["get"]);
    let tool = toolkit
        .tools()
        .iter()
        .find(|t| t.name() == "get_order_details")
        .unwrap();

    let result = tool.call(args(json!({"order_id": "1AB"}))).await.unwrap();
    let decoded: Value = serde_json::from_str(&result).unwrap();
    assert_eq!(decoded["status"], "APPROVED");
    assert_eq!(decoded["amount"], "N/A");
    assert_eq!(
        decoded["message"],
        "The PayPal order 1AB has been successfully retrieved."
    );
}

#[tokio::test]
async fn test_reserved_context_argument_is_stripped() {
    let addr = start_stub_paypal().await;
    let toolkit = toolkit_against(addr, &["capture"]);
    let tool = toolkit
        .tools()
        .iter()
        .find(|t| t.name() == "capture_order")
        .unwrap();

    // An unstripped context key would fail deny_unknown_fields validation.
    let result = tool
        .call(args(json!({
            "order_id": "1AB",
            "context": {"runtime": "stub"},
        })))
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_invalid_arguments_fail_validation() {
    let addr = start_stub_paypal().await;
    let toolkit = toolkit_against(addr, &["create"]);
    let tool = toolkit
        .tools()
        .iter()
        .find(|t| t.name() == "create_order")
        .unwrap();

    let err = tool
        .call(args(json!({"currency_code": "USD"})))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        paypal_agent_toolkit::types::Error::Validation(_)
    ));
}

#[tokio::test]
async fn test_api_errors_propagate_with_status() {
    let addr = start_stub_paypal().await;
    let toolkit = toolkit_against(addr, &["capture"]);
    let tool = toolkit
        .tools()
        .iter()
        .find(|t| t.name() == "capture_order")
        .unwrap();

    let err = tool
        .call(args(json!({"order_id": "MISSING"})))
        .await
        .unwrap_err();
    match err {
        paypal_agent_toolkit::types::Error::Api { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("RESOURCE_NOT_FOUND"));
        }
        other => panic!("expected api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rest_tool_variant_returns_decoded_json() {
    let addr = start_stub_paypal().await;
    let toolkit = toolkit_against(addr, &["capture"]);
    let rest_tools = toolkit.rest_tools().unwrap();
    let tool = rest_tools
        .iter()
        .find(|t| t.name() == "capture_order")
        .unwrap();

    // The document points at the stub, not at a hardcoded sandbox host.
    assert_eq!(
        tool.spec()["servers"][0]["url"],
        format!("http://{}", addr)
    );

    let decoded = tool.call(args(json!({"order_id": "1AB"}))).await.unwrap();
    assert_eq!(decoded["amount"], "USD 49.99");
}

#[tokio::test]
async fn test_filtering_is_per_action() {
    let addr = start_stub_paypal().await;
    let toolkit = toolkit_against(addr, &["create", "get"]);
    let names: Vec<&str> = toolkit.tools().iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["create_order", "get_order_details"]);
}

#[test]
fn test_from_env_requires_credentials() {
    std::env::remove_var("PAYPAL_CLIENT_ID");
    std::env::remove_var("PAYPAL_CLIENT_SECRET");
    let err = PayPalToolkit::from_env(None).unwrap_err();
    assert!(matches!(
        err,
        paypal_agent_toolkit::types::Error::Validation(_)
    ));

    std::env::set_var("PAYPAL_CLIENT_ID", "env-client");
    std::env::set_var("PAYPAL_CLIENT_SECRET", "env-secret");
    let toolkit = PayPalToolkit::from_env(None).unwrap();
    assert!(toolkit.tools().is_empty());
    std::env::remove_var("PAYPAL_CLIENT_ID");
    std::env::remove_var("PAYPAL_CLIENT_SECRET");
}

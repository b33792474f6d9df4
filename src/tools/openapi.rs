//! OpenAPI tool variant.
//!
//! Some agent runtimes build their REST tools from an OpenAPI document
//! rather than a function declaration. This variant wraps the converted
//! request schema in a minimal single-operation OpenAPI 3.0.3 document and
//! delegates execution the same way the function variant does.

use crate::api::PayPalApi;
use crate::schema::dialect::{json_schema_to_oas3, remap_ref};
use crate::tools::descriptor::ToolDescriptor;
use crate::tools::factory::CONTEXT_ARG;
use crate::types::{Error, Result};
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Build the single-operation OpenAPI 3.0.3 document for a descriptor.
///
/// The request schema is converted to the 3.0 dialect and its definition
/// block is relocated under `#/components/schemas`, with reference paths
/// rewritten to match, so the document resolves on its own.
pub fn openapi_fragment(descriptor: &ToolDescriptor, base_url: &str) -> Value {
    let mut request_schema = json_schema_to_oas3(&descriptor.request_schema);
    let mut components = Map::new();
    if let Value::Object(ref mut map) = request_schema {
        map.remove("$schema");
        for root in ["$defs", "definitions"] {
            if let Some(Value::Object(definitions)) = map.remove(root) {
                for (name, definition) in definitions {
                    let mut converted = json_schema_to_oas3(&definition);
                    rewrite_refs(&mut converted);
                    components.insert(name, converted);
                }
            }
        }
    }
    rewrite_refs(&mut request_schema);

    let operation = json!({
        "post": {
            "operationId": descriptor.method,
            "description": descriptor.description,
            "requestBody": {
                "required": true,
                "content": {"application/json": {"schema": request_schema}},
            },
            "responses": {
                "200": {
                    "description": "Successful PayPal API response",
                    "content": {"application/json": {"schema": {"type": "object"}}},
                },
            },
        },
    });
    let mut document = json!({
        "openapi": "3.0.3",
        "info": {
            "title": format!("PayPal {}", descriptor.method),
            "version": "1.0.0",
            "description": descriptor.description,
        },
        "servers": [{"url": base_url}],
        "paths": {},
    });
    let path = format!("/{}", descriptor.method);
    document["paths"][path.as_str()] = operation;
    if !components.is_empty() {
        document["components"] = json!({"schemas": components});
    }
    document
}

/// Remap every `$ref` path in a converted subtree to the components root.
fn rewrite_refs(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(path)) = map.get_mut("$ref") {
                *path = remap_ref(path);
            }
            for entry in map.values_mut() {
                rewrite_refs(entry);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                rewrite_refs(item);
            }
        }
        _ => {}
    }
}

/// REST tool built from an OpenAPI document.
///
/// Unlike [`Tool`](crate::tools::Tool), invocation returns the decoded JSON
/// value rather than a serialized string.
#[derive(Debug)]
pub struct RestTool {
    name: String,
    description: String,
    spec: Value,
    api: Arc<PayPalApi>,
}

impl RestTool {
    pub fn build(api: Arc<PayPalApi>, descriptor: &ToolDescriptor) -> Result<Self> {
        if descriptor.method.is_empty() {
            return Err(Error::validation("tool method name cannot be empty"));
        }
        let spec = openapi_fragment(descriptor, api.base_url());
        Ok(Self {
            name: descriptor.method.clone(),
            description: descriptor.description.clone(),
            spec,
            api,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The OpenAPI document describing this tool.
    pub fn spec(&self) -> &Value {
        &self.spec
    }

    /// Invoke the tool, returning the decoded JSON result.
    pub async fn call(&self, mut args: Map<String, Value>) -> Result<Value> {
        args.remove(CONTEXT_ARG);
        self.api.run(&self.name, Value::Object(args)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::registry;

    const BASE: &str = "https://api-m.sandbox.paypal.com";

    fn fragment(method: &str) -> Value {
        let descriptor = registry::find(method).unwrap();
        openapi_fragment(descriptor, BASE)
    }

    #[test]
    fn test_fragment_shape() {
        let document = fragment("create_order");
        assert_eq!(document["openapi"], "3.0.3");
        assert_eq!(document["info"]["title"], "PayPal create_order");
        assert_eq!(document["servers"][0]["url"], BASE);

        let operation = &document["paths"]["/create_order"]["post"];
        assert_eq!(operation["operationId"], "create_order");
        assert_eq!(operation["requestBody"]["required"], true);
        assert!(operation["requestBody"]["content"]["application/json"]["schema"].is_object());
        assert!(operation["responses"]["200"].is_object());
    }

    #[test]
    fn test_definitions_relocated_to_components() {
        let document = fragment("create_order");
        // The generated schema references OrderItem through a definitions
        // block; the fragment must move it under components.
        assert!(document["components"]["schemas"].get("OrderItem").is_some());

        let schema =
            &document["paths"]["/create_order"]["post"]["requestBody"]["content"]["application/json"]["schema"];
        assert!(schema.get("$schema").is_none());
        assert!(schema.get("definitions").is_none());
        assert!(schema.get("$defs").is_none());
    }

    #[test]
    fn test_no_draft_refs_survive() {
        fn no_draft_refs(value: &Value) -> bool {
            match value {
                Value::Object(map) => map.iter().all(|(key, entry)| {
                    if key == "$ref" {
                        entry
                            .as_str()
                            .is_some_and(|path| path.starts_with("#/components/schemas/"))
                    } else {
                        no_draft_refs(entry)
                    }
                }),
                Value::Array(items) => items.iter().all(no_draft_refs),
                _ => true,
            }
        }
        assert!(no_draft_refs(&fragment("create_order")));
    }

    #[test]
    fn test_simple_operation_has_no_components() {
        let document = fragment("capture_order");
        assert!(document.get("components").is_none());
    }
}

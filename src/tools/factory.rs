//! Tool factory — the function-calling tool variant.
//!
//! Builds a callable with an explicit, declarative parameter list from a
//! registry descriptor. Parameters carry the simplified annotation and no
//! defaults; the execution context never appears in the declared surface.

use crate::api::PayPalApi;
use crate::schema::{simplify, Annotation};
use crate::tools::descriptor::ToolDescriptor;
use crate::types::{Error, Result};
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Reserved argument name stripped at invocation time. The execution
/// context travels on the shared client, not through the agent-visible
/// surface.
pub const CONTEXT_ARG: &str = "context";

/// One declared tool parameter.
#[derive(Debug, Clone)]
pub struct ParamDef {
    pub name: String,
    /// Simplified annotation; the rich form stays in the registry.
    pub annotation: Annotation,
    pub description: Option<String>,
}

impl ParamDef {
    pub fn is_required(&self) -> bool {
        !matches!(self.annotation, Annotation::Optional(_))
    }
}

/// A callable REST tool with a synthesized parameter list.
#[derive(Debug)]
pub struct Tool {
    name: String,
    description: String,
    params: Vec<ParamDef>,
    api: Arc<PayPalApi>,
}

/// Build the function-calling tool for one descriptor.
///
/// The simplified schema tree is computed here and discarded once the
/// parameter list exists; nothing is cached across tools.
pub fn build_tool(api: Arc<PayPalApi>, descriptor: &ToolDescriptor) -> Result<Tool> {
    if descriptor.method.is_empty() {
        return Err(Error::validation("tool method name cannot be empty"));
    }
    let params = descriptor
        .args
        .fields
        .iter()
        .map(|field| ParamDef {
            name: field.name.clone(),
            annotation: simplify(&field.annotation),
            description: field.description.clone(),
        })
        .collect();
    Ok(Tool {
        name: descriptor.method.clone(),
        description: descriptor.description.clone(),
        params,
        api,
    })
}

impl Tool {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn params(&self) -> &[ParamDef] {
        &self.params
    }

    /// Function-declaration JSON for the agent runtime.
    pub fn declaration(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for param in &self.params {
            let mut schema = param.annotation.to_schema_value();
            if let (Value::Object(map), Some(description)) = (&mut schema, &param.description) {
                map.entry("description".to_string())
                    .or_insert_with(|| json!(description));
            }
            properties.insert(param.name.clone(), schema);
            if param.is_required() {
                required.push(json!(param.name));
            }
        }
        json!({
            "name": self.name,
            "description": self.description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
            },
        })
    }

    /// One-line listing for prompt construction.
    ///
    /// Format: `- name(param1: type, param2?: type): description`
    pub fn to_prompt_line(&self) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| {
                let optional = if p.is_required() { "" } else { "?" };
                format!("{}{}: {}", p.name, optional, p.annotation.display_name())
            })
            .collect();
        format!("- {}({}): {}", self.name, params.join(", "), self.description)
    }

    /// Pre-check arguments against the declared parameters.
    ///
    /// Returns a list of problems (empty = valid). Invocation itself never
    /// calls this; validation is the runtime's or the handler's concern.
    pub fn validate_args(&self, args: &Value) -> Vec<String> {
        let Some(map) = args.as_object() else {
            return vec!["arguments must be a JSON object".to_string()];
        };
        let mut errors = Vec::new();
        for param in &self.params {
            if param.is_required() && !map.contains_key(&param.name) {
                errors.push(format!("missing required argument: {}", param.name));
            }
        }
        for (key, value) in map {
            if key == CONTEXT_ARG {
                continue;
            }
            match self.params.iter().find(|p| p.name == *key) {
                Some(param) => {
                    if let Err(e) = param.annotation.validate(value) {
                        errors.push(format!("argument '{}': {}", key, e));
                    }
                }
                None => errors.push(format!("unknown argument: {}", key)),
            }
        }
        errors
    }

    /// Invoke the tool: strip the reserved context argument, delegate to the
    /// client wrapper's generic dispatch, serialize the result.
    pub async fn call(&self, mut args: Map<String, Value>) -> Result<String> {
        args.remove(CONTEXT_ARG);
        let result = self.api.run(&self.name, Value::Object(args)).await?;
        Ok(serde_json::to_string(&result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::registry;
    use crate::types::Context;

    fn test_api() -> Arc<PayPalApi> {
        Arc::new(PayPalApi::new("id", "secret", Context::default()).unwrap())
    }

    fn create_order_tool() -> Tool {
        let descriptor = registry::find("create_order").unwrap();
        build_tool(test_api(), descriptor).unwrap()
    }

    #[test]
    fn test_empty_method_rejected() {
        let mut descriptor = registry::find("create_order").unwrap().clone();
        descriptor.method = String::new();
        assert!(build_tool(test_api(), &descriptor).is_err());
    }

    #[test]
    fn test_params_mirror_annotation_fields() {
        let tool = create_order_tool();
        let descriptor = registry::find("create_order").unwrap();
        let names: Vec<&str> = tool.params().iter().map(|p| p.name.as_str()).collect();
        let expected: Vec<&str> = descriptor.args.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_params_are_simplified() {
        let tool = create_order_tool();
        let return_url = tool
            .params()
            .iter()
            .find(|p| p.name == "return_url")
            .unwrap();
        // optional url → optional string
        assert_eq!(
            return_url.annotation,
            Annotation::optional(Annotation::String)
        );
        assert!(!return_url.is_required());

        let currency = tool
            .params()
            .iter()
            .find(|p| p.name == "currency_code")
            .unwrap();
        assert_eq!(currency.annotation, Annotation::String);
        assert!(currency.is_required());
    }

    #[test]
    fn test_declaration_excludes_optionals_from_required() {
        let tool = create_order_tool();
        let declaration = tool.declaration();
        assert_eq!(declaration["name"], "create_order");
        let required: Vec<&str> = declaration["parameters"]["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(required.contains(&"currency_code"));
        assert!(required.contains(&"items"));
        assert!(!required.contains(&"notes"));
        // Context never leaks into the declared surface.
        assert!(declaration["parameters"]["properties"]
            .get(CONTEXT_ARG)
            .is_none());
    }

    #[test]
    fn test_prompt_line_format() {
        let descriptor = registry::find("capture_order").unwrap();
        let tool = build_tool(test_api(), descriptor).unwrap();
        assert_eq!(
            tool.to_prompt_line(),
            format!(
                "- capture_order(order_id: string): {}",
                descriptor.description
            )
        );
    }

    #[test]
    fn test_validate_args_reports_problems() {
        let tool = create_order_tool();
        let errors = tool.validate_args(&json!({
            "currency_code": 42,
            "bogus": true,
            "context": {"ignored": true},
        }));
        assert!(errors.iter().any(|e| e.contains("missing required argument: items")));
        assert!(errors.iter().any(|e| e.contains("argument 'currency_code'")));
        assert!(errors.iter().any(|e| e.contains("unknown argument: bogus")));
        assert!(!errors.iter().any(|e| e.contains("context")));
    }

    #[test]
    fn test_validate_args_accepts_omitted_optionals() {
        let tool = create_order_tool();
        let errors = tool.validate_args(&json!({
            "currency_code": "USD",
            "items": [{"name": "hoodie", "quantity": 1, "price": 49.99}],
        }));
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    }
}

//! Tool descriptors — declarative records describing one REST operation.

use crate::client::PayPalClient;
use crate::schema::ObjectAnnotation;
use crate::types::{ActionMap, Configuration, Result};
use futures::future::BoxFuture;
use serde_json::Value;

/// Handler signature: one REST operation over the shared client, invoked
/// with the raw argument object.
pub type Handler = for<'a> fn(&'a PayPalClient, Value) -> BoxFuture<'a, Result<Value>>;

/// Static record of one REST operation.
///
/// `args` is the rich annotation consumed by the function-calling tool
/// variant; `request_schema` is the generated Draft-dialect JSON Schema
/// consumed by the OpenAPI variant. Both describe the same parameter model.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    /// REST method name; doubles as the generated tool's visible name and
    /// the OpenAPI operation id.
    pub method: String,
    /// Human description shown to the agent.
    pub description: String,
    /// Rich parameter annotation tree.
    pub args: ObjectAnnotation,
    /// Request-body JSON Schema in the generator's dialect.
    pub request_schema: Value,
    /// (resource, action) pairs this operation belongs to.
    pub actions: ActionMap,
    /// Execution entry point.
    pub handler: Handler,
}

impl ToolDescriptor {
    /// A descriptor is allowed when at least one of its (resource, action)
    /// pairs is enabled in the configuration.
    pub fn is_allowed(&self, configuration: &Configuration) -> bool {
        self.actions.iter().any(|(resource, actions)| {
            actions
                .keys()
                .any(|action| configuration.is_action_enabled(resource, action))
        })
    }
}

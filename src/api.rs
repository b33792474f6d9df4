//! Generic tool dispatch over the PayPal client.
//!
//! `run` is the single entry point every generated tool delegates to: it
//! resolves the registry descriptor for a method name and invokes its
//! handler with the raw argument object. Validation happens inside the
//! handler, not here.

use crate::client::PayPalClient;
use crate::tools::registry;
use crate::types::{Context, Error, Result};
use serde_json::Value;

/// PayPal API facade shared by all tools built from one toolkit.
#[derive(Debug)]
pub struct PayPalApi {
    client: PayPalClient,
}

impl PayPalApi {
    pub fn new(
        client_id: impl Into<String>,
        secret: impl Into<String>,
        context: Context,
    ) -> Result<Self> {
        Ok(Self {
            client: PayPalClient::new(client_id, secret, context)?,
        })
    }

    /// Wrap an already constructed client.
    pub fn from_client(client: PayPalClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &PayPalClient {
        &self.client
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn context(&self) -> &Context {
        self.client.context()
    }

    /// Dispatch a tool invocation by registry method name.
    pub async fn run(&self, method: &str, args: Value) -> Result<Value> {
        let descriptor = registry::find(method)
            .ok_or_else(|| Error::not_found(format!("unknown tool method: {}", method)))?;
        tracing::debug!(method, "dispatching tool call");
        (descriptor.handler)(&self.client, args).await
    }
}

//! The toolkit — configured entry point for hosting agent runtimes.
//!
//! Filters the descriptor registry down to the operations the configuration
//! enables and builds one tool per survivor, all sharing a single client
//! and execution context.

use crate::api::PayPalApi;
use crate::tools::{build_tool, registry, RestTool, Tool, ToolDescriptor};
use crate::types::{Configuration, Context, Error, Result};
use std::sync::Arc;

/// PayPal toolkit for LLM agent runtimes.
#[derive(Debug)]
pub struct PayPalToolkit {
    api: Arc<PayPalApi>,
    context: Context,
    descriptors: Vec<&'static ToolDescriptor>,
    tools: Vec<Tool>,
}

impl PayPalToolkit {
    /// Integration source identifier stamped into the shared context.
    pub const SOURCE: &'static str = "RUST";

    /// Build a toolkit from API credentials and an optional configuration.
    ///
    /// An omitted configuration enables nothing: the toolkit constructs
    /// successfully and exposes zero tools.
    pub fn new(
        client_id: impl Into<String>,
        secret: impl Into<String>,
        configuration: Option<Configuration>,
    ) -> Result<Self> {
        let configuration = configuration.unwrap_or_default();
        let mut context = configuration.context.clone().unwrap_or_default();
        context.source = Some(Self::SOURCE.to_string());

        let api = Arc::new(PayPalApi::new(client_id, secret, context.clone())?);

        let descriptors: Vec<&'static ToolDescriptor> = registry::all()
            .iter()
            .filter(|descriptor| descriptor.is_allowed(&configuration))
            .collect();
        let mut tools = Vec::with_capacity(descriptors.len());
        for descriptor in &descriptors {
            tools.push(build_tool(api.clone(), descriptor)?);
        }
        tracing::info!(
            enabled = tools.len(),
            registered = registry::all().len(),
            "paypal toolkit initialized"
        );
        Ok(Self {
            api,
            context,
            descriptors,
            tools,
        })
    }

    /// Build a toolkit with credentials from `PAYPAL_CLIENT_ID` and
    /// `PAYPAL_CLIENT_SECRET`.
    pub fn from_env(configuration: Option<Configuration>) -> Result<Self> {
        let client_id = std::env::var("PAYPAL_CLIENT_ID")
            .map_err(|_| Error::validation("PAYPAL_CLIENT_ID is not set"))?;
        let secret = std::env::var("PAYPAL_CLIENT_SECRET")
            .map_err(|_| Error::validation("PAYPAL_CLIENT_SECRET is not set"))?;
        Self::new(client_id, secret, configuration)
    }

    /// The enabled function-calling tools.
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// OpenAPI-document variant of the enabled tools, built on demand from
    /// the same filtered descriptors.
    pub fn rest_tools(&self) -> Result<Vec<RestTool>> {
        self.descriptors
            .iter()
            .map(|descriptor| RestTool::build(self.api.clone(), descriptor))
            .collect()
    }

    /// The shared execution context (source already stamped).
    pub fn context(&self) -> &Context {
        &self.context
    }
}

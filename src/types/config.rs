//! Configuration structures.
//!
//! `Configuration` is the read-only input that decides which REST operations
//! the toolkit exposes; `Context` is the shared request-scoped metadata every
//! outbound call carries.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Per-action enablement: resource name → action name → enabled flag.
///
/// Example: `{"orders": {"create": true, "capture": false}}`.
pub type ActionMap = HashMap<String, HashMap<String, bool>>;

/// Execution context shared by every tool built from one toolkit instance.
///
/// Constructed once per toolkit instantiation and not mutated afterwards,
/// except for the `source` stamp applied during construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Context {
    /// PayPal merchant id, when acting on behalf of a merchant.
    pub merchant_id: Option<String>,

    /// Target the sandbox environment. Live mode is an explicit opt-out.
    pub sandbox: bool,

    /// Pre-acquired access token. When absent, the client fetches one via
    /// the OAuth2 client-credentials flow.
    pub access_token: Option<String>,

    /// Idempotency key sent as `PayPal-Request-Id` when present.
    pub request_id: Option<String>,

    /// Opaque tenant context forwarded as `PayPal-Tenant-Context`.
    pub tenant_context: Option<Value>,

    /// Log outbound request and response bodies at debug level.
    pub debug: bool,

    /// Integration source identifier, stamped by the toolkit.
    pub source: Option<String>,

    /// Open-ended extension fields. `base_url` overrides the environment
    /// derived endpoint.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            merchant_id: None,
            sandbox: true,
            access_token: None,
            request_id: None,
            tenant_context: None,
            debug: false,
            source: None,
            extra: HashMap::new(),
        }
    }
}

impl Context {
    /// Base URL override from the extension map, when present.
    pub fn base_url_override(&self) -> Option<&str> {
        self.extra.get("base_url").and_then(|v| v.as_str())
    }
}

/// Toolkit configuration: enabled actions plus an optional context.
///
/// The default configuration enables nothing, so a toolkit built from it
/// exposes zero tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Configuration {
    /// Enabled (resource, action) pairs.
    #[serde(default)]
    pub actions: ActionMap,

    /// Execution context. `Context::default()` is used when absent.
    #[serde(default)]
    pub context: Option<Context>,
}

impl Configuration {
    pub fn new(actions: ActionMap) -> Self {
        Self {
            actions,
            context: None,
        }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Check whether a single (resource, action) pair is enabled.
    pub fn is_action_enabled(&self, resource: &str, action: &str) -> bool {
        self.actions
            .get(resource)
            .and_then(|actions| actions.get(action))
            .copied()
            .unwrap_or(false)
    }
}

//! PayPal HTTP client wrapper.
//!
//! Owns credentials, token acquisition, and header assembly. Tool handlers
//! only see `get`/`post` returning decoded JSON; transport and API errors
//! propagate unchanged with no retry.

use crate::types::{Context, Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use std::fmt;
use tokio::sync::RwLock;

const SANDBOX_BASE_URL: &str = "https://api-m.sandbox.paypal.com";
const LIVE_BASE_URL: &str = "https://api-m.paypal.com";

/// HTTP client bound to one set of credentials and one execution context.
pub struct PayPalClient {
    http: reqwest::Client,
    client_id: Option<String>,
    secret: Option<String>,
    context: Context,
    base_url: String,
    // Cached bearer token; seeded from the context when one was provided.
    access_token: RwLock<Option<String>>,
}

impl PayPalClient {
    pub fn new(
        client_id: impl Into<String>,
        secret: impl Into<String>,
        context: Context,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent(&context))
            .build()?;
        let base_url = resolve_base_url(&context);
        let access_token = RwLock::new(context.access_token.clone());
        Ok(Self {
            http,
            client_id: Some(client_id.into()),
            secret: Some(secret.into()),
            context,
            base_url,
            access_token,
        })
    }

    /// Build a client from a pre-acquired access token alone. Token refresh
    /// is unavailable in this mode.
    pub fn from_access_token(access_token: impl Into<String>, context: Context) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent(&context))
            .build()?;
        let base_url = resolve_base_url(&context);
        Ok(Self {
            http,
            client_id: None,
            secret: None,
            context,
            base_url,
            access_token: RwLock::new(Some(access_token.into())),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// GET a PayPal REST path, returning the decoded response body.
    pub async fn get(&self, path: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "paypal GET");
        let response = self
            .http
            .get(&url)
            .headers(self.request_headers().await?)
            .send()
            .await?;
        self.decode(response).await
    }

    /// POST a PayPal REST path with an optional JSON payload, returning the
    /// decoded response body.
    pub async fn post(&self, path: &str, payload: Option<&Value>) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.post(&url).headers(self.request_headers().await?);
        if let Some(payload) = payload {
            if self.context.debug {
                tracing::debug!(%url, body = %payload, "paypal POST");
            } else {
                tracing::debug!(%url, "paypal POST");
            }
            request = request.json(payload);
        } else {
            tracing::debug!(%url, "paypal POST (empty body)");
        }
        let response = request.send().await?;
        self.decode(response).await
    }

    async fn decode(&self, response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "paypal api returned an error");
            return Err(Error::api(status.as_u16(), text));
        }
        if text.is_empty() {
            return Ok(Value::Null);
        }
        let value: Value = serde_json::from_str(&text)?;
        if self.context.debug {
            tracing::debug!(body = %value, "paypal response");
        }
        Ok(value)
    }

    /// Cached token, the context-provided one, or a freshly fetched one.
    async fn bearer_token(&self) -> Result<String> {
        if let Some(token) = self.access_token.read().await.clone() {
            return Ok(token);
        }
        let token = self.fetch_access_token().await?;
        *self.access_token.write().await = Some(token.clone());
        Ok(token)
    }

    /// OAuth2 client-credentials grant against `/v1/oauth2/token`.
    async fn fetch_access_token(&self) -> Result<String> {
        let (Some(client_id), Some(secret)) = (&self.client_id, &self.secret) else {
            return Err(Error::auth(
                "no client credentials available to fetch an access token",
            ));
        };
        let credentials = STANDARD.encode(format!("{client_id}:{secret}"));
        let url = format!("{}/v1/oauth2/token", self.base_url);
        tracing::debug!(%url, "fetching access token");
        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, format!("Basic {credentials}"))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::auth(format!(
                "failed to fetch access token (status {}): {}",
                status.as_u16(),
                body
            )));
        }
        let body: Value = response.json().await?;
        body.get("access_token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::auth("token response missing access_token"))
    }

    async fn request_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let token = self.bearer_token().await?;
        headers.insert(
            AUTHORIZATION,
            header_value(&format!("Bearer {token}"), "access token")?,
        );

        if let Some(request_id) = &self.context.request_id {
            headers.insert("PayPal-Request-Id", header_value(request_id, "request id")?);
        }
        if let Some(tenant) = &self.context.tenant_context {
            let serialized = serde_json::to_string(tenant)?;
            headers.insert(
                "PayPal-Tenant-Context",
                header_value(&serialized, "tenant context")?,
            );
        }
        Ok(headers)
    }
}

impl fmt::Debug for PayPalClient {
    // Credentials and tokens stay out of debug output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayPalClient")
            .field("base_url", &self.base_url)
            .field("sandbox", &self.context.sandbox)
            .finish_non_exhaustive()
    }
}

fn header_value(raw: &str, field: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(raw)
        .map_err(|_| Error::validation(format!("{} contains invalid header characters", field)))
}

fn resolve_base_url(context: &Context) -> String {
    if let Some(base_url) = context.base_url_override() {
        return base_url.trim_end_matches('/').to_string();
    }
    if context.sandbox {
        SANDBOX_BASE_URL.to_string()
    } else {
        LIVE_BASE_URL.to_string()
    }
}

fn user_agent(context: &Context) -> String {
    format!(
        "paypal-agent-toolkit-rs/{} ({})",
        env!("CARGO_PKG_VERSION"),
        context.source.as_deref().unwrap_or("unspecified")
    )
}

//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation and provide
//! clear error messages with context.

use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the toolkit.
#[derive(Error, Debug)]
pub enum Error {
    /// Validation errors (bad tool arguments, malformed configuration).
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown tool method or missing resource.
    #[error("not found: {0}")]
    NotFound(String),

    /// Credential or token acquisition failures.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Non-success response from the PayPal API, body carried verbatim.
    #[error("paypal api error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// HTTP transport errors.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Convenience constructors
impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }
}

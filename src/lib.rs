//! # PayPal Agent Toolkit
//!
//! Adapts PayPal REST API operations into tool objects consumable by an
//! LLM-agent framework's function-calling mechanism:
//! - Draft-2020-12 → OpenAPI 3.0 schema dialect conversion
//! - Recursive simplification of rich parameter annotations into the
//!   reduced type vocabulary agent runtimes accept
//! - A tool factory producing callables with declarative parameter lists
//! - A toolkit filtering the operation registry by per-resource,
//!   per-action configuration
//!
//! ## Architecture
//!
//! ```text
//!   Configuration ──┐
//!                   ▼
//!   registry ──► PayPalToolkit ──► [Tool | RestTool] ──► PayPalApi ──► PayPal REST
//!                   │                    ▲
//!                   └── Context ─────────┘ (shared, stamped once)
//! ```

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

// Re-export public API
pub mod api;
pub mod client;
pub mod orders;
pub mod schema;
pub mod toolkit;
pub mod tools;
pub mod types;

// Internal utilities
pub mod observability;

pub use toolkit::PayPalToolkit;
pub use tools::{RestTool, Tool};
pub use types::{Configuration, Context, Error, Result};

//! Core types for the toolkit.
//!
//! This module provides foundational types used throughout the system:
//! - Error handling (`Error`, `Result`)
//! - Configuration (`Configuration`, `Context`, `ActionMap`)

pub mod config;
pub mod errors;

pub use config::{ActionMap, Configuration, Context};
pub use errors::{Error, Result};

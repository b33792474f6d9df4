//! Tool infrastructure — descriptors, registry, factory, OpenAPI variant.
//!
//! The registry owns declarative operation metadata; the factory turns a
//! descriptor into the callable surface an agent runtime consumes.

pub mod descriptor;
pub mod factory;
pub mod openapi;
pub mod registry;

pub use descriptor::{Handler, ToolDescriptor};
pub use factory::{build_tool, ParamDef, Tool, CONTEXT_ARG};
pub use openapi::{openapi_fragment, RestTool};

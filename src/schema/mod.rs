//! Schema plumbing — dialect conversion and annotation simplification.
//!
//! Two translation layers sit between the validated request models and what
//! an agent runtime accepts: `dialect` rewrites Draft-2020-12 JSON Schema
//! trees into the OpenAPI 3.0 dialect, `simplify` reduces rich parameter
//! annotations to the runtime's type vocabulary.

pub mod annotation;
pub mod dialect;
pub mod simplify;

pub use annotation::{Annotation, Bounds, FieldDef, ObjectAnnotation};
pub use dialect::json_schema_to_oas3;
pub use simplify::simplify;

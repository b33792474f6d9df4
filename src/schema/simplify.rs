//! Type annotation simplification.
//!
//! Function-declaration generators in agent runtimes cannot represent the
//! full richness of the validation models (URL subtypes, literals, bounds).
//! `simplify` reduces an annotation tree to primitives, containers, optional
//! wrappers, and plain objects, preserving structure.

use crate::schema::annotation::{Annotation, FieldDef, ObjectAnnotation};

/// Maximum simplification depth; deeper nodes degrade to `Any`.
pub const MAX_DEPTH: usize = 32;

/// Reduce a rich annotation to the runtime-facing vocabulary.
///
/// - URL-like subtypes and literals become `String`
/// - constrained scalars lose their bounds
/// - metadata wrappers are stripped
/// - optional wrappers are preserved around the simplified inner type,
///   never doubled
/// - containers simplify element-wise
/// - objects are rebuilt with every field simplified and unknown fields
///   forbidden
pub fn simplify(annotation: &Annotation) -> Annotation {
    simplify_at(annotation, 0)
}

fn simplify_at(annotation: &Annotation, depth: usize) -> Annotation {
    if depth > MAX_DEPTH {
        return Annotation::Any;
    }
    match annotation {
        Annotation::Url => Annotation::String,
        Annotation::Literal(_) => Annotation::String,
        Annotation::Constrained { base, .. } => simplify_at(base, depth + 1),
        Annotation::Annotated { base, .. } => simplify_at(base, depth + 1),
        Annotation::Optional(inner) => match simplify_at(inner, depth + 1) {
            simplified @ Annotation::Optional(_) => simplified,
            simplified => Annotation::Optional(Box::new(simplified)),
        },
        Annotation::List(item) => Annotation::List(Box::new(simplify_at(item, depth + 1))),
        Annotation::Map { key, value } => Annotation::Map {
            key: Box::new(simplify_at(key, depth + 1)),
            value: Box::new(simplify_at(value, depth + 1)),
        },
        Annotation::Object(obj) => Annotation::Object(ObjectAnnotation {
            name: obj.name.clone(),
            fields: obj
                .fields
                .iter()
                .map(|field| FieldDef {
                    name: field.name.clone(),
                    annotation: simplify_at(&field.annotation, depth + 1),
                    description: field.description.clone(),
                })
                .collect(),
            deny_unknown_fields: true,
        }),
        other => other.clone(),
    }
}

//! JSON Schema dialect conversion: Draft 2020-12 → OpenAPI 3.0.
//!
//! Agent runtimes that build REST tools from OpenAPI documents reject the
//! newer schema dialect emitted by schema generators (type arrays with
//! `"null"`, nullable `anyOf` unions, `$defs` references). The converter
//! rewrites such trees into the 3.0 dialect. Rules are applied depth-first
//! and compose; malformed nodes pass through unchanged rather than raising.

use serde_json::{Map, Value};

/// Maximum conversion depth. Nodes nested deeper are returned unconverted,
/// consistent with the pass-through policy for malformed input.
pub const MAX_DEPTH: usize = 64;

/// Convert a Draft-2020-12-style schema tree into the OpenAPI 3.0 dialect.
///
/// Pure function over a copy of the input; the argument is never mutated.
pub fn json_schema_to_oas3(schema: &Value) -> Value {
    convert(schema.clone(), 0)
}

fn convert(node: Value, depth: usize) -> Value {
    if depth > MAX_DEPTH {
        return node;
    }
    let mut map = match node {
        Value::Object(map) => map,
        // Not a schema object (bool schema, bare value): leave unchanged.
        other => return other,
    };

    // 1) Nullable shortcut: type: [T, "null"] → type: T, nullable: true
    if let Some(Value::Array(types)) = map.get("type") {
        if types.iter().any(|t| t == "null") {
            let remaining = types.iter().find(|t| *t != "null").cloned();
            map.insert("nullable".to_string(), Value::Bool(true));
            match remaining {
                Some(t) => {
                    map.insert("type".to_string(), t);
                }
                None => {
                    map.remove("type");
                }
            }
        }
    }

    // 2) Collapse simple anyOf + null
    if let Some(any_of) = map.remove("anyOf") {
        match any_of {
            Value::Array(variants) => {
                let null_branches = variants.iter().filter(|v| is_null_type(v)).count();
                if variants.len() == 2 && null_branches == 1 {
                    // The whole node becomes the converted non-null branch.
                    if let Some(non_null) = variants.into_iter().find(|v| !is_null_type(v)) {
                        match convert(non_null, depth + 1) {
                            Value::Object(mut branch) => {
                                branch.insert("nullable".to_string(), Value::Bool(true));
                                map = branch;
                            }
                            other => return other,
                        }
                    }
                } else {
                    // Keep only anyOf and description; drop all other siblings.
                    let description = map.get("description").cloned();
                    let mut replacement = Map::new();
                    replacement.insert(
                        "anyOf".to_string(),
                        Value::Array(
                            variants
                                .into_iter()
                                .map(|v| convert(v, depth + 1))
                                .collect(),
                        ),
                    );
                    if let Some(desc) = description {
                        replacement.insert("description".to_string(), desc);
                    }
                    map = replacement;
                }
            }
            other => {
                map.insert("anyOf".to_string(), other);
            }
        }
    }

    // 3) Flatten allOf: convert members and merge, later members win
    if let Some(all_of) = map.remove("allOf") {
        match all_of {
            Value::Array(parts) => {
                for part in parts {
                    if let Value::Object(converted) = convert(part, depth + 1) {
                        for (key, value) in converted {
                            map.insert(key, value);
                        }
                    }
                }
            }
            other => {
                map.insert("allOf".to_string(), other);
            }
        }
    }

    // 4) oneOf → first listed variant (documented policy choice)
    if let Some(one_of) = map.remove("oneOf") {
        match one_of {
            Value::Array(variants) => {
                if let Some(first) = variants.into_iter().next() {
                    if let Value::Object(converted) = convert(first, depth + 1) {
                        for (key, value) in converted {
                            map.insert(key, value);
                        }
                    }
                }
            }
            other => {
                map.insert("oneOf".to_string(), other);
            }
        }
    }

    // 5) Recurse into properties (per key) and items (node or tuple list)
    if let Some(properties) = map.remove("properties") {
        let converted = match properties {
            Value::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, convert(value, depth + 1)))
                    .collect(),
            ),
            other => other,
        };
        map.insert("properties".to_string(), converted);
    }
    if let Some(items) = map.remove("items") {
        let converted = match items {
            Value::Array(tuple) => Value::Array(
                tuple
                    .into_iter()
                    .map(|item| convert(item, depth + 1))
                    .collect(),
            ),
            single => convert(single, depth + 1),
        };
        map.insert("items".to_string(), converted);
    }

    // 6) Fix ref spelling and remap definition roots
    if !map.contains_key("$ref") {
        if let Some(reference) = map.remove("ref") {
            match reference {
                Value::String(path) => {
                    map.insert("$ref".to_string(), Value::String(remap_ref(&path)));
                }
                other => {
                    map.insert("ref".to_string(), other);
                }
            }
        }
    }

    Value::Object(map)
}

fn is_null_type(schema: &Value) -> bool {
    schema.get("type").is_some_and(|t| t == "null")
}

/// Remap definition roots to the OpenAPI components tree. Both the 2020-12
/// spelling (`$defs`) and the legacy one (`definitions`) occur in generated
/// schemas.
pub(crate) fn remap_ref(path: &str) -> String {
    path.replace("#/$defs", "#/components/schemas")
        .replace("#/definitions", "#/components/schemas")
}

//! Parameter annotation vocabulary.
//!
//! The descriptor registry declares each operation's arguments with the full
//! vocabulary below; tool construction reduces it (see
//! [`simplify`](super::simplify)) to the subset agent runtimes understand.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Scalar constraints carried by [`Annotation::Constrained`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl Bounds {
    pub fn length(min: u64, max: u64) -> Self {
        Self {
            min_length: Some(min),
            max_length: Some(max),
            ..Self::default()
        }
    }

    pub fn range(minimum: f64, maximum: f64) -> Self {
        Self {
            minimum: Some(minimum),
            maximum: Some(maximum),
            ..Self::default()
        }
    }

    /// Check a JSON value against the length/range bounds. The pattern is
    /// carried for schema rendering only and is not enforced here.
    fn check(&self, value: &Value) -> Result<(), String> {
        if let Some(s) = value.as_str() {
            let len = s.chars().count() as u64;
            if let Some(min) = self.min_length {
                if len < min {
                    return Err(format!("string shorter than {} characters", min));
                }
            }
            if let Some(max) = self.max_length {
                if len > max {
                    return Err(format!("string longer than {} characters", max));
                }
            }
        }
        if let Some(n) = value.as_f64() {
            if let Some(minimum) = self.minimum {
                if n < minimum {
                    return Err(format!("value below minimum {}", minimum));
                }
            }
            if let Some(maximum) = self.maximum {
                if n > maximum {
                    return Err(format!("value above maximum {}", maximum));
                }
            }
        }
        Ok(())
    }
}

/// One named field of a structured object annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub annotation: Annotation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldDef {
    pub fn new(name: &str, annotation: Annotation) -> Self {
        Self {
            name: name.to_string(),
            annotation,
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// A field is required unless its annotation is optional-wrapped.
    pub fn is_required(&self) -> bool {
        !matches!(self.annotation, Annotation::Optional(_))
    }
}

/// A structured object type with named, annotated fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectAnnotation {
    pub name: String,
    pub fields: Vec<FieldDef>,
    pub deny_unknown_fields: bool,
}

impl ObjectAnnotation {
    pub fn new(name: &str, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.to_string(),
            fields,
            deny_unknown_fields: false,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Parameter type annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Annotation {
    String,
    Integer,
    Float,
    Boolean,
    Any,
    /// URL-valued string subtype.
    Url,
    /// Fixed set of admissible string constants.
    Literal(Vec<String>),
    /// Scalar subtype narrowed by bounds (length, range, pattern).
    Constrained {
        base: Box<Annotation>,
        bounds: Bounds,
    },
    /// Annotation wrapped with documentation metadata.
    Annotated {
        base: Box<Annotation>,
        description: String,
    },
    Optional(Box<Annotation>),
    List(Box<Annotation>),
    Map {
        key: Box<Annotation>,
        value: Box<Annotation>,
    },
    Object(ObjectAnnotation),
}

impl Annotation {
    pub fn optional(inner: Annotation) -> Self {
        Annotation::Optional(Box::new(inner))
    }

    pub fn list(item: Annotation) -> Self {
        Annotation::List(Box::new(item))
    }

    pub fn literal(values: &[&str]) -> Self {
        Annotation::Literal(values.iter().map(|v| (*v).to_string()).collect())
    }

    pub fn constrained(base: Annotation, bounds: Bounds) -> Self {
        Annotation::Constrained {
            base: Box::new(base),
            bounds,
        }
    }

    /// Human-readable type name for prompt generation.
    pub fn display_name(&self) -> String {
        match self {
            Annotation::String => "string".to_string(),
            Annotation::Integer => "integer".to_string(),
            Annotation::Float => "number".to_string(),
            Annotation::Boolean => "boolean".to_string(),
            Annotation::Any => "any".to_string(),
            Annotation::Url => "url".to_string(),
            Annotation::Literal(values) => format!("enum({})", values.join("|")),
            Annotation::Constrained { base, .. } => base.display_name(),
            Annotation::Annotated { base, .. } => base.display_name(),
            Annotation::Optional(inner) => format!("{}?", inner.display_name()),
            Annotation::List(item) => format!("{}[]", item.display_name()),
            Annotation::Map { key, value } => {
                format!("map<{}, {}>", key.display_name(), value.display_name())
            }
            Annotation::Object(obj) => obj.name.clone(),
        }
    }

    /// Validate a JSON value against this annotation.
    ///
    /// The tool factory never calls this at invocation time; it exists for
    /// the hosting runtime to pre-check arguments.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        match self {
            Annotation::String | Annotation::Url => {
                if value.is_string() {
                    Ok(())
                } else {
                    Err(format!("expected string, got {}", value_type_name(value)))
                }
            }
            Annotation::Integer => {
                if value.is_i64() || value.is_u64() {
                    Ok(())
                } else {
                    Err(format!("expected integer, got {}", value_type_name(value)))
                }
            }
            Annotation::Float => {
                if value.is_number() {
                    Ok(())
                } else {
                    Err(format!("expected number, got {}", value_type_name(value)))
                }
            }
            Annotation::Boolean => {
                if value.is_boolean() {
                    Ok(())
                } else {
                    Err(format!("expected boolean, got {}", value_type_name(value)))
                }
            }
            Annotation::Any => Ok(()),
            Annotation::Literal(values) => {
                if let Some(s) = value.as_str() {
                    if values.iter().any(|v| v == s) {
                        Ok(())
                    } else {
                        Err(format!(
                            "invalid value '{}', expected one of: {}",
                            s,
                            values.join(", ")
                        ))
                    }
                } else {
                    Err(format!("expected string, got {}", value_type_name(value)))
                }
            }
            Annotation::Constrained { base, bounds } => {
                base.validate(value)?;
                bounds.check(value)
            }
            Annotation::Annotated { base, .. } => base.validate(value),
            Annotation::Optional(inner) => {
                if value.is_null() {
                    Ok(())
                } else {
                    inner.validate(value)
                }
            }
            Annotation::List(item) => {
                if let Some(entries) = value.as_array() {
                    for (i, entry) in entries.iter().enumerate() {
                        item.validate(entry)
                            .map_err(|e| format!("at index {}: {}", i, e))?;
                    }
                    Ok(())
                } else {
                    Err(format!("expected array, got {}", value_type_name(value)))
                }
            }
            Annotation::Map { value: val_t, .. } => {
                // JSON object keys are strings; only entry values carry type.
                if let Some(entries) = value.as_object() {
                    for (key, entry) in entries {
                        val_t
                            .validate(entry)
                            .map_err(|e| format!("at key '{}': {}", key, e))?;
                    }
                    Ok(())
                } else {
                    Err(format!("expected object, got {}", value_type_name(value)))
                }
            }
            Annotation::Object(obj) => {
                let Some(entries) = value.as_object() else {
                    return Err(format!("expected object, got {}", value_type_name(value)));
                };
                for field in &obj.fields {
                    match entries.get(&field.name) {
                        Some(entry) => field
                            .annotation
                            .validate(entry)
                            .map_err(|e| format!("field '{}': {}", field.name, e))?,
                        None if field.is_required() => {
                            return Err(format!("missing required field: {}", field.name));
                        }
                        None => {}
                    }
                }
                if obj.deny_unknown_fields {
                    for key in entries.keys() {
                        if obj.field(key).is_none() {
                            return Err(format!("unknown field: {}", key));
                        }
                    }
                }
                Ok(())
            }
        }
    }

    /// Render the annotation as a function-declaration schema fragment.
    ///
    /// Intended for the reduced subset produced by simplification; rich
    /// variants render their closest schema form so the output is always
    /// usable.
    pub fn to_schema_value(&self) -> Value {
        match self {
            Annotation::String => json!({"type": "string"}),
            Annotation::Integer => json!({"type": "integer"}),
            Annotation::Float => json!({"type": "number"}),
            Annotation::Boolean => json!({"type": "boolean"}),
            Annotation::Any => json!({}),
            Annotation::Url => json!({"type": "string", "format": "uri"}),
            Annotation::Literal(values) => json!({"type": "string", "enum": values}),
            Annotation::Constrained { base, bounds } => {
                let mut schema = base.to_schema_value();
                if let Value::Object(ref mut map) = schema {
                    if let Some(min) = bounds.min_length {
                        map.insert("minLength".to_string(), json!(min));
                    }
                    if let Some(max) = bounds.max_length {
                        map.insert("maxLength".to_string(), json!(max));
                    }
                    if let Some(minimum) = bounds.minimum {
                        map.insert("minimum".to_string(), json!(minimum));
                    }
                    if let Some(maximum) = bounds.maximum {
                        map.insert("maximum".to_string(), json!(maximum));
                    }
                    if let Some(pattern) = &bounds.pattern {
                        map.insert("pattern".to_string(), json!(pattern));
                    }
                }
                schema
            }
            Annotation::Annotated { base, description } => {
                let mut schema = base.to_schema_value();
                if let Value::Object(ref mut map) = schema {
                    map.insert("description".to_string(), json!(description));
                }
                schema
            }
            Annotation::Optional(inner) => {
                let mut schema = inner.to_schema_value();
                if let Value::Object(ref mut map) = schema {
                    map.insert("nullable".to_string(), Value::Bool(true));
                }
                schema
            }
            Annotation::List(item) => json!({"type": "array", "items": item.to_schema_value()}),
            Annotation::Map { value, .. } => {
                json!({"type": "object", "additionalProperties": value.to_schema_value()})
            }
            Annotation::Object(obj) => {
                let mut properties = Map::new();
                let mut required = Vec::new();
                for field in &obj.fields {
                    let mut schema = field.annotation.to_schema_value();
                    if let (Value::Object(map), Some(description)) =
                        (&mut schema, &field.description)
                    {
                        map.entry("description".to_string())
                            .or_insert_with(|| json!(description));
                    }
                    properties.insert(field.name.clone(), schema);
                    if field.is_required() {
                        required.push(json!(field.name));
                    }
                }
                json!({
                    "type": "object",
                    "title": obj.name,
                    "properties": properties,
                    "required": required,
                    "additionalProperties": !obj.deny_unknown_fields,
                })
            }
        }
    }
}

fn value_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(Annotation::String.display_name(), "string");
        assert_eq!(
            Annotation::optional(Annotation::Integer).display_name(),
            "integer?"
        );
        assert_eq!(
            Annotation::list(Annotation::Float).display_name(),
            "number[]"
        );
        assert_eq!(
            Annotation::literal(&["USD", "EUR"]).display_name(),
            "enum(USD|EUR)"
        );
        assert_eq!(
            Annotation::Map {
                key: Box::new(Annotation::String),
                value: Box::new(Annotation::Any),
            }
            .display_name(),
            "map<string, any>"
        );
    }

    #[test]
    fn test_validate_primitives() {
        assert!(Annotation::String.validate(&json!("ok")).is_ok());
        assert!(Annotation::String.validate(&json!(1)).is_err());
        assert!(Annotation::Integer.validate(&json!(3)).is_ok());
        assert!(Annotation::Integer.validate(&json!(3.5)).is_err());
        assert!(Annotation::Float.validate(&json!(3)).is_ok());
        assert!(Annotation::Any.validate(&json!({"free": "form"})).is_ok());
    }

    #[test]
    fn test_validate_literal() {
        let currency = Annotation::literal(&["USD", "EUR"]);
        assert!(currency.validate(&json!("USD")).is_ok());
        assert!(currency.validate(&json!("JPY")).is_err());
        assert!(currency.validate(&json!(7)).is_err());
    }

    #[test]
    fn test_validate_constrained_bounds() {
        let note = Annotation::constrained(Annotation::String, Bounds::length(1, 4));
        assert!(note.validate(&json!("abc")).is_ok());
        assert!(note.validate(&json!("")).is_err());
        assert!(note.validate(&json!("abcde")).is_err());

        let quantity = Annotation::constrained(Annotation::Integer, Bounds::range(1.0, 10.0));
        assert!(quantity.validate(&json!(5)).is_ok());
        assert!(quantity.validate(&json!(0)).is_err());
    }

    #[test]
    fn test_validate_optional_accepts_null() {
        let annotation = Annotation::optional(Annotation::String);
        assert!(annotation.validate(&Value::Null).is_ok());
        assert!(annotation.validate(&json!("x")).is_ok());
        assert!(annotation.validate(&json!(2)).is_err());
    }

    #[test]
    fn test_validate_object_required_and_unknown() {
        let obj = Annotation::Object(ObjectAnnotation {
            name: "Item".to_string(),
            fields: vec![
                FieldDef::new("name", Annotation::String),
                FieldDef::new("note", Annotation::optional(Annotation::String)),
            ],
            deny_unknown_fields: true,
        });
        assert!(obj.validate(&json!({"name": "hoodie"})).is_ok());
        assert!(obj.validate(&json!({"note": "x"})).is_err());
        assert!(obj
            .validate(&json!({"name": "hoodie", "bogus": 1}))
            .is_err());
    }

    #[test]
    fn test_schema_value_object() {
        let obj = Annotation::Object(ObjectAnnotation {
            name: "Item".to_string(),
            fields: vec![
                FieldDef::new("name", Annotation::String).with_description("Item name"),
                FieldDef::new("note", Annotation::optional(Annotation::String)),
            ],
            deny_unknown_fields: true,
        });
        let schema = obj.to_schema_value();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["name"]["description"], "Item name");
        assert_eq!(schema["properties"]["note"]["nullable"], true);
        assert_eq!(schema["required"], json!(["name"]));
        assert_eq!(schema["additionalProperties"], false);
    }
}

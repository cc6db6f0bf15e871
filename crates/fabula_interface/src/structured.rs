//! Structured output: schema construction, provider-dialect sanitation, and
//! the double-validation contract.
//!
//! The target type's JSON schema is derived with `schemars`, sanitized into
//! the subset provider schema dialects accept, and sent alongside the
//! request. The provider's JSON comes back as a raw value and is then
//! deserialized into the target type, so enum membership and structure are
//! re-checked locally — the provider is never trusted to satisfy semantic
//! constraints.

use fabula_core::GenerateRequest;
use fabula_error::{FabulaResult, SchemaError, SchemaErrorKind};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::TextDriver;

/// Keywords provider schema dialects reject or ignore.
const UNSUPPORTED_KEYWORDS: &[&str] = &[
    "$schema",
    "title",
    "format",
    "examples",
    "default",
    "additionalProperties",
];

// Defs inlining is depth-limited; our draft types nest a handful of levels
// and contain no recursive references.
const MAX_INLINE_DEPTH: usize = 16;

/// Build the sanitized JSON schema for `T`.
pub fn schema_for<T: JsonSchema>() -> FabulaResult<Value> {
    let schema = schemars::schema_for!(T);
    let mut value = serde_json::to_value(&schema).map_err(|e| {
        SchemaError::new(SchemaErrorKind::SchemaConstruction {
            entity: std::any::type_name::<T>().to_string(),
            message: e.to_string(),
        })
    })?;
    sanitize_schema(&mut value);
    Ok(value)
}

/// Sanitize a schemars-produced schema into the provider-accepted subset.
///
/// Inlines `$defs`/`definitions` references, then strips keywords the
/// provider dialects do not accept. `additionalProperties: false` is dropped
/// here but still enforced locally by `deny_unknown_fields` during
/// deserialization.
pub fn sanitize_schema(schema: &mut Value) {
    let defs = extract_defs(schema);
    inline_refs(schema, &defs, 0);
    strip_unsupported(schema);
}

fn extract_defs(schema: &mut Value) -> BTreeMap<String, Value> {
    let mut defs = BTreeMap::new();
    if let Some(obj) = schema.as_object_mut() {
        for key in ["$defs", "definitions"] {
            if let Some(Value::Object(map)) = obj.remove(key) {
                for (name, def) in map {
                    defs.insert(name, def);
                }
            }
        }
    }
    defs
}

fn inline_refs(value: &mut Value, defs: &BTreeMap<String, Value>, depth: usize) {
    if depth > MAX_INLINE_DEPTH {
        return;
    }
    match value {
        Value::Object(obj) => {
            let reference = obj.get("$ref").and_then(Value::as_str).and_then(|r| {
                r.strip_prefix("#/$defs/")
                    .or_else(|| r.strip_prefix("#/definitions/"))
                    .map(String::from)
            });
            if let Some(name) = reference {
                if let Some(def) = defs.get(&name) {
                    let mut inlined = def.clone();
                    inline_refs(&mut inlined, defs, depth + 1);
                    *value = inlined;
                    return;
                }
                // Unknown reference target: leave it for the provider to
                // reject loudly rather than silently emitting an empty schema.
            }
            for nested in obj.values_mut() {
                inline_refs(nested, defs, depth + 1);
            }
        }
        Value::Array(items) => {
            for item in items {
                inline_refs(item, defs, depth + 1);
            }
        }
        _ => {}
    }
}

fn strip_unsupported(value: &mut Value) {
    match value {
        Value::Object(obj) => {
            for key in UNSUPPORTED_KEYWORDS {
                obj.remove(*key);
            }
            for nested in obj.values_mut() {
                strip_unsupported(nested);
            }
        }
        Value::Array(items) => {
            for item in items {
                strip_unsupported(item);
            }
        }
        _ => {}
    }
}

/// Generate a structured completion and re-validate it as `T`.
///
/// # Errors
///
/// Returns `SchemaError::Validation` when the provider's JSON does not
/// satisfy `T`, in addition to the errors of [`TextDriver::generate_json`].
#[tracing::instrument(skip(driver, req), fields(target = std::any::type_name::<T>()))]
pub async fn generate_structured<T, D>(driver: &D, req: &GenerateRequest) -> FabulaResult<T>
where
    T: DeserializeOwned + JsonSchema,
    D: TextDriver + ?Sized,
{
    let schema = schema_for::<T>()?;
    let value = driver.generate_json(req, &schema).await?;
    serde_json::from_value(value).map_err(|e| {
        tracing::warn!(
            target_type = std::any::type_name::<T>(),
            error = %e,
            "Provider output failed schema re-validation"
        );
        SchemaError::new(SchemaErrorKind::Validation {
            entity: short_type_name::<T>().to_string(),
            message: e.to_string(),
        })
        .into()
    })
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, JsonSchema)]
    #[serde(deny_unknown_fields)]
    #[allow(dead_code)]
    struct Inner {
        label: String,
    }

    #[derive(Debug, Deserialize, JsonSchema)]
    #[serde(deny_unknown_fields)]
    #[allow(dead_code)]
    struct Outer {
        name: String,
        inner: Inner,
        tags: Vec<String>,
    }

    #[test]
    fn sanitized_schema_has_no_refs_or_defs() {
        let schema = schema_for::<Outer>().unwrap();
        let rendered = serde_json::to_string(&schema).unwrap();
        assert!(!rendered.contains("$ref"));
        assert!(!rendered.contains("$defs"));
        assert!(!rendered.contains("$schema"));
        assert!(!rendered.contains("additionalProperties"));
    }

    #[test]
    fn nested_definitions_are_inlined() {
        let schema = schema_for::<Outer>().unwrap();
        // The inner object's property must appear inline under the outer
        // object's properties.
        let inner = &schema["properties"]["inner"];
        assert_eq!(inner["type"], json!("object"));
        assert!(inner["properties"]["label"].is_object());
    }

    #[test]
    fn strip_is_recursive() {
        let mut schema = json!({
            "type": "object",
            "title": "Top",
            "properties": {
                "a": { "type": "string", "format": "date-time" },
                "b": { "type": "array", "items": { "type": "string", "title": "Item" } }
            }
        });
        sanitize_schema(&mut schema);
        assert!(schema.get("title").is_none());
        assert!(schema["properties"]["a"].get("format").is_none());
        assert!(schema["properties"]["b"]["items"].get("title").is_none());
    }

    #[test]
    fn short_type_name_drops_path() {
        assert_eq!(short_type_name::<Outer>(), "Outer");
    }
}

//! Argument schemas for MCP tools
//!
//! A tool's input schema is derived from its request type with `schemars`.
//! The registry compiles that schema once with `jsonschema` and checks every
//! call against it before the tool body runs. Before validation, arguments are
//! normalised: JSON `null` counts as absent, numeric and boolean strings are
//! coerced where the schema asks for integers or booleans, undeclared
//! arguments are dropped and declared defaults are filled in.

use crate::error::{JiraMcpError, Result};
use jsonschema::error::{ValidationError, ValidationErrorKind};
use jsonschema::JSONSchema;
use schemars::JsonSchema;
use serde_json::{json, Map, Number, Value};

/// JSON Schema for a request type
pub fn request_schema<T: JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(T)).unwrap_or_else(|_| json!({ "type": "object" }))
}

/// A tool's input schema, compiled for validation
pub struct ArgumentSchema {
    schema: Value,
    validator: JSONSchema,
}

impl std::fmt::Debug for ArgumentSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArgumentSchema")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl ArgumentSchema {
    /// Compile `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`JiraMcpError::Internal`] if the schema itself is invalid.
    pub fn compile(schema: Value) -> Result<Self> {
        let validator = JSONSchema::compile(&schema)
            .map_err(|e| JiraMcpError::Internal(format!("Invalid tool schema: {e}")))?;
        Ok(Self { schema, validator })
    }

    /// The schema as advertised to clients
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Normalise raw arguments and check them against the schema.
    ///
    /// # Errors
    ///
    /// Returns [`JiraMcpError::InvalidInput`] for the first missing required
    /// parameter, type mismatch or out-of-range value.
    pub fn validate(&self, arguments: Map<String, Value>) -> Result<Map<String, Value>> {
        let mut normalised = Map::new();
        let mut ignored = Vec::new();

        for (name, value) in arguments {
            if value.is_null() {
                continue;
            }
            match self.property(&name) {
                Some(property) => {
                    let value = coerce(&name, property, value)?;
                    normalised.insert(name, value);
                }
                None => ignored.push(name),
            }
        }

        if !ignored.is_empty() {
            tracing::debug!(?ignored, "Ignoring undeclared arguments");
        }

        if let Some(properties) = self.schema.get("properties").and_then(Value::as_object) {
            for (name, property) in properties {
                if let Some(default) = property.get("default") {
                    normalised
                        .entry(name.clone())
                        .or_insert_with(|| default.clone());
                }
            }
        }

        let instance = Value::Object(normalised);
        if let Err(mut errors) = self.validator.validate(&instance) {
            let message = errors
                .next()
                .map(|error| self.describe(&error))
                .unwrap_or_else(|| "Arguments do not match the tool schema".to_string());
            return Err(JiraMcpError::invalid_input(message));
        }

        match instance {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }

    fn property(&self, name: &str) -> Option<&Value> {
        self.schema.get("properties")?.get(name)
    }

    fn describe(&self, error: &ValidationError<'_>) -> String {
        let path = error.instance_path.to_string();
        let name = path.trim_start_matches('/').split('/').next().unwrap_or_default();
        let got: &Value = &error.instance;

        match &error.kind {
            ValidationErrorKind::Required { property } => format!(
                "Missing required parameter: {}",
                property.as_str().unwrap_or_default()
            ),
            ValidationErrorKind::Type { .. } => format!(
                "Parameter '{name}' must be {}, got {}",
                self.property(name).map_or("a different type", expected_type),
                json_type_name(got)
            ),
            ValidationErrorKind::Minimum { .. } | ValidationErrorKind::Maximum { .. } => format!(
                "Parameter '{name}' must be {}, got {got}",
                self.property(name)
                    .map_or_else(|| "in range".to_string(), describe_range)
            ),
            _ => format!("Parameter '{name}' is invalid: {error}"),
        }
    }
}

/// Coerce string and float spellings into the type the schema asks for
fn coerce(name: &str, property: &Value, value: Value) -> Result<Value> {
    if accepts(property, "integer") {
        match &value {
            Value::String(s) => {
                if let Ok(number) = s.trim().parse::<i64>() {
                    return Ok(json!(number));
                }
            }
            Value::Number(n) if n.as_i64().is_none() && n.as_u64().is_none() => {
                if let Some(f) = n.as_f64().filter(|f| f.fract() == 0.0) {
                    return integral_float(name, f);
                }
            }
            _ => {}
        }
    }

    if accepts(property, "boolean") {
        if let Value::String(s) = &value {
            if s.eq_ignore_ascii_case("true") {
                return Ok(Value::Bool(true));
            }
            if s.eq_ignore_ascii_case("false") {
                return Ok(Value::Bool(false));
            }
        }
    }

    Ok(value)
}

/// A whole-valued float as an `i64`, rejecting values an `i64` cannot hold
fn integral_float(name: &str, f: f64) -> Result<Value> {
    // i64::MAX as f64 rounds up to 2^63, which is out of range
    const UPPER: f64 = 9_223_372_036_854_775_808.0;
    if f >= -UPPER && f < UPPER {
        Ok(Value::Number(Number::from(f as i64)))
    } else {
        Err(JiraMcpError::invalid_input(format!(
            "Parameter '{name}' must be an integer, got {f}"
        )))
    }
}

fn schema_types(property: &Value) -> Vec<&str> {
    match property.get("type") {
        Some(Value::String(t)) => vec![t.as_str()],
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

fn accepts(property: &Value, json_type: &str) -> bool {
    schema_types(property).contains(&json_type)
}

fn expected_type(property: &Value) -> &'static str {
    let types = schema_types(property);
    match types.iter().find(|t| **t != "null").copied() {
        Some("string") => "a string",
        Some("integer") => "an integer",
        Some("number") => "a number",
        Some("boolean") => "a boolean",
        Some("array") => match property.pointer("/items/type").and_then(Value::as_str) {
            Some("string") => "a list of strings",
            _ => "a list",
        },
        Some("object") => "an object",
        _ => "a different type",
    }
}

fn describe_range(property: &Value) -> String {
    let bound = |key: &str| property.get(key).and_then(Value::as_f64).map(|b| b as i64);
    match (bound("minimum"), bound("maximum")) {
        (Some(min), Some(max)) => format!("between {min} and {max}"),
        (Some(min), None) => format!("at least {min}"),
        (None, Some(max)) => format!("at most {max}"),
        (None, None) => "in range".to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

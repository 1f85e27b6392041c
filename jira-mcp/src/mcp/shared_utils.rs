//! Shared utilities for MCP tool handlers
//!
//! Request shaping that more than one tool needs: decoding the free-form
//! `additional_fields` JSON string, decoding base64 payloads and assembling
//! issue field objects from optional arguments.

use crate::error::{JiraMcpError, Result};
use crate::jira::payload::assignee_field;
use base64::Engine;
use serde_json::{json, Map, Value};

/// Decode an `additional_fields` argument into a field map.
///
/// Absent and empty strings decode to `None`.
///
/// # Errors
///
/// Returns [`JiraMcpError::InvalidInput`] when the text is not JSON or not a
/// JSON object.
pub fn decode_additional_fields(raw: Option<&str>) -> Result<Option<Map<String, Value>>> {
    let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
        return Ok(None);
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(Some(map)),
        Ok(_) => Err(JiraMcpError::invalid_input(
            "additional_fields must be a JSON object",
        )),
        Err(e) => Err(JiraMcpError::invalid_input(format!(
            "Invalid JSON in additional_fields: {e}"
        ))),
    }
}

/// Decode standard base64 text into raw bytes.
///
/// # Errors
///
/// Returns [`JiraMcpError::InvalidInput`] when the text is not valid base64.
pub fn decode_base64(content: &str) -> Result<Vec<u8>> {
    let compact: String = content.split_whitespace().collect();
    base64::engine::general_purpose::STANDARD
        .decode(compact)
        .map_err(|e| JiraMcpError::invalid_input(format!("Invalid base64 content: {e}")))
}

/// `Some` only for non-empty text
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Incrementally built Jira `fields` object
#[derive(Debug, Default)]
pub struct IssueFields {
    fields: Map<String, Value>,
}

impl IssueFields {
    /// Empty field set
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain text field, only when non-empty
    pub fn text(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(value) = non_empty(value) {
            self.fields.insert(key.to_string(), json!(value));
        }
        self
    }

    /// `{"name": ...}` reference such as priority, only when non-empty
    pub fn named(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(value) = non_empty(value) {
            self.fields.insert(key.to_string(), json!({ "name": value }));
        }
        self
    }

    /// Assignee by account id or username, only when non-empty
    pub fn assignee(mut self, value: Option<&str>) -> Self {
        if let Some(value) = non_empty(value) {
            self.fields.insert("assignee".into(), assignee_field(value));
        }
        self
    }

    /// Labels; `keep_empty` decides whether an empty list still counts
    pub fn labels(mut self, labels: Option<Vec<String>>, keep_empty: bool) -> Self {
        if let Some(labels) = labels.filter(|l| keep_empty || !l.is_empty()) {
            self.fields.insert("labels".into(), json!(labels));
        }
        self
    }

    /// Merge decoded `additional_fields` over what is already set
    pub fn extend(mut self, extra: Option<Map<String, Value>>) -> Self {
        if let Some(extra) = extra {
            self.fields.extend(extra);
        }
        self
    }

    /// Whether no field has been set
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The assembled map
    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_additional_fields() {
        assert_eq!(decode_additional_fields(None).unwrap(), None);
        assert_eq!(decode_additional_fields(Some("")).unwrap(), None);

        let map = decode_additional_fields(Some(r#"{"customfield_10010": 5}"#))
            .unwrap()
            .unwrap();
        assert_eq!(map["customfield_10010"], json!(5));
    }

    #[test]
    fn test_decode_additional_fields_rejects_bad_json() {
        let err = decode_additional_fields(Some("{bad")).unwrap_err();
        assert!(err.to_string().starts_with("Invalid JSON in additional_fields:"));

        let err = decode_additional_fields(Some("[1, 2]")).unwrap_err();
        assert_eq!(err.to_string(), "additional_fields must be a JSON object");
    }

    #[test]
    fn test_decode_base64() {
        assert_eq!(decode_base64("aGVsbG8=").unwrap(), b"hello");
        assert_eq!(decode_base64("aGVs\nbG8=").unwrap(), b"hello");
        let err = decode_base64("not base64!").unwrap_err();
        assert!(err.to_string().starts_with("Invalid base64 content:"));
    }

    #[test]
    fn test_issue_fields_skip_empty_values() {
        let fields = IssueFields::new()
            .text("summary", Some(""))
            .named("priority", None)
            .assignee(Some(""))
            .labels(Some(Vec::new()), false);
        assert!(fields.is_empty());
    }

    #[test]
    fn test_issue_fields_keep_empty_labels_when_asked() {
        let fields = IssueFields::new().labels(Some(Vec::new()), true).into_map();
        assert_eq!(fields["labels"], json!([]));
    }

    #[test]
    fn test_issue_fields_extra_wins() {
        let mut extra = Map::new();
        extra.insert("priority".into(), json!({ "id": "1" }));
        let fields = IssueFields::new()
            .named("priority", Some("High"))
            .assignee(Some("jdoe"))
            .extend(Some(extra))
            .into_map();
        assert_eq!(fields["priority"], json!({ "id": "1" }));
        assert_eq!(fields["assignee"], json!({ "name": "jdoe" }));
    }
}

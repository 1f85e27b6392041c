//! Request shaping for Jira payloads
//!
//! Pure functions that turn primitive arguments into the JSON bodies Jira
//! expects, and unwrap the list envelopes some endpoints answer with.

use serde_json::{json, Map, Value};

/// Field shape for an assignee.
///
/// Cloud account ids contain a colon (`712020:af6d11d4-...`) and are sent as
/// `accountId`; anything else is treated as a Server/Data Center username.
pub fn assignee_field(assignee: &str) -> Value {
    if assignee.contains(':') {
        json!({ "accountId": assignee })
    } else {
        json!({ "name": assignee })
    }
}

/// Base fields for a new issue with `extra` merged over them
pub fn create_issue_fields(
    project: &str,
    summary: &str,
    description: &str,
    issue_type: &str,
    extra: Option<Map<String, Value>>,
) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("project".into(), json!({ "key": project }));
    fields.insert("summary".into(), Value::String(summary.to_string()));
    fields.insert("description".into(), Value::String(description.to_string()));
    fields.insert("issuetype".into(), json!({ "name": issue_type }));
    if let Some(extra) = extra {
        fields.extend(extra);
    }
    fields
}

/// Body for `POST /issue/{key}/transitions`.
///
/// Empty field maps and empty comments are left out.
pub fn transition_payload(
    transition_id: &str,
    fields: Option<Map<String, Value>>,
    comment: Option<&str>,
) -> Value {
    let mut payload = Map::new();
    payload.insert("transition".into(), json!({ "id": transition_id }));

    if let Some(fields) = fields.filter(|f| !f.is_empty()) {
        payload.insert("fields".into(), Value::Object(fields));
    }

    if let Some(comment) = comment.filter(|c| !c.is_empty()) {
        payload.insert(
            "update".into(),
            json!({ "comment": [ { "add": { "body": comment } } ] }),
        );
    }

    Value::Object(payload)
}

/// Body for `POST /issue/{key}/worklog`
pub fn worklog_payload(time_spent: &str, comment: Option<&str>, started: Option<&str>) -> Value {
    let mut payload = Map::new();
    payload.insert("timeSpent".into(), Value::String(time_spent.to_string()));
    if let Some(comment) = comment {
        payload.insert("comment".into(), Value::String(comment.to_string()));
    }
    if let Some(started) = started {
        payload.insert("started".into(), Value::String(started.to_string()));
    }
    Value::Object(payload)
}

/// Body for `POST /issueLink`
pub fn issue_link_payload(
    link_type: &str,
    inward_issue: &str,
    outward_issue: &str,
    comment: Option<&str>,
) -> Value {
    let mut payload = Map::new();
    payload.insert("type".into(), json!({ "name": link_type }));
    payload.insert("inwardIssue".into(), json!({ "key": inward_issue }));
    payload.insert("outwardIssue".into(), json!({ "key": outward_issue }));
    if let Some(comment) = comment.filter(|c| !c.is_empty()) {
        payload.insert("comment".into(), json!({ "body": comment }));
    }
    Value::Object(payload)
}

/// Pull the array stored under `key`.
///
/// A bare array is returned as-is; any other shape yields an empty list.
pub fn extract_list(response: Value, key: &str) -> Vec<Value> {
    match response {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Accept only a bare array response
pub fn expect_list(response: Value) -> Vec<Value> {
    match response {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

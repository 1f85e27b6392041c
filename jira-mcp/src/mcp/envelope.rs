//! Uniform result envelope for tool invocations
//!
//! Every tool call answers with exactly one of:
//!
//! ```json
//! { "success": true,  "data": ... }
//! { "success": false, "error": "..." }
//! ```

use crate::error::JiraMcpError;
use futures_util::FutureExt;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

/// Outcome of one tool invocation
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// The tool returned a value
    Success(Value),
    /// The tool failed; the message is what the caller sees
    Failure(String),
}

impl Envelope {
    /// Failure envelope for `error`, logged with its category
    pub fn from_error(operation: &str, error: &JiraMcpError) -> Self {
        tracing::error!(
            operation,
            category = %error.category(),
            error = ?error,
            "Tool execution failed: {error}"
        );
        Self::Failure(error.to_string())
    }

    /// Whether the call succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Payload of a successful call
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Message of a failed call
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(message) => Some(message),
        }
    }

    /// Wire form as a JSON value
    pub fn to_value(&self) -> Value {
        match self {
            Self::Success(data) => serde_json::json!({ "success": true, "data": data }),
            Self::Failure(message) => serde_json::json!({ "success": false, "error": message }),
        }
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Envelope", 2)?;
        match self {
            Self::Success(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Self::Failure(message) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", message)?;
            }
        }
        state.end()
    }
}

/// Run `thunk` behind the envelope fault boundary.
///
/// `Ok` becomes [`Envelope::Success`]; `Err` and panics become a logged
/// [`Envelope::Failure`]. This function never fails and never unwinds.
pub async fn run_enveloped<F, Fut>(operation: &str, thunk: F) -> Envelope
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = crate::Result<Value>>,
{
    let outcome = AssertUnwindSafe(async move { thunk().await })
        .catch_unwind()
        .await;

    match outcome {
        Ok(Ok(data)) => Envelope::Success(data),
        Ok(Err(error)) => Envelope::from_error(operation, &error),
        Err(panic) => {
            let error = JiraMcpError::Internal(panic_message(panic.as_ref()));
            Envelope::from_error(operation, &error)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("tool panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("tool panicked: {message}")
    } else {
        "tool panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_success_envelope() {
        let envelope = run_enveloped("getIssue", || async { Ok(json!({ "key": "A-1" })) }).await;
        assert!(envelope.is_success());
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "success": true, "data": { "key": "A-1" } })
        );
    }

    #[tokio::test]
    async fn test_error_envelope_carries_display_text() {
        let envelope = run_enveloped("addAttachment", || async {
            Err(JiraMcpError::invalid_input("Invalid base64 content: bad"))
        })
        .await;

        assert_eq!(envelope.error(), Some("Invalid base64 content: bad"));
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "success": false, "error": "Invalid base64 content: bad" })
        );
    }

    #[tokio::test]
    async fn test_panics_become_failures() {
        let envelope = run_enveloped("health", || async {
            let missing: Option<Value> = None;
            #[allow(clippy::unnecessary_literal_unwrap)]
            Ok(missing.expect("no value"))
        })
        .await;

        let message = envelope.error().unwrap();
        assert!(message.contains("tool panicked"));
        assert!(message.contains("no value"));
    }

    #[tokio::test]
    async fn test_null_data_is_still_present() {
        let envelope = run_enveloped("updateIssue", || async { Ok(Value::Null) }).await;
        let wire = serde_json::to_value(&envelope).unwrap();
        assert!(wire.as_object().unwrap().contains_key("data"));
        assert!(!wire.as_object().unwrap().contains_key("error"));
        assert_eq!(wire, envelope.to_value());
    }
}

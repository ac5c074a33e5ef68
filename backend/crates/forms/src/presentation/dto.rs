//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::application::submit_form::SubmissionOutcome;
use crate::domain::entities::FormFields;

/// Response body for every form endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }
}

impl From<SubmissionOutcome> for SubmissionResult {
    fn from(outcome: SubmissionOutcome) -> Self {
        // Silent rejects must be indistinguishable from real successes
        match outcome {
            SubmissionOutcome::Accepted { message }
            | SubmissionOutcome::SilentReject { message, .. } => Self::ok(message),
        }
    }
}

/// Flatten one JSON field value to text; `null` means the field is absent
fn field_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        // Nested values are kept as JSON text
        nested @ (Value::Array(_) | Value::Object(_)) => Some(nested.to_string()),
    }
}

/// Request body: any JSON object; field values are flattened to text
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct FormPayload(pub Map<String, Value>);

impl FormPayload {
    pub fn into_fields(self) -> FormFields {
        self.0
            .into_iter()
            .filter_map(|(name, value)| field_text(value).map(|text| (name, text)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::SpamReason;

    #[test]
    fn test_payload_stringifies_scalars() {
        let payload: FormPayload = serde_json::from_value(serde_json::json!({
            "name": "Jane Doe",
            "form_submission_time": 1700000000000i64,
            "interactionCount": 4,
            "subscribe": true,
            "company": null,
        }))
        .unwrap();

        let fields = payload.into_fields();
        assert_eq!(fields["name"], "Jane Doe");
        assert_eq!(fields["form_submission_time"], "1700000000000");
        assert_eq!(fields["interactionCount"], "4");
        assert_eq!(fields["subscribe"], "true");
        assert!(!fields.contains_key("company"));
    }

    #[test]
    fn test_payload_keeps_nested_values_as_json_text() {
        let payload: FormPayload = serde_json::from_value(serde_json::json!({
            "name": {"first": "Jane"},
            "tags": ["a", 1],
        }))
        .unwrap();

        let fields = payload.into_fields();
        assert_eq!(fields["name"], r#"{"first":"Jane"}"#);
        assert_eq!(fields["tags"], r#"["a",1]"#);
    }

    #[test]
    fn test_payload_must_be_an_object() {
        let array = serde_json::json!(["Jane"]);
        assert!(serde_json::from_value::<FormPayload>(array).is_err());

        let text = serde_json::json!("name=Jane");
        assert!(serde_json::from_value::<FormPayload>(text).is_err());
    }

    #[test]
    fn test_silent_reject_looks_like_success() {
        let accepted = SubmissionResult::from(SubmissionOutcome::Accepted {
            message: "Thanks!".into(),
        });
        let silent = SubmissionResult::from(SubmissionOutcome::SilentReject {
            reason: SpamReason::BotDetected,
            message: "Thanks!".into(),
        });
        assert_eq!(accepted, silent);
        assert_eq!(
            serde_json::to_value(&silent).unwrap(),
            serde_json::json!({"success": true, "message": "Thanks!"})
        );
    }
}

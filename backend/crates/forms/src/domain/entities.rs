//! Domain Entities
//!
//! A submission attempt is request-scoped and never persisted.

use platform::client::ClientId;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Decoy fields rendered off-screen; humans never fill them.
pub const HONEYPOT_FIELDS: [&str; 2] = ["bot_check_name", "bot_check_email"];

/// Hidden field carrying the client-recorded form render time (ms since epoch)
pub const FORM_LOADED_AT_FIELD: &str = "form_submission_time";

/// Client-recorded submit time (ms since epoch), telemetry only
pub const FORM_SUBMITTED_AT_FIELD: &str = "form_submitted_at";

/// Client-reported count of focus/keypress interactions
pub const INTERACTION_COUNT_FIELD: &str = "interactionCount";

/// reCAPTCHA token field
pub const CAPTCHA_TOKEN_FIELD: &str = "g-recaptcha-response";

/// Submitted form fields, in stable order
pub type FormFields = BTreeMap<String, String>;

/// The public forms this service screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormKind {
    Contact,
    Newsletter,
    Wholesale,
}

impl FormKind {
    pub const ALL: [FormKind; 3] = [FormKind::Contact, FormKind::Newsletter, FormKind::Wholesale];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Contact => "contact",
            FormKind::Newsletter => "newsletter",
            FormKind::Wholesale => "wholesale",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a path segment names no known form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form: {0}")]
pub struct UnknownFormKind(pub String);

impl FromStr for FormKind {
    type Err = UnknownFormKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contact" => Ok(FormKind::Contact),
            "newsletter" => Ok(FormKind::Newsletter),
            "wholesale" => Ok(FormKind::Wholesale),
            _ => Err(UnknownFormKind(s.to_string())),
        }
    }
}

/// One inbound form submission
///
/// `loaded_at_ms`, `submitted_at_ms` and `interaction_count` come from the
/// client and are heuristic signals only. A value that does not parse as a
/// number is treated as absent.
#[derive(Debug, Clone)]
pub struct SubmissionAttempt {
    pub form: FormKind,
    pub fields: FormFields,
    pub client: ClientId,
    pub loaded_at_ms: Option<i64>,
    pub submitted_at_ms: Option<i64>,
    pub interaction_count: Option<u32>,
}

impl SubmissionAttempt {
    /// Build an attempt, reading the timing and interaction signals out of the fields.
    pub fn new(form: FormKind, client: ClientId, fields: FormFields) -> Self {
        let loaded_at_ms = fields.get(FORM_LOADED_AT_FIELD).and_then(|v| parse_millis(v));
        let submitted_at_ms = fields
            .get(FORM_SUBMITTED_AT_FIELD)
            .and_then(|v| parse_millis(v));
        let interaction_count = fields
            .get(INTERACTION_COUNT_FIELD)
            .and_then(|v| v.trim().parse::<u32>().ok());

        Self {
            form,
            fields,
            client,
            loaded_at_ms,
            submitted_at_ms,
            interaction_count,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Non-blank CAPTCHA token, if one was submitted
    pub fn captcha_token(&self) -> Option<&str> {
        self.field(CAPTCHA_TOKEN_FIELD)
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// Concatenate the free-text fields the content classifier should read.
    pub fn content_text(&self, field_names: &[&str]) -> String {
        field_names
            .iter()
            .filter_map(|name| self.field(name))
            .filter(|value| !value.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn parse_millis(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(|value| value as i64)
    })
}

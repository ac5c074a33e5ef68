//! Ports to external collaborators
//!
//! Interfaces for the third-party CAPTCHA scorer and the mail relay.
//! HTTP implementations live in the infrastructure layer.

use thiserror::Error;

use crate::domain::entities::{FormFields, FormKind};

/// Score reported by the CAPTCHA service
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptchaAssessment {
    pub success: bool,
    /// 0.0 (bot) ..= 1.0 (human); absent for checkbox-style CAPTCHAs
    pub score: Option<f64>,
}

impl CaptchaAssessment {
    pub fn is_human(&self, min_score: f64) -> bool {
        self.success && self.score.is_none_or(|score| score >= min_score)
    }
}

/// CAPTCHA verification failures (as opposed to a "bot" answer)
#[derive(Debug, Error)]
pub enum CaptchaError {
    #[error("CAPTCHA secret is not configured")]
    NotConfigured,

    #[error("CAPTCHA verification timed out")]
    Timeout,

    #[error("CAPTCHA verification request failed: {0}")]
    Transport(String),

    #[error("Unexpected CAPTCHA verifier response: {0}")]
    InvalidResponse(String),
}

/// CAPTCHA verifier trait
#[trait_variant::make(CaptchaVerifier: Send)]
pub trait LocalCaptchaVerifier {
    /// Ask the verifier to score `token`
    async fn verify(
        &self,
        token: &str,
        remote_ip: Option<&str>,
    ) -> Result<CaptchaAssessment, CaptchaError>;
}

/// Successful relay response
#[derive(Debug, Clone, PartialEq)]
pub struct RelayReceipt {
    pub status: u16,
    pub body: serde_json::Value,
}

/// Relay failures
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("No relay endpoint configured for the {0} form")]
    NotConfigured(FormKind),

    #[error("Relay request timed out")]
    Timeout,

    #[error("Relay request failed: {0}")]
    Transport(String),

    #[error("Relay responded with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Relay returned an unreadable body: {0}")]
    InvalidBody(String),
}

/// Form relay trait
#[trait_variant::make(FormRelay: Send)]
pub trait LocalFormRelay {
    /// Forward the submitted fields, unchanged, to the form's delivery endpoint
    async fn relay(&self, form: FormKind, fields: &FormFields) -> Result<RelayReceipt, RelayError>;
}

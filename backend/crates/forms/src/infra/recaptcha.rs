//! reCAPTCHA v3 verifier
//!
//! Posts the token to the siteverify endpoint as
//! `application/x-www-form-urlencoded` and reads `{success, score}`.

use serde::{Deserialize, Serialize};

use crate::application::config::FormsConfig;
use crate::domain::ports::{CaptchaAssessment, CaptchaError, CaptchaVerifier};

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    secret: &'a str,
    response: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    remoteip: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    success: bool,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RecaptchaVerifier {
    client: reqwest::Client,
    secret: Option<String>,
    verify_url: String,
}

impl RecaptchaVerifier {
    pub fn new(client: reqwest::Client, secret: Option<String>, verify_url: impl Into<String>) -> Self {
        Self {
            client,
            secret,
            verify_url: verify_url.into(),
        }
    }

    pub fn from_config(client: reqwest::Client, config: &FormsConfig) -> Self {
        Self::new(
            client,
            config.recaptcha_secret.clone(),
            config.recaptcha_verify_url.clone(),
        )
    }
}

impl CaptchaVerifier for RecaptchaVerifier {
    async fn verify(
        &self,
        token: &str,
        remote_ip: Option<&str>,
    ) -> Result<CaptchaAssessment, CaptchaError> {
        let secret = self
            .secret
            .as_deref()
            .filter(|secret| !secret.is_empty())
            .ok_or(CaptchaError::NotConfigured)?;

        let response = self
            .client
            .post(&self.verify_url)
            .form(&VerifyRequest {
                secret,
                response: token,
                remoteip: remote_ip,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CaptchaError::InvalidResponse(format!(
                "verifier returned status {}",
                response.status()
            )));
        }

        let body: VerifyResponse = response.json().await?;

        if !body.error_codes.is_empty() {
            tracing::debug!(error_codes = ?body.error_codes, "reCAPTCHA error codes");
        }

        Ok(CaptchaAssessment {
            success: body.success,
            score: body.score,
        })
    }
}

//! Application Configuration
//!
//! Per-form thresholds are fixed constants. Only endpoints, secrets and
//! the environment come from the process environment.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use platform::client::TrustedProxies;
use platform::rate_limit::RateLimitConfig;

use crate::domain::entities::FormKind;
use crate::domain::services::classifier::DEFAULT_SCORE_THRESHOLD;
use crate::domain::value_objects::ContentMode;

/// Google reCAPTCHA verification endpoint
pub const RECAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Tokens starting with this prefix skip CAPTCHA verification outside production
pub const CAPTCHA_BYPASS_PREFIX: &str = "dev-bypass-";

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Development => "development",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid environment {0:?}, expected \"production\" or \"development\"")]
pub struct ParseEnvironmentError(pub String);

impl FromStr for Environment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" | "test" => Ok(Environment::Development),
            _ => Err(ParseEnvironmentError(s.to_string())),
        }
    }
}

/// Screening policy for one form
#[derive(Debug, Clone)]
pub struct FormPolicy {
    /// Submission quota per client identifier
    pub rate_limit: RateLimitConfig,
    /// Minimum time between form render and submit
    pub min_fill_time: Duration,
    /// Minimum reported interactions (wholesale only)
    pub min_interactions: Option<u32>,
    pub requires_captcha: bool,
    /// Free-text fields fed to the content classifier
    pub content_fields: Vec<&'static str>,
    pub content_mode: ContentMode,
    /// External relay endpoint; `None` fails the relay step with a configuration error
    pub relay_url: Option<String>,
    /// Shown on success (and on silent rejection)
    pub success_message: String,
}

impl FormPolicy {
    pub fn contact() -> Self {
        Self {
            rate_limit: RateLimitConfig::per_hour(5),
            min_fill_time: Duration::from_secs(2),
            min_interactions: None,
            requires_captcha: true,
            content_fields: vec!["message"],
            content_mode: ContentMode::Binary,
            relay_url: None,
            success_message: "Thanks for reaching out! We'll get back to you soon.".to_string(),
        }
    }

    pub fn newsletter() -> Self {
        Self {
            rate_limit: RateLimitConfig::per_hour(5),
            min_fill_time: Duration::from_secs(2),
            min_interactions: None,
            requires_captcha: false,
            content_fields: vec!["name", "email"],
            content_mode: ContentMode::Scoring {
                threshold: DEFAULT_SCORE_THRESHOLD,
            },
            relay_url: None,
            success_message: "You're subscribed! Watch your inbox for updates.".to_string(),
        }
    }

    pub fn wholesale() -> Self {
        Self {
            rate_limit: RateLimitConfig::per_hour(5),
            min_fill_time: Duration::from_secs(5),
            min_interactions: Some(3),
            requires_captcha: false,
            content_fields: vec!["message", "notes"],
            content_mode: ContentMode::Binary,
            relay_url: None,
            success_message: "Thanks for your interest! Our wholesale team will contact you shortly."
                .to_string(),
        }
    }
}

/// Forms application configuration
#[derive(Debug, Clone)]
pub struct FormsConfig {
    pub environment: Environment,
    pub contact: FormPolicy,
    pub newsletter: FormPolicy,
    pub wholesale: FormPolicy,
    /// General bot protection across every form route
    pub burst_limit: RateLimitConfig,
    pub recaptcha_secret: Option<String>,
    pub recaptcha_verify_url: String,
    /// Scores at or above this are human
    pub recaptcha_min_score: f64,
    pub captcha_bypass_prefix: String,
    /// Timeout for CAPTCHA and relay calls
    pub outbound_timeout: Duration,
    /// How often stale rate-limit entries are purged
    pub sweep_interval: Duration,
    /// Peers whose forwarding headers identify the client
    pub trusted_proxies: TrustedProxies,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Production,
            contact: FormPolicy::contact(),
            newsletter: FormPolicy::newsletter(),
            wholesale: FormPolicy::wholesale(),
            burst_limit: RateLimitConfig::per_minute(60),
            recaptcha_secret: None,
            recaptcha_verify_url: RECAPTCHA_VERIFY_URL.to_string(),
            recaptcha_min_score: 0.5,
            captcha_bypass_prefix: CAPTCHA_BYPASS_PREFIX.to_string(),
            outbound_timeout: Duration::from_secs(10),
            sweep_interval: Duration::from_secs(300),
            trusted_proxies: TrustedProxies::none(),
        }
    }
}

impl FormsConfig {
    /// Create config for development (CAPTCHA bypass and error pass-through enabled)
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            ..Default::default()
        }
    }

    pub fn policy(&self, form: FormKind) -> &FormPolicy {
        match form {
            FormKind::Contact => &self.contact,
            FormKind::Newsletter => &self.newsletter,
            FormKind::Wholesale => &self.wholesale,
        }
    }

    pub fn policy_mut(&mut self, form: FormKind) -> &mut FormPolicy {
        match form {
            FormKind::Contact => &mut self.contact,
            FormKind::Newsletter => &mut self.newsletter,
            FormKind::Wholesale => &mut self.wholesale,
        }
    }

    /// Whether `token` may skip verification in this environment
    pub fn is_bypass_token(&self, token: &str) -> bool {
        !self.environment.is_production() && token.starts_with(&self.captcha_bypass_prefix)
    }
}

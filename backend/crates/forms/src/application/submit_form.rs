//! Submit Form Use Case
//!
//! Runs one attempt through the screening pipeline and, if it survives,
//! hands the fields to the relay. Checks run in a fixed order and the
//! first failure ends the attempt:
//!
//! 1. per-form rate limit
//! 2. honeypot (silent)
//! 3. minimum fill time (silent)
//! 4. interaction floor (wholesale)
//! 5. CAPTCHA (contact)
//! 6. content heuristics
//! 7. relay

use std::sync::Arc;

use platform::clock::Clock;
use platform::rate_limit::RateLimitStore;

use crate::application::config::FormsConfig;
use crate::application::limiters::FormLimiters;
use crate::domain::entities::SubmissionAttempt;
use crate::domain::ports::{CaptchaVerifier, FormRelay};
use crate::domain::services::classifier::classify;
use crate::domain::services::honeypot::{check_honeypot, check_interaction, check_timing};
use crate::domain::value_objects::SpamReason;
use crate::error::{FormError, FormResult};

/// Successful pipeline outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Relayed
    Accepted { message: String },
    /// Looks automated; answered as a success so the bot learns nothing, never relayed
    SilentReject { reason: SpamReason, message: String },
}

impl SubmissionOutcome {
    pub fn message(&self) -> &str {
        match self {
            SubmissionOutcome::Accepted { message }
            | SubmissionOutcome::SilentReject { message, .. } => message,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted { .. })
    }
}

/// Submit Form Use Case
pub struct SubmitFormUseCase<S, V, R> {
    limiters: Arc<FormLimiters<S>>,
    verifier: Arc<V>,
    relay: Arc<R>,
    clock: Arc<dyn Clock>,
    config: Arc<FormsConfig>,
}

impl<S, V, R> SubmitFormUseCase<S, V, R>
where
    S: RateLimitStore + Send + Sync + 'static,
    V: CaptchaVerifier + Send + Sync,
    R: FormRelay + Send + Sync,
{
    pub fn new(
        limiters: Arc<FormLimiters<S>>,
        verifier: Arc<V>,
        relay: Arc<R>,
        clock: Arc<dyn Clock>,
        config: Arc<FormsConfig>,
    ) -> Self {
        Self {
            limiters,
            verifier,
            relay,
            clock,
            config,
        }
    }

    pub async fn execute(&self, attempt: SubmissionAttempt) -> FormResult<SubmissionOutcome> {
        let form = attempt.form;
        let policy = self.config.policy(form);

        // Log telemetry (not used for any decision)
        if let Some(submitted_at_ms) = attempt.submitted_at_ms {
            tracing::debug!(
                form = %form,
                client = %attempt.client,
                submitted_at_ms,
                "Client submit timestamp (not verified)"
            );
        }

        let decision = self
            .limiters
            .for_form(form)
            .check(attempt.client.as_str())
            .await;
        if !decision.allowed {
            tracing::warn!(
                form = %form,
                client = %attempt.client,
                count = decision.count,
                reset_at_ms = decision.reset_at_ms,
                "Form rate limit hit"
            );
            return Err(FormError::RateLimited);
        }

        let honeypot = check_honeypot(&attempt.fields);
        if let Some(reason) = honeypot.reason() {
            return Ok(self.silent_reject(&attempt, reason));
        }

        let timing = check_timing(attempt.loaded_at_ms, self.clock.now_ms(), policy.min_fill_time);
        if let Some(reason) = timing.reason() {
            return Ok(self.silent_reject(&attempt, reason));
        }

        if let Some(min_interactions) = policy.min_interactions {
            let interaction = check_interaction(attempt.interaction_count, min_interactions);
            if let Some(reason) = interaction.reason() {
                tracing::warn!(
                    form = %form,
                    client = %attempt.client,
                    interaction_count = ?attempt.interaction_count,
                    "Too few interactions"
                );
                return Err(FormError::ContentRejected { reason });
            }
        }

        if policy.requires_captcha {
            self.verify_captcha(&attempt).await?;
        }

        let text = attempt.content_text(&policy.content_fields);
        let verdict = classify(&text, policy.content_mode);
        if let Some(reason) = verdict.reason() {
            tracing::warn!(
                form = %form,
                client = %attempt.client,
                reasons = ?verdict.reasons,
                score = verdict.score,
                "Content flagged as spam"
            );
            return Err(FormError::ContentRejected { reason });
        }

        let receipt = self.relay.relay(form, &attempt.fields).await?;

        tracing::info!(
            form = %form,
            client = %attempt.client,
            relay_status = receipt.status,
            "Form submission relayed"
        );
        tracing::debug!(form = %form, relay_body = %receipt.body, "Relay response");

        Ok(SubmissionOutcome::Accepted {
            message: policy.success_message.clone(),
        })
    }

    async fn verify_captcha(&self, attempt: &SubmissionAttempt) -> FormResult<()> {
        let Some(token) = attempt.captcha_token() else {
            tracing::warn!(
                form = %attempt.form,
                client = %attempt.client,
                reason = %SpamReason::InvalidToken,
                "Missing CAPTCHA token"
            );
            return Err(FormError::CaptchaFailed("missing token".to_string()));
        };

        if self.config.is_bypass_token(token) {
            tracing::info!(form = %attempt.form, "CAPTCHA bypass token accepted");
            return Ok(());
        }

        let remote_ip = (!attempt.client.is_unknown()).then(|| attempt.client.as_str());

        match self.verifier.verify(token, remote_ip).await {
            Ok(assessment) if assessment.is_human(self.config.recaptcha_min_score) => Ok(()),
            Ok(assessment) => Err(FormError::CaptchaFailed(format!(
                "success={} score={:?}",
                assessment.success, assessment.score
            ))),
            Err(e) if self.config.environment.is_production() => {
                Err(FormError::CaptchaFailed(e.to_string()))
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    environment = %self.config.environment,
                    "CAPTCHA verifier unavailable, allowing submission"
                );
                Ok(())
            }
        }
    }

    fn silent_reject(&self, attempt: &SubmissionAttempt, reason: SpamReason) -> SubmissionOutcome {
        tracing::warn!(
            form = %attempt.form,
            client = %attempt.client,
            reason = %reason,
            "Automated submission dropped"
        );

        SubmissionOutcome::SilentReject {
            reason,
            message: self.config.policy(attempt.form).success_message.clone(),
        }
    }
}

//! HTTP Handlers

use crate::application::config::FormsConfig;
use crate::application::limiters::FormLimiters;
use crate::application::submit_form::SubmitFormUseCase;
use crate::domain::entities::{FormKind, SubmissionAttempt};
use crate::domain::ports::{CaptchaVerifier, FormRelay};
use crate::error::{FormError, FormResult};
use crate::presentation::dto::{FormPayload, SubmissionResult};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use platform::client::ClientId;
use platform::clock::Clock;
use platform::rate_limit::RateLimitStore;
use std::sync::Arc;

/// Shared state for form handlers
pub struct FormsAppState<S, V, R> {
    pub limiters: Arc<FormLimiters<S>>,
    pub verifier: Arc<V>,
    pub relay: Arc<R>,
    pub clock: Arc<dyn Clock>,
    pub config: Arc<FormsConfig>,
}

impl<S, V, R> Clone for FormsAppState<S, V, R> {
    fn clone(&self) -> Self {
        Self {
            limiters: self.limiters.clone(),
            verifier: self.verifier.clone(),
            relay: self.relay.clone(),
            clock: self.clock.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S, V, R> FormsAppState<S, V, R>
where
    S: RateLimitStore + Send + Sync + 'static,
    V: CaptchaVerifier + Send + Sync + 'static,
    R: FormRelay + Send + Sync + 'static,
{
    /// `new_store` is called once per rate limiter.
    pub fn new(
        config: FormsConfig,
        verifier: V,
        relay: R,
        clock: Arc<dyn Clock>,
        new_store: impl FnMut() -> S,
    ) -> Self {
        let limiters = FormLimiters::new(&config, clock.clone(), new_store);
        Self {
            limiters: Arc::new(limiters),
            verifier: Arc::new(verifier),
            relay: Arc::new(relay),
            clock,
            config: Arc::new(config),
        }
    }

    fn use_case(&self) -> SubmitFormUseCase<S, V, R> {
        SubmitFormUseCase::new(
            self.limiters.clone(),
            self.verifier.clone(),
            self.relay.clone(),
            self.clock.clone(),
            self.config.clone(),
        )
    }

    async fn submit(
        &self,
        form: FormKind,
        client: ClientId,
        payload: Result<Json<FormPayload>, JsonRejection>,
    ) -> FormResult<Json<SubmissionResult>> {
        let Json(payload) = payload.map_err(|e| FormError::MalformedPayload(e.body_text()))?;

        let attempt = SubmissionAttempt::new(form, client, payload.into_fields());
        let outcome = self.use_case().execute(attempt).await?;

        Ok(Json(outcome.into()))
    }
}

/// POST /api/forms/{form}
pub async fn submit_form<S, V, R>(
    State(state): State<FormsAppState<S, V, R>>,
    Path(form): Path<String>,
    client: ClientId,
    payload: Result<Json<FormPayload>, JsonRejection>,
) -> FormResult<Json<SubmissionResult>>
where
    S: RateLimitStore + Send + Sync + 'static,
    V: CaptchaVerifier + Send + Sync + 'static,
    R: FormRelay + Send + Sync + 'static,
{
    let form = form
        .parse::<FormKind>()
        .map_err(|e| FormError::UnknownForm(e.0))?;

    state.submit(form, client, payload).await
}

/// POST /api/submit-form (contact form)
pub async fn submit_contact_form<S, V, R>(
    State(state): State<FormsAppState<S, V, R>>,
    client: ClientId,
    payload: Result<Json<FormPayload>, JsonRejection>,
) -> FormResult<Json<SubmissionResult>>
where
    S: RateLimitStore + Send + Sync + 'static,
    V: CaptchaVerifier + Send + Sync + 'static,
    R: FormRelay + Send + Sync + 'static,
{
    state.submit(FormKind::Contact, client, payload).await
}

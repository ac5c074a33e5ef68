//! Forms Router

use crate::domain::ports::{CaptchaVerifier, FormRelay};
use crate::presentation::handlers::{self, FormsAppState};
use crate::presentation::middleware::burst_limit;
use axum::{Extension, Router, middleware, routing::post};
use platform::rate_limit::RateLimitStore;

/// Create the forms router (mount under `/api`)
///
/// Clients are identified by socket peer unless the peer is one of
/// `config.trusted_proxies`, so serve with connect info.
pub fn forms_router<S, V, R>(state: FormsAppState<S, V, R>) -> Router
where
    S: RateLimitStore + Send + Sync + 'static,
    V: CaptchaVerifier + Send + Sync + 'static,
    R: FormRelay + Send + Sync + 'static,
{
    let burst = state.limiters.burst.clone();
    let trusted_proxies = state.config.trusted_proxies.clone();

    Router::new()
        .route("/forms/{form}", post(handlers::submit_form::<S, V, R>))
        .route(
            "/submit-form",
            post(handlers::submit_contact_form::<S, V, R>),
        )
        .route_layer(middleware::from_fn_with_state(burst, burst_limit::<S>))
        .layer(Extension(trusted_proxies))
        .with_state(state)
}

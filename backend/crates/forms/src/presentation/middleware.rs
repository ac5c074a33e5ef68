//! Forms Middleware

use crate::error::FormError;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use platform::client::ClientId;
use platform::rate_limit::{FixedWindowRateLimiter, RateLimitStore};

/// General bot protection: caps requests per client across every form route
/// before any form-specific work runs.
pub async fn burst_limit<S>(
    State(limiter): State<FixedWindowRateLimiter<S>>,
    client: ClientId,
    req: Request,
    next: Next,
) -> Result<Response, FormError>
where
    S: RateLimitStore + Send + Sync + 'static,
{
    let decision = limiter.check(client.as_str()).await;

    if !decision.allowed {
        tracing::warn!(
            client = %client,
            count = decision.count,
            limit = limiter.config().max_requests,
            "Burst limit exceeded"
        );
        return Err(FormError::RateLimited);
    }

    Ok(next.run(req).await)
}

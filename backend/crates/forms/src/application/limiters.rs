//! Rate limiters owned by the forms application
//!
//! One fixed-window limiter per form plus the general burst limiter, each
//! over its own store so a sweep never judges an entry by another
//! limiter's window.

use std::sync::Arc;

use platform::clock::Clock;
use platform::rate_limit::{FixedWindowRateLimiter, RateLimitStore};

use crate::application::config::FormsConfig;
use crate::domain::entities::FormKind;

pub struct FormLimiters<S> {
    pub contact: FixedWindowRateLimiter<S>,
    pub newsletter: FixedWindowRateLimiter<S>,
    pub wholesale: FixedWindowRateLimiter<S>,
    pub burst: FixedWindowRateLimiter<S>,
}

impl<S> FormLimiters<S>
where
    S: RateLimitStore + Send + Sync + 'static,
{
    /// Build every limiter, calling `new_store` once per limiter.
    pub fn new(config: &FormsConfig, clock: Arc<dyn Clock>, mut new_store: impl FnMut() -> S) -> Self {
        let mut limiter = |rate_limit| {
            FixedWindowRateLimiter::new(Arc::new(new_store()), clock.clone(), rate_limit)
        };

        Self {
            contact: limiter(config.contact.rate_limit.clone()),
            newsletter: limiter(config.newsletter.rate_limit.clone()),
            wholesale: limiter(config.wholesale.rate_limit.clone()),
            burst: limiter(config.burst_limit.clone()),
        }
    }

    pub fn for_form(&self, form: FormKind) -> &FixedWindowRateLimiter<S> {
        match form {
            FormKind::Contact => &self.contact,
            FormKind::Newsletter => &self.newsletter,
            FormKind::Wholesale => &self.wholesale,
        }
    }

    /// Every limiter, for the background sweeper
    pub fn all(&self) -> Vec<FixedWindowRateLimiter<S>> {
        vec![
            self.contact.clone(),
            self.newsletter.clone(),
            self.wholesale.clone(),
            self.burst.clone(),
        ]
    }
}

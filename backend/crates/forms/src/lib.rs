//! Forms Backend Module
//!
//! Spam and bot screening for the public website forms (contact,
//! newsletter, wholesale) in front of a hosted form-to-email relay.
//!
//! Clean Architecture structure:
//! - `domain/` - Submission model, heuristics, ports to CAPTCHA and relay
//! - `application/` - Configuration, rate limiters, submission pipeline
//! - `infra/` - reqwest implementations of the ports
//! - `presentation/` - HTTP handlers, middleware, router
//!
//! ## Trust Model
//! - Honeypot, timing and interaction signals come from the client and are
//!   heuristics only; passing them proves nothing
//! - Bots tripping the honeypot or timing check get a normal success response
//! - Rejection reasons are logged, never returned to the client

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{Environment, FormPolicy, FormsConfig};
pub use application::submit_form::{SubmissionOutcome, SubmitFormUseCase};
pub use domain::entities::{FormFields, FormKind, SubmissionAttempt};
pub use error::{FormError, FormResult};
pub use infra::recaptcha::RecaptchaVerifier;
pub use infra::relay::HttpFormRelay;
pub use presentation::handlers::FormsAppState;
pub use presentation::router::forms_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

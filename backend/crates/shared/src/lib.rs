//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate holds the vocabulary every form endpoint agrees on:
//! - The unified [`error::app_error::AppError`] type and result alias
//! - [`error::kind::ErrorKind`], the status classification used by every response
//!
//! Anything form-specific (heuristics, relay, captcha) lives in the `forms` crate.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}

//! Domain Layer - Spam and bot heuristics
//!
//! This layer contains:
//! - Domain entities (FormKind, SubmissionAttempt)
//! - Domain value objects (SpamReason, SpamVerdict, ContentMode)
//! - Domain services (honeypot/timing checks, content classifier)
//! - Ports to external collaborators (CAPTCHA verifier, form relay)

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;

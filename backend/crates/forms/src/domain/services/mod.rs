//! Domain Services
//!
//! Pure screening logic. No I/O, no clock access: callers pass `now_ms`.

pub mod classifier;
pub mod honeypot;

//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Client identification (forwarded headers, peer address, `"unknown"` bucket)
//! - Clock port for deterministic time in tests
//! - Fixed-window rate limiting with an injectable store
//! - Background sweeping of stale rate-limit entries

pub mod client;
pub mod clock;
pub mod rate_limit;
pub mod store;
pub mod sweeper;

// safecp/src/lib.rs
//! The `safecp` binary crate: process bootstrap, logging setup, and the
//! arboard-backed clipboard provider. All sanitization and monitoring logic
//! lives in `safecp-core`.
//!
//! License: MIT OR Apache-2.0

pub mod clipboard;
pub mod logger;

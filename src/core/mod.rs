//! Core components of the `ysummary-rs` client.
//!
//! This module contains the foundational building blocks of the library:
//! - The main [`YsClient`] and its builder.
//! - The primary [`YsError`] type.
//! - The [`Table`] normalizer for nested module payloads.
//! - The bounded per-symbol fan-out used by both readers.

/// The main client (`YsClient`), builder, and retry configuration.
pub mod client;
/// The primary error type (`YsError`) for the crate.
pub mod error;
/// Flat tables and the payload normalizer.
pub mod table;

pub(crate) mod batch;

// convenient re-exports so most code can just `use crate::core::YsClient`
pub use client::{Backoff, RetryConfig, YsClient, YsClientBuilder};
pub use error::YsError;
pub use table::{Table, normalize};

//! ysummary-rs: async Yahoo Finance quoteSummary and chart reader.
//!
//! Fetches report modules for batches of symbols concurrently, flattens the
//! nested JSON payloads into plain column/row tables, and keeps every
//! per-symbol outcome (value, error, or never-requested) addressable without
//! one bad symbol failing the batch.

pub mod core;
pub mod quote;
pub mod summary;

pub use crate::core::{Backoff, RetryConfig, Table, YsClient, YsClientBuilder, YsError};
pub use quote::{Interval, QuoteBuilder, QuoteReport, QuoteSet};
pub use summary::{FieldState, Module, Summary, SummaryBuilder, SummarySet, SummarySlot};

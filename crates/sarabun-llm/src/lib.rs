//! Extraction-oracle client for Sarabun
//!
//! The heavy work of this system (OCR, semantic field extraction) is
//! delegated to a hosted chat-completion model treated as an opaque oracle:
//! it accepts text or an image plus an instruction describing a JSON shape,
//! and returns free-form text that should be that JSON, possibly wrapped in
//! a markdown code fence.
//!
//! This crate owns everything around that boundary:
//! - credential/model configuration (`config`)
//! - the HTTPS chat-completions transport (`client`)
//! - prompt templates as one operator-tunable artifact (`prompt`)
//! - fence stripping and JSON parsing with a transport/content error split
//!   (`sanitize`)
//! - the typed extraction records for both pipelines (`schema`)
//!
//! No failure is retried here: the oracle is queried once per user action,
//! and a bad reply is reported so the operator can re-run extraction.

pub mod client;
pub mod config;
pub mod prompt;
pub mod sanitize;
pub mod schema;

pub use client::{ExtractionOracle, GroqClient, ImageAttachment, OracleRequest};
pub use config::{ConfigError, OracleConfig};
pub use prompt::PromptTemplate;
pub use sanitize::{parse_oracle_json, strip_markdown_fence};
pub use schema::{BudgetExtraction, BudgetItem, ReceiptExtraction, ReceiptLineItem};

// Re-export the review-record types for convenience.
pub use sarabun_store::{BudgetLine, BudgetReview};

// ============================================================================
// Errors
// ============================================================================

/// Failures at the oracle boundary.
///
/// `Transport` and `Content` are deliberately distinct: the caller can tell
/// "the service could not be reached" apart from "the service answered but
/// the answer was unusable".
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// The upload could not be turned into a payload (e.g. an unsupported
    /// image format). Surfaced before any network call.
    #[error("unsupported upload: {0}")]
    Payload(String),
    /// Network error or non-success HTTP status.
    #[error("oracle transport failure: {0}")]
    Transport(String),
    /// The reply was not usable JSON after fence stripping.
    #[error("oracle content failure: {0}")]
    Content(String),
}

//! Document ingestion for Sarabun
//!
//! Turns an uploaded PDF into the bounded text that is forwarded to the
//! extraction oracle:
//! - Per-page plain text plus concatenated full text (`pdf`)
//! - Relevant-page selection by Thai section-header markers (`selector`)
//! - Page-delimited prompt text over the selected pages (`builder`)
//!
//! The selection step is a heuristic over raw page text, not a section
//! parser: it matches literal header substrings and tolerates documents
//! where the markers are missing or ambiguous. Absence of a marker shrinks
//! the result, it never fails the request.

pub mod builder;
pub mod pdf;
pub mod selector;

pub use builder::build_optimized_text;
pub use pdf::{PdfDocument, PdfError, PdfTextExtractor};
pub use selector::select_relevant_pages;

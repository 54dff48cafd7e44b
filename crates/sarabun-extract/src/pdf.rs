//! PDF text extraction.
//!
//! Thin wrapper over `pdf-extract` that produces per-page plain text plus
//! the concatenated full text. Page indices are 0-based and contiguous;
//! everything downstream (selection, prompt building) keys off them.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Extracted PDF content: one text blob per page, plus the full text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfDocument {
    /// Raw text of each page, index = 0-based page number.
    pub pages: Vec<String>,
    /// All pages concatenated in order.
    pub text: String,
}

impl PdfDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// PDF parser producing [`PdfDocument`] values.
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Parse a PDF from a file path.
    pub fn parse_file(&self, path: &Path) -> Result<PdfDocument, PdfError> {
        debug!("extracting PDF text: {:?}", path);
        let pages = pdf_extract::extract_text_by_pages(path)
            .map_err(|e| PdfError::ExtractionFailed(e.to_string()))?;
        Ok(Self::assemble(pages))
    }

    /// Parse a PDF from raw bytes (uploads never touch the filesystem).
    pub fn parse_bytes(&self, data: &[u8]) -> Result<PdfDocument, PdfError> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(data)
            .map_err(|e| PdfError::ExtractionFailed(e.to_string()))?;
        Ok(Self::assemble(pages))
    }

    fn assemble(pages: Vec<String>) -> PdfDocument {
        let text = pages.join("\n");
        debug!("extracted {} pages, {} chars", pages.len(), text.len());
        PdfDocument { pages, text }
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("PDF extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

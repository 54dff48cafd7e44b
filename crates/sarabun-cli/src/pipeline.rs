//! Request-scoped document pipeline.
//!
//! One [`DocumentJob`] value owns everything a single extraction request
//! touches: the uploaded bytes, the per-page text, the selected pages, and
//! the bounded prompt text. It is built fresh per request and dropped when
//! the request ends; no state crosses requests except the optional store.
//!
//! Stage order: document bytes → page extraction → page selection (PDF
//! only) → optimized text → oracle call → sanitation/parse → record.

use anyhow::{Context, Result};
use sarabun_extract::{build_optimized_text, select_relevant_pages, PdfTextExtractor};
use sarabun_llm::{
    parse_oracle_json, BudgetExtraction, ExtractionOracle, ImageAttachment, OracleRequest,
    PromptTemplate, ReceiptExtraction,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything one budget-extraction request carries between stages.
pub struct DocumentJob {
    pub source: PathBuf,
    pub pages: Vec<String>,
    pub selected: Vec<usize>,
    pub optimized_text: String,
}

impl DocumentJob {
    /// Read and prepare a budget PDF: extract page text, pick the relevant
    /// pages, assemble the bounded prompt text. Fails before any oracle
    /// call if the document is unreadable.
    pub fn prepare_budget_pdf(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read document {}", path.display()))?;
        let document = PdfTextExtractor::new()
            .parse_bytes(&bytes)
            .with_context(|| format!("failed to extract text from {}", path.display()))?;
        anyhow::ensure!(
            document.page_count() > 0,
            "document {} contained no extractable pages",
            path.display()
        );

        let selected = select_relevant_pages(&document.pages);
        let optimized_text = build_optimized_text(&document.pages, &selected);
        info!(
            "prepared {}: {} pages, {} selected, {} prompt chars",
            path.display(),
            document.page_count(),
            selected.len(),
            optimized_text.len()
        );

        Ok(Self {
            source: path.to_path_buf(),
            pages: document.pages,
            selected,
            optimized_text,
        })
    }
}

/// Run the budget pipeline end to end: prepare the PDF, query the oracle
/// once, parse the reply.
pub async fn extract_budget(
    oracle: &dyn ExtractionOracle,
    template: &PromptTemplate,
    pdf_path: &Path,
) -> Result<(BudgetExtraction, DocumentJob)> {
    let job = DocumentJob::prepare_budget_pdf(pdf_path)?;
    let prompt = template.render_with_document(&job.optimized_text);
    let reply = oracle.complete(OracleRequest::text(prompt)).await?;
    let extraction = parse_oracle_json(&reply)?;
    Ok((extraction, job))
}

/// Run the receipt pipeline: read the image, query the oracle once, parse
/// the reply.
pub async fn extract_receipt(
    oracle: &dyn ExtractionOracle,
    template: &PromptTemplate,
    image_path: &Path,
) -> Result<ReceiptExtraction> {
    let bytes = std::fs::read(image_path)
        .with_context(|| format!("failed to read image {}", image_path.display()))?;
    let attachment = ImageAttachment::from_bytes(bytes)?;
    let request = OracleRequest::with_image(template.instruction().to_string(), attachment);
    let reply = oracle.complete(request).await?;
    let extraction = parse_oracle_json(&reply)?;
    Ok(extraction)
}

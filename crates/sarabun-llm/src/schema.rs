//! Typed extraction records.
//!
//! The oracle is free-form: every field is optional on the wire, and a
//! missing key deserializes to its default rather than failing the whole
//! reply. Shape problems beyond that surface as content failures in
//! `sanitize`.

use sarabun_store::{BudgetLine, BudgetReview};
use serde::{Deserialize, Serialize};

// ============================================================================
// Receipt extraction (image pipeline)
// ============================================================================

/// One receipt row: a description and a monetary amount.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptLineItem {
    pub description: String,
    pub amount: Option<f64>,
}

/// Flat receipt fields as requested by the receipt prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptExtraction {
    pub merchant_name: Option<String>,
    pub merchant_address: Option<String>,
    pub tax_id: Option<String>,
    pub contact: Option<String>,
    pub customer_name: Option<String>,
    pub customer_address: Option<String>,
    pub transaction_date: Option<String>,
    pub line_items: Vec<ReceiptLineItem>,
    pub total: Option<f64>,
    pub vat: Option<f64>,
    pub net_total: Option<f64>,
    pub collector_signed: Option<bool>,
}

// ============================================================================
// Budget extraction (PDF pipeline)
// ============================================================================

/// One budget row as the oracle reports it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetItem {
    pub activity_name: String,
    pub description: String,
    pub amount: Option<f64>,
}

/// Budget fields as requested by the budget prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetExtraction {
    pub project_name: Option<String>,
    pub responsible_person: Option<String>,
    pub budget_items: Vec<BudgetItem>,
}

impl From<BudgetExtraction> for BudgetReview {
    /// Lift an oracle reply into the editable review record. Missing
    /// values become empty strings / zero amounts for the operator to fill
    /// in; validation happens later, at the save boundary.
    fn from(extraction: BudgetExtraction) -> Self {
        BudgetReview {
            project_name: extraction.project_name.unwrap_or_default(),
            responsible_person: extraction.responsible_person.unwrap_or_default(),
            items: extraction
                .budget_items
                .into_iter()
                .map(|item| BudgetLine {
                    activity_name: item.activity_name,
                    description: item.description,
                    amount: item.amount.unwrap_or(0.0),
                })
                .collect(),
        }
    }
}

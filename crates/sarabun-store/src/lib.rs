//! Review records and persistence for Sarabun
//!
//! The oracle's budget extraction lands in a [`BudgetReview`]: a plain,
//! mutable record the operator can inspect and correct before anything is
//! written anywhere. Validation happens only at the save boundary; a
//! rejected save leaves the record editable for another attempt.
//!
//! Persistence is an append-only two-table SQLite schema (`db`): one
//! project row plus its budget line items, written in one transaction.
//! There is no update or delete path.

use serde::{Deserialize, Serialize};

pub mod db;

pub use db::{ProjectRecord, ProjectStore};

// ============================================================================
// Review record
// ============================================================================

/// One budget line under review: an activity, what the money is for, and
/// the amount in baht.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub activity_name: String,
    pub description: String,
    pub amount: f64,
}

/// An editable budget record, as extracted from a project-proposal PDF.
///
/// All fields are public: the review stage is free-form editing, and
/// nothing is checked until [`BudgetReview::validate`] runs at save time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetReview {
    pub project_name: String,
    pub responsible_person: String,
    pub items: Vec<BudgetLine>,
}

impl BudgetReview {
    pub fn add_item(&mut self, activity_name: &str, description: &str, amount: f64) {
        self.items.push(BudgetLine {
            activity_name: activity_name.to_string(),
            description: description.to_string(),
            amount,
        });
    }

    /// Sum of all line-item amounts.
    pub fn total_amount(&self) -> f64 {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// Save-boundary validation. Never called during extraction.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.project_name.trim().is_empty() {
            return Err(StoreError::Validation("project name is empty".to_string()));
        }
        if self.responsible_person.trim().is_empty() {
            return Err(StoreError::Validation(
                "responsible person is empty".to_string(),
            ));
        }
        if self.items.is_empty() {
            return Err(StoreError::Validation(
                "budget item list is empty".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Configuration
// ============================================================================

pub const SARABUN_DB_ENV: &str = "SARABUN_DB";
pub const SARABUN_ENABLE_SAVE_ENV: &str = "SARABUN_ENABLE_SAVE";

const DEFAULT_DB_PATH: &str = "sarabun.db";

/// Store configuration, loaded from the environment or built directly.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub db_path: std::path::PathBuf,
    /// When false, extraction still runs but every save is refused.
    pub save_enabled: bool,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        let db_path = std::env::var(SARABUN_DB_ENV)
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|_| std::path::PathBuf::from(DEFAULT_DB_PATH));
        let save_enabled = std::env::var(SARABUN_ENABLE_SAVE_ENV)
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Self {
            db_path,
            save_enabled,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("saving is disabled by configuration (set {SARABUN_ENABLE_SAVE_ENV}=1)")]
    SaveDisabled,
    #[error("record is not ready to save: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("invalid stored record: {0}")]
    Corrupt(String),
}

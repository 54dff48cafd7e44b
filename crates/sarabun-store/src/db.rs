//! Append-only SQLite persistence for reviewed budget records.
//!
//! Two tables: a project row (generated id, names, creation timestamp) and
//! its budget line items. One save writes the project plus all items in a
//! single transaction. Saved rows are never updated or deleted.

use crate::{BudgetLine, BudgetReview, StoreConfig, StoreError};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

/// A persisted project with its line items, as read back for listing.
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    pub id: Uuid,
    pub project_name: String,
    pub responsible_person: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<BudgetLine>,
}

/// Handle over the review database.
pub struct ProjectStore {
    conn: Connection,
    save_enabled: bool,
}

impl ProjectStore {
    /// Open (creating if needed) the database at the configured path.
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let conn = Connection::open(&config.db_path)?;
        Self::create_schema(&conn)?;
        debug!("opened review store at {:?}", config.db_path);
        Ok(Self {
            conn,
            save_enabled: config.save_enabled,
        })
    }

    /// Open a throwaway in-memory store with saving enabled.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::create_schema(&conn)?;
        Ok(Self {
            conn,
            save_enabled: true,
        })
    }

    pub fn open_at(path: &Path, save_enabled: bool) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::create_schema(&conn)?;
        Ok(Self { conn, save_enabled })
    }

    fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS projects (
                id TEXT PRIMARY KEY,
                project_name TEXT NOT NULL,
                responsible_person TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS budget_items (
                id TEXT PRIMARY KEY,
                project_id TEXT NOT NULL,
                activity_name TEXT NOT NULL,
                description TEXT NOT NULL,
                amount REAL NOT NULL,
                FOREIGN KEY (project_id) REFERENCES projects(id)
            );

            CREATE INDEX IF NOT EXISTS idx_budget_items_project
                ON budget_items(project_id);
            "#,
        )
    }

    /// Persist a reviewed record: one project row plus its items, in one
    /// transaction. Refused when saving is disabled or validation fails;
    /// either way the in-memory record is untouched and stays editable.
    pub fn save_review(&mut self, review: &BudgetReview) -> Result<Uuid, StoreError> {
        if !self.save_enabled {
            return Err(StoreError::SaveDisabled);
        }
        review.validate()?;

        let project_id = Uuid::new_v4();
        let created_at = Utc::now();

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO projects (id, project_name, responsible_person, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                project_id.to_string(),
                review.project_name,
                review.responsible_person,
                created_at.to_rfc3339(),
            ],
        )?;
        for item in &review.items {
            tx.execute(
                "INSERT INTO budget_items (id, project_id, activity_name, description, amount)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    Uuid::new_v4().to_string(),
                    project_id.to_string(),
                    item.activity_name,
                    item.description,
                    item.amount,
                ],
            )?;
        }
        tx.commit()?;

        info!(
            "saved project {} ({} items)",
            project_id,
            review.items.len()
        );
        Ok(project_id)
    }

    /// All saved projects with their items, newest first.
    pub fn list_projects(&self) -> Result<Vec<ProjectRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, project_name, responsible_person, created_at
             FROM projects ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut projects = Vec::new();
        for row in rows {
            let (id, project_name, responsible_person, created_at) = row?;
            let id = Uuid::parse_str(&id)
                .map_err(|e| StoreError::Corrupt(format!("project id {id}: {e}")))?;
            let created_at = DateTime::parse_from_rfc3339(&created_at)
                .map_err(|e| StoreError::Corrupt(format!("created_at {created_at}: {e}")))?
                .with_timezone(&Utc);
            let items = self.project_items(id)?;
            projects.push(ProjectRecord {
                id,
                project_name,
                responsible_person,
                created_at,
                items,
            });
        }
        Ok(projects)
    }

    fn project_items(&self, project_id: Uuid) -> Result<Vec<BudgetLine>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT activity_name, description, amount
             FROM budget_items WHERE project_id = ?1 ORDER BY rowid",
        )?;
        let rows = stmt.query_map(params![project_id.to_string()], |row| {
            Ok(BudgetLine {
                activity_name: row.get(0)?,
                description: row.get(1)?,
                amount: row.get(2)?,
            })
        })?;
        let mut items = Vec::new();
        for item in rows {
            items.push(item?);
        }
        Ok(items)
    }
}

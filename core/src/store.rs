//! SQLite persistence for todos.
//!
//! # Design
//! `TodoStore` wraps an `sqlx::SqlitePool`, which is internally reference
//! counted, so cloning the store is cheap and every clone shares the same
//! connections. Each operation issues one statement; `update` and
//! `toggle_complete` follow the write with an explicit `get_by_id` so the
//! returned record is what was persisted and a write that touched zero rows
//! surfaces as `NotFound`.
//!
//! Concurrent writes to the same id are last-write-wins. SQLite serializes
//! the statements; no version column or conflict check exists.

use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::types::Todo;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL CHECK (length(title) > 0),
    description TEXT NOT NULL DEFAULT '',
    completed   BOOLEAN NOT NULL DEFAULT FALSE,
    created_at  DATETIME NOT NULL,
    updated_at  DATETIME NOT NULL
)
"#;

const SELECT_COLUMNS: &str =
    "SELECT id, title, description, completed, created_at, updated_at FROM todos";

const MAX_CONNECTIONS: u32 = 5;

/// Handle to the `todos` table.
#[derive(Debug, Clone)]
pub struct TodoStore {
    pool: SqlitePool,
}

impl TodoStore {
    /// Open (creating if needed) the database at `location` and bootstrap the
    /// schema. `location` is either a file path or an `sqlite:` DSN.
    pub async fn open(location: &str) -> Result<Self> {
        let options = if location.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(location)?
        } else {
            SqliteConnectOptions::new().filename(location)
        };
        let options = options
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        debug!(location, "opened todo store");
        Ok(store)
    }

    /// Private in-memory database. Every SQLite in-memory connection is its
    /// own database, so the pool is pinned to a single connection that is
    /// never recycled.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Wrap an existing pool. The schema is not touched; call `init_schema`
    /// if the table may be missing.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Insert a new, incomplete todo and return it with its assigned id.
    pub async fn create(&self, title: &str, description: &str) -> Result<Todo> {
        let now = now();
        let result = sqlx::query(
            "INSERT INTO todos (title, description, completed, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(title)
        .bind(description)
        .bind(false)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, "created todo");

        Ok(Todo {
            id,
            title: title.to_string(),
            description: description.to_string(),
            completed: false,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Todo> {
        sqlx::query_as::<_, Todo>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    /// All todos, newest first.
    pub async fn get_all(&self) -> Result<Vec<Todo>> {
        let todos = sqlx::query_as::<_, Todo>(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(todos)
    }

    /// Replace title and description. `completed` and `created_at` are left
    /// untouched.
    pub async fn update(&self, id: i64, title: &str, description: &str) -> Result<Todo> {
        let result = sqlx::query(
            "UPDATE todos SET title = ?, description = ?, updated_at = ? WHERE id = ?",
        )
        .bind(title)
        .bind(description)
        .bind(now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        debug!(id, rows = result.rows_affected(), "updated todo");

        self.get_by_id(id).await
    }

    /// Hard delete. Deleting an id that does not exist is not an error.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        debug!(id, rows = result.rows_affected(), "deleted todo");
        Ok(())
    }

    /// Set `completed` to exactly the given value.
    pub async fn toggle_complete(&self, id: i64, completed: bool) -> Result<Todo> {
        let result = sqlx::query("UPDATE todos SET completed = ?, updated_at = ? WHERE id = ?")
            .bind(completed)
            .bind(now())
            .bind(id)
            .execute(&self.pool)
            .await?;
        debug!(id, completed, rows = result.rows_affected(), "toggled todo");

        self.get_by_id(id).await
    }
}

// Microsecond precision keeps the in-memory value returned by `create` equal
// to what a later read decodes.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

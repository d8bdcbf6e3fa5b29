//! Storage for the knowledge base and the interaction log.
//!
//! Both collections live in one SQLite database. Rows come back in insertion
//! order, which is the order the resolver scans them in.

use crate::types::{KnowledgeEntry, LogEntry};
use chrono::{DateTime, Utc};
use faq_core::{AppError, AppResult};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Read/append access to question/answer pairs.
pub trait KnowledgeStore: Send + Sync {
    /// Fetch every entry in store order.
    fn all_entries(&self) -> AppResult<Vec<KnowledgeEntry>>;

    /// Append an entry. No uniqueness check is made.
    fn insert_entry(&self, entry: &KnowledgeEntry) -> AppResult<()>;
}

/// Append-only record of resolved questions.
pub trait InteractionLog: Send + Sync {
    /// Append an interaction, stamping it with the current time.
    fn record(&self, question: &str, answer: &str) -> AppResult<LogEntry>;

    /// Fetch every logged interaction in write order.
    fn all_logs(&self) -> AppResult<Vec<LogEntry>>;
}

/// SQLite-backed implementation of both collections.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path`.
    pub fn open(db_path: &Path) -> AppResult<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::Store(format!("Failed to create database directory: {}", e))
                })?;
            }
        }

        let conn = Connection::open(db_path)
            .map_err(|e| AppError::Store(format!("Failed to open SQLite database: {}", e)))?;

        let store = Self::with_connection(conn)?;
        tracing::debug!("Opened SQLite store at {:?}", db_path);
        Ok(store)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::Store(format!("Failed to open in-memory database: {}", e)))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> AppResult<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS knowledge_base (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                question TEXT NOT NULL,
                answer TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                time TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| AppError::Store(format!("Failed to create tables: {}", e)))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> AppResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| AppError::Store("SQLite connection lock poisoned".to_string()))
    }

    /// Number of knowledge entries.
    pub fn count_entries(&self) -> AppResult<u64> {
        self.conn()?
            .query_row("SELECT COUNT(*) FROM knowledge_base", [], |row| {
                row.get::<_, i64>(0).map(|v| v as u64)
            })
            .map_err(|e| AppError::Store(format!("Failed to count entries: {}", e)))
    }
}

impl KnowledgeStore for SqliteStore {
    fn all_entries(&self) -> AppResult<Vec<KnowledgeEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT question, answer FROM knowledge_base ORDER BY id")
            .map_err(|e| AppError::Store(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(KnowledgeEntry {
                    question: row.get(0)?,
                    answer: row.get(1)?,
                })
            })
            .map_err(|e| AppError::Store(format!("Failed to query knowledge base: {}", e)))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::Store(format!("Malformed knowledge entry: {}", e)))
    }

    fn insert_entry(&self, entry: &KnowledgeEntry) -> AppResult<()> {
        self.conn()?
            .execute(
                "INSERT INTO knowledge_base (question, answer) VALUES (?1, ?2)",
                params![entry.question, entry.answer],
            )
            .map_err(|e| AppError::Store(format!("Failed to insert entry: {}", e)))?;

        Ok(())
    }
}

impl InteractionLog for SqliteStore {
    fn record(&self, question: &str, answer: &str) -> AppResult<LogEntry> {
        let entry = LogEntry {
            question: question.to_string(),
            answer: answer.to_string(),
            timestamp: Utc::now(),
        };

        self.conn()?
            .execute(
                "INSERT INTO logs (question, answer, time) VALUES (?1, ?2, ?3)",
                params![entry.question, entry.answer, entry.timestamp.to_rfc3339()],
            )
            .map_err(|e| AppError::Store(format!("Failed to insert log entry: {}", e)))?;

        Ok(entry)
    }

    fn all_logs(&self) -> AppResult<Vec<LogEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT question, answer, time FROM logs ORDER BY id")
            .map_err(|e| AppError::Store(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                let time: String = row.get(2)?;
                let timestamp = DateTime::parse_from_rfc3339(&time)
                    .map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(
                            2,
                            rusqlite::types::Type::Text,
                            Box::new(e),
                        )
                    })?
                    .with_timezone(&Utc);

                Ok(LogEntry {
                    question: row.get(0)?,
                    answer: row.get(1)?,
                    timestamp,
                })
            })
            .map_err(|e| AppError::Store(format!("Failed to query logs: {}", e)))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::Store(format!("Malformed log entry: {}", e)))
    }
}

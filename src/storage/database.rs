//! SQLite database for extracted document text
//!
//! An explicit, injectable handle with an internal mutex rather than a
//! process-global connection, so tests can run against in-memory databases and
//! handlers can share one instance safely.

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::document::DocumentRecord;

/// SQLite-backed store for raw document text
#[derive(Clone)]
pub struct DocumentDb {
    conn: Arc<Mutex<Connection>>,
}

impl DocumentDb {
    /// Create or open the database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| Error::Database(format!("Failed to open database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.migrate()?;
        Ok(db)
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::Database(format!("Failed to open in-memory database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
        "#,
        )
        .map_err(|e| Error::Database(format!("Failed to set pragmas: {}", e)))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id TEXT PRIMARY KEY,
                filename TEXT NOT NULL,
                content TEXT NOT NULL,
                ingested_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_documents_filename ON documents(filename);
        "#,
        )
        .map_err(|e| Error::Database(format!("Failed to run migrations: {}", e)))?;

        Ok(())
    }

    /// Save extracted document text; replaces any previous row with the same ID
    pub fn save(&self, id: &str, filename: &str, content: &str) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT OR REPLACE INTO documents (id, filename, content, ingested_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![id, filename, content, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Get document text by ID
    pub fn get(&self, id: &str) -> Result<Option<String>> {
        let conn = self.conn.lock();
        let content = conn
            .query_row(
                "SELECT content FROM documents WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(content)
    }

    /// Get a full document record by ID
    pub fn get_record(&self, id: &str) -> Result<Option<DocumentRecord>> {
        let conn = self.conn.lock();
        let record = conn
            .query_row(
                "SELECT id, filename, content, ingested_at FROM documents WHERE id = ?1",
                params![id],
                |row| {
                    Ok(DocumentRecord {
                        id: row.get(0)?,
                        filename: row.get(1)?,
                        content: row.get(2)?,
                        ingested_at: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    /// Delete a document; returns true if a row was removed
    pub fn delete(&self, id: &str) -> Result<bool> {
        let conn = self.conn.lock();
        let removed = conn.execute("DELETE FROM documents WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    /// List all stored documents (without content)
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT id, filename FROM documents ORDER BY ingested_at")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_get() {
        let db = DocumentDb::in_memory().unwrap();
        db.save("doc1", "notes.txt", "hello").unwrap();

        assert_eq!(db.get("doc1").unwrap().as_deref(), Some("hello"));
        assert!(db.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_save_replaces_existing() {
        let db = DocumentDb::in_memory().unwrap();
        db.save("doc1", "notes.txt", "v1").unwrap();
        db.save("doc1", "notes.txt", "v2").unwrap();

        assert_eq!(db.get("doc1").unwrap().as_deref(), Some("v2"));
        assert_eq!(db.list().unwrap().len(), 1);
    }

    #[test]
    fn test_delete() {
        let db = DocumentDb::in_memory().unwrap();
        db.save("doc1", "notes.txt", "hello").unwrap();

        assert!(db.delete("doc1").unwrap());
        assert!(!db.delete("doc1").unwrap());
        assert!(db.get("doc1").unwrap().is_none());
    }

    #[test]
    fn test_get_record() {
        let db = DocumentDb::in_memory().unwrap();
        db.save("doc1", "notes.txt", "hello").unwrap();

        let record = db.get_record("doc1").unwrap().unwrap();
        assert_eq!(record.filename, "notes.txt");
        assert_eq!(record.content, "hello");
    }
}

//! SQLite-backed letter store for self-hosted deployments.

use async_trait::async_trait;
use chrono::DateTime;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

use crate::letter::{Letter, NewLetter};
use crate::store::LetterStore;
use letterlock_common::{Error, LetterId, Result};

/// Letter store backed by a local SQLite database.
///
/// Row operations are small single-statement writes and reads; the
/// connection is shared behind a mutex.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Create or open a letter database.
    ///
    /// # Errors
    /// - Database creation or schema setup failure
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(db_path).map_err(|e| Error::Storage(e.to_string()))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS letters (
                id TEXT PRIMARY KEY,
                ciphertext TEXT NOT NULL,
                iv TEXT NOT NULL,
                recipient_email TEXT NOT NULL,
                recipient_name TEXT NOT NULL,
                sender_name TEXT,
                return_address TEXT,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| Error::Storage(e.to_string()))?;

        info!("Letter database opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory database (for testing).
    pub fn in_memory() -> Result<Self> {
        Self::open(":memory:")
    }

    fn row_to_letter(row: &rusqlite::Row<'_>) -> rusqlite::Result<Letter> {
        let id: String = row.get(0)?;
        let created_at: String = row.get(7)?;
        Ok(Letter {
            // Both fields were validated on the way in; treat corruption
            // as a type error at the row boundary.
            id: LetterId::new(id).map_err(|_| rusqlite::Error::InvalidQuery)?,
            ciphertext: row.get(1)?,
            iv: row.get(2)?,
            recipient_email: row.get(3)?,
            recipient_name: row.get(4)?,
            sender_name: row.get(5)?,
            return_address: row.get(6)?,
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .map_err(|_| rusqlite::Error::InvalidQuery)?
                .with_timezone(&chrono::Utc),
        })
    }
}

#[async_trait]
impl LetterStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn insert(&self, letter: NewLetter) -> Result<Letter> {
        let letter = letter.into_letter();
        debug!(id = %letter.id, "Inserting letter row");

        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO letters
            (id, ciphertext, iv, recipient_email, recipient_name, sender_name, return_address, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                letter.id.as_str(),
                letter.ciphertext,
                letter.iv,
                letter.recipient_email,
                letter.recipient_name,
                letter.sender_name,
                letter.return_address,
                letter.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| Error::Storage(e.to_string()))?;

        Ok(letter)
    }

    async fn fetch(&self, id: &LetterId) -> Result<Letter> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                r#"
                SELECT id, ciphertext, iv, recipient_email, recipient_name,
                       sender_name, return_address, created_at
                FROM letters WHERE id = ?1
                "#,
            )
            .map_err(|e| Error::Storage(e.to_string()))?;

        match stmt.query_row([id.as_str()], Self::row_to_letter) {
            Ok(letter) => Ok(letter),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Err(Error::NotFound(format!("No letter with id {}", id)))
            }
            Err(e) => Err(Error::Storage(e.to_string())),
        }
    }
}

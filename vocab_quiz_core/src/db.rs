//! SQLite-backed slot storage for progress records

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::QuizResult;
use crate::progress::SlotStorage;

/// Slot storage kept in a SQLite database.
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open (or create) the database at `db_path` and make sure the schema exists.
    pub fn open(db_path: &str) -> QuizResult<Self> {
        let conn = Connection::open(db_path)?;
        init_database(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> QuizResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_database(&conn)?;
        Ok(Self { conn })
    }

    /// When the slot was last written, as an RFC 3339 timestamp.
    pub fn updated_at(&self, slot: &str) -> QuizResult<Option<String>> {
        let updated = self
            .conn
            .query_row(
                "SELECT updated_at FROM progress_slots WHERE slot = ?1",
                params![slot],
                |row| row.get(0),
            )
            .optional()?;
        Ok(updated)
    }
}

/// Initialize database with schema
pub fn init_database(conn: &Connection) -> QuizResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS progress_slots (
            slot TEXT PRIMARY KEY,
            payload TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

impl SlotStorage for SqliteStorage {
    fn read(&self, slot: &str) -> QuizResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM progress_slots WHERE slot = ?1",
                params![slot],
                |row| row.get(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write(&mut self, slot: &str, payload: &str) -> QuizResult<()> {
        self.conn.execute(
            "INSERT INTO progress_slots (slot, payload, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(slot) DO UPDATE SET payload = excluded.payload, updated_at = excluded.updated_at",
            params![slot, payload, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&mut self, slot: &str) -> QuizResult<()> {
        self.conn
            .execute("DELETE FROM progress_slots WHERE slot = ?1", params![slot])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuizConfig;
    use crate::progress::{ProgressCounts, ProgressPersistence};
    use crate::word_store::WordEntry;

    #[test]
    fn missing_slot_reads_none() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        assert_eq!(storage.read("vocabProgress").unwrap(), None);
        assert_eq!(storage.updated_at("vocabProgress").unwrap(), None);
    }

    #[test]
    fn write_overwrites_whole_slot() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        storage.write("vocabProgress", "{}").unwrap();
        storage.write("vocabProgress", r#"{"a":{"correct":1,"wrong":0}}"#).unwrap();

        assert_eq!(
            storage.read("vocabProgress").unwrap().as_deref(),
            Some(r#"{"a":{"correct":1,"wrong":0}}"#)
        );
        assert!(storage.updated_at("vocabProgress").unwrap().is_some());
    }

    #[test]
    fn remove_clears_slot() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        storage.write("vocabProgress", "{}").unwrap();
        storage.remove("vocabProgress").unwrap();
        assert_eq!(storage.read("vocabProgress").unwrap(), None);
    }

    #[test]
    fn persistence_round_trip_through_sqlite() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let mut progress = ProgressPersistence::new(storage, &QuizConfig::default());
        let word = WordEntry {
            term: "再见".to_string(),
            pronunciation: Some("zàijiàn".to_string()),
            meaning: "bye".to_string(),
            correct_count: 7,
            wrong_count: 2,
        };
        progress.save([&word]).unwrap();

        assert_eq!(progress.load()["再见"], ProgressCounts { correct: 7, wrong: 2 });
    }
}

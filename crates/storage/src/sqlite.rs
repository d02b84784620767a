use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension};

use loadout_core::{RawFieldMap, UserId};

use crate::error::StorageError;
use crate::traits::{RecordStore, check_key};

/// SQLite-backed store. Each user's field map is one MessagePack blob,
/// stored exactly as given; the store never merges with the previous row.
pub struct SqliteRecordStore {
    conn: Mutex<Connection>,
}

impl SqliteRecordStore {
    pub fn open(path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        crate::schema::init_schema(&conn)?;
        tracing::debug!(path, "opened sqlite record store");
        Ok(Self { conn: Mutex::new(conn) })
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        crate::schema::init_schema(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Unavailable("sqlite connection lock poisoned".into()))
    }
}

fn to_blob(record: &RawFieldMap) -> Result<Vec<u8>, StorageError> {
    record
        .to_msgpack()
        .map_err(|e| StorageError::Serialization(e.to_string()))
}

fn from_blob(bytes: &[u8]) -> Result<RawFieldMap, StorageError> {
    RawFieldMap::from_msgpack(bytes).map_err(|e| StorageError::Serialization(e.to_string()))
}

impl RecordStore for SqliteRecordStore {
    fn get(&self, user_id: &UserId) -> Result<Option<RawFieldMap>, StorageError> {
        let conn = self.conn()?;
        let blob: Option<Vec<u8>> = conn
            .query_row(
                "SELECT fields FROM player_stats WHERE user_id = ?1",
                rusqlite::params![user_id.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        tracing::debug!(user = %user_id, found = blob.is_some(), "sqlite get");
        blob.as_deref().map(from_blob).transpose()
    }

    fn put(&self, user_id: &UserId, record: &RawFieldMap) -> Result<(), StorageError> {
        check_key(user_id, record)?;
        let blob = to_blob(record)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO player_stats (user_id, fields) VALUES (?1, ?2)
             ON CONFLICT (user_id) DO UPDATE SET
                fields = excluded.fields,
                updated_at = CAST(unixepoch('now','subsec') * 1000 AS INTEGER)",
            rusqlite::params![user_id.as_str(), blob],
        )?;
        tracing::debug!(user = %user_id, fields = record.len(), "sqlite put");
        Ok(())
    }

    fn insert_new(&self, user_id: &UserId, record: &RawFieldMap) -> Result<bool, StorageError> {
        check_key(user_id, record)?;
        let blob = to_blob(record)?;
        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO player_stats (user_id, fields) VALUES (?1, ?2)",
            rusqlite::params![user_id.as_str(), blob],
        )?;
        Ok(inserted == 1)
    }

    fn record_count(&self) -> Result<u64, StorageError> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT count(*) FROM player_stats", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

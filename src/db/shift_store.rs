//! SQLite-backed key-value store for shift-scoped state.
//!
//! This is the authoritative copy of every record list, block list and
//! equipment note. A write replaces the value under its key in a single
//! statement; there is no partial update.

use crate::db::db::Db;
use crate::db::store::{KeyValueStore, StoreKey};
use anyhow::Result;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Arc;

const SELECT_VALUE: &str = "SELECT value FROM shift_store WHERE scope = ?1 AND owner = ?2 AND field = ?3 AND shift = ?4";

const UPSERT_VALUE: &str = "INSERT INTO shift_store (scope, owner, field, shift, value, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, datetime(CURRENT_TIMESTAMP, 'localtime'))
    ON CONFLICT(scope, owner, field, shift) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

const DELETE_VALUE: &str = "DELETE FROM shift_store WHERE scope = ?1 AND owner = ?2 AND field = ?3 AND shift = ?4";

/// Cloneable handle over a shared connection.
#[derive(Clone)]
pub struct SqliteStore {
    pub conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn new() -> Result<Self> {
        Ok(Self::with_connection(Db::new()?.shared()))
    }

    pub fn with_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &StoreKey) -> Result<Option<String>> {
        let parts = key.parts();
        let conn = self.conn.lock();
        let value = conn
            .query_row(
                SELECT_VALUE,
                params![parts.scope, parts.owner, parts.field, parts.shift.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &StoreKey, value: &str) -> Result<()> {
        let parts = key.parts();
        let conn = self.conn.lock();
        conn.execute(UPSERT_VALUE, params![parts.scope, parts.owner, parts.field, parts.shift.as_str(), value])?;
        tracing::debug!(key = %key, bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &StoreKey) -> Result<()> {
        let parts = key.parts();
        let conn = self.conn.lock();
        conn.execute(DELETE_VALUE, params![parts.scope, parts.owner, parts.field, parts.shift.as_str()])?;
        Ok(())
    }
}

//! Outbox of writes waiting to be mirrored to the remote MES API.
//!
//! Local writes never wait on the network. Anything the remote API should
//! also see is queued here in the same database and pushed later by `sync`.
//! A failed push stays queued with its attempt count and last error, so a
//! divergence between local and remote state is always visible.

use crate::db::db::Db;
use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDateTime};
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

const INSERT_ENTRY: &str = "INSERT INTO outbox (method, path, payload, created_at) VALUES (?1, ?2, ?3, ?4)";
const SELECT_PENDING: &str = "SELECT id, method, path, payload, attempts, last_error, created_at FROM outbox ORDER BY id";
const DELETE_ENTRY: &str = "DELETE FROM outbox WHERE id = ?1";
const MARK_FAILED: &str = "UPDATE outbox SET attempts = attempts + 1, last_error = ?1 WHERE id = ?2";
const COUNT_PENDING: &str = "SELECT COUNT(*) FROM outbox";

/// HTTP verb of a queued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteMethod {
    Post,
    Put,
    Delete,
}

impl RemoteMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteMethod::Post => "POST",
            RemoteMethod::Put => "PUT",
            RemoteMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for RemoteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RemoteMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "POST" => Ok(RemoteMethod::Post),
            "PUT" => Ok(RemoteMethod::Put),
            "DELETE" => Ok(RemoteMethod::Delete),
            other => Err(anyhow!("unknown outbox method '{}'", other)),
        }
    }
}

/// One queued request.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboxEntry {
    pub id: i64,
    pub method: RemoteMethod,
    pub path: String,
    pub payload: serde_json::Value,
    pub attempts: u32,
    pub last_error: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone)]
pub struct Outbox {
    conn: Arc<Mutex<Connection>>,
}

impl Outbox {
    pub fn new() -> Result<Self> {
        Ok(Self::with_connection(Db::new()?.shared()))
    }

    pub fn with_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    pub fn enqueue(&self, method: RemoteMethod, path: &str, payload: &serde_json::Value) -> Result<i64> {
        let conn = self.conn.lock();
        conn.execute(
            INSERT_ENTRY,
            params![method.as_str(), path, serde_json::to_string(payload)?, Local::now().naive_local()],
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, method = %method, path, "queued remote write");
        Ok(id)
    }

    /// Queued entries, oldest first.
    pub fn pending(&self) -> Result<Vec<OutboxEntry>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(SELECT_PENDING)?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, u32>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, NaiveDateTime>(6)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, method, path, payload, attempts, last_error, created_at) = row?;
            entries.push(OutboxEntry {
                id,
                method: method.parse()?,
                path,
                payload: serde_json::from_str(&payload)?,
                attempts,
                last_error,
                created_at,
            });
        }
        Ok(entries)
    }

    pub fn mark_sent(&self, id: i64) -> Result<()> {
        self.conn.lock().execute(DELETE_ENTRY, params![id])?;
        Ok(())
    }

    pub fn mark_failed(&self, id: i64, error: &str) -> Result<()> {
        self.conn.lock().execute(MARK_FAILED, params![error, id])?;
        Ok(())
    }

    pub fn len(&self) -> Result<usize> {
        let count: i64 = self.conn.lock().query_row(COUNT_PENDING, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

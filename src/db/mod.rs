//! Persistence layer for mest.
//!
//! All shift-scoped state goes through the [`store::KeyValueStore`] trait,
//! addressed by typed [`store::StoreKey`]s. The SQLite backend in
//! [`shift_store`] is the authoritative copy; [`store::MemoryStore`] serves
//! tests and one-off calculations. Writes meant for the remote MES API are
//! queued in the [`outbox`] table of the same database.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mest::db::{records::RecordStore, shift_store::SqliteStore};
//! use mest::libs::record::MaintenanceRecord;
//! use mest::libs::shift::{ProcessId, Shift};
//!
//! let records = RecordStore::new(SqliteStore::new()?);
//! let list = records.list::<MaintenanceRecord>(&ProcessId::new("P1"), Shift::A)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection management and schema initialization.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

/// Queue of writes to mirror to the remote API.
pub mod outbox;

/// Append, list and delete on shift-scoped record lists.
pub mod records;

/// SQLite implementation of the key-value store.
pub mod shift_store;

/// Typed keys, the key-value trait and the in-memory store.
pub mod store;

//! Typed keys and the key-value interface shift data is stored through.
//!
//! Every piece of shift-scoped state lives under a [`StoreKey`]. The key is a
//! structured value rather than a formatted string, so a process id that
//! happens to contain `_maintenance_` can never collide with another key.
//! `Display` still renders the flat layout the dashboard used
//! (`process_{id}_maintenance_{shift}`, ...) for logs and exports.
//!
//! ## Usage
//!
//! ```rust
//! use mest::db::store::{KeyValueStore, MemoryStore, StoreKey};
//! use mest::libs::shift::{EquipmentField, EquipmentId, Shift};
//!
//! let store = MemoryStore::new();
//! let key = StoreKey::equipment(EquipmentId::new("CNC-2"), EquipmentField::Memo, Shift::B);
//! store.set(&key, "spindle noisy")?;
//! assert_eq!(store.get(&key)?.as_deref(), Some("spindle noisy"));
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::shift::{EquipmentField, EquipmentId, ProcessId, RecordKind, Shift, ShiftKey};
use crate::libs::messages::Message;
use crate::msg_warning;
use anyhow::Result;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Address of one stored value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// A maintenance or downtime list.
    Records(ShiftKey),
    /// Input-block state of a process.
    Blocks { process: ProcessId, shift: Shift },
    /// A plain-string equipment note.
    Equipment {
        equipment: EquipmentId,
        field: EquipmentField,
        shift: Shift,
    },
}

/// Column values of a key as the SQLite backend stores them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyParts<'a> {
    pub scope: &'static str,
    pub owner: &'a str,
    pub field: &'static str,
    pub shift: Shift,
}

impl StoreKey {
    pub fn records(process: ProcessId, kind: RecordKind, shift: Shift) -> Self {
        StoreKey::Records(ShiftKey::new(process, kind, shift))
    }

    pub fn blocks(process: ProcessId, shift: Shift) -> Self {
        StoreKey::Blocks { process, shift }
    }

    pub fn equipment(equipment: EquipmentId, field: EquipmentField, shift: Shift) -> Self {
        StoreKey::Equipment { equipment, field, shift }
    }

    pub fn parts(&self) -> KeyParts<'_> {
        match self {
            StoreKey::Records(key) => KeyParts {
                scope: "process",
                owner: key.process.as_str(),
                field: key.kind.as_str(),
                shift: key.shift,
            },
            StoreKey::Blocks { process, shift } => KeyParts {
                scope: "process",
                owner: process.as_str(),
                field: "blocks",
                shift: *shift,
            },
            StoreKey::Equipment { equipment, field, shift } => KeyParts {
                scope: "equipment",
                owner: equipment.as_str(),
                field: field.as_str(),
                shift: *shift,
            },
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self.parts();
        write!(f, "{}_{}_{}_{}", parts.scope, parts.owner, parts.field, parts.shift)
    }
}

/// Minimal keyed storage: every write replaces the whole value under a key.
pub trait KeyValueStore {
    fn get(&self, key: &StoreKey) -> Result<Option<String>>;
    fn set(&self, key: &StoreKey, value: &str) -> Result<()>;
    fn remove(&self, key: &StoreKey) -> Result<()>;
}

/// Reads a JSON value, treating an absent or unreadable value as missing.
///
/// A value that does not parse is reported as a warning rather than an
/// error so a single corrupted key cannot lock the operator out of a shift.
pub fn read_json<T, S>(store: &S, key: &StoreKey) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "discarding unreadable stored value");
            msg_warning!(Message::StoredValueUnreadable(key.to_string()));
            Ok(None)
        }
    }
}

pub fn write_json<T, S>(store: &S, key: &StoreKey, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    store.set(key, &serde_json::to_string(value)?)
}

/// Process-local store used by tests and one-off calculations.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<StoreKey, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &StoreKey) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &StoreKey, value: &str) -> Result<()> {
        self.entries.lock().insert(key.clone(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &StoreKey) -> Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_render_legacy_layout() {
        let blocks = StoreKey::blocks(ProcessId::new("P1"), Shift::B);
        assert_eq!(blocks.to_string(), "process_P1_blocks_B");

        let status = StoreKey::equipment(EquipmentId::new("E7"), EquipmentField::Status, Shift::C);
        assert_eq!(status.to_string(), "equipment_E7_status_C");
    }

    #[test]
    fn structured_keys_do_not_collide() {
        let store = MemoryStore::new();
        let tricky = StoreKey::records(ProcessId::new("x_maintenance_A"), RecordKind::Downtime, Shift::A);
        let plain = StoreKey::records(ProcessId::new("x"), RecordKind::Maintenance, Shift::A);

        store.set(&tricky, "[1]").unwrap();
        store.set(&plain, "[2]").unwrap();
        assert_eq!(store.get(&tricky).unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.get(&plain).unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn unreadable_json_reads_as_missing() {
        let store = MemoryStore::new();
        let key = StoreKey::blocks(ProcessId::new("P1"), Shift::A);
        store.set(&key, "{not json").unwrap();

        let value: Option<Vec<u32>> = read_json(&store, &key).unwrap();
        assert!(value.is_none());
    }
}

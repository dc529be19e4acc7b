//! Equipment notes: memo, material and status per shift.
//!
//! Notes are plain strings stored locally. A status change is also queued
//! for the MES server, which keeps the equipment's status history.

use crate::api::mes::Resource;
use crate::db::outbox::{Outbox, RemoteMethod};
use crate::db::store::{KeyValueStore, StoreKey};
use crate::libs::shift::{EquipmentField, EquipmentId, Shift};
use anyhow::Result;
use chrono::Local;
use serde::Serialize;
use serde_json::json;

/// All notes of one equipment for one shift.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EquipmentNotes {
    pub memo: Option<String>,
    pub material: Option<String>,
    pub status: Option<String>,
}

impl EquipmentNotes {
    pub fn get(&self, field: EquipmentField) -> Option<&str> {
        match field {
            EquipmentField::Memo => self.memo.as_deref(),
            EquipmentField::Material => self.material.as_deref(),
            EquipmentField::Status => self.status.as_deref(),
        }
    }
}

pub struct EquipmentBook<S> {
    store: S,
    outbox: Option<Outbox>,
    operator: String,
}

impl<S: KeyValueStore> EquipmentBook<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            outbox: None,
            operator: String::new(),
        }
    }

    /// Mirrors status changes to the remote API through `outbox`.
    pub fn with_outbox(mut self, outbox: Outbox, operator: &str) -> Self {
        self.outbox = Some(outbox);
        self.operator = operator.to_string();
        self
    }

    /// Stores a note; an empty value removes it. Returns the queued outbox id, if any.
    pub fn set(&self, equipment: &EquipmentId, field: EquipmentField, shift: Shift, value: &str) -> Result<Option<i64>> {
        let key = StoreKey::equipment(equipment.clone(), field, shift);
        let value = value.trim();
        if value.is_empty() {
            self.store.remove(&key)?;
        } else {
            self.store.set(&key, value)?;
        }

        match (&self.outbox, field) {
            (Some(outbox), EquipmentField::Status) => {
                let payload = status_payload(value, &self.operator);
                let id = outbox.enqueue(RemoteMethod::Put, &Resource::Equipments.path(Some(equipment.as_str())), &payload)?;
                Ok(Some(id))
            }
            _ => Ok(None),
        }
    }

    pub fn notes(&self, equipment: &EquipmentId, shift: Shift) -> Result<EquipmentNotes> {
        let read = |field| self.store.get(&StoreKey::equipment(equipment.clone(), field, shift));
        Ok(EquipmentNotes {
            memo: read(EquipmentField::Memo)?,
            material: read(EquipmentField::Material)?,
            status: read(EquipmentField::Status)?,
        })
    }
}

/// Body of a status update; the server appends it to the equipment history.
pub fn status_payload(status: &str, user: &str) -> serde_json::Value {
    json!({
        "status": status,
        "user": user,
        "time": Local::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::MemoryStore;

    #[test]
    fn notes_are_per_shift() {
        let book = EquipmentBook::new(MemoryStore::new());
        let cnc = EquipmentId::new("CNC-2");

        assert_eq!(book.set(&cnc, EquipmentField::Memo, Shift::A, "spindle noisy").unwrap(), None);
        book.set(&cnc, EquipmentField::Status, Shift::A, "running").unwrap();

        let notes = book.notes(&cnc, Shift::A).unwrap();
        assert_eq!(notes.get(EquipmentField::Memo), Some("spindle noisy"));
        assert_eq!(notes.status.as_deref(), Some("running"));
        assert_eq!(notes.material, None);
        assert_eq!(book.notes(&cnc, Shift::B).unwrap(), EquipmentNotes::default());
    }

    #[test]
    fn empty_value_removes_note() {
        let book = EquipmentBook::new(MemoryStore::new());
        let cnc = EquipmentId::new("CNC-2");
        book.set(&cnc, EquipmentField::Material, Shift::C, "steel").unwrap();
        book.set(&cnc, EquipmentField::Material, Shift::C, "  ").unwrap();
        assert_eq!(book.notes(&cnc, Shift::C).unwrap().material, None);
    }

    #[test]
    fn status_payload_names_user() {
        let payload = status_payload("stopped", "kim");
        assert_eq!(payload["status"], "stopped");
        assert_eq!(payload["user"], "kim");
        assert!(payload["time"].as_str().is_some());
    }
}

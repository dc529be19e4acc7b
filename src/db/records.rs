//! Shift-scoped record lists: append, list, delete.
//!
//! Each (process, record kind, shift) triple owns one list. Every mutation
//! reads the current list, changes it in memory and writes the whole list
//! back under the same key.
//!
//! ## Usage
//!
//! ```rust
//! use mest::db::records::RecordStore;
//! use mest::db::store::MemoryStore;
//! use mest::libs::record::MaintenanceRecord;
//! use mest::libs::shift::{ProcessId, Shift};
//!
//! let records = RecordStore::new(MemoryStore::new());
//! let p1 = ProcessId::new("P1");
//! records.append(&p1, Shift::A, MaintenanceRecord::from_minutes(30, "clean", None, 0))?;
//! assert_eq!(records.list::<MaintenanceRecord>(&p1, Shift::A)?.len(), 1);
//! assert!(records.list::<MaintenanceRecord>(&p1, Shift::B)?.is_empty());
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::db::store::{read_json, write_json, KeyValueStore, StoreKey};
use crate::libs::error::EntryError;
use crate::libs::record::{RecordId, ShiftRecord};
use crate::libs::shift::{ProcessId, Shift};
use anyhow::Result;

pub struct RecordStore<S> {
    store: S,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn key<R: ShiftRecord>(process: &ProcessId, shift: Shift) -> StoreKey {
        StoreKey::records(process.clone(), R::KIND, shift)
    }

    /// The stored list, or an empty one when nothing was stored yet.
    pub fn list<R: ShiftRecord>(&self, process: &ProcessId, shift: Shift) -> Result<Vec<R>> {
        Ok(read_json(&self.store, &Self::key::<R>(process, shift))?.unwrap_or_default())
    }

    /// Appends without deduplication and returns the new list.
    pub fn append<R: ShiftRecord>(&self, process: &ProcessId, shift: Shift, record: R) -> Result<Vec<R>> {
        let key = Self::key::<R>(process, shift);
        let mut records: Vec<R> = read_json(&self.store, &key)?.unwrap_or_default();
        records.push(record);
        write_json(&self.store, &key, &records)?;
        tracing::debug!(key = %key, len = records.len(), "appended record");
        Ok(records)
    }

    /// Removes the element at a 0-based position.
    ///
    /// An out-of-range position fails with [`EntryError::IndexOutOfRange`]
    /// and leaves the stored list exactly as it was.
    pub fn delete_at<R: ShiftRecord>(&self, process: &ProcessId, shift: Shift, index: usize) -> Result<Vec<R>> {
        let key = Self::key::<R>(process, shift);
        let mut records: Vec<R> = read_json(&self.store, &key)?.unwrap_or_default();
        if index >= records.len() {
            return Err(EntryError::IndexOutOfRange { index, len: records.len() }.into());
        }
        records.remove(index);
        write_json(&self.store, &key, &records)?;
        tracing::debug!(key = %key, index, "deleted record");
        Ok(records)
    }

    /// Removes the record with the given id. An unknown id is `RecordNotFound`.
    pub fn delete_by_id<R: ShiftRecord>(&self, process: &ProcessId, shift: Shift, id: RecordId) -> Result<Vec<R>> {
        let key = Self::key::<R>(process, shift);
        let mut records: Vec<R> = read_json(&self.store, &key)?.unwrap_or_default();
        let Some(index) = records.iter().position(|r| r.id() == id) else {
            return Err(EntryError::RecordNotFound(id.to_string()).into());
        };
        records.remove(index);
        write_json(&self.store, &key, &records)?;
        tracing::debug!(key = %key, id = %id, "deleted record");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::MemoryStore;
    use crate::libs::record::{DowntimeRecord, MaintenanceRecord};

    fn p1() -> ProcessId {
        ProcessId::new("P1")
    }

    #[test]
    fn delete_of_just_appended_restores_list() {
        let records = RecordStore::new(MemoryStore::new());
        records.append(&p1(), Shift::A, MaintenanceRecord::from_minutes(10, "a", None, 0)).unwrap();
        let original = records.append(&p1(), Shift::A, MaintenanceRecord::from_minutes(20, "b", None, 0)).unwrap();

        let grown = records.append(&p1(), Shift::A, MaintenanceRecord::from_minutes(30, "c", None, 0)).unwrap();
        let restored = records.delete_at::<MaintenanceRecord>(&p1(), Shift::A, grown.len() - 1).unwrap();

        assert_eq!(restored, original);
        assert_eq!(records.list::<MaintenanceRecord>(&p1(), Shift::A).unwrap(), original);
    }

    #[test]
    fn out_of_range_delete_keeps_list() {
        let records = RecordStore::new(MemoryStore::new());
        let before = records.append(&p1(), Shift::A, DowntimeRecord::from_minutes(5, "", "jam", 0)).unwrap();

        let err = records.delete_at::<DowntimeRecord>(&p1(), Shift::A, 3).unwrap_err();
        assert_eq!(
            err.downcast_ref::<EntryError>(),
            Some(&EntryError::IndexOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(records.list::<DowntimeRecord>(&p1(), Shift::A).unwrap(), before);
    }

    #[test]
    fn maintenance_and_downtime_are_separate_lists() {
        let records = RecordStore::new(MemoryStore::new());
        records.append(&p1(), Shift::A, MaintenanceRecord::from_minutes(10, "a", None, 0)).unwrap();

        assert!(records.list::<DowntimeRecord>(&p1(), Shift::A).unwrap().is_empty());
        assert!(records.delete_at::<DowntimeRecord>(&p1(), Shift::A, 0).is_err());
        assert_eq!(records.list::<MaintenanceRecord>(&p1(), Shift::A).unwrap().len(), 1);
    }

    #[test]
    fn delete_by_id_targets_one_record() {
        let records = RecordStore::new(MemoryStore::new());
        let first = MaintenanceRecord::from_minutes(10, "a", None, 0);
        let second = MaintenanceRecord::from_minutes(20, "b", None, 0);
        let second_id = second.id;
        records.append(&p1(), Shift::C, first.clone()).unwrap();
        records.append(&p1(), Shift::C, second).unwrap();

        let left = records.delete_by_id::<MaintenanceRecord>(&p1(), Shift::C, second_id).unwrap();
        assert_eq!(left, vec![first]);

        let err = records.delete_by_id::<MaintenanceRecord>(&p1(), Shift::C, second_id).unwrap_err();
        assert!(matches!(err.downcast_ref::<EntryError>(), Some(EntryError::RecordNotFound(_))));
    }
}

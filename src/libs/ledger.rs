//! Form-submit layer over the record store.
//!
//! The ledger turns operator input into records: it validates time fields,
//! builds the record, appends it to the right (process, shift) list, and
//! answers summary queries. Validation failures come back as
//! [`EntryError`]s inside the `anyhow::Error` and nothing is written.
//!
//! ## Usage
//!
//! ```rust
//! use mest::db::store::MemoryStore;
//! use mest::libs::ledger::{MaintenanceInput, ShiftLedger, Span};
//! use mest::libs::shift::{ProcessId, Shift};
//!
//! let ledger = ShiftLedger::new(MemoryStore::new());
//! let p1 = ProcessId::new("P1");
//! let input = MaintenanceInput::new(Span::range("08:00", "08:30"), "clean");
//! let record = ledger.add_maintenance(&p1, Shift::A, input)?;
//! assert_eq!(record.duration_minutes, Some(30));
//! assert_eq!(ledger.summary(&p1, Shift::A)?.remaining_minutes, 450);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::db::records::RecordStore;
use crate::db::store::KeyValueStore;
use crate::libs::error::EntryError;
use crate::libs::grouping::{GroupSnapshot, Grouping};
use crate::libs::record::{DowntimeRecord, MaintenanceRecord, RecordId, ShiftRecord};
use crate::libs::shift::{ProcessId, Shift};
use crate::libs::time_range::TimeRange;
use crate::libs::utilization::ProcessTimeSummary;
use anyhow::Result;

/// How long an entry lasted: a clock range or a direct minute count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Range { start: String, end: String },
    Minutes(u32),
}

impl Span {
    pub fn range(start: impl Into<String>, end: impl Into<String>) -> Self {
        Span::Range {
            start: start.into(),
            end: end.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceInput {
    pub span: Span,
    pub description: String,
    pub equipment: Option<String>,
    pub block: u32,
}

impl MaintenanceInput {
    pub fn new(span: Span, description: impl Into<String>) -> Self {
        Self {
            span,
            description: description.into(),
            equipment: None,
            block: 0,
        }
    }

    pub fn equipment(mut self, equipment: impl Into<String>) -> Self {
        let equipment = equipment.into();
        self.equipment = (!equipment.trim().is_empty()).then(|| equipment.trim().to_string());
        self
    }

    pub fn block(mut self, block: u32) -> Self {
        self.block = block;
        self
    }

    fn into_record(self) -> Result<MaintenanceRecord, EntryError> {
        Ok(match self.span {
            Span::Range { start, end } => {
                MaintenanceRecord::from_range(TimeRange::parse(&start, &end)?, &self.description, self.equipment, self.block)
            }
            Span::Minutes(minutes) => MaintenanceRecord::from_minutes(minutes, &self.description, self.equipment, self.block),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DowntimeInput {
    pub span: Span,
    pub description: String,
    pub reason: String,
    pub block: u32,
}

impl DowntimeInput {
    pub fn new(span: Span, reason: impl Into<String>) -> Self {
        Self {
            span,
            description: String::new(),
            reason: reason.into(),
            block: 0,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn block(mut self, block: u32) -> Self {
        self.block = block;
        self
    }

    fn into_record(self) -> Result<DowntimeRecord, EntryError> {
        Ok(match self.span {
            Span::Range { start, end } => {
                DowntimeRecord::from_range(TimeRange::parse(&start, &end)?, &self.description, &self.reason, self.block)
            }
            Span::Minutes(minutes) => DowntimeRecord::from_minutes(minutes, &self.description, &self.reason, self.block),
        })
    }
}

pub struct ShiftLedger<S> {
    records: RecordStore<S>,
}

impl<S: KeyValueStore> ShiftLedger<S> {
    pub fn new(store: S) -> Self {
        Self {
            records: RecordStore::new(store),
        }
    }

    pub fn records(&self) -> &RecordStore<S> {
        &self.records
    }

    pub fn maintenance(&self, process: &ProcessId, shift: Shift) -> Result<Vec<MaintenanceRecord>> {
        self.records.list(process, shift)
    }

    pub fn downtime(&self, process: &ProcessId, shift: Shift) -> Result<Vec<DowntimeRecord>> {
        self.records.list(process, shift)
    }

    /// Records a primary maintenance entry.
    pub fn add_maintenance(&self, process: &ProcessId, shift: Shift, input: MaintenanceInput) -> Result<MaintenanceRecord> {
        let record = input.into_record()?;
        self.records.append(process, shift, record.clone())?;
        tracing::info!(process = %process, shift = %shift, minutes = record.minutes(), "maintenance recorded");
        Ok(record)
    }

    /// Records an addendum to an existing primary entry.
    ///
    /// The source must be a primary entry of the same list; the addendum is
    /// placed in the source's block regardless of the block in `input`.
    pub fn add_addendum(
        &self,
        process: &ProcessId,
        shift: Shift,
        source: RecordId,
        input: MaintenanceInput,
    ) -> Result<MaintenanceRecord> {
        let existing = self.maintenance(process, shift)?;
        let primary = existing
            .iter()
            .find(|r| r.id == source)
            .ok_or_else(|| EntryError::RecordNotFound(source.to_string()))?;
        if primary.is_addendum() {
            return Err(EntryError::InvalidGroupSource(source).into());
        }

        let input = input.block(primary.block());
        let record = input.into_record()?.attach_to(source);
        self.records.append(process, shift, record.clone())?;
        tracing::info!(process = %process, shift = %shift, source = %source, "maintenance addendum recorded");
        Ok(record)
    }

    pub fn add_downtime(&self, process: &ProcessId, shift: Shift, input: DowntimeInput) -> Result<DowntimeRecord> {
        let record = input.into_record()?;
        self.records.append(process, shift, record.clone())?;
        tracing::info!(process = %process, shift = %shift, minutes = record.minutes(), "downtime recorded");
        Ok(record)
    }

    /// Deletes by position. Addenda of a deleted primary are kept.
    pub fn delete_maintenance_at(&self, process: &ProcessId, shift: Shift, index: usize) -> Result<Vec<MaintenanceRecord>> {
        self.records.delete_at(process, shift, index)
    }

    pub fn delete_downtime_at(&self, process: &ProcessId, shift: Shift, index: usize) -> Result<Vec<DowntimeRecord>> {
        self.records.delete_at(process, shift, index)
    }

    pub fn delete_maintenance(&self, process: &ProcessId, shift: Shift, id: RecordId) -> Result<Vec<MaintenanceRecord>> {
        self.records.delete_by_id(process, shift, id)
    }

    pub fn delete_downtime(&self, process: &ProcessId, shift: Shift, id: RecordId) -> Result<Vec<DowntimeRecord>> {
        self.records.delete_by_id(process, shift, id)
    }

    /// Resolves an id or unique id prefix against one list.
    pub fn resolve<R: ShiftRecord>(&self, process: &ProcessId, shift: Shift, prefix: &str) -> Result<RecordId> {
        let list: Vec<R> = self.records.list(process, shift)?;
        let mut matches = list.iter().map(|r| r.id()).filter(|id| id.matches_prefix(prefix));
        match (matches.next(), matches.next()) {
            (Some(id), None) => Ok(id),
            _ => Err(EntryError::RecordNotFound(prefix.to_string()).into()),
        }
    }

    /// Maintenance groups of one block with their combined minutes.
    pub fn groups(&self, process: &ProcessId, shift: Shift, block: u32) -> Result<Vec<GroupSnapshot>> {
        let records = self.maintenance(process, shift)?;
        Ok(records.group_block(block).iter().map(|g| g.snapshot()).collect())
    }

    pub fn summary(&self, process: &ProcessId, shift: Shift) -> Result<ProcessTimeSummary> {
        let maintenance = self.maintenance(process, shift)?;
        let downtime = self.downtime(process, shift)?;
        Ok(ProcessTimeSummary::calculate(&maintenance, &downtime))
    }
}

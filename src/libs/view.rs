use super::blocks::BlockState;
use super::chart::{self, Segment};
use super::equipment::EquipmentNotes;
use super::formatter::{format_minutes, format_percent};
use super::grouping::Grouping;
use super::record::{DowntimeRecord, MaintenanceRecord, ShiftRecord};
use super::utilization::ProcessTimeSummary;
use crate::db::outbox::OutboxEntry;
use crate::libs::shift::EquipmentField;
use anyhow::Result;
use prettytable::{row, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Primary { group_minutes: u32 },
    Addendum,
    Orphan,
}

/// One line of the maintenance table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaintenanceRow<'a> {
    /// Position in the unfiltered list, the index `delete --index` takes.
    pub position: usize,
    pub record: &'a MaintenanceRecord,
    pub kind: RowKind,
}

/// Rows of the maintenance table, optionally limited to one block.
pub fn maintenance_rows(records: &[MaintenanceRecord], block: Option<u32>) -> Vec<MaintenanceRow<'_>> {
    let position = |record: &MaintenanceRecord| records.iter().position(|r| r.id == record.id).unwrap_or(0);
    let groups = match block {
        Some(block) => records.group_block(block),
        None => records.groups(),
    };

    let mut rows = Vec::new();
    for group in groups {
        rows.push(MaintenanceRow {
            position: position(group.primary),
            record: group.primary,
            kind: RowKind::Primary {
                group_minutes: group.minutes,
            },
        });
        for addendum in group.addenda {
            rows.push(MaintenanceRow {
                position: position(addendum),
                record: addendum,
                kind: RowKind::Addendum,
            });
        }
    }
    for orphan in records.orphaned_addenda() {
        if block.is_none() || block == Some(orphan.block()) {
            rows.push(MaintenanceRow {
                position: position(orphan),
                record: orphan,
                kind: RowKind::Orphan,
            });
        }
    }
    rows
}

pub struct View {}

impl View {
    /// Maintenance list grouped by block, addenda indented under their primary.
    pub fn maintenance(records: &[MaintenanceRecord], block: Option<u32>) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["#", "ID", "BLOCK", "DURATION", "GROUP", "EQUIPMENT", "DESCRIPTION"]);
        for row in maintenance_rows(records, block) {
            let record = row.record;
            let (group, description) = match row.kind {
                RowKind::Primary { group_minutes } => (format_minutes(group_minutes), record.description.clone()),
                RowKind::Addendum => (String::new(), format!("+ {}", record.description)),
                RowKind::Orphan => ("-".to_string(), format!("? {}", record.description)),
            };
            table.add_row(row![
                row.position,
                record.id.short(),
                record.block(),
                format_minutes(record.minutes()),
                group,
                record.equipment.as_deref().unwrap_or(""),
                description
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn downtime(records: &[DowntimeRecord]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["#", "ID", "BLOCK", "DURATION", "REASON", "DESCRIPTION"]);
        for (index, record) in records.iter().enumerate() {
            table.add_row(row![
                index,
                record.id.short(),
                record.block(),
                format_minutes(record.minutes()),
                record.reason,
                record.description
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn summary(summary: &ProcessTimeSummary, width: usize) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["", "CATEGORY", "DURATION", "SHARE"]);
        for slice in chart::slices(summary) {
            table.add_row(row![
                slice.segment.glyph(),
                slice.segment.label(),
                format_minutes(slice.minutes),
                format_percent(slice.fraction * 100.0)
            ]);
        }
        table.printstd();

        if width > 0 {
            println!("[{}]", chart::bar(summary, width));
            let legend: Vec<String> = Segment::ALL
                .iter()
                .map(|s| format!("{} {}", s.glyph(), s.label()))
                .collect();
            println!(" {}", legend.join("  "));
        }

        Ok(())
    }

    pub fn blocks(blocks: &[BlockState]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["BLOCK", "YIELD", "MATERIAL", "DRAFT"]);
        for (index, block) in blocks.iter().enumerate() {
            let draft = block
                .draft
                .as_ref()
                .map(|d| format!("{}~{} {}", d.start, d.end, d.description))
                .unwrap_or_default();
            let yield_count = block.yield_count.map(|count| count.to_string()).unwrap_or_default();
            table.add_row(row![index, yield_count, block.material.as_deref().unwrap_or(""), draft]);
        }
        table.printstd();

        Ok(())
    }

    pub fn equipment(notes: &EquipmentNotes) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["FIELD", "VALUE"]);
        for field in EquipmentField::ALL {
            table.add_row(row![field.as_str(), notes.get(field).unwrap_or("")]);
        }
        table.printstd();

        Ok(())
    }

    pub fn outbox(entries: &[OutboxEntry]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "METHOD", "PATH", "ATTEMPTS", "QUEUED", "LAST ERROR"]);
        for entry in entries {
            table.add_row(row![
                entry.id,
                entry.method,
                entry.path,
                entry.attempts,
                entry.created_at.format("%Y-%m-%d %H:%M"),
                entry.last_error.as_deref().unwrap_or("")
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Server documents, one row each: the id and the remaining fields as JSON.
    pub fn remote(items: &[serde_json::Value]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATA"]);
        for item in items {
            let mut fields = item.as_object().cloned().unwrap_or_default();
            let id = fields
                .remove("id")
                .or_else(|| fields.remove("_id"))
                .map(|id| id.as_str().map(str::to_string).unwrap_or_else(|| id.to_string()))
                .unwrap_or_default();
            table.add_row(row![id, serde_json::to_string(&fields)?]);
        }
        table.printstd();

        Ok(())
    }
}

//! Export of one process's shift data.
//!
//! Writes the maintenance list, the downtime list and the utilization
//! summary of a (process, shift) pair to CSV, pretty JSON or Excel.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mest::db::shift_store::SqliteStore;
//! use mest::libs::export::{ExportFormat, Exporter, ShiftExport};
//! use mest::libs::ledger::ShiftLedger;
//! use mest::libs::shift::{ProcessId, Shift};
//!
//! let ledger = ShiftLedger::new(SqliteStore::new()?);
//! let data = ShiftExport::gather(&ledger, &ProcessId::new("P1"), Shift::A)?;
//! Exporter::new(ExportFormat::Csv, None).write(&data)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::db::store::KeyValueStore;
use crate::libs::formatter::{format_minutes, format_percent};
use crate::libs::grouping::Grouping;
use crate::libs::ledger::ShiftLedger;
use crate::libs::record::ShiftRecord;
use crate::libs::shift::{ProcessId, Shift};
use crate::libs::utilization::ProcessTimeSummary;
use anyhow::Result;
use chrono::Local;
use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Excel,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportMaintenance {
    pub id: String,
    pub block: u32,
    pub addendum_of: Option<String>,
    pub orphaned: bool,
    pub minutes: u32,
    pub duration: String,
    pub equipment: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDowntime {
    pub id: String,
    pub block: u32,
    pub minutes: u32,
    pub duration: String,
    pub reason: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftExport {
    pub process: String,
    pub shift: Shift,
    pub exported_at: String,
    pub summary: ProcessTimeSummary,
    pub maintenance: Vec<ExportMaintenance>,
    pub downtime: Vec<ExportDowntime>,
}

impl ShiftExport {
    pub fn gather<S: KeyValueStore>(ledger: &ShiftLedger<S>, process: &ProcessId, shift: Shift) -> Result<Self> {
        let maintenance = ledger.maintenance(process, shift)?;
        let downtime = ledger.downtime(process, shift)?;
        let orphans: Vec<_> = maintenance.orphaned_addenda().iter().map(|r| r.id).collect();

        Ok(Self {
            process: process.to_string(),
            shift,
            exported_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            summary: ProcessTimeSummary::calculate(&maintenance, &downtime),
            maintenance: maintenance
                .iter()
                .map(|r| ExportMaintenance {
                    id: r.id.to_string(),
                    block: r.block(),
                    addendum_of: r.addendum_of.map(|id| id.to_string()),
                    orphaned: orphans.contains(&r.id),
                    minutes: r.minutes(),
                    duration: format_minutes(r.minutes()),
                    equipment: r.equipment.clone().unwrap_or_default(),
                    description: r.description.clone(),
                })
                .collect(),
            downtime: downtime
                .iter()
                .map(|r| ExportDowntime {
                    id: r.id.to_string(),
                    block: r.block(),
                    minutes: r.minutes(),
                    duration: format_minutes(r.minutes()),
                    reason: r.reason.clone(),
                    description: r.description.clone(),
                })
                .collect(),
        })
    }

    fn summary_rows(&self) -> [(&'static str, u32, f64); 4] {
        let s = &self.summary;
        [
            ("Maintenance", s.maintenance_minutes, s.maintenance_percent()),
            ("Operating", s.operating_minutes, s.operating_percent()),
            ("Downtime", s.downtime_minutes, s.downtime_percent()),
            ("Remaining", s.remaining_minutes, s.remaining_percent()),
        ]
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: Option<PathBuf>,
}

impl Exporter {
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        Self { format, output_path }
    }

    /// Target file: the given path, or a timestamped name in the working directory.
    pub fn path_for(&self, data: &ShiftExport) -> PathBuf {
        self.output_path.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "mest_{}_{}_{}.{}",
                file_safe(&data.process),
                data.shift,
                Local::now().format("%Y%m%d_%H%M%S"),
                self.format.extension()
            ))
        })
    }

    /// Writes the export and returns the file it went to.
    pub fn write(&self, data: &ShiftExport) -> Result<PathBuf> {
        let path = self.path_for(data);
        match self.format {
            ExportFormat::Csv => write_csv(&path, data)?,
            ExportFormat::Json => {
                let json = serde_json::to_string_pretty(data)?;
                File::create(&path)?.write_all(json.as_bytes())?;
            }
            ExportFormat::Excel => write_excel(&path, data)?,
        }
        tracing::info!(path = %path.display(), format = ?self.format, "shift data exported");
        Ok(path)
    }
}

/// Replaces characters that would split a file name into path parts.
fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

fn write_csv(path: &Path, data: &ShiftExport) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_path(path)?;

    wtr.write_record(["SUMMARY", data.process.as_str(), data.shift.as_str()])?;
    wtr.write_record(["Category", "Duration", "Share"])?;
    for (label, minutes, percent) in data.summary_rows() {
        wtr.write_record([label.to_string(), format_minutes(minutes), format_percent(percent)])?;
    }

    wtr.write_record([""])?;
    wtr.write_record(["MAINTENANCE"])?;
    wtr.write_record(["ID", "Block", "Addendum Of", "Orphaned", "Duration", "Equipment", "Description"])?;
    for r in &data.maintenance {
        wtr.write_record([
            r.id.clone(),
            r.block.to_string(),
            r.addendum_of.clone().unwrap_or_default(),
            r.orphaned.to_string(),
            r.duration.clone(),
            r.equipment.clone(),
            r.description.clone(),
        ])?;
    }

    wtr.write_record([""])?;
    wtr.write_record(["DOWNTIME"])?;
    wtr.write_record(["ID", "Block", "Duration", "Reason", "Description"])?;
    for r in &data.downtime {
        wtr.write_record([
            r.id.clone(),
            r.block.to_string(),
            r.duration.clone(),
            r.reason.clone(),
            r.description.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_excel(path: &Path, data: &ShiftExport) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold().set_background_color(rust_xlsxwriter::Color::Gray);

    let summary = workbook.add_worksheet().set_name("Summary")?;
    summary.write_string_with_format(0, 0, "Process", &header_format)?;
    summary.write_string(0, 1, &data.process)?;
    summary.write_string_with_format(1, 0, "Shift", &header_format)?;
    summary.write_string(1, 1, data.shift.as_str())?;
    summary.write_string_with_format(3, 0, "Category", &header_format)?;
    summary.write_string_with_format(3, 1, "Minutes", &header_format)?;
    summary.write_string_with_format(3, 2, "Share", &header_format)?;
    let mut row = 4;
    for (label, minutes, percent) in data.summary_rows() {
        summary.write_string(row, 0, label)?;
        summary.write_number(row, 1, minutes as f64)?;
        summary.write_string(row, 2, &format_percent(percent))?;
        row += 1;
    }
    summary.autofit();

    let maintenance = workbook.add_worksheet().set_name("Maintenance")?;
    for (col, title) in ["ID", "Block", "Addendum Of", "Orphaned", "Minutes", "Equipment", "Description"]
        .iter()
        .enumerate()
    {
        maintenance.write_string_with_format(0, col as u16, *title, &header_format)?;
    }
    for (i, r) in data.maintenance.iter().enumerate() {
        let row = i as u32 + 1;
        maintenance.write_string(row, 0, &r.id)?;
        maintenance.write_number(row, 1, r.block as f64)?;
        maintenance.write_string(row, 2, r.addendum_of.as_deref().unwrap_or(""))?;
        maintenance.write_boolean(row, 3, r.orphaned)?;
        maintenance.write_number(row, 4, r.minutes as f64)?;
        maintenance.write_string(row, 5, &r.equipment)?;
        maintenance.write_string(row, 6, &r.description)?;
    }
    maintenance.autofit();

    let downtime = workbook.add_worksheet().set_name("Downtime")?;
    for (col, title) in ["ID", "Block", "Minutes", "Reason", "Description"].iter().enumerate() {
        downtime.write_string_with_format(0, col as u16, *title, &header_format)?;
    }
    for (i, r) in data.downtime.iter().enumerate() {
        let row = i as u32 + 1;
        downtime.write_string(row, 0, &r.id)?;
        downtime.write_number(row, 1, r.block as f64)?;
        downtime.write_number(row, 2, r.minutes as f64)?;
        downtime.write_string(row, 3, &r.reason)?;
        downtime.write_string(row, 4, &r.description)?;
    }
    downtime.autofit();

    workbook.save(path)?;
    Ok(())
}

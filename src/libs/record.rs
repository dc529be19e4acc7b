//! Maintenance and downtime records kept per process and shift.
//!
//! Records are appended by operators and never edited afterwards; they are
//! only removed by position or by id. Each record carries a generated id so
//! addenda can point at their primary entry regardless of where either one
//! sits in the list.

use crate::libs::shift::RecordKind;
use crate::libs::time_range::TimeRange;
use chrono::{Local, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier of a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, enough to tell records of one list apart.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }

    /// Whether `prefix` (hyphens ignored, case-insensitive) starts this id.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        let wanted: String = prefix.chars().filter(|c| *c != '-').collect::<String>().to_ascii_lowercase();
        !wanted.is_empty() && self.0.simple().to_string().starts_with(&wanted)
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Common surface of everything stored in a shift-scoped record list.
pub trait ShiftRecord: Serialize + DeserializeOwned + Clone {
    /// Which list of a process this record type lives in.
    const KIND: RecordKind;

    fn id(&self) -> RecordId;

    /// Input block the record belongs to; absent means block 0.
    fn block(&self) -> u32;

    /// Effective duration in minutes.
    fn minutes(&self) -> u32;
}

/// A maintenance window, either a primary entry or an addendum to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient_minutes", skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_index: Option<u32>,
    /// Primary entry this record augments; set only on addenda.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addendum_of: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl MaintenanceRecord {
    /// A primary entry whose description starts with the range it covers.
    pub fn from_range(range: TimeRange, description: &str, equipment: Option<String>, block: u32) -> Self {
        Self {
            id: RecordId::new(),
            duration_minutes: Some(range.minutes()),
            description: describe(Some(range), description),
            equipment,
            block_index: Some(block),
            addendum_of: None,
            created_at: Some(Local::now().naive_local()),
        }
    }

    /// A primary entry with a directly supplied duration.
    pub fn from_minutes(minutes: u32, description: &str, equipment: Option<String>, block: u32) -> Self {
        Self {
            id: RecordId::new(),
            duration_minutes: Some(minutes),
            description: describe(None, description),
            equipment,
            block_index: Some(block),
            addendum_of: None,
            created_at: Some(Local::now().naive_local()),
        }
    }

    /// Turns this record into an addendum of `source`.
    pub fn attach_to(mut self, source: RecordId) -> Self {
        self.addendum_of = Some(source);
        self
    }

    pub fn is_addendum(&self) -> bool {
        self.addendum_of.is_some()
    }
}

impl ShiftRecord for MaintenanceRecord {
    const KIND: RecordKind = RecordKind::Maintenance;

    fn id(&self) -> RecordId {
        self.id
    }

    fn block(&self) -> u32 {
        self.block_index.unwrap_or(0)
    }

    fn minutes(&self) -> u32 {
        effective_minutes(self.duration_minutes, &self.description)
    }
}

/// A downtime window with the reason the process stood still.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DowntimeRecord {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient_minutes", skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl DowntimeRecord {
    pub fn from_range(range: TimeRange, description: &str, reason: &str, block: u32) -> Self {
        Self {
            id: RecordId::new(),
            duration_minutes: Some(range.minutes()),
            description: describe(Some(range), description),
            reason: reason.trim().to_string(),
            block_index: Some(block),
            created_at: Some(Local::now().naive_local()),
        }
    }

    pub fn from_minutes(minutes: u32, description: &str, reason: &str, block: u32) -> Self {
        Self {
            id: RecordId::new(),
            duration_minutes: Some(minutes),
            description: describe(None, description),
            reason: reason.trim().to_string(),
            block_index: Some(block),
            created_at: Some(Local::now().naive_local()),
        }
    }
}

impl ShiftRecord for DowntimeRecord {
    const KIND: RecordKind = RecordKind::Downtime;

    fn id(&self) -> RecordId {
        self.id
    }

    fn block(&self) -> u32 {
        self.block_index.unwrap_or(0)
    }

    fn minutes(&self) -> u32 {
        effective_minutes(self.duration_minutes, &self.description)
    }
}

fn describe(range: Option<TimeRange>, description: &str) -> String {
    let description = description.trim();
    match range {
        Some(range) if description.is_empty() => range.to_string(),
        Some(range) => format!("{} {}", range, description),
        None => description.to_string(),
    }
}

/// Stored duration, or the one implied by the range in the description.
fn effective_minutes(stored: Option<u32>, description: &str) -> u32 {
    stored.unwrap_or_else(|| TimeRange::find_in(description).map(|r| r.minutes()).unwrap_or(0))
}

/// Accepts any JSON value for a duration; only non-negative integers count.
fn lenient_minutes<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_u64()).and_then(|n| u32::try_from(n).ok()))
}

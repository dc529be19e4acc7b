//! Errors raised while validating and applying shift entries.
//!
//! These are the rejections a single form submission can produce. They are
//! shown to the operator by the command that raised them and are never
//! retried; storage and I/O failures travel separately as `anyhow::Error`.

use crate::libs::record::RecordId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// A time field does not match 24-hour `HH:MM`.
    #[error("Invalid time format for {field}: '{value}' (expected HH:MM, e.g. 08:30)")]
    InvalidTimeFormat { field: &'static str, value: String },

    /// A required input was left blank.
    #[error("Required field '{0}' is empty")]
    MissingField(&'static str),

    /// A delete targeted a position the list does not have.
    #[error("No record at position {index} (the list holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A block index past the last block a sheet may hold.
    #[error("Block {index} does not exist (blocks 0 to {max} are available)")]
    BlockOutOfRange { index: usize, max: usize },

    #[error("Record {0} not found")]
    RecordNotFound(String),

    /// An addendum pointed at a record that cannot own addenda.
    #[error("Record {0} cannot take addenda (only primary entries can)")]
    InvalidGroupSource(RecordId),

    #[error("Unknown shift '{0}' (expected A, B or C)")]
    UnknownShift(String),
}

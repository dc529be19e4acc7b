//! Core library modules for mest.
//!
//! ## Features
//!
//! - **Shift Engine**: Time-range parsing, records, addendum grouping, utilization
//! - **Shift Data**: Ledger of entries, input blocks, equipment notes
//! - **Remote Mirror**: Outbox flushing to the MES server
//! - **User Interface**: Tables, chart data, panel state, export, messages
//! - **Infrastructure**: Configuration and data storage paths
//!
//! ## Usage
//!
//! ```rust
//! use mest::libs::time_range::parse_range;
//!
//! assert_eq!(parse_range("23:30", "00:10")?, 40);
//! # Ok::<(), mest::libs::error::EntryError>(())
//! ```

pub mod blocks;
pub mod chart;
pub mod config;
pub mod data_storage;
pub mod equipment;
pub mod error;
pub mod export;
pub mod formatter;
pub mod grouping;
pub mod ledger;
pub mod messages;
pub mod panel;
pub mod record;
pub mod shift;
pub mod sync;
pub mod time_range;
pub mod utilization;
pub mod view;

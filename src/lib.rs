//! # mest - MES shift time-accounting
//!
//! Records maintenance and downtime entries per process and shift on a
//! manufacturing floor and rolls them up into shift utilization.
//!
//! ## Features
//!
//! - **Time Entry**: `HH:MM` ranges with midnight wrap, or direct minutes
//! - **Addenda**: Follow-up entries grouped under their primary maintenance job
//! - **Shift Partitioning**: Shifts A, B and C keep fully separate data
//! - **Utilization**: Maintenance, downtime and remaining share of the 480-minute shift
//! - **Equipment Notes**: Memo, material and status per equipment and shift
//! - **Server Mirror**: Status changes queued in an outbox and pushed by `sync`
//! - **Data Export**: CSV, JSON and Excel
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mest::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;

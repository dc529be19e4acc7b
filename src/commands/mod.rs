//! Command-line interface.
//!
//! Every data command addresses one (process, shift) pair through
//! [`ShiftArgs`]. The shift falls back to the configured default, else `A`.
//! Rejected input (bad times, unknown ids, out-of-range positions) is printed
//! as a message and ends the command normally; storage failures propagate.

pub mod block;
pub mod downtime;
pub mod equipment;
pub mod export;
pub mod init;
pub mod maintenance;
pub mod outbox;
pub mod remote;
pub mod summary;
pub mod sync;

use crate::db::shift_store::SqliteStore;
use crate::libs::config::Config;
use crate::libs::error::EntryError;
use crate::libs::ledger::{ShiftLedger, Span};
use crate::libs::messages::Message;
use crate::libs::shift::{ProcessId, Shift};
use crate::msg_error;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init,
    #[command(about = "Record, list and delete maintenance entries")]
    Maintenance(maintenance::MaintenanceArgs),
    #[command(about = "Record, list and delete downtime entries")]
    Downtime(downtime::DowntimeArgs),
    #[command(about = "Show shift utilization of a process")]
    Summary(summary::SummaryArgs),
    #[command(about = "Edit input blocks of a process")]
    Block(block::BlockArgs),
    #[command(about = "Read and write equipment notes")]
    Equipment(equipment::EquipmentArgs),
    #[command(about = "Show writes waiting for the MES server")]
    Outbox,
    #[command(about = "Push queued writes to the MES server")]
    Sync,
    #[command(about = "Show a collection as the MES server has it")]
    Remote(remote::RemoteArgs),
    #[command(about = "Export shift data to CSV, JSON or Excel")]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init => init::cmd(),
            Commands::Maintenance(args) => maintenance::cmd(args),
            Commands::Downtime(args) => downtime::cmd(args),
            Commands::Summary(args) => summary::cmd(args),
            Commands::Block(args) => block::cmd(args),
            Commands::Equipment(args) => equipment::cmd(args),
            Commands::Outbox => outbox::cmd(),
            Commands::Sync => sync::cmd().await,
            Commands::Remote(args) => remote::cmd(args).await,
            Commands::Export(args) => export::cmd(args),
        }
    }
}

/// Which process and shift a command works on.
#[derive(Debug, Clone, Args)]
pub struct ShiftArgs {
    /// Process identifier
    #[arg(short, long)]
    pub process: String,

    /// Shift A, B or C (default: configured shift)
    #[arg(short, long)]
    pub shift: Option<Shift>,
}

impl ShiftArgs {
    pub fn resolve(&self) -> Result<(ProcessId, Shift)> {
        let process = self.process.trim();
        if process.is_empty() {
            return Err(EntryError::MissingField("process").into());
        }
        Ok((ProcessId::new(process), resolve_shift(self.shift)?))
    }
}

/// Duration of an entry: `--start/--end` or `--minutes`.
#[derive(Debug, Clone, Args)]
pub struct SpanArgs {
    /// Start time, HH:MM
    #[arg(long)]
    pub start: Option<String>,

    /// End time, HH:MM (before start means past midnight)
    #[arg(long)]
    pub end: Option<String>,

    /// Duration in minutes instead of a time range
    #[arg(short, long, conflicts_with_all = ["start", "end"])]
    pub minutes: Option<u32>,
}

impl SpanArgs {
    pub fn span(&self) -> Span {
        match self.minutes {
            Some(minutes) => Span::Minutes(minutes),
            None => Span::range(self.start.clone().unwrap_or_default(), self.end.clone().unwrap_or_default()),
        }
    }
}

pub fn resolve_shift(shift: Option<Shift>) -> Result<Shift> {
    match shift {
        Some(shift) => Ok(shift),
        None => Ok(Config::read()?.default_shift()),
    }
}

pub fn ledger() -> Result<ShiftLedger<SqliteStore>> {
    Ok(ShiftLedger::new(SqliteStore::new()?))
}

/// Prints a rejected entry and yields `None`; other errors propagate.
pub fn report_entry<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) => match e.downcast_ref::<EntryError>() {
            Some(rejected) => {
                msg_error!(Message::EntryRejected(rejected.to_string()));
                Ok(None)
            }
            None => Err(e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_take_precedence_over_range() {
        let args = SpanArgs {
            start: None,
            end: None,
            minutes: Some(25),
        };
        assert_eq!(args.span(), Span::Minutes(25));

        let args = SpanArgs {
            start: Some("08:00".into()),
            end: None,
            minutes: None,
        };
        assert_eq!(args.span(), Span::range("08:00", ""));
    }

    #[test]
    fn entry_errors_are_reported_not_raised() {
        let rejected: Result<()> = Err(EntryError::MissingField("start").into());
        assert!(report_entry(rejected).unwrap().is_none());

        let failed: Result<()> = Err(anyhow::anyhow!("disk full"));
        assert!(report_entry(failed).is_err());
    }

    #[test]
    fn blank_process_is_rejected() {
        let args = ShiftArgs {
            process: "  ".into(),
            shift: Some(Shift::B),
        };
        let err = args.resolve().unwrap_err();
        assert_eq!(err.downcast_ref::<EntryError>(), Some(&EntryError::MissingField("process")));
    }

    #[test]
    fn cli_parses_maintenance_add() {
        let cli = Cli::try_parse_from([
            "mest", "maintenance", "add", "-p", "P1", "-s", "b", "--start", "23:30", "--end", "00:10", "-d", "belt",
        ]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["mest", "maintenance", "add", "-p", "P1", "-m", "5", "--start", "08:00"]);
        assert!(cli.is_err());
    }

    #[test]
    fn cli_parses_remote_collections() {
        assert!(Cli::try_parse_from(["mest", "remote", "process-titles"]).is_ok());
        assert!(Cli::try_parse_from(["mest", "remote", "equipments"]).is_ok());
        assert!(Cli::try_parse_from(["mest", "remote", "shifts"]).is_err());
    }
}

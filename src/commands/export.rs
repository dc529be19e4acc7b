//! Export of one process's shift data for analysis outside mest.

use super::{ledger, report_entry, ShiftArgs};
use crate::{
    libs::{
        export::{ExportFormat, Exporter, ShiftExport},
        messages::Message,
    },
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    target: ShiftArgs,

    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let Some((process, shift)) = report_entry(args.target.resolve())? else {
        return Ok(());
    };

    msg_info!(Message::ExportingData(process.to_string(), shift, format!("{:?}", args.format)));

    let data = ShiftExport::gather(&ledger()?, &process, shift)?;
    let path = Exporter::new(args.format, args.output).write(&data)?;

    msg_success!(Message::ExportCompleted(path.display().to_string()));
    Ok(())
}

use super::{ledger, report_entry, ShiftArgs};
use crate::{
    libs::{grouping::Grouping, messages::Message, view::View},
    msg_print, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    target: ShiftArgs,

    /// Width of the text chart; 0 hides it
    #[arg(short, long, default_value_t = 48)]
    width: usize,
}

pub fn cmd(args: SummaryArgs) -> Result<()> {
    let Some((process, shift)) = report_entry(args.target.resolve())? else {
        return Ok(());
    };
    let ledger = ledger()?;
    let summary = ledger.summary(&process, shift)?;

    msg_print!(Message::SummaryHeader(process.to_string(), shift), true);
    View::summary(&summary, args.width)?;

    let orphans = ledger.maintenance(&process, shift)?.orphaned_addenda().len();
    if orphans > 0 {
        msg_warning!(Message::OrphanedAddenda(orphans));
    }
    Ok(())
}

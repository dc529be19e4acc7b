use super::{ledger, report_entry, ShiftArgs, SpanArgs};
use crate::{
    libs::{
        ledger::DowntimeInput,
        messages::Message,
        record::{DowntimeRecord, ShiftRecord},
        view::View,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Select};

#[derive(Debug, Args)]
pub struct DowntimeArgs {
    #[command(subcommand)]
    command: DowntimeCommand,
}

#[derive(Debug, Subcommand)]
enum DowntimeCommand {
    #[command(about = "Record a downtime interval")]
    Add {
        #[command(flatten)]
        target: ShiftArgs,
        #[command(flatten)]
        span: SpanArgs,
        #[arg(short, long, default_value = "")]
        reason: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long, default_value_t = 0)]
        block: u32,
    },
    #[command(about = "List downtime entries")]
    List {
        #[command(flatten)]
        target: ShiftArgs,
    },
    #[command(about = "Delete a downtime entry")]
    Delete {
        #[command(flatten)]
        target: ShiftArgs,
        #[arg(long)]
        index: Option<usize>,
        #[arg(long, conflicts_with = "index")]
        id: Option<String>,
    },
}

pub fn cmd(args: DowntimeArgs) -> Result<()> {
    match args.command {
        DowntimeCommand::Add {
            target,
            span,
            reason,
            description,
            block,
        } => {
            let input = DowntimeInput::new(span.span(), reason).description(description).block(block);
            let added = report_entry(target.resolve().and_then(|(process, shift)| ledger()?.add_downtime(&process, shift, input)))?;
            if let Some(record) = added {
                msg_success!(Message::DowntimeAdded(record.id.short(), record.minutes()));
            }
            Ok(())
        }
        DowntimeCommand::List { target } => handle_list(&target),
        DowntimeCommand::Delete { target, index, id } => handle_delete(&target, index, id),
    }
}

fn handle_list(target: &ShiftArgs) -> Result<()> {
    let Some((process, shift)) = report_entry(target.resolve())? else {
        return Ok(());
    };
    let records = ledger()?.downtime(&process, shift)?;

    if records.is_empty() {
        msg_info!(Message::NoDowntime(process.to_string(), shift));
        return Ok(());
    }

    msg_print!(Message::DowntimeHeader(process.to_string(), shift), true);
    View::downtime(&records)?;
    Ok(())
}

fn handle_delete(target: &ShiftArgs, index: Option<usize>, id: Option<String>) -> Result<()> {
    let Some((process, shift)) = report_entry(target.resolve())? else {
        return Ok(());
    };
    let ledger = ledger()?;

    let result = match (index, id) {
        (Some(index), _) => ledger.delete_downtime_at(&process, shift, index).map(|_| index.to_string()),
        (None, Some(prefix)) => ledger
            .resolve::<DowntimeRecord>(&process, shift, &prefix)
            .and_then(|id| ledger.delete_downtime(&process, shift, id).map(|_| id.short())),
        (None, None) => {
            let records = ledger.downtime(&process, shift)?;
            if records.is_empty() {
                msg_info!(Message::NoDowntime(process.to_string(), shift));
                return Ok(());
            }

            let labels: Vec<String> = records
                .iter()
                .map(|r| format!("{} {} min  {} {}", r.id.short(), r.minutes(), r.reason, r.description))
                .collect();
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::SelectRecordToDelete.to_string())
                .items(&labels)
                .interact()?;

            let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::ConfirmDeleteRecord(labels[selection].clone()).to_string())
                .default(false)
                .interact()?;
            if !confirmed {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }

            let id = records[selection].id;
            ledger.delete_downtime(&process, shift, id).map(|_| id.short())
        }
    };

    if let Some(deleted) = report_entry(result)? {
        msg_success!(Message::RecordDeleted(deleted));
    }
    Ok(())
}

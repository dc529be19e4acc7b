use super::{ledger, report_entry, ShiftArgs, SpanArgs};
use crate::{
    libs::{
        ledger::MaintenanceInput,
        messages::Message,
        record::{MaintenanceRecord, ShiftRecord},
        view::{maintenance_rows, RowKind, View},
    },
    msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Select};

#[derive(Debug, Args)]
pub struct MaintenanceArgs {
    #[command(subcommand)]
    command: MaintenanceCommand,
}

#[derive(Debug, Subcommand)]
enum MaintenanceCommand {
    #[command(about = "Record a maintenance job")]
    Add {
        #[command(flatten)]
        target: ShiftArgs,
        #[command(flatten)]
        span: SpanArgs,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long)]
        equipment: Option<String>,
        /// Input block the job belongs to
        #[arg(short, long, default_value_t = 0)]
        block: u32,
    },
    #[command(about = "Add time to an existing maintenance job")]
    Addendum {
        #[command(flatten)]
        target: ShiftArgs,
        /// Id (or unique id prefix) of the primary job
        source: String,
        #[command(flatten)]
        span: SpanArgs,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    #[command(about = "List maintenance entries grouped with their addenda")]
    List {
        #[command(flatten)]
        target: ShiftArgs,
        #[arg(short, long)]
        block: Option<u32>,
    },
    #[command(about = "Delete a maintenance entry")]
    Delete {
        #[command(flatten)]
        target: ShiftArgs,
        /// Position in the list, as shown by `list`
        #[arg(long)]
        index: Option<usize>,
        /// Id or unique id prefix
        #[arg(long, conflicts_with = "index")]
        id: Option<String>,
    },
}

pub fn cmd(args: MaintenanceArgs) -> Result<()> {
    match args.command {
        MaintenanceCommand::Add {
            target,
            span,
            description,
            equipment,
            block,
        } => {
            let mut input = MaintenanceInput::new(span.span(), description).block(block);
            if let Some(equipment) = equipment {
                input = input.equipment(equipment);
            }
            handle_add(&target, input)
        }
        MaintenanceCommand::Addendum {
            target,
            source,
            span,
            description,
        } => handle_addendum(&target, &source, MaintenanceInput::new(span.span(), description)),
        MaintenanceCommand::List { target, block } => handle_list(&target, block),
        MaintenanceCommand::Delete { target, index, id } => handle_delete(&target, index, id),
    }
}

fn handle_add(target: &ShiftArgs, input: MaintenanceInput) -> Result<()> {
    let added = report_entry(target.resolve().and_then(|(process, shift)| ledger()?.add_maintenance(&process, shift, input)))?;
    if let Some(record) = added {
        msg_success!(Message::MaintenanceAdded(record.id.short(), record.minutes()));
    }
    Ok(())
}

fn handle_addendum(target: &ShiftArgs, source: &str, input: MaintenanceInput) -> Result<()> {
    let added = report_entry(target.resolve().and_then(|(process, shift)| {
        let ledger = ledger()?;
        let source = ledger.resolve::<MaintenanceRecord>(&process, shift, source)?;
        ledger.add_addendum(&process, shift, source, input)
    }))?;

    if let Some(record) = added {
        let source = record.addendum_of.map(|id| id.short()).unwrap_or_default();
        msg_success!(Message::AddendumAdded(record.id.short(), source, record.minutes()));
    }
    Ok(())
}

fn handle_list(target: &ShiftArgs, block: Option<u32>) -> Result<()> {
    let Some((process, shift)) = report_entry(target.resolve())? else {
        return Ok(());
    };
    let records = ledger()?.maintenance(&process, shift)?;
    let rows = maintenance_rows(&records, block);

    if rows.is_empty() {
        msg_info!(Message::NoMaintenance(process.to_string(), shift));
        return Ok(());
    }

    msg_print!(Message::MaintenanceHeader(process.to_string(), shift), true);
    View::maintenance(&records, block)?;

    let orphans = rows.iter().filter(|row| row.kind == RowKind::Orphan).count();
    if orphans > 0 {
        msg_warning!(Message::OrphanedAddenda(orphans));
    }
    Ok(())
}

fn handle_delete(target: &ShiftArgs, index: Option<usize>, id: Option<String>) -> Result<()> {
    let Some((process, shift)) = report_entry(target.resolve())? else {
        return Ok(());
    };
    let ledger = ledger()?;

    let result = match (index, id) {
        (Some(index), _) => ledger.delete_maintenance_at(&process, shift, index).map(|_| index.to_string()),
        (None, Some(prefix)) => ledger
            .resolve::<MaintenanceRecord>(&process, shift, &prefix)
            .and_then(|id| ledger.delete_maintenance(&process, shift, id).map(|_| id.short())),
        (None, None) => {
            let records = ledger.maintenance(&process, shift)?;
            if records.is_empty() {
                msg_info!(Message::NoMaintenance(process.to_string(), shift));
                return Ok(());
            }

            let labels: Vec<String> = records
                .iter()
                .map(|r| format!("{} {} min  {}", r.id.short(), r.minutes(), r.description))
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
            ledger.delete_maintenance(&process, shift, id).map(|_| id.short())
        }
    };

    if let Some(deleted) = report_entry(result)? {
        msg_success!(Message::RecordDeleted(deleted));
    }
    Ok(())
}

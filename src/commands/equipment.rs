use super::resolve_shift;
use crate::{
    db::{outbox::Outbox, shift_store::SqliteStore},
    libs::{
        config::Config,
        equipment::EquipmentBook,
        messages::Message,
        shift::{EquipmentField, EquipmentId, Shift},
        view::View,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct EquipmentArgs {
    #[command(subcommand)]
    command: EquipmentCommand,
}

#[derive(Debug, Subcommand)]
enum EquipmentCommand {
    #[command(about = "Set memo, material or status; an empty value clears it")]
    Set {
        equipment: String,
        /// memo, material or status
        field: EquipmentField,
        value: String,
        #[arg(short, long)]
        shift: Option<Shift>,
    },
    #[command(about = "Show all notes of an equipment")]
    Show {
        equipment: String,
        #[arg(short, long)]
        shift: Option<Shift>,
    },
}

pub fn cmd(args: EquipmentArgs) -> Result<()> {
    match args.command {
        EquipmentCommand::Set {
            equipment,
            field,
            value,
            shift,
        } => {
            let shift = resolve_shift(shift)?;
            let config = Config::read()?;
            let store = SqliteStore::new()?;
            let outbox = Outbox::with_connection(store.conn.clone());
            let book = EquipmentBook::new(store).with_outbox(outbox, config.operator());

            let id = EquipmentId::new(equipment.trim());
            let queued = book.set(&id, field, shift, &value)?;
            if value.trim().is_empty() {
                msg_success!(Message::EquipmentNoteCleared(id.to_string(), field.as_str().to_string()));
            } else {
                msg_success!(Message::EquipmentNoteSaved(id.to_string(), field.as_str().to_string()));
            }
            if let Some(outbox_id) = queued {
                msg_info!(Message::EquipmentStatusQueued(outbox_id));
            }
            Ok(())
        }
        EquipmentCommand::Show { equipment, shift } => {
            let shift = resolve_shift(shift)?;
            let id = EquipmentId::new(equipment.trim());
            let notes = EquipmentBook::new(SqliteStore::new()?).notes(&id, shift)?;

            msg_print!(Message::EquipmentHeader(id.to_string(), shift), true);
            View::equipment(&notes)?;
            Ok(())
        }
    }
}

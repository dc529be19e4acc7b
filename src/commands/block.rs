use super::{report_entry, ShiftArgs};
use crate::{
    db::shift_store::SqliteStore,
    libs::{
        blocks::{Blocks, DraftEntry},
        messages::Message,
        view::View,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct BlockArgs {
    #[command(subcommand)]
    command: BlockCommand,
}

#[derive(Debug, Subcommand)]
enum BlockCommand {
    #[command(about = "Set the yield count of a block")]
    Yield {
        #[command(flatten)]
        target: ShiftArgs,
        block: usize,
        count: u32,
    },
    #[command(about = "Set the material of a block")]
    Material {
        #[command(flatten)]
        target: ShiftArgs,
        block: usize,
        material: String,
    },
    #[command(about = "Keep unsaved maintenance input with a block")]
    Draft {
        #[command(flatten)]
        target: ShiftArgs,
        block: usize,
        #[arg(long, default_value = "")]
        start: String,
        #[arg(long, default_value = "")]
        end: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    #[command(about = "List blocks of a process")]
    List {
        #[command(flatten)]
        target: ShiftArgs,
    },
}

pub fn cmd(args: BlockArgs) -> Result<()> {
    let blocks = Blocks::new(SqliteStore::new()?);

    match args.command {
        BlockCommand::Yield { target, block, count } => {
            if let Some((process, shift)) = report_entry(target.resolve())? {
                if report_entry(blocks.set_yield(&process, shift, block, count))?.is_some() {
                    msg_success!(Message::BlockUpdated(block));
                }
            }
        }
        BlockCommand::Material { target, block, material } => {
            if let Some((process, shift)) = report_entry(target.resolve())? {
                if report_entry(blocks.set_material(&process, shift, block, &material))?.is_some() {
                    msg_success!(Message::BlockUpdated(block));
                }
            }
        }
        BlockCommand::Draft {
            target,
            block,
            start,
            end,
            description,
        } => {
            if let Some((process, shift)) = report_entry(target.resolve())? {
                if report_entry(blocks.save_draft(&process, shift, block, DraftEntry { start, end, description }))?.is_some() {
                    msg_success!(Message::BlockUpdated(block));
                }
            }
        }
        BlockCommand::List { target } => {
            if let Some((process, shift)) = report_entry(target.resolve())? {
                let list = blocks.list(&process, shift)?;
                if list.is_empty() {
                    msg_info!(Message::NoBlocks(process.to_string(), shift));
                } else {
                    msg_print!(Message::BlocksHeader(process.to_string(), shift), true);
                    View::blocks(&list)?;
                }
            }
        }
    }
    Ok(())
}

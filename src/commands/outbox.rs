use crate::{
    db::outbox::Outbox,
    libs::{messages::Message, view::View},
    msg_info, msg_print,
};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let entries = Outbox::new()?.pending()?;
    if entries.is_empty() {
        msg_info!(Message::OutboxEmpty);
        return Ok(());
    }

    msg_print!(Message::OutboxHeader(entries.len()), true);
    View::outbox(&entries)?;
    Ok(())
}

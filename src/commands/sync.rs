use crate::{
    api::MesClient,
    db::outbox::Outbox,
    libs::{config::Config, messages::Message, sync},
    msg_bail_anyhow, msg_info, msg_success, msg_warning,
};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let config = Config::read()?;
    let Some(api_url) = config.api_url() else {
        msg_bail_anyhow!(Message::ServerNotConfigured);
    };

    let outbox = Outbox::new()?;
    if outbox.is_empty()? {
        msg_info!(Message::OutboxEmpty);
        return Ok(());
    }

    let report = sync::flush(&outbox, &MesClient::new(api_url)).await?;
    msg_success!(Message::SyncCompleted(report.sent, report.failed));
    if report.failed > 0 {
        msg_warning!(Message::SyncFailuresKept(report.failed));
    }
    Ok(())
}

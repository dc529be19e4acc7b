use crate::{
    api::{mes::Resource, MesClient},
    libs::{config::Config, messages::Message, view::View},
    msg_bail_anyhow, msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct RemoteArgs {
    /// Collection to fetch
    #[arg(value_enum)]
    resource: Resource,
}

pub async fn cmd(args: RemoteArgs) -> Result<()> {
    let config = Config::read()?;
    let Some(api_url) = config.api_url() else {
        msg_bail_anyhow!(Message::ServerNotConfigured);
    };

    let collection = args.resource.collection().to_string();
    let items: Vec<serde_json::Value> = MesClient::new(api_url).list(args.resource).await?;
    if items.is_empty() {
        msg_info!(Message::RemoteEmpty(collection));
        return Ok(());
    }

    msg_print!(Message::RemoteHeader(collection, items.len()), true);
    View::remote(&items)?;
    Ok(())
}

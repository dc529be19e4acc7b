//! Remote MES API integration.
//!
//! The local database is the source of truth. Writes the server should also
//! see go through the outbox and are pushed by a [`RemoteSink`]; the only
//! production sink is the reqwest-based [`mes::MesClient`]. Tests plug in
//! their own sink.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mest::api::mes::MesClient;
//! use mest::db::outbox::Outbox;
//! use mest::libs::sync;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = MesClient::new("http://mes.local:3000");
//! let report = sync::flush(&Outbox::new()?, &client).await?;
//! println!("{} sent, {} failed", report.sent, report.failed);
//! # Ok(())
//! # }
//! ```

use crate::db::outbox::OutboxEntry;
use anyhow::Result;

pub mod mes;

pub use mes::MesClient;

/// Destination for queued remote writes.
#[allow(async_fn_in_trait)]
pub trait RemoteSink {
    /// Delivers one queued request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be sent or the server
    /// answered with a non-success status. The entry then stays queued.
    async fn push(&self, entry: &OutboxEntry) -> Result<()>;
}

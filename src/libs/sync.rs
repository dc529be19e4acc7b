//! Pushes queued outbox entries to a remote sink.
//!
//! Entries are sent oldest first. A delivered entry leaves the outbox; a
//! failed one stays with its attempt count raised and the error recorded.
//! Local state is never touched here.

use crate::api::RemoteSink;
use crate::db::outbox::Outbox;
use anyhow::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub sent: usize,
    pub failed: usize,
}

pub async fn flush<R: RemoteSink>(outbox: &Outbox, sink: &R) -> Result<SyncReport> {
    let mut report = SyncReport::default();
    for entry in outbox.pending()? {
        match sink.push(&entry).await {
            Ok(()) => {
                outbox.mark_sent(entry.id)?;
                report.sent += 1;
            }
            Err(e) => {
                tracing::warn!(id = entry.id, path = %entry.path, error = %e, "remote write failed");
                outbox.mark_failed(entry.id, &e.to_string())?;
                report.failed += 1;
            }
        }
    }
    Ok(report)
}

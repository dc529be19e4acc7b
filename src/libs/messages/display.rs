//! Text of every [`Message`].
//!
//! All user-facing wording lives in this one `match`, so commands only pick a
//! variant and its parameters.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === ENTRY MESSAGES ===
            Message::MaintenanceAdded(id, minutes) => format!("Maintenance {} recorded ({} min)", id, minutes),
            Message::AddendumAdded(id, source, minutes) => {
                format!("Addendum {} added to {} ({} min)", id, source, minutes)
            }
            Message::DowntimeAdded(id, minutes) => format!("Downtime {} recorded ({} min)", id, minutes),
            Message::RecordDeleted(id) => format!("Record {} deleted", id),
            Message::EntryRejected(reason) => format!("Entry rejected: {}", reason),
            Message::NoMaintenance(process, shift) => {
                format!("No maintenance recorded for process {} in shift {}", process, shift)
            }
            Message::NoDowntime(process, shift) => format!("No downtime recorded for process {} in shift {}", process, shift),
            Message::MaintenanceHeader(process, shift) => format!("Maintenance: process {}, shift {}", process, shift),
            Message::DowntimeHeader(process, shift) => format!("Downtime: process {}, shift {}", process, shift),
            Message::OrphanedAddenda(count) => {
                format!("{} addenda point at a missing primary and are not counted (marked ?)", count)
            }
            Message::SelectRecordToDelete => "Select the record to delete".to_string(),
            Message::ConfirmDeleteRecord(label) => format!("Delete '{}'?", label),
            Message::OperationCancelled => "Operation cancelled".to_string(),

            // === SUMMARY MESSAGES ===
            Message::SummaryHeader(process, shift) => format!("Shift utilization: process {}, shift {}", process, shift),

            // === BLOCK MESSAGES ===
            Message::BlockUpdated(block) => format!("Block {} updated", block),
            Message::NoBlocks(process, shift) => format!("No blocks for process {} in shift {}", process, shift),
            Message::BlocksHeader(process, shift) => format!("Blocks: process {}, shift {}", process, shift),

            // === EQUIPMENT MESSAGES ===
            Message::EquipmentNoteSaved(equipment, field) => format!("Saved {} of equipment {}", field, equipment),
            Message::EquipmentNoteCleared(equipment, field) => format!("Cleared {} of equipment {}", field, equipment),
            Message::EquipmentStatusQueued(id) => format!("Status change queued for the server (outbox #{})", id),
            Message::EquipmentHeader(equipment, shift) => format!("Equipment {}, shift {}", equipment, shift),

            // === OUTBOX / SYNC MESSAGES ===
            Message::OutboxEmpty => "Outbox is empty, local and server data agree".to_string(),
            Message::OutboxHeader(count) => format!("{} writes waiting for the server", count),
            Message::ServerNotConfigured => "No MES server configured. Run `mest init` and set the server URL".to_string(),
            Message::RemoteEmpty(collection) => format!("Server has no {}", collection),
            Message::RemoteHeader(collection, count) => format!("{} on the server ({})", collection, count),
            Message::SyncCompleted(sent, failed) => format!("Sync finished: {} sent, {} failed", sent, failed),
            Message::SyncFailuresKept(count) => {
                format!("{} writes stay in the outbox; check `mest outbox` for the errors", count)
            }

            // === CONFIG MESSAGES ===
            Message::ConfigSaved => "Configuration saved".to_string(),
            Message::ConfigModuleShift => "Shift settings".to_string(),
            Message::ConfigModuleServer => "MES server settings".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptDefaultShift => "Default shift".to_string(),
            Message::PromptOperator => "Operator name".to_string(),
            Message::PromptServerApiUrl => "MES server URL".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportingData(process, shift, format) => {
                format!("Exporting process {} shift {} as {}", process, shift, format)
            }
            Message::ExportCompleted(path) => format!("Export completed: {}", path),

            // === STORAGE MESSAGES ===
            Message::StoredValueUnreadable(key) => format!("Stored value under {} is unreadable and was ignored", key),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
        };

        write!(f, "{}", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::shift::Shift;

    #[test]
    fn renders_parameters() {
        assert_eq!(Message::SyncCompleted(3, 1).to_string(), "Sync finished: 3 sent, 1 failed");
        assert_eq!(
            Message::MaintenanceHeader("P1".into(), Shift::B).to_string(),
            "Maintenance: process P1, shift B"
        );
    }
}

use crate::libs::shift::Shift;

/// Every piece of user-facing text the CLI prints.
#[derive(Debug, Clone)]
pub enum Message {
    // === ENTRY MESSAGES ===
    MaintenanceAdded(String, u32),         // id, minutes
    AddendumAdded(String, String, u32),    // id, source id, minutes
    DowntimeAdded(String, u32),            // id, minutes
    RecordDeleted(String),                 // id
    EntryRejected(String),                 // reason
    NoMaintenance(String, Shift),
    NoDowntime(String, Shift),
    MaintenanceHeader(String, Shift),
    DowntimeHeader(String, Shift),
    OrphanedAddenda(usize),
    SelectRecordToDelete,
    ConfirmDeleteRecord(String),
    OperationCancelled,

    // === SUMMARY MESSAGES ===
    SummaryHeader(String, Shift),

    // === BLOCK MESSAGES ===
    BlockUpdated(usize),
    NoBlocks(String, Shift),
    BlocksHeader(String, Shift),

    // === EQUIPMENT MESSAGES ===
    EquipmentNoteSaved(String, String), // equipment, field
    EquipmentNoteCleared(String, String),
    EquipmentStatusQueued(i64),
    EquipmentHeader(String, Shift),

    // === OUTBOX / SYNC MESSAGES ===
    OutboxEmpty,
    OutboxHeader(usize),
    ServerNotConfigured,
    SyncCompleted(usize, usize), // sent, failed
    SyncFailuresKept(usize),
    RemoteEmpty(String),         // collection
    RemoteHeader(String, usize), // collection, count

    // === CONFIG MESSAGES ===
    ConfigSaved,
    ConfigModuleShift,
    ConfigModuleServer,
    PromptSelectModules,
    PromptDefaultShift,
    PromptOperator,
    PromptServerApiUrl,

    // === EXPORT MESSAGES ===
    ExportingData(String, Shift, String), // process, shift, format
    ExportCompleted(String),

    // === STORAGE MESSAGES ===
    StoredValueUnreadable(String),

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
}

#[cfg(test)]
mod tests {
    use mest::db::store::MemoryStore;
    use mest::libs::export::{ExportFormat, Exporter, ShiftExport};
    use mest::libs::ledger::{DowntimeInput, MaintenanceInput, ShiftLedger, Span};
    use mest::libs::record::RecordId;
    use mest::libs::shift::{ProcessId, Shift};
    use std::fs;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ExportTestContext {
        temp_dir: TempDir,
        data: ShiftExport,
        primary: RecordId,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let ledger = ShiftLedger::new(MemoryStore::new());
            let p1 = ProcessId::new("P1");

            let primary = ledger
                .add_maintenance(&p1, Shift::A, MaintenanceInput::new(Span::range("08:00", "08:30"), "clean").equipment("CNC-2"))
                .unwrap();
            ledger
                .add_addendum(&p1, Shift::A, primary.id, MaintenanceInput::new(Span::Minutes(10), "retighten"))
                .unwrap();
            ledger
                .add_downtime(&p1, Shift::A, DowntimeInput::new(Span::Minutes(15), "jam").description("feeder"))
                .unwrap();

            ExportTestContext {
                data: ShiftExport::gather(&ledger, &p1, Shift::A).unwrap(),
                temp_dir,
                primary: primary.id,
            }
        }
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_gather_carries_groups_and_summary(ctx: &mut ExportTestContext) {
        assert_eq!(ctx.data.maintenance.len(), 2);
        assert_eq!(ctx.data.maintenance[1].addendum_of, Some(ctx.primary.to_string()));
        assert!(!ctx.data.maintenance[1].orphaned);
        assert_eq!(ctx.data.summary.maintenance_minutes, 40);
        assert_eq!(ctx.data.summary.downtime_minutes, 15);
        assert_eq!(ctx.data.summary.remaining_minutes, 425);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_json_export(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("shift.json");
        let written = Exporter::new(ExportFormat::Json, Some(path.clone())).write(&ctx.data).unwrap();
        assert_eq!(written, path);

        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["process"], "P1");
        assert_eq!(json["shift"], "A");
        assert_eq!(json["summary"]["maintenanceMinutes"], 40);
        assert_eq!(json["downtime"][0]["reason"], "jam");
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_csv_export(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("shift.csv");
        Exporter::new(ExportFormat::Csv, Some(path.clone())).write(&ctx.data).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("MAINTENANCE"));
        assert!(content.contains("DOWNTIME"));
        assert!(content.contains("Maintenance,00:40,8.3%"));
        assert!(content.contains("08:00~08:30 clean"));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_excel_export(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("shift.xlsx");
        Exporter::new(ExportFormat::Excel, Some(path.clone())).write(&ctx.data).unwrap();

        let metadata = fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_default_file_name() {
        let data = ExportTestContext::setup().data;
        let path = Exporter::new(ExportFormat::Excel, None).path_for(&data);
        let name = path.to_string_lossy();
        assert!(name.starts_with("mest_P1_A_"));
        assert!(name.ends_with(".xlsx"));
    }

    #[test]
    fn test_default_file_name_stays_in_working_dir() {
        let mut data = ExportTestContext::setup().data;
        data.process = "../line\\P1/a".to_string();
        let path = Exporter::new(ExportFormat::Csv, None).path_for(&data);

        assert_eq!(path.components().count(), 1);
        let name = path.to_string_lossy();
        assert!(name.starts_with("mest_.._line_P1_a_A_"));
        assert!(name.ends_with(".csv"));
    }
}

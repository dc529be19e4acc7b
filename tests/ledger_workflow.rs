#[cfg(test)]
mod tests {
    use mest::db::db::Db;
    use mest::db::shift_store::SqliteStore;
    use mest::libs::error::EntryError;
    use mest::libs::ledger::{DowntimeInput, MaintenanceInput, ShiftLedger, Span};
    use mest::libs::record::{MaintenanceRecord, ShiftRecord};
    use mest::libs::shift::{ProcessId, Shift};
    use mest::libs::view::{maintenance_rows, RowKind};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct LedgerTestContext {
        _temp_dir: TempDir,
        ledger: ShiftLedger<SqliteStore>,
        process: ProcessId,
    }

    impl TestContext for LedgerTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let conn = Db::open(temp_dir.path().join("mest.db")).unwrap().shared();
            LedgerTestContext {
                _temp_dir: temp_dir,
                ledger: ShiftLedger::new(SqliteStore::with_connection(conn)),
                process: ProcessId::new("P1"),
            }
        }
    }

    #[test_context(LedgerTestContext)]
    #[test]
    fn test_shift_switch_keeps_partitions(ctx: &mut LedgerTestContext) {
        let record = ctx
            .ledger
            .add_maintenance(&ctx.process, Shift::A, MaintenanceInput::new(Span::range("08:00", "08:30"), "clean"))
            .unwrap();
        assert_eq!(record.duration_minutes, Some(30));

        assert!(ctx.ledger.maintenance(&ctx.process, Shift::B).unwrap().is_empty());
        assert_eq!(ctx.ledger.summary(&ctx.process, Shift::B).unwrap().remaining_minutes, 480);

        let back = ctx.ledger.maintenance(&ctx.process, Shift::A).unwrap();
        assert_eq!(back, vec![record]);
        assert_eq!(back[0].description, "08:00~08:30 clean");
    }

    #[test_context(LedgerTestContext)]
    #[test]
    fn test_addenda_roll_into_group_total(ctx: &mut LedgerTestContext) {
        let p = &ctx.process;
        ctx.ledger.add_maintenance(p, Shift::A, MaintenanceInput::new(Span::Minutes(3), "a")).unwrap();
        ctx.ledger.add_maintenance(p, Shift::A, MaintenanceInput::new(Span::Minutes(4), "b")).unwrap();
        let primary = ctx.ledger.add_maintenance(p, Shift::A, MaintenanceInput::new(Span::Minutes(10), "c")).unwrap();
        ctx.ledger
            .add_addendum(p, Shift::A, primary.id, MaintenanceInput::new(Span::Minutes(5), "c+"))
            .unwrap();
        ctx.ledger
            .add_addendum(p, Shift::A, primary.id, MaintenanceInput::new(Span::range("09:00", "09:07"), "c++"))
            .unwrap();

        let groups = ctx.ledger.groups(p, Shift::A, 0).unwrap();
        let group = groups.iter().find(|g| g.primary.id == primary.id).unwrap();
        assert_eq!(group.addenda.len(), 2);
        assert_eq!(group.minutes, 22);

        assert_eq!(ctx.ledger.summary(p, Shift::A).unwrap().maintenance_minutes, 3 + 4 + 22);
    }

    #[test_context(LedgerTestContext)]
    #[test]
    fn test_summary_combines_kinds(ctx: &mut LedgerTestContext) {
        let p = &ctx.process;
        ctx.ledger
            .add_maintenance(p, Shift::C, MaintenanceInput::new(Span::range("23:30", "00:10"), "night").block(1))
            .unwrap();
        ctx.ledger
            .add_maintenance(p, Shift::C, MaintenanceInput::new(Span::Minutes(25), "day"))
            .unwrap();
        ctx.ledger
            .add_downtime(p, Shift::C, DowntimeInput::new(Span::range("10:00", "10:15"), "jam"))
            .unwrap();

        let summary = ctx.ledger.summary(p, Shift::C).unwrap();
        assert_eq!(summary.maintenance_minutes, 65);
        assert_eq!(summary.downtime_minutes, 15);
        assert_eq!(summary.operating_minutes, 0);
        assert_eq!(summary.remaining_minutes, 400);
    }

    #[test_context(LedgerTestContext)]
    #[test]
    fn test_overbooked_shift_clamps_remaining(ctx: &mut LedgerTestContext) {
        let p = &ctx.process;
        ctx.ledger.add_maintenance(p, Shift::A, MaintenanceInput::new(Span::Minutes(500), "overhaul")).unwrap();
        ctx.ledger.add_downtime(p, Shift::A, DowntimeInput::new(Span::Minutes(50), "power")).unwrap();

        let summary = ctx.ledger.summary(p, Shift::A).unwrap();
        assert_eq!(summary.remaining_minutes, 0);
        assert!(summary.maintenance_percent() > 100.0);
    }

    #[test_context(LedgerTestContext)]
    #[test]
    fn test_oversized_group_saturates(ctx: &mut LedgerTestContext) {
        let p = &ctx.process;
        let primary = ctx.ledger.add_maintenance(p, Shift::A, MaintenanceInput::new(Span::Minutes(u32::MAX), "rebuild")).unwrap();
        ctx.ledger
            .add_addendum(p, Shift::A, primary.id, MaintenanceInput::new(Span::Minutes(1), "rebuild+"))
            .unwrap();

        let groups = ctx.ledger.groups(p, Shift::A, 0).unwrap();
        assert_eq!(groups[0].minutes, u32::MAX);

        let summary = ctx.ledger.summary(p, Shift::A).unwrap();
        assert_eq!(summary.maintenance_minutes, u32::MAX);
        assert_eq!(summary.remaining_minutes, 0);
    }

    #[test_context(LedgerTestContext)]
    #[test]
    fn test_rejected_entries_leave_lists_alone(ctx: &mut LedgerTestContext) {
        let p = &ctx.process;
        let err = ctx
            .ledger
            .add_maintenance(p, Shift::A, MaintenanceInput::new(Span::range("24:00", "08:00"), "x"))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EntryError>(),
            Some(EntryError::InvalidTimeFormat { field: "start", .. })
        ));

        let err = ctx.ledger.delete_downtime_at(p, Shift::A, 0).unwrap_err();
        assert_eq!(err.downcast_ref::<EntryError>(), Some(&EntryError::IndexOutOfRange { index: 0, len: 0 }));

        assert!(ctx.ledger.maintenance(p, Shift::A).unwrap().is_empty());
        assert!(ctx.ledger.downtime(p, Shift::A).unwrap().is_empty());
    }

    #[test_context(LedgerTestContext)]
    #[test]
    fn test_deleted_primary_leaves_orphans_uncounted(ctx: &mut LedgerTestContext) {
        let p = &ctx.process;
        let primary = ctx.ledger.add_maintenance(p, Shift::B, MaintenanceInput::new(Span::Minutes(10), "a")).unwrap();
        let addendum = ctx
            .ledger
            .add_addendum(p, Shift::B, primary.id, MaintenanceInput::new(Span::Minutes(5), "b"))
            .unwrap();

        let left = ctx.ledger.delete_maintenance(p, Shift::B, primary.id).unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, addendum.id);
        assert_eq!(left[0].minutes(), 5);

        assert_eq!(ctx.ledger.summary(p, Shift::B).unwrap().maintenance_minutes, 0);
        assert!(ctx.ledger.groups(p, Shift::B, 0).unwrap().is_empty());
    }

    #[test_context(LedgerTestContext)]
    #[test]
    fn test_block_listing_index_deletes_shown_record(ctx: &mut LedgerTestContext) {
        let p = &ctx.process;
        ctx.ledger.add_maintenance(p, Shift::A, MaintenanceInput::new(Span::Minutes(10), "first")).unwrap();
        let second = ctx
            .ledger
            .add_maintenance(p, Shift::A, MaintenanceInput::new(Span::Minutes(20), "second").block(1))
            .unwrap();

        let list = ctx.ledger.maintenance(p, Shift::A).unwrap();
        let rows = maintenance_rows(&list, Some(1));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].record.id, second.id);
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[0].kind, RowKind::Primary { group_minutes: 20 });

        let left = ctx.ledger.delete_maintenance_at(p, Shift::A, rows[0].position).unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].description, "first");
    }

    #[test_context(LedgerTestContext)]
    #[test]
    fn test_block_listing_keeps_its_own_orphans(ctx: &mut LedgerTestContext) {
        let p = &ctx.process;
        let primary = ctx
            .ledger
            .add_maintenance(p, Shift::A, MaintenanceInput::new(Span::Minutes(10), "a").block(2))
            .unwrap();
        ctx.ledger
            .add_addendum(p, Shift::A, primary.id, MaintenanceInput::new(Span::Minutes(5), "a+"))
            .unwrap();
        ctx.ledger.add_maintenance(p, Shift::A, MaintenanceInput::new(Span::Minutes(7), "b")).unwrap();
        ctx.ledger.delete_maintenance(p, Shift::A, primary.id).unwrap();

        let list = ctx.ledger.maintenance(p, Shift::A).unwrap();
        let block_two = maintenance_rows(&list, Some(2));
        assert_eq!(block_two.len(), 1);
        assert_eq!(block_two[0].kind, RowKind::Orphan);
        assert_eq!(block_two[0].position, 0);

        let block_zero = maintenance_rows(&list, Some(0));
        assert_eq!(block_zero.len(), 1);
        assert_eq!(block_zero[0].position, 1);
        assert_eq!(maintenance_rows(&list, None).len(), 2);
    }

    #[test_context(LedgerTestContext)]
    #[test]
    fn test_ids_resolve_by_prefix(ctx: &mut LedgerTestContext) {
        let p = &ctx.process;
        let record = ctx.ledger.add_maintenance(p, Shift::A, MaintenanceInput::new(Span::Minutes(8), "a")).unwrap();

        let resolved = ctx.ledger.resolve::<MaintenanceRecord>(p, Shift::A, &record.id.short()).unwrap();
        assert_eq!(resolved, record.id);

        let err = ctx.ledger.resolve::<MaintenanceRecord>(p, Shift::B, &record.id.short()).unwrap_err();
        assert!(matches!(err.downcast_ref::<EntryError>(), Some(EntryError::RecordNotFound(_))));
    }
}

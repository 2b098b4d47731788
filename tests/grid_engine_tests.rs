// =============================================================================
// grid_engine_tests.rs - Edit-tracking grid engine tests for pulseboard
//
// Covers pending-edit bookkeeping, no-op pruning, undo logging, column
// aggregates, the save lifecycle, and keyboard traversal. Runs via
// wasm-bindgen-test in a headless browser or Node.js.
//
// Run with:
//   wasm-pack test --headless --chrome
//   or: cargo test --target wasm32-unknown-unknown
// =============================================================================

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use pulseboard::grid::{step, GridPos, GridSession, NavKey};
use pulseboard::types::{
    AgentRow, CellValue, EditValue, MetricDefinition, MetricKind, Snapshot, ValueRecord,
};

fn metric(key: &str, kind: MetricKind) -> MetricDefinition {
    MetricDefinition {
        key: key.to_string(),
        display_name: key.to_string(),
        kind,
        emoji: String::new(),
        required: false,
        sort_order: 0,
    }
}

fn agent(id: &str, name: &str) -> AgentRow {
    AgentRow {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{id}@example.com"),
    }
}

fn record(id: &str, agent_id: &str, metric_key: &str, value: Option<CellValue>) -> ValueRecord {
    ValueRecord {
        id: id.to_string(),
        agent_id: agent_id.to_string(),
        metric_key: metric_key.to_string(),
        value,
    }
}

/// Two agents, three metric columns: dials (integer), close_rate
/// (percentage), notes (text).
fn fixture() -> Snapshot {
    Snapshot {
        metrics: vec![
            metric("dials", MetricKind::Integer),
            metric("close_rate", MetricKind::Percentage),
            metric("notes", MetricKind::Text),
        ],
        agents: vec![agent("ag-alice", "Alice"), agent("ag-bob", "Bob")],
        records: vec![
            record("rec-a-dials", "ag-alice", "dials", Some(CellValue::Number(10.0))),
            record("rec-b-dials", "ag-bob", "dials", Some(CellValue::Number(20.0))),
            record("rec-a-close", "ag-alice", "close_rate", Some(CellValue::Number(50.0))),
            record("rec-b-close", "ag-bob", "close_rate", None),
            record("rec-a-notes", "ag-alice", "notes", Some(CellValue::Text("ok".into()))),
            record("rec-b-notes", "ag-bob", "notes", None),
        ],
    }
}

// =============================================================================
// Edit tracking and no-op pruning
// =============================================================================

mod edit_tracking {
    use super::*;

    #[wasm_bindgen_test(unsupported = test)]
    fn test_edit_registers_as_pending() {
        let mut session = GridSession::new(fixture());
        assert!(!session.is_dirty());

        session.apply_edit("rec-a-dials", EditValue::Number(15.0));
        assert!(session.is_dirty());
        assert_eq!(session.pending_count(), 1);
        assert_eq!(
            session.pending_value("rec-a-dials"),
            Some(&EditValue::Number(15.0))
        );
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_edit_matching_original_is_pruned() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-a-dials", EditValue::Number(10.0));
        assert!(!session.is_dirty());
        assert_eq!(session.pending_value("rec-a-dials"), None);
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_reverting_an_edit_by_typing_clears_pending() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-a-dials", EditValue::Number(15.0));
        session.apply_edit("rec-a-dials", EditValue::Number(10.0));
        assert!(!session.is_dirty());
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_clearing_an_originally_empty_cell_is_a_noop() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-b-close", EditValue::Cleared);
        assert!(!session.is_dirty());
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_clearing_a_populated_cell_is_pending() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-a-dials", EditValue::Cleared);
        assert!(session.is_dirty());
        assert_eq!(session.effective_value("rec-a-dials"), None);
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_unknown_record_is_ignored() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-nope", EditValue::Number(1.0));
        assert!(!session.is_dirty());
        assert!(!session.can_undo());
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_redundant_commit_is_detectable() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-a-dials", EditValue::Number(15.0));

        // Re-delivering the committed value changes nothing; a different
        // value does.
        assert!(session.is_redundant("rec-a-dials", &EditValue::Number(15.0)));
        assert!(!session.is_redundant("rec-a-dials", &EditValue::Number(16.0)));

        // With nothing pending, only the original value is redundant.
        assert!(session.is_redundant("rec-b-dials", &EditValue::Number(20.0)));
        assert!(!session.is_redundant("rec-b-dials", &EditValue::Cleared));

        // Skipping redundant commits keeps the undo log at one entry, so
        // a single undo visibly reverts the edit.
        assert_eq!(session.undo_depth(), 1);
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_effective_value_prefers_pending() {
        let mut session = GridSession::new(fixture());
        assert_eq!(
            session.effective_value("rec-a-dials"),
            Some(CellValue::Number(10.0))
        );
        session.apply_edit("rec-a-dials", EditValue::Number(35.0));
        assert_eq!(
            session.effective_value("rec-a-dials"),
            Some(CellValue::Number(35.0))
        );
    }
}

// =============================================================================
// Undo log
// =============================================================================

mod undo {
    use super::*;

    #[wasm_bindgen_test(unsupported = test)]
    fn test_undo_restores_prior_pending_value() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-a-dials", EditValue::Number(15.0));
        session.apply_edit("rec-a-dials", EditValue::Number(25.0));
        assert_eq!(session.undo_depth(), 2);

        assert!(session.undo());
        assert_eq!(
            session.pending_value("rec-a-dials"),
            Some(&EditValue::Number(15.0))
        );
        assert!(session.undo());
        assert_eq!(session.pending_value("rec-a-dials"), None);
        assert!(!session.undo());
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_noop_prune_is_still_logged() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-a-dials", EditValue::Number(15.0));
        // Typing the original back prunes the pending entry but logs.
        session.apply_edit("rec-a-dials", EditValue::Number(10.0));
        assert_eq!(session.undo_depth(), 2);
        assert!(!session.is_dirty());

        // Undoing the prune brings the edit back.
        assert!(session.undo());
        assert_eq!(
            session.pending_value("rec-a-dials"),
            Some(&EditValue::Number(15.0))
        );
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_undo_is_lifo_across_records() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-a-dials", EditValue::Number(1.0));
        session.apply_edit("rec-b-dials", EditValue::Number(2.0));
        session.apply_edit("rec-a-notes", EditValue::Text("later".into()));

        assert!(session.undo());
        assert_eq!(session.pending_value("rec-a-notes"), None);
        assert_eq!(
            session.pending_value("rec-b-dials"),
            Some(&EditValue::Number(2.0))
        );

        assert!(session.undo());
        assert_eq!(session.pending_value("rec-b-dials"), None);
        assert_eq!(
            session.pending_value("rec-a-dials"),
            Some(&EditValue::Number(1.0))
        );
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_cancel_discards_pending_and_history() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-a-dials", EditValue::Number(1.0));
        session.apply_edit("rec-b-dials", EditValue::Number(2.0));

        session.cancel();
        assert!(!session.is_dirty());
        assert!(!session.can_undo());
        assert_eq!(
            session.effective_value("rec-a-dials"),
            Some(CellValue::Number(10.0))
        );
    }
}

// =============================================================================
// Column aggregates
// =============================================================================

mod aggregates {
    use super::*;

    #[wasm_bindgen_test(unsupported = test)]
    fn test_integer_column_sums() {
        let session = GridSession::new(fixture());
        let aggs = session.aggregates();
        let dials = aggs.iter().find(|a| a.metric_key == "dials").unwrap();
        assert_eq!(dials.value(), 30.0);
        assert_eq!(dials.display(), "30");
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_pending_edit_shifts_the_sum() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-a-dials", EditValue::Number(15.0));
        let aggs = session.aggregates();
        let dials = aggs.iter().find(|a| a.metric_key == "dials").unwrap();
        assert_eq!(dials.value(), 35.0);

        // Reverting the edit restores the original total.
        session.apply_edit("rec-a-dials", EditValue::Number(10.0));
        let aggs = session.aggregates();
        let dials = aggs.iter().find(|a| a.metric_key == "dials").unwrap();
        assert_eq!(dials.value(), 30.0);
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_percentage_column_averages_defined_values() {
        let mut session = GridSession::new(fixture());
        let aggs = session.aggregates();
        let close = aggs.iter().find(|a| a.metric_key == "close_rate").unwrap();
        // Only Alice has a value; the empty cell is excluded from count.
        assert_eq!(close.value(), 50.0);

        session.apply_edit("rec-b-close", EditValue::Number(30.0));
        let aggs = session.aggregates();
        let close = aggs.iter().find(|a| a.metric_key == "close_rate").unwrap();
        assert_eq!(close.value(), 40.0);
        assert_eq!(close.display(), "40.0%");
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_percentage_with_no_values_reads_zero() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-a-close", EditValue::Cleared);
        let aggs = session.aggregates();
        let close = aggs.iter().find(|a| a.metric_key == "close_rate").unwrap();
        assert_eq!(close.count, 0);
        assert_eq!(close.value(), 0.0);
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_text_columns_produce_no_aggregate() {
        let session = GridSession::new(fixture());
        let aggs = session.aggregates();
        assert!(aggs.iter().all(|a| a.metric_key != "notes"));
        assert_eq!(aggs.len(), 2);
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_cleared_cell_leaves_both_sum_and_count() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-a-dials", EditValue::Cleared);
        let aggs = session.aggregates();
        let dials = aggs.iter().find(|a| a.metric_key == "dials").unwrap();
        assert_eq!(dials.value(), 20.0);
        assert_eq!(dials.count, 1);
    }
}

// =============================================================================
// Save lifecycle
// =============================================================================

mod save {
    use super::*;

    #[wasm_bindgen_test(unsupported = test)]
    fn test_begin_save_claims_sorted_batch() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-b-dials", EditValue::Number(21.0));
        session.apply_edit("rec-a-dials", EditValue::Number(11.0));

        let batch = session.begin_save().expect("batch expected");
        assert!(session.is_saving());
        let ids: Vec<&str> = batch.iter().map(|e| e.record_id.as_str()).collect();
        assert_eq!(ids, vec!["rec-a-dials", "rec-b-dials"]);
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_second_save_during_flight_is_dropped() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-a-dials", EditValue::Number(11.0));
        assert!(session.begin_save().is_some());
        assert!(session.begin_save().is_none());
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_save_with_nothing_pending_is_dropped() {
        let mut session = GridSession::new(fixture());
        assert!(session.begin_save().is_none());
        assert!(!session.is_saving());
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_complete_save_clears_state_and_marks_highlight() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-a-dials", EditValue::Number(11.0));
        session.apply_edit("rec-a-notes", EditValue::Text("done".into()));
        session.begin_save();
        session.complete_save();

        assert!(!session.is_dirty());
        assert!(!session.is_saving());
        assert!(!session.can_undo());
        assert!(session.was_just_saved("rec-a-dials"));
        assert!(session.was_just_saved("rec-a-notes"));
        assert!(!session.was_just_saved("rec-b-dials"));

        session.clear_saved_highlight();
        assert!(!session.was_just_saved("rec-a-dials"));
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_failed_save_keeps_edits_and_history() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-a-dials", EditValue::Number(5.0));
        session.apply_edit("rec-a-notes", EditValue::Text("x".into()));
        session.begin_save();
        session.fail_save();

        assert!(!session.is_saving());
        assert_eq!(session.pending_count(), 2);
        assert_eq!(
            session.pending_value("rec-a-dials"),
            Some(&EditValue::Number(5.0))
        );
        assert_eq!(
            session.pending_value("rec-a-notes"),
            Some(&EditValue::Text("x".into()))
        );
        assert!(session.can_undo());
        assert_eq!(session.undo_depth(), 2);

        // A retry is possible.
        assert!(session.begin_save().is_some());
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_edit_during_flight_is_not_marked_saved() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-a-dials", EditValue::Number(11.0));
        let batch = session.begin_save().expect("batch expected");
        assert_eq!(batch.len(), 1);

        // Typed while the save is on the wire.
        session.apply_edit("rec-b-dials", EditValue::Number(21.0));
        session.complete_save();

        assert!(session.was_just_saved("rec-a-dials"));
        assert!(!session.was_just_saved("rec-b-dials"));
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_edit_during_flight_stays_pending_after_save() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-a-dials", EditValue::Number(11.0));
        session.begin_save();
        session.apply_edit("rec-b-dials", EditValue::Number(21.0));
        session.complete_save();

        assert!(session.is_dirty());
        assert_eq!(session.pending_value("rec-a-dials"), None);
        assert_eq!(
            session.pending_value("rec-b-dials"),
            Some(&EditValue::Number(21.0))
        );
        assert!(session.begin_save().is_some());
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_reedit_of_claimed_record_rebaselines_on_saved_value() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-a-dials", EditValue::Number(11.0));
        session.begin_save();
        session.apply_edit("rec-a-dials", EditValue::Number(12.0));
        session.complete_save();

        // The newer edit survives against the saved value as baseline.
        assert_eq!(
            session.pending_value("rec-a-dials"),
            Some(&EditValue::Number(12.0))
        );
        assert_eq!(
            session.effective_value("rec-a-dials"),
            Some(CellValue::Number(12.0))
        );

        // Typing the saved value back is now the no-op.
        session.apply_edit("rec-a-dials", EditValue::Number(11.0));
        assert!(!session.is_dirty());
    }
}

// =============================================================================
// Snapshot refresh without losing work
// =============================================================================

mod rebaseline {
    use super::*;

    #[wasm_bindgen_test(unsupported = test)]
    fn test_rebaseline_keeps_unsaved_edits() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-b-dials", EditValue::Number(21.0));

        let mut refreshed = fixture();
        refreshed.records[0].value = Some(CellValue::Number(11.0));
        session.rebaseline(refreshed);

        assert_eq!(
            session.pending_value("rec-b-dials"),
            Some(&EditValue::Number(21.0))
        );
        assert_eq!(
            session.effective_value("rec-a-dials"),
            Some(CellValue::Number(11.0))
        );
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_rebaseline_prunes_edits_matching_new_baseline() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-a-dials", EditValue::Number(11.0));

        // The server now holds the same value the user typed.
        let mut refreshed = fixture();
        refreshed.records[0].value = Some(CellValue::Number(11.0));
        session.rebaseline(refreshed);

        assert!(!session.is_dirty());
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_rebaseline_drops_edits_for_vanished_records() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-b-dials", EditValue::Number(21.0));

        let mut refreshed = fixture();
        refreshed.records.retain(|r| r.id != "rec-b-dials");
        session.rebaseline(refreshed);

        assert!(!session.is_dirty());
        assert_eq!(session.effective_value("rec-b-dials"), None);
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_rebaseline_keeps_saved_highlight() {
        let mut session = GridSession::new(fixture());
        session.apply_edit("rec-a-dials", EditValue::Number(11.0));
        session.begin_save();
        session.complete_save();
        assert!(session.was_just_saved("rec-a-dials"));

        let mut refreshed = fixture();
        refreshed.records[0].value = Some(CellValue::Number(11.0));
        session.rebaseline(refreshed);

        assert!(session.was_just_saved("rec-a-dials"));
        session.clear_saved_highlight();
        assert!(!session.was_just_saved("rec-a-dials"));
    }
}

// =============================================================================
// Input parsing
// =============================================================================

mod parse_input {
    use super::*;

    #[wasm_bindgen_test(unsupported = test)]
    fn test_blank_input_clears() {
        assert_eq!(
            GridSession::parse_input(MetricKind::Integer, "   "),
            EditValue::Cleared
        );
        assert_eq!(
            GridSession::parse_input(MetricKind::Text, ""),
            EditValue::Cleared
        );
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_integer_input_rounds() {
        assert_eq!(
            GridSession::parse_input(MetricKind::Integer, "12.7"),
            EditValue::Number(13.0)
        );
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_decimal_input_parses() {
        assert_eq!(
            GridSession::parse_input(MetricKind::Decimal, " 3.25 "),
            EditValue::Number(3.25)
        );
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_percentage_accepts_trailing_sign() {
        assert_eq!(
            GridSession::parse_input(MetricKind::Percentage, "42%"),
            EditValue::Number(42.0)
        );
        assert_eq!(
            GridSession::parse_input(MetricKind::Percentage, "42"),
            EditValue::Number(42.0)
        );
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_unparsable_numeric_clears() {
        assert_eq!(
            GridSession::parse_input(MetricKind::Integer, "abc"),
            EditValue::Cleared
        );
        assert_eq!(
            GridSession::parse_input(MetricKind::Percentage, "%%"),
            EditValue::Cleared
        );
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_text_input_is_trimmed() {
        assert_eq!(
            GridSession::parse_input(MetricKind::Text, "  hello "),
            EditValue::Text("hello".into())
        );
    }
}

// =============================================================================
// Keyboard traversal
// =============================================================================

mod navigation {
    use super::*;

    const ROWS: usize = 3;
    const COLS: usize = 4;

    #[wasm_bindgen_test(unsupported = test)]
    fn test_arrows_clamp_at_edges() {
        let origin = GridPos::new(0, 0);
        assert_eq!(step(origin, NavKey::Up, ROWS, COLS), origin);
        assert_eq!(step(origin, NavKey::Left, ROWS, COLS), origin);

        let corner = GridPos::new(2, 3);
        assert_eq!(step(corner, NavKey::Down, ROWS, COLS), corner);
        assert_eq!(step(corner, NavKey::Right, ROWS, COLS), corner);
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_arrows_move_one_cell() {
        let pos = GridPos::new(1, 1);
        assert_eq!(step(pos, NavKey::Up, ROWS, COLS), GridPos::new(0, 1));
        assert_eq!(step(pos, NavKey::Down, ROWS, COLS), GridPos::new(2, 1));
        assert_eq!(step(pos, NavKey::Left, ROWS, COLS), GridPos::new(1, 0));
        assert_eq!(step(pos, NavKey::Right, ROWS, COLS), GridPos::new(1, 2));
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_advance_wraps_to_next_row() {
        assert_eq!(
            step(GridPos::new(0, 3), NavKey::Advance, ROWS, COLS),
            GridPos::new(1, 0)
        );
        assert_eq!(
            step(GridPos::new(0, 1), NavKey::Advance, ROWS, COLS),
            GridPos::new(0, 2)
        );
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_retreat_wraps_to_previous_row() {
        assert_eq!(
            step(GridPos::new(1, 0), NavKey::Retreat, ROWS, COLS),
            GridPos::new(0, 3)
        );
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_advance_clamps_at_last_cell() {
        let last = GridPos::new(2, 3);
        assert_eq!(step(last, NavKey::Advance, ROWS, COLS), last);
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_retreat_clamps_at_first_cell() {
        let first = GridPos::new(0, 0);
        assert_eq!(step(first, NavKey::Retreat, ROWS, COLS), first);
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_empty_grid_never_moves() {
        let pos = GridPos::new(0, 0);
        assert_eq!(step(pos, NavKey::Advance, 0, 0), pos);
        assert_eq!(step(pos, NavKey::Down, 0, 4), pos);
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn test_out_of_range_position_is_clamped_first() {
        assert_eq!(
            step(GridPos::new(9, 9), NavKey::Down, ROWS, COLS),
            GridPos::new(2, 3)
        );
    }
}

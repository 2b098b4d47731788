//! Edit-tracking state for the daily update grid.
//!
//! A `GridSession` owns everything that can change between snapshot load
//! and save: the pending-edit map, the undo log, the in-flight save flag,
//! and the transient just-saved marker set. It is deliberately free of UI
//! and network dependencies; the page layer feeds it parsed input and
//! ships its batches to the backend.

use std::collections::{HashMap, HashSet};

use crate::types::{CellValue, EditValue, MetricKind, RecordId, Snapshot};

pub mod aggregates;
pub mod nav;

pub use aggregates::{aggregate_columns, MetricAggregate};
pub use nav::{step, GridPos, NavKey};

/// One reversible step in the edit log. `None` on either side means
/// "no pending entry for this record".
#[derive(Debug, Clone, PartialEq)]
pub struct UndoAction {
    pub record_id: RecordId,
    pub before: Option<EditValue>,
    pub after: Option<EditValue>,
}

/// One (record, value) pair of a save batch, in engine terms. The wire
/// shape with split numeric/text fields is built at the API boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    pub record_id: RecordId,
    pub value: EditValue,
}

#[derive(Debug, Clone, Default)]
pub struct GridSession {
    snapshot: Snapshot,
    originals: HashMap<RecordId, Option<CellValue>>,
    pending: HashMap<RecordId, EditValue>,
    undo_stack: Vec<UndoAction>,
    saving: bool,
    // Batch claimed by begin_save, consumed on completion. Editing is not
    // blocked during a save, so completion must settle exactly these
    // entries and nothing newer.
    in_flight: Vec<BatchEntry>,
    just_saved: HashSet<RecordId>,
}

impl GridSession {
    /// Start a fresh session over a snapshot. The snapshot's current
    /// values become the baseline that no-op detection compares against.
    /// Selection changes build a new session; a refetch for the same
    /// selection goes through `rebaseline` instead.
    pub fn new(snapshot: Snapshot) -> Self {
        let originals = snapshot
            .records
            .iter()
            .map(|r| (r.id.clone(), r.value.clone()))
            .collect();
        GridSession {
            snapshot,
            originals,
            pending: HashMap::new(),
            undo_stack: Vec::new(),
            saving: false,
            in_flight: Vec::new(),
            just_saved: HashSet::new(),
        }
    }

    /// Install a freshly fetched snapshot for the same selection without
    /// discarding unsaved work. Pending edits are re-pruned against the
    /// new baseline; edits whose records no longer exist are dropped. The
    /// just-saved marking survives so a post-save refresh does not cut
    /// the highlight window short.
    pub fn rebaseline(&mut self, snapshot: Snapshot) {
        self.originals = snapshot
            .records
            .iter()
            .map(|r| (r.id.clone(), r.value.clone()))
            .collect();
        self.snapshot = snapshot;
        let originals = &self.originals;
        self.pending.retain(|id, edit| match originals.get(id) {
            Some(original) => !edit.matches_original(original.as_ref()),
            None => false,
        });
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_dirty(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn pending_value(&self, record_id: &str) -> Option<&EditValue> {
        self.pending.get(record_id)
    }

    pub fn was_just_saved(&self, record_id: &str) -> bool {
        self.just_saved.contains(record_id)
    }

    pub fn just_saved_ids(&self) -> &HashSet<RecordId> {
        &self.just_saved
    }

    /// The value a cell currently shows: the pending edit if one exists
    /// (possibly cleared), otherwise the original fetched value.
    pub fn effective_value(&self, record_id: &str) -> Option<CellValue> {
        match self.pending.get(record_id) {
            Some(edit) => edit.as_cell(),
            None => self.originals.get(record_id).cloned().flatten(),
        }
    }

    /// Whether applying `proposed` would leave the pending state exactly
    /// as it is. The page uses this to swallow duplicate commit events
    /// from the DOM (a keydown commit followed by the blur-driven change
    /// event for the same value) so one user edit never logs twice.
    pub fn is_redundant(&self, record_id: &str, proposed: &EditValue) -> bool {
        match self.pending.get(record_id) {
            Some(current) => current == proposed,
            None => match self.originals.get(record_id) {
                Some(original) => proposed.matches_original(original.as_ref()),
                None => true,
            },
        }
    }

    /// Record an edit against an existing record. Edits equal to the
    /// baseline value remove the pending entry instead of storing a no-op;
    /// every call is logged to the undo stack regardless, so undo can
    /// restore the prior pending state exactly.
    pub fn apply_edit(&mut self, record_id: &str, proposed: EditValue) {
        let Some(original) = self.originals.get(record_id) else {
            // No record to target; nothing to update.
            return;
        };
        let before = self.pending.get(record_id).cloned();
        let after = if proposed.matches_original(original.as_ref()) {
            self.pending.remove(record_id);
            None
        } else {
            self.pending.insert(record_id.to_string(), proposed.clone());
            Some(proposed)
        };
        self.undo_stack.push(UndoAction {
            record_id: record_id.to_string(),
            before,
            after,
        });
    }

    /// Revert exactly the most recent edit. Returns false on an empty
    /// stack. Restores the recorded "before" state rather than
    /// recomputing, so chained edits and logged no-ops unwind exactly.
    pub fn undo(&mut self) -> bool {
        let Some(action) = self.undo_stack.pop() else {
            return false;
        };
        match action.before {
            Some(value) => {
                self.pending.insert(action.record_id, value);
            }
            None => {
                self.pending.remove(&action.record_id);
            }
        }
        true
    }

    /// Per-metric column aggregates over effective values.
    pub fn aggregates(&self) -> Vec<MetricAggregate> {
        aggregate_columns(&self.snapshot, &self.pending)
    }

    /// Claim the pending edits for a save. Returns `None` while another
    /// save is outstanding or when there is nothing to save; a second
    /// save request during flight is dropped, never interleaved.
    pub fn begin_save(&mut self) -> Option<Vec<BatchEntry>> {
        if self.saving || self.pending.is_empty() {
            return None;
        }
        self.saving = true;
        let mut batch: Vec<BatchEntry> = self
            .pending
            .iter()
            .map(|(record_id, value)| BatchEntry {
                record_id: record_id.clone(),
                value: value.clone(),
            })
            .collect();
        batch.sort_by(|a, b| a.record_id.cmp(&b.record_id));
        self.in_flight = batch.clone();
        Some(batch)
    }

    /// The claimed batch was applied. Exactly the claimed record ids are
    /// marked for the transient highlight window, their originals move to
    /// the values the server accepted, and their now-settled pending
    /// entries are consumed. An edit applied while the save was in flight
    /// stays pending; the undo history is cleared either way.
    pub fn complete_save(&mut self) {
        let claimed = std::mem::take(&mut self.in_flight);
        self.just_saved = claimed.iter().map(|e| e.record_id.clone()).collect();
        for entry in claimed {
            let new_original = entry.value.as_cell();
            if let Some(edit) = self.pending.get(&entry.record_id) {
                if edit.matches_original(new_original.as_ref()) {
                    self.pending.remove(&entry.record_id);
                }
            }
            self.originals.insert(entry.record_id, new_original);
        }
        self.undo_stack.clear();
        self.saving = false;
    }

    /// The batch was rejected. Unsaved work stays intact so the user can
    /// retry; only the in-flight claim resets.
    pub fn fail_save(&mut self) {
        self.in_flight.clear();
        self.saving = false;
    }

    pub fn clear_saved_highlight(&mut self) {
        self.just_saved.clear();
    }

    /// Discard all pending edits and undo history. No network call.
    pub fn cancel(&mut self) {
        self.pending.clear();
        self.undo_stack.clear();
    }

    /// Interpret raw cell input for a column kind. Blank input clears the
    /// value; unparsable numeric input also clears rather than erroring.
    pub fn parse_input(kind: MetricKind, raw: &str) -> EditValue {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return EditValue::Cleared;
        }
        match kind {
            MetricKind::Text => EditValue::Text(trimmed.to_string()),
            MetricKind::Integer => match trimmed.parse::<f64>() {
                Ok(n) if n.is_finite() => EditValue::Number(n.round()),
                _ => EditValue::Cleared,
            },
            MetricKind::Decimal => match trimmed.parse::<f64>() {
                Ok(n) if n.is_finite() => EditValue::Number(n),
                _ => EditValue::Cleared,
            },
            MetricKind::Percentage => {
                // Accept an optional trailing percent sign.
                let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
                match digits.parse::<f64>() {
                    Ok(n) if n.is_finite() => EditValue::Number(n),
                    _ => EditValue::Cleared,
                }
            }
        }
    }
}

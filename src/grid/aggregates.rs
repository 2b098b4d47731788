//! Column aggregates over effective cell values.
//!
//! Recomputed in full on every state change; pure in
//! `(snapshot, pending)` so the page can drive it from a derived signal.

use std::collections::HashMap;

use crate::types::{CellValue, EditValue, MetricKind, RecordId, Snapshot};

#[derive(Debug, Clone, PartialEq)]
pub struct MetricAggregate {
    pub metric_key: String,
    pub display_name: String,
    pub kind: MetricKind,
    pub total: f64,
    pub count: usize,
}

impl MetricAggregate {
    /// Sum for integer/decimal columns; percentage columns report the
    /// mean of included values instead. A column with no defined values
    /// reads as zero so the footer keeps a stable shape.
    pub fn value(&self) -> f64 {
        match self.kind {
            MetricKind::Percentage => {
                if self.count == 0 {
                    0.0
                } else {
                    self.total / self.count as f64
                }
            }
            _ => self.total,
        }
    }

    pub fn display(&self) -> String {
        match self.kind {
            MetricKind::Integer => format!("{}", self.value() as i64),
            MetricKind::Percentage => format!("{:.1}%", self.value()),
            _ => {
                let v = self.value();
                if v.fract() == 0.0 {
                    format!("{}", v as i64)
                } else {
                    format!("{:.2}", v)
                }
            }
        }
    }
}

/// One aggregate per numeric metric, in snapshot column order. Text
/// columns produce no entry. A cell contributes its pending value when an
/// edit exists (a cleared edit removes it from both sum and count),
/// otherwise its original value if defined.
pub fn aggregate_columns(
    snapshot: &Snapshot,
    pending: &HashMap<RecordId, EditValue>,
) -> Vec<MetricAggregate> {
    snapshot
        .metrics
        .iter()
        .filter(|m| m.kind.is_numeric())
        .map(|metric| {
            let mut total = 0.0;
            let mut count = 0usize;
            for agent in &snapshot.agents {
                let Some(record) = snapshot.record_at(&agent.id, &metric.key) else {
                    continue;
                };
                let effective = match pending.get(&record.id) {
                    Some(edit) => edit.as_cell(),
                    None => record.value.clone(),
                };
                if let Some(CellValue::Number(n)) = effective {
                    total += n;
                    count += 1;
                }
            }
            MetricAggregate {
                metric_key: metric.key.clone(),
                display_name: metric.display_name.clone(),
                kind: metric.kind,
                total,
                count,
            }
        })
        .collect()
}

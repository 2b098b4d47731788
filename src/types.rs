use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Metric definitions ──

/// Data kind of a metric, fixed when the metric is defined and never
/// changed by editing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Integer,
    Decimal,
    Percentage,
    Text,
}

impl MetricKind {
    /// Text-like kinds never participate in column aggregates.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, MetricKind::Text)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::Integer => "Integer",
            MetricKind::Decimal => "Decimal",
            MetricKind::Percentage => "Percentage",
            MetricKind::Text => "Text",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            MetricKind::Integer => "kind-badge kind-integer",
            MetricKind::Decimal => "kind-badge kind-decimal",
            MetricKind::Percentage => "kind-badge kind-percentage",
            MetricKind::Text => "kind-badge kind-text",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricDefinition {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub display_name: String,
    pub kind: MetricKind,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub sort_order: i32,
}

// ── Cell values ──

/// A persisted cell value. Exactly one variant is populated, consistent
/// with the metric's kind, so the "one slot" invariant holds by
/// construction rather than by two independently-optional fields.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }

    /// Render for the grid input, honoring the column kind.
    pub fn display(&self, kind: MetricKind) -> String {
        match self {
            CellValue::Text(t) => t.clone(),
            CellValue::Number(n) => match kind {
                MetricKind::Integer => format!("{}", *n as i64),
                MetricKind::Percentage => format!("{}", n),
                _ => format!("{}", n),
            },
        }
    }
}

/// A proposed replacement value for a record. Unparsable numeric input is
/// treated as "value cleared", not as an error.
#[derive(Debug, Clone, PartialEq)]
pub enum EditValue {
    Cleared,
    Number(f64),
    Text(String),
}

impl EditValue {
    /// The defined value this edit resolves to, if any.
    pub fn as_cell(&self) -> Option<CellValue> {
        match self {
            EditValue::Cleared => None,
            EditValue::Number(n) => Some(CellValue::Number(*n)),
            EditValue::Text(t) => Some(CellValue::Text(t.clone())),
        }
    }

    /// Whether applying this edit would be a no-op relative to the
    /// original fetched value.
    pub fn matches_original(&self, original: Option<&CellValue>) -> bool {
        match (self, original) {
            (EditValue::Cleared, None) => true,
            (EditValue::Number(a), Some(CellValue::Number(b))) => a == b,
            (EditValue::Text(a), Some(CellValue::Text(b))) => a == b,
            _ => false,
        }
    }
}

// ── Records & snapshot ──

pub type RecordId = String;

/// A persisted metric value for one (agent, metric) cell. Cells without a
/// record have nothing to target and are not editable.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRecord {
    pub id: RecordId,
    pub agent_id: String,
    pub metric_key: String,
    pub value: Option<CellValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AgentRow {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// The fetched contents of one (account, date, team-leader-filter)
/// selection: ordered metric columns, agent rows, and the value records
/// that exist for their intersections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub metrics: Vec<MetricDefinition>,
    pub agents: Vec<AgentRow>,
    pub records: Vec<ValueRecord>,
}

impl Snapshot {
    pub fn record_at(&self, agent_id: &str, metric_key: &str) -> Option<&ValueRecord> {
        self.records
            .iter()
            .find(|r| r.agent_id == agent_id && r.metric_key == metric_key)
    }

    pub fn rows(&self) -> usize {
        self.agents.len()
    }

    pub fn cols(&self) -> usize {
        self.metrics.len()
    }
}

// ── Selection ──

/// The active (account, date, team-leader-filter) triple. Changing any
/// part of it starts a fresh grid session.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub account_id: String,
    pub date: NaiveDate,
    pub team_leader_id: Option<String>,
}

// ── Admin entities ──

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Account {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TeamLeader {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub account_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub team_leader_id: Option<String>,
}

// ── Audit trail ──

/// One prior update, shown read-only in the audit panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub recorded_at: String,
    #[serde(default)]
    pub actor: String,
    #[serde(default)]
    pub agent_name: String,
    #[serde(default)]
    pub metric_key: String,
    #[serde(default)]
    pub before: String,
    #[serde(default)]
    pub after: String,
    #[serde(default)]
    pub bulk: bool,
}

// ── Submission tracking ──

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionStatus {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub submitted: bool,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub filled: u32,
    #[serde(default)]
    pub expected: u32,
}

impl SubmissionStatus {
    pub fn status_class(&self) -> &'static str {
        if self.submitted {
            "submission-dot dot-submitted"
        } else if self.filled > 0 {
            "submission-dot dot-partial"
        } else {
            "submission-dot dot-missing"
        }
    }
}

// ── Demo data constructors ──

pub fn demo_accounts() -> Vec<Account> {
    vec![
        Account {
            id: "acct-001".into(),
            name: "Northwind Solar".into(),
            timezone: "America/Chicago".into(),
            active: true,
        },
        Account {
            id: "acct-002".into(),
            name: "Harbor Lending".into(),
            timezone: "America/New_York".into(),
            active: true,
        },
        Account {
            id: "acct-003".into(),
            name: "Cedar Health".into(),
            timezone: "America/Denver".into(),
            active: false,
        },
    ]
}

pub fn demo_team_leaders() -> Vec<TeamLeader> {
    vec![
        TeamLeader {
            id: "tl-001".into(),
            name: "Dana Reeves".into(),
            email: "dana@example.com".into(),
            account_ids: vec!["acct-001".into(), "acct-002".into()],
        },
        TeamLeader {
            id: "tl-002".into(),
            name: "Marcus Bell".into(),
            email: "marcus@example.com".into(),
            account_ids: vec!["acct-003".into()],
        },
    ]
}

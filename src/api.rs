use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::grid::BatchEntry;
use crate::types::{
    Account, Agent, AgentRow, AuditEntry, CellValue, EditValue, MetricDefinition, Snapshot,
    SubmissionStatus, TeamLeader, ValueRecord,
};

const API_BASE: &str = "http://localhost:8787";

// ── Generic fetch helpers ──

async fn send(request: Request) -> Result<Response, String> {
    let window = web_sys::window().ok_or("no global window")?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("{:?}", e))?;
    let resp: Response = resp_value.dyn_into().map_err(|e| format!("{:?}", e))?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    Ok(resp)
}

async fn read_json<T: for<'de> Deserialize<'de>>(resp: Response) -> Result<T, String> {
    let json = JsFuture::from(resp.json().map_err(|e| format!("{:?}", e))?)
        .await
        .map_err(|e| format!("{:?}", e))?;
    serde_wasm_bindgen::from_value(json).map_err(|e| format!("{:?}", e))
}

async fn fetch_json<T: for<'de> Deserialize<'de>>(url: &str) -> Result<T, String> {
    let opts = RequestInit::new();
    opts.set_method("GET");

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| format!("{:?}", e))?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(|e| format!("{:?}", e))?;

    read_json(send(request).await?).await
}

async fn fetch_text(url: &str) -> Result<String, String> {
    let opts = RequestInit::new();
    opts.set_method("GET");

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| format!("{:?}", e))?;
    let resp = send(request).await?;
    let text = JsFuture::from(resp.text().map_err(|e| format!("{:?}", e))?)
        .await
        .map_err(|e| format!("{:?}", e))?;
    text.as_string().ok_or_else(|| "non-text response".to_string())
}

fn body_request(method: &str, url: &str, body_str: &str) -> Result<Request, String> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_body(&JsValue::from_str(body_str));

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| format!("{:?}", e))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| format!("{:?}", e))?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(|e| format!("{:?}", e))?;
    Ok(request)
}

async fn post_json<T: Serialize, R: for<'de> Deserialize<'de>>(
    url: &str,
    body: &T,
) -> Result<R, String> {
    let body_str = serde_json::to_string(body).map_err(|e| format!("{:?}", e))?;
    read_json(send(body_request("POST", url, &body_str)?).await?).await
}

async fn put_json<T: Serialize, R: for<'de> Deserialize<'de>>(
    url: &str,
    body: &T,
) -> Result<R, String> {
    let body_str = serde_json::to_string(body).map_err(|e| format!("{:?}", e))?;
    read_json(send(body_request("PUT", url, &body_str)?).await?).await
}

/// PUT where only the status matters; the body of the response is ignored.
async fn put_json_unit<T: Serialize>(url: &str, body: &T) -> Result<(), String> {
    let body_str = serde_json::to_string(body).map_err(|e| format!("{:?}", e))?;
    send(body_request("PUT", url, &body_str)?).await.map(|_| ())
}

async fn delete_request(url: &str) -> Result<(), String> {
    let opts = RequestInit::new();
    opts.set_method("DELETE");

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| format!("{:?}", e))?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(|e| format!("{:?}", e))?;

    send(request).await.map(|_| ())
}

// ── Snapshot wire types ──

/// A value record as the backend sends it: two optional slots, of which
/// exactly one is populated. Collapsed into the tagged `CellValue` at
/// this boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiValueRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub agent_id: String,
    #[serde(default)]
    pub metric_key: String,
    #[serde(default)]
    pub numeric_value: Option<f64>,
    #[serde(default)]
    pub text_value: Option<String>,
}

impl ApiValueRecord {
    pub fn into_record(self) -> ValueRecord {
        let value = match (self.numeric_value, self.text_value) {
            (Some(n), _) => Some(CellValue::Number(n)),
            (None, Some(t)) => Some(CellValue::Text(t)),
            (None, None) => None,
        };
        ValueRecord {
            id: self.id,
            agent_id: self.agent_id,
            metric_key: self.metric_key,
            value,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSnapshot {
    #[serde(default)]
    pub metrics: Vec<MetricDefinition>,
    #[serde(default)]
    pub agents: Vec<AgentRow>,
    #[serde(default)]
    pub records: Vec<ApiValueRecord>,
}

impl ApiSnapshot {
    pub fn into_snapshot(self) -> Snapshot {
        Snapshot {
            metrics: self.metrics,
            agents: self.agents,
            records: self
                .records
                .into_iter()
                .map(ApiValueRecord::into_record)
                .collect(),
        }
    }
}

// ── Batch wire types ──

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiBatchEntry {
    pub record_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_value: Option<String>,
}

impl From<&BatchEntry> for ApiBatchEntry {
    fn from(entry: &BatchEntry) -> Self {
        let (numeric_value, text_value) = match &entry.value {
            EditValue::Number(n) => (Some(*n), None),
            EditValue::Text(t) => (None, Some(t.clone())),
            EditValue::Cleared => (None, None),
        };
        ApiBatchEntry {
            record_id: entry.record_id.clone(),
            numeric_value,
            text_value,
        }
    }
}

#[derive(Debug, Serialize)]
struct BatchRequest<'a> {
    entries: &'a [ApiBatchEntry],
}

// ── Request body types ──

#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountPayload {
    pub name: String,
    pub timezone: String,
    pub active: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamLeaderPayload {
    pub name: String,
    pub email: String,
    pub account_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AgentPayload {
    pub name: String,
    pub email: String,
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_leader_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricPayload {
    pub key: String,
    pub display_name: String,
    pub kind: crate::types::MetricKind,
    pub emoji: String,
    pub required: bool,
    pub sort_order: i32,
}

// ── Accounts ──

pub async fn fetch_accounts() -> Result<Vec<Account>, String> {
    fetch_json(&format!("{API_BASE}/api/accounts")).await
}

pub async fn create_account(payload: &AccountPayload) -> Result<Account, String> {
    post_json(&format!("{API_BASE}/api/accounts"), payload).await
}

pub async fn update_account(id: &str, payload: &AccountPayload) -> Result<Account, String> {
    put_json(&format!("{API_BASE}/api/accounts/{id}"), payload).await
}

pub async fn delete_account(id: &str) -> Result<(), String> {
    delete_request(&format!("{API_BASE}/api/accounts/{id}")).await
}

// ── Team leaders ──

pub async fn fetch_team_leaders() -> Result<Vec<TeamLeader>, String> {
    fetch_json(&format!("{API_BASE}/api/team-leaders")).await
}

pub async fn create_team_leader(payload: &TeamLeaderPayload) -> Result<TeamLeader, String> {
    post_json(&format!("{API_BASE}/api/team-leaders"), payload).await
}

pub async fn update_team_leader(
    id: &str,
    payload: &TeamLeaderPayload,
) -> Result<TeamLeader, String> {
    put_json(&format!("{API_BASE}/api/team-leaders/{id}"), payload).await
}

pub async fn delete_team_leader(id: &str) -> Result<(), String> {
    delete_request(&format!("{API_BASE}/api/team-leaders/{id}")).await
}

// ── Agents ──

pub async fn fetch_agents(account_id: Option<&str>) -> Result<Vec<Agent>, String> {
    match account_id {
        Some(id) => fetch_json(&format!("{API_BASE}/api/agents?account={id}")).await,
        None => fetch_json(&format!("{API_BASE}/api/agents")).await,
    }
}

pub async fn create_agent(payload: &AgentPayload) -> Result<Agent, String> {
    post_json(&format!("{API_BASE}/api/agents"), payload).await
}

pub async fn update_agent(id: &str, payload: &AgentPayload) -> Result<Agent, String> {
    put_json(&format!("{API_BASE}/api/agents/{id}"), payload).await
}

pub async fn delete_agent(id: &str) -> Result<(), String> {
    delete_request(&format!("{API_BASE}/api/agents/{id}")).await
}

// ── Metric definitions ──

pub async fn fetch_metrics() -> Result<Vec<MetricDefinition>, String> {
    fetch_json(&format!("{API_BASE}/api/metrics")).await
}

pub async fn create_metric(payload: &MetricPayload) -> Result<MetricDefinition, String> {
    post_json(&format!("{API_BASE}/api/metrics"), payload).await
}

pub async fn update_metric(key: &str, payload: &MetricPayload) -> Result<MetricDefinition, String> {
    put_json(&format!("{API_BASE}/api/metrics/{key}"), payload).await
}

pub async fn delete_metric(key: &str) -> Result<(), String> {
    delete_request(&format!("{API_BASE}/api/metrics/{key}")).await
}

// ── Daily update grid ──

pub async fn fetch_snapshot(
    account_id: &str,
    date: NaiveDate,
    team_leader_id: Option<&str>,
) -> Result<ApiSnapshot, String> {
    let day = date.format("%Y-%m-%d");
    let url = match team_leader_id {
        Some(tl) => format!("{API_BASE}/api/updates/{account_id}/{day}?team_leader={tl}"),
        None => format!("{API_BASE}/api/updates/{account_id}/{day}"),
    };
    fetch_json(&url).await
}

/// Apply a batch of record updates. All-or-nothing from the caller's
/// perspective: any non-success response is a total failure and the
/// caller keeps its pending edits.
pub async fn apply_batch(entries: &[ApiBatchEntry]) -> Result<(), String> {
    put_json_unit(
        &format!("{API_BASE}/api/updates/batch"),
        &BatchRequest { entries },
    )
    .await
}

pub async fn fetch_audit_log(date: NaiveDate, account_id: &str) -> Result<Vec<AuditEntry>, String> {
    let day = date.format("%Y-%m-%d");
    fetch_json(&format!("{API_BASE}/api/audit/{account_id}/{day}")).await
}

// ── Submission tracking ──

pub async fn fetch_submissions(date: NaiveDate) -> Result<Vec<SubmissionStatus>, String> {
    let day = date.format("%Y-%m-%d");
    fetch_json(&format!("{API_BASE}/api/submissions/{day}")).await
}

// ── Exports ──

/// URL of the CSV export for an account over an inclusive date range.
pub fn export_csv_url(account_id: &str, from: NaiveDate, to: NaiveDate) -> String {
    format!(
        "{API_BASE}/api/exports/{account_id}.csv?from={}&to={}",
        from.format("%Y-%m-%d"),
        to.format("%Y-%m-%d"),
    )
}

pub async fn fetch_export_csv(
    account_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<String, String> {
    fetch_text(&export_csv_url(account_id, from, to)).await
}

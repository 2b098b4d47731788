use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::banner::{EmptyState, ErrorBanner};
use crate::components::spinner::Spinner;
use crate::state::use_app_state;
use crate::types::SubmissionStatus;

/// Per-date submission tracking: which accounts have reported today, and
/// how complete each submission is.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let app = use_app_state();
    let report_date = app.report_date;
    let set_report_date = app.set_report_date;
    let set_selected_account = app.set_selected_account;
    let set_current_tab = use_context::<WriteSignal<usize>>();

    let (rows, set_rows) = signal(Vec::<SubmissionStatus>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let do_refresh = move || {
        set_loading.set(true);
        set_error_msg.set(None);
        let date = report_date.get_untracked();
        spawn_local(async move {
            match api::fetch_submissions(date).await {
                Ok(data) => set_rows.set(data),
                Err(e) => set_error_msg.set(Some(format!("Failed to fetch submissions: {e}"))),
            }
            set_loading.set(false);
        });
    };

    // Refetch whenever the report date changes (including the first run).
    Effect::new(move |_| {
        let _ = report_date.get();
        do_refresh();
    });

    let total = move || rows.get().len();
    let submitted = move || rows.get().iter().filter(|r| r.submitted).count();
    let missing = move || total().saturating_sub(submitted());
    let completion_pct = move || {
        let t = total();
        if t > 0 {
            (submitted() as f64 / t as f64 * 100.0) as u64
        } else {
            0
        }
    };

    view! {
        <div class="page-header">
            <h2>"Dashboard"</h2>
            <div class="page-header-actions">
                <input
                    type="date"
                    class="date-input"
                    prop:value=move || report_date.get().format("%Y-%m-%d").to_string()
                    on:change=move |ev| {
                        if let Ok(date) = event_target_value(&ev).parse() {
                            set_report_date.set(date);
                        }
                    }
                />
                <button class="refresh-btn dashboard-refresh-btn" on:click=move |_| do_refresh()>
                    "\u{21BB} Refresh"
                </button>
            </div>
        </div>

        {move || error_msg.get().map(|msg| view! { <ErrorBanner message=msg /> })}

        {move || loading.get().then(|| view! {
            <div class="dashboard-loading"><Spinner size="sm" label="Loading submissions..." /></div>
        })}

        <div class="kpi-grid">
            <div class="kpi-card">
                <div class="value">{move || total()}</div>
                <div class="label">"Accounts Reporting"</div>
            </div>
            <div class="kpi-card">
                <div class="value">{move || submitted()}</div>
                <div class="label">"Submitted"</div>
            </div>
            <div class="kpi-card">
                <div class="value">{move || missing()}</div>
                <div class="label">"Missing"</div>
            </div>
            <div class="kpi-card">
                <div class="value">{move || format!("{}%", completion_pct())}</div>
                <div class="label">"Completion"</div>
            </div>
        </div>

        <div class="section">
            <h3>"Submissions"</h3>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Status"</th>
                        <th>"Account"</th>
                        <th>"Filled"</th>
                        <th>"Submitted At"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || rows.get().into_iter().map(|row| {
                        let dot = row.status_class();
                        let account_id = row.account_id.clone();
                        let open_grid = move |_| {
                            set_selected_account.set(Some(account_id.clone()));
                            if let Some(set_tab) = set_current_tab {
                                set_tab.set(1);
                            }
                        };
                        view! {
                            <tr>
                                <td><span class={dot}></span></td>
                                <td>{row.account_name}</td>
                                <td>{format!("{}/{}", row.filled, row.expected)}</td>
                                <td>{row.submitted_at.unwrap_or_else(|| "\u{2014}".into())}</td>
                                <td>
                                    <button class="table-action-btn" on:click=open_grid>
                                        "Open Grid"
                                    </button>
                                </td>
                            </tr>
                        }
                    }).collect::<Vec<_>>()}
                </tbody>
            </table>

            {move || (!loading.get() && rows.get().is_empty() && error_msg.get().is_none()).then(|| view! {
                <EmptyState
                    icon="\u{1F4ED}"
                    text="No submissions for this date"
                    hint="Accounts appear here once a daily update exists"
                />
            })}
        </div>
    }
}

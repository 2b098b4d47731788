use std::collections::HashMap;

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::KeyboardEvent;

use crate::api;
use crate::components::banner::{EmptyState, ErrorBanner};
use crate::components::spinner::Spinner;
use crate::components::toast::{push_toast, Toast};
use crate::grid::{step, GridPos, GridSession, NavKey};
use crate::state::use_app_state;
use crate::types::AuditEntry;

/// Move browser focus to the input at a grid position.
fn focus_cell(pos: GridPos) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(el) = document.get_element_by_id(&format!("cell-{}-{}", pos.row, pos.col)) {
        if let Ok(el) = el.dyn_into::<web_sys::HtmlElement>() {
            let _ = el.focus();
        }
    }
}

/// The agent x metric editing grid for one (account, date, team leader)
/// selection. All edit state lives in a `GridSession`; this component
/// wires it to inputs, keyboard traversal, and the batch save endpoint.
#[component]
pub fn DailyUpdatePage() -> impl IntoView {
    let app = use_app_state();
    let accounts = app.accounts;
    let team_leaders = app.team_leaders;
    let selected_account = app.selected_account;
    let set_selected_account = app.set_selected_account;
    let report_date = app.report_date;
    let set_report_date = app.set_report_date;
    let leader_filter = app.leader_filter;
    let set_leader_filter = app.set_leader_filter;
    let set_toasts = expect_context::<WriteSignal<Vec<Toast>>>();

    let session = RwSignal::new(Option::<GridSession>::None);
    let (loading, set_loading) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    // Monotonic fetch counter. A response is applied only if no newer
    // fetch started while it was in flight, so a slow response for an old
    // selection can never clobber the current grid.
    let fetch_seq = RwSignal::new(0u64);

    let (audit_open, set_audit_open) = signal(false);
    let (audit, set_audit) = signal(Vec::<AuditEntry>::new());

    // `fresh` starts a session from scratch (selection changed, pending
    // edits discarded by contract); otherwise the existing session is
    // rebaselined in place so unsaved edits and the just-saved highlight
    // survive the refresh.
    let do_refresh = move |fresh: bool| {
        let Some(account_id) = selected_account.get_untracked() else {
            session.set(None);
            return;
        };
        let date = report_date.get_untracked();
        let leader = leader_filter.get_untracked();
        set_loading.set(true);
        set_error_msg.set(None);
        let seq = fetch_seq.get_untracked() + 1;
        fetch_seq.set(seq);
        spawn_local(async move {
            let result = api::fetch_snapshot(&account_id, date, leader.as_deref()).await;
            if fetch_seq.get_untracked() != seq {
                web_sys::console::log_1(&JsValue::from_str("discarding stale grid response"));
                return;
            }
            match result {
                Ok(api_snap) => {
                    let snapshot = api_snap.into_snapshot();
                    session.update(|slot| match slot {
                        Some(g) if !fresh => g.rebaseline(snapshot),
                        slot => *slot = Some(GridSession::new(snapshot)),
                    });
                }
                Err(e) => set_error_msg.set(Some(format!("Failed to fetch grid: {e}"))),
            }
            set_loading.set(false);
        });
    };

    // Any change to the selection triple starts a fresh session.
    Effect::new(move |_| {
        let _ = selected_account.get();
        let _ = report_date.get();
        let _ = leader_filter.get();
        do_refresh(true);
    });

    let do_save = move |_| {
        let batch = session
            .try_update(|s| s.as_mut().and_then(|g| g.begin_save()))
            .flatten();
        let Some(batch) = batch else {
            return;
        };
        let entries: Vec<api::ApiBatchEntry> = batch.iter().map(api::ApiBatchEntry::from).collect();
        spawn_local(async move {
            match api::apply_batch(&entries).await {
                Ok(()) => {
                    session.update(|s| {
                        if let Some(g) = s {
                            g.complete_save();
                        }
                    });
                    push_toast(
                        set_toasts,
                        "Saved",
                        &format!("{} value(s) updated", entries.len()),
                        "success",
                    );
                    // Rebaseline right away (edits typed during the save
                    // survive the in-place refresh); the highlight gets
                    // its full window regardless.
                    do_refresh(false);
                    gloo_timers::future::TimeoutFuture::new(2_000).await;
                    session.update(|s| {
                        if let Some(g) = s {
                            g.clear_saved_highlight();
                        }
                    });
                }
                Err(e) => {
                    session.update(|s| {
                        if let Some(g) = s {
                            g.fail_save();
                        }
                    });
                    push_toast(set_toasts, "Save failed", &e, "error");
                }
            }
        });
    };

    let do_undo = move |_| {
        session.update(|s| {
            if let Some(g) = s {
                g.undo();
            }
        });
    };

    let do_cancel = move |_| {
        session.update(|s| {
            if let Some(g) = s {
                g.cancel();
            }
        });
    };

    let toggle_audit = move |_| {
        let open = !audit_open.get();
        set_audit_open.set(open);
        if !open {
            return;
        }
        let Some(account_id) = selected_account.get() else {
            return;
        };
        let date = report_date.get();
        spawn_local(async move {
            match api::fetch_audit_log(date, &account_id).await {
                Ok(data) => set_audit.set(data),
                Err(e) => set_error_msg.set(Some(format!("Failed to fetch audit log: {e}"))),
            }
        });
    };

    let dirty = move || session.with(|s| s.as_ref().is_some_and(|g| g.is_dirty()));
    let saving = move || session.with(|s| s.as_ref().is_some_and(|g| g.is_saving()));
    let can_undo = move || session.with(|s| s.as_ref().is_some_and(|g| g.can_undo()));
    let pending_count = move || session.with(|s| s.as_ref().map_or(0, |g| g.pending_count()));

    view! {
        <div class="page-header">
            <h2>"Daily Update"</h2>
            <div class="page-header-actions">
                <select
                    class="filter-select"
                    on:change=move |ev| {
                        let v = event_target_value(&ev);
                        set_selected_account.set((!v.is_empty()).then_some(v));
                    }
                >
                    <option value="">"Select account..."</option>
                    {move || accounts.get().into_iter().map(|account| {
                        let selected = selected_account.get() == Some(account.id.clone());
                        view! {
                            <option value={account.id} selected=selected>{account.name}</option>
                        }
                    }).collect::<Vec<_>>()}
                </select>
                <select
                    class="filter-select"
                    on:change=move |ev| {
                        let v = event_target_value(&ev);
                        set_leader_filter.set((!v.is_empty()).then_some(v));
                    }
                >
                    <option value="">"All team leaders"</option>
                    {move || {
                        let account = selected_account.get();
                        team_leaders.get().into_iter()
                            .filter(|l| match &account {
                                Some(id) => l.account_ids.contains(id),
                                None => true,
                            })
                            .map(|leader| {
                                let selected = leader_filter.get() == Some(leader.id.clone());
                                view! {
                                    <option value={leader.id} selected=selected>{leader.name}</option>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </select>
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
                <button class="refresh-btn" on:click=move |_| do_refresh(false)>"\u{21BB} Refresh"</button>
            </div>
        </div>

        {move || error_msg.get().map(|msg| view! { <ErrorBanner message=msg /> })}

        {move || (selected_account.get().is_none()).then(|| view! {
            <EmptyState
                icon="\u{1F4C5}"
                text="Select an account"
                hint="Pick an account and date to load its daily update grid"
            />
        })}

        {move || loading.get().then(|| view! {
            <div class="dashboard-loading"><Spinner size="sm" label="Loading grid..." /></div>
        })}

        {move || session.with(|maybe| maybe.as_ref().map(|sess| {
            let snap = sess.snapshot().clone();
            let rows = snap.rows();
            let cols = snap.cols();
            let aggregates: HashMap<String, String> = sess
                .aggregates()
                .into_iter()
                .map(|a| (a.metric_key.clone(), a.display()))
                .collect();

            let header = snap.metrics.iter().map(|metric| {
                let title = if metric.emoji.is_empty() {
                    metric.display_name.clone()
                } else {
                    format!("{} {}", metric.emoji, metric.display_name)
                };
                view! { <th class="grid-metric-header">{title}</th> }
            }).collect::<Vec<_>>();

            let body = snap.agents.iter().enumerate().map(|(row, agent)| {
                let cells = snap.metrics.iter().enumerate().map(|(col, metric)| {
                    let Some(record) = snap.record_at(&agent.id, &metric.key) else {
                        // No record backing this cell; nothing to edit.
                        return view! { <td class="grid-cell cell-missing">"\u{2014}"</td> }.into_any();
                    };
                    let record_id = record.id.clone();
                    let kind = metric.kind;
                    let dirty_cell = sess.pending_value(&record_id).is_some();
                    let saved_cell = sess.was_just_saved(&record_id);
                    let display = sess
                        .effective_value(&record_id)
                        .map(|v| v.display(kind))
                        .unwrap_or_default();

                    let commit_id = record_id.clone();
                    let nav_id = record_id.clone();
                    let shown = display.clone();
                    let cell_class = format!(
                        "grid-cell{}{}",
                        if dirty_cell { " cell-dirty" } else { "" },
                        if saved_cell { " cell-saved" } else { "" },
                    );

                    view! {
                        <td class={cell_class}>
                            <input
                                type="text"
                                class="grid-input"
                                id=format!("cell-{row}-{col}")
                                prop:value=display
                                on:change=move |ev| {
                                    let raw = event_target_value(&ev);
                                    let proposed = GridSession::parse_input(kind, &raw);
                                    session.update(|s| {
                                        if let Some(g) = s {
                                            // The keydown path may already
                                            // have committed this value;
                                            // don't log the echo.
                                            if !g.is_redundant(&commit_id, &proposed) {
                                                g.apply_edit(&commit_id, proposed);
                                            }
                                        }
                                    });
                                }
                                on:keydown=move |ev: KeyboardEvent| {
                                    if (ev.ctrl_key() || ev.meta_key()) && ev.key() == "z" {
                                        ev.prevent_default();
                                        session.update(|s| {
                                            if let Some(g) = s {
                                                g.undo();
                                            }
                                        });
                                        return;
                                    }
                                    let nav = match ev.key().as_str() {
                                        "Enter" => Some(if ev.shift_key() { NavKey::Retreat } else { NavKey::Advance }),
                                        "ArrowUp" => Some(NavKey::Up),
                                        "ArrowDown" => Some(NavKey::Down),
                                        "ArrowLeft" => Some(NavKey::Left),
                                        "ArrowRight" => Some(NavKey::Right),
                                        _ => None,
                                    };
                                    let Some(nav) = nav else { return; };
                                    ev.prevent_default();
                                    // Commit in-progress input before
                                    // moving. The session update re-renders
                                    // the table, so focus is placed on the
                                    // destination cell one tick later.
                                    let raw = event_target_value(&ev);
                                    if raw != shown {
                                        session.update(|s| {
                                            if let Some(g) = s {
                                                g.apply_edit(&nav_id, GridSession::parse_input(kind, &raw));
                                            }
                                        });
                                    }
                                    let next = step(GridPos::new(row, col), nav, rows, cols);
                                    spawn_local(async move {
                                        gloo_timers::future::TimeoutFuture::new(0).await;
                                        focus_cell(next);
                                    });
                                }
                            />
                        </td>
                    }.into_any()
                }).collect::<Vec<_>>();
                view! {
                    <tr>
                        <td class="grid-agent-name">{agent.name.clone()}</td>
                        {cells}
                    </tr>
                }
            }).collect::<Vec<_>>();

            let footer = snap.metrics.iter().map(|metric| {
                let text = aggregates
                    .get(&metric.key)
                    .cloned()
                    .unwrap_or_else(|| "\u{2014}".to_string());
                view! { <td class="grid-aggregate">{text}</td> }
            }).collect::<Vec<_>>();

            let empty = snap.agents.is_empty();

            view! {
                <div class="grid-toolbar">
                    <span class="grid-pending">
                        {move || {
                            let n = pending_count();
                            if n == 0 { "All changes saved".to_string() } else { format!("{n} unsaved") }
                        }}
                    </span>
                    <button
                        class="primary-btn"
                        disabled=move || !dirty() || saving()
                        on:click=do_save
                    >
                        {move || if saving() { "Saving..." } else { "Save" }}
                    </button>
                    <button class="secondary-btn" disabled=move || !can_undo() on:click=do_undo>
                        "Undo"
                    </button>
                    <button class="secondary-btn" disabled=move || !dirty() on:click=do_cancel>
                        "Cancel"
                    </button>
                    <button
                        class="secondary-btn"
                        class:active=move || audit_open.get()
                        on:click=toggle_audit
                    >
                        "History"
                    </button>
                </div>

                {empty.then(|| view! {
                    <EmptyState
                        icon="\u{1F4ED}"
                        text="No agents in this view"
                        hint="Add agents to the account, or clear the team leader filter"
                    />
                })}

                {(!empty).then(move || view! {
                    <table class="data-table grid-table">
                        <thead>
                            <tr>
                                <th>"Agent"</th>
                                {header}
                            </tr>
                        </thead>
                        <tbody>
                            {body}
                        </tbody>
                        <tfoot>
                            <tr>
                                <td class="grid-aggregate-label">"Totals"</td>
                                {footer}
                            </tr>
                        </tfoot>
                    </table>
                })}
            }
        }))}

        {move || audit_open.get().then(|| view! {
            <div class="section audit-panel">
                <h3>"Change History"</h3>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"When"</th>
                            <th>"Who"</th>
                            <th>"Agent"</th>
                            <th>"Metric"</th>
                            <th>"Before"</th>
                            <th>"After"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || audit.get().into_iter().map(|entry| {
                            view! {
                                <tr>
                                    <td>{entry.recorded_at}</td>
                                    <td>{entry.actor}</td>
                                    <td>{entry.agent_name}</td>
                                    <td><code>{entry.metric_key}</code></td>
                                    <td>{entry.before}</td>
                                    <td>{entry.after}</td>
                                </tr>
                            }
                        }).collect::<Vec<_>>()}
                    </tbody>
                </table>
                {move || audit.get().is_empty().then(|| view! {
                    <EmptyState icon="\u{1F4DC}" text="No recorded changes for this date" hint="" />
                })}
            </div>
        })}
    }
}

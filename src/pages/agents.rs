use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::banner::{EmptyState, ErrorBanner};
use crate::state::use_app_state;
use crate::types::Agent;

#[component]
pub fn AgentsPage() -> impl IntoView {
    let app = use_app_state();
    let accounts = app.accounts;
    let team_leaders = app.team_leaders;

    let (agents, set_agents) = signal(Vec::<Agent>::new());
    let (account_filter, set_account_filter) = signal(Option::<String>::None);
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let (editing, set_editing) = signal(Option::<String>::None);
    let (form_open, set_form_open) = signal(false);
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (account_id, set_account_id) = signal(String::new());
    let (leader_id, set_leader_id) = signal(String::new());
    let (saving, set_saving) = signal(false);

    let do_refresh = move || {
        set_loading.set(true);
        set_error_msg.set(None);
        let filter = account_filter.get_untracked();
        spawn_local(async move {
            match api::fetch_agents(filter.as_deref()).await {
                Ok(data) => set_agents.set(data),
                Err(e) => set_error_msg.set(Some(format!("Failed to fetch agents: {e}"))),
            }
            set_loading.set(false);
        });
    };

    // Refetch whenever the account filter changes (including first run).
    Effect::new(move |_| {
        let _ = account_filter.get();
        do_refresh();
    });

    let open_create = move |_| {
        set_editing.set(None);
        set_name.set(String::new());
        set_email.set(String::new());
        set_account_id.set(
            account_filter
                .get()
                .or_else(|| accounts.get().first().map(|a| a.id.clone()))
                .unwrap_or_default(),
        );
        set_leader_id.set(String::new());
        set_form_open.set(true);
    };

    let open_edit = move |agent: Agent| {
        set_editing.set(Some(agent.id));
        set_name.set(agent.name);
        set_email.set(agent.email);
        set_account_id.set(agent.account_id);
        set_leader_id.set(agent.team_leader_id.unwrap_or_default());
        set_form_open.set(true);
    };

    let submit = move |_| {
        if saving.get() || name.get().trim().is_empty() || account_id.get().is_empty() {
            return;
        }
        set_saving.set(true);
        let leader = leader_id.get();
        let payload = api::AgentPayload {
            name: name.get().trim().to_string(),
            email: email.get().trim().to_string(),
            account_id: account_id.get(),
            team_leader_id: (!leader.is_empty()).then_some(leader),
        };
        let target = editing.get();
        spawn_local(async move {
            let result = match &target {
                Some(id) => api::update_agent(id, &payload).await.map(|_| ()),
                None => api::create_agent(&payload).await.map(|_| ()),
            };
            match result {
                Ok(()) => {
                    set_form_open.set(false);
                    do_refresh();
                }
                Err(e) => set_error_msg.set(Some(format!("Failed to save agent: {e}"))),
            }
            set_saving.set(false);
        });
    };

    let delete = move |id: String| {
        spawn_local(async move {
            match api::delete_agent(&id).await {
                Ok(()) => do_refresh(),
                Err(e) => set_error_msg.set(Some(format!("Failed to delete agent: {e}"))),
            }
        });
    };

    let account_name = move |id: &str| -> String {
        accounts
            .get()
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.name.clone())
            .unwrap_or_else(|| id.to_string())
    };

    let leader_name = move |id: &Option<String>| -> String {
        match id {
            Some(id) => team_leaders
                .get()
                .iter()
                .find(|l| l.id == *id)
                .map(|l| l.name.clone())
                .unwrap_or_else(|| id.clone()),
            None => "\u{2014}".into(),
        }
    };

    view! {
        <div class="page-header">
            <h2>"Agents"</h2>
            <div class="page-header-actions">
                <select
                    class="filter-select"
                    on:change=move |ev| {
                        let v = event_target_value(&ev);
                        set_account_filter.set((!v.is_empty()).then_some(v));
                    }
                >
                    <option value="">"All accounts"</option>
                    {move || accounts.get().into_iter().map(|account| {
                        let selected = account_filter.get() == Some(account.id.clone());
                        view! {
                            <option value={account.id} selected=selected>{account.name}</option>
                        }
                    }).collect::<Vec<_>>()}
                </select>
                <button class="primary-btn" on:click=open_create>"+ New Agent"</button>
                <button class="refresh-btn" on:click=move |_| do_refresh()>"\u{21BB} Refresh"</button>
            </div>
        </div>

        {move || error_msg.get().map(|msg| view! { <ErrorBanner message=msg /> })}

        {move || form_open.get().then(|| view! {
            <div class="edit-form">
                <h3>{move || if editing.get().is_some() { "Edit Agent" } else { "New Agent" }}</h3>
                <div class="form-row">
                    <label>"Name"</label>
                    <input
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-row">
                    <label>"Email"</label>
                    <input
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-row">
                    <label>"Account"</label>
                    <select on:change=move |ev| set_account_id.set(event_target_value(&ev))>
                        {move || accounts.get().into_iter().map(|account| {
                            let selected = account_id.get() == account.id;
                            view! {
                                <option value={account.id} selected=selected>{account.name}</option>
                            }
                        }).collect::<Vec<_>>()}
                    </select>
                </div>
                <div class="form-row">
                    <label>"Team Leader"</label>
                    <select on:change=move |ev| set_leader_id.set(event_target_value(&ev))>
                        <option value="">"Unassigned"</option>
                        {move || team_leaders.get().into_iter().map(|leader| {
                            let selected = leader_id.get() == leader.id;
                            view! {
                                <option value={leader.id} selected=selected>{leader.name}</option>
                            }
                        }).collect::<Vec<_>>()}
                    </select>
                </div>
                <div class="form-actions">
                    <button class="primary-btn" disabled=move || saving.get() on:click=submit>
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </button>
                    <button class="secondary-btn" on:click=move |_| set_form_open.set(false)>
                        "Cancel"
                    </button>
                </div>
            </div>
        })}

        {move || loading.get().then(|| view! {
            <div class="dashboard-loading">"Loading agents..."</div>
        })}

        <table class="data-table">
            <thead>
                <tr>
                    <th>"Name"</th>
                    <th>"Email"</th>
                    <th>"Account"</th>
                    <th>"Team Leader"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                {move || agents.get().into_iter().map(|agent| {
                    let edit_target = agent.clone();
                    let delete_id = agent.id.clone();
                    let account_label = account_name(&agent.account_id);
                    let leader_label = leader_name(&agent.team_leader_id);
                    view! {
                        <tr>
                            <td>{agent.name.clone()}</td>
                            <td>{agent.email.clone()}</td>
                            <td>{account_label}</td>
                            <td>{leader_label}</td>
                            <td>
                                <button class="table-action-btn" on:click=move |_| open_edit(edit_target.clone())>
                                    "Edit"
                                </button>
                                <button class="table-action-btn table-action-danger" on:click=move |_| delete(delete_id.clone())>
                                    "Delete"
                                </button>
                            </td>
                        </tr>
                    }
                }).collect::<Vec<_>>()}
            </tbody>
        </table>

        {move || (!loading.get() && agents.get().is_empty() && error_msg.get().is_none()).then(|| view! {
            <EmptyState icon="\u{1F9D1}" text="No agents found" hint="Agents belong to an account and report daily numbers" />
        })}
    }
}

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::banner::{EmptyState, ErrorBanner};
use crate::state::use_app_state;
use crate::types::TeamLeader;

#[component]
pub fn TeamLeadersPage() -> impl IntoView {
    let app = use_app_state();
    let accounts = app.accounts;
    let set_shared_leaders = app.set_team_leaders;

    let (leaders, set_leaders) = signal(Vec::<TeamLeader>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let (editing, set_editing) = signal(Option::<String>::None);
    let (form_open, set_form_open) = signal(false);
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (assigned, set_assigned) = signal(Vec::<String>::new());
    let (saving, set_saving) = signal(false);

    let do_refresh = move || {
        set_loading.set(true);
        set_error_msg.set(None);
        spawn_local(async move {
            match api::fetch_team_leaders().await {
                Ok(data) => {
                    set_shared_leaders.set(data.clone());
                    set_leaders.set(data);
                }
                Err(e) => set_error_msg.set(Some(format!("Failed to fetch team leaders: {e}"))),
            }
            set_loading.set(false);
        });
    };

    do_refresh();

    let open_create = move |_| {
        set_editing.set(None);
        set_name.set(String::new());
        set_email.set(String::new());
        set_assigned.set(Vec::new());
        set_form_open.set(true);
    };

    let open_edit = move |leader: TeamLeader| {
        set_editing.set(Some(leader.id));
        set_name.set(leader.name);
        set_email.set(leader.email);
        set_assigned.set(leader.account_ids);
        set_form_open.set(true);
    };

    let toggle_account = move |id: String| {
        set_assigned.update(|list| {
            if let Some(pos) = list.iter().position(|a| *a == id) {
                list.remove(pos);
            } else {
                list.push(id);
            }
        });
    };

    let submit = move |_| {
        if saving.get() || name.get().trim().is_empty() {
            return;
        }
        set_saving.set(true);
        let payload = api::TeamLeaderPayload {
            name: name.get().trim().to_string(),
            email: email.get().trim().to_string(),
            account_ids: assigned.get(),
        };
        let target = editing.get();
        spawn_local(async move {
            let result = match &target {
                Some(id) => api::update_team_leader(id, &payload).await.map(|_| ()),
                None => api::create_team_leader(&payload).await.map(|_| ()),
            };
            match result {
                Ok(()) => {
                    set_form_open.set(false);
                    do_refresh();
                }
                Err(e) => set_error_msg.set(Some(format!("Failed to save team leader: {e}"))),
            }
            set_saving.set(false);
        });
    };

    let delete = move |id: String| {
        spawn_local(async move {
            match api::delete_team_leader(&id).await {
                Ok(()) => do_refresh(),
                Err(e) => set_error_msg.set(Some(format!("Failed to delete team leader: {e}"))),
            }
        });
    };

    // Account names for the assignment column.
    let account_names = move |ids: &[String]| -> String {
        let list = accounts.get();
        let names: Vec<String> = ids
            .iter()
            .filter_map(|id| list.iter().find(|a| a.id == *id).map(|a| a.name.clone()))
            .collect();
        if names.is_empty() {
            "\u{2014}".into()
        } else {
            names.join(", ")
        }
    };

    view! {
        <div class="page-header">
            <h2>"Team Leaders"</h2>
            <div class="page-header-actions">
                <button class="primary-btn" on:click=open_create>"+ New Team Leader"</button>
                <button class="refresh-btn" on:click=move |_| do_refresh()>"\u{21BB} Refresh"</button>
            </div>
        </div>

        {move || error_msg.get().map(|msg| view! { <ErrorBanner message=msg /> })}

        {move || form_open.get().then(|| view! {
            <div class="edit-form">
                <h3>{move || if editing.get().is_some() { "Edit Team Leader" } else { "New Team Leader" }}</h3>
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
                    <label>"Accounts"</label>
                    <div class="checkbox-list">
                        {move || accounts.get().into_iter().map(|account| {
                            let id = account.id.clone();
                            let id_check = account.id.clone();
                            view! {
                                <label class="checkbox-item">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || assigned.get().contains(&id_check)
                                        on:change=move |_| toggle_account(id.clone())
                                    />
                                    " " {account.name}
                                </label>
                            }
                        }).collect::<Vec<_>>()}
                    </div>
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
            <div class="dashboard-loading">"Loading team leaders..."</div>
        })}

        <table class="data-table">
            <thead>
                <tr>
                    <th>"Name"</th>
                    <th>"Email"</th>
                    <th>"Accounts"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                {move || leaders.get().into_iter().map(|leader| {
                    let edit_target = leader.clone();
                    let delete_id = leader.id.clone();
                    let assignments = account_names(&leader.account_ids);
                    view! {
                        <tr>
                            <td>{leader.name.clone()}</td>
                            <td>{leader.email.clone()}</td>
                            <td>{assignments}</td>
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

        {move || (!loading.get() && leaders.get().is_empty() && error_msg.get().is_none()).then(|| view! {
            <EmptyState icon="\u{1F465}" text="No team leaders yet" hint="" />
        })}
    }
}

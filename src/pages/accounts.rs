use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::banner::{EmptyState, ErrorBanner};
use crate::state::use_app_state;
use crate::types::Account;

#[component]
pub fn AccountsPage() -> impl IntoView {
    let app = use_app_state();
    let set_shared_accounts = app.set_accounts;

    let (accounts, set_accounts) = signal(Vec::<Account>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // Form state. `editing` holds the id of the account being edited, or
    // None when the form creates a new one.
    let (editing, set_editing) = signal(Option::<String>::None);
    let (form_open, set_form_open) = signal(false);
    let (name, set_name) = signal(String::new());
    let (timezone, set_timezone) = signal(String::new());
    let (active, set_active) = signal(true);
    let (saving, set_saving) = signal(false);

    let do_refresh = move || {
        set_loading.set(true);
        set_error_msg.set(None);
        spawn_local(async move {
            match api::fetch_accounts().await {
                Ok(data) => {
                    set_shared_accounts.set(data.clone());
                    set_accounts.set(data);
                }
                Err(e) => set_error_msg.set(Some(format!("Failed to fetch accounts: {e}"))),
            }
            set_loading.set(false);
        });
    };

    do_refresh();

    let open_create = move |_| {
        set_editing.set(None);
        set_name.set(String::new());
        set_timezone.set("America/New_York".into());
        set_active.set(true);
        set_form_open.set(true);
    };

    let open_edit = move |account: Account| {
        set_editing.set(Some(account.id));
        set_name.set(account.name);
        set_timezone.set(account.timezone);
        set_active.set(account.active);
        set_form_open.set(true);
    };

    let submit = move |_| {
        if saving.get() || name.get().trim().is_empty() {
            return;
        }
        set_saving.set(true);
        let payload = api::AccountPayload {
            name: name.get().trim().to_string(),
            timezone: timezone.get().trim().to_string(),
            active: active.get(),
        };
        let target = editing.get();
        spawn_local(async move {
            let result = match &target {
                Some(id) => api::update_account(id, &payload).await.map(|_| ()),
                None => api::create_account(&payload).await.map(|_| ()),
            };
            match result {
                Ok(()) => {
                    set_form_open.set(false);
                    do_refresh();
                }
                Err(e) => set_error_msg.set(Some(format!("Failed to save account: {e}"))),
            }
            set_saving.set(false);
        });
    };

    let delete = move |id: String| {
        spawn_local(async move {
            match api::delete_account(&id).await {
                Ok(()) => do_refresh(),
                Err(e) => set_error_msg.set(Some(format!("Failed to delete account: {e}"))),
            }
        });
    };

    view! {
        <div class="page-header">
            <h2>"Accounts"</h2>
            <div class="page-header-actions">
                <button class="primary-btn" on:click=open_create>"+ New Account"</button>
                <button class="refresh-btn" on:click=move |_| do_refresh()>"\u{21BB} Refresh"</button>
            </div>
        </div>

        {move || error_msg.get().map(|msg| view! { <ErrorBanner message=msg /> })}

        {move || form_open.get().then(|| view! {
            <div class="edit-form">
                <h3>{move || if editing.get().is_some() { "Edit Account" } else { "New Account" }}</h3>
                <div class="form-row">
                    <label>"Name"</label>
                    <input
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-row">
                    <label>"Timezone"</label>
                    <input
                        type="text"
                        prop:value=move || timezone.get()
                        on:input=move |ev| set_timezone.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-row form-row-inline">
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=move || active.get()
                            on:change=move |ev| set_active.set(event_target_checked(&ev))
                        />
                        " Active"
                    </label>
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
            <div class="dashboard-loading">"Loading accounts..."</div>
        })}

        <table class="data-table">
            <thead>
                <tr>
                    <th>"Name"</th>
                    <th>"Timezone"</th>
                    <th>"Status"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                {move || accounts.get().into_iter().map(|account| {
                    let edit_target = account.clone();
                    let delete_id = account.id.clone();
                    let status = if account.active { "Active" } else { "Archived" };
                    let status_class = if account.active { "status-pill pill-active" } else { "status-pill pill-archived" };
                    view! {
                        <tr>
                            <td>{account.name.clone()}</td>
                            <td>{account.timezone.clone()}</td>
                            <td><span class={status_class}>{status}</span></td>
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

        {move || (!loading.get() && accounts.get().is_empty() && error_msg.get().is_none()).then(|| view! {
            <EmptyState icon="\u{1F4C1}" text="No accounts yet" hint="Create an account to start collecting daily updates" />
        })}
    }
}

use chrono::Duration;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::banner::{EmptyState, ErrorBanner};
use crate::components::spinner::Spinner;
use crate::state::{today, use_app_state};

#[component]
pub fn ExportsPage() -> impl IntoView {
    let app = use_app_state();
    let accounts = app.accounts;

    let (account_id, set_account_id) = signal(String::new());
    let (from, set_from) = signal(today() - Duration::days(6));
    let (to, set_to) = signal(today());
    let (preview, set_preview) = signal(Option::<String>::None);
    let (loading, set_loading) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let download_url = move || {
        let id = account_id.get();
        (!id.is_empty()).then(|| api::export_csv_url(&id, from.get(), to.get()))
    };

    let do_preview = move |_| {
        let id = account_id.get();
        if id.is_empty() {
            return;
        }
        let (from, to) = (from.get(), to.get());
        set_loading.set(true);
        set_error_msg.set(None);
        spawn_local(async move {
            match api::fetch_export_csv(&id, from, to).await {
                Ok(csv) => set_preview.set(Some(csv)),
                Err(e) => set_error_msg.set(Some(format!("Failed to fetch export: {e}"))),
            }
            set_loading.set(false);
        });
    };

    view! {
        <div class="page-header">
            <h2>"Exports"</h2>
        </div>

        {move || error_msg.get().map(|msg| view! { <ErrorBanner message=msg /> })}

        <div class="export-controls">
            <div class="form-row">
                <label>"Account"</label>
                <select on:change=move |ev| set_account_id.set(event_target_value(&ev))>
                    <option value="">"Select account..."</option>
                    {move || accounts.get().into_iter().map(|account| {
                        let selected = account_id.get() == account.id;
                        view! {
                            <option value={account.id} selected=selected>{account.name}</option>
                        }
                    }).collect::<Vec<_>>()}
                </select>
            </div>
            <div class="form-row">
                <label>"From"</label>
                <input
                    type="date"
                    class="date-input"
                    prop:value=move || from.get().format("%Y-%m-%d").to_string()
                    on:change=move |ev| {
                        if let Ok(date) = event_target_value(&ev).parse() {
                            set_from.set(date);
                        }
                    }
                />
            </div>
            <div class="form-row">
                <label>"To"</label>
                <input
                    type="date"
                    class="date-input"
                    prop:value=move || to.get().format("%Y-%m-%d").to_string()
                    on:change=move |ev| {
                        if let Ok(date) = event_target_value(&ev).parse() {
                            set_to.set(date);
                        }
                    }
                />
            </div>
            <div class="form-actions">
                {move || download_url().map(|url| view! {
                    <a class="primary-btn" href={url} download="">"Download CSV"</a>
                })}
                <button
                    class="secondary-btn"
                    disabled=move || account_id.get().is_empty() || loading.get()
                    on:click=do_preview
                >
                    "Preview"
                </button>
            </div>
        </div>

        {move || loading.get().then(|| view! {
            <div class="dashboard-loading"><Spinner size="sm" label="Fetching export..." /></div>
        })}

        {move || preview.get().map(|csv| view! {
            <div class="section">
                <h3>"Preview"</h3>
                <pre class="export-preview">{csv}</pre>
            </div>
        })}

        {move || (account_id.get().is_empty() && error_msg.get().is_none()).then(|| view! {
            <EmptyState
                icon="\u{1F4E4}"
                text="Pick an account to export"
                hint="Exports cover every metric for every agent over the chosen date range"
            />
        })}
    }
}

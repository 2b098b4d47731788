use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::banner::{EmptyState, ErrorBanner};
use crate::types::{MetricDefinition, MetricKind};

const KIND_CHOICES: &[(MetricKind, &str)] = &[
    (MetricKind::Integer, "integer"),
    (MetricKind::Decimal, "decimal"),
    (MetricKind::Percentage, "percentage"),
    (MetricKind::Text, "text"),
];

fn kind_from_value(value: &str) -> MetricKind {
    KIND_CHOICES
        .iter()
        .find(|(_, v)| *v == value)
        .map(|(k, _)| *k)
        .unwrap_or(MetricKind::Integer)
}

#[component]
pub fn MetricsPage() -> impl IntoView {
    let (metrics, set_metrics) = signal(Vec::<MetricDefinition>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let (editing, set_editing) = signal(Option::<String>::None);
    let (form_open, set_form_open) = signal(false);
    let (key, set_key) = signal(String::new());
    let (display_name, set_display_name) = signal(String::new());
    let (kind, set_kind) = signal(MetricKind::Integer);
    let (emoji, set_emoji) = signal(String::new());
    let (required, set_required) = signal(false);
    let (sort_order, set_sort_order) = signal(0i32);
    let (saving, set_saving) = signal(false);

    let do_refresh = move || {
        set_loading.set(true);
        set_error_msg.set(None);
        spawn_local(async move {
            match api::fetch_metrics().await {
                Ok(mut data) => {
                    data.sort_by_key(|m| m.sort_order);
                    set_metrics.set(data);
                }
                Err(e) => set_error_msg.set(Some(format!("Failed to fetch metrics: {e}"))),
            }
            set_loading.set(false);
        });
    };

    do_refresh();

    let open_create = move |_| {
        set_editing.set(None);
        set_key.set(String::new());
        set_display_name.set(String::new());
        set_kind.set(MetricKind::Integer);
        set_emoji.set(String::new());
        set_required.set(false);
        set_sort_order.set(metrics.get().len() as i32);
        set_form_open.set(true);
    };

    let open_edit = move |metric: MetricDefinition| {
        set_editing.set(Some(metric.key.clone()));
        set_key.set(metric.key);
        set_display_name.set(metric.display_name);
        set_kind.set(metric.kind);
        set_emoji.set(metric.emoji);
        set_required.set(metric.required);
        set_sort_order.set(metric.sort_order);
        set_form_open.set(true);
    };

    let submit = move |_| {
        if saving.get() || key.get().trim().is_empty() || display_name.get().trim().is_empty() {
            return;
        }
        set_saving.set(true);
        let payload = api::MetricPayload {
            key: key.get().trim().to_string(),
            display_name: display_name.get().trim().to_string(),
            kind: kind.get(),
            emoji: emoji.get().trim().to_string(),
            required: required.get(),
            sort_order: sort_order.get(),
        };
        let target = editing.get();
        spawn_local(async move {
            let result = match &target {
                Some(k) => api::update_metric(k, &payload).await.map(|_| ()),
                None => api::create_metric(&payload).await.map(|_| ()),
            };
            match result {
                Ok(()) => {
                    set_form_open.set(false);
                    do_refresh();
                }
                Err(e) => set_error_msg.set(Some(format!("Failed to save metric: {e}"))),
            }
            set_saving.set(false);
        });
    };

    let delete = move |k: String| {
        spawn_local(async move {
            match api::delete_metric(&k).await {
                Ok(()) => do_refresh(),
                Err(e) => set_error_msg.set(Some(format!("Failed to delete metric: {e}"))),
            }
        });
    };

    let is_editing = move || editing.get().is_some();

    view! {
        <div class="page-header">
            <h2>"Metrics"</h2>
            <div class="page-header-actions">
                <button class="primary-btn" on:click=open_create>"+ New Metric"</button>
                <button class="refresh-btn" on:click=move |_| do_refresh()>"\u{21BB} Refresh"</button>
            </div>
        </div>

        {move || error_msg.get().map(|msg| view! { <ErrorBanner message=msg /> })}

        {move || form_open.get().then(|| view! {
            <div class="edit-form">
                <h3>{move || if is_editing() { "Edit Metric" } else { "New Metric" }}</h3>
                <div class="form-row">
                    <label>"Key"</label>
                    <input
                        type="text"
                        placeholder="dials"
                        disabled=is_editing
                        prop:value=move || key.get()
                        on:input=move |ev| set_key.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-row">
                    <label>"Display Name"</label>
                    <input
                        type="text"
                        placeholder="Dials"
                        prop:value=move || display_name.get()
                        on:input=move |ev| set_display_name.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-row">
                    <label>"Kind"</label>
                    // The data kind is fixed at definition time; editing an
                    // existing metric renders it read-only.
                    <select
                        disabled=is_editing
                        on:change=move |ev| set_kind.set(kind_from_value(&event_target_value(&ev)))
                    >
                        {KIND_CHOICES.iter().map(|(choice, value)| {
                            let choice = *choice;
                            let selected = move || kind.get() == choice;
                            view! {
                                <option value={*value} selected=selected>{choice.label()}</option>
                            }
                        }).collect::<Vec<_>>()}
                    </select>
                </div>
                <div class="form-row">
                    <label>"Emoji"</label>
                    <input
                        type="text"
                        placeholder="\u{260E}"
                        prop:value=move || emoji.get()
                        on:input=move |ev| set_emoji.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-row">
                    <label>"Sort Order"</label>
                    <input
                        type="number"
                        prop:value=move || sort_order.get().to_string()
                        on:input=move |ev| {
                            if let Ok(n) = event_target_value(&ev).parse() {
                                set_sort_order.set(n);
                            }
                        }
                    />
                </div>
                <div class="form-row form-row-inline">
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=move || required.get()
                            on:change=move |ev| set_required.set(event_target_checked(&ev))
                        />
                        " Required"
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
            <div class="dashboard-loading">"Loading metrics..."</div>
        })}

        <table class="data-table">
            <thead>
                <tr>
                    <th></th>
                    <th>"Key"</th>
                    <th>"Display Name"</th>
                    <th>"Kind"</th>
                    <th>"Required"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                {move || metrics.get().into_iter().map(|metric| {
                    let edit_target = metric.clone();
                    let delete_key = metric.key.clone();
                    let kind_class = metric.kind.css_class();
                    view! {
                        <tr>
                            <td class="metric-emoji">{metric.emoji.clone()}</td>
                            <td><code>{metric.key.clone()}</code></td>
                            <td>{metric.display_name.clone()}</td>
                            <td><span class={kind_class}>{metric.kind.label()}</span></td>
                            <td>{if metric.required { "Yes" } else { "\u{2014}" }}</td>
                            <td>
                                <button class="table-action-btn" on:click=move |_| open_edit(edit_target.clone())>
                                    "Edit"
                                </button>
                                <button class="table-action-btn table-action-danger" on:click=move |_| delete(delete_key.clone())>
                                    "Delete"
                                </button>
                            </td>
                        </tr>
                    }
                }).collect::<Vec<_>>()}
            </tbody>
        </table>

        {move || (!loading.get() && metrics.get().is_empty() && error_msg.get().is_none()).then(|| view! {
            <EmptyState icon="\u{1F4CA}" text="No metrics defined" hint="Metrics define the columns of every daily update grid" />
        })}
    }
}

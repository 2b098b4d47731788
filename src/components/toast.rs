use leptos::prelude::*;
use leptos::task::spawn_local;

/// A transient notification raised by page actions (save succeeded, save
/// failed). Errors stay until dismissed; everything else auto-dismisses.
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: String,
    pub title: String,
    pub message: String,
    pub level: String, // "info", "success", "error"
}

/// Push a toast and schedule its removal unless it is an error.
pub fn push_toast(set_toasts: WriteSignal<Vec<Toast>>, title: &str, message: &str, level: &str) {
    let toast = Toast {
        id: uuid::Uuid::new_v4().to_string(),
        title: title.to_string(),
        message: message.to_string(),
        level: level.to_string(),
    };
    let id = toast.id.clone();
    let auto_dismiss = level != "error";
    set_toasts.update(|list| {
        list.push(toast);
        // Keep only the last 5 toasts.
        if list.len() > 5 {
            let excess = list.len() - 5;
            list.drain(0..excess);
        }
    });
    if auto_dismiss {
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(5_000).await;
            set_toasts.update(|list| list.retain(|t| t.id != id));
        });
    }
}

#[component]
pub fn ToastStack(
    toasts: ReadSignal<Vec<Toast>>,
    set_toasts: WriteSignal<Vec<Toast>>,
) -> impl IntoView {
    view! {
        <div class="toast-stack">
            {move || {
                toasts
                    .get()
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id.clone();
                        let level_class = format!("toast toast-{}", toast.level);
                        view! {
                            <div class={level_class}>
                                <div class="toast-body">
                                    <div class="toast-title">{toast.title}</div>
                                    <div class="toast-message">{toast.message}</div>
                                </div>
                                <button
                                    class="toast-dismiss"
                                    on:click=move |_| {
                                        let id = id.clone();
                                        set_toasts.update(|list| list.retain(|t| t.id != id));
                                    }
                                >
                                    "\u{2715}"
                                </button>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}

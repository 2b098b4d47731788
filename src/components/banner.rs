use leptos::prelude::*;

/// Error banner shown at the top of a page when a fetch or save fails.
#[component]
pub fn ErrorBanner(message: String) -> impl IntoView {
    view! {
        <div class="state-banner state-banner-error">
            <span
                class="state-banner-icon"
                inner_html=r#"<svg xmlns="http://www.w3.org/2000/svg" width="14" height="14" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><circle cx="12" cy="12" r="10"/><line x1="12" y1="8" x2="12" y2="12"/><line x1="12" y1="16" x2="12.01" y2="16"/></svg>"#
            ></span>
            <span>{message}</span>
        </div>
    }
}

/// Neutral empty-state block for lists with no rows.
#[component]
pub fn EmptyState(
    icon: &'static str,
    text: &'static str,
    #[prop(default = "")] hint: &'static str,
) -> impl IntoView {
    view! {
        <div class="empty-state">
            <div class="empty-state-icon">{icon}</div>
            <div class="empty-state-text">{text}</div>
            {(!hint.is_empty()).then(|| view! {
                <div class="empty-state-hint">{hint}</div>
            })}
        </div>
    }
}

use leptos::prelude::*;

pub mod api;
pub mod components;
pub mod grid;
pub mod pages;
pub mod state;
pub mod types;

use wasm_bindgen::prelude::*;

use components::toast::{Toast, ToastStack};

#[component]
pub fn App() -> impl IntoView {
    state::provide_app_state();

    let (current_tab, set_current_tab) = signal(0usize);
    let (toasts, set_toasts) = signal(Vec::<Toast>::new());
    // Pages raise toasts and jump tabs through context.
    provide_context(set_toasts);
    provide_context(set_current_tab);

    view! {
        <components::nav_bar::NavBar current_tab=current_tab set_current_tab=set_current_tab />
        <div class="content">
            {move || match current_tab.get() {
                0 => view! { <pages::dashboard::DashboardPage /> }.into_any(),
                1 => view! { <pages::daily_update::DailyUpdatePage /> }.into_any(),
                2 => view! { <pages::accounts::AccountsPage /> }.into_any(),
                3 => view! { <pages::team_leaders::TeamLeadersPage /> }.into_any(),
                4 => view! { <pages::agents::AgentsPage /> }.into_any(),
                5 => view! { <pages::metrics::MetricsPage /> }.into_any(),
                6 => view! { <pages::exports::ExportsPage /> }.into_any(),
                _ => view! { <pages::dashboard::DashboardPage /> }.into_any(),
            }}
        </div>
        <ToastStack toasts=toasts set_toasts=set_toasts />
    }
}

#[wasm_bindgen(start)]
pub fn mount() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}

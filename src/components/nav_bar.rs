use leptos::prelude::*;

/// Nav item labels — used for tab_label() lookup and rendering.
const NAV_LABELS: &[&str] = &[
    "Dashboard",    // 0
    "Daily Update", // 1
    "Accounts",     // 2
    "Team Leaders", // 3
    "Agents",       // 4
    "Metrics",      // 5
    "Exports",      // 6
];

/// Inline SVG icon for a nav item. Lucide-style 18x18 stroke icons.
fn nav_icon(idx: usize) -> impl IntoView {
    let svg = match idx {
        // Dashboard — grid/layout
        0 => r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><rect x="3" y="3" width="7" height="9" rx="1"/><rect x="14" y="3" width="7" height="5" rx="1"/><rect x="14" y="12" width="7" height="9" rx="1"/><rect x="3" y="16" width="7" height="5" rx="1"/></svg>"#,
        // Daily Update — table/grid
        1 => r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><rect x="3" y="3" width="18" height="18" rx="2"/><line x1="3" y1="9" x2="21" y2="9"/><line x1="3" y1="15" x2="21" y2="15"/><line x1="9" y1="3" x2="9" y2="21"/><line x1="15" y1="3" x2="15" y2="21"/></svg>"#,
        // Accounts — briefcase
        2 => r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><rect x="2" y="7" width="20" height="14" rx="2"/><path d="M16 21V5a2 2 0 00-2-2h-4a2 2 0 00-2 2v16"/></svg>"#,
        // Team Leaders — users
        3 => r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M17 21v-2a4 4 0 00-4-4H5a4 4 0 00-4 4v2"/><circle cx="9" cy="7" r="4"/><path d="M23 21v-2a4 4 0 00-3-3.87"/><path d="M16 3.13a4 4 0 010 7.75"/></svg>"#,
        // Agents — user
        4 => r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M20 21v-2a4 4 0 00-4-4H8a4 4 0 00-4 4v2"/><circle cx="12" cy="7" r="4"/></svg>"#,
        // Metrics — bar chart
        5 => r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><line x1="18" y1="20" x2="18" y2="10"/><line x1="12" y1="20" x2="12" y2="4"/><line x1="6" y1="20" x2="6" y2="14"/></svg>"#,
        // Exports — download
        6 => r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M21 15v4a2 2 0 01-2 2H5a2 2 0 01-2-2v-4"/><polyline points="7 10 12 15 17 10"/><line x1="12" y1="15" x2="12" y2="3"/></svg>"#,
        _ => r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><circle cx="12" cy="12" r="10"/></svg>"#,
    };
    view! { <span class="sidebar-item-icon" inner_html=svg></span> }
}

/// A single nav button with SVG icon.
#[component]
fn NavItem(
    idx: usize,
    label: &'static str,
    current_tab: ReadSignal<usize>,
    set_current_tab: WriteSignal<usize>,
    sidebar_collapsed: ReadSignal<bool>,
) -> impl IntoView {
    view! {
        <button
            class="sidebar-item"
            class:active=(move || current_tab.get() == idx)
            class:collapsed=(move || sidebar_collapsed.get())
            on:click=move |_| set_current_tab.set(idx)
            title=move || if sidebar_collapsed.get() { label } else { "" }
        >
            {nav_icon(idx)}
            <span class="sidebar-item-label" class:collapsed=(move || sidebar_collapsed.get())>{label}</span>
        </button>
    }
}

#[component]
pub fn NavBar(
    current_tab: ReadSignal<usize>,
    set_current_tab: WriteSignal<usize>,
) -> impl IntoView {
    let (sidebar_collapsed, set_sidebar_collapsed) = signal(false);

    let toggle_sidebar = move |_| {
        set_sidebar_collapsed.update(|collapsed| *collapsed = !*collapsed);
    };

    view! {
        <aside
            class="sidebar"
            class:collapsed=(move || sidebar_collapsed.get())
            aria-label="Main navigation"
        >
            <div class="sidebar-header">
                <button
                    class="sidebar-toggle-btn"
                    title=move || if sidebar_collapsed.get() { "Expand sidebar" } else { "Collapse sidebar" }
                    on:click=toggle_sidebar
                >
                    <span class="sidebar-toggle-icon">
                        {move || if sidebar_collapsed.get() { "→" } else { "←" }}
                    </span>
                </button>

                <div class="sidebar-brand" class:collapsed=(move || sidebar_collapsed.get())>
                    <div class="sidebar-brand-icon" aria-hidden="true">"PB"</div>
                    <div class:collapsed=(move || sidebar_collapsed.get())>
                        <div class="sidebar-brand-name">"PulseBoard"</div>
                        <div class="sidebar-brand-badge">"v0.1.0"</div>
                    </div>
                </div>
            </div>

            <nav class="sidebar-nav" aria-label="Page navigation">
                <div class="sidebar-section-label" class:collapsed=(move || sidebar_collapsed.get())>"Reporting"</div>
                <NavItem idx=0 label="Dashboard" current_tab set_current_tab sidebar_collapsed />
                <NavItem idx=1 label="Daily Update" current_tab set_current_tab sidebar_collapsed />
                <NavItem idx=6 label="Exports" current_tab set_current_tab sidebar_collapsed />

                <div class="sidebar-section-label" class:collapsed=(move || sidebar_collapsed.get())>"Directory"</div>
                <NavItem idx=2 label="Accounts" current_tab set_current_tab sidebar_collapsed />
                <NavItem idx=3 label="Team Leaders" current_tab set_current_tab sidebar_collapsed />
                <NavItem idx=4 label="Agents" current_tab set_current_tab sidebar_collapsed />

                <div class="sidebar-section-label" class:collapsed=(move || sidebar_collapsed.get())>"Configuration"</div>
                <NavItem idx=5 label="Metrics" current_tab set_current_tab sidebar_collapsed />
            </nav>
        </aside>
    }
}

/// Returns the label for a given tab index.
pub fn tab_label(idx: usize) -> &'static str {
    NAV_LABELS.get(idx).copied().unwrap_or("Dashboard")
}

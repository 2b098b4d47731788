use leptos::prelude::*;

/// Animated SVG loading spinner. Sizes: "sm" (16px), "md" (24px), "lg" (32px)
#[component]
pub fn Spinner(
    #[prop(default = "md")] size: &'static str,
    #[prop(default = "")] label: &'static str,
) -> impl IntoView {
    let (w, h) = match size {
        "sm" => (16, 16),
        "lg" => (32, 32),
        _ => (24, 24),
    };
    let svg = format!(
        r##"<svg width="{w}" height="{h}" viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg" class="svg-spinner">
  <circle cx="12" cy="12" r="10" fill="none" stroke="rgba(31,111,235,0.15)" stroke-width="2.5"/>
  <path d="M12 2a10 10 0 0 1 10 10" fill="none" stroke="#1f6feb" stroke-width="2.5" stroke-linecap="round">
    <animateTransform attributeName="transform" type="rotate" from="0 12 12" to="360 12 12" dur="0.8s" repeatCount="indefinite"/>
  </path>
</svg>"##,
        w = w,
        h = h,
    );
    let size_class = format!("spinner-container spinner-container-{}", size);
    view! {
        <div class={size_class}>
            <span class="svg-spinner-wrap" inner_html=svg></span>
            {(!label.is_empty()).then(|| view! {
                <span class="spinner-label">{label}</span>
            })}
        </div>
    }
}

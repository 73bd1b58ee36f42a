//! Result panel: diagnosis or rejection message, plus confidence.

use leptos::*;

use crate::types::PanelVisibility;

#[component]
pub fn ResultPanel(
    panel: Signal<PanelVisibility>,
    label: Signal<String>,
    label_class: Signal<&'static str>,
    confidence: Signal<String>,
) -> impl IntoView {
    view! {
        <div id="resultPanel" class=move || panel.get().css_class()>
            <div id="resultLabel" class=move || format!("result-label {}", label_class.get())>
                {move || label.get()}
            </div>
            <div id="confidenceText" class="confidence-text">
                {move || confidence.get()}
            </div>
        </div>
    }
}

//! Footer component

use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div>"NeuroScan AI Lab • Powered by " <span class="rust-badge">"🦀 Rust + Leptos"</span></div>
            <div class="footer-note">
                "Predictions come from an external model and must not be used for diagnosis."
            </div>
        </footer>
    }
}

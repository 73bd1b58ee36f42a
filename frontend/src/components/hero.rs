//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"🧠 NeuroScan"</h1>
            <p class="subtitle">
                "Upload a brain MRI scan (JPG or PNG) and get an instant tumor classification. "
                "Research playground only, not a medical device."
            </p>
        </div>
    }
}

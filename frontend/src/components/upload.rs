//! Image upload box with drag & drop support.
//!
//! Handles file selection only; reading and analysis live in the
//! controller.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Event, File, HtmlInputElement};

use crate::services::first_file;
use crate::{ACCEPTED_TYPES, FILE_INPUT_ID};

#[component]
pub fn UploadBox(
    /// False while a request is in flight
    upload_enabled: Signal<bool>,
    /// Called with the first selected or dropped file
    on_file: Callback<File>,
) -> impl IntoView {
    let (dragging, set_dragging) = create_signal(false);

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = first_file(input.files()) {
            on_file.call(file);
        }
    };

    let trigger_file_input = move |_| {
        if !upload_enabled.get_untracked() {
            return;
        }
        if let Some(window) = web_sys::window() {
            if let Some(document) = window.document() {
                if let Some(input) = document.get_element_by_id(FILE_INPUT_ID) {
                    if let Some(html_input) = input.dyn_ref::<HtmlInputElement>() {
                        html_input.click();
                    }
                }
            }
        }
    };

    let on_drag_over = move |ev: DragEvent| {
        ev.prevent_default();
        set_dragging.set(true);
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_dragging.set(false);
        if !upload_enabled.get_untracked() {
            return;
        }
        if let Some(file) = first_file(ev.data_transfer().and_then(|dt| dt.files())) {
            on_file.call(file);
        }
    };

    view! {
        <div
            class="upload-box"
            id="uploadBox"
            class:dragging=move || dragging.get()
            class:disabled=move || !upload_enabled.get()
            on:click=trigger_file_input
            on:dragover=on_drag_over
            on:dragleave=move |_| set_dragging.set(false)
            on:drop=on_drop
        >
            <div class="upload-icon">"🧠"</div>
            <div class="upload-text">"Drop an MRI scan here"</div>
            <div class="upload-hint">"or click to browse (JPG, PNG)"</div>

            // Clicks on the input would bubble back to the box.
            <input
                type="file"
                id=FILE_INPUT_ID
                accept=ACCEPTED_TYPES
                style="display:none"
                disabled=move || !upload_enabled.get()
                on:click=|ev| ev.stop_propagation()
                on:change=on_file_change
            />
        </div>
    }
}

/// Local preview of the selected scan.
#[component]
pub fn ScanPreview(preview: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show
            when=move || preview.get().is_some()
            fallback=|| view! { }
        >
            <img
                id="previewImage"
                class="preview-image"
                alt="MRI preview"
                src=move || preview.get().unwrap_or_default()
            />
        </Show>
    }
}

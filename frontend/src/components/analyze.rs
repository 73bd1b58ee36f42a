//! Upload-and-analyze section.
//!
//! Owns the [`AnalyzeController`] for the page and mirrors its
//! [`ControllerView`] into a signal after every change.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::*;
use web_sys::File;

use crate::components::{LoaderContainer, LottieLoader, ResultPanel, ScanPreview, UploadBox};
use crate::controller::{
    confidence_animation, submit_for_analysis, AnalyzeController, Completion, ControllerView,
};
use crate::services::{read_file, GlooPredictClient};
use crate::PANEL_REVEAL_DELAY_MS;

type SharedController = Rc<RefCell<AnalyzeController<LottieLoader>>>;

#[component]
pub fn AnalyzeSection() -> impl IntoView {
    let controller: SharedController =
        Rc::new(RefCell::new(AnalyzeController::new(LottieLoader::new())));
    let (view, set_view) = create_signal(controller.borrow().view());

    on_cleanup({
        let controller = Rc::clone(&controller);
        move || controller.borrow_mut().teardown()
    });

    let on_file = {
        let controller = Rc::clone(&controller);
        Callback::new(move |file: File| {
            let controller = Rc::clone(&controller);
            let ticket = controller.borrow_mut().begin_selection();
            spawn_local(async move {
                match read_file(&file).await {
                    Ok(selected) => {
                        controller.borrow_mut().accept_selection(ticket, Some(selected));
                        sync_view(&controller, set_view);
                    }
                    Err(e) => log::error!("❌ {}", e),
                }
            });
        })
    };

    let on_analyze = {
        let controller = Rc::clone(&controller);
        move |_| {
            let controller = Rc::clone(&controller);
            spawn_local(analyze(controller, set_view));
        }
    };

    let field = move |f: fn(&ControllerView) -> String| Signal::derive(move || view.with(f));

    view! {
        <div class="analyze-section">
            <UploadBox
                upload_enabled=Signal::derive(move || view.with(|v| v.upload_enabled))
                on_file=on_file
            />

            {move || {
                view.with(|v| v.notice.clone())
                    .map(|notice| view! { <p class="upload-notice">{notice}</p> })
            }}

            <ScanPreview preview=Signal::derive(move || view.with(|v| v.preview.clone()))/>

            <p id="statusText" class="status-text">{move || view.with(|v| v.status.clone())}</p>

            <button
                id="analyzeBtn"
                class="btn btn-primary"
                disabled=move || !view.with(|v| v.analyze_enabled)
                on:click=on_analyze
            >
                "Analyze Scan"
            </button>

            <LoaderContainer loading=Signal::derive(move || view.with(|v| v.loading))/>

            <ResultPanel
                panel=Signal::derive(move || view.with(|v| v.panel))
                label=field(|v| v.label.clone())
                label_class=Signal::derive(move || view.with(|v| v.label_class))
                confidence=field(|v| v.confidence.clone())
            />
        </div>
    }
}

/// One analyze action: request, render, then animate a successful result.
async fn analyze(controller: SharedController, set_view: WriteSignal<ControllerView>) {
    let client = GlooPredictClient::default();
    let completion = submit_for_analysis(&*controller, &client, |view| set_view.set(view)).await;

    if completion == Some(Completion::Result) {
        spawn_local(confidence_animation(
            Rc::clone(&controller),
            TimeoutFuture::new,
            move |view| set_view.set(view),
        ));

        TimeoutFuture::new(PANEL_REVEAL_DELAY_MS).await;
        controller.borrow_mut().reveal_panel();
        sync_view(&controller, set_view);
    }
}

fn sync_view(controller: &SharedController, set_view: WriteSignal<ControllerView>) {
    let view = controller.borrow().view();
    set_view.set(view);
}

//! Upload → request → render lifecycle.
//!
//! [`AnalyzeController`] owns the whole workflow state: the selected file,
//! the [`UiState`] machine, the loader and the confidence animation. It
//! has no DOM access; components render the [`ControllerView`] snapshot it
//! produces and feed user events back in.
//!
//! ```text
//!  Idle ──accept──▶ FileReady ──begin──▶ Analyzing ──ok──▶ ResultShown
//!                      ▲                    │  ▲              │
//!                      │                    err └──begin──────┤
//!                      │                    ▼                 │
//!                      └──accept──── ErrorShown ◀─────────────┘
//! ```

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use futures::future::{abortable, AbortHandle};

use crate::config::status;
use crate::services::{request_prediction, PredictClient};
use crate::types::{AppError, AppResult, PanelVisibility, PredictionResult, SelectedFile, UiState};
use crate::{CONFIDENCE_ANIMATION_MS, CONFIDENCE_TICK_MS};

// =============================================================================
// Loader
// =============================================================================

/// Animated indicator shown while a request is in flight.
pub trait Loader {
    fn start(&mut self);
    fn destroy(&mut self);
}

// =============================================================================
// Confidence animation
// =============================================================================

/// Linear count-up from 0 to a target percentage.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfidenceAnimation {
    target: f64,
    current: f64,
    increment: f64,
    finished: bool,
}

impl ConfidenceAnimation {
    pub fn new(target: f64) -> Self {
        let ticks = f64::from(CONFIDENCE_ANIMATION_MS) / f64::from(CONFIDENCE_TICK_MS);
        Self {
            target,
            current: 0.0,
            increment: target / ticks,
            finished: false,
        }
    }

    /// Advance one tick and return the value to display.
    pub fn tick(&mut self) -> f64 {
        if !self.finished {
            self.current += self.increment;
            if self.current >= self.target {
                self.current = self.target;
                self.finished = true;
            }
        }
        self.current
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current(&self) -> f64 {
        self.current
    }
}

/// Confidence line for a given percentage.
pub fn confidence_text(value: f64) -> String {
    format!("Confidence: {:.2}%", value)
}

// =============================================================================
// View snapshot
// =============================================================================

/// Everything the page needs to render.
#[derive(Clone, Debug, PartialEq)]
pub struct ControllerView {
    pub status: String,
    /// Shown under the upload box when a selection was not taken.
    pub notice: Option<String>,
    pub preview: Option<String>,
    pub label: String,
    pub label_class: &'static str,
    pub confidence: String,
    pub panel: PanelVisibility,
    pub analyze_enabled: bool,
    pub upload_enabled: bool,
    pub loading: bool,
}

impl Default for ControllerView {
    fn default() -> Self {
        Self {
            status: status::IDLE.to_string(),
            notice: None,
            preview: None,
            label: String::new(),
            label_class: "",
            confidence: String::new(),
            panel: PanelVisibility::Hidden,
            analyze_enabled: false,
            upload_enabled: true,
            loading: false,
        }
    }
}

/// How an analysis attempt ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// A result is shown and its confidence animation should start.
    Result,
    /// The server rejected the image.
    Rejected,
    /// The request did not complete.
    TransportFailure,
}

// =============================================================================
// Controller
// =============================================================================

pub struct AnalyzeController<L: Loader> {
    state: UiState,
    file: Option<SelectedFile>,
    selection: u64,
    loader: L,
    loader_running: bool,
    animation: Option<ConfidenceAnimation>,
    ticker: Option<AbortHandle>,
    view: ControllerView,
}

impl<L: Loader> AnalyzeController<L> {
    pub fn new(loader: L) -> Self {
        Self {
            state: UiState::Idle,
            file: None,
            selection: 0,
            loader,
            loader_running: false,
            animation: None,
            ticker: None,
            view: ControllerView::default(),
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn analyze_enabled(&self) -> bool {
        self.file.is_some() && !self.state.is_analyzing()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn view(&self) -> ControllerView {
        ControllerView {
            analyze_enabled: self.analyze_enabled(),
            upload_enabled: !self.state.is_analyzing(),
            loading: self.loader_running,
            ..self.view.clone()
        }
    }

    /// Start a new selection and return its ticket.
    ///
    /// Files are read asynchronously; only the read holding the latest
    /// ticket may land in [`accept_selection`](Self::accept_selection).
    pub fn begin_selection(&mut self) -> u64 {
        self.selection += 1;
        self.selection
    }

    /// Take the file read for `ticket`, unless a newer selection started
    /// since.
    pub fn accept_selection(&mut self, ticket: u64, file: Option<SelectedFile>) -> bool {
        if ticket != self.selection {
            if let Some(file) = file {
                log::debug!("Dropping stale read of {}", file.name);
            }
            return false;
        }
        self.accept_file(file)
    }

    /// Take a newly selected file.
    ///
    /// `None` (empty picker or drop) is a no-op. Selection is refused while
    /// a request is in flight, and the refusal is surfaced as a notice.
    /// Returns whether the file was taken.
    pub fn accept_file(&mut self, file: Option<SelectedFile>) -> bool {
        let Some(file) = file else {
            return false;
        };
        if self.state.is_analyzing() {
            log::warn!("Ignoring {} while an analysis is running", file.name);
            self.view.notice = Some(status::SELECTION_REFUSED.to_string());
            return false;
        }

        log::info!("🖼️ Selected {} ({})", file.name, file.mime_type);
        self.view.notice = None;
        self.view.preview = Some(file.data_url());
        self.view.status = status::READY.to_string();
        self.file = Some(file);
        self.state = UiState::FileReady;
        true
    }

    /// Enter `Analyzing` and hand back the file to submit.
    ///
    /// Returns `None` without touching anything when no file is selected
    /// or a request is already in flight.
    pub fn begin_analysis(&mut self) -> Option<SelectedFile> {
        if !self.analyze_enabled() {
            return None;
        }
        let file = self.file.clone()?;

        self.release_animation();
        self.view.panel = PanelVisibility::Hidden;
        self.start_loader();
        self.view.status = status::ANALYZING.to_string();
        self.state = UiState::Analyzing;
        Some(file)
    }

    /// Apply the outcome of the in-flight request.
    ///
    /// Returns `None` if nothing was in flight.
    pub fn complete(&mut self, outcome: AppResult<PredictionResult>) -> Option<Completion> {
        if !self.state.is_analyzing() {
            log::warn!("Dropping a prediction outcome with no analysis in flight");
            return None;
        }

        let completion = match outcome {
            Ok(result) => {
                self.render_result(result);
                Completion::Result
            }
            Err(AppError::Validation(message)) => {
                self.render_error(message);
                Completion::Rejected
            }
            Err(AppError::Transport(detail)) => {
                self.render_transport_failure(detail);
                Completion::TransportFailure
            }
        };
        Some(completion)
    }

    /// Show a classification and arm the confidence animation.
    pub fn render_result(&mut self, result: PredictionResult) {
        log::info!(
            "✅ {:?} at {:.2}%",
            result.label,
            result.confidence
        );
        self.release_animation();
        self.stop_loader();

        self.view.label = result.label.message().to_string();
        self.view.label_class = result.label.css_class();
        self.view.confidence = "Confidence: 0%".to_string();
        self.view.panel = PanelVisibility::Shown;
        self.view.status = status::COMPLETE.to_string();
        self.animation = Some(ConfidenceAnimation::new(result.confidence));
        self.state = UiState::ResultShown(result);
    }

    /// Show a rejection message in place of the label.
    pub fn render_error(&mut self, message: String) {
        log::warn!("⚠️ Image rejected: {}", message);
        self.release_animation();
        self.stop_loader();

        self.view.label = format!("⚠️ {}", message);
        self.view.label_class = "result-error";
        self.view.confidence.clear();
        self.view.panel = PanelVisibility::Visible;
        self.view.status = status::REJECTED.to_string();
        self.state = UiState::ErrorShown(AppError::Validation(message));
    }

    fn render_transport_failure(&mut self, detail: String) {
        log::error!("❌ Analysis failed: {}", detail);
        self.release_animation();
        self.stop_loader();

        self.view.status = status::TRANSPORT_FAILED.to_string();
        self.state = UiState::ErrorShown(AppError::Transport(detail));
    }

    /// Second step of the panel transition. Only a freshly shown result
    /// panel is affected.
    pub fn reveal_panel(&mut self) {
        if self.view.panel == PanelVisibility::Shown {
            self.view.panel = PanelVisibility::Visible;
        }
    }

    /// Advance the confidence animation by one tick.
    ///
    /// Returns whether more ticks are needed. The ticker handle is dropped
    /// once the target is reached.
    pub fn tick_animation(&mut self) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };

        let value = animation.tick();
        self.view.confidence = confidence_text(value);

        if animation.is_finished() {
            self.animation = None;
            self.ticker = None;
            false
        } else {
            true
        }
    }

    /// Register the task driving the animation, aborting any previous one.
    pub fn attach_ticker(&mut self, handle: AbortHandle) {
        if let Some(previous) = self.ticker.replace(handle) {
            previous.abort();
        }
    }

    /// Stop the animation task, if any.
    pub fn release_animation(&mut self) {
        self.animation = None;
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }

    /// Release every resource the controller holds.
    pub fn teardown(&mut self) {
        self.release_animation();
        self.stop_loader();
    }

    fn start_loader(&mut self) {
        self.stop_loader();
        self.loader.start();
        self.loader_running = true;
    }

    fn stop_loader(&mut self) {
        if self.loader_running {
            self.loader.destroy();
            self.loader_running = false;
        }
    }
}

impl<L: Loader> Drop for AnalyzeController<L> {
    fn drop(&mut self) {
        self.teardown();
    }
}

// =============================================================================
// Drivers
// =============================================================================

/// Run one analyze action against `client`.
///
/// Returns `None` when there was nothing to submit. The controller is not
/// borrowed across the request.
pub async fn submit_for_analysis<L, C>(
    controller: &RefCell<AnalyzeController<L>>,
    client: &C,
    on_change: impl Fn(ControllerView),
) -> Option<Completion>
where
    L: Loader,
    C: PredictClient,
{
    let file = controller.borrow_mut().begin_analysis()?;
    let view = controller.borrow().view();
    on_change(view);

    let outcome = request_prediction(client, &file).await;

    let completion = controller.borrow_mut().complete(outcome);
    let view = controller.borrow().view();
    on_change(view);
    completion
}

/// Build the task counting the confidence display up to its target.
///
/// The task's abort handle is registered with the controller before this
/// returns, so a later attempt or teardown stops it. `sleep` is the tick
/// timer.
pub fn confidence_animation<L, S, F>(
    controller: Rc<RefCell<AnalyzeController<L>>>,
    sleep: S,
    on_frame: impl Fn(ControllerView) + 'static,
) -> impl Future<Output = ()>
where
    L: Loader + 'static,
    S: Fn(u32) -> F + 'static,
    F: Future<Output = ()>,
{
    let driven = Rc::clone(&controller);
    let (task, handle) = abortable(async move {
        loop {
            sleep(CONFIDENCE_TICK_MS).await;
            let (running, view) = {
                let mut controller = driven.borrow_mut();
                let running = controller.tick_animation();
                (running, controller.view())
            };
            on_frame(view);
            if !running {
                break;
            }
        }
    });
    controller.borrow_mut().attach_ticker(handle);

    async move {
        let _ = task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::RawResponse;
    use crate::types::Diagnosis;
    use crate::DEFAULT_INVALID_IMAGE;
    use futures::executor::block_on;
    use std::cell::Cell;

    /// Loader that shows nothing.
    struct NoopLoader;

    impl Loader for NoopLoader {
        fn start(&mut self) {}
        fn destroy(&mut self) {}
    }

    #[derive(Default, Clone)]
    struct RecordingLoader {
        starts: Rc<Cell<u32>>,
        destroys: Rc<Cell<u32>>,
    }

    impl Loader for RecordingLoader {
        fn start(&mut self) {
            self.starts.set(self.starts.get() + 1);
        }
        fn destroy(&mut self) {
            self.destroys.set(self.destroys.get() + 1);
        }
    }

    struct FakeClient {
        reply: AppResult<RawResponse>,
        calls: Cell<u32>,
    }

    impl FakeClient {
        fn answering(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(RawResponse {
                    status,
                    body: body.to_string(),
                }),
                calls: Cell::new(0),
            }
        }

        fn unreachable() -> Self {
            Self {
                reply: Err(AppError::Transport("connection refused".into())),
                calls: Cell::new(0),
            }
        }
    }

    impl PredictClient for FakeClient {
        async fn post_image(&self, _file: &SelectedFile) -> AppResult<RawResponse> {
            self.calls.set(self.calls.get() + 1);
            self.reply.clone()
        }
    }

    fn scan() -> SelectedFile {
        SelectedFile::new("scan.png", "image/png", vec![0x89, 0x50, 0x4e, 0x47])
    }

    fn ready_controller() -> RefCell<AnalyzeController<RecordingLoader>> {
        let mut controller = AnalyzeController::new(RecordingLoader::default());
        assert!(controller.accept_file(Some(scan())));
        RefCell::new(controller)
    }

    fn run(
        controller: &RefCell<AnalyzeController<RecordingLoader>>,
        client: &FakeClient,
    ) -> Option<Completion> {
        block_on(submit_for_analysis(controller, client, |_| {}))
    }

    #[test]
    fn test_accept_file_enables_analysis() {
        let mut controller = AnalyzeController::new(NoopLoader);
        assert!(!controller.view().analyze_enabled);

        assert!(controller.accept_file(Some(scan())));
        assert_eq!(controller.state(), &UiState::FileReady);

        let view = controller.view();
        assert!(view.analyze_enabled);
        assert_eq!(view.status, status::READY);
        assert!(view.preview.unwrap().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_accept_nothing_is_noop() {
        let mut controller = AnalyzeController::new(NoopLoader);
        assert!(!controller.accept_file(None));
        assert_eq!(controller.state(), &UiState::Idle);
        assert_eq!(controller.view(), ControllerView::default());
    }

    #[test]
    fn test_new_file_replaces_previous() {
        let mut controller = AnalyzeController::new(NoopLoader);
        controller.accept_file(Some(scan()));
        controller.accept_file(Some(SelectedFile::new("other.jpg", "image/jpeg", vec![1])));
        assert_eq!(controller.selected_file().unwrap().name, "other.jpg");
    }

    #[test]
    fn test_stale_read_does_not_replace_latest_selection() {
        let mut controller = AnalyzeController::new(NoopLoader);
        let large = controller.begin_selection();
        let small = controller.begin_selection();

        assert!(controller.accept_selection(small, Some(scan())));
        assert!(!controller.accept_selection(
            large,
            Some(SelectedFile::new("large.jpg", "image/jpeg", vec![1; 64]))
        ));

        assert_eq!(controller.selected_file().unwrap().name, "scan.png");
        assert_eq!(controller.view().notice, None);
        assert_eq!(controller.view().status, status::READY);
    }

    #[test]
    fn test_read_finishing_during_analysis_is_refused_visibly() {
        let controller = ready_controller();
        let ticket = controller.borrow_mut().begin_selection();
        assert!(controller.borrow_mut().begin_analysis().is_some());

        let late = SelectedFile::new("late.png", "image/png", vec![2]);
        assert!(!controller.borrow_mut().accept_selection(ticket, Some(late)));

        let view = controller.borrow().view();
        assert_eq!(view.notice.as_deref(), Some(status::SELECTION_REFUSED));
        assert_eq!(view.status, status::ANALYZING);
        assert_eq!(controller.borrow().selected_file().unwrap().name, "scan.png");

        controller.borrow_mut().complete(Err(AppError::Transport("down".into())));
        let ticket = controller.borrow_mut().begin_selection();
        let again = SelectedFile::new("late.png", "image/png", vec![2]);
        assert!(controller.borrow_mut().accept_selection(ticket, Some(again)));
        assert_eq!(controller.borrow().view().notice, None);
    }

    #[test]
    fn test_submit_without_file_is_noop() {
        let controller = RefCell::new(AnalyzeController::new(RecordingLoader::default()));
        let client = FakeClient::answering(200, "{}");

        assert_eq!(run(&controller, &client), None);
        assert_eq!(client.calls.get(), 0);
        assert_eq!(controller.borrow().loader().starts.get(), 0);
        assert_eq!(controller.borrow().state(), &UiState::Idle);
    }

    #[test]
    fn test_analysis_disables_trigger_while_in_flight() {
        let controller = ready_controller();
        let views = RefCell::new(Vec::new());
        let client = FakeClient::answering(
            200,
            r#"{"prediction": "Brain Tumor Detected", "confidence": 92.5}"#,
        );

        block_on(submit_for_analysis(&controller, &client, |view| {
            views.borrow_mut().push(view)
        }));

        let views = views.into_inner();
        assert_eq!(views.len(), 2);
        assert!(!views[0].analyze_enabled);
        assert!(!views[0].upload_enabled);
        assert!(views[0].loading);
        assert_eq!(views[0].status, status::ANALYZING);
        assert_eq!(views[0].panel, PanelVisibility::Hidden);
        assert!(views[1].analyze_enabled);
        assert!(!views[1].loading);
    }

    #[test]
    fn test_second_begin_while_in_flight_is_refused() {
        let controller = ready_controller();
        assert!(controller.borrow_mut().begin_analysis().is_some());
        assert!(controller.borrow_mut().begin_analysis().is_none());
        assert!(!controller.borrow_mut().accept_file(Some(scan())));
        assert_eq!(controller.borrow().loader().starts.get(), 1);
    }

    #[test]
    fn test_tumor_result_renders_and_animates_to_target() {
        let controller = ready_controller();
        let client = FakeClient::answering(
            200,
            r#"{"prediction": "Brain Tumor Detected", "confidence": 92.5}"#,
        );

        assert_eq!(run(&controller, &client), Some(Completion::Result));

        let mut controller = controller.into_inner();
        let view = controller.view();
        assert_eq!(view.label, "🧠 Brain Tumor Detected (High Confidence)");
        assert_eq!(view.confidence, "Confidence: 0%");
        assert_eq!(view.panel, PanelVisibility::Shown);
        assert_eq!(view.status, status::COMPLETE);
        assert_eq!(controller.loader().destroys.get(), 1);

        let mut ticks = 0;
        while controller.tick_animation() {
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert_eq!(controller.view().confidence, "Confidence: 92.50%");
        assert!(!controller.is_animating());

        controller.reveal_panel();
        assert_eq!(controller.view().panel, PanelVisibility::Visible);
    }

    #[test]
    fn test_no_tumor_result() {
        let controller = ready_controller();
        let client = FakeClient::answering(200, r#"{"prediction": "No Tumor", "confidence": 13.2}"#);

        run(&controller, &client);

        let controller = controller.borrow();
        assert_eq!(controller.view().label, "✅ No Tumor Detected (Low Confidence)");
        assert_eq!(
            controller.state(),
            &UiState::ResultShown(PredictionResult::new(Diagnosis::NoTumor, 13.2))
        );
    }

    #[test]
    fn test_server_error_message() {
        let controller = ready_controller();
        let client = FakeClient::answering(400, r#"{"error": "bad file"}"#);

        assert_eq!(run(&controller, &client), Some(Completion::Rejected));

        let controller = controller.borrow();
        let view = controller.view();
        assert_eq!(view.label, "⚠️ bad file");
        assert_eq!(view.confidence, "");
        assert_eq!(view.panel, PanelVisibility::Visible);
        assert_eq!(view.status, status::REJECTED);
        assert!(view.analyze_enabled);
        assert!(!controller.is_animating());
    }

    #[test]
    fn test_server_error_default_message() {
        let controller = ready_controller();
        let client = FakeClient::answering(422, "{}");

        run(&controller, &client);

        assert_eq!(
            controller.borrow().view().label,
            format!("⚠️ {}", DEFAULT_INVALID_IMAGE)
        );
    }

    #[test]
    fn test_transport_failure_shows_generic_status() {
        let controller = ready_controller();
        let client = FakeClient::unreachable();

        assert_eq!(run(&controller, &client), Some(Completion::TransportFailure));

        let controller = controller.borrow();
        let view = controller.view();
        assert_eq!(view.status, status::TRANSPORT_FAILED);
        assert!(view.analyze_enabled);
        assert!(!view.loading);
        assert!(matches!(controller.state(), UiState::ErrorShown(AppError::Transport(_))));
    }

    #[test]
    fn test_reanalyze_after_each_outcome() {
        let controller = ready_controller();
        let clients = [
            FakeClient::answering(200, r#"{"prediction": "No Tumor", "confidence": "40"}"#),
            FakeClient::answering(400, r#"{"error": "bad file"}"#),
            FakeClient::unreachable(),
            FakeClient::answering(200, r#"{"prediction": "No Tumor", "confidence": 40}"#),
        ];

        for client in &clients {
            assert!(run(&controller, client).is_some());
            assert!(controller.borrow().view().analyze_enabled);
        }

        let controller = controller.borrow();
        assert_eq!(controller.loader().starts.get(), 4);
        assert_eq!(controller.loader().destroys.get(), 4);
    }

    #[test]
    fn test_animation_is_monotonic_and_exact() {
        for target in [0.0, 13.2, 55.55, 92.5, 100.0] {
            let mut animation = ConfidenceAnimation::new(target);
            let mut previous = 0.0;
            while !animation.is_finished() {
                let value = animation.tick();
                assert!(value >= previous);
                assert!(value <= target);
                previous = value;
            }
            assert_eq!(animation.current(), target);
            assert_eq!(animation.tick(), target);
        }
    }

    #[test]
    fn test_animation_task_runs_to_completion() {
        let controller = ready_controller();
        let client = FakeClient::answering(200, r#"{"prediction": "No Tumor", "confidence": 13.2}"#);
        run(&controller, &client);

        let controller = Rc::new(controller);
        let frames = Rc::new(RefCell::new(Vec::new()));
        let recorded = Rc::clone(&frames);
        let task = confidence_animation(
            Rc::clone(&controller),
            |_| futures::future::ready(()),
            move |view| recorded.borrow_mut().push(view.confidence),
        );
        block_on(task);

        let frames = frames.borrow();
        assert_eq!(frames.last().map(String::as_str), Some("Confidence: 13.20%"));
        assert!(!controller.borrow().is_animating());
    }

    #[test]
    fn test_new_attempt_aborts_running_animation() {
        let controller = ready_controller();
        let client = FakeClient::answering(200, r#"{"prediction": "No Tumor", "confidence": 80}"#);
        run(&controller, &client);

        let controller = Rc::new(controller);
        let frames = Rc::new(Cell::new(0u32));
        let counted = Rc::clone(&frames);
        let task = confidence_animation(
            Rc::clone(&controller),
            |_| futures::future::ready(()),
            move |_| counted.set(counted.get() + 1),
        );

        assert!(controller.borrow_mut().begin_analysis().is_some());
        assert!(!controller.borrow().is_animating());

        block_on(task);
        assert_eq!(frames.get(), 0);
    }

    #[test]
    fn test_drop_releases_loader() {
        let loader = RecordingLoader::default();
        let destroys = Rc::clone(&loader.destroys);
        {
            let mut controller = AnalyzeController::new(loader);
            controller.accept_file(Some(scan()));
            controller.begin_analysis();
        }
        assert_eq!(destroys.get(), 1);
    }
}

//! tokio host loop for a [`WidgetState`].
//!
//! [`Widget`] turns actions into effects: timers and remote calls become
//! spawned tasks whose outcomes are fed back as events through an unbounded
//! channel. The caller pulls events with [`Widget::next_event`] and hands
//! them (together with its own input events) to [`Widget::process`].
//!
//! Everything runs on the caller's runtime; a `current_thread` runtime is
//! enough since all state is mutated from the task that owns the `Widget`.

use super::alerts::AlertSink;
use crate::api::SkillApi;
use crate::app::{handle_event, Action, Event, TimerKind, WidgetState};
use crate::ui::viewmodel::WidgetViewModel;
use crate::worker::{SearchWorker, WorkerMessage};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct Widget {
    state: WidgetState,
    worker: SearchWorker,
    alerts: Arc<dyn AlertSink>,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    timers: HashMap<TimerKind, JoinHandle<()>>,
    in_flight: Vec<JoinHandle<()>>,
}

impl std::fmt::Debug for Widget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Widget")
            .field("state", &self.state)
            .field("timers", &self.timers.keys().collect::<Vec<_>>())
            .field("in_flight", &self.in_flight.len())
            .finish_non_exhaustive()
    }
}

impl Widget {
    #[must_use]
    pub fn new(state: WidgetState, api: Arc<dyn SkillApi>, alerts: Arc<dyn AlertSink>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state,
            worker: SearchWorker::new(api),
            alerts,
            events_tx,
            events_rx,
            timers: HashMap::new(),
            in_flight: Vec::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &WidgetState {
        &self.state
    }

    #[must_use]
    pub fn viewmodel(&self) -> WidgetViewModel {
        self.state.compute_viewmodel()
    }

    /// Waits for the next timer, worker or injected event.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.events_rx.recv().await
    }

    /// Runs `event` through the handler and executes the resulting actions.
    ///
    /// Returns whether the host should re-render. Rejected events are logged
    /// and otherwise ignored.
    pub fn process(&mut self, event: Event) -> bool {
        match handle_event(&mut self.state, &event) {
            Ok((render, actions)) => {
                for action in actions {
                    self.execute(action);
                }
                render
            }
            Err(e) => {
                tracing::debug!(error = %e, "event rejected");
                false
            }
        }
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::StartTimer { timer, delay } => {
                let tx = self.events_tx.clone();
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(Event::TimerElapsed(timer));
                });
                if let Some(previous) = self.timers.insert(timer.kind, handle) {
                    previous.abort();
                }
            }
            Action::CancelTimer(kind) => {
                if let Some(handle) = self.timers.remove(&kind) {
                    handle.abort();
                }
            }
            Action::PostToWorker(message) => self.spawn_worker(message),
            Action::ShowAlert(alert) => self.alerts.alert(&alert),
        }
    }

    fn spawn_worker(&mut self, message: WorkerMessage) {
        self.in_flight.retain(|task| !task.is_finished());

        let worker = self.worker.clone();
        let tx = self.events_tx.clone();
        self.in_flight.push(tokio::spawn(async move {
            let response = worker.handle_message(message).await;
            let _ = tx.send(Event::WorkerResponse(response));
        }));
    }

    /// Number of worker tasks still running.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.iter().filter(|task| !task.is_finished()).count()
    }

    /// Stops every timer and aborts in-flight calls. Later events are no-ops.
    pub fn teardown(&mut self) {
        if self.state.destroyed {
            return;
        }
        self.process(Event::Teardown);
        self.abort_all();
        while self.events_rx.try_recv().is_ok() {}
    }

    fn abort_all(&mut self) {
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
        for task in self.in_flight.drain(..) {
            task.abort();
        }
    }

    /// Processes events until none arrives for `quiet`.
    ///
    /// Convenient for hosts without their own input loop.
    pub async fn settle(&mut self, quiet: Duration) -> bool {
        let mut render = false;
        while let Ok(Some(event)) = tokio::time::timeout(quiet, self.next_event()).await {
            render |= self.process(event);
        }
        render
    }
}

impl Drop for Widget {
    fn drop(&mut self) {
        self.abort_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Alert, NoRegions};
    use crate::domain::error::{Result, SkillSearchError};
    use crate::domain::{Category, Location, SearchQuery, SkillDetail, SkillImage, SkillSummary};
    use crate::{initialize, Config};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::time::Instant;

    /// Records every search; "plu" answers slowly, everything else quickly.
    #[derive(Default)]
    struct RecordingApi {
        searches: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingApi {
        fn searched(&self) -> Vec<String> {
            self.searches.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SkillApi for RecordingApi {
        async fn search(&self, query: &SearchQuery) -> Result<Vec<SkillSummary>> {
            self.searches.lock().unwrap().push(query.text.clone());
            let delay = if query.text == "plu" { 2000 } else { 100 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            if self.fail {
                return Err(SkillSearchError::Http { status: 500 });
            }
            Ok(vec![SkillSummary {
                id: format!("{}-1", query.text),
                name: query.text.clone(),
                image: String::new(),
            }])
        }
        async fn skill(&self, _id: &str) -> Result<SkillDetail> {
            Ok(SkillDetail::default())
        }
        async fn skill_images(&self, _id: &str) -> Result<Vec<SkillImage>> {
            Ok(vec![])
        }
        async fn categories(&self) -> Result<Vec<Category>> {
            Ok(vec![])
        }
        async fn locations(&self) -> Result<Vec<Location>> {
            Ok(vec![])
        }
    }

    #[derive(Default)]
    struct RecordingAlerts(Mutex<Vec<Alert>>);

    impl AlertSink for RecordingAlerts {
        fn alert(&self, alert: &Alert) {
            self.0.lock().unwrap().push(alert.clone());
        }
    }

    fn widget(api: Arc<RecordingApi>, alerts: Arc<RecordingAlerts>) -> Widget {
        let state = initialize(&Config::default(), Arc::new(NoRegions));
        Widget::new(state, api, alerts)
    }

    async fn drive(widget: &mut Widget, span: Duration) {
        let deadline = Instant::now() + span;
        while let Ok(Some(event)) = tokio::time::timeout_at(deadline, widget.next_event()).await {
            widget.process(event);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn settled_text_searches_once() {
        let api = Arc::new(RecordingApi::default());
        let mut widget = widget(api.clone(), Arc::default());

        widget.process(Event::TextChanged("plu".into()));
        drive(&mut widget, Duration::from_secs(5)).await;

        assert_eq!(api.searched(), vec!["plu"]);
    }

    #[tokio::test(start_paused = true)]
    async fn typing_within_window_searches_latest_only() {
        let api = Arc::new(RecordingApi::default());
        let mut widget = widget(api.clone(), Arc::default());

        widget.process(Event::TextChanged("plu".into()));
        drive(&mut widget, Duration::from_millis(200)).await;
        widget.process(Event::TextChanged("plum".into()));
        drive(&mut widget, Duration::from_secs(5)).await;

        assert_eq!(api.searched(), vec!["plum"]);
        assert_eq!(widget.state().coordinator.results().items[0].name, "plum");
    }

    #[tokio::test(start_paused = true)]
    async fn slow_stale_response_is_dropped() {
        let api = Arc::new(RecordingApi::default());
        let mut widget = widget(api.clone(), Arc::default());

        widget.process(Event::TextChanged("plu".into()));
        drive(&mut widget, Duration::from_millis(600)).await;
        widget.process(Event::TextChanged("plum".into()));
        drive(&mut widget, Duration::from_secs(5)).await;

        assert_eq!(api.searched(), vec!["plu", "plum"]);
        let results = widget.state().coordinator.results();
        assert_eq!(results.items.len(), 1);
        assert_eq!(results.items[0].name, "plum");
        assert!(!results.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_raises_one_alert() {
        let api = Arc::new(RecordingApi {
            fail: true,
            ..Default::default()
        });
        let alerts = Arc::new(RecordingAlerts::default());
        let mut widget = widget(api, alerts.clone());

        widget.process(Event::TextChanged("tiles".into()));
        drive(&mut widget, Duration::from_secs(5)).await;

        assert_eq!(*alerts.0.lock().unwrap(), vec![Alert::results_failed()]);
        assert!(!widget.state().coordinator.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_stops_pending_search() {
        let api = Arc::new(RecordingApi::default());
        let mut widget = widget(api.clone(), Arc::default());

        widget.process(Event::TextChanged("plumb".into()));
        widget.teardown();
        drive(&mut widget, Duration::from_secs(5)).await;

        assert!(api.searched().is_empty());
        assert!(!widget.process(Event::TextChanged("again".into())));
        assert_eq!(widget.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_aborts_in_flight_calls() {
        let api = Arc::new(RecordingApi::default());
        let mut widget = widget(api.clone(), Arc::default());

        widget.process(Event::TextChanged("plu".into()));
        drive(&mut widget, Duration::from_millis(600)).await;
        assert_eq!(widget.in_flight(), 1);

        widget.teardown();
        drive(&mut widget, Duration::from_secs(5)).await;
        assert_eq!(widget.state().coordinator.results().items.len(), 0);
    }
}

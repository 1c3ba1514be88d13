// App shell: owns the picker, forwards UI events into it, sends the searches
// it asks for, and draws frames + the search panel every frame.

use eframe::{egui, App};
use std::sync::Arc;
use std::time::Instant;

use crate::picker::FramePicker;
use crate::search::SearchBackend;
use crate::views::{draw_frames, draw_search_panel, PickerEvent};

pub mod config;
mod fetch;
mod images;
mod logs_ui;
mod runtime;

pub use images::ImageCache;
pub use runtime::rt;
use fetch::NetState;

pub struct FramePickerApp {
    picker: FramePicker,
    backend: Arc<dyn SearchBackend>,
    net: NetState,
    images: ImageCache,
    // Results generation the view last scrolled to
    revealed_generation: u64,
}

impl FramePickerApp {
    pub fn new(picker: FramePicker, backend: Arc<dyn SearchBackend>) -> Self {
        let revealed_generation = picker.results_generation();
        Self {
            picker,
            backend,
            net: NetState::new(),
            images: ImageCache::new(),
            revealed_generation,
        }
    }

    fn handle_event(&mut self, ctx: &egui::Context, event: PickerEvent) {
        match event {
            PickerEvent::ActivateSlot(idx) => self.picker.activate_slot(idx),
            PickerEvent::QueryChanged(text) => {
                let now = Instant::now();
                self.picker.on_query_change(text, now);
                // Wake up when the quiet period ends so the search can fire
                if let Some(wait) = self.picker.pending_search_in(now) {
                    ctx.request_repaint_after(wait);
                }
            }
            PickerEvent::Submit => {
                if let Some(req) = self.picker.on_submit() {
                    self.start_search(ctx, req);
                }
            }
            PickerEvent::Select(result) => self.picker.select_result(&result),
        }
    }

    /// Fire the debounced search if due, otherwise keep a repaint scheduled for it.
    fn drive_debounce(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if let Some(req) = self.picker.poll(now) {
            self.start_search(ctx, req);
        } else if let Some(wait) = self.picker.pending_search_in(now) {
            ctx.request_repaint_after(wait);
        }
    }
}

impl App for FramePickerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if crate::logger::take_new_flag() {
            ctx.request_repaint();
        }

        self.poll_incoming(ctx);
        self.drive_debounce(ctx);
        self.schedule_image_downloads(ctx);

        let focus = self.picker.take_focus_request();
        let generation = self.picker.results_generation();
        let reveal = generation != self.revealed_generation;
        self.revealed_generation = generation;

        let mut events: Vec<PickerEvent> = Vec::new();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Frames");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Logs").clicked() {
                        logs_ui::open_logs();
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add_space(crate::ui_constants::spacing::MEDIUM);
                    draw_frames(
                        ui,
                        self.picker.slots(),
                        self.picker.active_slot(),
                        &self.images,
                        &mut events,
                    );
                    if self.picker.active_slot().is_some() {
                        draw_search_panel(
                            ui,
                            self.picker.session(),
                            &self.images,
                            focus,
                            reveal,
                            &mut events,
                        );
                    }
                });
        });

        for event in events {
            self.handle_event(ctx, event);
        }

        logs_ui::draw_logs_viewport(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{SearchError, SearchResult};
    use crate::types::{SearchStatus, StalePolicy};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Answers every query with canned results and records what it was asked.
    struct FakeBackend {
        results: Vec<SearchResult>,
        fail: bool,
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SearchBackend for FakeBackend {
        async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
            self.queries.lock().unwrap().push(query.to_string());
            if self.fail {
                Err(SearchError::Status {
                    status: 503,
                    url: "fake".to_string(),
                })
            } else {
                Ok(self.results.clone())
            }
        }

        fn describe(&self) -> String {
            "fake".to_string()
        }
    }

    fn hit(id: &str) -> SearchResult {
        SearchResult {
            id: id.to_string(),
            name: id.to_uppercase(),
            icon_url: String::new(),
            original_url: format!("http://img/{id}.png"),
        }
    }

    fn app_with(backend: Arc<FakeBackend>) -> FramePickerApp {
        let picker = FramePicker::new(5, Duration::from_secs(2), StalePolicy::LastArrived);
        FramePickerApp::new(picker, backend)
    }

    fn wait_until_settled(app: &mut FramePickerApp, ctx: &egui::Context) {
        for _ in 0..200 {
            app.poll_incoming(ctx);
            if app.picker.status() != SearchStatus::Searching {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("search never completed");
    }

    #[test]
    fn submit_searches_and_select_fills_the_slot() {
        let backend = Arc::new(FakeBackend {
            results: vec![hit("a"), hit("b")],
            fail: false,
            queries: Mutex::new(Vec::new()),
        });
        let mut app = app_with(backend.clone());
        let ctx = egui::Context::default();

        app.handle_event(&ctx, PickerEvent::ActivateSlot(1));
        app.handle_event(&ctx, PickerEvent::QueryChanged("zelda".to_string()));
        app.handle_event(&ctx, PickerEvent::Submit);
        assert_eq!(app.picker.status(), SearchStatus::Searching);

        wait_until_settled(&mut app, &ctx);
        assert_eq!(app.picker.status(), SearchStatus::Results);
        assert_eq!(*backend.queries.lock().unwrap(), vec!["zelda".to_string()]);

        app.handle_event(&ctx, PickerEvent::Select(hit("b")));
        assert_eq!(app.picker.slots()[1].as_deref(), Some("http://img/b.png"));
        assert_eq!(app.picker.active_slot(), None);
    }

    #[test]
    fn backend_failure_shows_error_status() {
        let backend = Arc::new(FakeBackend {
            results: Vec::new(),
            fail: true,
            queries: Mutex::new(Vec::new()),
        });
        let mut app = app_with(backend);
        let ctx = egui::Context::default();

        app.handle_event(&ctx, PickerEvent::ActivateSlot(0));
        app.handle_event(&ctx, PickerEvent::QueryChanged("metroid".to_string()));
        app.handle_event(&ctx, PickerEvent::Submit);
        wait_until_settled(&mut app, &ctx);
        assert_eq!(app.picker.status(), SearchStatus::Error);
    }

    #[test]
    fn typing_alone_sends_nothing_before_the_quiet_period() {
        let backend = Arc::new(FakeBackend {
            results: vec![hit("a")],
            fail: false,
            queries: Mutex::new(Vec::new()),
        });
        let mut app = app_with(backend.clone());
        let ctx = egui::Context::default();

        app.handle_event(&ctx, PickerEvent::ActivateSlot(0));
        app.handle_event(&ctx, PickerEvent::QueryChanged("kirby".to_string()));
        app.drive_debounce(&ctx);
        assert_eq!(app.picker.status(), SearchStatus::Idle);
        assert!(backend.queries.lock().unwrap().is_empty());
    }
}

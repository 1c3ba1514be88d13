use eframe::egui;
use std::sync::mpsc;

use super::rt;
use crate::picker::SearchRequest;
use crate::search::{SearchError, SearchResult};

pub(super) type SearchOutcome = (u64, Result<Vec<SearchResult>, SearchError>);

pub(super) struct NetState {
    pub tx: mpsc::Sender<SearchOutcome>,
    pub rx: mpsc::Receiver<SearchOutcome>,
}

impl NetState {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }
}

fn failure_line(endpoint: &str, query: &str, err: &SearchError) -> String {
    format!("Search failed at {endpoint} (query {query:?}): {err}")
}

impl super::FramePickerApp {
    /// Send one search to the backend. Nothing in flight is ever cancelled;
    /// the picker decides what to do with late answers.
    pub(super) fn start_search(&self, ctx: &egui::Context, req: SearchRequest) {
        let backend = std::sync::Arc::clone(&self.backend);
        let tx = self.net.tx.clone();
        let ctx2 = ctx.clone();
        ctx.request_repaint();

        rt().spawn(async move {
            let res = backend.search(&req.query).await;
            if let Err(err) = &res {
                log::error!("{}", failure_line(&backend.describe(), &req.query, err));
            }
            let _ = tx.send((req.id, res));
            ctx2.request_repaint();
        });
    }

    /// Apply finished searches and upload finished images.
    pub(super) fn poll_incoming(&mut self, ctx: &egui::Context) {
        while let Ok((id, res)) = self.net.rx.try_recv() {
            self.picker.apply_response(id, res);
        }
        self.images.poll(ctx);
    }

    /// Make sure every picture currently on screen is loaded or loading.
    pub(super) fn schedule_image_downloads(&mut self, ctx: &egui::Context) {
        let urls: Vec<String> = self
            .picker
            .slots()
            .iter()
            .flatten()
            .cloned()
            .chain(
                self.picker
                    .active_slot()
                    .into_iter()
                    .flat_map(|_| self.picker.session().results.iter())
                    .map(|r| r.icon_url.clone()),
            )
            .collect();
        for url in urls {
            self.images.request(ctx, &url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_line_names_the_endpoint() {
        let err = SearchError::Unavailable("connection refused".to_string());
        let line = failure_line("http://localhost:5000/api/search", "zelda", &err);
        assert_eq!(
            line,
            "Search failed at http://localhost:5000/api/search (query \"zelda\"): \
             search service unavailable: connection refused"
        );
    }
}

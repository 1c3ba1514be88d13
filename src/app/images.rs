// Texture cache for result thumbnails and frame pictures, keyed by URL.
// Downloads run on the tokio runtime; decoded pixels come back over a channel
// and are uploaded as textures on the UI thread. Memory only, process lifetime.

use eframe::egui;
use std::collections::{HashMap, HashSet};
use std::sync::mpsc;

use crate::search::{fetch_image, ImageData};

pub enum ImageMsg {
    Ok { url: String, data: ImageData },
    Err { url: String },
}

pub struct ImageCache {
    textures: HashMap<String, egui::TextureHandle>,
    loading: HashSet<String>,
    failed: HashSet<String>,
    tx: mpsc::Sender<ImageMsg>,
    rx: mpsc::Receiver<ImageMsg>,
}

impl ImageCache {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            textures: HashMap::new(),
            loading: HashSet::new(),
            failed: HashSet::new(),
            tx,
            rx,
        }
    }

    pub fn get(&self, url: &str) -> Option<&egui::TextureHandle> {
        self.textures.get(url)
    }

    pub fn is_loading(&self, url: &str) -> bool {
        self.loading.contains(url)
    }

    pub fn has_failed(&self, url: &str) -> bool {
        self.failed.contains(url)
    }

    /// Marks `url` as loading and returns true if nobody fetched it yet.
    /// Failed URLs are not retried.
    fn claim(&mut self, url: &str) -> bool {
        if url.is_empty()
            || self.textures.contains_key(url)
            || self.loading.contains(url)
            || self.failed.contains(url)
        {
            return false;
        }
        self.loading.insert(url.to_string());
        true
    }

    /// Start downloading `url` unless it is cached, in flight or known bad.
    pub fn request(&mut self, ctx: &egui::Context, url: &str) {
        if !self.claim(url) {
            return;
        }
        let url = url.to_string();
        let tx = self.tx.clone();
        let ctx2 = ctx.clone();
        super::rt().spawn(async move {
            let msg = match fetch_image(&url).await {
                Ok(data) => ImageMsg::Ok { url, data },
                Err(err) => {
                    log::warn!("image fetch failed: url={url} err={err}");
                    ImageMsg::Err { url }
                }
            };
            let _ = tx.send(msg);
            ctx2.request_repaint();
        });
    }

    /// Upload finished downloads as textures.
    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                ImageMsg::Ok { url, data } => {
                    let image = egui::ColorImage::from_rgba_unmultiplied(data.size(), &data.rgba);
                    let tex = ctx.load_texture(
                        format!("img_{url}"),
                        image,
                        egui::TextureOptions::LINEAR,
                    );
                    self.loading.remove(&url);
                    log::debug!("image ok: {url} {}x{}", data.width, data.height);
                    self.textures.insert(url, tex);
                }
                ImageMsg::Err { url } => {
                    self.loading.remove(&url);
                    self.failed.insert(url);
                }
            }
        }
    }

    #[cfg(test)]
    fn sender(&self) -> mpsc::Sender<ImageMsg> {
        self.tx.clone()
    }
}

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // no console window in release
// Entry point: logger, config, window options, then hand over to the app shell.

use std::sync::Arc;

use eframe::egui;

mod app;
mod logger;
mod picker;
mod search;
mod types;
mod ui_constants;
mod views;

use search::{HttpSearchBackend, SearchBackend, UnavailableBackend};

fn main() -> eframe::Result<()> {
    logger::init();
    app::config::load_config_from_disk();

    let (picker, backend) = app::config::with_config(|cfg| {
        let backend: Arc<dyn SearchBackend> = match HttpSearchBackend::from_config(cfg) {
            Ok(b) => {
                log::info!("Search service: {}", b.describe());
                Arc::new(b)
            }
            Err(e) => {
                log::error!("Cannot resolve search service origin: {e}");
                Arc::new(UnavailableBackend::new(e.to_string()))
            }
        };
        (picker::FramePicker::from_config(cfg), backend)
    });

    let wgpu_options = eframe::egui_wgpu::WgpuConfiguration {
        present_mode: eframe::wgpu::PresentMode::AutoVsync,
        ..Default::default()
    };
    let native_options = eframe::NativeOptions {
        renderer: eframe::Renderer::Wgpu,
        hardware_acceleration: eframe::HardwareAcceleration::Preferred,
        wgpu_options,
        viewport: egui::ViewportBuilder::default()
            .with_title("Frame Picker")
            .with_inner_size([960.0, 640.0])
            .with_resizable(true),
        ..Default::default()
    };

    let res = eframe::run_native(
        "Frame Picker",
        native_options,
        Box::new(move |_cc| Box::new(app::FramePickerApp::new(picker, backend))),
    );
    if let Err(ref e) = res {
        log::error!("eframe::run_native failed: {e}");
    }
    res
}

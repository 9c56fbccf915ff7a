mod app;
mod storage;

use app::SubtractApp;
use eframe::egui;
use storage::ConfigStore;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = ConfigStore::new().load_or_default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([400.0, 220.0])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        &config.title(),
        options,
        Box::new(move |cc| Ok(Box::new(SubtractApp::new(cc, config)))),
    )
}

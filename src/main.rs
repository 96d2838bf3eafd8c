use eframe::egui;

use truthdare_client::app::TruthDareApp;
use truthdare_client::logging::init_tracing;

fn main() -> eframe::Result<()> {
    init_tracing();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Truth or Dare")
            .with_inner_size([1000.0, 680.0])
            .with_min_inner_size([520.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Truth or Dare",
        options,
        Box::new(|cc| Ok(Box::new(TruthDareApp::new(cc)))),
    )
}

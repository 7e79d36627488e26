#![cfg(not(target_arch = "wasm32"))]

use tracing_subscriber::EnvFilter;

use crate::create_app;
use crate::panels::APP_TITLE;

/// Log to stderr, honouring `RUST_LOG` and defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Entry point used by the native executable.
pub fn run() -> eframe::Result<()> {
    init_tracing();

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1100.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        native_options,
        Box::new(|cc| Ok(Box::new(create_app(cc)?))),
    )
}

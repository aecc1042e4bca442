mod app;
mod config;
mod error;
mod feeds;
mod fetcher;
mod fonts;
mod headline;
mod platform;
mod settings;
mod settings_panel;
mod storage;
mod style;
mod ticker;
mod tray;

use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticky=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::default();
    let paths = storage::Paths::locate();
    tracing::info!("Using data directory {}", paths.root().display());
    storage::ensure_dir(paths.root());
    storage::ensure_dir(&paths.fonts_dir());
    storage::ensure_dir(&paths.assets_dir());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(platform::WINDOW_TITLE)
            .with_inner_size([config.window_width, config.window_height])
            .with_position([config.window_x, config.window_y])
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top(),
        ..Default::default()
    };

    eframe::run_native(
        platform::WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(app::TickerApp::new(cc, config, paths)))),
    )
}

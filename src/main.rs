mod app;
mod commands;
mod config;
mod content;
mod page;
mod signal;
mod theme;
mod util;

use clap::Parser;

use crate::config::{Args, Config};

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = Config::from(Args::parse());
    log::info!(
        "starting with theme {}, signals {}",
        config.theme.label(),
        if config.signals_enabled { "on" } else { "off" }
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        "silicon-folio",
        options,
        Box::new(move |cc| Ok(Box::new(app::PortfolioApp::new(cc, config)))),
    )
}

#![warn(clippy::all, rust_2018_idioms)]

use tubemap_editor::{EditorConfig, TubeMapApp};

/// Path of an optional JSON configuration file
const CONFIG_ENV: &str = "TUBEMAP_CONFIG";

fn config_from_env() -> Option<EditorConfig> {
    let path = std::env::var_os(CONFIG_ENV)?;
    match EditorConfig::load(&path) {
        Ok(config) => {
            log::info!("Loaded configuration from {}", path.to_string_lossy());
            Some(config)
        }
        Err(err) => {
            log::error!("Failed to load configuration from {}: {}", path.to_string_lossy(), err);
            None
        }
    }
}

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = config_from_env();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tube Map Editor",
        native_options,
        Box::new(move |cc| Ok(Box::new(TubeMapApp::new(cc, config)))),
    )
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Orca Studio - game engine editor shell.
//!
//! A welcome screen creates, opens or reopens `.orca` projects. An open
//! project is shown in a docked editor with:
//! - Scene viewport drawing a rotating cube through OpenGL 3.3
//! - Hierarchy, Project and Inspector panels
//! - Console fed by the tracing subscriber
//!
//! ## Architecture
//!
//! winit owns the event loop, glutin provides the GL context and
//! `egui_glow` paints the UI. Panels are docked with `egui_dock`. The
//! viewport renderer lives in the `orca_studio_viewport` crate.

mod app;
mod editor;
mod menus;
mod panel_types;
mod panels;
mod project;
mod recent;
mod settings;
mod state;
mod theme;
mod welcome;

use app::EditorApp;
use panels::console::TracingBridge;
use settings::{SettingsStore, StudioSettings};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "orca_studio_app=debug,orca_studio_viewport=debug";

/// Pick the log filter: `RUST_LOG` first, then the settings file, then the
/// built-in default. Unparsable candidates are skipped.
fn env_filter(env: Option<String>, configured: Option<&str>) -> EnvFilter {
    env.as_deref()
        .into_iter()
        .chain(configured)
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn main() {
    let settings_path = StudioSettings::default_path();
    let (settings, settings_error) = match settings_path.as_deref().map(StudioSettings::load_from) {
        Some(Ok(settings)) => (settings, None),
        Some(Err(e)) => (StudioSettings::default(), Some(e)),
        None => (StudioSettings::default(), None),
    };

    // Create the console tracing bridge (channel pair)
    let (bridge_layer, tracing_rx) = TracingBridge::new();

    let filter = env_filter(
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
        settings.log_filter.as_deref(),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(bridge_layer)
        .init();

    tracing::info!("Starting Orca Studio v{}", env!("CARGO_PKG_VERSION"));

    match (&settings_path, settings_error) {
        (Some(path), Some(e)) => {
            tracing::warn!("Ignoring unreadable settings at {}: {e}", path.display());
        }
        (None, _) => tracing::warn!("No config directory; recent projects will not be saved"),
        _ => {}
    }

    let store = SettingsStore::new(settings_path, settings);
    if let Err(e) = EditorApp::run(store, Some(tracing_rx)) {
        tracing::error!("Studio crashed: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_prefers_environment() {
        let filter = env_filter(Some("warn".into()), Some("trace"));
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn test_env_filter_falls_back_to_settings() {
        let filter = env_filter(None, Some("info"));
        assert_eq!(filter.to_string(), "info");

        let filter = env_filter(Some("orca=bogus".into()), Some("error"));
        assert_eq!(filter.to_string(), "error");
    }

    #[test]
    fn test_env_filter_default() {
        let filter = env_filter(None, None).to_string();
        assert!(filter.contains("orca_studio_app=debug"));
        assert!(filter.contains("orca_studio_viewport=debug"));
    }
}

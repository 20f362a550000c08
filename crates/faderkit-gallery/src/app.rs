//! Gallery application state and window layout.

use std::path::{Path, PathBuf};

use egui::{CentralPanel, Context, ScrollArea, TopBottomPanel};
use faderkit_config::{ConfigError, FaderkitConfig, user_config_path};
use faderkit_widgets::{Theme, install_feel};

use crate::pages::{self, Page};
use crate::values::Values;

/// Startup options, usually from the command line.
#[derive(Debug, Clone)]
pub struct GallerySettings {
    /// Config file; the user config path when `None`.
    pub config_path: Option<PathBuf>,
    /// Number of sequencer steps.
    pub pattern_length: usize,
    /// Frequency of the scope test tone in Hz.
    pub scope_hz: f32,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            config_path: None,
            pattern_length: 16,
            scope_hz: 110.0,
        }
    }
}

/// Load the config at `path` (or the user config), falling back to the
/// defaults when it cannot be read or fails validation.
pub fn load_config(path: Option<&Path>) -> FaderkitConfig {
    let path = path.map_or_else(user_config_path, Path::to_path_buf);
    match FaderkitConfig::load_or_default(&path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "config loaded");
            config
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "config rejected, using defaults");
            FaderkitConfig::default()
        }
    }
}

/// Write `config` to `path` (or the user config path) and return where it
/// went. Missing directories are created.
pub fn write_config(path: Option<&Path>, config: &FaderkitConfig) -> Result<PathBuf, ConfigError> {
    let path = path.map_or_else(user_config_path, Path::to_path_buf);
    config.save(&path)?;
    tracing::info!(path = %path.display(), "config written");
    Ok(path)
}

/// Main application state.
pub struct GalleryApp {
    values: Values,
    pages: Vec<Box<dyn Page>>,
    current: usize,
}

impl GalleryApp {
    /// Create the gallery, installing the configured theme and feel.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: GallerySettings) -> Self {
        let config = load_config(settings.config_path.as_deref());
        Theme::from_tokens(&config.theme).apply(&cc.egui_ctx);
        install_feel(&cc.egui_ctx, config.feel.feel());

        Self {
            values: Values::new(&settings, &config),
            pages: pages::all(),
            current: 0,
        }
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("faderkit");
            ui.separator();
            for (i, page) in self.pages.iter().enumerate() {
                if ui.selectable_label(i == self.current, page.name()).clicked() {
                    tracing::debug!(page = page.name(), "page selected");
                    self.current = i;
                }
            }
        });
    }
}

impl eframe::App for GalleryApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.values.tick(ctx.input(|i| i.time));
        // The sequencer playhead follows the clock on every page
        if self.values.animation.is_running() {
            ctx.request_repaint();
        }

        TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_header(ui);
            ui.add_space(4.0);
        });

        TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.add_space(2.0);
            ui.label(self.values.status());
            ui.add_space(2.0);
        });

        CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                if let Some(page) = self.pages.get_mut(self.current) {
                    page.ui(ui, &mut self.values);
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_gives_defaults() {
        let config = load_config(Some(Path::new("/nonexistent/faderkit/config.toml")));
        assert_eq!(config, FaderkitConfig::default());
    }

    #[test]
    fn written_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = FaderkitConfig::default();
        config.feel.sensitivity = 0.01;

        let written = write_config(Some(&path), &config).unwrap();
        assert_eq!(written, path);
        assert_eq!(load_config(Some(&path)), config);
    }
}

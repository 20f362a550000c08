//! Integration tests for faderkit-config.
//!
//! Round-trips config files through the filesystem and checks the values
//! arrive in the core interaction types.

use faderkit_config::{ConfigError, FaderkitConfig, Rgb, ValidationError};
use faderkit_core::{Bounds, Control, PadGridControl, PointerEvent, WaveSelection};
use tempfile::TempDir;

#[test]
fn save_then_load_preserves_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = FaderkitConfig::default();
    config.theme.accent = Rgb::new(255, 128, 0);
    config.feel.double_tap_window = 0.45;
    config.save(&path).unwrap();

    assert!(path.exists());
    assert_eq!(FaderkitConfig::load(&path).unwrap(), config);
}

#[test]
fn missing_file_loads_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    assert!(FaderkitConfig::load(&path).unwrap_err().is_not_found());
    assert_eq!(
        FaderkitConfig::load_or_default(&path).unwrap(),
        FaderkitConfig::default()
    );
}

#[test]
fn hand_written_file_with_errors_reports_all() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[theme]\nstroke_width = 20.0\n\n[feel]\npulse_width_min = 0.9\npulse_width_max = 0.1\n",
    )
    .unwrap();

    let err = FaderkitConfig::load_or_default(&path).unwrap_err();
    let ConfigError::Validation(ValidationError::Multiple(errors)) = err else {
        panic!("expected multiple validation errors, got {err:?}");
    };
    assert_eq!(errors.len(), 2);
}

#[test]
fn velocity_curve_from_config_drives_pads() {
    let config = FaderkitConfig::from_toml_str("[feel]\nvelocity_floor = 0.5\n").unwrap();
    let mut pads = PadGridControl::new(Bounds::from_size(100.0, 100.0), 1, 1)
        .curve(config.feel.velocity_curve());

    // Bottom edge of the pad: the floor.
    let hit = pads
        .handle(&PointerEvent::down(50.0, 100.0, 0.0), &Default::default())
        .value
        .unwrap();
    assert!((hit.velocity - 0.5).abs() < 1e-4);
}

#[test]
fn pulse_width_bounds_from_config_clamp_selection() {
    let config =
        FaderkitConfig::from_toml_str("[feel]\npulse_width_min = 0.2\npulse_width_max = 0.6\n")
            .unwrap();
    let bounds = config.feel.pulse_width();
    let selection = WaveSelection {
        pulse_width: bounds.clamp(0.95),
        ..WaveSelection::default()
    };
    assert_eq!(selection.pulse_width, 0.6);
}

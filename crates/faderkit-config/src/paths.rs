//! Platform-specific config locations.
//!
//! - Linux: `~/.config/faderkit/config.toml`
//! - macOS: `~/Library/Application Support/faderkit/config.toml`
//! - Windows: `%APPDATA%\faderkit\config.toml`

use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "faderkit";

/// File name of the user config.
const CONFIG_FILE: &str = "config.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path of the user config file.
pub fn user_config_path() -> PathBuf {
    user_config_dir().join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_is_inside_config_dir() {
        let path = user_config_path();
        assert!(path.starts_with(user_config_dir()));
        assert!(path.ends_with("faderkit/config.toml"));
    }
}

//! Configuration for faderkit widgets.
//!
//! A single optional TOML file sets the design tokens every widget draws
//! with and the interaction constants every controller uses.
//!
//! # Features
//!
//! - **Theme tokens**: colors as `"#rrggbb"` strings plus spacing
//! - **Feel**: drag sensitivity, double-tap window, pulse-width bounds and
//!   the drum pad velocity curve, converted into `faderkit-core` types
//! - **Validation**: every out-of-range value reported at once
//! - **Paths**: platform-specific config location
//!
//! # Example
//!
//! ```rust,no_run
//! use faderkit_config::{FaderkitConfig, user_config_path};
//!
//! let config = FaderkitConfig::load_or_default(user_config_path()).unwrap();
//! let feel = config.feel.feel();
//! assert!(feel.sensitivity > 0.0);
//! ```

mod color;
mod config;
mod error;
mod feel;
mod theme;

/// Platform-specific paths for the config file.
pub mod paths;

/// Range checks for configuration values.
pub mod validation;

pub use color::{ColorError, Rgb};
pub use config::FaderkitConfig;
pub use error::ConfigError;
pub use feel::FeelConfig;
pub use paths::{user_config_dir, user_config_path};
pub use theme::ThemeTokens;
pub use validation::{Checks, ValidationError, ValidationResult};

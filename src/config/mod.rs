//! atrack config.
//!
//! atrack takes the typical layered configuration approach. There are 3
//! layers. The config file is the base, which is then superseded by
//! environment variables, which are finally superseded by CLI arguments and
//! options.
//!
//! ```toml
//! [report]
//! currency = "EUR"
//! sort = ["type", "status", "date:desc"]
//!
//! [inventory]
//! path = "assets.yaml"
//!
//! [lifecycle]
//! tiers = "four"
//!
//! [rates]
//! NOK = 10.5
//! ```

use directories::ProjectDirs;
use std::path::PathBuf;

mod display;

pub mod models;

/// The fallback config location when no user config directory is known.
pub const DEFAULT_CONFIG_PATH: &str = "atrack.toml";

/// `$XDG_CONFIG_HOME/atrack/config.toml`, or the platform equivalent.
pub fn default_config_path() -> PathBuf {
    ProjectDirs::from("", "", "atrack")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

//! Support for runtime configuration options

use std::env;
use std::path::PathBuf;

use once_cell::sync::Lazy;

/// Where the backing file lives unless `FRIDGE_MAGNET_FILE` says otherwise
pub static DEFAULT_STORE_FILE: Lazy<PathBuf> = Lazy::new(|| {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config/fridge-magnet/tasks.json")
});

/// Runtime settings, read from the environment with compiled defaults
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Path of the JSON backing file
    pub store_file: PathBuf,
    /// Address the HTTP server listens on
    pub listen: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_file: DEFAULT_STORE_FILE.clone(),
            listen: "127.0.0.1:5000".to_string(),
        }
    }
}

impl Settings {
    /// Read `FRIDGE_MAGNET_FILE` and `FRIDGE_MAGNET_LISTEN`, falling back to
    /// the defaults for anything unset
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            store_file: env::var_os("FRIDGE_MAGNET_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_file),
            listen: env::var("FRIDGE_MAGNET_LISTEN").unwrap_or(defaults.listen),
        }
    }
}

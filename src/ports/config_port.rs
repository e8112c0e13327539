//! Configuration access port trait.

use std::path::PathBuf;

/// `[section] key` lookups over the loaded configuration.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// Falls back to `default` when the key is missing or not a number.
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;

    fn get_path(&self, section: &str, key: &str) -> Option<PathBuf> {
        self.get_string(section, key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }
}

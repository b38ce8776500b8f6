// ============================================================
// SETTINGS
// ============================================================
// Runtime limits, overridable from cleancsv.toml and CLEANCSV_* env vars

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Operational limits for file intake and history retention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Hard ceiling on accepted file size, in bytes.
    pub max_file_size_bytes: u64,
    /// Lower-case extensions (dot included) accepted for decoding.
    pub accepted_extensions: Vec<String>,
    /// Undo snapshots retained before the oldest is evicted.
    pub max_history: usize,
    /// Absolute bound on a single file decode.
    pub decode_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 10 * 1024 * 1024,
            accepted_extensions: vec![".csv".to_string(), ".txt".to_string()],
            max_history: 10,
            decode_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Defaults, merged with `cleancsv.toml` (if present) and `CLEANCSV_*`
    /// environment variables, later sources winning.
    pub fn load() -> Result<Self> {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("cleancsv.toml"))
            .merge(Env::prefixed("CLEANCSV_"))
            .extract()
            .map_err(|e| AppError::ValidationError(format!("Invalid configuration: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.max_file_size_bytes, 10 * 1024 * 1024);
        assert_eq!(settings.accepted_extensions, vec![".csv", ".txt"]);
        assert_eq!(settings.max_history, 10);
        assert_eq!(settings.decode_timeout_secs, 30);
    }
}

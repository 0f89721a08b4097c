//! Dashboard configuration loaded via `OrthoConfig`.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PREFERENCES_FILE: &str = "dashboard-preferences.json";

/// Runtime settings for the dashboard binary.
///
/// Values come from `DASHBOARD_*` environment variables, configuration
/// files, and defaults, in `OrthoConfig`'s usual precedence.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DASHBOARD")]
pub struct DashboardSettings {
    /// Seed document to load instead of the bundled one.
    pub seed_path: Option<PathBuf>,
    /// Where preferences are persisted.
    pub preferences_path: Option<PathBuf>,
    /// Emit logs as JSON lines rather than compact text.
    #[ortho_config(default = false)]
    pub log_json: bool,
}

impl DashboardSettings {
    /// Return the configured preferences path, falling back to a file in the
    /// working directory.
    #[must_use]
    pub fn preferences_path(&self) -> PathBuf {
        self.preferences_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PREFERENCES_FILE))
    }
}

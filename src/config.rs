use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "RUSTY_TRACE_CONFIG";

/// Launch-time viewer settings. Every field has a default, so a config file
/// only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window_title: String,
    pub window_size: [f32; 2],
    pub line_width: f32,
    /// Decimal places shown in hover tooltips.
    pub tooltip_precision: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_title: "Rusty Trace – CSV Time Series Viewer".to_string(),
            window_size: [1200.0, 800.0],
            line_width: 1.5,
            tooltip_precision: 3,
        }
    }
}

impl ViewerConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Config from `$RUSTY_TRACE_CONFIG`, falling back to defaults when the
    /// variable is unset or the file is unusable.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::from_file(Path::new(&path)) {
            Ok(config) => {
                log::info!("Loaded viewer config from {}", Path::new(&path).display());
                config
            }
            Err(e) => {
                log::error!("Ignoring viewer config: {e:#}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: ViewerConfig = serde_json::from_str(r#"{ "line_width": 3.0 }"#).unwrap();
        assert_eq!(config.line_width, 3.0);
        assert_eq!(config.tooltip_precision, ViewerConfig::default().tooltip_precision);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(ViewerConfig::from_file(Path::new("/nonexistent/rusty-trace.json")).is_err());
    }
}

//! Centralized configuration management for stockpit

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::theme::ThemeMode;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Color palette used at startup
    pub theme: ThemeMode,
    /// File the TUI logs to (stderr is owned by the alternate screen)
    pub log_file: PathBuf,
    /// Simulated network latency for the mock login (milliseconds)
    pub mock_latency_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Dark,
            log_file: "./stockpit.log".into(),
            mock_latency_ms: 1000,
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let theme = match std::env::var("STOCKPIT_THEME") {
            Ok(val) => val
                .parse::<ThemeMode>()
                .map_err(|e| anyhow::anyhow!("STOCKPIT_THEME: {}", e))?,
            Err(_) => defaults.theme,
        };

        let log_file = std::env::var("STOCKPIT_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_file);

        let mock_latency_ms =
            parse_env_var("STOCKPIT_MOCK_LATENCY_MS")?.unwrap_or(defaults.mock_latency_ms);

        Ok(Config {
            theme,
            log_file,
            mock_latency_ms,
        })
    }

    /// Get log file path as string
    pub fn log_file_str(&self) -> &str {
        self.log_file.to_str().unwrap_or("./stockpit.log")
    }

    /// Get mock login latency as Duration
    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(parent) = self.log_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(anyhow::anyhow!(
                    "Log file parent directory does not exist: {}",
                    parent.display()
                ));
            }
        }
        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    use anyhow::Context;

    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.theme, ThemeMode::Dark);
        assert_eq!(config.log_file_str(), "./stockpit.log");
        assert_eq!(config.mock_latency_ms, 1000);
        assert_eq!(config.mock_latency(), Duration::from_millis(1000));
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        // Relative path in the working directory always validates
        config.validate().unwrap();

        let config = Config {
            log_file: "/no/such/directory/stockpit.log".into(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}

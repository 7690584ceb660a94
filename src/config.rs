//! Configuration for the check run and its network behavior

use crate::error::{CheckError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// Main configuration for a check run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Maintenance thresholds
    pub maintenance: MaintenanceConfig,
    /// Network configuration
    pub network: NetworkConfig,
    /// Packages to leave out of the run
    pub ignored_packages: HashSet<String>,
    /// Treat any warning as a failed run
    pub fail_on_warning: bool,
}

/// Thresholds for the maintenance inspection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceConfig {
    /// Months since the last push after which a repository counts as stale
    pub stale_after_months: u32,
    /// Report archived repositories as warnings
    pub warn_on_archived: bool,
}

/// Network configuration for API calls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Base URL of the npm download statistics API
    pub npm_downloads_api: String,
    /// Base URL of the npm registry
    pub npm_registry_api: String,
    /// Base URL of the GitHub REST API
    pub github_api: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum number of retries for failed requests
    pub max_retries: u32,
    /// Initial backoff between retries (milliseconds)
    pub request_delay_ms: u64,
    /// GitHub API token (optional, for higher rate limits)
    #[serde(skip_serializing)]
    pub github_token: Option<String>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            maintenance: MaintenanceConfig::default(),
            network: NetworkConfig::default(),
            ignored_packages: HashSet::new(),
            fail_on_warning: false,
        }
    }
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            stale_after_months: 12,
            warn_on_archived: true,
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            npm_downloads_api: "https://api.npmjs.org".to_string(),
            npm_registry_api: "https://registry.npmjs.org".to_string(),
            github_api: "https://api.github.com".to_string(),
            timeout_secs: 30,
            max_retries: 3,
            request_delay_ms: 100,
            github_token: std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }
}

impl NetworkConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get request delay as Duration
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// Point every endpoint at one base URL. Used against local mock servers.
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.npm_downloads_api = base.to_string();
        self.npm_registry_api = base.to_string();
        self.github_api = base.to_string();
        self
    }
}

impl CheckConfig {
    /// Create a new builder for CheckConfig
    pub fn builder() -> CheckConfigBuilder {
        CheckConfigBuilder::default()
    }

    /// Load configuration from a TOML file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CheckConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make every request fail
    pub fn validate(&self) -> Result<()> {
        if self.network.timeout_secs == 0 {
            return Err(CheckError::config("network.timeout_secs must be greater than 0"));
        }

        for (key, url) in [
            ("npm_downloads_api", &self.network.npm_downloads_api),
            ("npm_registry_api", &self.network.npm_registry_api),
            ("github_api", &self.network.github_api),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(CheckError::config(format!(
                    "network.{} must be an http(s) URL, got '{}'",
                    key, url
                )));
            }
        }

        Ok(())
    }
}

/// Builder for CheckConfig
#[derive(Default)]
pub struct CheckConfigBuilder {
    maintenance: Option<MaintenanceConfig>,
    network: Option<NetworkConfig>,
    ignored_packages: HashSet<String>,
    fail_on_warning: bool,
}

impl CheckConfigBuilder {
    pub fn maintenance(mut self, maintenance: MaintenanceConfig) -> Self {
        self.maintenance = Some(maintenance);
        self
    }

    pub fn network(mut self, network: NetworkConfig) -> Self {
        self.network = Some(network);
        self
    }

    pub fn ignore_package(mut self, name: impl Into<String>) -> Self {
        self.ignored_packages.insert(name.into());
        self
    }

    pub fn fail_on_warning(mut self, enabled: bool) -> Self {
        self.fail_on_warning = enabled;
        self
    }

    pub fn build(self) -> CheckConfig {
        CheckConfig {
            maintenance: self.maintenance.unwrap_or_default(),
            network: self.network.unwrap_or_default(),
            ignored_packages: self.ignored_packages,
            fail_on_warning: self.fail_on_warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CheckConfig::default();
        assert_eq!(config.maintenance.stale_after_months, 12);
        assert_eq!(config.network.npm_downloads_api, "https://api.npmjs.org");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "fail_on_warning = true\n\n[maintenance]\nstale_after_months = 6\n"
        )
        .unwrap();

        let config = CheckConfig::from_file(file.path()).unwrap();
        assert!(config.fail_on_warning);
        assert_eq!(config.maintenance.stale_after_months, 6);
        assert!(config.maintenance.warn_on_archived);
        assert_eq!(config.network.max_retries, 3);
    }

    #[test]
    fn test_invalid_url_rejected() {
        let mut config = CheckConfig::default();
        config.network.github_api = "api.github.com".to_string();
        assert!(matches!(config.validate(), Err(CheckError::Config(_))));
    }

    #[test]
    fn test_with_base_url() {
        let network = NetworkConfig::default().with_base_url("http://127.0.0.1:1234/");
        assert_eq!(network.npm_registry_api, "http://127.0.0.1:1234");
        assert_eq!(network.github_api, "http://127.0.0.1:1234");
    }

    #[test]
    fn test_builder() {
        let config = CheckConfig::builder()
            .ignore_package("left-pad")
            .fail_on_warning(true)
            .build();
        assert!(config.ignored_packages.contains("left-pad"));
        assert!(config.fail_on_warning);
    }
}

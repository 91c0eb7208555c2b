/// Roster configuration
use crate::error::{AppError, Result};
use roster_client::ClientConfig;
use roster_view::ErrorPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File read when no `--config` is given and it exists.
pub const DEFAULT_CONFIG_FILE: &str = "roster.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RosterConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default)]
    pub view: ViewSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Unset means requests never time out.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ViewSettings {
    #[serde(default)]
    pub error_policy: ErrorPolicy,
}

impl RosterConfig {
    /// Load configuration from file and environment.
    ///
    /// An explicit `path` must exist; otherwise `roster.toml` in the working
    /// directory is read when present. `ROSTER_`-prefixed variables override
    /// the file, with `__` between nested keys (`ROSTER_API__ENDPOINT`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("ROSTER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let endpoint = self.api.endpoint.trim();
        if endpoint.is_empty() {
            return Err(AppError::Config(
                "API endpoint is required (set ROSTER_API__ENDPOINT)".to_string(),
            ));
        }

        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(AppError::Config(format!(
                "API endpoint must be an http:// or https:// URL, got {:?}",
                endpoint
            )));
        }

        if self.api.timeout_secs == Some(0) {
            return Err(AppError::Config(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.api.endpoint.trim());
        match self.api.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        endpoint: default_endpoint(),
        timeout_secs: None,
    }
}

fn default_endpoint() -> String {
    "https://jsonplaceholder.typicode.com".to_string()
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            view: ViewSettings::default(),
        }
    }
}

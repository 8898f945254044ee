use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{ClientError, ClientResult};

pub const DEFAULT_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbzoSVceegec0Maq2EzGTcm9ba6kqOhFQ-y8ERURW_KpvpksZA9RvRbm0W3IQSIfbwZ4/exec";
pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const DEFAULT_WINDOW_SIZE: usize = 20;
pub const DEFAULT_EXPORT_FILE_NAME: &str = "clientes_faturas.csv";

const CONFIG_FILE_NAME: &str = "config.toml";
const HOME_ENV: &str = "BILLVIEW_HOME";
const ENDPOINT_ENV: &str = "BILLVIEW_ENDPOINT";

/// Settings for one dashboard session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub endpoint: String,
    /// Rows requested from the source per fetch.
    pub page_size: u32,
    /// Rows shown per table page.
    pub window_size: usize,
    pub request_timeout_secs: Option<u64>,
    pub export_file_name: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            window_size: DEFAULT_WINDOW_SIZE,
            request_timeout_secs: None,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    endpoint: Option<String>,
    page_size: Option<u32>,
    window_size: Option<usize>,
    request_timeout_secs: Option<u64>,
    export_file_name: Option<String>,
}

impl DashboardConfig {
    /// Defaults, then `config.toml` under the billview home, then
    /// `BILLVIEW_ENDPOINT`.
    pub fn load() -> ClientResult<Self> {
        let home = resolve_config_home(None)?;
        Self::load_from_home(&home)
    }

    pub fn load_from_home(home: &Path) -> ClientResult<Self> {
        let mut config = Self::default();
        let path = home.join(CONFIG_FILE_NAME);
        if path.is_file() {
            let content = fs::read_to_string(&path)
                .map_err(|error| ClientError::config_unreadable(&path, &error.to_string()))?;
            config = config.merge_toml(&content)?;
        }

        if let Some(endpoint) = std::env::var(ENDPOINT_ENV).ok().filter(|value| !value.is_empty()) {
            config.endpoint = endpoint;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn merge_toml(mut self, content: &str) -> ClientResult<Self> {
        let file = toml::from_str::<ConfigFile>(content)
            .map_err(|error| ClientError::config_invalid(&error.to_string()))?;

        if let Some(endpoint) = file.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(page_size) = file.page_size {
            self.page_size = page_size;
        }
        if let Some(window_size) = file.window_size {
            self.window_size = window_size;
        }
        if file.request_timeout_secs.is_some() {
            self.request_timeout_secs = file.request_timeout_secs;
        }
        if let Some(export_file_name) = file.export_file_name {
            self.export_file_name = export_file_name;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn with_endpoint(mut self, endpoint: Option<&str>) -> ClientResult<Self> {
        if let Some(value) = endpoint {
            self.endpoint = value.to_string();
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ClientResult<()> {
        if self.endpoint.trim().is_empty() {
            return Err(ClientError::config_invalid("`endpoint` must not be empty."));
        }
        if self.page_size == 0 {
            return Err(ClientError::config_invalid("`page_size` must be at least 1."));
        }
        if self.window_size == 0 {
            return Err(ClientError::config_invalid("`window_size` must be at least 1."));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ClientError::config_invalid(
                "`request_timeout_secs` must be at least 1 when set.",
            ));
        }
        if self.export_file_name.trim().is_empty() {
            return Err(ClientError::config_invalid(
                "`export_file_name` must not be empty.",
            ));
        }
        Ok(())
    }
}

pub fn resolve_config_home(home_override: Option<&Path>) -> ClientResult<PathBuf> {
    let candidate = match home_override {
        Some(path) => path.to_path_buf(),
        None => {
            if let Some(override_path) = std::env::var_os(HOME_ENV) {
                PathBuf::from(override_path)
            } else if let Some(home_path) = home::home_dir() {
                home_path.join(".billview")
            } else {
                return Err(ClientError::config_unreadable(
                    Path::new("."),
                    "Could not resolve a home directory for configuration.",
                ));
            }
        }
    };

    absolutize(&candidate)
}

fn absolutize(path: &Path) -> ClientResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| ClientError::config_unreadable(path, &error.to_string()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{DEFAULT_PAGE_SIZE, DashboardConfig};

    #[test]
    fn defaults_match_source_paging() {
        let config = DashboardConfig::default();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.window_size, 20);
        assert_eq!(config.export_file_name, "clientes_faturas.csv");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_overrides_only_present_keys() {
        let merged = DashboardConfig::default().merge_toml(
            "endpoint = \"http://127.0.0.1:9/exec\"\nwindow_size = 5\n",
        );
        assert!(merged.is_ok());
        if let Ok(config) = merged {
            assert_eq!(config.endpoint, "http://127.0.0.1:9/exec");
            assert_eq!(config.window_size, 5);
            assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        }
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let merged = DashboardConfig::default().merge_toml("page = 3\n");
        assert!(merged.is_err());
        if let Err(error) = merged {
            assert_eq!(error.code, "config_invalid");
        }
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let merged = DashboardConfig::default().merge_toml("page_size = 0\n");
        assert!(merged.is_err());

        let config = DashboardConfig {
            window_size: 0,
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn endpoint_override_replaces_configured_value() {
        let config = DashboardConfig::default().with_endpoint(Some("http://localhost:1/exec"));
        assert!(config.is_ok());
        if let Ok(value) = config {
            assert_eq!(value.endpoint, "http://localhost:1/exec");
        }

        let empty = DashboardConfig::default().with_endpoint(Some("  "));
        assert!(empty.is_err());
    }

    #[test]
    fn config_file_is_read_from_home() {
        let temp = tempfile::Builder::new().prefix("billview-config").tempdir();
        assert!(temp.is_ok());
        if let Ok(dir) = temp {
            let written = fs::write(dir.path().join("config.toml"), "window_size = 7\n");
            assert!(written.is_ok());
            let loaded = DashboardConfig::load_from_home(dir.path());
            assert!(loaded.is_ok());
            if let Ok(config) = loaded {
                assert_eq!(config.window_size, 7);
            }
        }
    }
}

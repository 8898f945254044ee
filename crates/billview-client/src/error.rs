use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

pub(crate) const CONFIG_HELP_COMMAND: &str = "billview --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `billview {cmd} --help` for usage."),
            None => "Run `billview --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    /// The first page could not be loaded; nothing is rendered after this.
    pub fn initial_load_failed(endpoint: &str, detail: &str) -> Self {
        Self::new(
            "initial_load_failed",
            "Could not load billing records. Reload to try again.",
            vec![
                format!("Check that `{endpoint}` is reachable and returns a JSON array."),
                "Rerun the command once the data source is available.".to_string(),
            ],
        )
        .with_data(json!({
            "endpoint": endpoint,
            "detail": detail,
        }))
    }

    pub fn fetch_failed(page: u32, detail: &str) -> Self {
        Self::new(
            "fetch_failed",
            &format!("Fetching page {page} failed: {detail}"),
            Vec::new(),
        )
        .with_data(json!({
            "page": page,
        }))
    }

    pub fn config_unreadable(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "config_unreadable",
            &format!("Cannot read configuration at `{location}`: {detail}"),
            vec![format!(
                "Grant read access to `{location}` or set `BILLVIEW_HOME` to another directory."
            )],
        )
    }

    pub fn config_invalid(detail: &str) -> Self {
        Self::new(
            "config_invalid",
            &format!("Configuration is invalid: {detail}"),
            vec![
                "Fix the value in `config.toml` or the matching environment variable.".to_string(),
                format!("Run `{CONFIG_HELP_COMMAND}` to review available overrides."),
            ],
        )
    }

    pub fn export_write_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "export_write_failed",
            &format!("Cannot write export to `{location}`: {detail}"),
            vec!["Choose a writable location with `billview export --output <path>`.".to_string()],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn is_internal(&self) -> bool {
        self.code.starts_with("internal_")
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

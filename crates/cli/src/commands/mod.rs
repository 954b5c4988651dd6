pub mod catalog;
pub mod chat;
pub mod config;

use std::path::PathBuf;

use serde::Serialize;
use shopmate_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use shopmate_core::{ApplicationError, Catalog};

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn from_application_error(command: &str, error: &ApplicationError) -> Self {
        let exit_code = match error {
            ApplicationError::Config(_) => 2,
            ApplicationError::Catalog(_) => 3,
        };
        Self::failure(
            command,
            error.error_class(),
            format!("{} ({error})", error.user_message()),
            exit_code,
        )
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Flags shared by every command that needs a loaded configuration.
#[derive(Clone, Debug, Default)]
pub struct RuntimeArgs {
    pub config_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl RuntimeArgs {
    pub fn load_config(&self) -> Result<AppConfig, ApplicationError> {
        let options = LoadOptions {
            config_path: self.config_path.clone(),
            require_file: self.config_path.is_some(),
            overrides: ConfigOverrides {
                catalog_path: self.catalog_path.clone(),
                seed: self.seed,
                ..ConfigOverrides::default()
            },
        };
        Ok(AppConfig::load(options)?)
    }
}

/// Configured JSON catalog, or the built-in demo catalog when no path is set.
pub fn load_catalog(config: &AppConfig) -> Result<Catalog, ApplicationError> {
    match config.catalog.path.as_deref() {
        Some(path) => Ok(Catalog::load(path)?),
        None => Ok(Catalog::demo()),
    }
}

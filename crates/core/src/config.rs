use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::recommend::{DEFAULT_CURRENCY_SYMBOL, DEFAULT_MAX_SUGGESTIONS, SUGGESTION_LIMIT};

pub const DEFAULT_INVALID_TURN_LIMIT: u32 = 3;
pub const DEFAULT_FUZZY_THRESHOLD: u8 = 80;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub conversation: ConversationConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
    pub currency_symbol: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversationConfig {
    pub max_suggestions: usize,
    pub invalid_turn_limit: u32,
    pub fuzzy_threshold: u8,
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub catalog_path: Option<PathBuf>,
    pub currency_symbol: Option<String>,
    pub max_suggestions: Option<usize>,
    pub invalid_turn_limit: Option<u32>,
    pub fuzzy_threshold: Option<u8>,
    pub seed: Option<u64>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig {
                path: None,
                currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            },
            conversation: ConversationConfig::default(),
            logging: LoggingConfig { level: "warn".to_string(), format: LogFormat::Compact },
        }
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            invalid_turn_limit: DEFAULT_INVALID_TURN_LIMIT,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            seed: None,
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("shopmate.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(catalog) = patch.catalog {
            if let Some(path) = catalog.path {
                self.catalog.path = Some(path);
            }
            if let Some(currency_symbol) = catalog.currency_symbol {
                self.catalog.currency_symbol = currency_symbol;
            }
        }

        if let Some(conversation) = patch.conversation {
            if let Some(max_suggestions) = conversation.max_suggestions {
                self.conversation.max_suggestions = max_suggestions;
            }
            if let Some(invalid_turn_limit) = conversation.invalid_turn_limit {
                self.conversation.invalid_turn_limit = invalid_turn_limit;
            }
            if let Some(fuzzy_threshold) = conversation.fuzzy_threshold {
                self.conversation.fuzzy_threshold = fuzzy_threshold;
            }
            if let Some(seed) = conversation.seed {
                self.conversation.seed = Some(seed);
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("SHOPMATE_CATALOG_PATH") {
            self.catalog.path = Some(PathBuf::from(value));
        }
        if let Some(value) = read_env("SHOPMATE_CATALOG_CURRENCY_SYMBOL") {
            self.catalog.currency_symbol = value;
        }

        if let Some(value) = read_env("SHOPMATE_CONVERSATION_MAX_SUGGESTIONS") {
            self.conversation.max_suggestions =
                parse_env("SHOPMATE_CONVERSATION_MAX_SUGGESTIONS", &value)?;
        }
        if let Some(value) = read_env("SHOPMATE_CONVERSATION_INVALID_TURN_LIMIT") {
            self.conversation.invalid_turn_limit =
                parse_env("SHOPMATE_CONVERSATION_INVALID_TURN_LIMIT", &value)?;
        }
        if let Some(value) = read_env("SHOPMATE_CONVERSATION_FUZZY_THRESHOLD") {
            self.conversation.fuzzy_threshold =
                parse_env("SHOPMATE_CONVERSATION_FUZZY_THRESHOLD", &value)?;
        }
        if let Some(value) = read_env("SHOPMATE_CONVERSATION_SEED") {
            self.conversation.seed = Some(parse_env("SHOPMATE_CONVERSATION_SEED", &value)?);
        }

        let log_level =
            read_env("SHOPMATE_LOGGING_LEVEL").or_else(|| read_env("SHOPMATE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("SHOPMATE_LOGGING_FORMAT").or_else(|| read_env("SHOPMATE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(catalog_path) = overrides.catalog_path {
            self.catalog.path = Some(catalog_path);
        }
        if let Some(currency_symbol) = overrides.currency_symbol {
            self.catalog.currency_symbol = currency_symbol;
        }
        if let Some(max_suggestions) = overrides.max_suggestions {
            self.conversation.max_suggestions = max_suggestions;
        }
        if let Some(invalid_turn_limit) = overrides.invalid_turn_limit {
            self.conversation.invalid_turn_limit = invalid_turn_limit;
        }
        if let Some(fuzzy_threshold) = overrides.fuzzy_threshold {
            self.conversation.fuzzy_threshold = fuzzy_threshold;
        }
        if let Some(seed) = overrides.seed {
            self.conversation.seed = Some(seed);
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_catalog(&self.catalog)?;
        validate_conversation(&self.conversation)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("shopmate.toml"), PathBuf::from("config/shopmate.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    if catalog.currency_symbol.trim().is_empty() {
        return Err(ConfigError::Validation(
            "catalog.currency_symbol must not be empty".to_string(),
        ));
    }

    if let Some(path) = &catalog.path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "catalog.path must not be empty when set; omit it to use the built-in demo catalog"
                    .to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_conversation(conversation: &ConversationConfig) -> Result<(), ConfigError> {
    if conversation.max_suggestions == 0 || conversation.max_suggestions > SUGGESTION_LIMIT {
        return Err(ConfigError::Validation(format!(
            "conversation.max_suggestions must be in range 1..={SUGGESTION_LIMIT}"
        )));
    }

    if conversation.invalid_turn_limit == 0 {
        return Err(ConfigError::Validation(
            "conversation.invalid_turn_limit must be greater than zero".to_string(),
        ));
    }

    if conversation.fuzzy_threshold == 0 || conversation.fuzzy_threshold > 100 {
        return Err(ConfigError::Validation(
            "conversation.fuzzy_threshold must be in range 1..=100".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_env<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    value.trim().parse::<T>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    catalog: Option<CatalogPatch>,
    conversation: Option<ConversationPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    path: Option<PathBuf>,
    currency_symbol: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConversationPatch {
    max_suggestions: Option<usize>,
    invalid_turn_limit: Option<u32>,
    fuzzy_threshold: Option<u8>,
    seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

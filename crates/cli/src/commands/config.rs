use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use shopmate_core::config::resolve_config_path;
use toml::Value;

use crate::commands::{CommandResult, RuntimeArgs};

pub fn run(args: &RuntimeArgs) -> CommandResult {
    let config = match args.load_config() {
        Ok(config) => config,
        Err(error) => return CommandResult::from_application_error("config", &error),
    };

    let config_file = ConfigFile::detect(args.config_path.as_deref());

    let mut lines =
        vec!["effective config (source precedence: flag > env > file > default):".to_string()];

    lines.push(render_line(
        "catalog.path",
        &config
            .catalog
            .path
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "<built-in demo catalog>".to_string()),
        config_file.source(
            "catalog.path",
            &["SHOPMATE_CATALOG_PATH"],
            Some(("--catalog", args.catalog_path.is_some())),
        ),
    ));
    lines.push(render_line(
        "catalog.currency_symbol",
        &config.catalog.currency_symbol,
        config_file.source("catalog.currency_symbol", &["SHOPMATE_CATALOG_CURRENCY_SYMBOL"], None),
    ));

    lines.push(render_line(
        "conversation.max_suggestions",
        &config.conversation.max_suggestions.to_string(),
        config_file.source(
            "conversation.max_suggestions",
            &["SHOPMATE_CONVERSATION_MAX_SUGGESTIONS"],
            None,
        ),
    ));
    lines.push(render_line(
        "conversation.invalid_turn_limit",
        &config.conversation.invalid_turn_limit.to_string(),
        config_file.source(
            "conversation.invalid_turn_limit",
            &["SHOPMATE_CONVERSATION_INVALID_TURN_LIMIT"],
            None,
        ),
    ));
    lines.push(render_line(
        "conversation.fuzzy_threshold",
        &config.conversation.fuzzy_threshold.to_string(),
        config_file.source(
            "conversation.fuzzy_threshold",
            &["SHOPMATE_CONVERSATION_FUZZY_THRESHOLD"],
            None,
        ),
    ));
    lines.push(render_line(
        "conversation.seed",
        &config
            .conversation
            .seed
            .map(|seed| seed.to_string())
            .unwrap_or_else(|| "<random>".to_string()),
        config_file.source(
            "conversation.seed",
            &["SHOPMATE_CONVERSATION_SEED"],
            Some(("--seed", args.seed.is_some())),
        ),
    ));

    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        config_file.source(
            "logging.level",
            &["SHOPMATE_LOGGING_LEVEL", "SHOPMATE_LOG_LEVEL"],
            None,
        ),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format).to_lowercase(),
        config_file.source(
            "logging.format",
            &["SHOPMATE_LOGGING_FORMAT", "SHOPMATE_LOG_FORMAT"],
            None,
        ),
    ));

    CommandResult { exit_code: 0, output: lines.join("\n") }
}

struct ConfigFile {
    path: Option<PathBuf>,
    doc: Option<Value>,
}

impl ConfigFile {
    fn detect(explicit_path: Option<&Path>) -> Self {
        let path = resolve_config_path(explicit_path);
        let doc = path.as_deref().and_then(load_config_file_doc);
        Self { path, doc }
    }

    fn source(
        &self,
        key_path: &'static str,
        env_keys: &'static [&'static str],
        cli_flag: Option<(&'static str, bool)>,
    ) -> String {
        if let Some((flag, true)) = cli_flag {
            return format!("flag ({flag})");
        }

        if let Some(env_key) = env_keys.iter().find(|env_key| env::var_os(env_key).is_some()) {
            return format!("env ({env_key})");
        }

        if let Some(doc) = &self.doc {
            if contains_path(doc, key_path) {
                let file_path = self
                    .path
                    .as_deref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "config file".to_string());
                return format!("file ({file_path})");
            }
        }

        "default".to_string()
    }
}

fn load_config_file_doc(path: &Path) -> Option<Value> {
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

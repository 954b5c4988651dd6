use std::env;
use std::fs;
use std::io::Cursor;
use std::sync::{Arc, Mutex, OnceLock};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use shopmate_agent::responses::{CONFIRM_QUESTION, GREET, WELCOME};
use shopmate_agent::{ConversationSettings, KeywordIntentClassifier, ShoppingAssistant};
use shopmate_cli::commands::chat::run_session;
use shopmate_cli::commands::{catalog, config, RuntimeArgs};
use shopmate_core::Catalog;

fn scripted_session(script: &str) -> (String, shopmate_cli::commands::chat::SessionSummary) {
    let mut assistant = ShoppingAssistant::with_rng(
        KeywordIntentClassifier::new(),
        Arc::new(Catalog::demo()),
        ConversationSettings::default(),
        StdRng::seed_from_u64(5),
    );
    let mut output = Vec::new();
    let summary = run_session(&mut assistant, Cursor::new(script.to_string()), &mut output)
        .expect("in-memory session should not fail");
    (String::from_utf8(output).expect("chat output should be utf-8"), summary)
}

#[test]
fn chat_session_runs_until_goodbye() {
    let (output, summary) =
        scripted_session("hello\nI want a casual jacket under 50\nyes\nbye\nstill there?\n");

    assert!(output.starts_with(&format!("Assistant: {WELCOME}\n")));
    assert!(output.contains(&format!("Assistant: {GREET}\n")));
    assert!(output.contains(
        "Assistant: Here are some suggestions based on style: casual.\n\
         - Denim Trucker Jacket (£45.00)\n"
    ));
    assert!(output.contains(&format!("Assistant: {CONFIRM_QUESTION}\n")));
    assert!(output.ends_with('\n'));
    assert!(summary.finished);
    assert_eq!(summary.turns, 4);
}

#[test]
fn chat_session_ends_quietly_when_input_closes() {
    let (output, summary) = scripted_session("formal shoes\n");

    assert!(!summary.finished);
    assert_eq!(summary.turns, 1);
    assert!(output.contains("Assistant: Here are some suggestions based on style: formal."));
}

#[test]
fn blank_lines_get_no_reply() {
    let (output, summary) = scripted_session("\n   \nbye\n");

    let assistant_lines = output.matches("Assistant: ").count();
    assert_eq!(assistant_lines, 2, "welcome plus goodbye only: {output}");
    assert_eq!(summary.turns, 1);
}

#[test]
fn config_reports_env_sources() {
    with_env(&[("SHOPMATE_CONVERSATION_SEED", "42"), ("SHOPMATE_LOG_LEVEL", "debug")], || {
        let result = config::run(&RuntimeArgs::default());
        assert_eq!(result.exit_code, 0);
        assert!(result
            .output
            .contains("- conversation.seed = 42 (source: env (SHOPMATE_CONVERSATION_SEED))"));
        assert!(result
            .output
            .contains("- logging.level = debug (source: env (SHOPMATE_LOG_LEVEL))"));
        assert!(result.output.contains("- conversation.max_suggestions = 3 (source: default)"));
    });
}

#[test]
fn config_reports_file_and_flag_sources() {
    with_env(&[], || {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("shopmate.toml");
        fs::write(&path, "[conversation]\nmax_suggestions = 2\n").expect("write config");

        let args = RuntimeArgs {
            config_path: Some(path.clone()),
            catalog_path: Some(dir.path().join("products.json")),
            seed: None,
        };
        let result = config::run(&args);

        assert_eq!(result.exit_code, 0);
        let expected =
            format!("- conversation.max_suggestions = 2 (source: file ({}))", path.display());
        assert!(result.output.contains(&expected), "{}", result.output);
        assert!(result.output.contains("(source: flag (--catalog))"));
    });
}

#[test]
fn config_returns_validation_failure_payload() {
    with_env(&[("SHOPMATE_CONVERSATION_MAX_SUGGESTIONS", "0")], || {
        let result = config::run(&RuntimeArgs::default());
        assert_eq!(result.exit_code, 2);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "config");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn missing_explicit_config_file_is_an_error() {
    with_env(&[], || {
        let dir = tempfile::tempdir().expect("temp dir");
        let args =
            RuntimeArgs { config_path: Some(dir.path().join("absent.toml")), ..Default::default() };

        let result = catalog::run(&args, false);

        assert_eq!(result.exit_code, 2);
        assert_eq!(parse_payload(&result.output)["error_class"], "config_validation");
    });
}

#[test]
fn catalog_lists_demo_products_as_json() {
    with_env(&[], || {
        let result = catalog::run(&RuntimeArgs::default(), true);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["source"], "built-in demo");
        assert_eq!(payload["count"], 30);
        assert_eq!(payload["products"][0]["name"], "Denim Trucker Jacket");
        assert_eq!(payload["products"][0]["category"], "jacket");
    });
}

#[test]
fn catalog_loads_json_file_with_capitalized_labels() {
    with_env(&[], || {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("products.json");
        fs::write(
            &path,
            r#"[{"name": "Gym Tee", "category": "Shirt", "style": "Sporty", "price": 20}]"#,
        )
        .expect("write catalog");

        let args = RuntimeArgs { catalog_path: Some(path), ..Default::default() };
        let result = catalog::run(&args, false);

        assert_eq!(result.exit_code, 0);
        assert!(result.output.starts_with("catalog: 1 products"));
        assert!(result.output.contains("- Gym Tee [shirt / sporty] £20.00"));
    });
}

#[test]
fn unreadable_catalog_returns_catalog_failure() {
    with_env(&[], || {
        let dir = tempfile::tempdir().expect("temp dir");
        let args = RuntimeArgs {
            catalog_path: Some(dir.path().join("missing.json")),
            ..Default::default()
        };

        let result = catalog::run(&args, true);

        assert_eq!(result.exit_code, 3);
        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "catalog");
        assert_eq!(payload["error_class"], "catalog_load");
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "SHOPMATE_CATALOG_PATH",
        "SHOPMATE_CATALOG_CURRENCY_SYMBOL",
        "SHOPMATE_CONVERSATION_MAX_SUGGESTIONS",
        "SHOPMATE_CONVERSATION_INVALID_TURN_LIMIT",
        "SHOPMATE_CONVERSATION_FUZZY_THRESHOLD",
        "SHOPMATE_CONVERSATION_SEED",
        "SHOPMATE_LOGGING_LEVEL",
        "SHOPMATE_LOGGING_FORMAT",
        "SHOPMATE_LOG_LEVEL",
        "SHOPMATE_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}

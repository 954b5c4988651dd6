use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use rand::Rng;
use shopmate_agent::{
    ConversationSettings, IntentClassifier, KeywordIntentClassifier, ShoppingAssistant,
};
use shopmate_core::config::{AppConfig, LogFormat};
use tracing::{info, Level};

use crate::commands::{load_catalog, CommandResult, RuntimeArgs};

const USER_PROMPT: &str = "You: ";
const ASSISTANT_PREFIX: &str = "Assistant: ";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub turns: usize,
    pub finished: bool,
}

pub fn run(args: RuntimeArgs) -> CommandResult {
    let config = match args.load_config() {
        Ok(config) => config,
        Err(error) => return CommandResult::from_application_error("chat", &error),
    };
    init_logging(&config);

    let catalog = match load_catalog(&config) {
        Ok(catalog) => catalog,
        Err(error) => return CommandResult::from_application_error("chat", &error),
    };

    let mut assistant = ShoppingAssistant::new(
        KeywordIntentClassifier::new(),
        Arc::new(catalog),
        ConversationSettings::from(&config.conversation),
    )
    .with_currency_symbol(config.catalog.currency_symbol.clone());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let session = run_session(&mut assistant, stdin.lock(), &mut stdout.lock())
        .context("chat session lost its terminal");
    match session {
        Ok(_) => CommandResult { exit_code: 0, output: String::new() },
        Err(error) => CommandResult::failure("chat", "io", format!("{error:#}"), 1),
    }
}

/// Drives one conversation over line-oriented input until the assistant says
/// goodbye or the input ends.
pub fn run_session<C, G, I, O>(
    assistant: &mut ShoppingAssistant<C, G>,
    input: I,
    output: &mut O,
) -> io::Result<SessionSummary>
where
    C: IntentClassifier,
    G: Rng,
    I: BufRead,
    O: Write,
{
    info!(
        event_name = "chat.session_started",
        conversation_id = %assistant.conversation_id(),
        "chat session started"
    );
    writeln!(output, "{ASSISTANT_PREFIX}{}", assistant.welcome())?;

    let mut turns = 0;
    let mut lines = input.lines();
    while !assistant.is_finished() {
        write!(output, "{USER_PROMPT}")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;

        let reply = assistant.handle_turn(&line);
        if !reply.is_silent() {
            turns += 1;
        }
        for reply_line in &reply.lines {
            writeln!(output, "{ASSISTANT_PREFIX}{reply_line}")?;
        }
    }
    output.flush()?;

    let summary = SessionSummary { turns, finished: assistant.is_finished() };
    info!(
        event_name = "chat.session_ended",
        conversation_id = %assistant.conversation_id(),
        turns = summary.turns,
        finished = summary.finished,
        "chat session ended"
    );
    Ok(summary)
}

/// Log events go to stderr so the conversation on stdout stays readable.
pub fn init_logging(config: &AppConfig) {
    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::WARN);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(io::stderr);

    // a subscriber may already be installed when commands run in-process
    let _ = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

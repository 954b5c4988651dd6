pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use commands::RuntimeArgs;

#[derive(Debug, Parser)]
#[command(
    name = "shopmate",
    about = "Shopmate shopping assistant CLI",
    long_about = "Chat with the shopping assistant and inspect its configuration or product catalog.",
    after_help = "Examples:\n  shopmate chat --seed 7\n  shopmate config\n  shopmate catalog --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct SharedArgs {
    #[arg(long, help = "Path to a shopmate.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, help = "Path to a JSON product catalog (overrides config)")]
    catalog: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Start an interactive shopping conversation on stdin/stdout")]
    Chat {
        #[command(flatten)]
        shared: SharedArgs,
        #[arg(long, help = "Seed suggestion sampling for a reproducible conversation")]
        seed: Option<u64>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config {
        #[command(flatten)]
        shared: SharedArgs,
    },
    #[command(about = "List the products the assistant recommends from")]
    Catalog {
        #[command(flatten)]
        shared: SharedArgs,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

impl SharedArgs {
    fn into_runtime(self, seed: Option<u64>) -> RuntimeArgs {
        RuntimeArgs { config_path: self.config, catalog_path: self.catalog, seed }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Chat { shared, seed } => commands::chat::run(shared.into_runtime(seed)),
        Command::Config { shared } => commands::config::run(&shared.into_runtime(None)),
        Command::Catalog { shared, json } => {
            commands::catalog::run(&shared.into_runtime(None), json)
        }
    };

    if !result.output.is_empty() {
        println!("{}", result.output);
    }
    ExitCode::from(result.exit_code)
}

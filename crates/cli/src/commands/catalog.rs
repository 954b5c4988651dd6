use serde::Serialize;
use shopmate_core::{Catalog, Product};

use crate::commands::{load_catalog, CommandResult, RuntimeArgs};

#[derive(Debug, Serialize)]
struct CatalogListing<'a> {
    source: String,
    count: usize,
    products: &'a [Product],
}

pub fn run(args: &RuntimeArgs, json_output: bool) -> CommandResult {
    let config = match args.load_config() {
        Ok(config) => config,
        Err(error) => return CommandResult::from_application_error("catalog", &error),
    };
    let catalog = match load_catalog(&config) {
        Ok(catalog) => catalog,
        Err(error) => return CommandResult::from_application_error("catalog", &error),
    };

    let source = config
        .catalog
        .path
        .as_deref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "built-in demo".to_string());

    if json_output {
        let listing = CatalogListing { source, count: catalog.len(), products: catalog.products() };
        return match serde_json::to_string_pretty(&listing) {
            Ok(output) => CommandResult { exit_code: 0, output },
            Err(error) => CommandResult::failure("catalog", "serialization", error.to_string(), 1),
        };
    }

    CommandResult {
        exit_code: 0,
        output: render_human(&catalog, &source, &config.catalog.currency_symbol),
    }
}

fn render_human(catalog: &Catalog, source: &str, currency_symbol: &str) -> String {
    let mut lines = vec![format!("catalog: {} products (source: {source})", catalog.len())];
    lines.extend(catalog.iter().map(|product| {
        format!(
            "- {} [{} / {}] {currency_symbol}{:.2}",
            product.name, product.category, product.style, product.price
        )
    }));
    lines.join("\n")
}

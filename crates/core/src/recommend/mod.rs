//! Catalog filtering and suggestion sampling.
//!
//! Filters compose conjunctively over the conversation slots; when nothing
//! matches, the partial policy samples from the whole catalog so the shopper
//! always sees something.

mod engine;
mod types;

pub use engine::RecommendationEngine;
pub use types::*;

/// Hard ceiling on suggestions shown per turn. Confirmation is only offered
/// for suggestion sets no larger than this.
pub const SUGGESTION_LIMIT: usize = 3;

pub const DEFAULT_MAX_SUGGESTIONS: usize = SUGGESTION_LIMIT;

/// Currency symbol used when rendering prices.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "£";

pub const NO_MATCH_MESSAGE: &str = "Sorry, I couldn't find anything matching all your preferences.";

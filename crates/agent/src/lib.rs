//! Shopping assistant runtime.
//!
//! This crate turns free-text shopper utterances into dialogue turns:
//! - Slot extraction (`extraction`, `fuzzy`) - price, category and style from raw text
//! - Intent classification (`classifier`) - pluggable, with a keyword fallback
//! - Reply wording (`responses`) - immutable template sets
//! - Turn handling (`runtime`) - `ShoppingAssistant` owns one conversation
//!
//! # Flow
//!
//! Each turn is classified, routed through the core dialogue state machine,
//! and either answered directly or handed to slot extraction, which updates
//! the context and asks the recommendation engine for suggestions.
//!
//! The assistant never fails a turn: classifier errors degrade to `other`
//! and unmatched text simply leaves slots unset.

pub mod classifier;
pub mod extraction;
pub mod fuzzy;
pub mod responses;
pub mod runtime;

pub use classifier::{IntentClassifier, KeywordIntentClassifier};
pub use extraction::{extract_price, ExactKeywordMatcher, SlotExtractor, SlotMatcher};
pub use fuzzy::{partial_ratio, SynonymFuzzyMatcher};
pub use runtime::{ConversationSettings, ShoppingAssistant, TurnReply};

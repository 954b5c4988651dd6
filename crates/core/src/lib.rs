pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod flows;
pub mod recommend;

pub use catalog::{Catalog, CatalogError};
pub use domain::context::{ConversationContext, ExtractedSlots, Slot};
pub use domain::product::{Category, Product, Style};
pub use errors::{ApplicationError, DomainError};
pub use flows::{
    DialogueEngine, DialoguePolicy, DialogueState, IntentLabel, ShoppingDialogue, TurnAction,
    TurnOutcome,
};
pub use recommend::{MatchPolicy, Recommendation, RecommendationBasis, RecommendationEngine};

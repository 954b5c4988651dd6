pub mod engine;
pub mod states;

pub use engine::{DialogueEngine, DialoguePolicy, ShoppingDialogue};
pub use states::{DialogueState, IntentLabel, TurnAction, TurnOutcome};

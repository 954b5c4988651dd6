//! Reply templates.
//!
//! Multi-variant sets are picked uniformly with the conversation's own RNG so
//! a seeded conversation replays the same wording.

use rand::seq::SliceRandom;
use rand::Rng;
use shopmate_core::domain::context::{ConversationContext, Slot};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TemplateSet(&'static [&'static str]);

impl TemplateSet {
    pub const fn new(templates: &'static [&'static str]) -> Self {
        Self(templates)
    }

    pub fn templates(&self) -> &'static [&'static str] {
        self.0
    }

    pub fn pick<R>(&self, rng: &mut R) -> &'static str
    where
        R: Rng + ?Sized,
    {
        self.0.choose(rng).copied().unwrap_or_default()
    }
}

pub const THANK_YOU: TemplateSet = TemplateSet::new(&[
    "You're welcome! Let me know if you'd like to see more.",
    "No problem! Happy to help.",
    "You're very welcome. I'm here if you need anything else!",
]);

pub const CONFIRMATION: TemplateSet = TemplateSet::new(&[
    "Great! I'm glad you like it.",
    "Awesome choice! Hope it works well for you.",
    "Perfect! Let me know if there's anything else.",
]);

pub const REJECTION: TemplateSet = TemplateSet::new(&[
    "No worries! Let's try something else.",
    "Okay, we can explore more options.",
    "Understood! I'll find other items you might like.",
]);

pub const DONE: TemplateSet = TemplateSet::new(&[
    "Thank you for shopping with us! Have a great day!",
    "It was a pleasure helping you. Goodbye!",
    "Hope to see you again soon! Take care.",
]);

pub const GUIDANCE: TemplateSet = TemplateSet::new(&[
    "That's totally okay! A lot of people feel the same.",
    "No problem! I can help guide you.",
    "Let's start somewhere, I'll suggest some good picks.",
]);

pub const WELCOME: &str = "Hi there! Ask me anything about fashion or shopping.";
pub const GREET: &str = "Hello! How can I assist you with shopping today?";
pub const ASK_PRODUCT: &str =
    "What type of product are you looking for? Jackets, shoes, or something else?";
pub const ASK_STYLE: &str = "What style are you into? Casual, formal, sporty?";
pub const ASK_PRICE: &str = "What's your budget? Please enter a maximum price (e.g., under 100).";
pub const CONFIRM_QUESTION: &str = "Do any of these options look good to you?";
pub const NUDGE: &str = "I can help better if you share your style, product type, or budget.";

const HINT_PREFIX: &str = " You can tell me more: ";

fn slot_hint(slot: Slot) -> &'static str {
    match slot {
        Slot::Category => "what category are you looking for?",
        Slot::Style => "any preferred style?",
        Slot::MaxPrice => "what's your budget?",
    }
}

fn slot_prompt(slot: Slot) -> &'static str {
    match slot {
        Slot::Category => ASK_PRODUCT,
        Slot::Style => ASK_STYLE,
        Slot::MaxPrice => ASK_PRICE,
    }
}

/// Suffix listing every unset slot, or empty when the context is complete.
pub fn missing_slot_hint(context: &ConversationContext) -> String {
    let hints = context.missing_slots().into_iter().map(slot_hint).collect::<Vec<_>>();
    if hints.is_empty() {
        return String::new();
    }
    format!("{HINT_PREFIX}{}", hints.join(" "))
}

/// Prompt for the highest-priority unset slot.
pub fn missing_slot_prompt(context: &ConversationContext) -> Option<&'static str> {
    context.missing_slots().into_iter().next().map(slot_prompt)
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::product::{Category, Style};
use crate::flows::states::DialogueState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Category,
    Style,
    MaxPrice,
}

impl Slot {
    /// Prompt priority: category first, then style, then budget.
    pub const PRIORITY: [Slot; 3] = [Slot::Category, Slot::Style, Slot::MaxPrice];
}

/// Slot values pulled out of a single utterance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSlots {
    pub price: Option<Decimal>,
    pub category: Option<Category>,
    pub style: Option<Style>,
}

impl ExtractedSlots {
    pub fn is_empty(&self) -> bool {
        self.price.is_none() && self.category.is_none() && self.style.is_none()
    }
}

/// Mutable per-conversation state carried across turns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationContext {
    pub category: Option<Category>,
    pub style: Option<Style>,
    pub max_price: Option<Decimal>,
    pub awaiting_confirmation: bool,
    pub last_recommendation_count: usize,
    pub invalid_turn_count: u32,
}

impl ConversationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges newly stated slots, overwriting earlier values. Returns whether
    /// anything was extracted this turn.
    pub fn apply(&mut self, slots: &ExtractedSlots) -> bool {
        if let Some(price) = slots.price.filter(|price| *price > Decimal::ZERO) {
            self.max_price = Some(price);
        }
        if let Some(style) = slots.style {
            self.style = Some(style);
        }
        if let Some(category) = slots.category {
            self.category = Some(category);
        }

        let extracted = !slots.is_empty();
        if extracted {
            self.invalid_turn_count = 0;
        }
        extracted
    }

    pub fn has_any_slot(&self) -> bool {
        self.category.is_some() || self.style.is_some() || self.max_price.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.category.is_some() && self.style.is_some() && self.max_price.is_some()
    }

    pub fn is_missing(&self, slot: Slot) -> bool {
        match slot {
            Slot::Category => self.category.is_none(),
            Slot::Style => self.style.is_none(),
            Slot::MaxPrice => self.max_price.is_none(),
        }
    }

    pub fn missing_slots(&self) -> Vec<Slot> {
        Slot::PRIORITY.into_iter().filter(|slot| self.is_missing(*slot)).collect()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn state(&self) -> DialogueState {
        if self.awaiting_confirmation {
            DialogueState::AwaitingConfirmation
        } else {
            DialogueState::Gathering
        }
    }
}

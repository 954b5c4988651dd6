//! Recommendation result types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::product::{Category, Product, Style};

/// Whether an empty filter result may fall back to unconstrained sampling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    ExactOnly,
    AllowPartial,
}

impl MatchPolicy {
    pub fn allows_partial(&self) -> bool {
        matches!(self, Self::AllowPartial)
    }
}

/// Slot that drove the intro line: style, then category, then budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "slot", content = "value")]
pub enum RecommendationBasis {
    Style(Style),
    Category(Category),
    Budget(Decimal),
    Unconstrained,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub items: Vec<Product>,
    pub message: String,
    /// Always equals `items.len()`.
    pub count: usize,
    pub basis: RecommendationBasis,
    /// Items were sampled from the whole catalog because nothing matched.
    pub fell_back: bool,
}

impl Recommendation {
    pub fn item_names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name.as_str()).collect()
    }
}

//! Recommendation engine implementation

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::types::*;
use super::{
    DEFAULT_CURRENCY_SYMBOL, DEFAULT_MAX_SUGGESTIONS, NO_MATCH_MESSAGE, SUGGESTION_LIMIT,
};
use crate::catalog::Catalog;
use crate::domain::context::ConversationContext;
use crate::domain::product::Product;

#[derive(Clone, Debug)]
pub struct RecommendationEngine {
    max_items: usize,
    currency_symbol: String,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SUGGESTIONS, DEFAULT_CURRENCY_SYMBOL)
    }
}

impl RecommendationEngine {
    pub fn new(max_items: usize, currency_symbol: impl Into<String>) -> Self {
        Self {
            max_items: max_items.clamp(1, SUGGESTION_LIMIT),
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Catalog rows satisfying every slot that is set; unset slots do not constrain.
    pub fn filter<'a>(
        &self,
        context: &ConversationContext,
        catalog: &'a Catalog,
    ) -> Vec<&'a Product> {
        catalog
            .iter()
            .filter(|product| context.category.map_or(true, |wanted| wanted == product.category))
            .filter(|product| context.style.map_or(true, |style| style == product.style))
            .filter(|product| context.max_price.map_or(true, |limit| product.price <= limit))
            .collect()
    }

    pub fn recommend<R>(
        &self,
        context: &ConversationContext,
        catalog: &Catalog,
        policy: MatchPolicy,
        rng: &mut R,
    ) -> Recommendation
    where
        R: Rng + ?Sized,
    {
        let basis = recommendation_basis(context);
        let filtered = self.filter(context, catalog);

        let (items, fell_back) = if !filtered.is_empty() {
            let sampled = filtered
                .choose_multiple(rng, self.max_items)
                .map(|product| (*product).clone())
                .collect::<Vec<_>>();
            (sampled, false)
        } else if policy.allows_partial() {
            let sampled = catalog
                .products()
                .choose_multiple(rng, self.max_items)
                .cloned()
                .collect::<Vec<_>>();
            (sampled, true)
        } else {
            (Vec::new(), false)
        };

        debug!(
            event_name = "recommend.sampled",
            matched = filtered.len(),
            returned = items.len(),
            fell_back,
            "recommendation sampled"
        );

        let message = if items.is_empty() {
            NO_MATCH_MESSAGE.to_string()
        } else {
            self.render(&basis, &items)
        };
        let count = items.len();

        Recommendation { items, message, count, basis, fell_back }
    }

    fn render(&self, basis: &RecommendationBasis, items: &[Product]) -> String {
        let mut intro = String::from("Here are some suggestions");
        match basis {
            RecommendationBasis::Style(style) => {
                intro.push_str(&format!(" based on style: {style}"))
            }
            RecommendationBasis::Category(category) => {
                intro.push_str(&format!(" based on category: {category}"))
            }
            RecommendationBasis::Budget(max_price) => {
                intro.push_str(&format!(" under {}{max_price}", self.currency_symbol))
            }
            RecommendationBasis::Unconstrained => {}
        }
        intro.push('.');

        let lines = items
            .iter()
            .map(|item| format!("- {} ({}{:.2})", item.name, self.currency_symbol, item.price))
            .collect::<Vec<_>>();

        format!("{intro}\n{}", lines.join("\n"))
    }
}

fn recommendation_basis(context: &ConversationContext) -> RecommendationBasis {
    if let Some(style) = context.style {
        RecommendationBasis::Style(style)
    } else if let Some(category) = context.category {
        RecommendationBasis::Category(category)
    } else if let Some(max_price) = context.max_price {
        RecommendationBasis::Budget(max_price)
    } else {
        RecommendationBasis::Unconstrained
    }
}

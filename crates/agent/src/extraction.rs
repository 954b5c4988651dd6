use rust_decimal::Decimal;
use shopmate_core::domain::context::ExtractedSlots;
use shopmate_core::domain::product::{Category, Style};

use crate::fuzzy::SynonymFuzzyMatcher;

/// One strategy for resolving category and style from raw text.
pub trait SlotMatcher: Send + Sync {
    fn name(&self) -> &'static str;
    fn match_category(&self, text: &str) -> Option<Category>;
    fn match_style(&self, text: &str) -> Option<Style>;
}

/// Case-insensitive scan for the literal category/style keywords.
#[derive(Clone, Debug, Default)]
pub struct ExactKeywordMatcher;

impl SlotMatcher for ExactKeywordMatcher {
    fn name(&self) -> &'static str {
        "exact_keyword"
    }

    fn match_category(&self, text: &str) -> Option<Category> {
        let normalized = normalize_text(text);
        Category::ALL.into_iter().find(|category| normalized.contains(category.as_str()))
    }

    fn match_style(&self, text: &str) -> Option<Style> {
        let normalized = normalize_text(text);
        Style::ALL.into_iter().find(|style| normalized.contains(style.as_str()))
    }
}

/// Ordered matcher pipeline; for each slot the first matcher that answers wins.
pub struct SlotExtractor {
    matchers: Vec<Box<dyn SlotMatcher>>,
}

impl Default for SlotExtractor {
    fn default() -> Self {
        Self::with_fuzzy_threshold(crate::fuzzy::DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl std::fmt::Debug for SlotExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotExtractor").field("matchers", &self.matcher_names()).finish()
    }
}

impl SlotExtractor {
    pub fn with_fuzzy_threshold(threshold: u8) -> Self {
        Self::with_matchers(vec![
            Box::new(ExactKeywordMatcher),
            Box::new(SynonymFuzzyMatcher::new(threshold)),
        ])
    }

    pub fn with_matchers(matchers: Vec<Box<dyn SlotMatcher>>) -> Self {
        Self { matchers }
    }

    pub fn push_matcher<M>(&mut self, matcher: M)
    where
        M: SlotMatcher + 'static,
    {
        self.matchers.push(Box::new(matcher));
    }

    pub fn matcher_names(&self) -> Vec<&'static str> {
        self.matchers.iter().map(|matcher| matcher.name()).collect()
    }

    pub fn extract(&self, utterance: &str) -> ExtractedSlots {
        ExtractedSlots {
            price: extract_price(utterance),
            category: self.matchers.iter().find_map(|matcher| matcher.match_category(utterance)),
            style: self.matchers.iter().find_map(|matcher| matcher.match_style(utterance)),
        }
    }
}

/// First run of ASCII digits as a positive whole amount.
pub fn extract_price(text: &str) -> Option<Decimal> {
    let start = text.find(|character: char| character.is_ascii_digit())?;
    let digits = &text[start..];
    let end = digits.find(|character: char| !character.is_ascii_digit()).unwrap_or(digits.len());

    let amount = digits[..end].parse::<u64>().ok()?;
    (amount > 0).then(|| Decimal::from(amount))
}

fn normalize_text(text: &str) -> String {
    text.to_lowercase()
}

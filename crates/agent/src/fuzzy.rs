use shopmate_core::domain::product::{Category, Style};

use crate::extraction::SlotMatcher;

pub const DEFAULT_SIMILARITY_THRESHOLD: u8 = 80;

/// Utterances shorter than this are only scored against synonyms that fit
/// inside them.
const MIN_PARTIAL_LEN: usize = 3;

const STYLE_SYNONYMS: &[(Style, &[&str])] = &[
    (
        Style::Casual,
        &[
            "relaxed",
            "laid back",
            "easygoing",
            "simple",
            "streetwear",
            "chill",
            "basic",
            "everyday",
            "regular",
            "loose",
            "cool",
            "lowkey",
        ],
    ),
    (
        Style::Formal,
        &[
            "elegant",
            "dressy",
            "suit",
            "professional",
            "office",
            "ceremony",
            "business",
            "classic",
            "gala",
            "fancy",
            "neat",
            "well dressed",
        ],
    ),
    (
        Style::Sporty,
        &[
            "athletic",
            "active",
            "gym",
            "fit",
            "training",
            "sportswear",
            "jogging",
            "outdoor",
            "movement",
            "performance",
            "track",
            "fitness",
            "sport",
        ],
    ),
];

const CATEGORY_SYNONYMS: &[(Category, &[&str])] = &[
    (
        Category::Jacket,
        &[
            "hoodie",
            "coat",
            "blazer",
            "parka",
            "windbreaker",
            "bomber",
            "zip up",
            "outerwear",
            "puffer",
            "down jacket",
            "anorak",
            "trench",
        ],
    ),
    (
        Category::Shoes,
        &[
            "sneakers",
            "trainers",
            "boots",
            "footwear",
            "sandals",
            "heels",
            "loafers",
            "derby",
            "canvas",
            "leather shoes",
            "slip-ons",
            "kicks",
        ],
    ),
    (
        Category::Shirt,
        &[
            "t-shirt",
            "tee",
            "polo",
            "top",
            "blouse",
            "button up",
            "long sleeve",
            "casual shirt",
            "crop top",
            "tank top",
            "collared shirt",
            "jersey",
        ],
    ),
    (
        Category::Pants,
        &[
            "jeans",
            "trousers",
            "leggings",
            "joggers",
            "cargo",
            "chinos",
            "sweatpants",
            "slacks",
            "bottoms",
            "denim",
            "formal pants",
        ],
    ),
    (
        Category::Dress,
        &[
            "gown",
            "partywear",
            "one piece",
            "evening dress",
            "maxi",
            "midi",
            "mini dress",
            "formalwear",
            "summer dress",
            "cocktail",
            "bodycon",
        ],
    ),
];

/// Best similarity (0-100) between the shorter string and any equal-length
/// window of the longer one.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (shorter, longer) =
        if a.chars().count() <= b.chars().count() { (a, b) } else { (b, a) };
    let window_len = shorter.chars().count();
    let longer_chars = longer.chars().collect::<Vec<_>>();

    let mut best = 0.0_f64;
    for window in longer_chars.windows(window_len) {
        let candidate = window.iter().collect::<String>();
        let score = strsim::normalized_levenshtein(&shorter, &candidate);
        if score > best {
            best = score;
            if best >= 1.0 {
                break;
            }
        }
    }

    (best * 100.0).round() as u8
}

/// Scores an utterance against per-label synonym lists and returns the first
/// label whose synonym clears the threshold.
#[derive(Clone, Debug)]
pub struct SynonymFuzzyMatcher {
    threshold: u8,
}

impl Default for SynonymFuzzyMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl SynonymFuzzyMatcher {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    fn first_match<T: Copy>(&self, table: &[(T, &[&str])], text: &str) -> Option<T> {
        let text = text.to_lowercase();
        let text_len = text.chars().count();
        table.iter().find_map(|(label, synonyms)| {
            synonyms
                .iter()
                .filter(|synonym| comparable(text_len, synonym.chars().count()))
                .any(|synonym| partial_ratio(synonym, &text) >= self.threshold)
                .then_some(*label)
        })
    }
}

/// A longer synonym is only scored when the utterance covers at least two
/// thirds of it, so "boot" finds "boots" but "um" never lands inside "summer dress".
fn comparable(text_len: usize, synonym_len: usize) -> bool {
    synonym_len <= text_len || (text_len >= MIN_PARTIAL_LEN && text_len * 3 >= synonym_len * 2)
}

impl SlotMatcher for SynonymFuzzyMatcher {
    fn name(&self) -> &'static str {
        "fuzzy_synonym"
    }

    fn match_category(&self, text: &str) -> Option<Category> {
        self.first_match(CATEGORY_SYNONYMS, text)
    }

    fn match_style(&self, text: &str) -> Option<Style> {
        self.first_match(STYLE_SYNONYMS, text)
    }
}

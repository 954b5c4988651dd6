use anyhow::Result;
use shopmate_core::flows::IntentLabel;

/// Labels a raw utterance. Implementations may fail; the controller treats a
/// failure as [`IntentLabel::Other`].
pub trait IntentClassifier: Send + Sync {
    fn classify(&self, utterance: &str) -> Result<IntentLabel>;
}

impl<F> IntentClassifier for F
where
    F: Fn(&str) -> IntentLabel + Send + Sync,
{
    fn classify(&self, utterance: &str) -> Result<IntentLabel> {
        Ok(self(utterance))
    }
}

const GREET_MAX_TOKENS: usize = 3;

// Checked top to bottom; the first rule with a matching phrase wins.
const PHRASE_RULES: &[(IntentLabel, &[&str])] = &[
    (
        IntentLabel::Done,
        &["bye", "goodbye", "good bye", "quit", "exit", "that's all", "that is all", "see you"],
    ),
    (IntentLabel::ThankYou, &["thanks", "thank you", "thank u", "thx", "cheers", "ty"]),
    (
        IntentLabel::Undecided,
        &[
            "not sure",
            "no idea",
            "don't know",
            "dont know",
            "undecided",
            "can't decide",
            "cant decide",
            "you choose",
            "surprise me",
        ],
    ),
    (
        IntentLabel::Reject,
        &[
            "no",
            "nope",
            "nah",
            "not really",
            "don't like",
            "dont like",
            "something else",
            "not for me",
        ],
    ),
    (
        IntentLabel::Confirmation,
        &["yes", "yeah", "yep", "sure", "ok", "okay", "looks good", "i like", "perfect", "love it"],
    ),
];

const GREET_PHRASES: &[&str] =
    &["hi", "hello", "hey", "hiya", "good morning", "good afternoon", "good evening"];

/// Deterministic phrase rules over lowercase word tokens.
#[derive(Clone, Debug, Default)]
pub struct KeywordIntentClassifier;

impl KeywordIntentClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn label(&self, utterance: &str) -> IntentLabel {
        let normalized = normalize_text(utterance);
        let tokens = tokenize(&normalized);
        if tokens.is_empty() {
            return IntentLabel::Other;
        }

        for (label, phrases) in PHRASE_RULES {
            if phrases.iter().any(|phrase| contains_phrase(&tokens, phrase)) {
                return *label;
            }
        }

        if tokens.len() <= GREET_MAX_TOKENS
            && GREET_PHRASES.iter().any(|phrase| contains_phrase(&tokens, phrase))
        {
            return IntentLabel::Greet;
        }

        IntentLabel::Other
    }
}

impl IntentClassifier for KeywordIntentClassifier {
    fn classify(&self, utterance: &str) -> Result<IntentLabel> {
        Ok(self.label(utterance))
    }
}

fn normalize_text(text: &str) -> String {
    text.to_lowercase().replace('\u{2019}', "'")
}

fn tokenize(text: &str) -> Vec<&str> {
    text.split(|character: char| !(character.is_alphanumeric() || character == '\''))
        .filter(|token| !token.is_empty())
        .collect()
}

fn contains_phrase(tokens: &[&str], phrase: &str) -> bool {
    let needle = phrase.split_whitespace().collect::<Vec<_>>();
    !needle.is_empty() && tokens.windows(needle.len()).any(|window| window == needle.as_slice())
}

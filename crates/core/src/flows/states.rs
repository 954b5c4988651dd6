use std::fmt;

use serde::{Deserialize, Serialize};

/// Turn classification label produced by the intent classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentLabel {
    Greet,
    ThankYou,
    Confirmation,
    Reject,
    Undecided,
    Done,
    Other,
}

impl IntentLabel {
    pub const ALL: [IntentLabel; 7] = [
        IntentLabel::Greet,
        IntentLabel::ThankYou,
        IntentLabel::Confirmation,
        IntentLabel::Reject,
        IntentLabel::Undecided,
        IntentLabel::Done,
        IntentLabel::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greet => "greet",
            Self::ThankYou => "thank_you",
            Self::Confirmation => "confirmation",
            Self::Reject => "reject",
            Self::Undecided => "undecided",
            Self::Done => "done",
            Self::Other => "other",
        }
    }

    /// Unknown labels collapse to `Other`.
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|intent| intent.as_str() == normalized).unwrap_or(Self::Other)
    }
}

impl fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogueState {
    Gathering,
    AwaitingConfirmation,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAction {
    SayGoodbye,
    AcknowledgeThanks,
    Greet,
    AcceptRecommendation,
    AcknowledgeRejection,
    GuideUndecided,
    FillSlots,
    Ignore,
}

impl TurnAction {
    /// Actions that conclude a conversation cycle and discard the context.
    pub fn resets_context(&self) -> bool {
        matches!(
            self,
            Self::AcceptRecommendation | Self::AcknowledgeRejection | Self::GuideUndecided
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub from: DialogueState,
    pub to: DialogueState,
    pub label: IntentLabel,
    pub action: TurnAction,
}

use crate::domain::context::ConversationContext;
use crate::flows::states::{DialogueState, IntentLabel, TurnAction, TurnOutcome};

pub trait DialoguePolicy {
    fn initial_state(&self) -> DialogueState;
    fn route(
        &self,
        current: &DialogueState,
        label: &IntentLabel,
        context: &ConversationContext,
    ) -> TurnAction;
}

/// Preference-gathering dialogue: collect category, style and budget, then
/// ask the shopper to confirm a small suggestion set.
#[derive(Clone, Debug, Default)]
pub struct ShoppingDialogue;

impl DialoguePolicy for ShoppingDialogue {
    fn initial_state(&self) -> DialogueState {
        DialogueState::Gathering
    }

    fn route(
        &self,
        current: &DialogueState,
        label: &IntentLabel,
        context: &ConversationContext,
    ) -> TurnAction {
        route_shopping(current, label, context)
    }
}

pub struct DialogueEngine<P> {
    policy: P,
}

impl<P> DialogueEngine<P>
where
    P: DialoguePolicy,
{
    pub fn new(policy: P) -> Self {
        Self { policy }
    }

    pub fn initial_state(&self) -> DialogueState {
        self.policy.initial_state()
    }

    pub fn route(
        &self,
        current: &DialogueState,
        label: &IntentLabel,
        context: &ConversationContext,
    ) -> TurnAction {
        self.policy.route(current, label, context)
    }

    /// State reached once `action` has been carried out against `context`.
    pub fn settle(&self, action: &TurnAction, context: &ConversationContext) -> DialogueState {
        match action {
            TurnAction::SayGoodbye => DialogueState::Done,
            _ => context.state(),
        }
    }

    pub fn outcome(
        &self,
        from: DialogueState,
        label: IntentLabel,
        action: TurnAction,
        context: &ConversationContext,
    ) -> TurnOutcome {
        let to = if from == DialogueState::Done {
            DialogueState::Done
        } else {
            self.settle(&action, context)
        };
        TurnOutcome { from, to, label, action }
    }
}

impl Default for DialogueEngine<ShoppingDialogue> {
    fn default() -> Self {
        Self::new(ShoppingDialogue)
    }
}

fn route_shopping(
    current: &DialogueState,
    label: &IntentLabel,
    context: &ConversationContext,
) -> TurnAction {
    use DialogueState::{AwaitingConfirmation, Done};
    use TurnAction::{
        AcceptRecommendation, AcknowledgeRejection, AcknowledgeThanks, FillSlots, Greet,
        GuideUndecided, Ignore, SayGoodbye,
    };

    match (current, label) {
        (Done, _) => Ignore,
        (_, IntentLabel::Done) => SayGoodbye,
        (_, IntentLabel::ThankYou) => AcknowledgeThanks,
        (_, IntentLabel::Greet) => Greet,
        (AwaitingConfirmation, IntentLabel::Confirmation)
            if context.last_recommendation_count > 0 =>
        {
            AcceptRecommendation
        }
        (AwaitingConfirmation, IntentLabel::Reject) => AcknowledgeRejection,
        (_, IntentLabel::Undecided) => GuideUndecided,
        // guard mismatches degrade to slot handling
        _ => FillSlots,
    }
}

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shopmate_core::catalog::Catalog;
use shopmate_core::config::{
    ConversationConfig, DEFAULT_FUZZY_THRESHOLD, DEFAULT_INVALID_TURN_LIMIT,
};
use shopmate_core::domain::context::ConversationContext;
use shopmate_core::flows::{
    DialogueEngine, DialogueState, IntentLabel, ShoppingDialogue, TurnAction,
};
use shopmate_core::recommend::{
    MatchPolicy, Recommendation, RecommendationEngine, DEFAULT_CURRENCY_SYMBOL,
    DEFAULT_MAX_SUGGESTIONS, SUGGESTION_LIMIT,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::classifier::IntentClassifier;
use crate::extraction::SlotExtractor;
use crate::responses::{
    self, missing_slot_hint, missing_slot_prompt, ASK_PRODUCT, CONFIRM_QUESTION, GREET, NUDGE,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversationSettings {
    pub max_suggestions: usize,
    pub invalid_turn_limit: u32,
    pub fuzzy_threshold: u8,
    pub seed: Option<u64>,
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self {
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            invalid_turn_limit: DEFAULT_INVALID_TURN_LIMIT,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            seed: None,
        }
    }
}

impl From<&ConversationConfig> for ConversationSettings {
    fn from(config: &ConversationConfig) -> Self {
        Self {
            max_suggestions: config.max_suggestions,
            invalid_turn_limit: config.invalid_turn_limit,
            fuzzy_threshold: config.fuzzy_threshold,
            seed: config.seed,
        }
    }
}

/// Assistant output for one utterance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReply {
    pub lines: Vec<String>,
    pub action: TurnAction,
    pub finished: bool,
}

impl TurnReply {
    fn ignored(finished: bool) -> Self {
        Self { lines: Vec::new(), action: TurnAction::Ignore, finished }
    }

    pub fn is_silent(&self) -> bool {
        self.lines.is_empty()
    }
}

/// One shopper conversation. The catalog and extractor are shared; the
/// context and RNG belong to this conversation alone.
pub struct ShoppingAssistant<C, R = StdRng> {
    conversation_id: Uuid,
    classifier: C,
    extractor: Arc<SlotExtractor>,
    catalog: Arc<Catalog>,
    recommender: RecommendationEngine,
    dialogue: DialogueEngine<ShoppingDialogue>,
    context: ConversationContext,
    settings: ConversationSettings,
    finished: bool,
    rng: R,
}

impl<C> ShoppingAssistant<C, StdRng>
where
    C: IntentClassifier,
{
    pub fn new(classifier: C, catalog: Arc<Catalog>, settings: ConversationSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(classifier, catalog, settings, rng)
    }
}

impl<C, R> ShoppingAssistant<C, R>
where
    C: IntentClassifier,
    R: Rng,
{
    pub fn with_rng(
        classifier: C,
        catalog: Arc<Catalog>,
        settings: ConversationSettings,
        rng: R,
    ) -> Self {
        Self {
            conversation_id: Uuid::new_v4(),
            classifier,
            extractor: Arc::new(SlotExtractor::with_fuzzy_threshold(settings.fuzzy_threshold)),
            catalog,
            recommender: RecommendationEngine::new(
                settings.max_suggestions,
                DEFAULT_CURRENCY_SYMBOL,
            ),
            dialogue: DialogueEngine::default(),
            context: ConversationContext::new(),
            settings,
            finished: false,
            rng,
        }
    }

    /// Swaps in an extractor shared with other conversations.
    pub fn with_extractor(mut self, extractor: Arc<SlotExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_currency_symbol(mut self, currency_symbol: impl Into<String>) -> Self {
        self.recommender =
            RecommendationEngine::new(self.settings.max_suggestions, currency_symbol);
        self
    }

    /// Resumes from a previously captured context.
    pub fn with_context(mut self, context: ConversationContext) -> Self {
        self.context = context;
        self
    }

    pub fn welcome(&self) -> &'static str {
        responses::WELCOME
    }

    pub fn conversation_id(&self) -> Uuid {
        self.conversation_id
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn state(&self) -> DialogueState {
        if self.finished {
            DialogueState::Done
        } else {
            self.context.state()
        }
    }

    pub fn handle_turn(&mut self, utterance: &str) -> TurnReply {
        let utterance = utterance.trim();
        if utterance.is_empty() {
            return TurnReply::ignored(self.finished);
        }

        let label = self.classify(utterance);
        let from = self.state();
        let action = self.dialogue.route(&from, &label, &self.context);

        let lines = match action {
            TurnAction::SayGoodbye => {
                self.finished = true;
                vec![responses::DONE.pick(&mut self.rng).to_string()]
            }
            TurnAction::AcknowledgeThanks => {
                vec![responses::THANK_YOU.pick(&mut self.rng).to_string()]
            }
            TurnAction::Greet => vec![GREET.to_string()],
            TurnAction::AcceptRecommendation => vec![
                responses::CONFIRMATION.pick(&mut self.rng).to_string(),
                ASK_PRODUCT.to_string(),
            ],
            TurnAction::AcknowledgeRejection => {
                vec![responses::REJECTION.pick(&mut self.rng).to_string()]
            }
            TurnAction::GuideUndecided => self.guide_undecided(),
            TurnAction::FillSlots => self.fill_slots(utterance),
            TurnAction::Ignore => Vec::new(),
        };

        if action.resets_context() {
            self.context.reset();
        }

        let outcome = self.dialogue.outcome(from, label, action, &self.context);
        info!(
            event_name = "conversation.turn_routed",
            conversation_id = %self.conversation_id,
            intent = outcome.label.as_str(),
            action = ?outcome.action,
            from = ?outcome.from,
            to = ?outcome.to,
            "turn routed"
        );

        TurnReply { lines, action, finished: self.finished }
    }

    fn classify(&self, utterance: &str) -> IntentLabel {
        match self.classifier.classify(utterance) {
            Ok(label) => label,
            Err(error) => {
                warn!(
                    event_name = "conversation.classifier_failed",
                    conversation_id = %self.conversation_id,
                    error = %error,
                    "intent classifier failed; treating utterance as other"
                );
                IntentLabel::Other
            }
        }
    }

    fn recommend(&mut self) -> Recommendation {
        let recommendation = self.recommender.recommend(
            &self.context,
            &self.catalog,
            MatchPolicy::AllowPartial,
            &mut self.rng,
        );
        self.context.last_recommendation_count = recommendation.count;
        recommendation
    }

    fn guide_undecided(&mut self) -> Vec<String> {
        let guidance = responses::GUIDANCE.pick(&mut self.rng).to_string();
        let recommendation = self.recommend();
        vec![guidance, format!("{}{}", recommendation.message, missing_slot_hint(&self.context))]
    }

    fn fill_slots(&mut self, utterance: &str) -> Vec<String> {
        let slots = self.extractor.extract(utterance);
        let extracted = self.context.apply(&slots);
        debug!(
            event_name = "conversation.slots_extracted",
            conversation_id = %self.conversation_id,
            extracted,
            category = ?self.context.category,
            style = ?self.context.style,
            max_price = ?self.context.max_price,
            "slots merged into context"
        );

        if self.context.has_any_slot() {
            let recommendation = self.recommend();
            let mut lines =
                vec![format!("{}{}", recommendation.message, missing_slot_hint(&self.context))];

            let confirmable =
                self.context.is_complete() && recommendation.count <= SUGGESTION_LIMIT;
            if confirmable {
                lines.push(CONFIRM_QUESTION.to_string());
            }
            self.context.awaiting_confirmation = confirmable;
            return lines;
        }

        self.context.awaiting_confirmation = false;
        self.context.invalid_turn_count += 1;
        if self.context.invalid_turn_count >= self.settings.invalid_turn_limit {
            self.context.invalid_turn_count = 0;
            return vec![NUDGE.to_string()];
        }

        missing_slot_prompt(&self.context).map(str::to_string).into_iter().collect()
    }
}

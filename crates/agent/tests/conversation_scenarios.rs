use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use shopmate_agent::responses::{
    ASK_PRODUCT, CONFIRMATION, CONFIRM_QUESTION, GREET, GUIDANCE, NUDGE, REJECTION,
};
use shopmate_agent::{
    ConversationSettings, ExactKeywordMatcher, IntentClassifier, KeywordIntentClassifier,
    ShoppingAssistant, SlotExtractor,
};
use shopmate_core::{
    Catalog, Category, ConversationContext, DialogueState, IntentLabel, Product, Style, TurnAction,
};

fn assistant_with<C: IntentClassifier>(classifier: C, catalog: Catalog) -> ShoppingAssistant<C> {
    ShoppingAssistant::with_rng(
        classifier,
        Arc::new(catalog),
        ConversationSettings::default(),
        StdRng::seed_from_u64(2024),
    )
}

fn other(_: &str) -> IntentLabel {
    IntentLabel::Other
}

fn no_shoes_catalog() -> Catalog {
    Catalog::new(vec![
        Product::new("Field Jacket", Category::Jacket, Style::Casual, Decimal::from(60)),
        Product::new("Oxford Shirt", Category::Shirt, Style::Formal, Decimal::from(35)),
        Product::new("Track Pants", Category::Pants, Style::Sporty, Decimal::from(25)),
        Product::new("Slip Dress", Category::Dress, Style::Casual, Decimal::from(45)),
    ])
}

fn pending_confirmation() -> ConversationContext {
    ConversationContext {
        category: Some(Category::Jacket),
        style: Some(Style::Casual),
        max_price: Some(Decimal::from(50)),
        awaiting_confirmation: true,
        last_recommendation_count: 2,
        invalid_turn_count: 0,
    }
}

#[test]
fn rich_request_fills_every_slot_and_asks_for_confirmation() {
    let mut assistant = assistant_with(other, Catalog::demo());

    let reply = assistant.handle_turn("I want a casual jacket under 50");

    let context = assistant.context();
    assert_eq!(context.style, Some(Style::Casual));
    assert_eq!(context.category, Some(Category::Jacket));
    assert_eq!(context.max_price, Some(Decimal::from(50)));
    assert!(context.awaiting_confirmation);
    assert_eq!(context.last_recommendation_count, 1);

    assert_eq!(reply.action, TurnAction::FillSlots);
    assert_eq!(
        reply.lines,
        vec![
            "Here are some suggestions based on style: casual.\n- Denim Trucker Jacket (£45.00)"
                .to_string(),
            CONFIRM_QUESTION.to_string(),
        ]
    );
    assert_eq!(assistant.state(), DialogueState::AwaitingConfirmation);
}

#[test]
fn oversized_sample_setting_still_caps_suggestions_at_three() {
    let jackets = (1..=6)
        .map(|n| {
            Product::new(format!("Jacket {n}"), Category::Jacket, Style::Casual, Decimal::from(40))
        })
        .collect::<Vec<_>>();
    let mut assistant = ShoppingAssistant::with_rng(
        other,
        Arc::new(Catalog::new(jackets)),
        ConversationSettings { max_suggestions: 5, ..ConversationSettings::default() },
        StdRng::seed_from_u64(8),
    );

    let reply = assistant.handle_turn("casual jacket under 50");

    assert_eq!(assistant.context().last_recommendation_count, 3);
    assert_eq!(reply.lines[0].lines().filter(|line| line.starts_with("- ")).count(), 3);
    assert!(assistant.context().awaiting_confirmation);
    assert_eq!(reply.lines.last().map(String::as_str), Some(CONFIRM_QUESTION));
}

#[test]
fn conversations_can_share_one_extractor() {
    let extractor = Arc::new(SlotExtractor::with_matchers(vec![Box::new(ExactKeywordMatcher)]));
    let catalog = Arc::new(Catalog::demo());
    let mut first =
        ShoppingAssistant::new(other, Arc::clone(&catalog), ConversationSettings::default())
            .with_extractor(Arc::clone(&extractor));
    let mut second =
        ShoppingAssistant::new(other, Arc::clone(&catalog), ConversationSettings::default())
            .with_extractor(Arc::clone(&extractor));

    assert_eq!(Arc::strong_count(&extractor), 3);

    // exact keywords only, so the synonym is not resolved
    assert_eq!(first.handle_turn("comfy trainers").lines, vec![ASK_PRODUCT.to_string()]);
    assert_eq!(first.context().category, None);

    second.handle_turn("formal shirt");
    assert_eq!(second.context().category, Some(Category::Shirt));
    assert_eq!(first.context().category, None);
}

#[test]
fn greeting_replies_with_fixed_prompt_and_leaves_context_alone() {
    let mut assistant = assistant_with(|_: &str| IntentLabel::Greet, Catalog::demo());

    let reply = assistant.handle_turn("hi");

    assert_eq!(reply.lines, vec![GREET.to_string()]);
    assert_eq!(assistant.context(), &ConversationContext::new());
}

#[test]
fn third_uninformative_turn_nudges_and_resets_counter() {
    let mut assistant = assistant_with(other, Catalog::demo());

    let first = assistant.handle_turn("um");
    assert_eq!(first.lines, vec![ASK_PRODUCT.to_string()]);
    assert_eq!(assistant.context().invalid_turn_count, 1);

    let second = assistant.handle_turn("not sure");
    assert_eq!(second.lines, vec![ASK_PRODUCT.to_string()]);
    assert_eq!(assistant.context().invalid_turn_count, 2);

    let third = assistant.handle_turn("maybe");
    assert_eq!(third.lines, vec![NUDGE.to_string()]);
    assert_eq!(assistant.context().invalid_turn_count, 0);
    assert!(!assistant.context().has_any_slot());
}

#[test]
fn informative_turn_resets_invalid_counter() {
    let mut assistant = assistant_with(other, Catalog::demo());

    assistant.handle_turn("um");
    assistant.handle_turn("hmm");
    assert_eq!(assistant.context().invalid_turn_count, 2);

    assistant.handle_turn("a dress");
    assert_eq!(assistant.context().invalid_turn_count, 0);
}

#[test]
fn missing_category_falls_back_to_three_catalog_items() {
    let mut assistant = assistant_with(other, no_shoes_catalog());

    let reply = assistant.handle_turn("show me shoes");

    assert_eq!(assistant.context().category, Some(Category::Shoes));
    assert_eq!(assistant.context().last_recommendation_count, 3);

    let message = &reply.lines[0];
    let mut lines = message.lines();
    assert_eq!(lines.next(), Some("Here are some suggestions based on category: shoes."));
    assert_eq!(lines.filter(|line| line.starts_with("- ")).count(), 3);
    assert!(message.ends_with(" You can tell me more: any preferred style? what's your budget?"));
    assert!(!assistant.context().awaiting_confirmation);
}

#[test]
fn accepted_confirmation_asks_for_next_product_and_resets() {
    let mut assistant = assistant_with(|_: &str| IntentLabel::Confirmation, Catalog::demo())
        .with_context(pending_confirmation());

    let reply = assistant.handle_turn("yes, love it");

    assert_eq!(reply.action, TurnAction::AcceptRecommendation);
    assert_eq!(reply.lines.len(), 2);
    assert!(CONFIRMATION.templates().contains(&reply.lines[0].as_str()));
    assert_eq!(reply.lines[1], ASK_PRODUCT);
    assert_eq!(assistant.context(), &ConversationContext::new());
    assert_eq!(assistant.state(), DialogueState::Gathering);
}

#[test]
fn confirmation_needs_a_shown_suggestion() {
    let mut context = pending_confirmation();
    context.last_recommendation_count = 0;
    let mut assistant =
        assistant_with(|_: &str| IntentLabel::Confirmation, Catalog::demo()).with_context(context);

    let reply = assistant.handle_turn("yes");

    assert_eq!(reply.action, TurnAction::FillSlots);
    assert!(assistant.context().is_complete());
}

#[test]
fn rejection_while_awaiting_confirmation_resets() {
    let mut assistant = assistant_with(|_: &str| IntentLabel::Reject, Catalog::demo())
        .with_context(pending_confirmation());

    let reply = assistant.handle_turn("no thanks");

    assert_eq!(reply.action, TurnAction::AcknowledgeRejection);
    assert!(REJECTION.templates().contains(&reply.lines[0].as_str()));
    assert_eq!(assistant.context(), &ConversationContext::new());
}

#[test]
fn undecided_shows_guidance_suggestions_and_hints_then_resets() {
    let mut assistant = assistant_with(|_: &str| IntentLabel::Undecided, Catalog::demo())
        .with_context(ConversationContext {
            style: Some(Style::Formal),
            ..ConversationContext::default()
        });

    let reply = assistant.handle_turn("I really can't decide");

    assert_eq!(reply.action, TurnAction::GuideUndecided);
    assert_eq!(reply.lines.len(), 2);
    assert!(GUIDANCE.templates().contains(&reply.lines[0].as_str()));
    assert!(reply.lines[1].starts_with("Here are some suggestions based on style: formal."));
    let hint = " You can tell me more: what category are you looking for? what's your budget?";
    assert!(reply.lines[1].ends_with(hint));
    assert_eq!(assistant.context(), &ConversationContext::new());
}

#[test]
fn fuzzy_synonym_resolves_category() {
    let mut assistant = assistant_with(other, Catalog::demo());

    assistant.handle_turn("comfy trainers");

    assert_eq!(assistant.context().category, Some(Category::Shoes));
    assert_eq!(assistant.context().style, None);
}

#[test]
fn newer_category_overwrites_older_one() {
    let mut assistant = assistant_with(other, Catalog::demo());

    assistant.handle_turn("looking for a jacket");
    assistant.handle_turn("actually make that a dress");

    assert_eq!(assistant.context().category, Some(Category::Dress));
}

#[test]
fn thanks_acknowledged_without_context_change() {
    let mut assistant = assistant_with(|_: &str| IntentLabel::ThankYou, Catalog::demo())
        .with_context(pending_confirmation());

    let reply = assistant.handle_turn("thanks!");

    assert_eq!(reply.action, TurnAction::AcknowledgeThanks);
    assert_eq!(assistant.context(), &pending_confirmation());
}

#[test]
fn confirmation_flag_only_survives_complete_small_suggestion_sets() {
    let mut assistant = assistant_with(other, Catalog::demo());
    let turns = ["sporty", "under 70", "um", "formal shirt", "pants", "budget 20", "hmm"];

    for utterance in turns {
        assistant.handle_turn(utterance);
        let context = assistant.context();
        let expected = context.is_complete() && context.last_recommendation_count <= 3;
        assert_eq!(context.awaiting_confirmation, expected, "after `{utterance}`");
    }
}

#[test]
fn same_seed_replays_same_conversation() {
    let script = ["hello", "something sporty", "under 60", "not sure", "thanks", "bye"];
    let run = || {
        let mut assistant = ShoppingAssistant::new(
            KeywordIntentClassifier::new(),
            Arc::new(Catalog::demo()),
            ConversationSettings { seed: Some(77), ..ConversationSettings::default() },
        );
        script.iter().map(|utterance| assistant.handle_turn(utterance).lines).collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}

#[test]
fn keyword_classifier_drives_a_full_purchase_cycle() {
    let mut assistant = assistant_with(KeywordIntentClassifier::new(), Catalog::demo());

    assert_eq!(assistant.handle_turn("hello").lines, vec![GREET.to_string()]);

    let offer = assistant.handle_turn("I want a casual jacket under 50");
    assert_eq!(offer.lines.last().map(String::as_str), Some(CONFIRM_QUESTION));

    let accepted = assistant.handle_turn("yes");
    assert_eq!(accepted.action, TurnAction::AcceptRecommendation);

    let goodbye = assistant.handle_turn("bye");
    assert!(goodbye.finished);
    assert!(assistant.is_finished());
    assert!(assistant.handle_turn("one more thing").is_silent());
}

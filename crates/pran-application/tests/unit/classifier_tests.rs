//! Tests for the joint safety and intent classifier

use std::sync::Arc;
use std::time::Duration;

use pran_application::prompts::{CLASSIFY_SYSTEM, SAFETY_SYSTEM};
use pran_application::use_cases::IntentClassifier;
use pran_domain::value_objects::{ClassificationOutcome, Intent, SafetyCategory};
use pran_providers::MokaCacheProvider;

use crate::test_utils::mock_services::{Reply, ScriptedModel, classification_json, safety_json};

fn classifier(model: Arc<ScriptedModel>) -> IntentClassifier {
    IntentClassifier::new(model, Arc::new(MokaCacheProvider::with_capacity(16)))
}

#[tokio::test]
async fn test_multi_domain_classification() {
    let model = ScriptedModel::new()
        .on(
            CLASSIFY_SYSTEM,
            Reply::text(classification_json(
                true,
                "yoga_support",
                &[("yoga_support", 0.9), ("ayush_support", 0.8)],
            )),
        )
        .into_arc();
    let result = classifier(Arc::clone(&model)).classify("home remedy for cough").await;

    assert!(result.is_safe);
    assert_eq!(result.safety_category, SafetyCategory::Safe);
    assert_eq!(result.primary_intent, Intent::YogaSupport);
    assert!(result.is_multi_domain);
    assert_eq!(
        result.intents().collect::<Vec<_>>(),
        vec![Intent::YogaSupport, Intent::AyushSupport]
    );
    assert_eq!(model.call_count(), 1);
}

#[tokio::test]
async fn test_fenced_reply_with_unknown_label() {
    let json = classification_json(
        true,
        "symptom_checker",
        &[("symptom_checker", 0.7), ("astrology", 0.95)],
    );
    let model = ScriptedModel::new()
        .on(CLASSIFY_SYSTEM, Reply::text(format!("```json\n{json}\n```")))
        .into_arc();
    let result = classifier(model).classify("I have a fever").await;

    assert_eq!(result.all_intents.len(), 1);
    assert_eq!(result.primary_intent, Intent::SymptomChecker);
    assert!(!result.is_multi_domain);
}

#[tokio::test]
async fn test_intents_capped() {
    let model = ScriptedModel::new()
        .on(
            CLASSIFY_SYSTEM,
            Reply::text(classification_json(
                true,
                "health_advisory",
                &[
                    ("health_advisory", 0.9),
                    ("yoga_support", 0.8),
                    ("ayush_support", 0.7),
                    ("mental_wellness_support", 0.6),
                ],
            )),
        )
        .into_arc();
    let result = classifier(model).classify("stay healthy in monsoon").await;
    assert_eq!(result.all_intents.len(), 3);
    assert!(result.intents().all(|i| i != Intent::MentalWellnessSupport));
}

#[tokio::test]
async fn test_unparseable_reply_falls_back() {
    let model = ScriptedModel::new()
        .on(CLASSIFY_SYSTEM, Reply::text("I think this is about yoga"))
        .into_arc();
    let classifier = classifier(model);

    let outcome = classifier.classify_outcome("hello").await;
    assert!(outcome.is_fallback());

    let result = classifier.classify("hello").await;
    assert!(result.is_safe);
    assert_eq!(result.primary_intent, Intent::GeneralConversation);
    assert_eq!(result.all_intents.len(), 1);
    assert!((result.all_intents[0].confidence - 1.0).abs() < f32::EPSILON);
    assert!(!result.is_multi_domain);
}

#[tokio::test]
async fn test_model_error_falls_back() {
    let model = ScriptedModel::new()
        .on(CLASSIFY_SYSTEM, Reply::Transient("timeout".into()))
        .into_arc();
    let outcome = classifier(model).classify_outcome("hello").await;
    assert!(matches!(outcome, ClassificationOutcome::Fallback { .. }));
}

#[tokio::test]
async fn test_fallback_is_not_cached() {
    let model = ScriptedModel::new()
        .on(CLASSIFY_SYSTEM, Reply::text("not json"))
        .into_arc();
    let classifier = classifier(Arc::clone(&model));
    classifier.classify("hello").await;
    classifier.classify("hello").await;
    assert_eq!(model.calls_for(CLASSIFY_SYSTEM), 2);
    assert_eq!(model.calls_for(SAFETY_SYSTEM), 0);
}

#[tokio::test]
async fn test_cache_hit_recomputes_safety() {
    let model = ScriptedModel::new()
        .on(
            CLASSIFY_SYSTEM,
            Reply::text(classification_json(true, "yoga_support", &[("yoga_support", 0.9)])),
        )
        .on(SAFETY_SYSTEM, Reply::text(safety_json(false)))
        .into_arc();
    let classifier = classifier(Arc::clone(&model));

    let first = classifier.classify("yoga for back pain").await;
    assert!(first.is_safe);

    let second = classifier.classify("yoga for back pain").await;
    assert!(!second.is_safe);
    assert_eq!(second.safety_category, SafetyCategory::Pii);
    assert_eq!(second.primary_intent, Intent::YogaSupport);

    assert_eq!(model.calls_for(CLASSIFY_SYSTEM), 1);
    assert_eq!(model.calls_for(SAFETY_SYSTEM), 1);
}

#[tokio::test]
async fn test_cache_is_keyed_by_exact_text() {
    let model = ScriptedModel::new()
        .on(
            CLASSIFY_SYSTEM,
            Reply::text(classification_json(true, "yoga_support", &[("yoga_support", 0.9)])),
        )
        .into_arc();
    let classifier = classifier(Arc::clone(&model));
    classifier.classify("yoga").await;
    classifier.classify("Yoga").await;
    assert_eq!(model.calls_for(CLASSIFY_SYSTEM), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_identical_queries_classify_once() {
    let model = ScriptedModel::new()
        .on(
            CLASSIFY_SYSTEM,
            Reply::text(classification_json(
                true,
                "ayush_support",
                &[("ayush_support", 0.9), ("yoga_support", 0.6)],
            )),
        )
        .on(SAFETY_SYSTEM, Reply::text(safety_json(true)))
        .with_delay(Duration::from_millis(20))
        .into_arc();
    let classifier = Arc::new(classifier(Arc::clone(&model)));

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let classifier = Arc::clone(&classifier);
            tokio::spawn(async move { classifier.classify("turmeric for cold").await })
        })
        .collect();

    for task in tasks {
        let result = task.await.expect("classification task");
        assert_eq!(result.primary_intent, Intent::AyushSupport);
        assert!(result.is_multi_domain);
    }

    assert_eq!(model.calls_for(CLASSIFY_SYSTEM), 1);
    assert_eq!(model.calls_for(SAFETY_SYSTEM), 7);
    assert_eq!(model.call_count(), 8);
}

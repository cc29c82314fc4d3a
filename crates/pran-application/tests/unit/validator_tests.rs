//! Tests for the response validator

use pran_application::prompts::VALIDATE_SYSTEM;
use pran_application::use_cases::ResponseValidator;

use crate::test_utils::mock_services::{Reply, ScriptedModel};

#[tokio::test]
async fn test_blocking_verdict() {
    let model = ScriptedModel::new()
        .on(
            VALIDATE_SYSTEM,
            Reply::text(r#"{"is_safe": false, "reason": "dangerous dosage", "revised_response": null}"#),
        )
        .into_arc();
    let verdict = ResponseValidator::new(model).validate("q", "Take 20 tablets.").await;
    assert!(!verdict.is_safe);
    assert_eq!(verdict.apply("Take 20 tablets."), None);
}

#[tokio::test]
async fn test_disclaimer_is_appended() {
    let model = ScriptedModel::new()
        .on(
            VALIDATE_SYSTEM,
            Reply::text(
                r#"{"is_safe": true, "reason": "borderline", "revised_response": "Consult a doctor before fasting."}"#,
            ),
        )
        .into_arc();
    let verdict = ResponseValidator::new(model).validate("q", "Fast for two days.").await;
    assert_eq!(
        verdict.apply("Fast for two days.").as_deref(),
        Some("Fast for two days.\n\nConsult a doctor before fasting.")
    );
}

#[tokio::test]
async fn test_revision_containing_response_replaces_it() {
    let model = ScriptedModel::new()
        .on(
            VALIDATE_SYSTEM,
            Reply::text(
                r#"{"is_safe": true, "revised_response": "Note: mild remedy. Drink warm water."}"#,
            ),
        )
        .into_arc();
    let verdict = ResponseValidator::new(model).validate("q", "Drink warm water.").await;
    assert_eq!(
        verdict.apply("Drink warm water.").as_deref(),
        Some("Note: mild remedy. Drink warm water.")
    );
}

#[tokio::test]
async fn test_fails_open_on_model_error() {
    let model = ScriptedModel::new()
        .on(VALIDATE_SYSTEM, Reply::Transient("502".into()))
        .into_arc();
    let verdict = ResponseValidator::new(model).validate("q", "answer").await;
    assert!(verdict.is_safe);
    assert_eq!(verdict.apply("answer").as_deref(), Some("answer"));
}

#[tokio::test]
async fn test_fails_open_on_missing_flag() {
    let model = ScriptedModel::new()
        .on(VALIDATE_SYSTEM, Reply::text(r#"{"reason": "unsure"}"#))
        .into_arc();
    let verdict = ResponseValidator::new(model).validate("q", "answer").await;
    assert!(verdict.is_safe);
    assert!(verdict.revised_response.is_none());
}

//! Tests for document analysis

use std::time::Duration;

use pran_application::prompts::ANALYZE_SYSTEM;
use pran_application::use_cases::DocumentAnalyzer;

use crate::test_utils::mock_services::{Reply, ScriptedModel};

const LAB_REPORT: &str = r#"{
    "document_type": "lab_report",
    "patient_name": "R. Sharma",
    "findings": ["Low haemoglobin"],
    "test_results": [{"test": "Hb", "value": "9.8", "unit": "g/dL", "status": "low"}],
    "summary": "Mild anaemia."
}"#;

#[tokio::test]
async fn test_structured_summary() {
    let model = ScriptedModel::new()
        .on(ANALYZE_SYSTEM, Reply::text(LAB_REPORT))
        .into_arc();
    let analysis = DocumentAnalyzer::new(model).analyze("Haemoglobin 9.8 g/dL").await;

    assert!(analysis.analyzed);
    assert!(analysis.error.is_none());
    assert_eq!(analysis.document_type.as_deref(), Some("lab_report"));
    assert_eq!(analysis.test_results.len(), 1);
    assert_eq!(analysis.test_results[0].status, "low");
    assert!(analysis.medications.is_empty());
}

#[tokio::test]
async fn test_only_leading_characters_are_sent() {
    let model = ScriptedModel::new()
        .on(ANALYZE_SYSTEM, Reply::text(LAB_REPORT))
        .into_arc();
    let text = "x".repeat(5000);
    DocumentAnalyzer::new(model.clone()).analyze(&text).await;
    assert_eq!(model.calls()[0].user.chars().count(), 2000);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_yields_pending() {
    let model = ScriptedModel::new()
        .on(ANALYZE_SYSTEM, Reply::text(LAB_REPORT))
        .with_delay(Duration::from_secs(60))
        .into_arc();
    let analysis = DocumentAnalyzer::new(model).analyze("abcde").await;

    assert!(!analysis.analyzed);
    assert_eq!(analysis.error.as_deref(), Some("Analysis timed out"));
    assert_eq!(analysis.summary, "Document uploaded (5 characters). Analysis pending.");
}

#[tokio::test]
async fn test_unusable_reply_yields_unavailable() {
    let model = ScriptedModel::new()
        .on(ANALYZE_SYSTEM, Reply::text("Sorry, I cannot read this."))
        .into_arc();
    let analysis = DocumentAnalyzer::new(model).analyze("scan").await;
    assert!(!analysis.analyzed);
    assert!(analysis.error.is_some());
    assert_eq!(
        analysis.summary,
        "Document uploaded successfully. Detailed analysis unavailable."
    );
}

//! Document Analysis Value Objects
//!
//! Structured summary of an uploaded medical document.

use serde::{Deserialize, Serialize};

/// One laboratory result extracted from a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TestResult {
    /// Test name
    #[serde(default)]
    pub test: String,
    /// Reported value
    #[serde(default)]
    pub value: String,
    /// Unit of the value
    #[serde(default)]
    pub unit: String,
    /// normal, high, low or abnormal
    #[serde(default)]
    pub status: String,
}

/// Value Object: Document Analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DocumentAnalysis {
    /// Whether the model produced an analysis
    #[serde(default)]
    pub analyzed: bool,
    /// Why no analysis is available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// lab_report, prescription, medical_record, discharge_summary or other
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    /// Patient name, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    /// Key findings
    #[serde(default)]
    pub findings: Vec<String>,
    /// Medications mentioned
    #[serde(default)]
    pub medications: Vec<String>,
    /// Diagnoses mentioned
    #[serde(default)]
    pub diagnoses: Vec<String>,
    /// Laboratory results
    #[serde(default)]
    pub test_results: Vec<TestResult>,
    /// Short plain-language summary
    #[serde(default)]
    pub summary: String,
}

impl DocumentAnalysis {
    /// Placeholder returned when analysis exceeded its time bound
    pub fn pending(document_chars: usize) -> Self {
        Self {
            analyzed: false,
            error: Some("Analysis timed out".to_string()),
            summary: format!("Document uploaded ({document_chars} characters). Analysis pending."),
            ..Self::default()
        }
    }

    /// Placeholder returned when analysis failed for any other reason
    pub fn unavailable(error: impl Into<String>) -> Self {
        Self {
            analyzed: false,
            error: Some(error.into()),
            summary: "Document uploaded successfully. Detailed analysis unavailable.".to_string(),
            ..Self::default()
        }
    }
}

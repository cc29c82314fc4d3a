//! Intent Value Objects
//!
//! Closed set of healthcare domains a query can be routed to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Domain label a query is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Government health insurance, schemes and subsidies
    GovernmentSchemeSupport,
    /// Stress, anxiety, depression and emotional well-being
    MentalWellnessSupport,
    /// Traditional medicine: Ayurveda, Unani, Siddha, Homeopathy, herbal
    AyushSupport,
    /// Asanas, pranayama and other yoga practice
    YogaSupport,
    /// Reported symptoms and health conditions
    SymptomChecker,
    /// Finding hospitals, clinics and doctors
    FacilityLocatorSupport,
    /// Outbreaks, health alerts and vaccination drives
    HealthAdvisory,
    /// Dosage, BMI and drip-rate calculations
    MedicalCalculation,
    /// Greetings and small talk
    GeneralConversation,
}

impl Intent {
    /// Every intent, in routing-table order
    pub const ALL: [Intent; 9] = [
        Intent::GovernmentSchemeSupport,
        Intent::MentalWellnessSupport,
        Intent::AyushSupport,
        Intent::YogaSupport,
        Intent::SymptomChecker,
        Intent::FacilityLocatorSupport,
        Intent::HealthAdvisory,
        Intent::MedicalCalculation,
        Intent::GeneralConversation,
    ];

    /// Wire name of the intent
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::GovernmentSchemeSupport => "government_scheme_support",
            Intent::MentalWellnessSupport => "mental_wellness_support",
            Intent::AyushSupport => "ayush_support",
            Intent::YogaSupport => "yoga_support",
            Intent::SymptomChecker => "symptom_checker",
            Intent::FacilityLocatorSupport => "facility_locator_support",
            Intent::HealthAdvisory => "health_advisory",
            Intent::MedicalCalculation => "medical_calculation",
            Intent::GeneralConversation => "general_conversation",
        }
    }

    /// Human-readable heading, e.g. `Yoga Support`
    pub fn title(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Intent::ALL
            .into_iter()
            .find(|intent| intent.as_str() == normalized)
            .ok_or_else(|| Error::invalid_argument(format!("unknown intent '{s}'")))
    }
}

/// An intent with the classifier's confidence in it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredIntent {
    /// The domain label
    pub intent: Intent,
    /// Confidence in [0, 1]
    pub confidence: f32,
}

impl ScoredIntent {
    /// Create a scored intent, clamping the confidence into [0, 1]
    pub fn new(intent: Intent, confidence: f32) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { intent, confidence }
    }
}

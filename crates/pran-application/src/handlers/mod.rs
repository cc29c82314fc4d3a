//! Domain handlers
//!
//! A handler answers one intent. Intents with a knowledge collection are
//! answered from retrieved passages; the rest by the model alone.

mod model;
mod retrieval;

pub use model::ModelHandler;
pub use retrieval::RetrievalHandler;

use pran_domain::value_objects::Intent;

/// Collection holding the reference passages of an intent, if it has one
pub fn default_collection(intent: Intent) -> Option<&'static str> {
    match intent {
        Intent::SymptomChecker => Some("symptoms_collection"),
        Intent::GovernmentSchemeSupport => Some("schemes_collection"),
        Intent::YogaSupport => Some("yoga_collection"),
        Intent::AyushSupport => Some("ayush_collection"),
        Intent::MentalWellnessSupport => Some("mental_wellness_collection"),
        Intent::FacilityLocatorSupport | Intent::HealthAdvisory => Some("documents"),
        Intent::MedicalCalculation | Intent::GeneralConversation => None,
    }
}

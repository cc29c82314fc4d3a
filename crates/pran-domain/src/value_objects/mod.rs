//! Domain Value Objects
//!
//! Immutable value objects that represent concepts in the domain
//! without identity.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`Document`] | Content plus caller metadata written to a partition |
//! | [`SearchResult`] | Ranked match returned by a partition search |
//! | [`Partition`] | Logical collection identity, independent of backend |
//! | [`Embedding`] | Vector representation of a text |
//! | [`Intent`] | Domain label a query is routed to |
//! | [`ClassificationResult`] | Joint safety verdict and ranked intents |
//! | [`FusionInput`] | Per-domain answers awaiting fusion |
//! | [`ValidationVerdict`] | Post-hoc safety check of a response |
//! | [`DocumentAnalysis`] | Structured summary of a medical document |
//! | [`CollectionInfo`] | Record count of a stored collection |

/// Document analysis value objects
pub mod analysis;
/// Collection inspection value objects
pub mod browse;
/// Classification value objects
pub mod classification;
/// Document value objects
pub mod document;
/// Semantic embedding value objects
pub mod embedding;
/// Fusion value objects
pub mod fusion;
/// Intent value objects
pub mod intent;
/// Partition value object
pub mod partition;
/// Search-related value objects
pub mod search;
/// Validation value objects
pub mod validation;

pub use analysis::{DocumentAnalysis, TestResult};
pub use browse::CollectionInfo;
pub use classification::{
    ClassificationOutcome, ClassificationResult, IntentRouting, SafetyCategory, SafetyVerdict,
};
pub use document::{Document, Metadata};
pub use embedding::Embedding;
pub use fusion::FusionInput;
pub use intent::{Intent, ScoredIntent};
pub use partition::Partition;
pub use search::SearchResult;
pub use validation::ValidationVerdict;

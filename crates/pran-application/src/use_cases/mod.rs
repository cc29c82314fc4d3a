//! Use Cases
//!
//! Application services that orchestrate the domain ports.

pub mod analyzer;
pub mod classifier;
pub mod dispatcher;
pub mod fusion;
pub mod migration;
pub mod pipeline;
pub mod validator;

pub use analyzer::DocumentAnalyzer;
pub use classifier::IntentClassifier;
pub use dispatcher::{DispatchReport, Dispatcher, HandlerOutcome, HandlerStatus};
pub use fusion::ResponseFusion;
pub use migration::{MigrationReport, MigrationService};
pub use pipeline::{HandlerTrace, HealthcarePipeline, PipelineAnswer, PipelineTrace};
pub use validator::ResponseValidator;

//! Domain Handler Port

use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::Intent;

/// Responder for one healthcare domain
///
/// Handlers are independent of each other; a failing handler never
/// affects its siblings.
#[async_trait]
pub trait DomainHandler: Send + Sync {
    /// The intent this handler answers
    fn intent(&self) -> Intent;

    /// Produce the domain answer for a query
    async fn answer(&self, query: &str) -> Result<String>;
}

//! The seam between the UI driver and the remote generation capability.

use async_trait::async_trait;

use crate::{Artifact, Category, GenerationError};

/// Something that turns a category into an artifact.
///
/// Implementations are stateless from the caller's point of view: they
/// return values and never touch UI state. No retries, no caching.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate one artifact for `category`.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] describing why no artifact was produced.
    async fn generate(&self, category: Category) -> Result<Artifact, GenerationError>;
}

#[async_trait]
impl<G: Generator + ?Sized> Generator for std::sync::Arc<G> {
    async fn generate(&self, category: Category) -> Result<Artifact, GenerationError> {
        (**self).generate(category).await
    }
}

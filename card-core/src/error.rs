//! Error types for card operations.

use thiserror::Error;

use crate::Mode;

/// Result type for card operations.
pub type CardResult<T> = Result<T, CardError>;

/// Errors that can occur in scene and artifact operations.
#[derive(Debug, Error)]
pub enum CardError {
    /// Element not found in scene.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Invalid element operation.
    #[error("Invalid operation on element: {0}")]
    InvalidOperation(String),

    /// An artifact was constructed without any text.
    #[error("Artifact text must not be empty")]
    EmptyText,
}

/// Why a generation request did not produce an artifact.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The capability answered without any textual payload.
    #[error("The model did not return any text content")]
    EmptyResponse,

    /// The payload was not the structured object the schema demands.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The remote call itself failed (network, auth, quota, server error).
    #[error("Transport failure: {0}")]
    TransportFailure(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl GenerationError {
    /// Wrap any error as a transport failure.
    pub fn transport(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::TransportFailure(cause.into())
    }

    /// The message shown to the user. Never includes transport diagnostics.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn user_message(&self, mode: Mode) -> String {
        format!("Failed to generate {}. Please try again.", mode.noun())
    }
}

/// Why an image export failed.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The capture node is not part of the rendered scene.
    #[error("Capture node not found: {0}")]
    NodeNotFound(String),

    /// Rasterization or encoding failed.
    #[error("Rendering failed: {0}")]
    Render(String),

    /// The bitmap could not be saved.
    #[error("Saving {filename} failed: {source}")]
    Save {
        /// Requested filename.
        filename: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// The notice shown to the user when an export fails.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn user_message(&self) -> &'static str {
        "Something went wrong while generating the image. Please try again or take a screenshot."
    }
}

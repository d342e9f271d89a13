//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while turning a scene into pixels.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The capture node is not in the scene.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The generated SVG was rejected by the parser.
    #[error("SVG parsing failed: {0}")]
    Svg(String),

    /// The pixmap could not be allocated.
    #[error("Failed to create {width}x{height} pixmap")]
    Pixmap {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

impl From<RenderError> for card_core::ExportError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::ElementNotFound(id) => Self::NodeNotFound(id),
            other => Self::Render(other.to_string()),
        }
    }
}

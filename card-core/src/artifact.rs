//! Generated artifacts.
//!
//! Constructors reject empty text, so an [`Artifact`] always carries
//! something to display.

use serde::Serialize;

use crate::{CardError, CardResult, Mode};

/// A generated literary quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteArtifact {
    text: String,
    attribution: String,
    theme: String,
    script_confirmed: bool,
}

impl QuoteArtifact {
    /// Create a quote artifact.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::EmptyText`] if `text` is blank.
    pub fn new(
        text: impl Into<String>,
        attribution: impl Into<String>,
        theme: impl Into<String>,
        script_confirmed: bool,
    ) -> CardResult<Self> {
        Ok(Self {
            text: non_empty(text.into())?,
            attribution: attribution.into().trim().to_string(),
            theme: theme.into().trim().to_string(),
            script_confirmed,
        })
    }

    /// Quote text in Bengali script.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Author the quote is attributed to.
    #[must_use]
    pub fn attribution(&self) -> &str {
        &self.attribution
    }

    /// Theme reported by the generator (life, love, reality...).
    #[must_use]
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Generator's own claim that the text is Bengali script.
    #[must_use]
    pub fn script_confirmed(&self) -> bool {
        self.script_confirmed
    }
}

/// A generated meme caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemeArtifact {
    text: String,
    category: String,
    template_hint: String,
    script_confirmed: bool,
}

impl MemeArtifact {
    /// Create a meme artifact.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::EmptyText`] if `text` is blank.
    pub fn new(
        text: impl Into<String>,
        category: impl Into<String>,
        template_hint: impl Into<String>,
        script_confirmed: bool,
    ) -> CardResult<Self> {
        Ok(Self {
            text: non_empty(text.into())?,
            category: category.into().trim().to_string(),
            template_hint: template_hint.into().trim().to_string(),
            script_confirmed,
        })
    }

    /// Caption text in Bengali script.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Meme style the caption belongs to.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Suggested visual template.
    #[must_use]
    pub fn template_hint(&self) -> &str {
        &self.template_hint
    }

    /// Generator's own claim that the text is Bengali script.
    #[must_use]
    pub fn script_confirmed(&self) -> bool {
        self.script_confirmed
    }
}

/// A successfully generated content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Artifact {
    /// Quote mode result.
    Quote(QuoteArtifact),
    /// Meme mode result.
    Meme(MemeArtifact),
}

impl Artifact {
    /// The mode that produced this artifact.
    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Self::Quote(_) => Mode::Quote,
            Self::Meme(_) => Mode::Meme,
        }
    }

    /// Main text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Quote(q) => q.text(),
            Self::Meme(m) => m.text(),
        }
    }

    /// The field that names the artifact: attribution for quotes, category for memes.
    #[must_use]
    pub fn identifying_field(&self) -> &str {
        match self {
            Self::Quote(q) => q.attribution(),
            Self::Meme(m) => m.category(),
        }
    }

    /// Generator's own claim that the text is Bengali script.
    #[must_use]
    pub fn script_confirmed(&self) -> bool {
        match self {
            Self::Quote(q) => q.script_confirmed(),
            Self::Meme(m) => m.script_confirmed(),
        }
    }
}

impl From<QuoteArtifact> for Artifact {
    fn from(quote: QuoteArtifact) -> Self {
        Self::Quote(quote)
    }
}

impl From<MemeArtifact> for Artifact {
    fn from(meme: MemeArtifact) -> Self {
        Self::Meme(meme)
    }
}

fn non_empty(text: String) -> CardResult<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CardError::EmptyText);
    }
    Ok(trimmed.to_string())
}

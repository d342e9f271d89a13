//! Per-mode generation profile.
//!
//! Quote mode and meme mode share one pipeline. Everything that differs
//! between them (instructions, response schema, wire shape, export naming)
//! lives in a [`ModeDescriptor`].

use serde::Deserialize;
use serde_json::{json, Value};

use crate::{Artifact, CardError, Category, GenerationError, MemeArtifact, Mode, QuoteArtifact};

const QUOTE_SYSTEM_INSTRUCTION: &str = "You are Saatmishaali AI, an assistant that generates authentic Bengali literary quotes from famous Bengali authors and poets.

YOUR TASK:
1. Generate ONE original, meaningful Bengali quote from the selected author
2. Focus on themes: sadness, reality, life, love, philosophy, human emotions
3. MUST be in BENGALI script (Bangla) only
4. MUST be original or authentic to the author's style (not famous/common quotes)

RULES:
- Quote MUST be in Bengali script
- Keep it 1-2 lines maximum
- Should reflect the author's unique style and philosophy
- Should be thought-provoking, emotional, or philosophical
- No emojis, hashtags, or English translations
- No explanations or commentary
- Just the quote and author name

AUTHOR STYLES:
- রবীন্দ্রনাথ ঠাকুর: Philosophical, spiritual, poetic, profound
- কাজী নজরুল ইসলাম: Revolutionary, passionate, emotional, powerful
- হুমায়ূন আহমেদ: Simple yet deep, relatable, emotional, everyday philosophy
- জীবনানন্দ দাশ: Melancholic, nature-oriented, profound sadness
- শরৎচন্দ্র চট্টোপাধ্যায়: Emotional, social issues, human relationships
- তসলিমা নাসরিন: Bold, feminist, realistic, provocative
- বুদ্ধদেব বসু: Modern, intellectual, thoughtful
- আধুনিক বাংলা সাহিত্য: Contemporary themes, relatable modern life
";

const MEME_SYSTEM_INSTRUCTION: &str = "You are Saatmishaali AI, an assistant that writes original Bengali meme captions about everyday Bangladeshi and Bengali life.

YOUR TASK:
1. Write ONE original, witty meme caption for the selected meme style
2. MUST be in BENGALI script (Bangla) only
3. MUST be original (no viral captions repeated verbatim)
4. Suggest one well-known meme template the caption fits

RULES:
- Caption MUST be in Bengali script
- Keep it 1-2 short lines
- Humour should be light and relatable, never hateful or targeting groups
- No emojis, hashtags, or English translations
- No explanations or commentary
- Just the caption, its style and the template hint
";

/// Everything that varies between quote mode and meme mode.
#[derive(Debug)]
pub struct ModeDescriptor {
    /// The mode described.
    pub mode: Mode,
    /// Fixed system-level instruction for the remote capability.
    pub system_instruction: &'static str,
    /// Suffix used by export filenames.
    pub filename_suffix: &'static str,
    /// Title handed to native share sheets.
    pub share_title: &'static str,
    /// Scene node id of the card that gets captured on export.
    pub capture_node: &'static str,
    /// Confirmation shown after the share text lands on the clipboard.
    pub copied_notice: &'static str,
}

static QUOTE: ModeDescriptor = ModeDescriptor {
    mode: Mode::Quote,
    system_instruction: QUOTE_SYSTEM_INSTRUCTION,
    filename_suffix: "quote",
    share_title: "Saatmishaali Quote",
    capture_node: "quote-card-capture",
    copied_notice: "Quote copied to clipboard!",
};

static MEME: ModeDescriptor = ModeDescriptor {
    mode: Mode::Meme,
    system_instruction: MEME_SYSTEM_INSTRUCTION,
    filename_suffix: "meme",
    share_title: "Saatmishaali Meme",
    capture_node: "meme-card-capture",
    copied_notice: "Meme copied to clipboard!",
};

/// Structured payload returned in quote mode.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuotePayload {
    quote: String,
    author: String,
    category: String,
    is_bengali: bool,
}

/// Structured payload returned in meme mode.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemePayload {
    meme: String,
    category: String,
    template_hint: String,
    is_bengali: bool,
}

impl ModeDescriptor {
    /// Descriptor for a mode.
    #[must_use]
    pub fn of(mode: Mode) -> &'static Self {
        match mode {
            Mode::Quote => &QUOTE,
            Mode::Meme => &MEME,
        }
    }

    /// Descriptor for the mode a category belongs to.
    #[must_use]
    pub fn for_category(category: Category) -> &'static Self {
        Self::of(category.mode())
    }

    /// The per-call natural-language instruction for `category`.
    ///
    /// `category` must belong to this descriptor's mode.
    #[must_use]
    pub fn instruction(&self, category: Category) -> String {
        debug_assert_eq!(category.mode(), self.mode, "category from foreign mode");
        match self.mode {
            Mode::Quote => format!(
                "Generate one original Bengali quote in the style of: {}. The quote should be emotional, philosophical, or about life's realities. Write only in Bengali script.",
                category.label()
            ),
            Mode::Meme => format!(
                "Generate one original Bengali meme caption in the style of: {}. It should be witty and relatable to everyday life. Write only in Bengali script.",
                category.label()
            ),
        }
    }

    /// The formal response-shape constraint for this mode.
    ///
    /// Uses the OpenAPI subset understood by Gemini's `responseSchema`.
    #[must_use]
    pub fn response_schema(&self) -> Value {
        match self.mode {
            Mode::Quote => json!({
                "type": "OBJECT",
                "properties": {
                    "quote": {
                        "type": "STRING",
                        "description": "The generated Bengali quote text."
                    },
                    "author": {
                        "type": "STRING",
                        "description": "The author's name in Bengali."
                    },
                    "category": {
                        "type": "STRING",
                        "description": "The category/theme of the quote (e.g., sad, love, reality, life)."
                    },
                    "isBengali": {
                        "type": "BOOLEAN",
                        "description": "Whether the text is in Bengali (should always be true)"
                    }
                },
                "required": ["quote", "author", "category", "isBengali"],
                "propertyOrdering": ["quote", "author", "category", "isBengali"]
            }),
            Mode::Meme => json!({
                "type": "OBJECT",
                "properties": {
                    "meme": {
                        "type": "STRING",
                        "description": "The generated Bengali meme caption."
                    },
                    "category": {
                        "type": "STRING",
                        "description": "The meme style in Bengali."
                    },
                    "templateHint": {
                        "type": "STRING",
                        "description": "A well-known meme template this caption fits."
                    },
                    "isBengali": {
                        "type": "BOOLEAN",
                        "description": "Whether the text is in Bengali (should always be true)"
                    }
                },
                "required": ["meme", "category", "templateHint", "isBengali"],
                "propertyOrdering": ["meme", "category", "templateHint", "isBengali"]
            }),
        }
    }

    /// Parse the structured payload text into an artifact.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::EmptyResponse`] for a blank payload and
    /// [`GenerationError::MalformedResponse`] when the payload is not a
    /// conforming object or carries empty text.
    pub fn parse_payload(&self, payload: &str) -> Result<Artifact, GenerationError> {
        let payload = payload.trim();
        if payload.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        let built = match self.mode {
            Mode::Quote => {
                let p: QuotePayload = serde_json::from_str(payload).map_err(malformed)?;
                QuoteArtifact::new(p.quote, p.author, p.category, p.is_bengali).map(Artifact::from)
            }
            Mode::Meme => {
                let p: MemePayload = serde_json::from_str(payload).map_err(malformed)?;
                MemeArtifact::new(p.meme, p.category, p.template_hint, p.is_bengali)
                    .map(Artifact::from)
            }
        };

        built.map_err(|e| match e {
            CardError::EmptyText => {
                GenerationError::MalformedResponse(format!("{} text is empty", self.mode))
            }
            other => GenerationError::MalformedResponse(other.to_string()),
        })
    }
}

#[allow(clippy::needless_pass_by_value)]
fn malformed(err: serde_json::Error) -> GenerationError {
    GenerationError::MalformedResponse(err.to_string())
}

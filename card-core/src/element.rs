//! Scene elements - the building blocks of a rendered card.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an element.
///
/// Capture targets use stable names (`quote-card-capture`); everything else
/// gets a random id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create an ID with a fixed, well-known name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The ID as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for ElementId {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Font weight for text elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

/// Horizontal alignment of text inside its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Left edge.
    #[default]
    Start,
    /// Centered.
    Middle,
    /// Right edge.
    End,
}

/// The type of content an element contains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ElementKind {
    /// A filled, optionally stroked, rounded rectangle holding children.
    Panel {
        /// Fill color as hex.
        fill: String,
        /// Border color as hex.
        stroke: Option<String>,
        /// Corner radius in pixels.
        corner_radius: f32,
        /// Child element IDs, in paint order.
        children: Vec<ElementId>,
    },

    /// Pre-wrapped text. Each `\n` starts a new line.
    Text {
        /// Text content.
        content: String,
        /// Font size in pixels.
        font_size: f32,
        /// Text color as hex.
        color: String,
        /// Font weight.
        weight: FontWeight,
        /// Horizontal alignment.
        align: TextAlign,
        /// Line height as a multiple of the font size.
        line_height: f32,
    },

    /// A horizontal divider filling the element's box.
    Rule {
        /// Line color as hex.
        color: String,
    },
}

/// Transform for positioning and sizing elements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// X position (pixels from left).
    pub x: f32,
    /// Y position (pixels from top).
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Z-index for layering among siblings.
    pub z_index: i32,
}

impl Transform {
    /// A transform at `(x, y)` with the given size.
    #[must_use]
    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            z_index: 0,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::rect(0.0, 0.0, 100.0, 100.0)
    }
}

/// A scene element with content and transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// Element content type.
    pub kind: ElementKind,
    /// Position and size, in scene coordinates.
    pub transform: Transform,
    /// Optional parent element ID.
    pub parent: Option<ElementId>,
}

impl Element {
    /// Create a new element with the given kind.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            transform: Transform::default(),
            parent: None,
        }
    }

    /// Set the ID.
    #[must_use]
    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = id;
        self
    }

    /// Set the transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Child IDs if this element is a panel.
    #[must_use]
    pub fn children(&self) -> &[ElementId] {
        match &self.kind {
            ElementKind::Panel { children, .. } => children,
            _ => &[],
        }
    }
}

//! Card layout: turns an artifact into a subtree of the scene.

use crate::{
    Artifact, CardResult, Element, ElementId, ElementKind, FontWeight, Scene, TextAlign,
    Transform, PRODUCT_NAME,
};

/// Visual parameters of a card.
#[derive(Debug, Clone)]
pub struct CardStyle {
    /// Card width in logical pixels.
    pub width: f32,
    /// Inner padding.
    pub padding: f32,
    /// Main text size.
    pub body_size: f32,
    /// Attribution / caption meta size.
    pub meta_size: f32,
    /// Footer size.
    pub footer_size: f32,
    /// Card fill.
    pub background: String,
    /// Card border.
    pub border: String,
    /// Main text color.
    pub ink: String,
    /// Accent color (quote mark, attribution).
    pub accent: String,
    /// Secondary text color.
    pub muted: String,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            width: 480.0,
            padding: 40.0,
            body_size: 26.0,
            meta_size: 18.0,
            footer_size: 12.0,
            background: "#fffaf3".to_string(),
            border: "#f3e1cc".to_string(),
            ink: "#115e59".to_string(),
            accent: "#ea580c".to_string(),
            muted: "#64748b".to_string(),
        }
    }
}

const BODY_LINE_HEIGHT: f32 = 1.6;
const META_LINE_HEIGHT: f32 = 1.4;
// Average advance of a Bengali glyph relative to the font size.
const GLYPH_ADVANCE: f32 = 0.55;

/// Lay out `artifact` as a card rooted at `node_id`, at `(x, y)`.
///
/// Any existing subtree under `node_id` is replaced.
///
/// # Errors
///
/// Returns an error if the scene refuses one of the insertions.
pub fn layout_card(
    scene: &mut Scene,
    node_id: &ElementId,
    artifact: &Artifact,
    style: &CardStyle,
    (x, y): (f32, f32),
) -> CardResult<ElementId> {
    if scene.contains(node_id) {
        scene.remove_subtree(node_id)?;
    }

    let inner_x = x + style.padding;
    let inner_w = style.width - style.padding * 2.0;
    let mut lines = Vec::new();
    let mut cursor = y + style.padding;

    match artifact {
        Artifact::Quote(quote) => {
            lines.push(text_block(
                "\u{201c}",
                style.body_size * 2.0,
                &style.accent,
                FontWeight::Bold,
                TextAlign::Start,
                1.0,
                (inner_x, &mut cursor, inner_w),
            ));
            let body = wrap_text(quote.text(), chars_per_line(inner_w, style.body_size));
            lines.push(text_block(
                &body,
                style.body_size,
                &style.ink,
                FontWeight::Normal,
                TextAlign::Start,
                BODY_LINE_HEIGHT,
                (inner_x, &mut cursor, inner_w),
            ));
            cursor += style.padding / 2.0;
            lines.push(rule(&style.border, (inner_x, &mut cursor, inner_w)));
            lines.push(text_block(
                &format!("— {}", quote.attribution()),
                style.meta_size,
                &style.accent,
                FontWeight::Bold,
                TextAlign::Start,
                META_LINE_HEIGHT,
                (inner_x, &mut cursor, inner_w),
            ));
            if !quote.theme().is_empty() {
                lines.push(text_block(
                    &format!("#{}", quote.theme()),
                    style.footer_size + 2.0,
                    &style.muted,
                    FontWeight::Normal,
                    TextAlign::Start,
                    META_LINE_HEIGHT,
                    (inner_x, &mut cursor, inner_w),
                ));
            }
        }
        Artifact::Meme(meme) => {
            lines.push(text_block(
                meme.category(),
                style.meta_size,
                &style.accent,
                FontWeight::Bold,
                TextAlign::Middle,
                META_LINE_HEIGHT,
                (inner_x, &mut cursor, inner_w),
            ));
            cursor += style.padding / 2.0;
            let body = wrap_text(meme.text(), chars_per_line(inner_w, style.body_size));
            lines.push(text_block(
                &body,
                style.body_size,
                &style.ink,
                FontWeight::Bold,
                TextAlign::Middle,
                BODY_LINE_HEIGHT,
                (inner_x, &mut cursor, inner_w),
            ));
            cursor += style.padding / 2.0;
            lines.push(rule(&style.border, (inner_x, &mut cursor, inner_w)));
            if !meme.template_hint().is_empty() {
                lines.push(text_block(
                    &format!("টেমপ্লেট: {}", meme.template_hint()),
                    style.footer_size + 2.0,
                    &style.muted,
                    FontWeight::Normal,
                    TextAlign::Middle,
                    META_LINE_HEIGHT,
                    (inner_x, &mut cursor, inner_w),
                ));
            }
        }
    }

    cursor += style.padding / 2.0;
    lines.push(text_block(
        PRODUCT_NAME,
        style.footer_size,
        &style.muted,
        FontWeight::Bold,
        TextAlign::End,
        1.0,
        (inner_x, &mut cursor, inner_w),
    ));

    let height = cursor + style.padding - y;
    let card = Element::new(ElementKind::Panel {
        fill: style.background.clone(),
        stroke: Some(style.border.clone()),
        corner_radius: 24.0,
        children: Vec::new(),
    })
    .with_id(node_id.clone())
    .with_transform(Transform::rect(x, y, style.width, height));

    let root = scene.add_element(card);
    for line in lines {
        scene.add_child(&root, line)?;
    }

    tracing::debug!(node = %root, mode = %artifact.mode(), height, "card laid out");
    Ok(root)
}

/// Build a text element at the cursor and advance the cursor past it.
#[allow(clippy::cast_precision_loss)]
fn text_block(
    content: &str,
    font_size: f32,
    color: &str,
    weight: FontWeight,
    align: TextAlign,
    line_height: f32,
    (x, cursor, width): (f32, &mut f32, f32),
) -> Element {
    let line_count = content.lines().count().max(1) as f32;
    let height = font_size * line_height * line_count;
    let element = Element::new(ElementKind::Text {
        content: content.to_string(),
        font_size,
        color: color.to_string(),
        weight,
        align,
        line_height,
    })
    .with_transform(Transform::rect(x, *cursor, width, height));
    *cursor += height;
    element
}

fn rule(color: &str, (x, cursor, width): (f32, &mut f32, f32)) -> Element {
    let element = Element::new(ElementKind::Rule {
        color: color.to_string(),
    })
    .with_transform(Transform::rect(x, *cursor, width, 1.0));
    *cursor += 12.0;
    element
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn chars_per_line(width: f32, font_size: f32) -> usize {
    ((width / (font_size * GLYPH_ADVANCE)).floor() as usize).max(1)
}

/// Greedy word wrap on whitespace. Words longer than a line stay whole.
#[must_use]
pub fn wrap_text(text: &str, max_chars: usize) -> String {
    let mut out = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        let mut len = 0;
        for word in paragraph.split_whitespace() {
            let wlen = word.chars().count();
            if len > 0 && len + 1 + wlen > max_chars {
                out.push(std::mem::take(&mut line));
                len = 0;
            }
            if len > 0 {
                line.push(' ');
                len += 1;
            }
            line.push_str(word);
            len += wlen;
        }
        if !line.is_empty() {
            out.push(line);
        }
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemeArtifact, QuoteArtifact};

    fn quote() -> Artifact {
        QuoteArtifact::new(
            "মানুষের জীবনে সবচেয়ে বড় সত্য হলো, কেউ কারো জন্য অপেক্ষা করে না।",
            "হুমায়ূন আহমেদ",
            "life",
            true,
        )
        .expect("quote")
        .into()
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("aa bb cc", 5), "aa bb\ncc");
        assert_eq!(wrap_text("averylongword x", 4), "averylongword\nx");
        assert_eq!(wrap_text("  a   b  ", 10), "a b");
        assert_eq!(wrap_text("one\ntwo", 10), "one\ntwo");
    }

    #[test]
    fn test_quote_card_layout() {
        let mut scene = Scene::new(800.0, 800.0);
        let node = ElementId::named("quote-card-capture");
        let root = layout_card(&mut scene, &node, &quote(), &CardStyle::default(), (40.0, 40.0))
            .expect("layout");
        assert_eq!(root, node);

        let card = scene.get_element(&node).expect("card");
        assert!((card.transform.width - 480.0).abs() < f32::EPSILON);
        assert!(card.transform.height > 100.0);

        let texts: Vec<String> = scene
            .subtree(&node)
            .into_iter()
            .filter_map(|e| match &e.kind {
                ElementKind::Text { content, .. } => Some(content.clone()),
                _ => None,
            })
            .collect();
        assert!(texts.iter().any(|t| t.contains("হুমায়ূন আহমেদ")));
        assert!(texts.iter().any(|t| t == "#life"));
        assert!(texts.iter().any(|t| t == PRODUCT_NAME));
    }

    #[test]
    fn test_children_stay_inside_card() {
        let mut scene = Scene::new(800.0, 800.0);
        let node = ElementId::named("c");
        layout_card(&mut scene, &node, &quote(), &CardStyle::default(), (0.0, 0.0))
            .expect("layout");
        let card = scene.get_element(&node).expect("card").transform;
        for e in scene.subtree(&node) {
            assert!(e.transform.y + e.transform.height <= card.y + card.height);
        }
    }

    #[test]
    fn test_relayout_replaces_subtree() {
        let mut scene = Scene::new(800.0, 800.0);
        let node = ElementId::named("meme-card-capture");
        let meme: Artifact = MemeArtifact::new("জ্যামে বসে আছি", "ঢাকার জ্যাম", "", true)
            .expect("meme")
            .into();

        layout_card(&mut scene, &node, &quote(), &CardStyle::default(), (0.0, 0.0))
            .expect("first");
        let first_count = scene.element_count();
        layout_card(&mut scene, &node, &meme, &CardStyle::default(), (0.0, 0.0))
            .expect("second");

        assert_eq!(scene.root_elements().count(), 1);
        // Meme card has no template line here, the quote card had a theme and a quote mark.
        assert!(scene.element_count() < first_count);
    }
}

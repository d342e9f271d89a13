//! Card export to PNG.
//!
//! Renders the subtree rooted at a capture node to an SVG intermediate
//! representation, then rasterizes it with the resvg/tiny-skia pipeline.

use std::fmt::Write;
use std::path::PathBuf;
use std::sync::Arc;

use card_core::{Element, ElementId, ElementKind, FontWeight, Scene, TextAlign};

use crate::error::{RenderError, RenderResult};

/// Configuration for card export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Pixel ratio relative to the node's logical size.
    pub scale: f32,
    /// Background color as RGB bytes. Always painted fully opaque.
    pub background: [u8; 3],
    /// CSS font-family list used for every text element.
    pub font_family: String,
    /// Extra directories to load fonts from (Bengali fonts are rarely installed).
    pub font_dirs: Vec<PathBuf>,
    /// Whether to load the system font set.
    pub load_system_fonts: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: 2.0,
            background: [255, 255, 255],
            font_family: "'Noto Sans Bengali', 'Hind Siliguri', 'Noto Serif Bengali', sans-serif"
                .to_string(),
            font_dirs: Vec::new(),
            load_system_fonts: true,
        }
    }
}

/// Rasterizes card subtrees.
#[derive(Clone)]
pub struct CardExporter {
    config: ExportConfig,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for CardExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardExporter")
            .field("config", &self.config)
            .field("fonts", &self.fontdb.len())
            .finish()
    }
}

impl CardExporter {
    /// Create a new exporter, loading fonts once.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        if config.load_system_fonts {
            fontdb.load_system_fonts();
        }
        for dir in &config.font_dirs {
            fontdb.load_fonts_dir(dir);
        }
        tracing::debug!(fonts = fontdb.len(), "font database loaded");

        Self {
            config,
            fontdb: Arc::new(fontdb),
        }
    }

    /// Export the subtree at `node_id` to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is missing or rendering/encoding fails.
    pub fn render_to_png(&self, scene: &Scene, node_id: &ElementId) -> RenderResult<Vec<u8>> {
        let svg_string = self.render_to_svg(scene, node_id)?;
        let pixmap = self.rasterize_svg(&svg_string)?;

        pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))
    }

    /// Export the subtree at `node_id` to an SVG string.
    ///
    /// The SVG's viewBox is the node's box; its pixel size is the box times
    /// the configured scale.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ElementNotFound`] if the node is missing.
    pub fn render_to_svg(&self, scene: &Scene, node_id: &ElementId) -> RenderResult<String> {
        let node = scene
            .get_element(node_id)
            .ok_or_else(|| RenderError::ElementNotFound(node_id.to_string()))?;

        let tf = node.transform;
        let (out_w, out_h) = self.output_dimensions(node);

        let mut svg = String::with_capacity(4096);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{out_w}\" height=\"{out_h}\" viewBox=\"{} {} {} {}\">",
            tf.x, tf.y, tf.width, tf.height,
        );

        // Opaque background under the whole capture box
        let [r, g, b] = self.config.background;
        let _ = write!(
            svg,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"rgb({r},{g},{b})\"/>",
            tf.x, tf.y, tf.width, tf.height,
        );

        let family = escape_xml(&self.config.font_family);
        for element in scene.subtree(node_id) {
            render_element_svg(&mut svg, element, &family);
        }

        svg.push_str("</svg>");
        Ok(svg)
    }

    /// Output dimensions (width, height) in pixels.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn output_dimensions(&self, node: &Element) -> (u32, u32) {
        let scale = self.config.scale.max(0.1);
        let out_w = (node.transform.width.max(1.0) * scale).ceil() as u32;
        let out_h = (node.transform.height.max(1.0) * scale).ceil() as u32;
        (out_w.max(1), out_h.max(1))
    }

    /// Rasterize an SVG string to a tiny-skia Pixmap.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn rasterize_svg(&self, svg_string: &str) -> RenderResult<tiny_skia::Pixmap> {
        let opt = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(svg_string, &opt)
            .map_err(|e| RenderError::Svg(e.to_string()))?;

        let width = (tree.size().width().ceil() as u32).max(1);
        let height = (tree.size().height().ceil() as u32).max(1);

        let mut pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(RenderError::Pixmap { width, height })?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        Ok(pixmap)
    }
}

/// Render a single element to SVG.
fn render_element_svg(svg: &mut String, element: &Element, family: &str) {
    let tf = &element.transform;

    match &element.kind {
        ElementKind::Panel {
            fill,
            stroke,
            corner_radius,
            ..
        } => {
            let _ = write!(
                svg,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{corner_radius}\" fill=\"{}\"",
                tf.x,
                tf.y,
                tf.width,
                tf.height,
                escape_xml(fill),
            );
            if let Some(stroke) = stroke {
                let _ = write!(
                    svg,
                    " stroke=\"{}\" stroke-width=\"1\"",
                    escape_xml(stroke)
                );
            }
            svg.push_str("/>");
        }

        ElementKind::Text {
            content,
            font_size,
            color,
            weight,
            align,
            line_height,
        } => {
            let (anchor, x) = match align {
                TextAlign::Start => ("start", tf.x),
                TextAlign::Middle => ("middle", tf.x + tf.width / 2.0),
                TextAlign::End => ("end", tf.x + tf.width),
            };
            let weight = match weight {
                FontWeight::Normal => "normal",
                FontWeight::Bold => "bold",
            };
            let step = font_size * line_height;
            // Baseline of the first line sits inside the first line box.
            let baseline = tf.y + (step - font_size) / 2.0 + font_size * 0.8;

            let _ = write!(
                svg,
                "<text x=\"{x}\" y=\"{baseline}\" font-size=\"{font_size}\" font-family=\"{family}\" font-weight=\"{weight}\" fill=\"{}\" text-anchor=\"{anchor}\">",
                escape_xml(color),
            );
            for (i, line) in content.lines().enumerate() {
                let dy = if i == 0 { 0.0 } else { step };
                let _ = write!(
                    svg,
                    "<tspan x=\"{x}\" dy=\"{dy}\">{}</tspan>",
                    escape_xml(line)
                );
            }
            svg.push_str("</text>");
        }

        ElementKind::Rule { color } => {
            let _ = write!(
                svg,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
                tf.x,
                tf.y,
                tf.width,
                tf.height.max(1.0),
                escape_xml(color),
            );
        }
    }
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_core::Transform;

    fn exporter() -> CardExporter {
        CardExporter::new(ExportConfig {
            load_system_fonts: false,
            ..ExportConfig::default()
        })
    }

    fn card_scene() -> (Scene, ElementId) {
        let mut scene = Scene::new(800.0, 600.0);
        let id = ElementId::named("quote-card-capture");
        let root = scene.add_element(
            Element::new(ElementKind::Panel {
                fill: "#fffaf3".into(),
                stroke: Some("#f3e1cc".into()),
                corner_radius: 24.0,
                children: Vec::new(),
            })
            .with_id(id.clone())
            .with_transform(Transform::rect(40.0, 60.0, 200.0, 100.0)),
        );
        scene
            .add_child(
                &root,
                Element::new(ElementKind::Text {
                    content: "প্রথম লাইন\nA < B & C".into(),
                    font_size: 16.0,
                    color: "#115e59".into(),
                    weight: FontWeight::Bold,
                    align: TextAlign::Middle,
                    line_height: 1.5,
                })
                .with_transform(Transform::rect(50.0, 70.0, 180.0, 48.0)),
            )
            .expect("child");
        (scene, id)
    }

    #[test]
    fn test_svg_viewbox_is_node_box_at_scale() {
        let (scene, id) = card_scene();
        let svg = exporter().render_to_svg(&scene, &id).expect("svg");
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("width=\"400\""));
        assert!(svg.contains("height=\"200\""));
        assert!(svg.contains("viewBox=\"40 60 200 100\""));
        assert!(svg.contains("fill=\"rgb(255,255,255)\""));
    }

    #[test]
    fn test_svg_text_lines_and_escaping() {
        let (scene, id) = card_scene();
        let svg = exporter().render_to_svg(&scene, &id).expect("svg");
        assert!(svg.contains("প্রথম লাইন"));
        assert!(svg.contains("A &lt; B &amp; C"));
        assert_eq!(svg.matches("<tspan").count(), 2);
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(svg.contains("font-weight=\"bold\""));
        assert!(svg.contains("&apos;Noto Sans Bengali&apos;"));
    }

    #[test]
    fn test_svg_excludes_elements_outside_subtree() {
        let (mut scene, id) = card_scene();
        scene.add_element(Element::new(ElementKind::Text {
            content: "outside".into(),
            font_size: 12.0,
            color: "#000".into(),
            weight: FontWeight::Normal,
            align: TextAlign::Start,
            line_height: 1.0,
        }));
        let svg = exporter().render_to_svg(&scene, &id).expect("svg");
        assert!(!svg.contains("outside"));
    }

    #[test]
    fn test_missing_node() {
        let (scene, _) = card_scene();
        let err = exporter()
            .render_to_svg(&scene, &ElementId::named("nope"))
            .unwrap_err();
        assert!(matches!(err, RenderError::ElementNotFound(_)));
    }

    #[test]
    fn test_png_is_double_size_and_opaque() {
        let (scene, id) = card_scene();
        let png = exporter().render_to_png(&scene, &id).expect("png");
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);

        let pixmap = tiny_skia::Pixmap::decode_png(&png).expect("decode");
        assert_eq!(pixmap.width(), 400);
        assert_eq!(pixmap.height(), 200);

        // Rounded corner leaves the background visible: it must be opaque white.
        let corner = pixmap.pixel(0, 0).expect("pixel");
        assert_eq!(corner.alpha(), 255);
        assert_eq!(corner.red(), 255);
        assert_eq!(corner.green(), 255);
        assert_eq!(corner.blue(), 255);
    }

    #[test]
    fn test_custom_scale() {
        let (scene, id) = card_scene();
        let exporter = CardExporter::new(ExportConfig {
            scale: 1.0,
            load_system_fonts: false,
            ..ExportConfig::default()
        });
        let svg = exporter.render_to_svg(&scene, &id).expect("svg");
        assert!(svg.contains("width=\"200\""));
        assert!(svg.contains("height=\"100\""));
    }
}

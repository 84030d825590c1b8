//! Text annotations collected as an SVG overlay.
//!
//! Labels are gathered into a transparent SVG document the size of the
//! target pixmap and rasterized with resvg on top of the already painted
//! cells. Missing fonts only drop glyphs, never the underlying fills.

use std::fmt::Write as _;

use mosaic_core::Rgb;

/// Font family used for every label; shipped with the binary.
pub const LABEL_FONT_FAMILY: &str = "DejaVu Sans";

/// Horizontal anchor of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// `(x, y)` is the top-left corner of the text
    TopLeft,
    /// `(x, y)` is the center of the text
    Center,
}

/// A batch of text runs over a `width × height` canvas.
#[derive(Debug, Clone)]
pub struct TextLayer {
    width: u32,
    height: u32,
    body: String,
    runs: usize,
}

impl TextLayer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            body: String::new(),
            runs: 0,
        }
    }

    /// Add one text run.
    pub fn text(&mut self, x: f32, y: f32, size: f32, color: Rgb, anchor: Anchor, content: &str) {
        let (text_anchor, baseline) = match anchor {
            Anchor::TopLeft => ("start", "hanging"),
            Anchor::Center => ("middle", "central"),
        };
        let _ = writeln!(
            self.body,
            r#"<text x="{x}" y="{y}" font-family="{LABEL_FONT_FAMILY}, sans-serif" font-size="{size}" fill="{}" text-anchor="{text_anchor}" dominant-baseline="{baseline}">{}</text>"#,
            color.to_hex(),
            escape_xml(content)
        );
        self.runs += 1;
    }

    pub fn len(&self) -> usize {
        self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs == 0
    }

    /// The overlay as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
{body}</svg>"#,
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

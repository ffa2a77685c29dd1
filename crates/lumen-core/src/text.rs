// File: crates/lumen-core/src/text.rs
// Summary: Text shaper/renderer using Skia textlayout: bold labels, middle baseline, optional centering.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

/// Horizontal anchor of a label relative to its position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Anchor {
    #[default]
    Left,
    Center,
}

/// Size, color and rotation of a label. `angle` is in degrees, counter-clockwise.
#[derive(Clone, Copy, Debug)]
pub struct Label {
    pub size: f32,
    pub color: skia::Color,
    pub angle: f32,
    pub anchor: Anchor,
}

impl Label {
    pub fn new(size: f32, color: skia::Color) -> Self {
        Self { size, color, angle: 0.0, anchor: Anchor::Left }
    }

    pub fn rotated(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn centered(mut self) -> Self {
        self.anchor = Anchor::Center;
        self
    }
}

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_style(skia::FontStyle::bold());
        ts.set_font_families(&["Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"]);
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(size, color));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Paint `text` so that its vertical middle sits on the current origin.
    /// The caller has already translated/rotated the canvas.
    pub fn draw_at_origin(&self, canvas: &skia::Canvas, text: &str, label: &Label) {
        let mut p = self.layout(text, label.size, label.color);
        let dx = match label.anchor {
            Anchor::Left => 0.0,
            Anchor::Center => -p.longest_line() * 0.5,
        };
        p.paint(canvas, (dx, -p.height() * 0.5));
    }
}

// File: crates/scene-render-skia/src/text.rs
// Summary: Paragraph-based label drawing (anchored, optionally rotated) on top of Skia textlayout.

use scene_core::Anchor;
use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

const FAMILIES: [&str; 5] = ["Segoe UI", "Arial", "Helvetica", "DejaVu Sans", "sans-serif"];

/// Labels are short single lines; wide enough that nothing wraps.
const LAYOUT_WIDTH: f32 = 4096.0;

/// Baseline offset from the paragraph's top edge, as a fraction of font size.
const ASCENT: f32 = 0.8;

pub struct TextShaper {
    fonts: FontCollection,
    style: ParagraphStyle,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fonts = FontCollection::new();
        fonts.set_default_font_manager(skia::FontMgr::default(), None);
        let mut style = ParagraphStyle::new();
        style.set_text_align(TextAlign::Left);
        Self { fonts, style }
    }

    fn paragraph(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&FAMILIES);

        let mut builder = ParagraphBuilder::new(&self.style, &self.fonts);
        builder.push_style(&ts);
        builder.add_text(text);
        let mut p = builder.build();
        p.layout(LAYOUT_WIDTH);
        p
    }

    /// Baseline at `y`; `anchor` picks which end of the line sits on `x`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color, anchor: Anchor) {
        let p = self.paragraph(text, size, color);
        let shift = match anchor {
            Anchor::Start => 0.0,
            Anchor::Middle => p.longest_line() * 0.5,
            Anchor::End => p.longest_line(),
        };
        p.paint(canvas, (x - shift, y - size * ASCENT));
    }

    /// `draw` turned -90 degrees about (x, y), for the y-axis label.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_vertical(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color, anchor: Anchor) {
        canvas.save();
        canvas.rotate(-90.0, Some(skia::Point::new(x, y)));
        self.draw(canvas, text, x, y, size, color, anchor);
        canvas.restore();
    }
}

// File: crates/scene-render-skia/src/lib.rs
// Summary: Skia CPU raster backend. Draws a scene_core::Frame to RGBA8 buffers or PNG files.

use anyhow::Result;
use scene_core::{Color, Frame, Primitive, ScreenPoint};
use skia_safe as skia;

pub mod text;

pub use text::TextShaper;

const CAPTION_SIZE: f32 = 15.0;

pub struct SkiaRenderer {
    shaper: TextShaper,
}

impl Default for SkiaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn sk_color(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn pt(p: ScreenPoint) -> skia::Point {
    skia::Point::new(p.x as f32, p.y as f32)
}

impl SkiaRenderer {
    pub fn new() -> Self {
        Self { shaper: TextShaper::new() }
    }

    fn raster(&self, frame: &Frame) -> Result<skia::Surface> {
        let w = frame.width.max(1) as i32;
        let h = frame.height.max(1) as i32;
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface {w}x{h}"))?;
        self.draw(surface.canvas(), frame);
        Ok(surface)
    }

    /// Paint every primitive of `frame` followed by its caption line.
    pub fn draw(&self, canvas: &skia::Canvas, frame: &Frame) {
        canvas.clear(sk_color(frame.background));
        for p in &frame.primitives {
            self.draw_primitive(canvas, p);
        }
        if !frame.caption.is_empty() {
            let at = frame.caption_anchor();
            self.shaper.draw(
                canvas,
                &frame.caption,
                at.x as f32,
                at.y as f32,
                CAPTION_SIZE,
                sk_color(frame.caption_color),
                scene_core::Anchor::Start,
            );
        }
    }

    fn draw_primitive(&self, canvas: &skia::Canvas, p: &Primitive) {
        match p {
            Primitive::Line { from, to, stroke, width, dashed } => {
                let mut paint = stroke_paint(*stroke, *width);
                if *dashed {
                    paint.set_path_effect(skia::PathEffect::dash(&[4.0, 4.0], 0.0));
                }
                canvas.draw_line(pt(*from), pt(*to), &paint);
            }
            Primitive::Path { points, stroke, width } => {
                let Some((first, rest)) = points.split_first() else { return };
                let mut path = skia::Path::new();
                path.move_to(pt(*first));
                for p in rest {
                    path.line_to(pt(*p));
                }
                let mut paint = stroke_paint(*stroke, *width);
                paint.set_stroke_join(skia::paint::Join::Round);
                canvas.draw_path(&path, &paint);
            }
            Primitive::Circle { center, radius, fill } => {
                canvas.draw_circle(pt(*center), *radius as f32, &fill_paint(*fill));
            }
            Primitive::Rect { origin, width, height, fill } => {
                let r = skia::Rect::from_xywh(origin.x as f32, origin.y as f32, *width as f32, *height as f32);
                canvas.draw_rect(r, &fill_paint(*fill));
            }
            Primitive::Text { at, text, size, color, anchor, vertical } => {
                let (x, y, size, color) = (at.x as f32, at.y as f32, *size as f32, sk_color(*color));
                if *vertical {
                    self.shaper.draw_vertical(canvas, text, x, y, size, color, *anchor);
                } else {
                    self.shaper.draw(canvas, text, x, y, size, color, *anchor);
                }
            }
        }
    }

    /// Render to an unpremultiplied RGBA8 buffer. Returns (pixels, width, height, row_bytes).
    pub fn render_to_rgba8(&self, frame: &Frame) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = self.raster(frame)?;
        let (w, h) = (surface.width(), surface.height());
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let row_bytes = w as usize * 4;
        let mut pixels = vec![0u8; row_bytes * h as usize];
        if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            anyhow::bail!("read_pixels failed for {w}x{h} surface");
        }
        Ok((pixels, w as u32, h as u32, row_bytes))
    }

    pub fn render_to_png_bytes(&self, frame: &Frame) -> Result<Vec<u8>> {
        let mut surface = self.raster(frame)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    pub fn render_to_png(&self, frame: &Frame, path: impl AsRef<std::path::Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.render_to_png_bytes(frame)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        tracing::debug!(path = %path.display(), "wrote png");
        Ok(())
    }
}

fn stroke_paint(c: Color, width: f64) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width as f32);
    paint.set_color(sk_color(c));
    paint
}

fn fill_paint(c: Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(sk_color(c));
    paint
}

// File: crates/scene-core/src/svg.rs
// Summary: Serializes a Frame into a standalone SVG document.

use std::fmt::Write as _;

use crate::primitive::{Anchor, Frame, FrameStatus, Primitive};
use crate::theme::Color;

const FONT_FAMILY: &str = "Segoe UI, Arial, Helvetica, sans-serif";

/// Escape text for element content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn paint(attr: &str, c: Color) -> String {
    if c.a == 255 {
        format!(r#"{attr}="{}""#, c.to_hex())
    } else {
        format!(r#"{attr}="{}" {attr}-opacity="{:.3}""#, c.to_hex(), c.opacity())
    }
}

fn anchor_attr(a: Anchor) -> &'static str {
    match a {
        Anchor::Start => "start",
        Anchor::Middle => "middle",
        Anchor::End => "end",
    }
}

/// Render `frame` as SVG. Coordinates are written with two decimals so output is stable.
pub fn render_svg(frame: &Frame) -> String {
    let mut s = String::new();
    // writes into a String cannot fail
    let _ = write_svg(&mut s, frame);
    s
}

fn write_svg(s: &mut String, frame: &Frame) -> std::fmt::Result {
    let status = match frame.status {
        FrameStatus::Loading => "loading",
        FrameStatus::Ready => "ready",
        FrameStatus::Failed => "failed",
    };
    writeln!(
        s,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" data-status="{status}">"#,
        w = frame.width,
        h = frame.height,
    )?;
    if !frame.caption.is_empty() {
        writeln!(s, "  <desc>{}</desc>", escape(&frame.caption))?;
    }
    writeln!(s, r#"  <rect x="0" y="0" width="{}" height="{}" {}/>"#, frame.width, frame.height, paint("fill", frame.background))?;

    for p in &frame.primitives {
        match p {
            Primitive::Line { from, to, stroke, width, dashed } => {
                let dash = if *dashed { r#" stroke-dasharray="4 4""# } else { "" };
                writeln!(
                    s,
                    r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" {} stroke-width="{width}"{dash}/>"#,
                    from.x, from.y, to.x, to.y, paint("stroke", *stroke)
                )?;
            }
            Primitive::Path { points, stroke, width } => {
                let mut d = String::new();
                for (i, pt) in points.iter().enumerate() {
                    let cmd = if i == 0 { 'M' } else { 'L' };
                    write!(d, "{cmd}{:.2},{:.2}", pt.x, pt.y)?;
                }
                writeln!(s, r#"  <path d="{d}" fill="none" {} stroke-width="{width}"/>"#, paint("stroke", *stroke))?;
            }
            Primitive::Circle { center, radius, fill } => {
                writeln!(s, r#"  <circle cx="{:.2}" cy="{:.2}" r="{radius}" {}/>"#, center.x, center.y, paint("fill", *fill))?;
            }
            Primitive::Rect { origin, width, height, fill } => {
                writeln!(
                    s,
                    r#"  <rect x="{:.2}" y="{:.2}" width="{width}" height="{height}" {}/>"#,
                    origin.x, origin.y, paint("fill", *fill)
                )?;
            }
            Primitive::Text { at, text, size, color, anchor, vertical } => {
                let rotate = if *vertical {
                    format!(r#" transform="rotate(-90 {:.2} {:.2})""#, at.x, at.y)
                } else {
                    String::new()
                };
                writeln!(
                    s,
                    r#"  <text x="{:.2}" y="{:.2}" font-family="{FONT_FAMILY}" font-size="{size}" text-anchor="{}" {}{rotate}>{}</text>"#,
                    at.x, at.y, anchor_attr(*anchor), paint("fill", *color), escape(text)
                )?;
            }
        }
    }

    if !frame.caption.is_empty() {
        let at = frame.caption_anchor();
        writeln!(
            s,
            r#"  <text class="caption" x="{:.2}" y="{:.2}" font-family="{FONT_FAMILY}" font-size="13" {}>{}</text>"#,
            at.x, at.y, paint("fill", frame.caption_color), escape(&frame.caption)
        )?;
    }
    writeln!(s, "</svg>")
}

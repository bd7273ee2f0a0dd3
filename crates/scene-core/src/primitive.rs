// File: crates/scene-core/src/primitive.rs
// Summary: Backend-agnostic drawable primitives and the Frame that carries one scene's output.

use crate::theme::Color;
use crate::types::ScreenPoint;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Line {
        from: ScreenPoint,
        to: ScreenPoint,
        stroke: Color,
        width: f64,
        dashed: bool,
    },
    /// Open polyline through `points`.
    Path {
        points: Vec<ScreenPoint>,
        stroke: Color,
        width: f64,
    },
    Circle {
        center: ScreenPoint,
        radius: f64,
        fill: Color,
    },
    Rect {
        origin: ScreenPoint,
        width: f64,
        height: f64,
        fill: Color,
    },
    Text {
        at: ScreenPoint,
        text: String,
        size: f64,
        color: Color,
        anchor: Anchor,
        /// Rotated -90 degrees around `at` (vertical axis label).
        vertical: bool,
    },
}

impl Primitive {
    pub fn text(at: ScreenPoint, text: impl Into<String>, size: f64, color: Color, anchor: Anchor) -> Self {
        Primitive::Text { at, text: text.into(), size, color, anchor, vertical: false }
    }

    pub fn line(from: ScreenPoint, to: ScreenPoint, stroke: Color, width: f64) -> Self {
        Primitive::Line { from, to, stroke, width, dashed: false }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    Loading,
    Ready,
    Failed,
}

/// Everything a backend needs to draw one scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub primitives: Vec<Primitive>,
    pub caption: String,
    pub caption_color: Color,
    pub status: FrameStatus,
}

impl Frame {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            primitives: Vec::new(),
            caption: String::new(),
            caption_color: Color::rgb(0, 0, 0),
            status: FrameStatus::Loading,
        }
    }

    pub fn push(&mut self, p: Primitive) {
        self.primitives.push(p);
    }

    /// Baseline position of the caption line.
    pub fn caption_anchor(&self) -> ScreenPoint {
        ScreenPoint::new(16.0, self.height as f64 - 14.0)
    }

    pub fn count_paths(&self) -> usize {
        self.primitives.iter().filter(|p| matches!(p, Primitive::Path { .. })).count()
    }

    pub fn count_circles(&self) -> usize {
        self.primitives.iter().filter(|p| matches!(p, Primitive::Circle { .. })).count()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

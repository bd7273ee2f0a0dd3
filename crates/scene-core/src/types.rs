// File: crates/scene-core/src/types.rs
// Summary: Shared types and constants (surface size, insets, screen points, plot rect).

use serde::{Deserialize, Serialize};

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 400;

/// Margins between the surface edge and the plot rect, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Insets { left, right, top, bottom }
    }
}

impl Default for Insets {
    /// Right side holds the legend; bottom holds tick labels, the x label and the caption.
    fn default() -> Self {
        Insets::new(64, 120, 40, 72)
    }
}

/// A point in screen space (origin top-left, y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Plot area inside the insets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotRect {
    /// Plot area for a `width` x `height` surface. Collapses to a line rather than inverting.
    pub fn from_insets(width: u32, height: u32, insets: &Insets) -> Self {
        let left = insets.left as f64;
        let top = insets.top as f64;
        let right = (width as f64 - insets.right as f64).max(left);
        let bottom = (height as f64 - insets.bottom as f64).max(top);
        PlotRect { left, top, right, bottom }
    }
    pub fn width(&self) -> f64 { self.right - self.left }
    pub fn height(&self) -> f64 { self.bottom - self.top }
}

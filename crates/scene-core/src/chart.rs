// File: crates/scene-core/src/chart.rs
// Summary: Chart descriptor and the geometry pipeline that turns series into a Frame of primitives.

use serde::{Deserialize, Serialize};

use crate::grid::{format_tick, nice_ticks};
use crate::primitive::{Anchor, Frame, FrameStatus, Primitive};
use crate::scale::{resolve_x, resolve_y, Domain, Projection};
use crate::series::{Mark, Series};
use crate::theme::{OrdinalPalette, Theme};
use crate::types::{Insets, PlotRect, ScreenPoint, HEIGHT, WIDTH};

const X_TICKS: usize = 8;
const Y_TICKS: usize = 5;
const SCATTER_RADIUS: f64 = 3.5;
const LINE_WIDTH: f64 = 2.0;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub insets: Insets,
    pub theme: Theme,
    /// Emit text primitives (ticks, labels, title, legend). Off for pixel snapshots.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::light(),
            draw_labels: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub ordinal: f64,
    pub text: String,
}

/// Declarative description of one chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartDescriptor {
    pub title: String,
    #[serde(default)]
    pub x_domain: Domain,
    #[serde(default)]
    pub y_domain: Domain,
    #[serde(default)]
    pub color_domain: Vec<String>,
    #[serde(default)]
    pub x_label: Option<String>,
    #[serde(default)]
    pub y_label: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl ChartDescriptor {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_domain: Domain::AUTO,
            y_domain: Domain::AUTO,
            color_domain: Vec::new(),
            x_label: None,
            y_label: None,
            annotations: Vec::new(),
        }
    }

    /// Shared projection for all `series`: both domains are resolved over the union first.
    pub fn projection(&self, series: &[Series], opts: &RenderOptions) -> Projection {
        let rect = PlotRect::from_insets(opts.width, opts.height, &opts.insets);
        Projection::new(resolve_x(self.x_domain, series), resolve_y(self.y_domain, series), rect)
    }

    /// Pure geometry: series in, drawable frame out.
    pub fn build_frame(&self, series: &[Series], opts: &RenderOptions) -> Frame {
        let theme = &opts.theme;
        let proj = self.projection(series, opts);
        let r = proj.rect;
        let mut frame = Frame::new(opts.width, opts.height, theme.background);
        frame.caption_color = theme.caption;
        frame.status = FrameStatus::Ready;

        let xt = nice_ticks(proj.x.dmin, proj.x.dmax, X_TICKS);
        let yt = nice_ticks(proj.y.dmin, proj.y.dmax, Y_TICKS);

        // grid
        for &x in &xt {
            let px = proj.x.to_px(x);
            frame.push(Primitive::line(ScreenPoint::new(px, r.top), ScreenPoint::new(px, r.bottom), theme.grid, 1.0));
        }
        for &y in &yt {
            let py = proj.y.to_px(y);
            frame.push(Primitive::line(ScreenPoint::new(r.left, py), ScreenPoint::new(r.right, py), theme.grid, 1.0));
        }

        // axes
        frame.push(Primitive::line(ScreenPoint::new(r.left, r.bottom), ScreenPoint::new(r.right, r.bottom), theme.axis_line, 1.5));
        frame.push(Primitive::line(ScreenPoint::new(r.left, r.top), ScreenPoint::new(r.left, r.bottom), theme.axis_line, 1.5));

        // tick marks
        for &x in &xt {
            let px = proj.x.to_px(x);
            frame.push(Primitive::line(ScreenPoint::new(px, r.bottom), ScreenPoint::new(px, r.bottom + 5.0), theme.tick, 1.0));
        }
        for &y in &yt {
            let py = proj.y.to_px(y);
            frame.push(Primitive::line(ScreenPoint::new(r.left - 5.0, py), ScreenPoint::new(r.left, py), theme.tick, 1.0));
        }

        if opts.draw_labels {
            for &x in &xt {
                let at = ScreenPoint::new(proj.x.to_px(x), r.bottom + 18.0);
                frame.push(Primitive::text(at, format_tick(x), 11.0, theme.tick, Anchor::Middle));
            }
            for &y in &yt {
                let at = ScreenPoint::new(r.left - 8.0, proj.y.to_px(y) + 4.0);
                frame.push(Primitive::text(at, format_tick(y), 11.0, theme.tick, Anchor::End));
            }
            if let Some(label) = &self.x_label {
                let at = ScreenPoint::new((r.left + r.right) * 0.5, r.bottom + 36.0);
                frame.push(Primitive::text(at, label.clone(), 12.0, theme.axis_label, Anchor::Middle));
            }
            if let Some(label) = &self.y_label {
                frame.push(Primitive::Text {
                    at: ScreenPoint::new(16.0, (r.top + r.bottom) * 0.5),
                    text: label.clone(),
                    size: 12.0,
                    color: theme.axis_label,
                    anchor: Anchor::Middle,
                    vertical: true,
                });
            }
            if !self.title.is_empty() {
                frame.push(Primitive::text(ScreenPoint::new(r.left, r.top - 16.0), self.title.clone(), 16.0, theme.title, Anchor::Start));
            }
        }

        for a in &self.annotations {
            if !proj.x.contains(a.ordinal) {
                tracing::debug!(ordinal = a.ordinal, "annotation outside x domain, skipped");
                continue;
            }
            let px = proj.x.to_px(a.ordinal);
            frame.push(Primitive::Line {
                from: ScreenPoint::new(px, r.top),
                to: ScreenPoint::new(px, r.bottom),
                stroke: theme.annotation,
                width: 1.0,
                dashed: true,
            });
            if opts.draw_labels {
                frame.push(Primitive::text(ScreenPoint::new(px + 4.0, r.top + 12.0), a.text.clone(), 11.0, theme.annotation, Anchor::Start));
            }
        }

        let palette = OrdinalPalette::from_theme(&self.color_domain, theme);
        for s in series {
            let color = palette.color_for(&s.label);
            let pts: Vec<ScreenPoint> = s.points().iter().map(|p| proj.point(p.ordinal, p.value)).collect();
            match s.mark {
                Mark::Line if pts.len() >= 2 => {
                    frame.push(Primitive::Path { points: pts, stroke: color, width: LINE_WIDTH });
                }
                Mark::Line | Mark::Scatter => {
                    for center in pts {
                        frame.push(Primitive::Circle { center, radius: SCATTER_RADIUS, fill: color });
                    }
                }
            }
        }

        // legend
        for (i, (label, color)) in palette.entries().enumerate() {
            let y = r.top + i as f64 * 18.0;
            frame.push(Primitive::Rect { origin: ScreenPoint::new(r.right + 12.0, y), width: 12.0, height: 12.0, fill: color });
            if opts.draw_labels {
                frame.push(Primitive::text(ScreenPoint::new(r.right + 30.0, y + 10.0), label, 11.0, theme.axis_label, Anchor::Start));
            }
        }

        frame
    }
}

/// Frame with no chart, only a caption (loading and failure states).
pub fn status_frame(caption: impl Into<String>, status: FrameStatus, opts: &RenderOptions) -> Frame {
    let mut frame = Frame::new(opts.width, opts.height, opts.theme.background);
    frame.caption = caption.into();
    frame.status = status;
    frame.caption_color = match status {
        FrameStatus::Failed => opts.theme.error,
        FrameStatus::Loading | FrameStatus::Ready => opts.theme.caption,
    };
    frame
}

// File: crates/scene-core/src/scale.rs
// Summary: Linear data-to-pixel scales, domain resolution ("auto" / fixed) and nice rounding.

use serde::{Deserialize, Serialize};

use crate::series::Series;
use crate::types::{Insets, PlotRect, ScreenPoint};

/// Mantissas of the "nice" number family s * 10^k.
const NICE_STEPS: [f64; 4] = [1.0, 2.0, 2.5, 5.0];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoKeyword {
    Auto,
}

/// Axis domain as configured: a fixed `[min, max]` pair or `"auto"`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Domain {
    Fixed([f64; 2]),
    Auto(AutoKeyword),
}

impl Domain {
    pub const AUTO: Domain = Domain::Auto(AutoKeyword::Auto);

    pub const fn fixed(min: f64, max: f64) -> Self {
        Domain::Fixed([min, max])
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Domain::Auto(_))
    }
}

impl Default for Domain {
    fn default() -> Self {
        Domain::AUTO
    }
}

/// Smallest s * 10^k (s in {1, 2, 2.5, 5}) that is >= `x`. Non-positive input gives 0.
pub fn nice_ceil(x: f64) -> f64 {
    if !x.is_finite() || x <= 0.0 {
        return 0.0;
    }
    let mut exp = x.log10().floor() as i32;
    let mut base = 10f64.powi(exp);
    if x / base >= 10.0 {
        exp += 1;
        base = 10f64.powi(exp);
    } else if x / base < 1.0 {
        exp -= 1;
        base = 10f64.powi(exp);
    }
    for s in NICE_STEPS {
        let candidate = s * base;
        if candidate >= x {
            return candidate;
        }
    }
    10f64.powi(exp + 1)
}

/// Round step for splitting `span` into roughly `count` intervals.
pub fn nice_step(span: f64, count: usize) -> f64 {
    let raw = span.abs() / count.max(1) as f64;
    let step = nice_ceil(raw);
    if step > 0.0 { step } else { 1.0 }
}

/// Union (min of mins, max of maxes) of ordinals across all series.
pub fn ordinal_extent(series: &[Series]) -> Option<(f64, f64)> {
    union(series.iter().filter_map(Series::ordinal_range))
}

/// Union of values across all series.
pub fn value_extent(series: &[Series]) -> Option<(f64, f64)> {
    union(series.iter().filter_map(Series::value_range))
}

fn union(ranges: impl Iterator<Item = (f64, f64)>) -> Option<(f64, f64)> {
    ranges.fold(None, |acc, (lo, hi)| match acc {
        None => Some((lo, hi)),
        Some((a, b)) => Some((a.min(lo), b.max(hi))),
    })
}

/// Resolve the x domain: fixed as given, auto as the ordinal union.
pub fn resolve_x(domain: Domain, series: &[Series]) -> (f64, f64) {
    match domain {
        Domain::Fixed([lo, hi]) => (lo, hi),
        Domain::Auto(_) => ordinal_extent(series).unwrap_or((0.0, 1.0)),
    }
}

/// Resolve the y domain: fixed as given, auto as `[0, nice_ceil(max value)]`.
pub fn resolve_y(domain: Domain, series: &[Series]) -> (f64, f64) {
    match domain {
        Domain::Fixed([lo, hi]) => (lo, hi),
        Domain::Auto(_) => {
            let max = value_extent(series).map(|(_, hi)| hi).unwrap_or(0.0);
            (0.0, nice_ceil(max))
        }
    }
}

/// Affine map from a data interval onto a pixel interval.
/// `range_start` receives `dmin`, `range_end` receives `dmax`; pass them reversed for y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub dmin: f64,
    pub dmax: f64,
    pub range_start: f64,
    pub range_end: f64,
}

impl LinearScale {
    pub fn new(dmin: f64, dmax: f64, range_start: f64, range_end: f64) -> Self {
        let mut s = Self { dmin, dmax, range_start, range_end };
        if (s.dmax - s.dmin).abs() < 1e-12 { s.dmax = s.dmin + 1.0; }
        s
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f64 {
        self.range_start + (v - self.dmin) / (self.dmax - self.dmin) * (self.range_end - self.range_start)
    }

    pub fn contains(&self, v: f64) -> bool {
        let (lo, hi) = if self.dmin <= self.dmax { (self.dmin, self.dmax) } else { (self.dmax, self.dmin) };
        v >= lo && v <= hi
    }
}

/// Horizontal and vertical scales for one plot rect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub x: LinearScale,
    pub y: LinearScale,
    pub rect: PlotRect,
}

impl Projection {
    pub fn new(x_domain: (f64, f64), y_domain: (f64, f64), rect: PlotRect) -> Self {
        Self {
            x: LinearScale::new(x_domain.0, x_domain.1, rect.left, rect.right),
            y: LinearScale::new(y_domain.0, y_domain.1, rect.bottom, rect.top),
            rect,
        }
    }

    #[inline]
    pub fn point(&self, ordinal: f64, value: f64) -> ScreenPoint {
        ScreenPoint::new(self.x.to_px(ordinal), self.y.to_px(value))
    }
}

/// Map every point of `series` into screen space.
pub fn project(
    series: &Series,
    x_domain: (f64, f64),
    y_domain: (f64, f64),
    width: u32,
    height: u32,
    insets: &Insets,
) -> Vec<ScreenPoint> {
    let p = Projection::new(x_domain, y_domain, PlotRect::from_insets(width, height, insets));
    series.points().iter().map(|pt| p.point(pt.ordinal, pt.value)).collect()
}

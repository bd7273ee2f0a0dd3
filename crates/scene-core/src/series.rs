// File: crates/scene-core/src/series.rs
// Summary: Series model: labeled, ordinal-sorted points drawn as a line or as scatter marks.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    #[default]
    Line,
    Scatter,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesPoint {
    pub ordinal: f64, // season / year on X
    pub value: f64,
}

impl SeriesPoint {
    pub const fn new(ordinal: f64, value: f64) -> Self {
        Self { ordinal, value }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub label: String,
    pub mark: Mark,
    points: Vec<SeriesPoint>,
}

impl Series {
    /// Build a series; points are sorted by ordinal ascending.
    pub fn new(label: impl Into<String>, mark: Mark, mut points: Vec<SeriesPoint>) -> Self {
        points.sort_by(|a, b| a.ordinal.total_cmp(&b.ordinal));
        Self { label: label.into(), mark, points }
    }

    pub fn line(label: impl Into<String>, data: Vec<(f64, f64)>) -> Self {
        Self::new(label, Mark::Line, data.into_iter().map(|(x, y)| SeriesPoint::new(x, y)).collect())
    }

    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.mark = mark;
        self
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// (min, max) of ordinals, or `None` for an empty series.
    pub fn ordinal_range(&self) -> Option<(f64, f64)> {
        Some((self.points.first()?.ordinal, self.points.last()?.ordinal))
    }

    /// (min, max) of values, or `None` for an empty series.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |acc, p| match acc {
            None => Some((p.value, p.value)),
            Some((lo, hi)) => Some((lo.min(p.value), hi.max(p.value))),
        })
    }
}

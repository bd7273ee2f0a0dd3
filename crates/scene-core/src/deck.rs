// File: crates/scene-core/src/deck.rs
// Summary: Scene deck configuration (JSON) and the per-scene aggregation plan that produces series.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate, bucketize, pivot_series, position_matcher, single_series, GroupKey, KeyPart, Reducer, RoleMatcher};
use crate::chart::ChartDescriptor;
use crate::error::{SceneError, SceneResult};
use crate::record::{Record, Table};
use crate::series::{Mark, Series};

/// Numeric field of interest, optionally divided by another column (per-game rates).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub column: String,
    #[serde(default)]
    pub per: Option<String>,
}

impl Measure {
    pub fn column(column: impl Into<String>) -> Self {
        Self { column: column.into(), per: None }
    }

    pub fn per(column: impl Into<String>, per: impl Into<String>) -> Self {
        Self { column: column.into(), per: Some(per.into()) }
    }

    /// `None` when the value (or a non-zero divisor) is missing.
    pub fn extract(&self, r: &Record) -> Option<f64> {
        let v = r.number(&self.column)?;
        match &self.per {
            None => Some(v),
            Some(per) => {
                let d = r.number(per)?;
                if d == 0.0 { None } else { Some(v / d) }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub label: String,
    pub codes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Grouping {
    /// One series over every record.
    All { label: String },
    /// One series per distinct value of `column` (a partition).
    Column { column: String },
    /// One series per role; a record may count toward several roles.
    Roles { column: String, roles: Vec<Role> },
}

/// Inclusive numeric bounds applied before grouping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub column: String,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl Filter {
    pub fn accepts(&self, r: &Record) -> bool {
        match r.number(&self.column) {
            None => false,
            Some(v) => self.min.map_or(true, |lo| v >= lo) && self.max.map_or(true, |hi| v <= hi),
        }
    }
}

/// Everything one scene needs: where the data lives, how to reduce it, how to draw it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenePlan {
    pub caption: String,
    pub source: String,
    /// Column holding the X ordinal (season / year).
    pub ordinal: String,
    pub measure: Measure,
    pub reducer: Reducer,
    pub grouping: Grouping,
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub mark: Mark,
    /// Plotted in place of groups with no contributing records.
    #[serde(default)]
    pub fallback: f64,
    pub chart: ChartDescriptor,
}

impl ScenePlan {
    /// Every column this plan reads, each listed once in first-use order.
    pub fn required_columns(&self) -> Vec<&str> {
        let group = match &self.grouping {
            Grouping::All { .. } => None,
            Grouping::Column { column } | Grouping::Roles { column, .. } => Some(column.as_str()),
        };
        let all = [Some(self.ordinal.as_str()), Some(self.measure.column.as_str()), self.measure.per.as_deref(), group]
            .into_iter()
            .flatten()
            .chain(self.filters.iter().map(|f| f.column.as_str()));

        let mut cols: Vec<&str> = Vec::new();
        for c in all {
            if !cols.contains(&c) {
                cols.push(c);
            }
        }
        cols
    }

    fn ordinal_of(&self, r: &Record) -> Option<KeyPart> {
        r.number(&self.ordinal).map(KeyPart::from_ordinal)
    }

    /// Records that pass the filters and carry a numeric ordinal.
    fn admitted<'a>(&'a self, table: &'a Table) -> impl Iterator<Item = &'a Record> + 'a {
        table
            .records
            .iter()
            .filter(move |r| self.ordinal_of(r).is_some() && self.filters.iter().all(|f| f.accepts(r)))
    }

    /// Run the aggregation and shape the result into series.
    #[tracing::instrument(skip(self, table), fields(source = %self.source, rows = table.len()))]
    pub fn compute(&self, table: &Table) -> SceneResult<Vec<Series>> {
        table.require(self.required_columns())?;

        let ordinal_key = |r: &Record| self.ordinal_of(r).unwrap_or(KeyPart::Int(0));
        let measure = |r: &Record| self.measure.extract(r);

        let series = match &self.grouping {
            Grouping::All { label } => {
                let result = aggregate(self.admitted(table), |r| GroupKey::One(ordinal_key(r)), measure, self.reducer);
                if result.is_empty() { Vec::new() } else { vec![single_series(&result, label.clone(), self.mark)] }
            }
            Grouping::Column { column } => {
                let records = self.admitted(table).filter(|r| r.text(column).is_some());
                let result = aggregate(
                    records,
                    |r| GroupKey::Two(ordinal_key(r), KeyPart::Text(r.text(column).unwrap_or_default().to_string())),
                    measure,
                    self.reducer,
                );
                pivot_series(&result, self.mark, self.fallback)
            }
            Grouping::Roles { column, roles } => {
                let matchers: Vec<RoleMatcher> = roles
                    .iter()
                    .map(|role| {
                        let codes: Vec<&str> = role.codes.iter().map(String::as_str).collect();
                        position_matcher(role.label.clone(), column.clone(), &codes)
                    })
                    .collect();
                let buckets = bucketize(self.admitted(table), &matchers);
                let mut keyed = Vec::new();
                for (label, records) in buckets.iter() {
                    let result = aggregate(records.iter().copied(), |r| GroupKey::One(ordinal_key(r)), measure, self.reducer);
                    keyed.extend(result.iter().map(|(k, v)| (GroupKey::Two(k.first().clone(), KeyPart::Text(label.to_string())), v)));
                }
                pivot_series(&keyed.into_iter().collect(), self.mark, self.fallback)
            }
        };

        if series.iter().all(Series::is_empty) {
            return Err(SceneError::empty(format!("no numeric '{}' values in {}", self.measure.column, table.name)));
        }
        tracing::debug!(series = series.len(), "scene series ready");
        Ok(series)
    }
}

/// Ordered scenes. Scene k (1-based) is `scenes[k - 1]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDeck {
    #[serde(default)]
    pub title: String,
    pub scenes: Vec<ScenePlan>,
}

impl SceneDeck {
    pub fn from_json_str(s: &str) -> SceneResult<Self> {
        let deck: SceneDeck = serde_json::from_str(s)?;
        deck.validate()?;
        Ok(deck)
    }

    pub fn from_path(path: &Path) -> SceneResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| SceneError::io(path, e))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> SceneResult<()> {
        if self.scenes.is_empty() {
            return Err(SceneError::config("deck has no scenes"));
        }
        for (i, s) in self.scenes.iter().enumerate() {
            if s.source.trim().is_empty() {
                return Err(SceneError::config(format!("scene {} has an empty source", i + 1)));
            }
            if let Grouping::Roles { roles, .. } = &s.grouping {
                if roles.is_empty() {
                    return Err(SceneError::config(format!("scene {} groups by roles but lists none", i + 1)));
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// 1-based lookup.
    pub fn scene(&self, index: usize) -> Option<&ScenePlan> {
        index.checked_sub(1).and_then(|i| self.scenes.get(i))
    }

    /// Caption table: scene index → caption text.
    pub fn caption(&self, index: usize) -> &str {
        self.scene(index).map(|s| s.caption.as_str()).unwrap_or("")
    }
}

// File: crates/scene-core/src/aggregate.rs
// Summary: Group-by aggregation (mean / sample stddev / count) and role bucketing of records.
// Notes:
// - Records whose measure is not a finite number are dropped before reduction.
// - A group with no contributing records is absent from the result. Callers that
//   plot the result substitute their own fallback (see `pivot_series`).

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::series::{Mark, Series, SeriesPoint};

/// One categorical component of a group key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyPart {
    Int(i64),
    Text(String),
}

impl KeyPart {
    /// Integer-valued text (`2020`, `2020.0`) becomes `Int`, everything else `Text`.
    pub fn parse(s: &str) -> Self {
        let t = s.trim();
        if let Ok(n) = t.parse::<i64>() {
            return KeyPart::Int(n);
        }
        match t.parse::<f64>() {
            Ok(v) if v.is_finite() => KeyPart::from_ordinal(v),
            _ => KeyPart::Text(t.to_string()),
        }
    }

    /// Canonical key for a numeric ordinal, so equal values always share one bucket.
    pub fn from_ordinal(v: f64) -> Self {
        if v.fract() == 0.0 && v.abs() < 9.0e15 {
            KeyPart::Int(v as i64)
        } else {
            KeyPart::Text(v.to_string())
        }
    }

    /// Numeric reading of this part, used as the plotted ordinal.
    pub fn as_ordinal(&self) -> Option<f64> {
        match self {
            KeyPart::Int(n) => Some(*n as f64),
            KeyPart::Text(s) => s.parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Int(n) => write!(f, "{n}"),
            KeyPart::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for KeyPart {
    fn from(v: i64) -> Self { KeyPart::Int(v) }
}

impl From<&str> for KeyPart {
    fn from(v: &str) -> Self { KeyPart::Text(v.to_string()) }
}

impl From<String> for KeyPart {
    fn from(v: String) -> Self { KeyPart::Text(v) }
}

/// Composite bucket identifier of one or two parts.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    One(KeyPart),
    Two(KeyPart, KeyPart),
}

impl GroupKey {
    pub fn one(a: impl Into<KeyPart>) -> Self {
        GroupKey::One(a.into())
    }

    pub fn pair(a: impl Into<KeyPart>, b: impl Into<KeyPart>) -> Self {
        GroupKey::Two(a.into(), b.into())
    }

    pub fn first(&self) -> &KeyPart {
        match self {
            GroupKey::One(a) | GroupKey::Two(a, _) => a,
        }
    }

    pub fn second(&self) -> Option<&KeyPart> {
        match self {
            GroupKey::One(_) => None,
            GroupKey::Two(_, b) => Some(b),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reducer {
    Mean,
    /// Sample standard deviation (n - 1 divisor); a single value yields 0.
    #[serde(alias = "std", alias = "deviation")]
    StdDev,
    Count,
}

impl Reducer {
    pub fn reduce(self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(match self {
            Reducer::Mean => mean(values)?,
            Reducer::StdDev => sample_stddev(values)?,
            Reducer::Count => values.len() as f64,
        })
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation. n = 1 gives 0.
pub fn sample_stddev(values: &[f64]) -> Option<f64> {
    let n = values.len();
    let m = mean(values)?;
    if n == 1 {
        return Some(0.0);
    }
    let ss = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>();
    Some((ss / (n - 1) as f64).sqrt())
}

/// Group key → reduced scalar, iterated in key order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AggregateResult {
    values: BTreeMap<GroupKey, f64>,
}

impl AggregateResult {
    pub fn get(&self, key: &GroupKey) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, f64)> + '_ {
        self.values.iter().map(|(k, v)| (k, *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> + '_ {
        self.values.keys()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(GroupKey, f64)> for AggregateResult {
    fn from_iter<I: IntoIterator<Item = (GroupKey, f64)>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}

/// Bucket `records` by `key_fn`, drop non-numeric measures, reduce each bucket.
pub fn aggregate<'a, I, K, M>(records: I, key_fn: K, measure_fn: M, reducer: Reducer) -> AggregateResult
where
    I: IntoIterator<Item = &'a Record>,
    K: Fn(&Record) -> GroupKey,
    M: Fn(&Record) -> Option<f64>,
{
    let mut buckets: BTreeMap<GroupKey, Vec<f64>> = BTreeMap::new();
    let mut dropped = 0usize;
    for r in records {
        match measure_fn(r).filter(|v| v.is_finite()) {
            Some(v) => buckets.entry(key_fn(r)).or_default().push(v),
            None => dropped += 1,
        }
    }
    tracing::debug!(groups = buckets.len(), dropped, ?reducer, "aggregated");

    buckets
        .into_iter()
        .filter_map(|(k, vs)| reducer.reduce(&vs).map(|v| (k, v)))
        .collect()
}

/// A labeled membership test for role bucketing.
pub struct RoleMatcher {
    pub label: String,
    predicate: Box<dyn Fn(&Record) -> bool + Send + Sync>,
}

impl RoleMatcher {
    pub fn new(label: impl Into<String>, predicate: impl Fn(&Record) -> bool + Send + Sync + 'static) -> Self {
        Self { label: label.into(), predicate: Box::new(predicate) }
    }

    pub fn matches(&self, record: &Record) -> bool {
        (self.predicate)(record)
    }
}

impl fmt::Debug for RoleMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleMatcher").field("label", &self.label).finish_non_exhaustive()
    }
}

/// Matches when any hyphen-separated token of `column` (e.g. "PG-SF") equals one of `codes`.
pub fn position_matcher(label: impl Into<String>, column: impl Into<String>, codes: &[&str]) -> RoleMatcher {
    let column = column.into();
    let codes: Vec<String> = codes.iter().map(|c| c.trim().to_uppercase()).collect();
    RoleMatcher::new(label, move |r: &Record| {
        r.text(&column).is_some_and(|pos| {
            pos.split('-')
                .map(|t| t.trim().to_uppercase())
                .any(|t| codes.iter().any(|c| *c == t))
        })
    })
}

/// Ordered role label → matching records. Not a partition: one record may sit in several buckets.
#[derive(Debug, Default)]
pub struct Buckets<'a> {
    entries: Vec<(String, Vec<&'a Record>)>,
}

impl<'a> Buckets<'a> {
    pub fn get(&self, label: &str) -> Option<&[&'a Record]> {
        self.entries.iter().find(|(l, _)| l == label).map(|(_, v)| v.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a Record])> + '_ {
        self.entries.iter().map(|(l, v)| (l.as_str(), v.as_slice()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Classify records into every bucket whose matcher accepts them.
pub fn bucketize<'a, I>(records: I, matchers: &[RoleMatcher]) -> Buckets<'a>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut entries: Vec<(String, Vec<&'a Record>)> =
        matchers.iter().map(|m| (m.label.clone(), Vec::new())).collect();
    for r in records {
        for (m, (_, bucket)) in matchers.iter().zip(entries.iter_mut()) {
            if m.matches(r) {
                bucket.push(r);
            }
        }
    }
    Buckets { entries }
}

/// Turn a two-part (ordinal, label) result into one series per label.
/// Every series covers the union of ordinals; holes become `fallback`.
/// Keys whose first part is not numeric are skipped.
pub fn pivot_series(result: &AggregateResult, mark: Mark, fallback: f64) -> Vec<Series> {
    let mut ordinals: BTreeSet<KeyPart> = BTreeSet::new();
    let mut labels: BTreeSet<KeyPart> = BTreeSet::new();
    for key in result.keys() {
        if let GroupKey::Two(a, b) = key {
            if a.as_ordinal().is_some() {
                ordinals.insert(a.clone());
                labels.insert(b.clone());
            }
        }
    }

    labels
        .into_iter()
        .map(|label| {
            let points = ordinals
                .iter()
                .filter_map(|o| {
                    let x = o.as_ordinal()?;
                    let y = result.get(&GroupKey::Two(o.clone(), label.clone())).unwrap_or(fallback);
                    Some(SeriesPoint::new(x, y))
                })
                .collect();
            Series::new(label.to_string(), mark, points)
        })
        .collect()
}

/// Turn a one-part (ordinal) result into a single series.
pub fn single_series(result: &AggregateResult, label: impl Into<String>, mark: Mark) -> Series {
    let points = result
        .iter()
        .filter_map(|(k, v)| match k {
            GroupKey::One(a) => a.as_ordinal().map(|x| SeriesPoint::new(x, v)),
            GroupKey::Two(..) => None,
        })
        .collect();
    Series::new(label, mark, points)
}

// File: crates/scene-core/src/record.rs
// Summary: Tabular records read from CSV, numeric coercion, and data sources that fetch tables by name.

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{SceneError, SceneResult};

/// One input row. Values stay as read; coercion happens on access.
#[derive(Clone, Debug)]
pub struct Record {
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    pub fn new(headers: Arc<[String]>, values: Vec<String>) -> Self {
        Self { headers, values }
    }

    /// Build a standalone record from (field, value) pairs.
    pub fn from_pairs<K: Into<String>, V: Into<String>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        let (headers, values): (Vec<String>, Vec<String>) =
            pairs.into_iter().map(|(k, v)| (k.into(), v.into())).unzip();
        Self { headers: headers.into(), values }
    }

    /// Raw value of `field`, or `None` if the field is absent from this row.
    pub fn get(&self, field: &str) -> Option<&str> {
        let ix = self.headers.iter().position(|h| h == field)?;
        self.values.get(ix).map(String::as_str)
    }

    /// Trimmed categorical value; empty strings count as absent.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).map(str::trim).filter(|s| !s.is_empty())
    }

    /// Numeric value of `field`. Unparseable, NaN and infinite values are `None`.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.text(field)
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

/// Header row plus every record of one source.
#[derive(Clone, Debug)]
pub struct Table {
    pub name: String,
    headers: Arc<[String]>,
    pub records: Vec<Record>,
}

impl Table {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers: Arc<[String]> = headers.into();
        let records = rows.into_iter().map(|v| Record::new(headers.clone(), v)).collect();
        Self { name: name.into(), headers, records }
    }

    /// Parse CSV text with a header row.
    pub fn from_reader(name: impl Into<String>, reader: impl Read) -> SceneResult<Self> {
        let name = name.into();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| SceneError::csv(&name, e))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for rec in rdr.records() {
            let rec = rec.map_err(|e| SceneError::csv(&name, e))?;
            rows.push(rec.iter().map(str::to_string).collect());
        }
        tracing::debug!(table = %name, columns = headers.len(), rows = rows.len(), "parsed csv");
        Ok(Self::new(name, headers, rows))
    }

    pub fn from_path(path: &Path) -> SceneResult<Self> {
        let file = std::fs::File::open(path).map_err(|e| SceneError::io(path, e))?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_reader(name, std::io::BufReader::new(file))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// Fail loudly if any of `columns` is missing from the header row.
    pub fn require<'a>(&self, columns: impl IntoIterator<Item = &'a str>) -> SceneResult<()> {
        for c in columns {
            if !self.has_column(c) {
                return Err(SceneError::missing_column(c, &self.name));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Where scenes fetch their tables from.
pub trait DataSource {
    fn fetch(&self, name: &str) -> SceneResult<Table>;
}

/// Reads `<root>/<name>` as CSV on every fetch.
#[derive(Clone, Debug)]
pub struct CsvDirSource {
    root: PathBuf,
}

impl CsvDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DataSource for CsvDirSource {
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    fn fetch(&self, name: &str) -> SceneResult<Table> {
        Table::from_path(&self.root.join(name))
    }
}

/// In-memory tables keyed by name.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    tables: HashMap<String, Table>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.insert(table.name.clone(), table);
        self
    }
}

impl DataSource for MemorySource {
    fn fetch(&self, name: &str) -> SceneResult<Table> {
        self.tables.get(name).cloned().ok_or_else(|| {
            SceneError::io(name, std::io::Error::new(std::io::ErrorKind::NotFound, "no such table"))
        })
    }
}

impl<S: DataSource + ?Sized> DataSource for Arc<S> {
    fn fetch(&self, name: &str) -> SceneResult<Table> {
        (**self).fetch(name)
    }
}

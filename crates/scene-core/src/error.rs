// File: crates/scene-core/src/error.rs
// Summary: Typed errors for loading, configuration and scene computation.

use std::path::PathBuf;

pub type SceneResult<T> = Result<T, SceneError>;

#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error in {name}: {source}")]
    Csv {
        name: String,
        #[source]
        source: csv::Error,
    },

    #[error("column '{column}' not found in {source_name}")]
    MissingColumn { column: String, source_name: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("deck json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no data: {0}")]
    Empty(String),
}

impl SceneError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn csv(name: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv { name: name.into(), source }
    }

    pub fn missing_column(column: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self::MissingColumn { column: column.into(), source_name: source_name.into() }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn empty(msg: impl Into<String>) -> Self {
        Self::Empty(msg.into())
    }
}

use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Points at the `item` a failure belongs to.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RecordRef {
    /// 1-based position among the document's items.
    pub ordinal: usize,
    pub key: String,
    pub line: u32,
}

impl RecordRef {
    pub fn new(ordinal: usize, key: impl ToString, line: u32) -> Self {
        Self {
            ordinal,
            key: key.to_string(),
            line,
        }
    }
}

impl Display for RecordRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let key = if self.key.is_empty() { "<no key>" } else { &self.key };
        write!(f, "item #{} ({}, line {})", self.ordinal, key, self.line)
    }
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("{record}: missing {field}")]
    MalformedInput {
        record: RecordRef,
        field: &'static str,
    },

    #[error("{record}: `{field}` is not a recognized date: {value:?}")]
    DateParse {
        record: RecordRef,
        field: &'static str,
        value: String,
    },

    #[error("Invalid export document: {0}")]
    Document(#[from] roxmltree::Error),

    #[error("Cannot write to output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} already exists; wait for the next timestamp or pick another timestampFormat", .path.display())]
    OutputExists { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load the crossing table at startup
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open dataset '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset has no header row")]
    EmptyHeader,
}

/// A facet name that is neither a known slug nor a known column header
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown facet '{0}' (expected one of: line, branch, location, type)")]
pub struct UnknownFacet(pub String);

//! Error taxonomy for the case-record pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal pipeline failures. There is no partial-success mode: any of these
/// aborts the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot read input table {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing expected column `{0}` in input header")]
    MissingCategory(String),

    #[error("malformed input at line {line}, column `{column}`: {reason} (got {value:?})")]
    MalformedInput {
        line: u64,
        column: String,
        value: String,
        reason: String,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("input table has no data rows")]
    EmptyTable,
}

pub type Result<T> = std::result::Result<T, PipelineError>;

impl PipelineError {
    pub(crate) fn malformed(line: u64, column: &str, value: &str, reason: &str) -> Self {
        PipelineError::MalformedInput {
            line,
            column: column.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

use std::path::PathBuf;

use thiserror::Error;

/// Why a single probe (one endpoint, or one sample against it) did not produce a latency.
///
/// These never escape the probe executor: they are rendered into a
/// [`crate::outcome::ProbeOutcome::Failure`] reason.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("resolution failed for {host}: {reason}")]
    Resolution { host: String, reason: String },
    #[error("timeout")]
    Timeout,
    #[error("unreachable: {0}")]
    Unreachable(String),
    #[error("unsupported: {0}")]
    Unsupported(String),
    #[error("socket error: {0}")]
    Socket(#[from] std::io::Error),
}

/// Batch-level failures of the aggregation stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Every endpoint failed, so there is no minimum or maximum to report.
    #[error("no endpoint answered, nothing to classify")]
    EmptyResultSet,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("endpoint catalog is empty")]
    Empty,
    #[error("duplicate endpoint id '{0}'")]
    DuplicateId(String),
    #[error("endpoint '{0}' has an empty address")]
    EmptyAddress(String),
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

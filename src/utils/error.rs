use crate::domain::model::TeamId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    /// Transient connectivity failure; the next scheduled run retries.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Non-success response or a payload we could not make sense of.
    #[error("API error: {message}")]
    Api { message: String },

    /// A fixture referenced a team absent from the reference cache.
    #[error("unresolved team reference: {0}")]
    Reference(TeamId),

    /// Malformed kickoff timestamp.
    #[error("timestamp parse error for {value:?}: {source}")]
    Parse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("invalid value for {field}: {value:?} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl SyncError {
    /// Classify a reqwest failure: timeouts and connect errors are transient
    /// network trouble, everything else counts as an API-level failure.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            SyncError::Network(err)
        } else {
            SyncError::Api {
                message: err.to_string(),
            }
        }
    }

    /// True when the whole run should be retried on the next trigger rather
    /// than treated as a data problem.
    pub fn is_transient(&self) -> bool {
        matches!(self, SyncError::Network(_))
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;

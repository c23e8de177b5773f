use crate::domain::model::Parameter;
use std::time::Duration;
use thiserror::Error;

/// Failures reported by a detection engine.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("timed out after {}ms", .after.as_millis())]
    Timeout { after: Duration },

    #[error("no protocol detected at {address}: {details}")]
    Undetected { address: String, details: String },

    #[error("{0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum GqError {
    #[error("please specify {} {}", .0.article(), .0)]
    MissingParameter(Parameter),

    #[error("unable to process {variable} ({value})")]
    InvalidParameter { variable: &'static str, value: String },

    #[error("{message}")]
    InvalidFlags { message: String },

    #[error("help requested")]
    HelpRequested,

    #[error("failed to query: {0}")]
    Query(#[from] QueryError),

    #[error("failed to package response: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to write response: {0}")]
    Io(#[from] std::io::Error),
}

impl GqError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            GqError::MissingParameter(_)
            | GqError::InvalidParameter { .. }
            | GqError::InvalidFlags { .. }
            | GqError::HelpRequested => 1,
            GqError::Query(_) | GqError::Serialization(_) | GqError::Io(_) => 2,
        }
    }

    /// Configuration errors are followed by the usage text.
    pub fn shows_usage(&self) -> bool {
        self.exit_code() == 1
    }
}

pub type Result<T> = std::result::Result<T, GqError>;

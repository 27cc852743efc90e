//! Error types for publisher operations.
//!
//! Remote failures are surfaced verbatim: the status, code and message the
//! management service returned are kept as-is in [`PublisherError::Azure`].

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for publisher operations
pub type Result<T> = std::result::Result<T, PublisherError>;

/// Main error type for all publisher operations
#[derive(Error, Debug)]
pub enum PublisherError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML decoding errors
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::de::DeError),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Manifest template errors
    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Management certificate could not be loaded
    #[error("Cannot read certificate {}: {reason}", path.display())]
    Certificate {
        /// Certificate file
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// Manifest is missing something the service requires
    #[error("Invalid manifest: {reason}")]
    Manifest {
        /// Reason for the error
        reason: String,
    },

    /// Error response returned by the management or storage service
    #[error("{operation} failed: HTTP {status} {code}: {message}")]
    Azure {
        /// Request that failed
        operation: String,
        /// HTTP status code
        status: u16,
        /// Service error code
        code: String,
        /// Service error message
        message: String,
    },

    /// Asynchronous operation reported failure
    #[error("Operation {operation_id} failed (HTTP {status}) {code}: {message}")]
    OperationFailed {
        /// Value of x-ms-request-id
        operation_id: String,
        /// HTTP status the operation completed with
        status: u16,
        /// Service error code
        code: String,
        /// Service error message
        message: String,
    },

    /// Asynchronous operation did not finish in time
    #[error("Operation {operation_id} did not complete within {} seconds", waited.as_secs())]
    OperationTimeout {
        /// Value of x-ms-request-id
        operation_id: String,
        /// Time spent polling
        waited: Duration,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("argument {argument:?} must be provided")]
    MissingArgument {
        /// Argument name
        argument: String,
    },
}

impl PublisherError {
    /// Builds an [`PublisherError::Azure`] for a response that carried no
    /// decodable error document.
    pub fn unexpected_response(operation: &str, status: u16, body: &str) -> Self {
        PublisherError::Azure {
            operation: operation.to_string(),
            status,
            code: "UnexpectedResponse".to_string(),
            message: body.trim().to_string(),
        }
    }

    /// Check if this error is worth retrying for idempotent requests
    pub fn is_transient(&self) -> bool {
        match self {
            PublisherError::Http(e) => e.is_timeout() || e.is_connect(),
            PublisherError::Azure { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

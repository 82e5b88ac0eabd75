use crate::cve_tracking::domain::Vendor;
use std::fmt;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// A lookup completed but matched no record
    NoRecords = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (connection error, pipeline failure, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::NoRecords => write!(f, "No Records (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised by the record store and the use cases built on it.
///
/// Connection errors are fatal for the process. Codec errors are scoped to a
/// single record. Batch errors abort the enclosing insert without rolling back
/// records that were already committed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to connect to store: {url}\nDetails: {details}\n\n💡 Hint: Check that the server is running and that the --dbpath URL is correct")]
    ConnectionFailed { url: String, details: String },

    #[error("Store connection is closed")]
    ConnectionClosed,

    #[error("Failed to encode {vendor} record {cve_id}\nDetails: {details}")]
    EncodeFailed {
        vendor: Vendor,
        cve_id: String,
        details: String,
    },

    #[error("Failed to decode {vendor} record {cve_id}\nDetails: {details}")]
    DecodeFailed {
        vendor: Vendor,
        cve_id: String,
        details: String,
    },

    /// A pipelined batch failed server-side. `committed` counts the records of the
    /// enclosing insert that were written before the failing batch.
    #[error("Failed to execute pipeline for {label} ({committed} record(s) already committed)\nDetails: {details}")]
    BatchExecFailed {
        label: String,
        committed: usize,
        details: String,
    },

    #[error("Failed to read {key}\nDetails: {details}")]
    ReadFailed { key: String, details: String },

    #[error("Unsupported {vendor} release: {major}\n\n💡 Hint: Supported releases: {supported}")]
    UnsupportedRelease {
        vendor: Vendor,
        major: String,
        supported: String,
    },
}

impl StoreError {
    /// Records how many records were committed before a batch failure.
    /// Other variants pass through unchanged.
    pub fn with_committed(self, count: usize) -> Self {
        match self {
            StoreError::BatchExecFailed { label, details, .. } => StoreError::BatchExecFailed {
                label,
                committed: count,
                details,
            },
            other => other,
        }
    }

    /// Whether the error means the process cannot talk to the store at all
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StoreError::ConnectionFailed { .. } | StoreError::ConnectionClosed
        )
    }
}

use crate::inventory::domain::EntityKind;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish a clean fleet from one
/// with critical issues, and both from outright failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - report produced, no critical issues (or not asked to fail on them)
    Success = 0,
    /// Critical issues were found and `--fail-on-critical` was given
    CriticalIssuesDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (validation, transport, file I/O, etc.)
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
            ExitCode::CriticalIssuesDetected => write!(f, "Critical Issues Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised by inventory stores and the transport client.
///
/// `Validation` and `NotFound` come from the repository contract; the
/// remaining variants only come from the HTTP-backed store.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Validation error on {kind}: {message}")]
    Validation { kind: EntityKind, message: String },

    #[error("{kind} not found: {id}\n\n💡 Hint: The record may already have been deleted")]
    NotFound { kind: EntityKind, id: String },

    #[error("Unauthorized: the auth token was rejected and has been cleared\n\n💡 Hint: Sign in again via {login_route}")]
    Unauthorized { login_route: String },

    #[error("Permission denied: {url}")]
    Forbidden { url: String },

    #[error("Network error, no response received from {url}\nDetails: {details}\n\n💡 Hint: Please check the API base URL and your connection")]
    Network { url: String, details: String },

    #[error("Error setting up request: {details}")]
    RequestSetup { details: String },

    #[error("Request to {url} failed with HTTP status {status}")]
    Http { status: u16, url: String },

    #[error("Failed to decode response from {url}\nDetails: {details}")]
    Decode { url: String, details: String },

    #[error("Invalid seed data: {details}\n\n💡 Hint: Seed records must reference records that appear earlier in the file")]
    Seed { details: String },
}

impl InventoryError {
    pub fn validation(kind: EntityKind, message: impl Into<String>) -> Self {
        InventoryError::Validation {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        InventoryError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, InventoryError::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, InventoryError::Validation { .. })
    }
}

/// Errors from the files around the store: seed files, config files,
/// token files and report output.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("Seed file not found: {path}\n\n💡 Hint: Pass an existing JSON file with --data, or omit it to load the demo fleet")]
    SeedNotFound { path: PathBuf },

    #[error("Failed to parse seed file: {path}\nDetails: {details}\n\n💡 Hint: The file must be a JSON object with projects, releases, components, platforms and component_versions")]
    SeedParse { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    Read { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    Write { path: PathBuf, details: String },
}

/// Result type returned by [`EntityStore`](crate::ports::outbound::EntityStore) operations.
pub type StoreResult<T> = std::result::Result<T, InventoryError>;

//! Shared kernel: error types, result aliases and input-safety helpers.
pub mod error;
pub mod result;
pub mod security;

pub use error::{ExitCode, FileError, InventoryError, StoreResult};
pub use result::Result;

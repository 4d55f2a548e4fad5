use crate::inventory::domain::InventorySnapshot;
use crate::ports::outbound::SeedReader;
use crate::shared::security::validate_regular_file;
use crate::shared::{FileError, Result};
use std::fs;
use std::path::Path;

/// SeedFileReader adapter for loading JSON seed files
///
/// Symlinks, non-regular files and oversized files are refused before
/// anything is read.
pub struct SeedFileReader;

impl SeedFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SeedFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedReader for SeedFileReader {
    fn read_snapshot(&self, path: &Path) -> Result<InventorySnapshot> {
        if !path.exists() {
            return Err(FileError::SeedNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        validate_regular_file(path, "seed file")?;

        let content = fs::read_to_string(path).map_err(|e| FileError::Read {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| {
            FileError::SeedParse {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

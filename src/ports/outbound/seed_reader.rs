use crate::inventory::domain::InventorySnapshot;
use crate::shared::Result;
use std::path::Path;

/// SeedReader port for loading inventory records from a seed file
pub trait SeedReader {
    /// Reads and parses a seed file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist, is a symlink or is not a regular file
    /// - The file exceeds the size limit
    /// - The content is not a valid inventory snapshot
    fn read_snapshot(&self, path: &Path) -> Result<InventorySnapshot>;
}

use fleet_inventory::prelude::*;
use std::path::Path;

/// Mock SeedReader for testing
pub struct MockSeedReader {
    pub snapshot: InventorySnapshot,
    pub should_fail: bool,
}

impl MockSeedReader {
    pub fn new(snapshot: InventorySnapshot) -> Self {
        Self {
            snapshot,
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            snapshot: InventorySnapshot::default(),
            should_fail: true,
        }
    }
}

impl SeedReader for MockSeedReader {
    fn read_snapshot(&self, _path: &Path) -> Result<InventorySnapshot> {
        if self.should_fail {
            anyhow::bail!("Mock seed read failure");
        }
        Ok(self.snapshot.clone())
    }
}

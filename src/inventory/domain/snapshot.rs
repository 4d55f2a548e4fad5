use super::{Component, ComponentVersion, Platform, Project, ReleaseVersion};
use crate::shared::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};

const DEMO_FLEET: &str = include_str!("../../../assets/demo_fleet.json");

/// A complete set of inventory records: a store snapshot, or the
/// contents of a seed file.
///
/// Collections are listed in dependency order: anything a record refers
/// to appears in an earlier collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub releases: Vec<ReleaseVersion>,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub component_versions: Vec<ComponentVersion>,
}

impl InventorySnapshot {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse seed data as JSON")
    }

    /// The built-in demonstration fleet
    pub fn demo() -> Result<Self> {
        Self::from_json(DEMO_FLEET)
    }

    pub fn record_count(&self) -> usize {
        self.projects.len()
            + self.releases.len()
            + self.components.len()
            + self.platforms.len()
            + self.component_versions.len()
    }
}

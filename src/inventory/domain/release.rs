use super::entity::{require_non_empty, Entity, EntityDraft, EntityKind};
use super::platform::normalize_label;
use crate::shared::{InventoryError, StoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Release families tracked as one bundle of sub-system versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseFamily {
    Application,
    Elynx,
    Grx,
    SmartTmr,
}

impl ReleaseFamily {
    pub const ALL: [ReleaseFamily; 4] = [
        ReleaseFamily::Application,
        ReleaseFamily::Elynx,
        ReleaseFamily::Grx,
        ReleaseFamily::SmartTmr,
    ];

    /// The fixed sub-component version keys a release of this family carries
    pub fn component_keys(&self) -> &'static [&'static str] {
        match self {
            ReleaseFamily::Application => &[
                "ecix_version",
                "core_version",
                "tiger_x_version",
                "map_core_version",
            ],
            ReleaseFamily::Elynx => &["radio_version", "firmware_version"],
            ReleaseFamily::Grx => &["software_version", "protocol_version"],
            ReleaseFamily::SmartTmr => &["firmware_version", "software_version"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseFamily::Application => "application",
            ReleaseFamily::Elynx => "elynx",
            ReleaseFamily::Grx => "grx",
            ReleaseFamily::SmartTmr => "smart_tmr",
        }
    }
}

impl fmt::Display for ReleaseFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        ReleaseFamily::ALL
            .into_iter()
            .find(|family| normalize_label(family.as_str()) == wanted)
            .ok_or_else(|| format!("Invalid release family: {}", s))
    }
}

/// A release unit: one version number over a family's fixed set of
/// sub-component versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseVersion {
    pub id: String,
    pub family: ReleaseFamily,
    pub version_number: String,
    pub components: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
}

impl ReleaseVersion {
    pub fn component(&self, key: &str) -> Option<&str> {
        self.components.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseVersionDraft {
    pub family: ReleaseFamily,
    pub version_number: String,
    #[serde(default)]
    pub components: BTreeMap<String, String>,
}

impl ReleaseVersionDraft {
    pub fn new(family: ReleaseFamily, version_number: impl Into<String>) -> Self {
        Self {
            family,
            version_number: version_number.into(),
            components: BTreeMap::new(),
        }
    }

    pub fn with_component(mut self, key: impl Into<String>, version: impl Into<String>) -> Self {
        self.components.insert(key.into(), version.into());
        self
    }
}

impl EntityDraft for ReleaseVersionDraft {
    type Record = ReleaseVersion;
}

impl Entity for ReleaseVersion {
    type Draft = ReleaseVersionDraft;

    const KIND: EntityKind = EntityKind::ReleaseVersion;

    fn id(&self) -> &str {
        &self.id
    }

    fn stamp(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: String, draft: ReleaseVersionDraft, stamp: DateTime<Utc>) -> Self {
        Self {
            id,
            family: draft.family,
            version_number: draft.version_number,
            components: draft.components,
            created_at: stamp,
        }
    }

    fn to_draft(&self) -> ReleaseVersionDraft {
        ReleaseVersionDraft {
            family: self.family,
            version_number: self.version_number.clone(),
            components: self.components.clone(),
        }
    }

    fn validate_draft(draft: &ReleaseVersionDraft) -> StoreResult<()> {
        require_non_empty(
            EntityKind::ReleaseVersion,
            "version_number",
            &draft.version_number,
        )?;

        let expected = draft.family.component_keys();

        let missing: Vec<&str> = expected
            .iter()
            .copied()
            .filter(|key| !draft.components.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(InventoryError::validation(
                EntityKind::ReleaseVersion,
                format!(
                    "{} release is missing component versions: {}",
                    draft.family,
                    missing.join(", ")
                ),
            ));
        }

        let unexpected: Vec<&str> = draft
            .components
            .keys()
            .map(String::as_str)
            .filter(|key| !expected.contains(key))
            .collect();
        if !unexpected.is_empty() {
            return Err(InventoryError::validation(
                EntityKind::ReleaseVersion,
                format!(
                    "{} release does not track: {}",
                    draft.family,
                    unexpected.join(", ")
                ),
            ));
        }

        for (key, value) in &draft.components {
            require_non_empty(EntityKind::ReleaseVersion, key, value)?;
        }

        Ok(())
    }
}

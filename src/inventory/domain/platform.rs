use super::entity::{require_non_empty, Entity, EntityDraft, EntityKind, Reference};
use super::release::ReleaseFamily;
use crate::shared::{InventoryError, StoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum URN length accepted on write
const MAX_URN_LENGTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlatformType {
    #[serde(rename = "HQ Server")]
    HqServer,
    #[serde(rename = "Mounted Station")]
    MountedStation,
}

impl PlatformType {
    pub const ALL: [PlatformType; 2] = [PlatformType::HqServer, PlatformType::MountedStation];

    pub fn label(&self) -> &'static str {
        match self {
            PlatformType::HqServer => "HQ Server",
            PlatformType::MountedStation => "Mounted Station",
        }
    }
}

impl fmt::Display for PlatformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlatformType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "hqserver" => Ok(PlatformType::HqServer),
            "mountedstation" => Ok(PlatformType::MountedStation),
            _ => Err(format!(
                "Invalid platform type: {}. Expected 'HQ Server' or 'Mounted Station'",
                s
            )),
        }
    }
}

/// Lowercases and strips spaces, hyphens and underscores so that
/// "HQ Server", "hq-server" and "hq_server" compare equal.
pub(crate) fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// A deployed unit of hardware/software tracked by the inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: String,
    pub name: String,
    /// Operator-assigned code. Expected to be unique, not enforced.
    pub urn: String,
    #[serde(rename = "type")]
    pub platform_type: PlatformType,
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_version_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformDraft {
    pub name: String,
    pub urn: String,
    #[serde(rename = "type")]
    pub platform_type: PlatformType,
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_version_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
}

impl PlatformDraft {
    pub fn new(
        name: impl Into<String>,
        urn: impl Into<String>,
        platform_type: PlatformType,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            urn: urn.into(),
            platform_type,
            project_id: project_id.into(),
            application_version_id: None,
            component_id: None,
        }
    }

    pub fn with_application_version(mut self, release_id: impl Into<String>) -> Self {
        self.application_version_id = Some(release_id.into());
        self
    }

    pub fn with_component(mut self, component_id: impl Into<String>) -> Self {
        self.component_id = Some(component_id.into());
        self
    }
}

fn validate_urn(urn: &str) -> StoreResult<()> {
    require_non_empty(EntityKind::Platform, "urn", urn)?;

    if urn.len() > MAX_URN_LENGTH {
        return Err(InventoryError::validation(
            EntityKind::Platform,
            format!(
                "urn is too long ({} chars). Maximum allowed: {} chars",
                urn.len(),
                MAX_URN_LENGTH
            ),
        ));
    }

    if !urn.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(InventoryError::validation(
            EntityKind::Platform,
            format!(
                "urn '{}' contains invalid characters. Only ASCII letters, digits and hyphens are allowed",
                urn
            ),
        ));
    }

    Ok(())
}

impl EntityDraft for PlatformDraft {
    type Record = Platform;
}

impl Entity for Platform {
    type Draft = PlatformDraft;

    const KIND: EntityKind = EntityKind::Platform;

    fn id(&self) -> &str {
        &self.id
    }

    fn stamp(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: String, draft: PlatformDraft, stamp: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            urn: draft.urn,
            platform_type: draft.platform_type,
            project_id: draft.project_id,
            application_version_id: draft.application_version_id,
            component_id: draft.component_id,
            created_at: stamp,
        }
    }

    fn to_draft(&self) -> PlatformDraft {
        PlatformDraft {
            name: self.name.clone(),
            urn: self.urn.clone(),
            platform_type: self.platform_type,
            project_id: self.project_id.clone(),
            application_version_id: self.application_version_id.clone(),
            component_id: self.component_id.clone(),
        }
    }

    fn validate_draft(draft: &PlatformDraft) -> StoreResult<()> {
        require_non_empty(EntityKind::Platform, "name", &draft.name)?;
        validate_urn(&draft.urn)?;
        require_non_empty(EntityKind::Platform, "project_id", &draft.project_id)
    }

    fn references(draft: &PlatformDraft) -> Vec<Reference> {
        let mut references = vec![Reference::new(
            "project_id",
            EntityKind::Project,
            draft.project_id.clone(),
        )];
        if let Some(release_id) = &draft.application_version_id {
            references.push(Reference::release(
                "application_version_id",
                ReleaseFamily::Application,
                release_id.clone(),
            ));
        }
        if let Some(component_id) = &draft.component_id {
            references.push(Reference::new(
                "component_id",
                EntityKind::Component,
                component_id.clone(),
            ));
        }
        references
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_type_serde_uses_labels() {
        let json = serde_json::to_string(&PlatformType::MountedStation).unwrap();
        assert_eq!(json, "\"Mounted Station\"");
        let parsed: PlatformType = serde_json::from_str("\"HQ Server\"").unwrap();
        assert_eq!(parsed, PlatformType::HqServer);
    }

    #[test]
    fn test_platform_type_from_str_is_lenient() {
        assert_eq!("hq-server".parse::<PlatformType>().unwrap(), PlatformType::HqServer);
        assert_eq!(
            "Mounted Station".parse::<PlatformType>().unwrap(),
            PlatformType::MountedStation
        );
        assert!("satellite".parse::<PlatformType>().is_err());
    }

    #[test]
    fn test_platform_serializes_type_field() {
        let draft = PlatformDraft::new("Alpha", "1234567", PlatformType::HqServer, "1");
        let platform = Platform::from_draft("9".to_string(), draft, Utc::now());
        let value = serde_json::to_value(&platform).unwrap();
        assert_eq!(value["type"], "HQ Server");
        assert!(value.get("component_id").is_none());
    }

    #[test]
    fn test_validate_urn_rules() {
        assert!(validate_urn("1111111").is_ok());
        assert!(validate_urn("HQ-0042").is_ok());
        assert!(validate_urn("").is_err());
        assert!(validate_urn("12 34").is_err());
        assert!(validate_urn(&"9".repeat(MAX_URN_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_references_include_optional_keys() {
        let draft = PlatformDraft::new("Alpha", "1234567", PlatformType::HqServer, "1")
            .with_application_version("2")
            .with_component("3");
        let references = Platform::references(&draft);
        assert_eq!(references.len(), 3);
        assert_eq!(references[0].kind, EntityKind::Project);
        assert_eq!(references[1].family, Some(ReleaseFamily::Application));
        assert_eq!(references[2].kind, EntityKind::Component);
    }

    #[test]
    fn test_references_only_project_when_optional_absent() {
        let draft = PlatformDraft::new("Alpha", "1234567", PlatformType::HqServer, "1");
        assert_eq!(Platform::references(&draft).len(), 1);
    }
}

use super::entity::{require_non_empty, Entity, EntityDraft, EntityKind, Reference};
use super::platform::normalize_label;
use crate::shared::{InventoryError, StoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    Testing,
    Deployed,
    RollbackNeeded,
    Deprecated,
}

impl DeploymentStatus {
    pub const ALL: [DeploymentStatus; 4] = [
        DeploymentStatus::Testing,
        DeploymentStatus::Deployed,
        DeploymentStatus::RollbackNeeded,
        DeploymentStatus::Deprecated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentStatus::Testing => "testing",
            DeploymentStatus::Deployed => "deployed",
            DeploymentStatus::RollbackNeeded => "rollback_needed",
            DeploymentStatus::Deprecated => "deprecated",
        }
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        DeploymentStatus::ALL
            .into_iter()
            .find(|status| normalize_label(status.as_str()) == wanted)
            .ok_or_else(|| {
                format!(
                    "Invalid deployment status: {}. Expected testing, deployed, rollback_needed or deprecated",
                    s
                )
            })
    }
}

/// Which part of a platform a deployment record versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionedComponentKind {
    Product,
    App,
    Radio,
    Framework,
    Map,
}

impl fmt::Display for VersionedComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VersionedComponentKind::Product => "product",
            VersionedComponentKind::App => "app",
            VersionedComponentKind::Radio => "radio",
            VersionedComponentKind::Framework => "framework",
            VersionedComponentKind::Map => "map",
        };
        f.write_str(label)
    }
}

/// Deployment record of a component version on a platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentVersion {
    pub id: String,
    pub platform_id: String,
    pub component_type: VersionedComponentKind,
    pub version_number: String,
    pub status: DeploymentStatus,
    pub deployment_date: DateTime<Utc>,
    #[serde(default)]
    pub known_issues: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_notes_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentVersionDraft {
    pub platform_id: String,
    pub component_type: VersionedComponentKind,
    pub version_number: String,
    pub status: DeploymentStatus,
    #[serde(default)]
    pub known_issues: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_notes_url: Option<String>,
}

impl ComponentVersionDraft {
    pub fn new(
        platform_id: impl Into<String>,
        component_type: VersionedComponentKind,
        version_number: impl Into<String>,
        status: DeploymentStatus,
    ) -> Self {
        Self {
            platform_id: platform_id.into(),
            component_type,
            version_number: version_number.into(),
            status,
            known_issues: Vec::new(),
            release_notes_url: None,
        }
    }

    /// Replaces the whole known-issues list
    pub fn with_known_issues(mut self, issues: Vec<String>) -> Self {
        self.known_issues = issues;
        self
    }

    pub fn with_release_notes(mut self, url: impl Into<String>) -> Self {
        self.release_notes_url = Some(url.into());
        self
    }
}

impl EntityDraft for ComponentVersionDraft {
    type Record = ComponentVersion;
}

impl Entity for ComponentVersion {
    type Draft = ComponentVersionDraft;

    const KIND: EntityKind = EntityKind::ComponentVersion;

    fn id(&self) -> &str {
        &self.id
    }

    fn stamp(&self) -> DateTime<Utc> {
        self.deployment_date
    }

    fn from_draft(id: String, draft: ComponentVersionDraft, stamp: DateTime<Utc>) -> Self {
        Self {
            id,
            platform_id: draft.platform_id,
            component_type: draft.component_type,
            version_number: draft.version_number,
            status: draft.status,
            deployment_date: stamp,
            known_issues: draft.known_issues,
            release_notes_url: draft.release_notes_url,
        }
    }

    fn to_draft(&self) -> ComponentVersionDraft {
        ComponentVersionDraft {
            platform_id: self.platform_id.clone(),
            component_type: self.component_type,
            version_number: self.version_number.clone(),
            status: self.status,
            known_issues: self.known_issues.clone(),
            release_notes_url: self.release_notes_url.clone(),
        }
    }

    fn validate_draft(draft: &ComponentVersionDraft) -> StoreResult<()> {
        require_non_empty(EntityKind::ComponentVersion, "platform_id", &draft.platform_id)?;
        require_non_empty(
            EntityKind::ComponentVersion,
            "version_number",
            &draft.version_number,
        )?;

        if let Some(index) = draft.known_issues.iter().position(|i| i.trim().is_empty()) {
            return Err(InventoryError::validation(
                EntityKind::ComponentVersion,
                format!("known_issues[{}] must not be empty", index),
            ));
        }

        if let Some(url) = &draft.release_notes_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(InventoryError::validation(
                    EntityKind::ComponentVersion,
                    format!("release_notes_url '{}' must be an http(s) URL", url),
                ));
            }
        }

        Ok(())
    }

    fn references(draft: &ComponentVersionDraft) -> Vec<Reference> {
        vec![Reference::new(
            "platform_id",
            EntityKind::Platform,
            draft.platform_id.clone(),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ComponentVersionDraft {
        ComponentVersionDraft::new(
            "1",
            VersionedComponentKind::Radio,
            "2.0.0",
            DeploymentStatus::RollbackNeeded,
        )
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&DeploymentStatus::RollbackNeeded).unwrap();
        assert_eq!(json, "\"rollback_needed\"");
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(
            "rollback-needed".parse::<DeploymentStatus>().unwrap(),
            DeploymentStatus::RollbackNeeded
        );
        assert_eq!("DEPLOYED".parse::<DeploymentStatus>().unwrap(), DeploymentStatus::Deployed);
        assert!("shipped".parse::<DeploymentStatus>().is_err());
    }

    #[test]
    fn test_known_issues_default_to_empty_when_absent() {
        let json = r#"{
            "id": "2",
            "platform_id": "1",
            "component_type": "framework",
            "version_number": "1.2.3",
            "status": "deployed",
            "deployment_date": "2024-01-05T00:00:00Z"
        }"#;
        let version: ComponentVersion = serde_json::from_str(json).unwrap();
        assert!(version.known_issues.is_empty());
        assert!(version.release_notes_url.is_none());
    }

    #[test]
    fn test_validate_rejects_blank_issue() {
        let bad = draft().with_known_issues(vec![
            "Battery drain issue".to_string(),
            " ".to_string(),
        ]);
        let error = ComponentVersion::validate_draft(&bad).unwrap_err();
        assert!(error.to_string().contains("known_issues[1]"));
    }

    #[test]
    fn test_validate_release_notes_url() {
        let ok = draft().with_release_notes("https://example.com/release-notes/v2.0.0");
        assert!(ComponentVersion::validate_draft(&ok).is_ok());

        let bad = draft().with_release_notes("ftp://example.com/notes");
        assert!(ComponentVersion::validate_draft(&bad).is_err());
    }

    #[test]
    fn test_stamp_is_deployment_date() {
        let when = "2024-01-03T08:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let version = ComponentVersion::from_draft("5".to_string(), draft(), when);
        assert_eq!(version.stamp(), when);
        assert_eq!(ComponentVersion::references(&version.to_draft())[0].id, "1");
    }
}

use super::entity::{require_non_empty, Entity, EntityDraft, EntityKind};
use crate::shared::StoreResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Pending,
    Completed,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::Active => f.write_str("active"),
            ProjectStatus::Pending => f.write_str("pending"),
            ProjectStatus::Completed => f.write_str("completed"),
        }
    }
}

/// A program that groups deployed platforms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    /// Free-text program version
    pub version: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: ProjectStatus,
    #[serde(default)]
    pub version: String,
}

impl ProjectDraft {
    pub fn new(name: impl Into<String>, status: ProjectStatus) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            status,
            version: "1.0.0".to_string(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

impl EntityDraft for ProjectDraft {
    type Record = Project;
}

impl Entity for Project {
    type Draft = ProjectDraft;

    const KIND: EntityKind = EntityKind::Project;

    fn id(&self) -> &str {
        &self.id
    }

    fn stamp(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: String, draft: ProjectDraft, stamp: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            status: draft.status,
            version: draft.version,
            created_at: stamp,
        }
    }

    fn to_draft(&self) -> ProjectDraft {
        ProjectDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status,
            version: self.version.clone(),
        }
    }

    fn validate_draft(draft: &ProjectDraft) -> StoreResult<()> {
        require_non_empty(EntityKind::Project, "name", &draft.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&ProjectStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
        let parsed: ProjectStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, ProjectStatus::Pending);
    }

    #[test]
    fn test_draft_defaults_version() {
        let draft = ProjectDraft::new("FDC", ProjectStatus::Pending);
        assert_eq!(draft.version, "1.0.0");
        assert!(draft.description.is_empty());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let draft = ProjectDraft::new(" ", ProjectStatus::Active);
        assert!(Project::validate_draft(&draft).is_err());
    }

    #[test]
    fn test_draft_round_trip_keeps_fields() {
        let draft = ProjectDraft::new("NORA", ProjectStatus::Active)
            .with_description("Network Operations and Resource Allocation")
            .with_version("1.2.3");
        let project = Project::from_draft("4".to_string(), draft.clone(), Utc::now());
        assert_eq!(project.to_draft(), draft);
        assert_eq!(project.id(), "4");
    }
}

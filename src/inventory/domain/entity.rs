use super::release::ReleaseFamily;
use crate::shared::{InventoryError, StoreResult};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The collections held by an inventory store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Project,
    Platform,
    Component,
    ComponentVersion,
    ReleaseVersion,
}

impl EntityKind {
    /// REST collection path segment for this kind
    pub fn collection_path(&self) -> &'static str {
        match self {
            EntityKind::Project => "projects",
            EntityKind::Platform => "platforms",
            EntityKind::Component => "components",
            EntityKind::ComponentVersion => "component-versions",
            EntityKind::ReleaseVersion => "releases",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Project => "Project",
            EntityKind::Platform => "Platform",
            EntityKind::Component => "Component",
            EntityKind::ComponentVersion => "ComponentVersion",
            EntityKind::ReleaseVersion => "ReleaseVersion",
        };
        f.write_str(label)
    }
}

/// A foreign key carried by a draft, checked by the store before a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Field name on the referencing record, used in error messages
    pub field: &'static str,
    /// Collection the key points into
    pub kind: EntityKind,
    pub id: String,
    /// Required family when the target is a release
    pub family: Option<ReleaseFamily>,
}

impl Reference {
    pub fn new(field: &'static str, kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            id: id.into(),
            family: None,
        }
    }

    pub fn release(field: &'static str, family: ReleaseFamily, id: impl Into<String>) -> Self {
        Self {
            field,
            kind: EntityKind::ReleaseVersion,
            id: id.into(),
            family: Some(family),
        }
    }

    /// Error reported when the referenced record does not exist
    pub fn dangling(&self, owner: EntityKind) -> InventoryError {
        InventoryError::validation(
            owner,
            format!(
                "{} '{}' does not reference an existing {}",
                self.field, self.id, self.kind
            ),
        )
    }
}

/// A record type held by an inventory store.
///
/// Each entity has a draft: the record without its identifier and
/// creation stamp. Stores assign both on create and keep both on update.
pub trait Entity: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Draft: EntityDraft<Record = Self>;

    const KIND: EntityKind;

    fn id(&self) -> &str;

    /// Creation stamp (`created_at`, or `deployment_date` for deployments)
    fn stamp(&self) -> DateTime<Utc>;

    fn from_draft(id: String, draft: Self::Draft, stamp: DateTime<Utc>) -> Self;

    fn to_draft(&self) -> Self::Draft;

    /// Field-level checks that need no other collection
    fn validate_draft(draft: &Self::Draft) -> StoreResult<()>;

    /// Foreign keys the draft carries
    fn references(_draft: &Self::Draft) -> Vec<Reference> {
        Vec::new()
    }
}

/// Maps a draft back to the record it creates, so store calls can be
/// written `store.insert(draft)` without naming the record type.
pub trait EntityDraft: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync {
    type Record: Entity<Draft = Self>;
}

pub(crate) fn require_non_empty(kind: EntityKind, field: &str, value: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(InventoryError::validation(
            kind,
            format!("{} must not be empty", field),
        ));
    }
    Ok(())
}

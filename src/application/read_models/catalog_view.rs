//! Views over the component catalog, deployment records and releases.

use crate::inventory::domain::{DeploymentStatus, ReleaseFamily};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

/// View representation of a catalogued component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentView {
    pub id: String,
    pub name: String,
    pub component_type: String,
    pub description: String,
    pub ip: String,
    pub version: String,
    pub hardware: String,
    /// Platforms associated with this component
    pub platforms_count: usize,
}

/// View representation of a deployment record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionView {
    pub id: String,
    pub platform_id: String,
    /// Platform name, "Unknown Platform" when the platform is gone
    pub platform: String,
    pub component_type: String,
    pub version_number: String,
    pub status: DeploymentStatus,
    pub deployment_date: DateTime<Utc>,
    pub known_issues: Vec<String>,
    pub release_notes_url: Option<String>,
}

/// View representation of a release bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseView {
    pub id: String,
    pub family: ReleaseFamily,
    pub version_number: String,
    /// Sub-component versions in the family's key order
    pub components: IndexMap<String, String>,
    /// Platforms whose application release is this one
    pub platforms_count: usize,
    pub created_at: DateTime<Utc>,
}

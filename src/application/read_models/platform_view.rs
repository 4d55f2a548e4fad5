//! Platform-centric views: the platform list, its groupings, and the
//! duplicate URN report.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// View representation of a platform with its foreign keys resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformView {
    pub id: String,
    pub name: String,
    pub urn: String,
    /// Display label, e.g. "HQ Server"
    pub platform_type: String,
    /// Project name, "Unknown Project" when the project is gone
    pub project: String,
    /// Application release version number, or a fallback label
    pub release: String,
    /// Associated component name, when there is one
    pub component: Option<String>,
    /// True when another platform holds the same URN
    pub duplicate_urn: bool,
    pub created_at: DateTime<Utc>,
}

/// Platforms sharing one group label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformGroupView {
    pub label: String,
    pub platforms: Vec<PlatformView>,
}

/// A URN held by two or more platforms
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateUrnView {
    pub urn: String,
    pub platforms: Vec<PlatformView>,
}

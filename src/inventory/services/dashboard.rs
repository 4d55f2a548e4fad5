use super::aggregation::{AggregationService, GroupingContext, UNKNOWN_PROJECT};
use crate::inventory::domain::{DeploymentStatus, InventorySnapshot, Platform, PlatformType};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Default window for "recent deployments"
pub const DEFAULT_RECENT_DAYS: u32 = 7;

/// Conditions the dashboard flags for operator attention.
///
/// None of these are rejected at write time; they are detected after the fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CriticalIssue {
    /// Two or more platforms share a URN
    DuplicateUrn {
        urn: String,
        platform_ids: Vec<String>,
    },
    /// A deployment is marked for rollback
    RollbackNeeded {
        version_id: String,
        platform_id: String,
        version_number: String,
    },
    /// A platform's project has been deleted
    OrphanedPlatform {
        platform_id: String,
        project_id: String,
    },
}

impl CriticalIssue {
    /// Stable machine name, matching the serialized `kind` tag
    pub fn kind(&self) -> &'static str {
        match self {
            CriticalIssue::DuplicateUrn { .. } => "duplicate_urn",
            CriticalIssue::RollbackNeeded { .. } => "rollback_needed",
            CriticalIssue::OrphanedPlatform { .. } => "orphaned_platform",
        }
    }

    pub fn describe(&self) -> String {
        match self {
            CriticalIssue::DuplicateUrn { urn, platform_ids } => format!(
                "URN {} is shared by platforms {}",
                urn,
                platform_ids.join(", ")
            ),
            CriticalIssue::RollbackNeeded {
                version_id,
                platform_id,
                version_number,
            } => format!(
                "Version {} (record {}) on platform {} needs rollback",
                version_number, version_id, platform_id
            ),
            CriticalIssue::OrphanedPlatform {
                platform_id,
                project_id,
            } => format!(
                "Platform {} references missing project {}",
                platform_id, project_id
            ),
        }
    }
}

/// A URN shared with existing platforms. Reported alongside a write,
/// never raised as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateWarning {
    pub urn: String,
    /// Other platforms already holding the URN, in store order
    pub existing_platform_ids: Vec<String>,
}

impl DuplicateWarning {
    /// Checks `urn` against `platforms`, ignoring the platform `exclude_id`
    /// (the record being written)
    pub fn check(platforms: &[Platform], urn: &str, exclude_id: Option<&str>) -> Option<Self> {
        let existing: Vec<String> = platforms
            .iter()
            .filter(|p| p.urn == urn && Some(p.id.as_str()) != exclude_id)
            .map(|p| p.id.clone())
            .collect();
        (!existing.is_empty()).then(|| Self {
            urn: urn.to_string(),
            existing_platform_ids: existing,
        })
    }
}

impl std::fmt::Display for DuplicateWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "URN {} is already used by platform(s) {}",
            self.urn,
            self.existing_platform_ids.join(", ")
        )
    }
}

/// Headline numbers for the dashboard summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_platforms: usize,
    /// Deployment records with status `deployed`
    pub active_deployments: usize,
    pub recent_deployments: usize,
    pub recent_days: u32,
    pub status_counts: BTreeMap<DeploymentStatus, usize>,
    pub platforms_by_type: BTreeMap<PlatformType, usize>,
    /// Keyed by project name, "Unknown Project" for orphans. A name held
    /// by more than one project is suffixed with the project id, as in
    /// "FDC (7)", so each project keeps its own count.
    pub platforms_by_project: BTreeMap<String, usize>,
    pub critical_issues: Vec<CriticalIssue>,
}

/// DashboardCalculator derives the summary statistics from a snapshot
pub struct DashboardCalculator;

impl DashboardCalculator {
    pub fn compute(
        snapshot: &InventorySnapshot,
        now: DateTime<Utc>,
        recent_days: u32,
    ) -> DashboardStats {
        let status_counts = AggregationService::count_by_status(&snapshot.component_versions);
        let active_deployments = status_counts
            .get(&DeploymentStatus::Deployed)
            .copied()
            .unwrap_or(0);

        let recent_deployments = AggregationService::recent_within_days(
            &snapshot.component_versions,
            |v| v.deployment_date,
            now,
            recent_days,
        )
        .len();

        let context = GroupingContext::new(&snapshot.projects, &snapshot.releases);
        let shared_names =
            AggregationService::find_duplicate_keys(&snapshot.projects, |p| p.name.clone());
        let platforms_by_project = AggregationService::count_by_key(&snapshot.platforms, |p| {
            match context.project(&p.project_id) {
                Some(project) if shared_names.contains(&project.name) => {
                    format!("{} ({})", project.name, project.id)
                }
                Some(project) => project.name.clone(),
                None => UNKNOWN_PROJECT.to_string(),
            }
        });

        DashboardStats {
            total_platforms: snapshot.platforms.len(),
            active_deployments,
            recent_deployments,
            recent_days,
            status_counts,
            platforms_by_type: AggregationService::count_by_key(&snapshot.platforms, |p| {
                p.platform_type
            }),
            platforms_by_project,
            critical_issues: Self::critical_issues(snapshot, &context),
        }
    }

    /// Duplicate URNs first, then rollbacks, then orphans
    pub fn critical_issues(
        snapshot: &InventorySnapshot,
        context: &GroupingContext<'_>,
    ) -> Vec<CriticalIssue> {
        let mut issues: Vec<CriticalIssue> = Self::duplicate_urns(snapshot)
            .into_iter()
            .map(|(urn, platform_ids)| CriticalIssue::DuplicateUrn { urn, platform_ids })
            .collect();

        issues.extend(
            snapshot
                .component_versions
                .iter()
                .filter(|v| v.status == DeploymentStatus::RollbackNeeded)
                .map(|v| CriticalIssue::RollbackNeeded {
                    version_id: v.id.clone(),
                    platform_id: v.platform_id.clone(),
                    version_number: v.version_number.clone(),
                }),
        );

        issues.extend(
            snapshot
                .platforms
                .iter()
                .filter(|p| context.project(&p.project_id).is_none())
                .map(|p| CriticalIssue::OrphanedPlatform {
                    platform_id: p.id.clone(),
                    project_id: p.project_id.clone(),
                }),
        );

        issues
    }

    /// Each duplicated URN with the ids of the platforms holding it,
    /// ordered by URN. Platform ids keep store order.
    pub fn duplicate_urns(snapshot: &InventorySnapshot) -> Vec<(String, Vec<String>)> {
        let mut holders: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for platform in &snapshot.platforms {
            holders
                .entry(platform.urn.as_str())
                .or_default()
                .push(platform.id.clone());
        }
        holders
            .into_iter()
            .filter(|(_, ids)| ids.len() >= 2)
            .map(|(urn, ids)| (urn.to_string(), ids))
            .collect()
    }
}

//! Builder for constructing report views from a store snapshot
//!
//! Resolves foreign keys to display labels once, so the formatters only
//! deal with strings and counts.

use super::catalog_view::{ComponentView, ReleaseView, VersionView};
use super::dashboard_view::{CountView, CriticalIssueView, DashboardView};
use super::platform_view::{DuplicateUrnView, PlatformGroupView, PlatformView};
use crate::inventory::domain::{
    Component, ComponentVersion, InventorySnapshot, Platform, ReleaseFamily,
};
use crate::inventory::services::{
    AggregationService, DashboardCalculator, DashboardStats, GroupingContext, PlatformGrouping,
    Selector,
};
use chrono::NaiveDate;
use indexmap::IndexMap;
use std::collections::{BTreeSet, HashMap};

pub const ALL_PLATFORMS: &str = "All Platforms";
pub const UNKNOWN_PLATFORM: &str = "Unknown Platform";
pub const UNKNOWN_COMPONENT: &str = "Unknown Component";

/// Builder for the report views
///
/// Holds the lookup tables for one snapshot; build one per report.
pub struct InventoryReportBuilder<'a> {
    snapshot: &'a InventorySnapshot,
    context: GroupingContext<'a>,
    components: HashMap<&'a str, &'a Component>,
    platforms: HashMap<&'a str, &'a Platform>,
    duplicate_urns: BTreeSet<String>,
}

impl<'a> InventoryReportBuilder<'a> {
    pub fn new(snapshot: &'a InventorySnapshot) -> Self {
        Self {
            snapshot,
            context: GroupingContext::new(&snapshot.projects, &snapshot.releases),
            components: snapshot
                .components
                .iter()
                .map(|c| (c.id.as_str(), c))
                .collect(),
            platforms: snapshot
                .platforms
                .iter()
                .map(|p| (p.id.as_str(), p))
                .collect(),
            duplicate_urns: AggregationService::find_duplicate_keys(&snapshot.platforms, |p| {
                p.urn.clone()
            }),
        }
    }

    /// Converts dashboard statistics to the summary view
    pub fn summary(stats: &DashboardStats, as_of: NaiveDate) -> DashboardView {
        DashboardView {
            as_of,
            recent_days: stats.recent_days,
            total_platforms: stats.total_platforms,
            active_deployments: stats.active_deployments,
            recent_deployments: stats.recent_deployments,
            status_counts: stats
                .status_counts
                .iter()
                .map(|(status, count)| CountView::new(status.as_str(), *count))
                .collect(),
            platforms_by_type: stats
                .platforms_by_type
                .iter()
                .map(|(platform_type, count)| CountView::new(platform_type.label(), *count))
                .collect(),
            platforms_by_project: stats
                .platforms_by_project
                .iter()
                .map(|(project, count)| CountView::new(project.as_str(), *count))
                .collect(),
            critical_issues: stats
                .critical_issues
                .iter()
                .map(|issue| CriticalIssueView {
                    kind: issue.kind().to_string(),
                    description: issue.describe(),
                })
                .collect(),
        }
    }

    /// Groups the given platforms, or returns them as one "All Platforms"
    /// group when no grouping is requested. Empty input yields no groups.
    pub fn platforms(
        &self,
        platforms: &[Platform],
        grouping: Option<PlatformGrouping>,
    ) -> Vec<PlatformGroupView> {
        if platforms.is_empty() {
            return Vec::new();
        }

        match grouping {
            None => vec![PlatformGroupView {
                label: ALL_PLATFORMS.to_string(),
                platforms: platforms.iter().map(|p| self.platform_view(p)).collect(),
            }],
            Some(grouping) => {
                AggregationService::group_platforms(platforms, grouping, &self.context)
                    .into_iter()
                    .map(|(label, members)| PlatformGroupView {
                        label,
                        platforms: members.iter().map(|p| self.platform_view(p)).collect(),
                    })
                    .collect()
            }
        }
    }

    pub fn components(&self, components: &[Component]) -> Vec<ComponentView> {
        let usage = AggregationService::count_by_key(&self.snapshot.platforms, |p| {
            p.component_id.clone()
        });

        components
            .iter()
            .map(|c| ComponentView {
                id: c.id.clone(),
                name: c.name.clone(),
                component_type: c.component_type.label().to_string(),
                description: c.description.clone(),
                ip: c.ip.clone(),
                version: c.version.clone(),
                hardware: c.hardware.clone(),
                platforms_count: usage.get(&Some(c.id.clone())).copied().unwrap_or(0),
            })
            .collect()
    }

    pub fn versions(&self, versions: &[ComponentVersion]) -> Vec<VersionView> {
        versions
            .iter()
            .map(|v| VersionView {
                id: v.id.clone(),
                platform_id: v.platform_id.clone(),
                platform: self
                    .platforms
                    .get(v.platform_id.as_str())
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| UNKNOWN_PLATFORM.to_string()),
                component_type: v.component_type.to_string(),
                version_number: v.version_number.clone(),
                status: v.status,
                deployment_date: v.deployment_date,
                known_issues: v.known_issues.clone(),
                release_notes_url: v.release_notes_url.clone(),
            })
            .collect()
    }

    /// Every duplicated URN, ordered by URN, with its platforms in store order
    pub fn duplicates(&self) -> Vec<DuplicateUrnView> {
        DashboardCalculator::duplicate_urns(self.snapshot)
            .into_iter()
            .map(|(urn, ids)| DuplicateUrnView {
                urn,
                platforms: ids
                    .iter()
                    .filter_map(|id| self.platforms.get(id.as_str()))
                    .map(|p| self.platform_view(p))
                    .collect(),
            })
            .collect()
    }

    /// Releases of the selected family, with their derived platform counts
    pub fn releases(&self, family: &Selector<ReleaseFamily>) -> Vec<ReleaseView> {
        let usage = AggregationService::platforms_per_release(&self.snapshot.platforms);

        self.snapshot
            .releases
            .iter()
            .filter(|r| family.accepts(&r.family))
            .map(|r| {
                let components: IndexMap<String, String> = r
                    .family
                    .component_keys()
                    .iter()
                    .filter_map(|key| {
                        r.component(key)
                            .map(|version| (key.to_string(), version.to_string()))
                    })
                    .collect();
                ReleaseView {
                    id: r.id.clone(),
                    family: r.family,
                    version_number: r.version_number.clone(),
                    components,
                    platforms_count: usage.get(&r.id).copied().unwrap_or(0),
                    created_at: r.created_at,
                }
            })
            .collect()
    }

    fn platform_view(&self, platform: &Platform) -> PlatformView {
        PlatformView {
            id: platform.id.clone(),
            name: platform.name.clone(),
            urn: platform.urn.clone(),
            platform_type: platform.platform_type.label().to_string(),
            project: self.context.project_name(&platform.project_id).to_string(),
            release: self
                .context
                .label(platform, PlatformGrouping::ReleaseVersion),
            component: platform.component_id.as_ref().map(|id| {
                self.components
                    .get(id.as_str())
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| UNKNOWN_COMPONENT.to_string())
            }),
            duplicate_urn: self.duplicate_urns.contains(&platform.urn),
            created_at: platform.created_at,
        }
    }
}

use crate::inventory::domain::{
    ComponentVersion, DeploymentStatus, Platform, Project, ReleaseVersion,
};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::Hash;

pub const UNKNOWN_PROJECT: &str = "Unknown Project";
pub const UNKNOWN_VERSION: &str = "Unknown Version";
pub const NO_VERSION: &str = "No Version";

/// How platforms are grouped for matrix and grouped views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformGrouping {
    /// By owning project name
    Project,
    /// By platform type label
    Type,
    /// By application release version number
    ReleaseVersion,
}

impl std::str::FromStr for PlatformGrouping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "project" => Ok(PlatformGrouping::Project),
            "type" => Ok(PlatformGrouping::Type),
            "version" | "release" => Ok(PlatformGrouping::ReleaseVersion),
            _ => Err(format!(
                "Invalid grouping: {}. Please specify 'project', 'type' or 'version'",
                s
            )),
        }
    }
}

/// Lookup tables needed to turn platform foreign keys into group labels
#[derive(Debug, Default)]
pub struct GroupingContext<'a> {
    projects: HashMap<&'a str, &'a Project>,
    releases: HashMap<&'a str, &'a ReleaseVersion>,
}

impl<'a> GroupingContext<'a> {
    pub fn new(projects: &'a [Project], releases: &'a [ReleaseVersion]) -> Self {
        Self {
            projects: projects.iter().map(|p| (p.id.as_str(), p)).collect(),
            releases: releases.iter().map(|r| (r.id.as_str(), r)).collect(),
        }
    }

    pub fn project(&self, id: &str) -> Option<&'a Project> {
        self.projects.get(id).copied()
    }

    pub fn release(&self, id: &str) -> Option<&'a ReleaseVersion> {
        self.releases.get(id).copied()
    }

    /// Project name, or the fallback label when the project is gone
    pub fn project_name(&self, id: &str) -> &'a str {
        self.project(id)
            .map(|p| p.name.as_str())
            .unwrap_or(UNKNOWN_PROJECT)
    }

    /// Group label for a platform under the given grouping
    pub fn label(&self, platform: &Platform, grouping: PlatformGrouping) -> String {
        match grouping {
            PlatformGrouping::Project => self.project_name(&platform.project_id).to_string(),
            PlatformGrouping::Type => platform.platform_type.label().to_string(),
            PlatformGrouping::ReleaseVersion => match &platform.application_version_id {
                None => NO_VERSION.to_string(),
                Some(id) => self
                    .release(id)
                    .map(|r| r.version_number.clone())
                    .unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
            },
        }
    }
}

/// AggregationService computes derived views over a store snapshot.
///
/// Everything here is a pure function of its inputs; callers recompute
/// after each change notification.
pub struct AggregationService;

impl AggregationService {
    /// Counts deployment records per status. All four statuses are
    /// present in the result, with zero when unused.
    pub fn count_by_status(versions: &[ComponentVersion]) -> BTreeMap<DeploymentStatus, usize> {
        let mut counts: BTreeMap<DeploymentStatus, usize> =
            DeploymentStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for version in versions {
            *counts.entry(version.status).or_insert(0) += 1;
        }
        counts
    }

    /// Counts items per key (platform type, project id, environment, ...)
    pub fn count_by_key<T, K, F>(items: &[T], key_fn: F) -> BTreeMap<K, usize>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        let mut counts = BTreeMap::new();
        for item in items {
            *counts.entry(key_fn(item)).or_insert(0) += 1;
        }
        counts
    }

    /// Items whose date falls within `days` calendar days before `now`.
    ///
    /// Dates are truncated to UTC calendar days before comparing, so an
    /// item exactly `days` days old is included regardless of time of day.
    /// Items dated after `now`'s day are not recent.
    pub fn recent_within_days<'a, T, F>(
        items: &'a [T],
        date_fn: F,
        now: DateTime<Utc>,
        days: u32,
    ) -> Vec<&'a T>
    where
        F: Fn(&T) -> DateTime<Utc>,
    {
        let today = now.date_naive();
        items
            .iter()
            .filter(|item| {
                let age = (today - date_fn(item).date_naive()).num_days();
                (0..=i64::from(days)).contains(&age)
            })
            .collect()
    }

    /// Keys that occur on two or more items. Single pass over a frequency map.
    pub fn find_duplicate_keys<T, K, F>(items: &[T], key_fn: F) -> BTreeSet<K>
    where
        K: Hash + Eq + Ord + Clone,
        F: Fn(&T) -> K,
    {
        let mut frequency: HashMap<K, usize> = HashMap::with_capacity(items.len());
        for item in items {
            *frequency.entry(key_fn(item)).or_insert(0) += 1;
        }
        frequency
            .into_iter()
            .filter(|(_, count)| *count >= 2)
            .map(|(key, _)| key)
            .collect()
    }

    /// Partitions items by key, keeping keys in first-appearance order.
    /// Only keys with at least one item appear.
    pub fn group_by<T, K, F>(items: &[T], key_fn: F) -> IndexMap<K, Vec<T>>
    where
        T: Clone,
        K: Hash + Eq,
        F: Fn(&T) -> K,
    {
        let mut groups: IndexMap<K, Vec<T>> = IndexMap::new();
        for item in items {
            groups.entry(key_fn(item)).or_default().push(item.clone());
        }
        groups
    }

    /// Groups platforms under the caller-selected grouping
    pub fn group_platforms(
        platforms: &[Platform],
        grouping: PlatformGrouping,
        context: &GroupingContext<'_>,
    ) -> IndexMap<String, Vec<Platform>> {
        Self::group_by(platforms, |p| context.label(p, grouping))
    }

    /// Derived `platforms_count` per application release id
    pub fn platforms_per_release(platforms: &[Platform]) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for id in platforms.iter().filter_map(|p| p.application_version_id.as_ref()) {
            *counts.entry(id.clone()).or_insert(0) += 1;
        }
        counts
    }
}

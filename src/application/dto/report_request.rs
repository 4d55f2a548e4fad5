use crate::inventory::domain::ReleaseFamily;
use crate::inventory::services::{
    ComponentFilter, PlatformFilter, PlatformGrouping, Selector, VersionFilter,
    DEFAULT_RECENT_DAYS,
};

/// Which report the dashboard should build
#[derive(Debug, Clone, PartialEq)]
pub enum ReportView {
    /// Headline statistics and critical issues
    Summary,
    /// Filtered platform list, optionally grouped
    Platforms {
        filter: PlatformFilter,
        grouping: Option<PlatformGrouping>,
    },
    Components {
        filter: ComponentFilter,
    },
    Versions {
        filter: VersionFilter,
    },
    /// URNs held by more than one platform
    Duplicates,
    Releases {
        family: Selector<ReleaseFamily>,
    },
}

/// Request DTO for report generation
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub view: ReportView,
    /// Width of the recent-deployments window, in calendar days
    pub recent_days: u32,
}

impl ReportRequest {
    pub fn new(view: ReportView) -> Self {
        Self {
            view,
            recent_days: DEFAULT_RECENT_DAYS,
        }
    }

    pub fn with_recent_days(mut self, days: u32) -> Self {
        self.recent_days = days;
        self
    }
}

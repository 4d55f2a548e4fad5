pub mod aggregation;
pub mod dashboard;
pub mod query_filter;

pub use aggregation::{
    AggregationService, GroupingContext, PlatformGrouping, NO_VERSION, UNKNOWN_PROJECT,
    UNKNOWN_VERSION,
};
pub use dashboard::{
    CriticalIssue, DashboardCalculator, DashboardStats, DuplicateWarning, DEFAULT_RECENT_DAYS,
};
pub use query_filter::{
    ComponentFilter, PlatformFilter, RecordFilter, Selector, VersionFilter, ALL_SENTINEL,
};

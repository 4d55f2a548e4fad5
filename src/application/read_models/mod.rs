//! Read models for the report side of the dashboard
//!
//! View-optimized structs giving a denormalized representation of the
//! inventory for the formatters.

mod catalog_view;
mod dashboard_view;
mod inventory_report;
mod platform_view;
mod report_builder;

pub use catalog_view::{ComponentView, ReleaseView, VersionView};
pub use dashboard_view::{CountView, CriticalIssueView, DashboardView};
pub use inventory_report::InventoryReport;
pub use platform_view::{DuplicateUrnView, PlatformGroupView, PlatformView};
pub use report_builder::{
    InventoryReportBuilder, ALL_PLATFORMS, UNKNOWN_COMPONENT, UNKNOWN_PLATFORM,
};

use super::catalog_view::{ComponentView, ReleaseView, VersionView};
use super::dashboard_view::DashboardView;
use super::platform_view::{DuplicateUrnView, PlatformGroupView};
use serde::Serialize;

/// InventoryReport is what the formatters render
///
/// Serialized as `{"report": "<kind>", "data": ...}` so JSON consumers can
/// dispatch on the report kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "report", content = "data", rename_all = "snake_case")]
pub enum InventoryReport {
    Summary(DashboardView),
    Platforms(Vec<PlatformGroupView>),
    Components(Vec<ComponentView>),
    Versions(Vec<VersionView>),
    Duplicates(Vec<DuplicateUrnView>),
    Releases(Vec<ReleaseView>),
}

impl InventoryReport {
    /// Report heading used by the Markdown formatter
    pub fn title(&self) -> &'static str {
        match self {
            InventoryReport::Summary(_) => "Inventory Dashboard",
            InventoryReport::Platforms(_) => "Platforms",
            InventoryReport::Components(_) => "Components",
            InventoryReport::Versions(_) => "Component Versions",
            InventoryReport::Duplicates(_) => "Duplicate URNs",
            InventoryReport::Releases(_) => "Release Versions",
        }
    }

    /// Number of top-level rows (platforms, components, ...) in the report
    pub fn row_count(&self) -> usize {
        match self {
            InventoryReport::Summary(view) => view.total_platforms,
            InventoryReport::Platforms(groups) => groups.iter().map(|g| g.platforms.len()).sum(),
            InventoryReport::Components(rows) => rows.len(),
            InventoryReport::Versions(rows) => rows.len(),
            InventoryReport::Duplicates(rows) => rows.len(),
            InventoryReport::Releases(rows) => rows.len(),
        }
    }
}

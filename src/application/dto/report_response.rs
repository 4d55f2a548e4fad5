use crate::application::read_models::InventoryReport;

/// Response DTO for report generation
#[derive(Debug, Clone)]
pub struct ReportResponse {
    pub report: InventoryReport,
    /// Critical issues found in the inventory, whatever view was requested
    pub critical_issue_count: usize,
}

impl ReportResponse {
    pub fn new(report: InventoryReport, critical_issue_count: usize) -> Self {
        Self {
            report,
            critical_issue_count,
        }
    }

    pub fn has_critical_issues(&self) -> bool {
        self.critical_issue_count > 0
    }
}

use crate::application::dto::{ReportRequest, ReportResponse};
use crate::shared::Result;

/// DashboardPort - Inbound port for building inventory reports
///
/// This port defines the interface that external adapters (CLI, API, etc.)
/// use to ask for a dashboard view of the inventory.
pub trait DashboardPort {
    /// Builds the requested report from the current inventory state
    ///
    /// # Arguments
    /// * `request` - Which view to build, with its filters and recency window
    ///
    /// # Returns
    /// The report plus the number of critical issues in the inventory
    ///
    /// # Errors
    /// Returns an error if the inventory cannot be read from the store
    fn build_report(&self, request: ReportRequest) -> Result<ReportResponse>;
}

use crate::application::read_models::InventoryReport;
use crate::shared::Result;

/// ReportFormatter port for rendering inventory reports
///
/// This port abstracts the output format (JSON, Markdown, ...).
pub trait ReportFormatter {
    /// Formats a report
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, report: &InventoryReport) -> Result<String>;
}

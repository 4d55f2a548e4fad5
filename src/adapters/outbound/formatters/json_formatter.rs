use crate::application::read_models::InventoryReport;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// JsonFormatter adapter rendering reports as pretty-printed JSON
///
/// The document is `{"report": "<kind>", "data": ...}`.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &InventoryReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

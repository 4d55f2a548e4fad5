/// Data Transfer Objects for application layer
///
/// DTOs carry requests and results between the CLI adapter and the use
/// cases, keeping the domain layer isolated.
mod output_format;
mod report_request;
mod report_response;

pub use output_format::OutputFormat;
pub use report_request::{ReportRequest, ReportView};
pub use report_response::ReportResponse;

use crate::application::dto::{ReportRequest, ReportResponse, ReportView};
use crate::application::read_models::{InventoryReport, InventoryReportBuilder};
use crate::inventory::services::{DashboardCalculator, RecordFilter};
use crate::ports::inbound::DashboardPort;
use crate::ports::outbound::{Clock, InventoryStore, ProgressReporter};
use crate::shared::Result;

const STEPS: usize = 3;

/// DashboardUseCase - builds the dashboard and list reports
///
/// Every report is computed from a fresh snapshot of the store, so it
/// always reflects the latest committed state.
///
/// # Type Parameters
/// * `S` - InventoryStore implementation
/// * `C` - Clock supplying the reference instant for recency windows
/// * `PR` - ProgressReporter implementation
pub struct DashboardUseCase<S, C, PR> {
    store: S,
    clock: C,
    progress_reporter: PR,
}

impl<S, C, PR> DashboardUseCase<S, C, PR>
where
    S: InventoryStore,
    C: Clock,
    PR: ProgressReporter,
{
    pub fn new(store: S, clock: C, progress_reporter: PR) -> Self {
        Self {
            store,
            clock,
            progress_reporter,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Executes the report use case
    ///
    /// # Arguments
    /// * `request` - Report view, filters and recency window
    ///
    /// # Returns
    /// ReportResponse carrying the report and the critical issue count
    pub fn execute(&self, request: ReportRequest) -> Result<ReportResponse> {
        self.progress_reporter
            .report_progress(1, STEPS, Some("Loading inventory..."));
        let snapshot = self.store.snapshot()?;

        self.progress_reporter
            .report_progress(2, STEPS, Some("Computing dashboard statistics..."));
        let now = self.clock.now();
        let stats = DashboardCalculator::compute(&snapshot, now, request.recent_days);

        self.progress_reporter
            .report_progress(3, STEPS, Some("Building report..."));
        let builder = InventoryReportBuilder::new(&snapshot);
        let report = match request.view {
            ReportView::Summary => {
                InventoryReport::Summary(InventoryReportBuilder::summary(&stats, now.date_naive()))
            }
            ReportView::Platforms { filter, grouping } => {
                let platforms = filter.apply(&snapshot.platforms);
                InventoryReport::Platforms(builder.platforms(&platforms, grouping))
            }
            ReportView::Components { filter } => {
                let components = filter.apply(&snapshot.components);
                InventoryReport::Components(builder.components(&components))
            }
            ReportView::Versions { filter } => {
                let versions = filter.apply(&snapshot.component_versions);
                InventoryReport::Versions(builder.versions(&versions))
            }
            ReportView::Duplicates => InventoryReport::Duplicates(builder.duplicates()),
            ReportView::Releases { family } => InventoryReport::Releases(builder.releases(&family)),
        };

        if !stats.critical_issues.is_empty() {
            self.progress_reporter.report_error(&format!(
                "⚠️  {} critical issue(s) in the inventory",
                stats.critical_issues.len()
            ));
        }
        self.progress_reporter.report_completion(&format!(
            "✅ {} report ready ({} rows)",
            report.title(),
            report.row_count()
        ));

        Ok(ReportResponse::new(report, stats.critical_issues.len()))
    }
}

impl<S, C, PR> DashboardPort for DashboardUseCase<S, C, PR>
where
    S: InventoryStore,
    C: Clock,
    PR: ProgressReporter,
{
    fn build_report(&self, request: ReportRequest) -> Result<ReportResponse> {
        self.execute(request)
    }
}

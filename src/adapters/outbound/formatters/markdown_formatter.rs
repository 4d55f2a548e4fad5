use crate::application::read_models::{
    ComponentView, CountView, DashboardView, DuplicateUrnView, InventoryReport, PlatformGroupView,
    PlatformView, ReleaseView, VersionView,
};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

const PLATFORM_TABLE_HEADER: &str = "| ID | Name | URN | Type | Project | Release | Component |\n";
const PLATFORM_TABLE_SEPARATOR: &str = "|----|------|-----|------|---------|---------|-----------|\n";

const COMPONENT_TABLE_HEADER: &str = "| ID | Name | Type | IP | Version | Hardware | Platforms |\n";
const COMPONENT_TABLE_SEPARATOR: &str = "|----|------|------|----|---------|----------|-----------|\n";

const VERSION_TABLE_HEADER: &str =
    "| ID | Platform | Component | Version | Status | Deployed | Known Issues |\n";
const VERSION_TABLE_SEPARATOR: &str =
    "|----|----------|-----------|---------|--------|----------|--------------|\n";

const COUNT_TABLE_SEPARATOR: &str = "|-------|-------|\n";

/// Shown when a table would have no rows
const NO_RECORDS: &str = "*No matching records.*\n\n";

/// MarkdownFormatter adapter rendering reports as Markdown tables
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn or_dash(value: &str) -> String {
        if value.trim().is_empty() {
            "-".to_string()
        } else {
            Self::escape_markdown_table_cell(value)
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_summary(&self, output: &mut String, view: &DashboardView) {
        output.push_str(&format!("As of {}\n\n", view.as_of));
        output.push_str("| Metric | Value |\n");
        output.push_str("|--------|-------|\n");
        output.push_str(&format!("| Total Platforms | {} |\n", view.total_platforms));
        output.push_str(&format!(
            "| Active Deployments | {} |\n",
            view.active_deployments
        ));
        output.push_str(&format!(
            "| Recent Deployments (last {} days) | {} |\n",
            view.recent_days, view.recent_deployments
        ));
        output.push('\n');

        self.render_counts(output, "Deployment Status", "Status", &view.status_counts);
        self.render_counts(output, "Platforms by Type", "Type", &view.platforms_by_type);
        self.render_counts(
            output,
            "Platforms by Project",
            "Project",
            &view.platforms_by_project,
        );

        output.push_str("## Critical Issues\n\n");
        if view.critical_issues.is_empty() {
            output.push_str("No critical issues found.\n\n");
            return;
        }
        for issue in &view.critical_issues {
            output.push_str(&format!("- ⚠️ {}\n", issue.description));
        }
        output.push('\n');
    }

    fn render_counts(&self, output: &mut String, title: &str, column: &str, rows: &[CountView]) {
        output.push_str(&format!("## {}\n\n", title));
        if rows.is_empty() {
            output.push_str(NO_RECORDS);
            return;
        }
        output.push_str(&format!("| {} | Count |\n", column));
        output.push_str(COUNT_TABLE_SEPARATOR);
        for row in rows {
            output.push_str(&format!(
                "| {} | {} |\n",
                Self::escape_markdown_table_cell(&row.label),
                row.count
            ));
        }
        output.push('\n');
    }

    fn render_platform_groups(&self, output: &mut String, groups: &[PlatformGroupView]) {
        if groups.is_empty() {
            output.push_str(NO_RECORDS);
            return;
        }
        for group in groups {
            output.push_str(&format!(
                "## {} ({})\n\n",
                Self::escape_markdown_table_cell(&group.label),
                group.platforms.len()
            ));
            self.render_platform_table(output, &group.platforms);
        }
    }

    fn render_platform_table(&self, output: &mut String, platforms: &[PlatformView]) {
        output.push_str(PLATFORM_TABLE_HEADER);
        output.push_str(PLATFORM_TABLE_SEPARATOR);
        for platform in platforms {
            let urn = if platform.duplicate_urn {
                format!("{} ⚠️", Self::escape_markdown_table_cell(&platform.urn))
            } else {
                Self::escape_markdown_table_cell(&platform.urn)
            };
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&platform.id),
                Self::escape_markdown_table_cell(&platform.name),
                urn,
                platform.platform_type,
                Self::escape_markdown_table_cell(&platform.project),
                Self::escape_markdown_table_cell(&platform.release),
                Self::or_dash(platform.component.as_deref().unwrap_or(""))
            ));
        }
        output.push('\n');
    }

    fn render_components(&self, output: &mut String, components: &[ComponentView]) {
        if components.is_empty() {
            output.push_str(NO_RECORDS);
            return;
        }
        output.push_str(COMPONENT_TABLE_HEADER);
        output.push_str(COMPONENT_TABLE_SEPARATOR);
        for component in components {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&component.id),
                Self::escape_markdown_table_cell(&component.name),
                component.component_type,
                Self::or_dash(&component.ip),
                Self::or_dash(&component.version),
                Self::or_dash(&component.hardware),
                component.platforms_count
            ));
        }
        output.push('\n');
    }

    fn render_versions(&self, output: &mut String, versions: &[VersionView]) {
        if versions.is_empty() {
            output.push_str(NO_RECORDS);
            return;
        }
        output.push_str(VERSION_TABLE_HEADER);
        output.push_str(VERSION_TABLE_SEPARATOR);
        for version in versions {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&version.id),
                Self::escape_markdown_table_cell(&version.platform),
                version.component_type,
                Self::escape_markdown_table_cell(&version.version_number),
                version.status,
                version.deployment_date.format("%Y-%m-%d"),
                Self::or_dash(&version.known_issues.join("; "))
            ));
        }
        output.push('\n');
    }

    fn render_duplicates(&self, output: &mut String, duplicates: &[DuplicateUrnView]) {
        if duplicates.is_empty() {
            output.push_str("No duplicate URNs found.\n\n");
            return;
        }
        for duplicate in duplicates {
            output.push_str(&format!(
                "## URN {} ({} platforms)\n\n",
                Self::escape_markdown_table_cell(&duplicate.urn),
                duplicate.platforms.len()
            ));
            self.render_platform_table(output, &duplicate.platforms);
        }
    }

    fn render_releases(&self, output: &mut String, releases: &[ReleaseView]) {
        if releases.is_empty() {
            output.push_str(NO_RECORDS);
            return;
        }
        output.push_str("| ID | Family | Version | Components | Platforms |\n");
        output.push_str("|----|--------|---------|------------|-----------|\n");
        for release in releases {
            let components = release
                .components
                .iter()
                .map(|(key, version)| format!("{}: {}", key, version))
                .collect::<Vec<_>>()
                .join(", ");
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&release.id),
                release.family,
                Self::escape_markdown_table_cell(&release.version_number),
                Self::or_dash(&components),
                release.platforms_count
            ));
        }
        output.push('\n');
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, report: &InventoryReport) -> Result<String> {
        let mut output = String::new();
        output.push_str(&format!("# {}\n\n", report.title()));

        match report {
            InventoryReport::Summary(view) => self.render_summary(&mut output, view),
            InventoryReport::Platforms(groups) => self.render_platform_groups(&mut output, groups),
            InventoryReport::Components(rows) => self.render_components(&mut output, rows),
            InventoryReport::Versions(rows) => self.render_versions(&mut output, rows),
            InventoryReport::Duplicates(rows) => self.render_duplicates(&mut output, rows),
            InventoryReport::Releases(rows) => self.render_releases(&mut output, rows),
        }

        Ok(output)
    }
}

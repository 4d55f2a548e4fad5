//! Dashboard summary view
//!
//! Flattens `DashboardStats` into labelled rows so formatters never need
//! the domain enums.

use chrono::NaiveDate;
use serde::Serialize;

/// One labelled count (a status, a platform type, a project)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountView {
    pub label: String,
    pub count: usize,
}

impl CountView {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// A critical issue with its human-readable description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriticalIssueView {
    pub kind: String,
    pub description: String,
}

/// View representation of the dashboard summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    /// Reference day for the recency window
    pub as_of: NaiveDate,
    pub recent_days: u32,
    pub total_platforms: usize,
    pub active_deployments: usize,
    pub recent_deployments: usize,
    pub status_counts: Vec<CountView>,
    pub platforms_by_type: Vec<CountView>,
    pub platforms_by_project: Vec<CountView>,
    pub critical_issues: Vec<CriticalIssueView>,
}

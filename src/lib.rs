//! fleet-inventory - inventory and dashboard tooling for deployed platform fleets
//!
//! This library tracks projects, platforms, hardware components, deployment
//! records and release bundles, and derives dashboard statistics and
//! grouped/filtered reports from them. It follows hexagonal architecture
//! and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`inventory`): Entity schema, aggregation, filtering and dashboard services
//! - **Application Layer** (`application`): Use cases, read models and factories
//! - **Ports** (`ports`): Interface definitions for record stores and infrastructure
//! - **Adapters** (`adapters`): In-memory and HTTP stores, formatters, file and console I/O
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use fleet_inventory::prelude::*;
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let store = InMemoryInventory::from_snapshot(
//!     InventorySnapshot::demo()?,
//!     IdStrategy::Sequential,
//!     Box::new(SystemClock),
//! )?;
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = DashboardUseCase::new(store, SystemClock, progress_reporter);
//!
//! // Execute
//! let response = use_case.execute(ReportRequest::new(ReportView::Summary))?;
//!
//! // Format output
//! let output = MarkdownFormatter::new().format(&response.report)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod inventory;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::clock::{FixedClock, SystemClock};
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, FileTokenStore, SeedFileReader, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::adapters::outbound::memory::{IdStrategy, InMemoryInventory};
    pub use crate::adapters::outbound::network::{ApiClient, HttpInventory};
    pub use crate::application::dto::{OutputFormat, ReportRequest, ReportResponse, ReportView};
    pub use crate::application::read_models::{InventoryReport, InventoryReportBuilder};
    pub use crate::application::use_cases::{DashboardUseCase, PlatformRegistryUseCase};
    pub use crate::inventory::domain::{
        Component, ComponentDraft, ComponentType, ComponentVersion, ComponentVersionDraft,
        DeploymentStatus, Entity, EntityKind, InventorySnapshot, Platform, PlatformDraft,
        PlatformType, Project, ProjectDraft, ProjectStatus, ReleaseFamily, ReleaseVersion,
        ReleaseVersionDraft,
    };
    pub use crate::inventory::services::{
        AggregationService, DashboardCalculator, DashboardStats, PlatformGrouping, Selector,
    };
    pub use crate::ports::inbound::DashboardPort;
    pub use crate::ports::outbound::{
        ChangeEvent, ChangeNotifier, Clock, EntityStore, InventoryStore, OutputPresenter,
        ProgressReporter, ReportFormatter, SeedReader, TokenStore,
    };
    pub use crate::shared::{InventoryError, Result, StoreResult};
}

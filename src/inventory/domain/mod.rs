pub mod component;
pub mod component_version;
pub mod entity;
pub mod platform;
pub mod project;
pub mod release;
pub mod selection;
pub mod snapshot;

pub use component::{Component, ComponentDraft, ComponentType};
pub use component_version::{
    ComponentVersion, ComponentVersionDraft, DeploymentStatus, VersionedComponentKind,
};
pub use entity::{Entity, EntityDraft, EntityKind, Reference};
pub use platform::{Platform, PlatformDraft, PlatformType};
pub use project::{Project, ProjectDraft, ProjectStatus};
pub use release::{ReleaseFamily, ReleaseVersion, ReleaseVersionDraft};
pub use selection::ComponentSelection;
pub use snapshot::InventorySnapshot;

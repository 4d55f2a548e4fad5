/// Use cases module containing application business logic orchestration
mod dashboard;
mod platform_registry;

pub use dashboard::DashboardUseCase;
pub use platform_registry::{PlatformRegistration, PlatformRegistryUseCase};

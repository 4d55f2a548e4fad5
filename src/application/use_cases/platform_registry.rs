use crate::inventory::domain::{Platform, PlatformDraft};
use crate::inventory::services::DuplicateWarning;
use crate::ports::outbound::InventoryStore;
use crate::shared::StoreResult;
use tracing::warn;

/// A platform write together with any URN clash it introduced
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformRegistration {
    pub platform: Platform,
    pub warning: Option<DuplicateWarning>,
}

/// PlatformRegistryUseCase - registers and edits platforms
///
/// Duplicate URNs are tolerated: the write goes through and the clash is
/// reported next to the stored record.
pub struct PlatformRegistryUseCase<S> {
    store: S,
}

impl<S: InventoryStore> PlatformRegistryUseCase<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Creates a platform
    ///
    /// # Errors
    /// Returns `Validation` for invalid fields or dangling references;
    /// never for a duplicate URN
    pub fn register_platform(&mut self, draft: PlatformDraft) -> StoreResult<PlatformRegistration> {
        let existing: Vec<Platform> = self.store.records()?;
        let warning = DuplicateWarning::check(&existing, &draft.urn, None);

        let platform = self.store.insert(draft)?;
        Ok(self.registration(platform, warning))
    }

    /// Replaces a platform's fields, checking the new URN against every
    /// other platform
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown id, `Validation` as for registration
    pub fn update_platform(
        &mut self,
        id: &str,
        draft: PlatformDraft,
    ) -> StoreResult<PlatformRegistration> {
        let existing: Vec<Platform> = self.store.records()?;
        let warning = DuplicateWarning::check(&existing, &draft.urn, Some(id));

        let platform = self.store.replace(id, draft)?;
        Ok(self.registration(platform, warning))
    }

    pub fn remove_platform(&mut self, id: &str) -> StoreResult<()> {
        self.store.remove::<Platform>(id)
    }

    fn registration(
        &self,
        platform: Platform,
        warning: Option<DuplicateWarning>,
    ) -> PlatformRegistration {
        if let Some(warning) = &warning {
            warn!("Platform {}: {}", platform.id, warning);
        }
        PlatformRegistration { platform, warning }
    }
}

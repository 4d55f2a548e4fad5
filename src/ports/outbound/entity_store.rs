use crate::inventory::domain::{
    Component, ComponentVersion, Entity, EntityDraft, InventorySnapshot, Platform, Project,
    ReleaseVersion,
};
use crate::shared::StoreResult;

/// EntityStore port for one collection of inventory records
///
/// This port abstracts where records live (in memory, behind a REST
/// backend, ...). Callers see the same contract either way.
pub trait EntityStore<T: Entity> {
    /// Returns every record in insertion order
    fn list(&self) -> StoreResult<Vec<T>>;

    /// Point lookup
    ///
    /// # Errors
    /// Returns `NotFound` if no record has this id
    fn get(&self, id: &str) -> StoreResult<T>;

    /// Assigns a fresh id and creation stamp, validates the draft and its
    /// foreign keys, and inserts the record
    ///
    /// # Errors
    /// Returns `Validation` if a field is invalid or a referenced record
    /// does not exist
    fn create(&mut self, draft: T::Draft) -> StoreResult<T>;

    /// Replaces every field of an existing record, keeping its id and
    /// creation stamp
    ///
    /// # Errors
    /// Returns `NotFound` if the id is absent, `Validation` as for `create`
    fn update(&mut self, id: &str, draft: T::Draft) -> StoreResult<T>;

    /// Removes a record. Dependent records are left in place.
    ///
    /// # Errors
    /// Returns `NotFound` if the id is absent, including on a second delete
    fn delete(&mut self, id: &str) -> StoreResult<()>;
}

/// InventoryStore serves all five inventory collections
///
/// The generic helpers let callers pick the collection by type instead of
/// spelling out `EntityStore::<Platform>::list(&store)`.
pub trait InventoryStore:
    EntityStore<Project>
    + EntityStore<Platform>
    + EntityStore<Component>
    + EntityStore<ComponentVersion>
    + EntityStore<ReleaseVersion>
{
    fn records<T: Entity>(&self) -> StoreResult<Vec<T>>
    where
        Self: EntityStore<T>,
    {
        EntityStore::<T>::list(self)
    }

    fn fetch<T: Entity>(&self, id: &str) -> StoreResult<T>
    where
        Self: EntityStore<T>,
    {
        EntityStore::<T>::get(self, id)
    }

    fn insert<D: EntityDraft>(&mut self, draft: D) -> StoreResult<D::Record>
    where
        Self: EntityStore<D::Record>,
    {
        EntityStore::<D::Record>::create(self, draft)
    }

    fn replace<D: EntityDraft>(&mut self, id: &str, draft: D) -> StoreResult<D::Record>
    where
        Self: EntityStore<D::Record>,
    {
        EntityStore::<D::Record>::update(self, id, draft)
    }

    fn remove<T: Entity>(&mut self, id: &str) -> StoreResult<()>
    where
        Self: EntityStore<T>,
    {
        EntityStore::<T>::delete(self, id)
    }

    /// Reads every collection into one snapshot for the aggregation
    /// services
    fn snapshot(&self) -> StoreResult<InventorySnapshot> {
        Ok(InventorySnapshot {
            projects: self.records()?,
            releases: self.records()?,
            components: self.records()?,
            platforms: self.records()?,
            component_versions: self.records()?,
        })
    }
}

impl<S> InventoryStore for S where
    S: EntityStore<Project>
        + EntityStore<Platform>
        + EntityStore<Component>
        + EntityStore<ComponentVersion>
        + EntityStore<ReleaseVersion>
{
}

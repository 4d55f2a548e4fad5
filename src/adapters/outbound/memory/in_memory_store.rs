use super::id_strategy::{IdGenerator, IdStrategy};
use crate::adapters::outbound::clock::SystemClock;
use crate::inventory::domain::{
    Component, ComponentVersion, Entity, EntityKind, InventorySnapshot, Platform, Project,
    Reference, ReleaseVersion,
};
use crate::ports::outbound::{
    ChangeEvent, ChangeListener, ChangeNotifier, ChangeOp, Clock, EntityStore, ListenerRegistry,
    SubscriptionId,
};
use crate::shared::{InventoryError, StoreResult};
use indexmap::IndexMap;
use tracing::{debug, info};

/// One collection: records keyed by id in insertion order, plus its id source
pub struct Collection<T> {
    records: IndexMap<String, T>,
    ids: IdGenerator,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: IndexMap::new(),
            ids: IdGenerator::default(),
        }
    }
}

/// Gives the generic store code access to the collection for `T`
pub trait StoredCollection<T> {
    fn collection(&self) -> &Collection<T>;
    fn collection_mut(&mut self) -> &mut Collection<T>;
}

/// InMemoryInventory holds the authoritative record collections in process.
///
/// Writes are validated against the store's own collections. Every
/// successful write notifies subscribers after it has been applied; a
/// rejected write leaves the store untouched and notifies no one.
pub struct InMemoryInventory {
    projects: Collection<Project>,
    releases: Collection<ReleaseVersion>,
    components: Collection<Component>,
    platforms: Collection<Platform>,
    component_versions: Collection<ComponentVersion>,
    id_strategy: IdStrategy,
    clock: Box<dyn Clock>,
    listeners: ListenerRegistry,
}

impl InMemoryInventory {
    /// Creates an empty store with sequential ids and the system clock
    pub fn new() -> Self {
        Self::with_options(IdStrategy::default(), Box::new(SystemClock))
    }

    pub fn with_options(id_strategy: IdStrategy, clock: Box<dyn Clock>) -> Self {
        Self {
            projects: Collection::default(),
            releases: Collection::default(),
            components: Collection::default(),
            platforms: Collection::default(),
            component_versions: Collection::default(),
            id_strategy,
            clock,
            listeners: ListenerRegistry::new(),
        }
    }

    /// Builds a store pre-loaded with the snapshot's records.
    ///
    /// Records keep their ids and stamps. Collections are loaded in
    /// dependency order, so every foreign key must point at a record from
    /// an earlier collection (or earlier in the same one).
    ///
    /// # Errors
    /// Returns `Seed` for an invalid record, a dangling foreign key or a
    /// duplicate id
    pub fn from_snapshot(
        snapshot: InventorySnapshot,
        id_strategy: IdStrategy,
        clock: Box<dyn Clock>,
    ) -> StoreResult<Self> {
        let mut store = Self::with_options(id_strategy, clock);
        let total = snapshot.record_count();

        store.seed(snapshot.projects)?;
        store.seed(snapshot.releases)?;
        store.seed(snapshot.components)?;
        store.seed(snapshot.platforms)?;
        store.seed(snapshot.component_versions)?;

        info!(
            "Seeded in-memory inventory with {} records ({} ids)",
            total, id_strategy
        );
        Ok(store)
    }

    pub fn id_strategy(&self) -> IdStrategy {
        self.id_strategy
    }

    fn seed<T: Entity>(&mut self, records: Vec<T>) -> StoreResult<()>
    where
        Self: StoredCollection<T>,
    {
        for (index, record) in records.into_iter().enumerate() {
            let seed_error = |details: String| InventoryError::Seed {
                details: format!("{}[{}]: {}", T::KIND.collection_path(), index, details),
            };

            let id = record.id().to_string();
            if id.trim().is_empty() {
                return Err(seed_error("record has an empty id".to_string()));
            }

            let draft = record.to_draft();
            T::validate_draft(&draft)
                .and_then(|_| self.check_references::<T>(&draft))
                .map_err(|e| seed_error(e.to_string()))?;

            let collection = <Self as StoredCollection<T>>::collection_mut(self);
            if collection.records.contains_key(&id) {
                return Err(seed_error(format!("duplicate {} id '{}'", T::KIND, id)));
            }
            collection.ids.observe(&id);
            collection.records.insert(id, record);
        }
        Ok(())
    }

    fn check_references<T: Entity>(&self, draft: &T::Draft) -> StoreResult<()> {
        for reference in T::references(draft) {
            self.check_reference(T::KIND, &reference)?;
        }
        Ok(())
    }

    fn check_reference(&self, owner: EntityKind, reference: &Reference) -> StoreResult<()> {
        let id = reference.id.as_str();
        let exists = match reference.kind {
            EntityKind::Project => self.projects.records.contains_key(id),
            EntityKind::Platform => self.platforms.records.contains_key(id),
            EntityKind::Component => self.components.records.contains_key(id),
            EntityKind::ComponentVersion => self.component_versions.records.contains_key(id),
            EntityKind::ReleaseVersion => match self.releases.records.get(id) {
                None => false,
                Some(release) => match reference.family {
                    Some(family) if release.family != family => {
                        return Err(InventoryError::validation(
                            owner,
                            format!(
                                "{} '{}' refers to a {} release, expected {}",
                                reference.field, id, release.family, family
                            ),
                        ));
                    }
                    _ => true,
                },
            },
        };

        if exists {
            Ok(())
        } else {
            Err(reference.dangling(owner))
        }
    }

    fn announce(&self, kind: EntityKind, id: &str, op: ChangeOp) {
        debug!("{} {} {}", kind, id, op);
        self.listeners.notify(&ChangeEvent::new(kind, id, op));
    }
}

impl Default for InMemoryInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> EntityStore<T> for InMemoryInventory
where
    Self: StoredCollection<T>,
{
    fn list(&self) -> StoreResult<Vec<T>> {
        let collection = <Self as StoredCollection<T>>::collection(self);
        Ok(collection.records.values().cloned().collect())
    }

    fn get(&self, id: &str) -> StoreResult<T> {
        <Self as StoredCollection<T>>::collection(self)
            .records
            .get(id)
            .cloned()
            .ok_or_else(|| InventoryError::not_found(T::KIND, id))
    }

    fn create(&mut self, draft: T::Draft) -> StoreResult<T> {
        T::validate_draft(&draft)?;
        self.check_references::<T>(&draft)?;

        let stamp = self.clock.now();
        let strategy = self.id_strategy;
        let collection = <Self as StoredCollection<T>>::collection_mut(self);
        let records = &collection.records;
        let id = collection
            .ids
            .next(strategy, |candidate| records.contains_key(candidate));

        let record = T::from_draft(id.clone(), draft, stamp);
        collection.records.insert(id.clone(), record.clone());

        self.announce(T::KIND, &id, ChangeOp::Created);
        Ok(record)
    }

    fn update(&mut self, id: &str, draft: T::Draft) -> StoreResult<T> {
        let stamp = match <Self as StoredCollection<T>>::collection(self).records.get(id) {
            Some(existing) => existing.stamp(),
            None => return Err(InventoryError::not_found(T::KIND, id)),
        };
        T::validate_draft(&draft)?;
        self.check_references::<T>(&draft)?;

        let record = T::from_draft(id.to_string(), draft, stamp);
        // Inserting over an existing key keeps its position
        <Self as StoredCollection<T>>::collection_mut(self)
            .records
            .insert(id.to_string(), record.clone());

        self.announce(T::KIND, id, ChangeOp::Updated);
        Ok(record)
    }

    fn delete(&mut self, id: &str) -> StoreResult<()> {
        let collection = <Self as StoredCollection<T>>::collection_mut(self);
        if collection.records.shift_remove(id).is_none() {
            return Err(InventoryError::not_found(T::KIND, id));
        }
        self.announce(T::KIND, id, ChangeOp::Deleted);
        Ok(())
    }
}

impl ChangeNotifier for InMemoryInventory {
    fn subscribe(&mut self, listener: Box<dyn ChangeListener>) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

macro_rules! stored_collection {
    ($entity:ty, $field:ident) => {
        impl StoredCollection<$entity> for InMemoryInventory {
            fn collection(&self) -> &Collection<$entity> {
                &self.$field
            }

            fn collection_mut(&mut self) -> &mut Collection<$entity> {
                &mut self.$field
            }
        }
    };
}

stored_collection!(Project, projects);
stored_collection!(ReleaseVersion, releases);
stored_collection!(Component, components);
stored_collection!(Platform, platforms);
stored_collection!(ComponentVersion, component_versions);

use super::api_client::ApiClient;
use crate::inventory::domain::{Entity, EntityKind, Reference, ReleaseVersion};
use crate::ports::outbound::{
    ChangeEvent, ChangeListener, ChangeNotifier, ChangeOp, EntityStore, ListenerRegistry,
    SubscriptionId, TokenStore,
};
use crate::shared::security::validate_path_segment;
use crate::shared::{InventoryError, StoreResult};
use serde::de::IgnoredAny;
use tracing::debug;

/// HttpInventory serves the store contract from a REST backend
///
/// Each collection lives at `/<collection>` with records at
/// `/<collection>/<id>`. Drafts and foreign keys are checked before a
/// write is sent, so a dangling reference never reaches the server.
pub struct HttpInventory<TS: TokenStore> {
    client: ApiClient<TS>,
    listeners: ListenerRegistry,
}

impl<TS: TokenStore> HttpInventory<TS> {
    pub fn new(client: ApiClient<TS>) -> Self {
        Self {
            client,
            listeners: ListenerRegistry::new(),
        }
    }

    pub fn client(&self) -> &ApiClient<TS> {
        &self.client
    }

    fn collection_path(kind: EntityKind) -> String {
        format!("/{}", kind.collection_path())
    }

    /// An id that cannot be put in a URL names no record on the backend,
    /// so it is reported as not found
    fn record_path(kind: EntityKind, id: &str) -> StoreResult<String> {
        validate_path_segment(id, "Record id").map_err(|e| {
            debug!("Unaddressable {} id: {}", kind, e);
            InventoryError::not_found(kind, id)
        })?;
        Ok(format!(
            "/{}/{}",
            kind.collection_path(),
            urlencoding::encode(id)
        ))
    }

    fn check_references<T: Entity>(&self, draft: &T::Draft) -> StoreResult<()> {
        for reference in T::references(draft) {
            self.check_reference(T::KIND, &reference)?;
        }
        Ok(())
    }

    fn check_reference(&self, owner: EntityKind, reference: &Reference) -> StoreResult<()> {
        let path = Self::record_path(reference.kind, &reference.id)
            .map_err(|_| reference.dangling(owner))?;

        let found = match reference.family {
            Some(family) => self.client.get::<ReleaseVersion>(&path).map(|release| {
                (release.family == family).then_some(()).ok_or_else(|| {
                    InventoryError::validation(
                        owner,
                        format!(
                            "{} '{}' refers to a {} release, expected {}",
                            reference.field, reference.id, release.family, family
                        ),
                    )
                })
            }),
            None => self.client.get::<IgnoredAny>(&path).map(|_| Ok(())),
        };

        match found {
            Ok(family_check) => family_check,
            Err(InventoryError::Http { status: 404, .. }) => Err(reference.dangling(owner)),
            Err(other) => Err(other),
        }
    }

    fn announce(&self, kind: EntityKind, id: &str, op: ChangeOp) {
        debug!("{} {} {} (remote)", kind, id, op);
        self.listeners.notify(&ChangeEvent::new(kind, id, op));
    }
}

/// Maps backend status codes onto the store's error contract
fn classify(error: InventoryError, kind: EntityKind, id: Option<&str>) -> InventoryError {
    match (error, id) {
        (InventoryError::Http { status: 404, .. }, Some(id)) => InventoryError::not_found(kind, id),
        (InventoryError::Http { status, url }, _) if status == 400 || status == 422 => {
            InventoryError::validation(kind, format!("rejected by {} (HTTP {})", url, status))
        }
        (other, _) => other,
    }
}

impl<T: Entity, TS: TokenStore> EntityStore<T> for HttpInventory<TS> {
    fn list(&self) -> StoreResult<Vec<T>> {
        self.client
            .get(&Self::collection_path(T::KIND))
            .map_err(|e| classify(e, T::KIND, None))
    }

    fn get(&self, id: &str) -> StoreResult<T> {
        let path = Self::record_path(T::KIND, id)?;
        self.client
            .get(&path)
            .map_err(|e| classify(e, T::KIND, Some(id)))
    }

    fn create(&mut self, draft: T::Draft) -> StoreResult<T> {
        T::validate_draft(&draft)?;
        self.check_references::<T>(&draft)?;

        let record: T = self
            .client
            .post(&Self::collection_path(T::KIND), &draft)
            .map_err(|e| classify(e, T::KIND, None))?;

        self.announce(T::KIND, record.id(), ChangeOp::Created);
        Ok(record)
    }

    fn update(&mut self, id: &str, draft: T::Draft) -> StoreResult<T> {
        let path = Self::record_path(T::KIND, id)?;
        T::validate_draft(&draft)?;
        self.check_references::<T>(&draft)?;

        let record: T = self
            .client
            .put(&path, &draft)
            .map_err(|e| classify(e, T::KIND, Some(id)))?;

        self.announce(T::KIND, id, ChangeOp::Updated);
        Ok(record)
    }

    fn delete(&mut self, id: &str) -> StoreResult<()> {
        let path = Self::record_path(T::KIND, id)?;
        self.client
            .delete(&path)
            .map_err(|e| classify(e, T::KIND, Some(id)))?;

        self.announce(T::KIND, id, ChangeOp::Deleted);
        Ok(())
    }
}

impl<TS: TokenStore> ChangeNotifier for HttpInventory<TS> {
    fn subscribe(&mut self, listener: Box<dyn ChangeListener>) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

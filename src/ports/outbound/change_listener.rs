use crate::inventory::domain::EntityKind;
use std::fmt;

/// The mutation a change event reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOp {
    Created,
    Updated,
    Deleted,
}

impl fmt::Display for ChangeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeOp::Created => write!(f, "created"),
            ChangeOp::Updated => write!(f, "updated"),
            ChangeOp::Deleted => write!(f, "deleted"),
        }
    }
}

/// Emitted once per successful mutation, after it has been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: EntityKind,
    pub id: String,
    pub op: ChangeOp,
}

impl ChangeEvent {
    pub fn new(kind: EntityKind, id: impl Into<String>, op: ChangeOp) -> Self {
        Self {
            kind,
            id: id.into(),
            op,
        }
    }
}

/// ChangeListener port for reacting to store mutations
///
/// Any `Fn(&ChangeEvent)` closure is a listener.
pub trait ChangeListener {
    fn on_change(&self, event: &ChangeEvent);
}

impl<F> ChangeListener for F
where
    F: Fn(&ChangeEvent),
{
    fn on_change(&self, event: &ChangeEvent) {
        self(event)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// ChangeNotifier port: subscribe/notify for store mutations
pub trait ChangeNotifier {
    fn subscribe(&mut self, listener: Box<dyn ChangeListener>) -> SubscriptionId;

    /// Returns false if the subscription was not active
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

/// Subscriber list shared by the store adapters
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Box<dyn ChangeListener>)>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Box<dyn ChangeListener>) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Delivers the event to every listener in subscription order
    pub fn notify(&self, event: &ChangeEvent) {
        for (_, listener) in &self.listeners {
            listener.on_change(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

use chrono::{DateTime, Utc};

/// Clock port supplying creation stamps and the "now" reference for
/// recency windows
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Type alias for Result with anyhow::Error as the error type.
/// Application and CLI code use this; store operations return the typed
/// [`StoreResult`](crate::shared::StoreResult) instead.
pub type Result<T> = std::result::Result<T, anyhow::Error>;

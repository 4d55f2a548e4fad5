use crate::shared::Result;

/// TokenStore port for the bearer token attached to API requests
///
/// Stands in for the browser's local storage: the token survives between
/// runs and is cleared when the backend rejects it.
pub trait TokenStore {
    /// Returns the stored token, or None when signed out
    fn load(&self) -> Result<Option<String>>;

    fn save(&self, token: &str) -> Result<()>;

    /// Removes the stored token. Clearing an absent token is not an error.
    fn clear(&self) -> Result<()>;
}

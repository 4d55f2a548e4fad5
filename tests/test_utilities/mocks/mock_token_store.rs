use fleet_inventory::prelude::*;
use std::sync::Mutex;

/// Mock TokenStore holding the token in memory
#[derive(Default)]
pub struct MockTokenStore {
    token: Mutex<Option<String>>,
}

impl MockTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MockTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().unwrap().clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

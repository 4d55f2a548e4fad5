use crate::ports::outbound::TokenStore;
use crate::shared::{InventoryError, Result, StoreResult};
use reqwest::blocking::{Client, Response};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, warn};

pub const DEFAULT_API_BASE_URL: &str = "https://api.example.com";
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// ApiClient sends JSON requests to the inventory backend
///
/// Every request carries the stored bearer token, when there is one. A 401
/// clears the token and reports the login route to send the user to. The
/// client never retries.
pub struct ApiClient<TS: TokenStore> {
    client: Client,
    base_url: String,
    login_route: String,
    tokens: TS,
}

impl<TS: TokenStore> ApiClient<TS> {
    pub fn new(base_url: &str, login_route: &str, tokens: TS) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("fleet-inventory/{}", version);
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            login_route: login_route.to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &TS {
        &self.tokens
    }

    pub fn get<R: DeserializeOwned>(&self, path: &str) -> StoreResult<R> {
        let (url, response) = self.send::<()>(Method::GET, path, None)?;
        Self::decode(&url, response)
    }

    pub fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> StoreResult<R> {
        let (url, response) = self.send(Method::POST, path, Some(body))?;
        Self::decode(&url, response)
    }

    pub fn put<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> StoreResult<R> {
        let (url, response) = self.send(Method::PUT, path, Some(body))?;
        Self::decode(&url, response)
    }

    /// Any response body is ignored
    pub fn delete(&self, path: &str) -> StoreResult<()> {
        self.send::<()>(Method::DELETE, path, None)?;
        Ok(())
    }

    fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> StoreResult<(String, Response)> {
        let url = format!("{}{}", self.base_url, path);

        let token = self.tokens.load().map_err(|e| {
            error!("Error setting up request to {}: {}", url, e);
            InventoryError::RequestSetup {
                details: format!("failed to read auth token: {}", e),
            }
        })?;

        let mut builder = self.client.request(method.clone(), &url);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let request = builder.build().map_err(|e| {
            error!("Error setting up request to {}: {}", url, e);
            InventoryError::RequestSetup {
                details: e.to_string(),
            }
        })?;

        debug!("{} {}", method, url);
        let response = self.client.execute(request).map_err(|e| {
            if e.is_builder() {
                error!("Error setting up request to {}: {}", url, e);
                InventoryError::RequestSetup {
                    details: e.to_string(),
                }
            } else {
                error!("Network error, no response received from {}: {}", url, e);
                InventoryError::Network {
                    url: url.clone(),
                    details: e.to_string(),
                }
            }
        })?;

        self.check_status(&url, response.status())?;
        Ok((url, response))
    }

    fn check_status(&self, url: &str, status: StatusCode) -> StoreResult<()> {
        if status.is_success() {
            return Ok(());
        }

        match status {
            StatusCode::UNAUTHORIZED => {
                if let Err(e) = self.tokens.clear() {
                    warn!("Failed to clear rejected auth token: {}", e);
                }
                warn!(
                    "Request to {} was unauthorized; redirecting to {}",
                    url, self.login_route
                );
                Err(InventoryError::Unauthorized {
                    login_route: self.login_route.clone(),
                })
            }
            StatusCode::FORBIDDEN => {
                error!("Permission denied: {}", url);
                Err(InventoryError::Forbidden {
                    url: url.to_string(),
                })
            }
            _ => Err(InventoryError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }

    fn decode<R: DeserializeOwned>(url: &str, response: Response) -> StoreResult<R> {
        response.json().map_err(|e| InventoryError::Decode {
            url: url.to_string(),
            details: e.to_string(),
        })
    }
}

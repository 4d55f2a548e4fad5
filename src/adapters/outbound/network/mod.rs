/// Network adapters for the inventory backend
mod api_client;
mod http_store;

pub use api_client::{ApiClient, DEFAULT_API_BASE_URL, DEFAULT_LOGIN_ROUTE};
pub use http_store::HttpInventory;

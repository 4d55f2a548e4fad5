//! Inventory core: the canonical entity schema and the pure services
//! (aggregation, filtering, dashboard statistics) computed over it.
pub mod domain;
pub mod services;

/// In-process record store
mod id_strategy;
mod in_memory_store;

pub use id_strategy::IdStrategy;
pub use in_memory_store::InMemoryInventory;

pub mod json_backend;
pub mod memory;

use crate::errors::Result;

/// Key under which the full transaction list is stored.
pub const TRANSACTIONS_KEY: &str = "transactions";
/// Key under which the full budget list is stored.
pub const BUDGETS_KEY: &str = "budgets";

/// Abstraction over string key-value persistence backends.
///
/// Values are complete serialized snapshots; every write replaces the
/// previous value for the key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;

pub mod json_file;
pub mod memory;

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::Result;

pub use json_file::{BackupInfo, JsonFileStore};
pub use memory::MemoryStore;

/// Storage key for the serialized checklist items.
pub const CHECKLIST_KEY: &str = "birthPrepChecklist";
/// Storage key for the serialized emergency contacts.
pub const CONTACTS_KEY: &str = "birthPrepContacts";
/// Storage key for the serialized financial plan.
pub const FINANCIAL_PLAN_KEY: &str = "birthPrepFinancialPlan";

/// String-keyed store of JSON documents, modelled on browser local storage.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Serializes `value` and stores it under `key`.
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set_item(key, &raw)
}

/// Outcome of reading a JSON document back from a store.
#[derive(Debug)]
pub enum Stored<T> {
    Found(T),
    Missing,
    Unreadable(String),
}

/// Reads and deserializes the document under `key`, classifying failures
/// instead of propagating them.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Stored<T> {
    let raw = match store.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Stored::Missing,
        Err(err) => return Stored::Unreadable(err.to_string()),
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Stored::Found(value),
        Err(err) => Stored::Unreadable(err.to_string()),
    }
}

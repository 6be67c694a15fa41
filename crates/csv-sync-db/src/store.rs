use crate::DbResult;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;

/// String storage port behind every persisted collection
pub trait KeyValueStore {
    fn get(&self, key: &str) -> DbResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> DbResult<()>;

    fn remove(&mut self, key: &str) -> DbResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> DbResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> DbResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> DbResult<()> {
        (**self).remove(key)
    }
}

/// Read and decode the JSON document stored under `key`
pub fn load_json<T, S>(store: &S, key: &str) -> DbResult<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

/// Encode `value` as JSON and store it under `key`
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> DbResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let text = serde_json::to_string(value)?;
    store.set(key, &text)
}

/// Process-local store, mostly for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> DbResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> DbResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

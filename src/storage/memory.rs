use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::error::AppResult;
use crate::storage::KeyValueStorage;

/// In-memory key/value storage, used by tests
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_round_trips() {
        let storage = MemoryStorage::new();

        assert_eq!(storage.get("favorites").await.unwrap(), None);

        storage.set("favorites", "[]").await.unwrap();
        assert_eq!(storage.get("favorites").await.unwrap(), Some("[]".to_string()));
    }
}

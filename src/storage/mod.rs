/// Key/value persistence abstraction
///
/// The favorites blob is a single value under a single key, rewritten in full
/// on every mutation. Backends only need durable get/set of strings; the
/// file-backed implementation is used by the application, the in-memory one
/// by tests.
use crate::error::AppResult;

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Trait for key/value storage backends
#[async_trait::async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Reads the value stored under `key`, or `None` if the key is absent
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Durably stores `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;
}

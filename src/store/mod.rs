//! Persistence layer: a synchronous, namespaced key-value store.
//!
//! [`KeyValueBackend`] is the raw string-in, string-out medium. [`Store`]
//! layers JSON (de)serialization and an application namespace on top of
//! it. The store knows nothing about rooms or bookings; each key holds one
//! opaque JSON document.
//!
//! Two backends ship with the crate: [`MemoryBackend`] for tests and
//! [`FileBackend`] for durable storage on disk.

pub mod file;
pub mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

pub use file::FileBackend;
pub use memory::MemoryBackend;

/// Well-known keys used by the repository.
pub mod keys {
    /// Hotel configuration singleton (JSON object).
    pub const HOTEL_INFO: &str = "roomify-hotel-info";
    /// Room inventory (JSON array).
    pub const ROOMS: &str = "roomify-rooms";
    /// Booking log (JSON array).
    pub const BOOKINGS: &str = "roomify-bookings";
}

/// Raw storage medium.
///
/// Implementations must leave the previous value intact when `set` fails.
pub trait KeyValueBackend: std::fmt::Debug {
    /// Returns the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium rejects the write (for example
    /// [`crate::error::RoomifyError::StorageQuotaExceeded`]).
    fn set(&mut self, key: &str, value: String) -> Result<()>;

    /// Deletes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be modified.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Returns `true` if `key` holds a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// JSON store scoped to one application namespace.
#[derive(Debug)]
pub struct Store<B> {
    backend: B,
    namespace: String,
}

impl<B: KeyValueBackend> Store<B> {
    /// Wraps `backend`, prefixing every key with `namespace`.
    #[must_use]
    pub fn new(backend: B, namespace: impl Into<String>) -> Self {
        Self {
            backend,
            namespace: namespace.into(),
        }
    }

    /// Returns the namespace this store writes under.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the underlying backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the underlying backend mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn qualify(&self, key: &str) -> String {
        format!("{}.{key}", self.namespace)
    }

    /// Reads the list stored under `key`. An absent key or a stored `null`
    /// is an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the stored JSON does not
    /// decode as a list of `T`.
    pub fn read_records<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        Ok(self
            .read_object::<Option<Vec<T>>>(key)?
            .flatten()
            .unwrap_or_default())
    }

    /// Replaces the list stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the backend rejects the write.
    pub fn write_records<T: Serialize>(&mut self, key: &str, records: &[T]) -> Result<()> {
        self.write_object(key, records)
    }

    /// Reads the single value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the stored JSON does not
    /// decode as `T`.
    pub fn read_object<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let qualified = self.qualify(key);
        let Some(raw) = self.backend.get(&qualified)? else {
            tracing::debug!(key = %qualified, "key absent");
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Replaces the single value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the backend rejects the write.
    pub fn write_object<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let qualified = self.qualify(key);
        let raw = serde_json::to_string(value)?;
        let bytes = raw.len();
        self.backend.set(&qualified, raw).inspect_err(|err| {
            tracing::warn!(key = %qualified, bytes, error = %err, "store write rejected");
        })?;
        tracing::debug!(key = %qualified, bytes, "store write");
        Ok(())
    }

    /// Returns `true` if `key` holds a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn contains(&self, key: &str) -> Result<bool> {
        self.backend.contains(&self.qualify(key))
    }

    /// Deletes `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be modified.
    pub fn remove(&mut self, key: &str) -> Result<()> {
        let qualified = self.qualify(key);
        self.backend.remove(&qualified)
    }
}

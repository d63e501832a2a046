//! In-memory backend with an optional byte quota.

use std::collections::HashMap;

use super::KeyValueBackend;
use crate::error::{Result, RoomifyError};

/// `HashMap`-backed store.
///
/// With a quota set, a write that would push the total stored size (keys
/// plus values, in bytes) past the limit is rejected and the previous value
/// is kept, mirroring a browser storage area that is full.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryBackend {
    /// Creates an empty, unbounded backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty backend limited to `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(quota),
        }
    }

    /// Changes the byte limit. `None` removes it.
    pub fn set_quota(&mut self, quota: Option<usize>) {
        self.quota = quota;
    }

    /// Returns the total bytes currently stored.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        if let Some(limit) = self.quota {
            let replaced = self.entries.get(key).map_or(0, |old| key.len() + old.len());
            let required = self
                .used_bytes()
                .saturating_sub(replaced)
                .saturating_add(key.len() + value.len());
            if required > limit {
                return Err(RoomifyError::StorageQuotaExceeded {
                    key: key.to_string(),
                    required,
                    limit,
                });
            }
        }
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.entries.contains_key(key))
    }
}

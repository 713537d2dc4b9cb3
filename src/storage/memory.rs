use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use super::{Storage, StorageError};

#[derive(Debug, Clone)]
struct Entry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

/// In-process [`Storage`] backed by a concurrent map.
///
/// Expired entries are invisible to reads and removed lazily; call
/// [`purge_expired`](Self::purge_expired) to reclaim them eagerly. Clones
/// share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<DashMap<String, Entry>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.iter().filter(|e| e.is_live(now)).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every expired entry, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, e| e.is_live(now));
        let purged = before.saturating_sub(self.entries.len());
        if purged > 0 {
            debug!(purged = purged, "Purged expired storage entries");
        }
        purged
    }
}

impl Storage for MemoryStorage {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            Some(entry) if entry.is_live(now) => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove_if(key, |_, e| !e.is_live(now));
        }
        Ok(None)
    }

    fn set_raw(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: None,
            },
        );
        Ok(())
    }

    fn del(&self, key: &str) {
        self.entries.remove(key);
    }

    fn set_expire_raw(&self, key: &str, value: Vec<u8>, seconds: u64) -> Result<(), StorageError> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value,
                // An unrepresentable deadline means the value never expires.
                expires_at: Instant::now().checked_add(Duration::from_secs(seconds)),
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_set_get_del() {
        let store = MemoryStorage::new();
        store.set_raw("k", b"v".to_vec()).unwrap();
        assert_eq!(store.get_raw("k").unwrap(), Some(b"v".to_vec()));
        store.del("k");
        assert_eq!(store.get_raw("k").unwrap(), None);
        store.del("never-set");
    }

    #[test]
    fn test_zero_second_expiry_is_invisible_and_evicted() {
        let store = MemoryStorage::new();
        store.set_expire_raw("gone", b"v".to_vec(), 0).unwrap();
        assert_eq!(store.get_raw("gone").unwrap(), None);
        assert_eq!(store.entries.len(), 0);
    }

    #[test]
    fn test_purge_expired_keeps_live_entries() {
        let store = MemoryStorage::new();
        store.set_raw("keep", b"1".to_vec()).unwrap();
        store.set_expire_raw("later", b"2".to_vec(), 3600).unwrap();
        store.set_expire_raw("now", b"3".to_vec(), 0).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.entries.len(), 2);
    }

    #[test]
    fn test_set_overwrites_expiry() {
        let store = MemoryStorage::new();
        store.set_expire_raw("k", b"old".to_vec(), 0).unwrap();
        store.set_raw("k", b"new".to_vec()).unwrap();
        assert_eq!(store.get_raw("k").unwrap(), Some(b"new".to_vec()));
    }
}

//! # Storage Module
//!
//! Key-value storage for application state that outlives a request, such as
//! sessions or cached lookups. The dispatcher never touches it; controllers
//! hold a handle to whatever backend the host configured.
//!
//! Backends:
//! - [`MemoryStorage`] - in-process map with per-key expiry
//! - `RedisStorage` - Redis server, behind the `redis` cargo feature
//!
//! [`Storage`] is the object-safe, byte-level contract a backend implements.
//! [`StorageExt`] layers typed access on top, encoding values as JSON:
//!
//! ```rust
//! use gof::storage::{MemoryStorage, StorageExt};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Session { user: String }
//!
//! let store = MemoryStorage::new();
//! store.set("session:1", &Session { user: "ann".into() }).unwrap();
//! let session: Session = store.get("session:1").unwrap();
//! assert_eq!(session.user, "ann");
//! ```

mod memory;
#[cfg(feature = "redis")]
mod redis_store;

pub use memory::MemoryStorage;
#[cfg(feature = "redis")]
pub use redis_store::RedisStorage;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Storage failure
#[derive(Debug)]
pub enum StorageError {
    /// No live value under the key
    NotFound { key: String },
    /// The value could not be encoded or decoded
    Codec {
        key: String,
        source: serde_json::Error,
    },
    /// Backend-specific failure, such as a lost Redis connection
    Backend { key: String, message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound { key } => write!(f, "No value stored under '{key}'"),
            StorageError::Codec { key, source } => {
                write!(f, "Failed to encode or decode value under '{key}': {source}")
            }
            StorageError::Backend { key, message } => {
                write!(f, "Storage backend failed for '{key}': {message}")
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Codec { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Byte-level key-value store.
pub trait Storage: Send + Sync {
    /// Raw value under `key`, `None` when absent or expired.
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    fn set_raw(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;

    /// Remove `key`; removing a missing key is not an error.
    fn del(&self, key: &str);

    /// Store a value that disappears after `seconds`.
    fn set_expire_raw(&self, key: &str, value: Vec<u8>, seconds: u64) -> Result<(), StorageError>;
}

/// Typed access to any [`Storage`], with values encoded as JSON.
pub trait StorageExt: Storage {
    /// Decode the value under `key`.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, StorageError> {
        let bytes = self.get_raw(key)?.ok_or_else(|| StorageError::NotFound {
            key: key.to_string(),
        })?;
        serde_json::from_slice(&bytes).map_err(|source| StorageError::Codec {
            key: key.to_string(),
            source,
        })
    }

    fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = encode(key, value)?;
        self.set_raw(key, bytes)
    }

    fn set_expire<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        seconds: u64,
    ) -> Result<(), StorageError> {
        let bytes = encode(key, value)?;
        self.set_expire_raw(key, bytes, seconds)
    }
}

impl<S: Storage + ?Sized> StorageExt for S {}

fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<Vec<u8>, StorageError> {
    serde_json::to_vec(value).map_err(|source| StorageError::Codec {
        key: key.to_string(),
        source,
    })
}

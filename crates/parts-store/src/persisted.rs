//! Versioned state that is written back after every change.

use crate::{KvStore, StoreError};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;

/// What is actually written under the key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    /// User-defined state.
    pub data: T,
    /// Incremented on every write, starting at 1.
    pub version: u64,
    /// When the state was first written (Unix timestamp).
    pub created_at: i64,
    /// When the state was last written (Unix timestamp).
    pub updated_at: i64,
}

/// A value hydrated from a [`KvStore`] and persisted on every update.
///
/// There is no locking across processes: the last writer wins.
pub struct Persisted<T> {
    store: Arc<dyn KvStore>,
    key: String,
    envelope: Envelope<T>,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Load the value stored under `key`, or start from `T::default()`.
    ///
    /// A stored value that no longer deserializes (e.g. written by an older
    /// build) is logged and replaced by the default on the next write.
    pub fn hydrate(store: Arc<dyn KvStore>, key: impl Into<String>) -> Result<Self, StoreError> {
        let key = key.into();
        let envelope = match store.get(&key)? {
            Some(bytes) => match serde_json::from_slice::<Envelope<T>>(&bytes) {
                Ok(envelope) => {
                    tracing::debug!(key = %key, version = envelope.version, "Hydrated state");
                    envelope
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Discarding unreadable state");
                    fresh_envelope()
                }
            },
            None => fresh_envelope(),
        };

        Ok(Self {
            store,
            key,
            envelope,
        })
    }

    pub fn get(&self) -> &T {
        &self.envelope.data
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Number of writes so far; 0 if never written.
    pub fn version(&self) -> u64 {
        self.envelope.version
    }

    pub fn envelope(&self) -> &Envelope<T> {
        &self.envelope
    }

    /// Apply a mutation and persist the result.
    ///
    /// The closure's return value is passed through. If the write fails the
    /// in-memory value keeps the mutation and the error is returned.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> Result<R, StoreError> {
        let result = f(&mut self.envelope.data);
        self.persist()?;
        Ok(result)
    }

    /// Replace the value and persist it.
    pub fn replace(&mut self, data: T) -> Result<(), StoreError> {
        self.update(|current| *current = data)
    }

    /// Reset to the default value and remove it from the store.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.delete(&self.key)?;
        self.envelope = fresh_envelope();
        Ok(())
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let now = chrono::Utc::now().timestamp();
        if self.envelope.version == 0 {
            self.envelope.created_at = now;
        }
        self.envelope.version += 1;
        self.envelope.updated_at = now;

        let bytes = serde_json::to_vec_pretty(&self.envelope)?;
        self.store.set(&self.key, &bytes)?;
        tracing::trace!(key = %self.key, version = self.envelope.version, "Persisted state");
        Ok(())
    }
}

fn fresh_envelope<T: Default>() -> Envelope<T> {
    Envelope {
        data: T::default(),
        version: 0,
        created_at: 0,
        updated_at: 0,
    }
}

//! # Stores
//!
//! Long-lived services that own the in-memory state and write every change
//! through to the key-value table.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  store.withdraw_product(..).await                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  next = state.clone()                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply operation to next ──── Err ──► return, state untouched          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  persist next (one transaction) ──── Err ──► return, state untouched   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  state = next                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operations take `&mut self`, so one caller runs at a time and each
//! operation completes before the next starts.

pub mod identity;
pub mod inventory;

pub use identity::IdentityStore;
pub use inventory::InventoryStore;

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::DbResult;
use crate::repository::kv::KvRepository;

/// Outcome of reading one stored collection.
#[derive(Debug)]
pub(crate) enum Stored<T> {
    Missing,
    Corrupt,
    Found(T),
}

impl<T> Stored<T> {
    /// The value, or `fallback()` when missing or corrupt.
    pub(crate) fn or_else(self, fallback: impl FnOnce() -> T) -> (T, bool) {
        match self {
            Stored::Found(value) => (value, false),
            Stored::Missing | Stored::Corrupt => (fallback(), true),
        }
    }
}

/// Reads and decodes `key`. Undecodable JSON is reported as corrupt.
pub(crate) async fn read_json<T: DeserializeOwned>(
    kv: &KvRepository,
    key: &str,
) -> DbResult<Stored<T>> {
    let Some(raw) = kv.get(key).await? else {
        return Ok(Stored::Missing);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Stored::Found(value)),
        Err(e) => {
            warn!(key = %key, error = %e, "Stored value is not valid, ignoring it");
            Ok(Stored::Corrupt)
        }
    }
}

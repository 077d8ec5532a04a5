//! # Repository Module
//!
//! Database repository implementations for Almox.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  InventoryStore::withdraw_product(...)                                 │
//! │       │                                                                 │
//! │       │  kv.put_many(&[(PRODUCTS_KEY, ..), (MOVEMENTS_KEY, ..)])       │
//! │       ▼                                                                 │
//! │  KvRepository                                                          │
//! │  ├── get(&self, key)                                                   │
//! │  ├── put(&self, key, value)                                            │
//! │  ├── put_many(&self, entries)    ← one transaction                     │
//! │  ├── remove(&self, key)                                                │
//! │  └── keys(&self)                                                       │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite kv_store table                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`kv::KvRepository`] - JSON collections by fixed key

pub mod kv;

//! # almox-db: Persistence and Store Services for Almox
//!
//! This crate keeps Almox's state across restarts. It stores each
//! collection as JSON text in one SQLite key-value table and wraps the pure
//! `almox-core` rules in write-through stores.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Almox Data Flow                                  │
//! │                                                                         │
//! │  Presentation layer (login form, withdraw dialog, ...)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     almox-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Stores     │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │  (store/)     │    │   (kv.rs)     │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ IdentityStore │───►│ KvRepository  │    │ 001_kv_store │  │   │
//! │  │   │ InventoryStore│    │               │    │              │  │   │
//! │  │   └───────┬───────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │           │ almox-core         │ Database (pool.rs)            │   │
//! │  │           ▼ Roster, Inventory  ▼                               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/almox/almox.db (or AppConfig.storage path)     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Key-value repository
//! - [`store`] - Identity and inventory stores
//! - [`config`] - `almox.toml` and environment configuration
//!
//! ## Usage
//!
//! ```rust,ignore
//! use almox_db::{AppConfig, Database, IdentityStore, InventoryStore};
//!
//! let config = AppConfig::load(None)?;
//! let db = Database::new(config.db_config()).await?;
//!
//! let mut identity = IdentityStore::open(&db).await?;
//! let mut inventory = InventoryStore::open_with(&db, config.seed.sample_data).await?;
//!
//! let user = identity.login("admin@hospital.com", "admin123").await?;
//! inventory.withdraw_product("2", 3, "UTI", &user.name).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::AppConfig;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::kv::KvRepository;
pub use store::{IdentityStore, InventoryStore};

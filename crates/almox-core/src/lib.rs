//! # almox-core: Pure Domain Logic for Almox
//!
//! This crate is the **heart** of Almox, the hospital IT stockroom. It holds
//! the inventory and account rules as plain data plus functions, with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Almox Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Presentation / Routing (external)                │   │
//! │  │   Login ──► Dashboard ──► Products ──► Detail ──► Users         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          almox-db stores: IdentityStore, InventoryStore         │   │
//! │  │      load-or-seed, persist each mutation to SQLite (kv_store)   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ almox-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ inventory │  │ identity  │  │   query   │  │ validation│  │   │
//! │  │   │ Inventory │  │  Roster   │  │  search   │  │   rules   │  │   │
//! │  │   │ movements │  │  session  │  │  summary  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductMovement, Account, etc.)
//! - [`inventory`] - Catalog and movement log operations
//! - [`identity`] - Account roster and session
//! - [`query`] - Search, locations, low stock, dashboard summary
//! - [`seed`] - Default accounts and sample inventory
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: time-dependent operations take `now` as an argument
//! 2. **No I/O**: persistence lives in `almox-db`
//! 3. **All or nothing**: a rejected operation leaves the state untouched
//! 4. **Explicit Errors**: all failures are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use almox_core::{Inventory, CoreError};
//! use almox_core::seed::{sample_movements, sample_products};
//! use chrono::Utc;
//!
//! let mut inventory = Inventory::from_parts(sample_products(), sample_movements());
//!
//! // 3 of the 12 monitors go to the ICU
//! let movement = inventory.withdraw("2", 3, "UTI", "Alice", Utc::now()).unwrap();
//! assert_eq!(movement.quantity, Some(3));
//! assert_eq!(inventory.product("2").unwrap().quantity, 9);
//!
//! // Asking for more than is left fails and changes nothing
//! let err = inventory.withdraw("2", 10, "UTI", "Alice", Utc::now()).unwrap_err();
//! assert!(matches!(err, CoreError::InsufficientStock { available: 9, .. }));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod identity;
pub mod inventory;
pub mod query;
pub mod seed;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use identity::Roster;
pub use inventory::{EditOutcome, Inventory};
pub use query::{CategoryTotal, InventorySummary, ProductQuery, SortOrder};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Suggested locations offered when registering or moving equipment.
///
/// Locations are free text; this list only seeds pickers.
pub const DEFAULT_LOCATIONS: [&str; 9] = [
    "Almoxarifado Central",
    "Almoxarifado TI",
    "Sala de Servidores",
    "Setor Administrativo",
    "Recepção",
    "Bloco A",
    "Bloco B",
    "UTI",
    "Emergência",
];

/// Shown in place of the product name for movements of a deleted product.
pub const REMOVED_PRODUCT_LABEL: &str = "Removed product";

/// Actor recorded for changes not made by a logged-in user.
pub const SYSTEM_ACTOR: &str = "System";

/// Length of the dashboard's recent lists.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

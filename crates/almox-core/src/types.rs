//! # Domain Types
//!
//! Core domain types used throughout Almox.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │ ProductMovement │   │    Account      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │◄──│  product_id     │   │  id (UUID)      │       │
//! │  │  internal_code  │1:N│  movement_type  │   │  email (unique) │       │
//! │  │  quantity       │   │  performed_by   │   │  role           │       │
//! │  │  status         │   │  created_at     │   │  password       │       │
//! │  └─────────────────┘   └─────────────────┘   └───────┬─────────┘       │
//! │                                                      │ public()        │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌───────▼─────────┐       │
//! │  │ProductCategory  │   │ ProductStatus   │   │      User       │       │
//! │  │  computer, ...  │   │  available      │   │  (no password)  │       │
//! │  └─────────────────┘   │  in-use         │   └─────────────────┘       │
//! │                        │  maintenance    │                              │
//! │                        │  discarded      │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Field names are camelCase and timestamps RFC 3339 text, matching the
//! collections persisted under the `inventory_*` storage keys.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a new entity id (UUID v4).
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Product Category
// =============================================================================

/// Closed set of equipment categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Computer,
    Monitor,
    Printer,
    Peripheral,
    Parts,
    Cables,
    Toner,
    Network,
    Other,
}

impl ProductCategory {
    /// All categories, in display order.
    pub const ALL: [ProductCategory; 9] = [
        ProductCategory::Computer,
        ProductCategory::Monitor,
        ProductCategory::Printer,
        ProductCategory::Peripheral,
        ProductCategory::Parts,
        ProductCategory::Cables,
        ProductCategory::Toner,
        ProductCategory::Network,
        ProductCategory::Other,
    ];

    /// Wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Computer => "computer",
            ProductCategory::Monitor => "monitor",
            ProductCategory::Printer => "printer",
            ProductCategory::Peripheral => "peripheral",
            ProductCategory::Parts => "parts",
            ProductCategory::Cables => "cables",
            ProductCategory::Toner => "toner",
            ProductCategory::Network => "network",
            ProductCategory::Other => "other",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Product Status
// =============================================================================

/// Operational state of a physical unit or batch.
///
/// ## Expected Transitions
/// ```text
///   available ◄──────► in-use
///       │  ▲              │
///       │  └──────┐       │
///       ▼         │       ▼
///   maintenance ──┘ ◄─────┘      any non-discarded ──► discarded (terminal)
/// ```
///
/// The generic update path does not enforce this; see
/// [`ProductStatus::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ProductStatus {
    #[default]
    Available,
    InUse,
    Maintenance,
    Discarded,
}

impl ProductStatus {
    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Available => "available",
            ProductStatus::InUse => "in-use",
            ProductStatus::Maintenance => "maintenance",
            ProductStatus::Discarded => "discarded",
        }
    }

    /// Returns true if `next` is one of the expected transitions from `self`.
    ///
    /// Staying in the same state is not a transition.
    pub fn can_transition_to(&self, next: ProductStatus) -> bool {
        use ProductStatus::*;

        match (*self, next) {
            (Discarded, _) => false,
            (_, Discarded) => true,
            (Available, InUse) | (InUse, Available) => true,
            (Available, Maintenance) | (InUse, Maintenance) => true,
            (Maintenance, Available) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Product
// =============================================================================

/// One tracked equipment line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4 for new products).
    pub id: String,

    pub name: String,

    pub category: ProductCategory,

    /// Internal asset code, e.g. "TI-2024-001".
    pub internal_code: String,

    /// Manufacturer serial number. May be blank.
    #[serde(default)]
    pub serial_number: String,

    pub brand: String,

    pub model: String,

    /// Units in stock. Never negative.
    pub quantity: i64,

    /// Low-stock alarm threshold.
    #[serde(default)]
    pub alarm_quantity: Option<i64>,

    /// Where the units are kept.
    pub location: String,

    /// Storage address inside the location (shelf, cabinet). May be blank.
    #[serde(default)]
    pub storage_address: String,

    /// Position inside the storage address. May be blank.
    #[serde(default)]
    pub storage_position: String,

    pub status: ProductStatus,

    #[serde(default)]
    pub observations: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Builds a product from a draft, stamping id and both timestamps.
    pub fn from_draft(draft: NewProduct, now: DateTime<Utc>) -> Self {
        Product {
            id: new_id(),
            name: draft.name,
            category: draft.category,
            internal_code: draft.internal_code,
            serial_number: draft.serial_number,
            brand: draft.brand,
            model: draft.model,
            quantity: draft.quantity,
            alarm_quantity: draft.alarm_quantity,
            location: draft.location,
            storage_address: draft.storage_address,
            storage_position: draft.storage_position,
            status: draft.status,
            observations: draft.observations,
            created_at: now,
            updated_at: now,
        }
    }

    /// True when an alarm threshold is set and the stock has reached it.
    pub fn is_low_stock(&self) -> bool {
        matches!(self.alarm_quantity, Some(alarm) if self.quantity <= alarm)
    }

    /// Merges a patch into this product. Does not touch `updated_at`.
    pub(crate) fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(internal_code) = patch.internal_code {
            self.internal_code = internal_code;
        }
        if let Some(serial_number) = patch.serial_number {
            self.serial_number = serial_number;
        }
        if let Some(brand) = patch.brand {
            self.brand = brand;
        }
        if let Some(model) = patch.model {
            self.model = model;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(alarm_quantity) = patch.alarm_quantity {
            self.alarm_quantity = alarm_quantity;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(storage_address) = patch.storage_address {
            self.storage_address = storage_address;
        }
        if let Some(storage_position) = patch.storage_position {
            self.storage_position = storage_position;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(observations) = patch.observations {
            self.observations = observations;
        }
    }
}

/// Caller-supplied fields for a new product (everything but id/timestamps).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub category: ProductCategory,
    pub internal_code: String,
    #[serde(default)]
    pub serial_number: String,
    pub brand: String,
    pub model: String,
    pub quantity: i64,
    #[serde(default)]
    pub alarm_quantity: Option<i64>,
    pub location: String,
    #[serde(default)]
    pub storage_address: String,
    #[serde(default)]
    pub storage_position: String,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub observations: String,
}

/// Partial update for a product. `None` leaves the field as is.
///
/// `alarm_quantity` is doubly optional: `Some(None)` clears the threshold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<ProductCategory>,
    pub internal_code: Option<String>,
    pub serial_number: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub quantity: Option<i64>,
    pub alarm_quantity: Option<Option<i64>>,
    pub location: Option<String>,
    pub storage_address: Option<String>,
    pub storage_position: Option<String>,
    pub status: Option<ProductStatus>,
    pub observations: Option<String>,
}

// =============================================================================
// Product Movement
// =============================================================================

/// Classification of a movement record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum MovementType {
    Entry,
    Exit,
    Transfer,
    StatusChange,
}

/// Immutable audit-log entry for one stock or status change.
///
/// Payload fields depend on `movement_type`:
/// - entry / exit: `quantity` plus locations
/// - transfer: `from_location` / `to_location`
/// - status-change: `previous_status` / `new_status`
///
/// Use the constructors; they fill exactly the fields of their type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductMovement {
    pub id: String,

    /// Owning product. May point at a deleted product.
    pub product_id: String,

    #[serde(rename = "type")]
    pub movement_type: MovementType,

    /// Human-readable summary.
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub from_location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub to_location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub quantity: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub previous_status: Option<ProductStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub new_status: Option<ProductStatus>,

    /// Display name of the acting user at the time (snapshot, not a key).
    pub performed_by: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl ProductMovement {
    fn blank(
        product_id: &str,
        movement_type: MovementType,
        description: String,
        performed_by: &str,
        now: DateTime<Utc>,
    ) -> Self {
        ProductMovement {
            id: new_id(),
            product_id: product_id.to_string(),
            movement_type,
            description,
            from_location: None,
            to_location: None,
            quantity: None,
            previous_status: None,
            new_status: None,
            performed_by: performed_by.to_string(),
            created_at: now,
        }
    }

    /// Units coming in. `from` is the origin, `to` where they are stored.
    pub fn entry(
        product_id: &str,
        quantity: i64,
        from: Option<&str>,
        to: Option<&str>,
        description: String,
        performed_by: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let mut movement =
            Self::blank(product_id, MovementType::Entry, description, performed_by, now);
        movement.quantity = Some(quantity);
        movement.from_location = from.map(str::to_string);
        movement.to_location = to.map(str::to_string);
        movement
    }

    /// Units going out from `from` to `to`.
    pub fn exit(
        product_id: &str,
        quantity: i64,
        from: &str,
        to: &str,
        description: String,
        performed_by: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let mut movement =
            Self::blank(product_id, MovementType::Exit, description, performed_by, now);
        movement.quantity = Some(quantity);
        movement.from_location = Some(from.to_string());
        movement.to_location = Some(to.to_string());
        movement
    }

    /// Location change of the whole line item.
    pub fn transfer(
        product_id: &str,
        from: &str,
        to: &str,
        description: String,
        performed_by: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let mut movement =
            Self::blank(product_id, MovementType::Transfer, description, performed_by, now);
        movement.from_location = Some(from.to_string());
        movement.to_location = Some(to.to_string());
        movement
    }

    /// Status change from `previous` to `new`.
    pub fn status_change(
        product_id: &str,
        previous: ProductStatus,
        new: ProductStatus,
        description: String,
        performed_by: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let mut movement = Self::blank(
            product_id,
            MovementType::StatusChange,
            description,
            performed_by,
            now,
        );
        movement.previous_status = Some(previous);
        movement.new_status = Some(new);
        movement
    }
}

// =============================================================================
// Users and Accounts
// =============================================================================

/// Permission level of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

/// Public view of an account. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Stored account record, password included (plaintext).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub password: String,
}

impl Account {
    /// Password-stripped copy.
    pub fn public(&self) -> User {
        User {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

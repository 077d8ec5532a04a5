//! # Inventory
//!
//! The product catalog plus its append-only movement log, and every
//! operation that changes them.
//!
//! ## Operation Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  withdraw("2", 3, "UTI", "Alice", now)                                  │
//! │       │                                                                 │
//! │       ├── product missing?      → Err(ProductNotFound)                  │
//! │       ├── quantity <= 0?        → Err(InvalidQuantity)                  │
//! │       ├── quantity > stock?     → Err(InsufficientStock)                │
//! │       │         (nothing changed)                                       │
//! │       ▼                                                                 │
//! │  product.quantity -= 3, product.updated_at = now                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  movements.push(exit { quantity: 3, from: location, to: "UTI" })        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All checks run before the first write, so a rejected operation never
//! leaves a half-applied change behind.

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult};
use crate::types::{NewProduct, Product, ProductMovement, ProductPatch, ProductStatus};
use crate::validation::{validate_new_product, validate_patch, validate_units};
use crate::REMOVED_PRODUCT_LABEL;

/// Product catalog and movement log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    products: Vec<Product>,
    movements: Vec<ProductMovement>,
}

/// Result of [`Inventory::edit_product`].
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    /// The product after the edit.
    pub product: Product,
    /// Movements appended by the edit (status change first, then transfer).
    pub movements: Vec<ProductMovement>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds an inventory from loaded collections.
    pub fn from_parts(products: Vec<Product>, movements: Vec<ProductMovement>) -> Self {
        Inventory {
            products,
            movements,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Movement log in insertion order.
    pub fn movements(&self) -> &[ProductMovement] {
        &self.movements
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    fn product_mut(&mut self, id: &str) -> CoreResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    fn append(&mut self, movement: ProductMovement) -> ProductMovement {
        self.movements.push(movement.clone());
        movement
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Registers a new product and logs an `entry` for its initial stock.
    pub fn create_product(
        &mut self,
        draft: NewProduct,
        performed_by: &str,
        now: DateTime<Utc>,
    ) -> CoreResult<Product> {
        validate_new_product(&draft)?;

        let product = Product::from_draft(draft, now);
        let movement = ProductMovement::entry(
            &product.id,
            product.quantity,
            None,
            Some(&product.location),
            "Product registered in the system".to_string(),
            performed_by,
            now,
        );

        self.products.push(product.clone());
        self.append(movement);
        Ok(product)
    }

    /// Merges `patch` into the product and bumps `updated_at`.
    ///
    /// Appends no movement, and accepts any status value.
    pub fn update_product(
        &mut self,
        id: &str,
        patch: ProductPatch,
        now: DateTime<Utc>,
    ) -> CoreResult<Product> {
        validate_patch(&patch)?;

        let product = self.product_mut(id)?;
        product.apply(patch);
        product.updated_at = now;
        Ok(product.clone())
    }

    /// Edit flow: applies `patch` and logs what changed.
    ///
    /// A changed status appends a `status-change`, a changed location a
    /// `transfer`, both compared against the values before the edit.
    pub fn edit_product(
        &mut self,
        id: &str,
        patch: ProductPatch,
        performed_by: &str,
        now: DateTime<Utc>,
    ) -> CoreResult<EditOutcome> {
        let (old_status, old_location) = {
            let product = self
                .product(id)
                .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;
            (product.status, product.location.clone())
        };

        let product = self.update_product(id, patch, now)?;
        let mut appended = Vec::new();

        if product.status != old_status {
            appended.push(self.append(ProductMovement::status_change(
                id,
                old_status,
                product.status,
                format!("Status changed from {} to {}", old_status, product.status),
                performed_by,
                now,
            )));
        }

        if product.location != old_location {
            appended.push(self.append(ProductMovement::transfer(
                id,
                &old_location,
                &product.location,
                format!("Transferred to {}", product.location),
                performed_by,
                now,
            )));
        }

        Ok(EditOutcome {
            product,
            movements: appended,
        })
    }

    /// Removes a product. Its movements stay in the log.
    pub fn delete_product(&mut self, id: &str) -> CoreResult<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;
        Ok(self.products.remove(index))
    }

    // =========================================================================
    // Stock
    // =========================================================================

    /// Takes `quantity` units out of stock towards `destination`.
    pub fn withdraw(
        &mut self,
        id: &str,
        quantity: i64,
        destination: &str,
        performed_by: &str,
        now: DateTime<Utc>,
    ) -> CoreResult<ProductMovement> {
        let product = self.product_mut(id)?;

        if validate_units(quantity).is_err() {
            return Err(CoreError::InvalidQuantity(quantity));
        }
        if quantity > product.quantity {
            return Err(CoreError::InsufficientStock {
                product_id: id.to_string(),
                available: product.quantity,
                requested: quantity,
            });
        }

        product.quantity -= quantity;
        product.updated_at = now;
        let from = product.location.clone();

        Ok(self.append(ProductMovement::exit(
            id,
            quantity,
            &from,
            destination,
            format!("Withdrawal of {} unit(s) to {}", quantity, destination),
            performed_by,
            now,
        )))
    }

    /// Adds `quantity` units received from `origin`.
    pub fn add_units(
        &mut self,
        id: &str,
        quantity: i64,
        origin: &str,
        performed_by: &str,
        now: DateTime<Utc>,
    ) -> CoreResult<ProductMovement> {
        let product = self.product_mut(id)?;

        if validate_units(quantity).is_err() {
            return Err(CoreError::InvalidQuantity(quantity));
        }
        let stock = product
            .quantity
            .checked_add(quantity)
            .ok_or_else(|| CoreError::StockOverflow {
                product_id: id.to_string(),
                stock: product.quantity,
                adding: quantity,
            })?;

        product.quantity = stock;
        product.updated_at = now;
        let to = product.location.clone();

        Ok(self.append(ProductMovement::entry(
            id,
            quantity,
            Some(origin),
            Some(&to),
            format!("Addition of {} unit(s) from {}", quantity, origin),
            performed_by,
            now,
        )))
    }

    // =========================================================================
    // Maintenance
    // =========================================================================

    /// Sends a product to maintenance, recording `reason` in the log.
    pub fn transfer_to_maintenance(
        &mut self,
        id: &str,
        reason: &str,
        performed_by: &str,
        now: DateTime<Utc>,
    ) -> CoreResult<ProductMovement> {
        let product = self.product_mut(id)?;
        let previous = product.status;

        product.status = ProductStatus::Maintenance;
        product.updated_at = now;

        Ok(self.append(ProductMovement::status_change(
            id,
            previous,
            ProductStatus::Maintenance,
            format!("Sent to maintenance: {}", reason),
            performed_by,
            now,
        )))
    }

    /// Brings a product in maintenance back to `available`.
    pub fn return_from_maintenance(
        &mut self,
        id: &str,
        performed_by: &str,
        now: DateTime<Utc>,
    ) -> CoreResult<ProductMovement> {
        let product = self.product_mut(id)?;

        if product.status != ProductStatus::Maintenance {
            return Err(CoreError::NotInMaintenance {
                product_id: id.to_string(),
                status: product.status,
            });
        }

        product.status = ProductStatus::Available;
        product.updated_at = now;

        Ok(self.append(ProductMovement::status_change(
            id,
            ProductStatus::Maintenance,
            ProductStatus::Available,
            "Returned from maintenance".to_string(),
            performed_by,
            now,
        )))
    }

    // =========================================================================
    // Movement Log
    // =========================================================================

    /// Movements of one product, newest first. Equal timestamps keep
    /// insertion order.
    pub fn movements_for(&self, product_id: &str) -> Vec<&ProductMovement> {
        let mut found: Vec<&ProductMovement> = self
            .movements
            .iter()
            .filter(|m| m.product_id == product_id)
            .collect();
        // sort_by is stable
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }

    /// The whole log, newest first.
    pub fn recent_movements(&self, limit: usize) -> Vec<&ProductMovement> {
        let mut all: Vec<&ProductMovement> = self.movements.iter().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all.truncate(limit);
        all
    }

    /// Name of the product a movement belongs to, or
    /// [`REMOVED_PRODUCT_LABEL`] if it has been deleted.
    pub fn product_name_for(&self, movement: &ProductMovement) -> &str {
        self.product(&movement.product_id)
            .map(|p| p.name.as_str())
            .unwrap_or(REMOVED_PRODUCT_LABEL)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

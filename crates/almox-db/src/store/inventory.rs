//! # Inventory Store
//!
//! Product catalog and movement log, persisted under `inventory_products`
//! and `inventory_movements`. Every mutation writes both keys in one
//! transaction.

use almox_core::seed::{sample_movements, sample_products};
use almox_core::{
    CoreResult, EditOutcome, Inventory, InventorySummary, NewProduct, Product, ProductMovement,
    ProductPatch, ProductQuery,
};
use chrono::Utc;
use tracing::{debug, info};

use super::read_json;
use crate::error::DbResult;
use crate::pool::Database;
use crate::repository::kv::{KvRepository, MOVEMENTS_KEY, PRODUCTS_KEY};

/// Inventory with write-through persistence.
#[derive(Debug)]
pub struct InventoryStore {
    kv: KvRepository,
    inventory: Inventory,
}

impl InventoryStore {
    /// Loads the inventory, seeding the sample catalog where nothing usable
    /// is stored.
    pub async fn open(db: &Database) -> DbResult<Self> {
        Self::open_with(db, true).await
    }

    /// Like [`InventoryStore::open`]. With `sample_data` false, a missing or
    /// corrupt collection starts empty instead of with samples.
    pub async fn open_with(db: &Database, sample_data: bool) -> DbResult<Self> {
        let kv = db.kv();

        let (products, seeded_products) =
            read_json::<Vec<Product>>(&kv, PRODUCTS_KEY)
                .await?
                .or_else(|| if sample_data { sample_products() } else { Vec::new() });

        let (movements, seeded_movements) =
            read_json::<Vec<ProductMovement>>(&kv, MOVEMENTS_KEY)
                .await?
                .or_else(|| if sample_data { sample_movements() } else { Vec::new() });

        let store = InventoryStore {
            kv,
            inventory: Inventory::from_parts(products, movements),
        };

        if seeded_products || seeded_movements {
            info!(
                products = seeded_products,
                movements = seeded_movements,
                sample_data,
                "Seeding inventory collections"
            );
            store.persist(&store.inventory).await?;
        }

        debug!(
            products = store.inventory.products().len(),
            movements = store.inventory.movements().len(),
            "Inventory store opened"
        );

        Ok(store)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The in-memory inventory.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn products(&self) -> &[Product] {
        self.inventory.products()
    }

    pub fn movements(&self) -> &[ProductMovement] {
        self.inventory.movements()
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.inventory.product(id)
    }

    /// Movements of one product, newest first.
    pub fn list_movements_for(&self, product_id: &str) -> Vec<ProductMovement> {
        self.inventory
            .movements_for(product_id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn search(&self, query: &ProductQuery) -> Vec<&Product> {
        self.inventory.search(query)
    }

    pub fn locations(&self) -> Vec<String> {
        self.inventory.locations()
    }

    pub fn low_stock(&self) -> Vec<&Product> {
        self.inventory.low_stock()
    }

    pub fn summary(&self, recent: usize) -> InventorySummary {
        self.inventory.summary(recent)
    }

    pub fn product_name_for(&self, movement: &ProductMovement) -> &str {
        self.inventory.product_name_for(movement)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub async fn create_product(
        &mut self,
        draft: NewProduct,
        performed_by: &str,
    ) -> DbResult<Product> {
        let product = self
            .commit(|inv| inv.create_product(draft, performed_by, Utc::now()))
            .await?;

        info!(product_id = %product.id, quantity = product.quantity, "Product created");
        Ok(product)
    }

    /// Merges `patch` without logging a movement.
    pub async fn update_product(&mut self, id: &str, patch: ProductPatch) -> DbResult<Product> {
        let product = self
            .commit(|inv| inv.update_product(id, patch, Utc::now()))
            .await?;

        info!(product_id = %id, "Product updated");
        Ok(product)
    }

    /// Merges `patch` and logs status and location changes.
    pub async fn edit_product(
        &mut self,
        id: &str,
        patch: ProductPatch,
        performed_by: &str,
    ) -> DbResult<EditOutcome> {
        let outcome = self
            .commit(|inv| inv.edit_product(id, patch, performed_by, Utc::now()))
            .await?;

        info!(
            product_id = %id,
            movements = outcome.movements.len(),
            "Product edited"
        );
        Ok(outcome)
    }

    /// Removes a product; its movements stay.
    pub async fn delete_product(&mut self, id: &str) -> DbResult<Product> {
        let product = self.commit(|inv| inv.delete_product(id)).await?;

        info!(product_id = %id, "Product deleted");
        Ok(product)
    }

    pub async fn withdraw_product(
        &mut self,
        id: &str,
        quantity: i64,
        destination: &str,
        performed_by: &str,
    ) -> DbResult<ProductMovement> {
        let movement = self
            .commit(|inv| inv.withdraw(id, quantity, destination, performed_by, Utc::now()))
            .await?;

        info!(product_id = %id, quantity, destination = %destination, "Units withdrawn");
        Ok(movement)
    }

    pub async fn add_units_to_product(
        &mut self,
        id: &str,
        quantity: i64,
        origin: &str,
        performed_by: &str,
    ) -> DbResult<ProductMovement> {
        let movement = self
            .commit(|inv| inv.add_units(id, quantity, origin, performed_by, Utc::now()))
            .await?;

        info!(product_id = %id, quantity, origin = %origin, "Units added");
        Ok(movement)
    }

    pub async fn transfer_to_maintenance(
        &mut self,
        id: &str,
        reason: &str,
        performed_by: &str,
    ) -> DbResult<ProductMovement> {
        let movement = self
            .commit(|inv| inv.transfer_to_maintenance(id, reason, performed_by, Utc::now()))
            .await?;

        info!(product_id = %id, "Sent to maintenance");
        Ok(movement)
    }

    pub async fn return_from_maintenance(
        &mut self,
        id: &str,
        performed_by: &str,
    ) -> DbResult<ProductMovement> {
        let movement = self
            .commit(|inv| inv.return_from_maintenance(id, performed_by, Utc::now()))
            .await?;

        info!(product_id = %id, "Returned from maintenance");
        Ok(movement)
    }

    /// Applies `op` to a copy, persists the copy, then adopts it.
    async fn commit<T>(
        &mut self,
        op: impl FnOnce(&mut Inventory) -> CoreResult<T>,
    ) -> DbResult<T> {
        let mut next = self.inventory.clone();
        let out = op(&mut next)?;

        self.persist(&next).await?;
        self.inventory = next;
        Ok(out)
    }

    async fn persist(&self, inventory: &Inventory) -> DbResult<()> {
        self.kv
            .put_many(&[
                (PRODUCTS_KEY, serde_json::to_string(inventory.products())?),
                (MOVEMENTS_KEY, serde_json::to_string(inventory.movements())?),
            ])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use crate::DbError;
    use almox_core::{CoreError, MovementType, ProductStatus};

    async fn open() -> (Database, InventoryStore) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = InventoryStore::open(&db).await.unwrap();
        (db, store)
    }

    #[tokio::test]
    async fn test_open_seeds_samples_and_writes_back() {
        let (db, store) = open().await;

        assert_eq!(store.products().len(), 6);
        assert_eq!(store.movements().len(), 2);
        assert!(db.kv().get(PRODUCTS_KEY).await.unwrap().is_some());
        assert!(db.kv().get(MOVEMENTS_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_open_without_sample_data() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = InventoryStore::open_with(&db, false).await.unwrap();

        assert!(store.products().is_empty());
        assert_eq!(db.kv().get(PRODUCTS_KEY).await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_corrupt_products_fall_back_to_samples() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.kv().put(PRODUCTS_KEY, "[{\"id\": 1").await.unwrap();
        db.kv().put(MOVEMENTS_KEY, "[]").await.unwrap();

        let store = InventoryStore::open(&db).await.unwrap();

        assert_eq!(store.products().len(), 6);
        assert!(store.movements().is_empty());
    }

    #[tokio::test]
    async fn test_withdraw_persists() {
        let (db, mut store) = open().await;

        let movement = store.withdraw_product("2", 3, "UTI", "Alice").await.unwrap();
        assert_eq!(movement.movement_type, MovementType::Exit);

        let reopened = InventoryStore::open(&db).await.unwrap();
        assert_eq!(reopened.product("2").unwrap().quantity, 9);
        assert_eq!(reopened.list_movements_for("2")[0].id, movement.id);
    }

    #[tokio::test]
    async fn test_rejected_operation_changes_nothing() {
        let (db, mut store) = open().await;
        let stored_before = db.kv().get(PRODUCTS_KEY).await.unwrap();

        let err = store.withdraw_product("2", 50, "UTI", "Alice").await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InsufficientStock { available: 12, .. })
        ));

        let err = store.return_from_maintenance("1", "Alice").await.unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::NotInMaintenance { .. })));

        assert_eq!(store.product("2").unwrap().quantity, 12);
        assert_eq!(store.movements().len(), 2);
        assert_eq!(db.kv().get(PRODUCTS_KEY).await.unwrap(), stored_before);
    }

    #[tokio::test]
    async fn test_edit_logs_changes() {
        let (_db, mut store) = open().await;

        let patch = ProductPatch {
            status: Some(ProductStatus::InUse),
            location: Some("UTI".to_string()),
            ..Default::default()
        };
        let outcome = store.edit_product("1", patch, "Alice").await.unwrap();

        assert_eq!(outcome.movements.len(), 2);
        assert_eq!(store.list_movements_for("1").len(), 2);
    }

    #[tokio::test]
    async fn test_delete_keeps_history() {
        let (db, mut store) = open().await;

        store.delete_product("6").await.unwrap();

        let reopened = InventoryStore::open(&db).await.unwrap();
        assert!(reopened.product("6").is_none());
        let history = reopened.list_movements_for("6");
        assert_eq!(history.len(), 1);
        assert_eq!(reopened.product_name_for(&history[0]), almox_core::REMOVED_PRODUCT_LABEL);
    }
}

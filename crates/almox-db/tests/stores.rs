//! End-to-end store scenarios against in-memory and file databases.

use almox_core::{
    CoreError, MovementType, NewProduct, ProductCategory, ProductQuery, ProductStatus, UserRole,
};
use almox_db::{Database, DbConfig, DbError, IdentityStore, InventoryStore};

fn mouse_batch() -> NewProduct {
    NewProduct {
        name: "Mouse USB Logitech".to_string(),
        category: ProductCategory::Peripheral,
        internal_code: "TI-2024-120".to_string(),
        serial_number: String::new(),
        brand: "Logitech".to_string(),
        model: "M90".to_string(),
        quantity: 10,
        alarm_quantity: Some(3),
        location: "Almoxarifado TI".to_string(),
        storage_address: "Armário 2".to_string(),
        storage_position: "Prateleira B".to_string(),
        status: ProductStatus::Available,
        observations: String::new(),
    }
}

#[tokio::test]
async fn withdraw_scenario_with_logged_in_user() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let mut identity = IdentityStore::open(&db).await.unwrap();
    let mut inventory = InventoryStore::open(&db).await.unwrap();

    let alice = identity
        .create_account("Alice", "alice@hospital.com", "s3cret", UserRole::User)
        .await
        .unwrap();
    let user = identity.login("alice@hospital.com", "s3cret").await.unwrap();
    assert_eq!(user, alice);
    assert!(!identity.is_admin());

    let product = inventory
        .create_product(mouse_batch(), &user.name)
        .await
        .unwrap();

    let exit = inventory
        .withdraw_product(&product.id, 3, "UTI", &user.name)
        .await
        .unwrap();
    assert_eq!(exit.performed_by, "Alice");
    assert_eq!(exit.to_location.as_deref(), Some("UTI"));
    assert_eq!(inventory.product(&product.id).unwrap().quantity, 7);

    let err = inventory
        .withdraw_product(&product.id, 10, "UTI", &user.name)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DbError::Domain(CoreError::InsufficientStock { available: 7, requested: 10, .. })
    ));

    let history = inventory.list_movements_for(&product.id);
    assert_eq!(history.len(), 2);
    assert!(history
        .iter()
        .any(|m| m.movement_type == MovementType::Entry && m.quantity == Some(10)));
}

#[tokio::test]
async fn maintenance_cycle_and_search() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let mut inventory = InventoryStore::open(&db).await.unwrap();

    inventory
        .transfer_to_maintenance("2", "Sem imagem", "Bob")
        .await
        .unwrap();

    let in_maintenance = inventory.search(&ProductQuery {
        status: Some(ProductStatus::Maintenance),
        ..Default::default()
    });
    assert_eq!(in_maintenance.len(), 2);

    let back = inventory.return_from_maintenance("2", "Bob").await.unwrap();
    assert_eq!(back.previous_status, Some(ProductStatus::Maintenance));
    assert_eq!(back.new_status, Some(ProductStatus::Available));
    assert_eq!(inventory.product("2").unwrap().status, ProductStatus::Available);
}

#[tokio::test]
async fn state_survives_reopen_of_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("almox.db");

    let product_id = {
        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let mut identity = IdentityStore::open(&db).await.unwrap();
        let mut inventory = InventoryStore::open(&db).await.unwrap();

        identity.login("admin@hospital.com", "admin123").await.unwrap();
        let product = inventory
            .create_product(mouse_batch(), "Administrador")
            .await
            .unwrap();
        inventory
            .add_units_to_product(&product.id, 5, "Fornecedor", "Administrador")
            .await
            .unwrap();
        inventory.delete_product("1").await.unwrap();

        db.close().await;
        product.id
    };

    let db = Database::new(DbConfig::new(&path)).await.unwrap();
    let identity = IdentityStore::open(&db).await.unwrap();
    let inventory = InventoryStore::open(&db).await.unwrap();

    assert!(identity.is_admin());
    assert_eq!(inventory.products().len(), 6);
    assert_eq!(inventory.product(&product_id).unwrap().quantity, 15);
    assert!(inventory.product("1").is_none());
    assert_eq!(inventory.list_movements_for(&product_id).len(), 2);
}

#[tokio::test]
async fn emptied_catalog_stays_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("almox.db");

    {
        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let mut inventory = InventoryStore::open(&db).await.unwrap();
        for id in ["1", "2", "3", "4", "5", "6"] {
            inventory.delete_product(id).await.unwrap();
        }
        db.close().await;
    }

    let db = Database::new(DbConfig::new(&path)).await.unwrap();
    let inventory = InventoryStore::open(&db).await.unwrap();
    assert!(inventory.products().is_empty());
    assert_eq!(inventory.movements().len(), 2);
}

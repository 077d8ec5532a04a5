//! # Seed Data
//!
//! Records a fresh installation starts with: two login accounts, six sample
//! products and their two sample movements. Ids are fixed so the movements
//! point at the right products.

use chrono::{DateTime, TimeZone, Utc};

use crate::types::{
    Account, MovementType, Product, ProductCategory, ProductMovement, ProductStatus, UserRole,
};

/// Midnight UTC on the given day.
fn day(year: i32, month: u32, date: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, date, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// The admin and regular account every installation starts with.
pub fn default_accounts() -> Vec<Account> {
    vec![
        Account {
            id: "1".to_string(),
            name: "Administrador".to_string(),
            email: "admin@hospital.com".to_string(),
            role: UserRole::Admin,
            password: "admin123".to_string(),
        },
        Account {
            id: "2".to_string(),
            name: "Usuário TI".to_string(),
            email: "user@hospital.com".to_string(),
            role: UserRole::User,
            password: "user123".to_string(),
        },
    ]
}

struct SampleProduct {
    id: &'static str,
    name: &'static str,
    category: ProductCategory,
    internal_code: &'static str,
    serial_number: &'static str,
    brand: &'static str,
    model: &'static str,
    quantity: i64,
    location: &'static str,
    status: ProductStatus,
    observations: &'static str,
    created: (i32, u32, u32),
    updated: (i32, u32, u32),
}

impl SampleProduct {
    fn build(self) -> Product {
        let (cy, cm, cd) = self.created;
        let (uy, um, ud) = self.updated;
        Product {
            id: self.id.to_string(),
            name: self.name.to_string(),
            category: self.category,
            internal_code: self.internal_code.to_string(),
            serial_number: self.serial_number.to_string(),
            brand: self.brand.to_string(),
            model: self.model.to_string(),
            quantity: self.quantity,
            alarm_quantity: None,
            location: self.location.to_string(),
            storage_address: String::new(),
            storage_position: String::new(),
            status: self.status,
            observations: self.observations.to_string(),
            created_at: day(cy, cm, cd),
            updated_at: day(uy, um, ud),
        }
    }
}

/// Sample catalog, ids "1" through "6".
pub fn sample_products() -> Vec<Product> {
    let samples = [
        SampleProduct {
            id: "1",
            name: "Dell OptiPlex 7090",
            category: ProductCategory::Computer,
            internal_code: "TI-2024-001",
            serial_number: "DELL7090X123",
            brand: "Dell",
            model: "OptiPlex 7090",
            quantity: 5,
            location: "Almoxarifado Central",
            status: ProductStatus::Available,
            observations: "Lote recebido em janeiro/2024",
            created: (2024, 1, 15),
            updated: (2024, 1, 15),
        },
        SampleProduct {
            id: "2",
            name: "Monitor LG 24\"",
            category: ProductCategory::Monitor,
            internal_code: "TI-2024-002",
            serial_number: "LG24MK430H",
            brand: "LG",
            model: "24MK430H",
            quantity: 12,
            location: "Almoxarifado Central",
            status: ProductStatus::Available,
            observations: "",
            created: (2024, 1, 20),
            updated: (2024, 1, 20),
        },
        SampleProduct {
            id: "3",
            name: "Impressora HP LaserJet Pro",
            category: ProductCategory::Printer,
            internal_code: "TI-2023-089",
            serial_number: "HPLJ4015DN",
            brand: "HP",
            model: "LaserJet Pro M404dn",
            quantity: 1,
            location: "Setor Administrativo",
            status: ProductStatus::InUse,
            observations: "Instalada na recepção principal",
            created: (2023, 6, 10),
            updated: (2024, 2, 1),
        },
        SampleProduct {
            id: "4",
            name: "Teclado USB Logitech",
            category: ProductCategory::Peripheral,
            internal_code: "TI-2024-015",
            serial_number: "LOGK120-BATCH",
            brand: "Logitech",
            model: "K120",
            quantity: 25,
            location: "Almoxarifado TI",
            status: ProductStatus::Available,
            observations: "Estoque de reposição",
            created: (2024, 2, 1),
            updated: (2024, 2, 1),
        },
        SampleProduct {
            id: "5",
            name: "Switch Cisco 24 portas",
            category: ProductCategory::Network,
            internal_code: "TI-2022-045",
            serial_number: "CISCO2960X",
            brand: "Cisco",
            model: "Catalyst 2960-X",
            quantity: 1,
            location: "Sala de Servidores",
            status: ProductStatus::InUse,
            observations: "Switch principal do bloco B",
            created: (2022, 3, 15),
            updated: (2024, 1, 10),
        },
        SampleProduct {
            id: "6",
            name: "Notebook Lenovo ThinkPad",
            category: ProductCategory::Computer,
            internal_code: "TI-2023-067",
            serial_number: "LENOVOT14S",
            brand: "Lenovo",
            model: "ThinkPad T14s",
            quantity: 1,
            location: "Assistência Técnica Externa",
            status: ProductStatus::Maintenance,
            observations: "Enviado para troca de tela - previsão 15 dias",
            created: (2023, 8, 20),
            updated: (2024, 2, 10),
        },
    ];

    samples.into_iter().map(SampleProduct::build).collect()
}

/// Sample movement log for the sample catalog.
pub fn sample_movements() -> Vec<ProductMovement> {
    vec![
        ProductMovement {
            id: "1".to_string(),
            product_id: "3".to_string(),
            movement_type: MovementType::Transfer,
            description: "Transferência para Setor Administrativo".to_string(),
            from_location: Some("Almoxarifado Central".to_string()),
            to_location: Some("Setor Administrativo".to_string()),
            quantity: None,
            previous_status: None,
            new_status: None,
            performed_by: "João Silva".to_string(),
            created_at: day(2024, 2, 1),
        },
        ProductMovement {
            id: "2".to_string(),
            product_id: "6".to_string(),
            movement_type: MovementType::StatusChange,
            description: "Enviado para manutenção externa".to_string(),
            from_location: None,
            to_location: None,
            quantity: None,
            previous_status: Some(ProductStatus::InUse),
            new_status: Some(ProductStatus::Maintenance),
            performed_by: "Maria Santos".to_string(),
            created_at: day(2024, 2, 10),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_movements_reference_sample_products() {
        let products = sample_products();
        for movement in sample_movements() {
            assert!(products.iter().any(|p| p.id == movement.product_id));
        }
    }

    #[test]
    fn test_sample_dates_are_midnight_utc() {
        let products = sample_products();
        assert_eq!(
            products[0].created_at.to_rfc3339(),
            "2024-01-15T00:00:00+00:00"
        );
        assert!(products.iter().all(|p| p.updated_at >= p.created_at));
    }

    #[test]
    fn test_default_accounts() {
        let accounts = default_accounts();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].role, UserRole::Admin);
        assert_eq!(accounts[1].email, "user@hospital.com");
    }
}

//! # Queries
//!
//! Read-only views over an [`Inventory`]: product search, location list,
//! low-stock report and the dashboard summary.
//!
//! ## Search Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products ──► text match ──► category ──► status ──► location ──► sort │
//! │                  │              │           │           │              │
//! │        name, internal code,   None = any  None = any  None = any       │
//! │        serial, brand, model                                             │
//! │        (case-insensitive)                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::inventory::Inventory;
use crate::types::{Product, ProductCategory, ProductMovement, ProductStatus};

// =============================================================================
// Product Search
// =============================================================================

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    NameAsc,
    NameDesc,
    DateAsc,
    DateDesc,
    QuantityAsc,
    QuantityDesc,
    BrandAsc,
    BrandDesc,
}

impl SortOrder {
    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOrder::NameAsc => text_cmp(&a.name, &b.name),
            SortOrder::NameDesc => text_cmp(&b.name, &a.name),
            SortOrder::DateAsc => a.created_at.cmp(&b.created_at),
            SortOrder::DateDesc => b.created_at.cmp(&a.created_at),
            SortOrder::QuantityAsc => a.quantity.cmp(&b.quantity),
            SortOrder::QuantityDesc => b.quantity.cmp(&a.quantity),
            SortOrder::BrandAsc => text_cmp(&a.brand, &b.brand),
            SortOrder::BrandDesc => text_cmp(&b.brand, &a.brand),
        }
    }
}

/// Case-insensitive ordering, falling back to the raw text on ties.
fn text_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Filters for [`Inventory::search`]. `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    /// Free text; blank matches everything.
    #[serde(default)]
    pub text: String,
    pub category: Option<ProductCategory>,
    pub status: Option<ProductStatus>,
    pub location: Option<String>,
    #[serde(default)]
    pub sort: SortOrder,
}

impl ProductQuery {
    fn matches(&self, product: &Product, needle: &str) -> bool {
        if !needle.is_empty() {
            let hit = [
                &product.name,
                &product.internal_code,
                &product.serial_number,
                &product.brand,
                &product.model,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(needle));
            if !hit {
                return false;
            }
        }

        self.category.map_or(true, |c| product.category == c)
            && self.status.map_or(true, |s| product.status == s)
            && self
                .location
                .as_deref()
                .map_or(true, |l| product.location == l)
    }
}

// =============================================================================
// Dashboard Summary
// =============================================================================

/// Units held in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: ProductCategory,
    pub units: i64,
}

/// Dashboard numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_products: usize,
    pub available: usize,
    pub in_use: usize,
    pub maintenance: usize,
    pub discarded: usize,
    /// Sum of all product quantities, saturating.
    pub total_units: i64,
    /// Categories holding units, largest first.
    pub units_by_category: Vec<CategoryTotal>,
    /// Most recently updated products.
    pub recent_products: Vec<Product>,
    /// Newest movements.
    pub recent_movements: Vec<ProductMovement>,
}

// =============================================================================
// Inventory Views
// =============================================================================

impl Inventory {
    /// Products matching `query`, in the requested order.
    pub fn search(&self, query: &ProductQuery) -> Vec<&Product> {
        let needle = query.text.trim().to_lowercase();

        let mut found: Vec<&Product> = self
            .products()
            .iter()
            .filter(|p| query.matches(p, &needle))
            .collect();
        found.sort_by(|a, b| query.sort.compare(a, b));
        found
    }

    /// Distinct product locations, sorted.
    pub fn locations(&self) -> Vec<String> {
        self.products()
            .iter()
            .map(|p| p.location.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Products at or below their alarm threshold.
    pub fn low_stock(&self) -> Vec<&Product> {
        self.products().iter().filter(|p| p.is_low_stock()).collect()
    }

    /// Dashboard numbers. `recent` caps both recent lists.
    ///
    /// Unit totals saturate at `i64::MAX`.
    pub fn summary(&self, recent: usize) -> InventorySummary {
        let products = self.products();
        let count = |status: ProductStatus| products.iter().filter(|p| p.status == status).count();

        let mut by_category: BTreeMap<ProductCategory, i64> = BTreeMap::new();
        for product in products {
            let units = by_category.entry(product.category).or_insert(0);
            *units = units.saturating_add(product.quantity);
        }
        let mut units_by_category: Vec<CategoryTotal> = by_category
            .into_iter()
            .map(|(category, units)| CategoryTotal { category, units })
            .collect();
        units_by_category.sort_by(|a, b| b.units.cmp(&a.units));

        let mut recent_products: Vec<Product> = products.to_vec();
        recent_products.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        recent_products.truncate(recent);

        InventorySummary {
            total_products: products.len(),
            available: count(ProductStatus::Available),
            in_use: count(ProductStatus::InUse),
            maintenance: count(ProductStatus::Maintenance),
            discarded: count(ProductStatus::Discarded),
            total_units: products
                .iter()
                .fold(0i64, |total, p| total.saturating_add(p.quantity)),
            units_by_category,
            recent_products,
            recent_movements: self.recent_movements(recent).into_iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{sample_movements, sample_products};

    fn sample() -> Inventory {
        Inventory::from_parts(sample_products(), sample_movements())
    }

    fn names(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_search_text_is_case_insensitive() {
        let inventory = sample();

        let query = ProductQuery {
            text: "LOGITECH".to_string(),
            ..Default::default()
        };
        assert_eq!(names(&inventory.search(&query)), vec!["Teclado USB Logitech"]);

        // Serial number match
        let query = ProductQuery {
            text: "cisco2960".to_string(),
            ..Default::default()
        };
        assert_eq!(inventory.search(&query).len(), 1);
    }

    #[test]
    fn test_search_filters_combine() {
        let inventory = sample();

        let query = ProductQuery {
            category: Some(ProductCategory::Computer),
            status: Some(ProductStatus::Available),
            ..Default::default()
        };
        assert_eq!(names(&inventory.search(&query)), vec!["Dell OptiPlex 7090"]);

        let query = ProductQuery {
            location: Some("Almoxarifado Central".to_string()),
            sort: SortOrder::QuantityDesc,
            ..Default::default()
        };
        assert_eq!(
            names(&inventory.search(&query)),
            vec!["Monitor LG 24\"", "Dell OptiPlex 7090"]
        );
    }

    #[test]
    fn test_search_sort_orders() {
        let inventory = sample();

        let by_name = inventory.search(&ProductQuery::default());
        assert_eq!(by_name.len(), 6);
        assert_eq!(by_name[0].name, "Dell OptiPlex 7090");

        let oldest = inventory.search(&ProductQuery {
            sort: SortOrder::DateAsc,
            ..Default::default()
        });
        assert_eq!(oldest[0].name, "Switch Cisco 24 portas");

        let by_brand = inventory.search(&ProductQuery {
            sort: SortOrder::BrandDesc,
            ..Default::default()
        });
        assert_eq!(by_brand[0].brand, "Logitech");
    }

    #[test]
    fn test_locations_sorted_and_distinct() {
        let locations = sample().locations();
        assert_eq!(locations.len(), 5);
        assert_eq!(locations[0], "Almoxarifado Central");
    }

    #[test]
    fn test_low_stock() {
        let mut products = sample_products();
        products[0].alarm_quantity = Some(5);
        products[1].alarm_quantity = Some(3);
        let inventory = Inventory::from_parts(products, Vec::new());

        assert_eq!(names(&inventory.low_stock()), vec!["Dell OptiPlex 7090"]);
    }

    #[test]
    fn test_summary_totals_saturate() {
        let mut products = sample_products();
        products[0].quantity = i64::MAX / 2 + 1;
        products[5].quantity = i64::MAX / 2 + 1;
        let inventory = Inventory::from_parts(products, Vec::new());

        let summary = inventory.summary(5);
        assert_eq!(summary.total_units, i64::MAX);
        assert_eq!(
            summary.units_by_category[0],
            CategoryTotal {
                category: ProductCategory::Computer,
                units: i64::MAX
            }
        );
    }

    #[test]
    fn test_summary() {
        let summary = sample().summary(5);

        assert_eq!(summary.total_products, 6);
        assert_eq!(summary.available, 3);
        assert_eq!(summary.in_use, 2);
        assert_eq!(summary.maintenance, 1);
        assert_eq!(summary.discarded, 0);
        assert_eq!(summary.total_units, 45);
        assert_eq!(
            summary.units_by_category[0],
            CategoryTotal {
                category: ProductCategory::Peripheral,
                units: 25
            }
        );
        assert_eq!(summary.recent_products.len(), 5);
        assert_eq!(summary.recent_products[0].name, "Notebook Lenovo ThinkPad");
        assert_eq!(summary.recent_movements[0].product_id, "6");
    }
}

//! Catalog domain types: categories, subcategories, and products.
//!
//! Display fields come in English/Chinese pairs so the storefront can
//! serve both locales from one record.

use chrono::{DateTime, Utc};
use serde::Serialize;

use cedarline_core::{CategoryId, Money, ProductId, SubcategoryId};

/// A top-level catalog category.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub slug: String,
    pub name_en: String,
    pub name_zh: String,
    /// Display ordering, ascending.
    pub position: i32,
}

/// A subcategory within a category.
#[derive(Debug, Clone, Serialize)]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub category_id: CategoryId,
    pub slug: String,
    pub name_en: String,
    pub name_zh: String,
    pub position: i32,
}

/// One page of a product listing.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPage {
    pub items: Vec<Product>,
    /// Matching products across all pages.
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// A retail product.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub slug: String,
    pub category_id: CategoryId,
    pub subcategory_id: Option<SubcategoryId>,
    pub name_en: String,
    pub name_zh: String,
    pub description_en: String,
    pub description_zh: String,
    pub price: Money,
    /// Units currently available for sale.
    pub stock: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//! Catalog domain types as seen by the back office.
//!
//! Unlike the storefront, the admin panel sees inactive products and
//! can mutate everything.

use chrono::{DateTime, Utc};
use serde::Serialize;

use cedarline_core::{CategoryId, Money, ProductId, SubcategoryId};

/// A catalog category.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub slug: String,
    pub name_en: String,
    pub name_zh: String,
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

/// A retail product, including inactive ones.
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
    pub stock: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating or updating a product.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub sku: String,
    pub slug: String,
    pub category_id: CategoryId,
    pub subcategory_id: Option<SubcategoryId>,
    pub name_en: String,
    pub name_zh: String,
    pub description_en: String,
    pub description_zh: String,
    pub price: Money,
    pub stock: i32,
    pub is_active: bool,
}

//! Catalog management repository: categories, subcategories, products.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use cedarline_core::{CategoryId, ProductId, SubcategoryId};

use super::{RepositoryError, parse_money};
use crate::models::catalog::{Category, Product, ProductDraft, Subcategory};

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    slug: String,
    name_en: String,
    name_zh: String,
    position: i32,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            slug: row.slug,
            name_en: row.name_en,
            name_zh: row.name_zh,
            position: row.position,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SubcategoryRow {
    id: i32,
    category_id: i32,
    slug: String,
    name_en: String,
    name_zh: String,
    position: i32,
}

impl From<SubcategoryRow> for Subcategory {
    fn from(row: SubcategoryRow) -> Self {
        Self {
            id: SubcategoryId::new(row.id),
            category_id: CategoryId::new(row.category_id),
            slug: row.slug,
            name_en: row.name_en,
            name_zh: row.name_zh,
            position: row.position,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    sku: String,
    slug: String,
    category_id: i32,
    subcategory_id: Option<i32>,
    name_en: String,
    name_zh: String,
    description_en: String,
    description_zh: String,
    price: Decimal,
    currency: String,
    stock: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = parse_money(row.price, &row.currency)?;

        Ok(Self {
            id: ProductId::new(row.id),
            sku: row.sku,
            slug: row.slug,
            category_id: CategoryId::new(row.category_id),
            subcategory_id: row.subcategory_id.map(SubcategoryId::new),
            name_en: row.name_en,
            name_zh: row.name_zh,
            description_en: row.description_en,
            description_zh: row.description_zh,
            price,
            stock: row.stock,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const PRODUCT_COLUMNS: &str = "id, sku, slug, category_id, subcategory_id, name_en, name_zh, \
     description_en, description_zh, price, currency, stock, is_active, created_at, updated_at";

/// Repository for catalog management.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// List all categories in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, slug, name_en, name_zh, position FROM category ORDER BY position, id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is taken.
    pub async fn create_category(
        &self,
        slug: &str,
        name_en: &str,
        name_zh: &str,
        position: i32,
    ) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO category (slug, name_en, name_zh, position) \
             VALUES ($1, $2, $3, $4) RETURNING id, slug, name_en, name_zh, position",
        )
        .bind(slug)
        .bind(name_en)
        .bind(name_zh)
        .bind(position)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "category slug already exists"))?;

        Ok(row.into())
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    /// Returns `RepositoryError::Conflict` if the slug is taken.
    pub async fn update_category(
        &self,
        id: CategoryId,
        slug: &str,
        name_en: &str,
        name_zh: &str,
        position: i32,
    ) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "UPDATE category SET slug = $1, name_en = $2, name_zh = $3, position = $4 \
             WHERE id = $5 RETURNING id, slug, name_en, name_zh, position",
        )
        .bind(slug)
        .bind(name_en)
        .bind(name_zh)
        .bind(position)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "category slug already exists"))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a category. Fails while products still reference it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    /// Returns `RepositoryError::Conflict` if products reference it.
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM category WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                    RepositoryError::Conflict("category still has products".to_string())
                }
                _ => RepositoryError::Database(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// List the subcategories of a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_subcategories(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Subcategory>, RepositoryError> {
        let rows = sqlx::query_as::<_, SubcategoryRow>(
            "SELECT id, category_id, slug, name_en, name_zh, position \
             FROM subcategory WHERE category_id = $1 ORDER BY position, id",
        )
        .bind(category_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a subcategory.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is taken within
    /// the category.
    pub async fn create_subcategory(
        &self,
        category_id: CategoryId,
        slug: &str,
        name_en: &str,
        name_zh: &str,
        position: i32,
    ) -> Result<Subcategory, RepositoryError> {
        let row = sqlx::query_as::<_, SubcategoryRow>(
            "INSERT INTO subcategory (category_id, slug, name_en, name_zh, position) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, category_id, slug, name_en, name_zh, position",
        )
        .bind(category_id.as_i32())
        .bind(slug)
        .bind(name_en)
        .bind(name_zh)
        .bind(position)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "subcategory slug already exists"))?;

        Ok(row.into())
    }

    /// Delete a subcategory.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the subcategory doesn't exist.
    pub async fn delete_subcategory(&self, id: SubcategoryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM subcategory WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// List all products, including inactive ones.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the SKU or slug is taken.
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO product (sku, slug, category_id, subcategory_id, name_en, name_zh, \
             description_en, description_zh, price, currency, stock, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&draft.sku)
        .bind(&draft.slug)
        .bind(draft.category_id.as_i32())
        .bind(draft.subcategory_id.map(|s| s.as_i32()))
        .bind(&draft.name_en)
        .bind(&draft.name_zh)
        .bind(&draft.description_en)
        .bind(&draft.description_zh)
        .bind(draft.price.amount)
        .bind(draft.price.currency.as_str())
        .bind(draft.stock)
        .bind(draft.is_active)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "sku or slug already exists"))?;

        row.try_into()
    }

    /// Replace a product's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Conflict` if the SKU or slug is taken.
    pub async fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE product SET sku = $1, slug = $2, category_id = $3, subcategory_id = $4, \
             name_en = $5, name_zh = $6, description_en = $7, description_zh = $8, \
             price = $9, currency = $10, stock = $11, is_active = $12, updated_at = now() \
             WHERE id = $13 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&draft.sku)
        .bind(&draft.slug)
        .bind(draft.category_id.as_i32())
        .bind(draft.subcategory_id.map(|s| s.as_i32()))
        .bind(&draft.name_en)
        .bind(&draft.name_zh)
        .bind(&draft.description_en)
        .bind(&draft.description_zh)
        .bind(draft.price.amount)
        .bind(draft.price.currency.as_str())
        .bind(draft.stock)
        .bind(draft.is_active)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "sku or slug already exists"))?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Activate or deactivate a product without touching other fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn set_product_active(
        &self,
        id: ProductId,
        is_active: bool,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE product SET is_active = $1, updated_at = now() \
             WHERE id = $2 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(is_active)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }
}

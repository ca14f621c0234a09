//! Catalog repository: categories, subcategories, and active products.
//!
//! The storefront only ever sees active products. Admin-side catalog
//! management lives in the admin binary.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use cedarline_core::{CategoryId, CurrencyCode, Money, ProductId, SubcategoryId};

use super::RepositoryError;
use crate::models::catalog::{Category, Product, Subcategory};

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
        let currency: CurrencyCode = row.currency.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid currency in database: {e}"))
        })?;
        let price = Money::new(row.price, currency).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

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

/// `PRODUCT_COLUMNS` qualified for the filtered listing's joins.
const PRODUCT_COLUMNS_P: &str =
    "p.id, p.sku, p.slug, p.category_id, p.subcategory_id, p.name_en, p.name_zh, \
     p.description_en, p.description_zh, p.price, p.currency, p.stock, p.is_active, \
     p.created_at, p.updated_at";

/// Filters for the public product listing. Pages are 1-based.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category_slug: Option<String>,
    pub subcategory_slug: Option<String>,
    /// Case-insensitive substring match on either name.
    pub search: Option<String>,
    pub page: u32,
    pub per_page: u32,
}

/// Append the listing's WHERE clause to a query.
fn push_product_filters<'a>(qb: &mut QueryBuilder<'a, Postgres>, filter: &'a ProductFilter) {
    qb.push(" WHERE p.is_active");
    if let Some(slug) = &filter.category_slug {
        qb.push(" AND c.slug = ").push_bind(slug);
    }
    if let Some(slug) = &filter.subcategory_slug {
        qb.push(" AND s.slug = ").push_bind(slug);
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        qb.push(" AND (p.name_en ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR p.name_zh ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

const PRODUCT_FROM: &str = " FROM product p \
     JOIN category c ON c.id = p.category_id \
     LEFT JOIN subcategory s ON s.id = p.subcategory_id";

/// Repository for read-only catalog queries.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

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

    /// List the subcategories of a category in display order.
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

    /// One page of active products matching the filter, newest first.
    ///
    /// Returns the page's products and the total match count across all
    /// pages.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn search_active_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        let page = filter.page.max(1);
        let per_page = filter.per_page.clamp(1, 100);
        let offset = i64::from(page - 1) * i64::from(per_page);

        let mut count_query = QueryBuilder::new("SELECT count(*)");
        count_query.push(PRODUCT_FROM);
        push_product_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(self.pool)
            .await?;

        let mut page_query = QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS_P}"));
        page_query.push(PRODUCT_FROM);
        push_product_filters(&mut page_query, filter);
        page_query
            .push(" ORDER BY p.created_at DESC, p.id DESC LIMIT ")
            .push_bind(i64::from(per_page))
            .push(" OFFSET ")
            .push_bind(offset);

        let rows: Vec<ProductRow> = page_query
            .build_query_as()
            .fetch_all(self.pool)
            .await?;

        let products = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Product>, _>>()?;

        Ok((products, total))
    }

    /// Get an active product by its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_active_product_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE is_active AND slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get an active product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_active_product(
        &self,
        id: ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE is_active AND id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }
}

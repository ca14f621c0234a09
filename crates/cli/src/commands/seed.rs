//! Seed the database with a small demo catalog.
//!
//! Intended for empty development databases. Every insert uses
//! `ON CONFLICT DO NOTHING` keyed on slugs and SKUs, so re-running the
//! command leaves existing rows alone.

use rust_decimal::Decimal;

use super::CommandError;

struct DemoProduct {
    sku: &'static str,
    slug: &'static str,
    category_slug: &'static str,
    subcategory_slug: &'static str,
    name_en: &'static str,
    name_zh: &'static str,
    price_cents: i64,
    stock: i32,
}

const CATEGORIES: &[(&str, &str, &str)] = &[
    ("living-room", "Living Room", "客厅"),
    ("dining-room", "Dining Room", "餐厅"),
    ("bedroom", "Bedroom", "卧室"),
];

const SUBCATEGORIES: &[(&str, &str, &str, &str)] = &[
    ("living-room", "sofas", "Sofas", "沙发"),
    ("living-room", "coffee-tables", "Coffee Tables", "茶几"),
    ("dining-room", "dining-tables", "Dining Tables", "餐桌"),
    ("dining-room", "dining-chairs", "Dining Chairs", "餐椅"),
    ("bedroom", "beds", "Beds", "床"),
];

const PRODUCTS: &[DemoProduct] = &[
    DemoProduct {
        sku: "SOFA-OAK-3S",
        slug: "oak-three-seater-sofa",
        category_slug: "living-room",
        subcategory_slug: "sofas",
        name_en: "Oak Three-Seater Sofa",
        name_zh: "橡木三人沙发",
        price_cents: 129_900,
        stock: 12,
    },
    DemoProduct {
        sku: "TBL-WAL-CF",
        slug: "walnut-coffee-table",
        category_slug: "living-room",
        subcategory_slug: "coffee-tables",
        name_en: "Walnut Coffee Table",
        name_zh: "胡桃木茶几",
        price_cents: 45_900,
        stock: 30,
    },
    DemoProduct {
        sku: "TBL-OAK-D6",
        slug: "oak-dining-table-6",
        category_slug: "dining-room",
        subcategory_slug: "dining-tables",
        name_en: "Oak Dining Table (Seats 6)",
        name_zh: "橡木六人餐桌",
        price_cents: 89_900,
        stock: 8,
    },
    DemoProduct {
        sku: "CHR-ASH-D1",
        slug: "ash-dining-chair",
        category_slug: "dining-room",
        subcategory_slug: "dining-chairs",
        name_en: "Ash Dining Chair",
        name_zh: "白蜡木餐椅",
        price_cents: 18_900,
        stock: 64,
    },
    DemoProduct {
        sku: "BED-PIN-QN",
        slug: "pine-queen-bed-frame",
        category_slug: "bedroom",
        subcategory_slug: "beds",
        name_en: "Pine Queen Bed Frame",
        name_zh: "松木大床架",
        price_cents: 74_900,
        stock: 10,
    },
];

/// Seed a demo catalog of categories, subcategories, and products.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or an insert
/// fails.
pub async fn demo_catalog() -> Result<(), CommandError> {
    let pool = super::connect().await?;

    tracing::info!("Seeding demo catalog...");

    for (position, (slug, name_en, name_zh)) in CATEGORIES.iter().enumerate() {
        sqlx::query(
            "INSERT INTO category (slug, name_en, name_zh, position)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (slug) DO NOTHING",
        )
        .bind(slug)
        .bind(name_en)
        .bind(name_zh)
        .bind(i32::try_from(position).unwrap_or(0))
        .execute(&pool)
        .await?;
    }

    for (position, (category_slug, slug, name_en, name_zh)) in SUBCATEGORIES.iter().enumerate() {
        sqlx::query(
            "INSERT INTO subcategory (category_id, slug, name_en, name_zh, position)
             SELECT id, $2, $3, $4, $5 FROM category WHERE slug = $1
             ON CONFLICT (category_id, slug) DO NOTHING",
        )
        .bind(category_slug)
        .bind(slug)
        .bind(name_en)
        .bind(name_zh)
        .bind(i32::try_from(position).unwrap_or(0))
        .execute(&pool)
        .await?;
    }

    for product in PRODUCTS {
        let price = Decimal::new(product.price_cents, 2);
        sqlx::query(
            "INSERT INTO product
                 (sku, slug, category_id, subcategory_id, name_en, name_zh,
                  price, currency, stock)
             SELECT $1, $2, c.id, s.id, $5, $6, $7, 'USD', $8
             FROM category c
             JOIN subcategory s ON s.category_id = c.id AND s.slug = $4
             WHERE c.slug = $3
             ON CONFLICT (sku) DO NOTHING",
        )
        .bind(product.sku)
        .bind(product.slug)
        .bind(product.category_slug)
        .bind(product.subcategory_slug)
        .bind(product.name_en)
        .bind(product.name_zh)
        .bind(price)
        .bind(product.stock)
        .execute(&pool)
        .await?;
    }

    tracing::info!(
        "Demo catalog seeded: {} categories, {} subcategories, {} products",
        CATEGORIES.len(),
        SUBCATEGORIES.len(),
        PRODUCTS.len()
    );

    Ok(())
}

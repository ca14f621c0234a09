//! Cart route handlers. All require a logged-in customer.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use cedarline_core::{CartItemId, ProductId};

use crate::db::carts::CartRepository;
use crate::db::catalog::CatalogRepository;
use crate::error::AppError;
use crate::middleware::auth::RequireAuth;
use crate::models::cart::{Cart, CartView};
use crate::state::AppState;

/// Request body for adding a product to the cart.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: i32,
    pub quantity: i32,
}

/// Request body for changing a line quantity.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: i32,
}

/// Compute totals for the response, surfacing corrupt data as a 500.
fn view(cart: Cart) -> Result<Json<CartView>, AppError> {
    cart.into_view()
        .map(Json)
        .map_err(|e| AppError::Internal(format!("cart totals: {e}")))
}

/// Get the current cart, creating an empty one on first use.
///
/// GET /cart
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<CartView>, AppError> {
    let repo = CartRepository::new(state.pool());
    let cart = repo.get_or_create(user.id).await?;

    view(cart)
}

/// Add a product to the cart.
///
/// POST /cart/items
///
/// Rejects inactive products and quantities beyond available stock.
#[instrument(skip(state), fields(user_id = %user.id, product_id = request.product_id))]
pub async fn add_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<CartView>), AppError> {
    if request.quantity <= 0 {
        return Err(AppError::BadRequest("quantity must be positive".to_string()));
    }

    let catalog = CatalogRepository::new(state.pool());
    let product = catalog
        .get_active_product(ProductId::new(request.product_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;

    if product.stock < request.quantity {
        return Err(AppError::Conflict(format!(
            "only {} of {} in stock",
            product.stock, product.sku
        )));
    }

    let carts = CartRepository::new(state.pool());
    let cart = carts.get_or_create(user.id).await?;
    carts
        .add_item(cart.id, product.id, request.quantity)
        .await?;

    let cart = carts.get_or_create(user.id).await?;

    Ok((StatusCode::CREATED, view(cart)?))
}

/// Set the quantity of a cart line.
///
/// PUT /cart/items/{id}
///
/// A quantity of zero removes the line.
pub async fn update_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(item_id): Path<i32>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<CartView>, AppError> {
    if request.quantity < 0 {
        return Err(AppError::BadRequest(
            "quantity cannot be negative".to_string(),
        ));
    }

    let repo = CartRepository::new(state.pool());
    let cart = repo.get_or_create(user.id).await?;

    if request.quantity == 0 {
        repo.remove_item(cart.id, CartItemId::new(item_id)).await?;
    } else {
        repo.set_quantity(cart.id, CartItemId::new(item_id), request.quantity)
            .await?;
    }

    let cart = repo.get_or_create(user.id).await?;

    view(cart)
}

/// Remove a line from the cart.
///
/// DELETE /cart/items/{id}
pub async fn remove_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(item_id): Path<i32>,
) -> Result<Json<CartView>, AppError> {
    let repo = CartRepository::new(state.pool());
    let cart = repo.get_or_create(user.id).await?;
    repo.remove_item(cart.id, CartItemId::new(item_id)).await?;

    let cart = repo.get_or_create(user.id).await?;

    view(cart)
}

//! Inspection route handlers: photo upload, review, and the per-order
//! rollup the shipping gate reads.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use cedarline_core::{
    InspectionId, InspectionPhotoId, PhotoReview, WholesaleOrderId, WholesaleOrderItemId,
};

use crate::db::inspections::InspectionRepository;
use crate::error::AppError;
use crate::middleware::auth::RequireAdmin;
use crate::models::inspection::{Inspection, InspectionDetail, InspectionPhoto, OrderInspectionSummary};
use crate::routes::require_write;
use crate::services::storage::StorageClient;
use crate::state::AppState;

/// Photo uploads are capped at 10 MiB.
const MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;

/// Request body cap for the upload route. Axum's default body limit is
/// 2 MB, well under the photo cap, so the route raises it; the slack
/// covers multipart framing.
pub const MAX_UPLOAD_BODY_BYTES: usize = MAX_PHOTO_BYTES + 64 * 1024;

/// Content types accepted for photos.
const ALLOWED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Get the inspection for an order item.
///
/// GET /wholesale/items/{id}/inspection
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<WholesaleOrderItemId>,
) -> Result<Json<InspectionDetail>, AppError> {
    let detail = InspectionRepository::new(state.pool())
        .get_detail_for_item(id)
        .await?
        .ok_or_else(|| AppError::NotFound("no inspection for this item".to_string()))?;

    Ok(Json(detail))
}

/// Create the inspection for an order item, or return the existing one.
///
/// POST /wholesale/items/{id}/inspection
#[instrument(skip(state, admin))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<WholesaleOrderItemId>,
) -> Result<(StatusCode, Json<Inspection>), AppError> {
    require_write(&admin)?;

    let inspection = InspectionRepository::new(state.pool())
        .get_or_create_for_item(id)
        .await?;

    Ok((StatusCode::CREATED, Json(inspection)))
}

/// Upload a photo for an inspection.
///
/// POST /inspections/{id}/photos (multipart, field `photo`)
///
/// The object is stored before the database row is written; a row never
/// points at a missing object.
#[instrument(skip(state, admin, multipart))]
pub async fn upload_photo(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<InspectionId>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<InspectionPhoto>), AppError> {
    require_write(&admin)?;

    let repo = InspectionRepository::new(state.pool());

    // The item the inspection belongs to determines the object key prefix.
    let (order_id, item_id) = inspection_order_item(&state, id).await?;

    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
        .ok_or_else(|| AppError::BadRequest("missing photo field".to_string()))?;

    if field.name() != Some("photo") {
        return Err(AppError::BadRequest("expected field 'photo'".to_string()));
    }

    let content_type = field
        .content_type()
        .map(ToString::to_string)
        .ok_or_else(|| AppError::BadRequest("photo content type is required".to_string()))?;

    if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
        return Err(AppError::BadRequest(format!(
            "unsupported content type: {content_type}"
        )));
    }

    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("failed to read photo: {e}")))?;

    if bytes.is_empty() {
        return Err(AppError::BadRequest("photo is empty".to_string()));
    }
    if bytes.len() > MAX_PHOTO_BYTES {
        return Err(AppError::BadRequest("photo exceeds 10 MiB".to_string()));
    }

    let key = StorageClient::photo_key(order_id, item_id);
    state
        .storage()
        .put_object(&key, bytes.to_vec(), &content_type)
        .await?;

    let photo = repo.add_photo(id, &key, &content_type, admin.id).await?;

    tracing::info!(inspection_id = %id, photo_id = %photo.id, "Inspection photo uploaded");

    Ok((StatusCode::CREATED, Json(photo)))
}

/// Review form data.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub verdict: PhotoReview,
    pub note: Option<String>,
}

/// Approve or reject a photo.
///
/// POST /inspections/photos/{id}/review
#[instrument(skip(state, admin, request), fields(verdict = %request.verdict))]
pub async fn review_photo(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<InspectionPhotoId>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<InspectionPhoto>, AppError> {
    require_write(&admin)?;

    if request.verdict == PhotoReview::Unreviewed {
        return Err(AppError::BadRequest(
            "verdict must be approved or rejected".to_string(),
        ));
    }

    let photo = InspectionRepository::new(state.pool())
        .review_photo(id, request.verdict, request.note.as_deref(), admin.id)
        .await?;

    tracing::info!(photo_id = %id, verdict = %photo.review_status, reviewed_by = %admin.id, "Photo reviewed");

    Ok(Json(photo))
}

/// Per-item inspection rollup for one wholesale order.
///
/// GET /wholesale/orders/{id}/inspections
pub async fn order_summary(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<WholesaleOrderId>,
) -> Result<Json<OrderInspectionSummary>, AppError> {
    let summary = InspectionRepository::new(state.pool())
        .order_summary(id)
        .await?;
    Ok(Json(summary))
}

/// Resolve the order and item an inspection belongs to.
async fn inspection_order_item(
    state: &AppState,
    id: InspectionId,
) -> Result<(WholesaleOrderId, WholesaleOrderItemId), AppError> {
    #[derive(sqlx::FromRow)]
    struct OwnerRow {
        order_id: i32,
        item_id: i32,
    }

    let row = sqlx::query_as::<_, OwnerRow>(
        "SELECT i.wholesale_order_id AS order_id, i.id AS item_id \
         FROM product_inspection pi \
         JOIN wholesale_order_item i ON i.id = pi.wholesale_order_item_id \
         WHERE pi.id = $1",
    )
    .bind(id.as_i32())
    .fetch_optional(state.pool())
    .await
    .map_err(|e| AppError::Database(e.into()))?
    .ok_or_else(|| AppError::NotFound("inspection not found".to_string()))?;

    Ok((
        WholesaleOrderId::new(row.order_id),
        WholesaleOrderItemId::new(row.item_id),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::extract::{DefaultBodyLimit, Multipart};
    use axum::http::{Request, StatusCode, header};
    use axum::routing::post;
    use tower::ServiceExt;

    use super::{MAX_PHOTO_BYTES, MAX_UPLOAD_BODY_BYTES};

    /// Reads one field the way `upload_photo` does, without the
    /// database and storage calls.
    async fn read_photo_field(mut multipart: Multipart) -> StatusCode {
        let Ok(Some(field)) = multipart.next_field().await else {
            return StatusCode::BAD_REQUEST;
        };
        match field.bytes().await {
            Ok(bytes) if !bytes.is_empty() && bytes.len() <= MAX_PHOTO_BYTES => StatusCode::CREATED,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn upload_app() -> Router {
        Router::new().route(
            "/photos",
            post(read_photo_field).layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES)),
        )
    }

    fn multipart_request(payload_len: usize) -> Request<Body> {
        let boundary = "photo-upload-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"photo\"; filename=\"photo.jpg\"\r\n",
        );
        body.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
        body.extend_from_slice(&vec![0xAB; payload_len]);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/photos")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_route_accepts_photo_above_default_body_cap() {
        // 3 MiB, larger than axum's 2 MB default but within the photo cap
        let response = upload_app()
            .oneshot(multipart_request(3 * 1024 * 1024))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_upload_route_rejects_body_over_limit() {
        let response = upload_app()
            .oneshot(multipart_request(MAX_UPLOAD_BODY_BYTES + 1024))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }
}

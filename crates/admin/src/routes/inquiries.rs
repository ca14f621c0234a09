//! Inquiry thread route handlers.
//!
//! A reply is sent over SMTP before anything is recorded; when the send
//! fails the handler fails and the thread is untouched.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use cedarline_core::{EmailThreadId, ThreadStatus};

use crate::db::inquiries::InquiryRepository;
use crate::error::AppError;
use crate::middleware::auth::RequireAdmin;
use crate::models::inquiry::{EmailMessage, EmailThread, ThreadDetail};
use crate::routes::require_write;
use crate::state::AppState;

/// Listing filter.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<ThreadStatus>,
}

/// List threads, most recently active first.
///
/// GET /inquiries
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<EmailThread>>, AppError> {
    let threads = InquiryRepository::new(state.pool())
        .list_threads(query.status)
        .await?;
    Ok(Json(threads))
}

/// Get a thread with its message history.
///
/// GET /inquiries/{id}
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<EmailThreadId>,
) -> Result<Json<ThreadDetail>, AppError> {
    let detail = InquiryRepository::new(state.pool())
        .get_thread_detail(id)
        .await?
        .ok_or_else(|| AppError::NotFound("thread not found".to_string()))?;

    Ok(Json(detail))
}

/// Reply form data.
#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub body: String,
}

/// Send a reply to the customer and record it on the thread.
///
/// POST /inquiries/{id}/reply
#[instrument(skip(state, admin, request))]
pub async fn reply(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<EmailThreadId>,
    Json(request): Json<ReplyRequest>,
) -> Result<(StatusCode, Json<EmailMessage>), AppError> {
    require_write(&admin)?;

    if request.body.trim().is_empty() {
        return Err(AppError::BadRequest("body is required".to_string()));
    }

    let repo = InquiryRepository::new(state.pool());
    let detail = repo
        .get_thread_detail(id)
        .await?
        .ok_or_else(|| AppError::NotFound("thread not found".to_string()))?;

    let subject = format!("Re: {}", detail.thread.subject);

    // Send first. A failed send must leave no trace on the thread.
    state
        .email()
        .send_inquiry_reply(&detail.thread.customer_email, &subject, &request.body)
        .await?;

    let message = repo
        .record_outbound_message(
            id,
            &state.email().from_address(),
            &detail.thread.customer_email,
            &subject,
            &request.body,
            admin.id,
        )
        .await?;

    tracing::info!(thread_id = %id, message_id = %message.id, sent_by = %admin.id, "Inquiry reply sent");

    Ok((StatusCode::CREATED, Json(message)))
}

/// Close a thread.
///
/// POST /inquiries/{id}/close
#[instrument(skip(state, admin))]
pub async fn close(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<EmailThreadId>,
) -> Result<Json<EmailThread>, AppError> {
    require_write(&admin)?;

    let thread = InquiryRepository::new(state.pool())
        .set_thread_status(id, ThreadStatus::Closed)
        .await?;

    Ok(Json(thread))
}

/// Reopen a thread.
///
/// POST /inquiries/{id}/reopen
#[instrument(skip(state, admin))]
pub async fn reopen(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<EmailThreadId>,
) -> Result<Json<EmailThread>, AppError> {
    require_write(&admin)?;

    let thread = InquiryRepository::new(state.pool())
        .set_thread_status(id, ThreadStatus::Open)
        .await?;

    Ok(Json(thread))
}

//! Inquiry form route handlers.
//!
//! A submission opens an email thread for the back office and sends a
//! best-effort acknowledgement to the customer.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use cedarline_core::Email;

use crate::db::inquiries::InquiryRepository;
use crate::error::AppError;
use crate::models::inquiry::{InquiryForm, InquirySubmission};
use crate::state::AppState;

/// Inquiry form data.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// List active inquiry forms.
///
/// GET /contact
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<InquiryForm>>, AppError> {
    let repo = InquiryRepository::new(state.pool());
    Ok(Json(repo.list_active_forms().await?))
}

/// Form metadata by slug.
///
/// GET /contact/{slug}
pub async fn show_form(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<InquiryForm>, AppError> {
    let repo = InquiryRepository::new(state.pool());
    let form = repo
        .get_active_form_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("contact form {slug}")))?;

    Ok(Json(form))
}

/// Submit an inquiry.
///
/// POST /contact/{slug}
#[instrument(skip(state, request), fields(form = %slug, email = %request.email))]
pub async fn submit(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<InquirySubmission>), AppError> {
    let name = request.name.trim();
    let subject = request.subject.trim();
    let message = request.message.trim();
    if name.is_empty() || subject.is_empty() || message.is_empty() {
        return Err(AppError::BadRequest(
            "name, subject, and message are required".to_string(),
        ));
    }

    let email = Email::parse(&request.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let repo = InquiryRepository::new(state.pool());
    let form = repo
        .get_active_form_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("contact form {slug}")))?;

    let submission = repo
        .create_submission(
            form.id,
            name,
            &email,
            subject,
            message,
            &state.config().email.from_address,
        )
        .await?;

    tracing::info!(submission_id = %submission.id, "Inquiry submitted");

    if let Err(e) = state.email().send_inquiry_ack(&email, name, subject).await {
        tracing::warn!(submission_id = %submission.id, error = %e, "Inquiry acknowledgement email failed");
    }

    Ok((StatusCode::CREATED, Json(submission)))
}

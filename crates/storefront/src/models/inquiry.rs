//! Customer inquiry domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use cedarline_core::{Email, InquiryFormId, InquirySubmissionId};

/// A published contact form.
#[derive(Debug, Clone, Serialize)]
pub struct InquiryForm {
    pub id: InquiryFormId,
    pub slug: String,
    pub title: String,
    pub is_active: bool,
}

/// A submitted inquiry.
#[derive(Debug, Clone, Serialize)]
pub struct InquirySubmission {
    pub id: InquirySubmissionId,
    pub form_id: InquiryFormId,
    pub name: String,
    pub email: Email,
    pub subject: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

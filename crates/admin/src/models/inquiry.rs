//! Inquiry thread domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use cedarline_core::{
    AdminUserId, EmailDirection, EmailMessageId, EmailThreadId, InquirySubmissionId, ThreadStatus,
};

/// An email thread opened by a customer inquiry.
#[derive(Debug, Clone, Serialize)]
pub struct EmailThread {
    pub id: EmailThreadId,
    pub submission_id: InquirySubmissionId,
    pub customer_email: String,
    pub subject: String,
    pub status: ThreadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single message in a thread.
#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    pub id: EmailMessageId,
    pub thread_id: EmailThreadId,
    pub direction: EmailDirection,
    pub from_address: String,
    pub to_address: String,
    pub subject: String,
    pub body: String,
    /// Set for outbound messages sent by an admin.
    pub sent_by: Option<AdminUserId>,
    pub created_at: DateTime<Utc>,
}

/// A thread with its full message history.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadDetail {
    #[serde(flatten)]
    pub thread: EmailThread,
    pub messages: Vec<EmailMessage>,
}

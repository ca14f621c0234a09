//! Inquiry thread repository for the back office.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cedarline_core::{
    AdminUserId, EmailDirection, EmailMessageId, EmailThreadId, InquirySubmissionId, ThreadStatus,
};

use super::RepositoryError;
use crate::models::inquiry::{EmailMessage, EmailThread, ThreadDetail};

#[derive(Debug, sqlx::FromRow)]
struct ThreadRow {
    id: i32,
    submission_id: i32,
    customer_email: String,
    subject: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ThreadRow> for EmailThread {
    type Error = RepositoryError;

    fn try_from(row: ThreadRow) -> Result<Self, Self::Error> {
        let status: ThreadStatus = RepositoryError::parse_column(&row.status, "thread status")?;

        Ok(Self {
            id: EmailThreadId::new(row.id),
            submission_id: InquirySubmissionId::new(row.submission_id),
            customer_email: row.customer_email,
            subject: row.subject,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: i32,
    thread_id: i32,
    direction: String,
    from_address: String,
    to_address: String,
    subject: String,
    body: String,
    sent_by: Option<i32>,
    created_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for EmailMessage {
    type Error = RepositoryError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let direction: EmailDirection =
            RepositoryError::parse_column(&row.direction, "message direction")?;

        Ok(Self {
            id: EmailMessageId::new(row.id),
            thread_id: EmailThreadId::new(row.thread_id),
            direction,
            from_address: row.from_address,
            to_address: row.to_address,
            subject: row.subject,
            body: row.body,
            sent_by: row.sent_by.map(AdminUserId::new),
            created_at: row.created_at,
        })
    }
}

const THREAD_COLUMNS: &str =
    "id, submission_id, customer_email, subject, status, created_at, updated_at";
const MESSAGE_COLUMNS: &str =
    "id, thread_id, direction, from_address, to_address, subject, body, sent_by, created_at";

/// Repository for inquiry threads and messages.
pub struct InquiryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InquiryRepository<'a> {
    /// Create a new inquiry repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List threads, optionally filtered by status, most recently
    /// active first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list_threads(
        &self,
        status: Option<ThreadStatus>,
    ) -> Result<Vec<EmailThread>, RepositoryError> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as::<_, ThreadRow>(&format!(
                    "SELECT {THREAD_COLUMNS} FROM email_thread \
                     WHERE status = $1 ORDER BY updated_at DESC"
                ))
                .bind(status.to_string())
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ThreadRow>(&format!(
                    "SELECT {THREAD_COLUMNS} FROM email_thread ORDER BY updated_at DESC"
                ))
                .fetch_all(self.pool)
                .await?
            }
        };

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a thread with its full message history.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_thread_detail(
        &self,
        id: EmailThreadId,
    ) -> Result<Option<ThreadDetail>, RepositoryError> {
        let row = sqlx::query_as::<_, ThreadRow>(&format!(
            "SELECT {THREAD_COLUMNS} FROM email_thread WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let message_rows = sqlx::query_as::<_, MessageRow>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM email_message \
             WHERE thread_id = $1 ORDER BY created_at"
        ))
        .bind(id.as_i32())
        .fetch_all(self.pool)
        .await?;

        let messages = message_rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<EmailMessage>, _>>()?;

        Ok(Some(ThreadDetail {
            thread: row.try_into()?,
            messages,
        }))
    }

    /// Record an outbound reply on a thread and bump its activity time.
    ///
    /// The caller is responsible for actually sending the email first;
    /// this only records what was sent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the thread doesn't exist.
    pub async fn record_outbound_message(
        &self,
        thread_id: EmailThreadId,
        from_address: &str,
        to_address: &str,
        subject: &str,
        body: &str,
        sent_by: AdminUserId,
    ) -> Result<EmailMessage, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, MessageRow>(&format!(
            "INSERT INTO email_message \
             (thread_id, direction, from_address, to_address, subject, body, sent_by) \
             VALUES ($1, 'outbound', $2, $3, $4, $5, $6) \
             RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(thread_id.as_i32())
        .bind(from_address)
        .bind(to_address)
        .bind(subject)
        .bind(body)
        .bind(sent_by.as_i32())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                RepositoryError::NotFound
            }
            _ => RepositoryError::Database(e),
        })?;

        sqlx::query("UPDATE email_thread SET updated_at = now() WHERE id = $1")
            .bind(thread_id.as_i32())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        row.try_into()
    }

    /// Open or close a thread.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the thread doesn't exist.
    pub async fn set_thread_status(
        &self,
        id: EmailThreadId,
        status: ThreadStatus,
    ) -> Result<EmailThread, RepositoryError> {
        let row = sqlx::query_as::<_, ThreadRow>(&format!(
            "UPDATE email_thread SET status = $1, updated_at = now() \
             WHERE id = $2 RETURNING {THREAD_COLUMNS}"
        ))
        .bind(status.to_string())
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }
}

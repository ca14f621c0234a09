//! Inquiry form and submission repository.
//!
//! Every submission opens an email thread with the submission body as
//! the first inbound message, so back-office replies have a complete
//! history.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cedarline_core::{Email, InquiryFormId, InquirySubmissionId};

use super::RepositoryError;
use crate::models::inquiry::{InquiryForm, InquirySubmission};

#[derive(Debug, sqlx::FromRow)]
struct InquiryFormRow {
    id: i32,
    slug: String,
    title: String,
    is_active: bool,
}

impl From<InquiryFormRow> for InquiryForm {
    fn from(row: InquiryFormRow) -> Self {
        Self {
            id: InquiryFormId::new(row.id),
            slug: row.slug,
            title: row.title,
            is_active: row.is_active,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InquirySubmissionRow {
    id: i32,
    form_id: i32,
    name: String,
    email: String,
    subject: String,
    body: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<InquirySubmissionRow> for InquirySubmission {
    type Error = RepositoryError;

    fn try_from(row: InquirySubmissionRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: InquirySubmissionId::new(row.id),
            form_id: InquiryFormId::new(row.form_id),
            name: row.name,
            email,
            subject: row.subject,
            body: row.body,
            created_at: row.created_at,
        })
    }
}

/// Repository for public inquiry operations.
pub struct InquiryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InquiryRepository<'a> {
    /// Create a new inquiry repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List active inquiry forms.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active_forms(&self) -> Result<Vec<InquiryForm>, RepositoryError> {
        let rows = sqlx::query_as::<_, InquiryFormRow>(
            "SELECT id, slug, title, is_active FROM inquiry_form WHERE is_active ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get an active inquiry form by its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_active_form_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<InquiryForm>, RepositoryError> {
        let row = sqlx::query_as::<_, InquiryFormRow>(
            "SELECT id, slug, title, is_active FROM inquiry_form WHERE slug = $1 AND is_active",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Record a submission and open its email thread.
    ///
    /// The submission body becomes the thread's first inbound message.
    /// Runs in a transaction so a thread never exists without its
    /// submission.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails.
    pub async fn create_submission(
        &self,
        form_id: InquiryFormId,
        name: &str,
        email: &Email,
        subject: &str,
        body: &str,
        inbox_address: &str,
    ) -> Result<InquirySubmission, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, InquirySubmissionRow>(
            r#"
            INSERT INTO inquiry_submission (form_id, name, email, subject, body)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, form_id, name, email, subject, body, created_at
            "#,
        )
        .bind(form_id.as_i32())
        .bind(name)
        .bind(email.as_str())
        .bind(subject)
        .bind(body)
        .fetch_one(&mut *tx)
        .await?;

        let thread_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO email_thread (submission_id, customer_email, subject, status)
            VALUES ($1, $2, $3, 'open')
            RETURNING id
            "#,
        )
        .bind(row.id)
        .bind(email.as_str())
        .bind(subject)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO email_message (thread_id, direction, from_address, to_address, subject, body)
            VALUES ($1, 'inbound', $2, $3, $4, $5)
            "#,
        )
        .bind(thread_id)
        .bind(email.as_str())
        .bind(inbox_address)
        .bind(subject)
        .bind(body)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        row.try_into()
    }

    /// Look up a submission by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_submission(
        &self,
        id: InquirySubmissionId,
    ) -> Result<Option<InquirySubmission>, RepositoryError> {
        let row = sqlx::query_as::<_, InquirySubmissionRow>(
            "SELECT id, form_id, name, email, subject, body, created_at \
             FROM inquiry_submission WHERE id = $1",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }
}

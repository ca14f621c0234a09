//! Admin user domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cedarline_core::{AdminUserId, Email};

// Re-export AdminRole from core for convenience
pub use cedarline_core::AdminRole;

/// Session keys for storing admin data.
pub mod session_keys {
    /// Key for the logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}

/// An admin user (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct AdminUser {
    /// Unique admin user ID.
    pub id: AdminUserId,
    /// Admin's email address.
    pub email: Email,
    /// Admin's display name.
    pub name: String,
    /// Admin's role/permission level.
    pub role: AdminRole,
    /// When the admin was created.
    pub created_at: DateTime<Utc>,
    /// When the admin was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The logged-in admin as stored in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin user ID.
    pub id: AdminUserId,
    /// Admin's email address.
    pub email: String,
    /// Admin's display name.
    pub name: String,
    /// Admin's role.
    pub role: AdminRole,
}

impl From<&AdminUser> for CurrentAdmin {
    fn from(admin: &AdminUser) -> Self {
        Self {
            id: admin.id,
            email: admin.email.as_str().to_string(),
            name: admin.name.clone(),
            role: admin.role,
        }
    }
}

//! Retail customer domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cedarline_core::{Email, UserId};

/// Session keys for storing customer data.
pub mod session_keys {
    /// Key for the logged-in customer.
    pub const CURRENT_USER: &str = "current_user";
}

/// A registered retail customer.
///
/// The password hash never leaves the repository layer.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique customer ID.
    pub id: UserId,
    /// Customer's email address.
    pub email: Email,
    /// Customer's display name.
    pub name: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The logged-in customer as stored in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Customer ID.
    pub id: UserId,
    /// Customer's email address.
    pub email: String,
    /// Customer's display name.
    pub name: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.as_str().to_string(),
            name: user.name.clone(),
        }
    }
}

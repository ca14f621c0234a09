//! Company profile types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use cedarline_core::{WholesaleCompanyId, WholesaleRole, WholesaleUserId};

/// The authenticated user's company.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyProfile {
    pub id: WholesaleCompanyId,
    pub code: String,
    pub name: String,
    pub contact_email: String,
    pub created_at: DateTime<Utc>,
}

/// A colleague on the same company account.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyMember {
    pub id: WholesaleUserId,
    pub email: String,
    pub name: String,
    pub role: WholesaleRole,
    pub is_active: bool,
}

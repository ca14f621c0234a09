//! Status enums for orders, inspections, roles, and inquiry threads.
//!
//! All statuses are persisted as lowercase snake_case TEXT and parsed back
//! through `FromStr` at the repository boundary.

use serde::{Deserialize, Serialize};

/// Retail order lifecycle status.
///
/// ```text
/// pending -> confirmed -> processing -> shipped -> delivered
///    \           \            \
///     `-----------`------------`--> cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether a direct transition from `self` to `next` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Processing | Self::Cancelled)
                | (Self::Processing, Self::Shipped | Self::Cancelled)
                | (Self::Shipped, Self::Delivered)
        )
    }

    /// Whether this status allows no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Wholesale order lifecycle status.
///
/// The `Shipped` transition is additionally gated by inspection approval
/// (see [`crate::inspection::ready_to_ship`]); that check lives at the
/// call site because it needs the photo rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WholesaleOrderStatus {
    #[default]
    Pending,
    Confirmed,
    InProduction,
    Shipped,
    Delivered,
    Cancelled,
}

impl WholesaleOrderStatus {
    /// Whether a direct transition from `self` to `next` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::InProduction | Self::Cancelled)
                | (Self::InProduction, Self::Shipped | Self::Cancelled)
                | (Self::Shipped, Self::Delivered)
        )
    }

    /// Whether this status allows no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl std::fmt::Display for WholesaleOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InProduction => "in_production",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for WholesaleOrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "in_production" => Ok(Self::InProduction),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid wholesale order status: {s}")),
        }
    }
}

/// Review state of a single inspection photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PhotoReview {
    #[default]
    Unreviewed,
    Approved,
    Rejected,
}

impl std::fmt::Display for PhotoReview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unreviewed => "unreviewed",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for PhotoReview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unreviewed" => Ok(Self::Unreviewed),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("invalid photo review state: {s}")),
        }
    }
}

/// Aggregate inspection status for an order item or a whole order.
///
/// Derived per request from photo review states, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemInspectionStatus {
    /// No photos uploaded yet.
    #[default]
    None,
    /// At least one photo awaits review.
    Pending,
    /// Every photo reviewed, all approved.
    Approved,
    /// Every photo reviewed, at least one rejected.
    Rejected,
}

impl std::fmt::Display for ItemInspectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// Admin role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full access to all admin features including admin user management.
    SuperAdmin,
    /// Full access to store management features.
    Admin,
    /// Read-only access to store data.
    Viewer,
}

impl AdminRole {
    /// Whether this role may mutate store data.
    #[must_use]
    pub const fn can_write(self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Admin)
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SuperAdmin => write!(f, "super_admin"),
            Self::Admin => write!(f, "admin"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

impl std::str::FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "viewer" => Ok(Self::Viewer),
            _ => Err(format!("invalid admin role: {s}")),
        }
    }
}

/// Role of a user within a wholesale company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WholesaleRole {
    /// Manages the company account and its users; may place orders.
    Owner,
    /// May place orders.
    Buyer,
    /// Read-only access to the company's catalog and orders.
    Viewer,
}

impl WholesaleRole {
    /// Whether this role may place orders.
    #[must_use]
    pub const fn can_order(self) -> bool {
        matches!(self, Self::Owner | Self::Buyer)
    }
}

impl std::fmt::Display for WholesaleRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Owner => write!(f, "owner"),
            Self::Buyer => write!(f, "buyer"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

impl std::str::FromStr for WholesaleRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Self::Owner),
            "buyer" => Ok(Self::Buyer),
            "viewer" => Ok(Self::Viewer),
            _ => Err(format!("invalid wholesale role: {s}")),
        }
    }
}

/// Lifecycle of a customer inquiry email thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThreadStatus {
    #[default]
    Open,
    Closed,
}

impl std::fmt::Display for ThreadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for ThreadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            _ => Err(format!("invalid thread status: {s}")),
        }
    }
}

/// Direction of a message within an email thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailDirection {
    /// Received from the customer.
    Inbound,
    /// Sent by staff.
    Outbound,
}

impl std::fmt::Display for EmailDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inbound => write!(f, "inbound"),
            Self::Outbound => write!(f, "outbound"),
        }
    }
}

impl std::str::FromStr for EmailDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inbound" => Ok(Self::Inbound),
            "outbound" => Ok(Self::Outbound),
            _ => Err(format!("invalid email direction: {s}")),
        }
    }
}

/// Kind of a financial record attached to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialKind {
    Payment,
    Refund,
    Adjustment,
}

impl std::fmt::Display for FinancialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Payment => write!(f, "payment"),
            Self::Refund => write!(f, "refund"),
            Self::Adjustment => write!(f, "adjustment"),
        }
    }
}

impl std::str::FromStr for FinancialKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payment" => Ok(Self::Payment),
            "refund" => Ok(Self::Refund),
            "adjustment" => Ok(Self::Adjustment),
            _ => Err(format!("invalid financial record kind: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_happy_path() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Confirmed));
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Processing));
        assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn test_order_status_cancellation_window() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Cancelled));
        // Once shipped there is no cancelling
        assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn test_order_status_no_backwards_or_skips() {
        assert!(!OrderStatus::Confirmed.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Shipped));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Confirmed));
    }

    #[test]
    fn test_order_status_terminal() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
    }

    #[test]
    fn test_wholesale_status_graph() {
        assert!(WholesaleOrderStatus::Pending.can_transition_to(WholesaleOrderStatus::Confirmed));
        assert!(
            WholesaleOrderStatus::Confirmed.can_transition_to(WholesaleOrderStatus::InProduction)
        );
        assert!(WholesaleOrderStatus::InProduction.can_transition_to(WholesaleOrderStatus::Shipped));
        assert!(WholesaleOrderStatus::Shipped.can_transition_to(WholesaleOrderStatus::Delivered));
        assert!(!WholesaleOrderStatus::Shipped.can_transition_to(WholesaleOrderStatus::Cancelled));
        assert!(
            !WholesaleOrderStatus::Pending.can_transition_to(WholesaleOrderStatus::InProduction)
        );
    }

    #[test]
    fn test_status_text_roundtrips() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            let parsed: OrderStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert_eq!(
            "in_production".parse::<WholesaleOrderStatus>().unwrap(),
            WholesaleOrderStatus::InProduction
        );
        assert!("unknown".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_admin_role_write_gate() {
        assert!(AdminRole::SuperAdmin.can_write());
        assert!(AdminRole::Admin.can_write());
        assert!(!AdminRole::Viewer.can_write());
    }

    #[test]
    fn test_wholesale_role_order_gate() {
        assert!(WholesaleRole::Owner.can_order());
        assert!(WholesaleRole::Buyer.can_order());
        assert!(!WholesaleRole::Viewer.can_order());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("super_admin".parse::<AdminRole>().unwrap(), AdminRole::SuperAdmin);
        assert_eq!("owner".parse::<WholesaleRole>().unwrap(), WholesaleRole::Owner);
        assert!("root".parse::<AdminRole>().is_err());
    }
}

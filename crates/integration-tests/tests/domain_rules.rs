//! Cross-crate domain rules that every binary relies on.
//!
//! These run without a database or servers.

use cedarline_core::inspection::{self, PhotoCounts};
use cedarline_core::{
    AdminRole, ItemInspectionStatus, OrderStatus, PhotoReview, WholesaleOrderStatus, WholesaleRole,
};

#[test]
fn test_retail_status_graph_has_no_resurrection() {
    // Nothing leaves a terminal state.
    for terminal in [OrderStatus::Delivered, OrderStatus::Cancelled] {
        for next in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert!(
                !terminal.can_transition_to(next),
                "{terminal} must not transition to {next}"
            );
        }
        assert!(terminal.is_terminal());
    }
}

#[test]
fn test_retail_cancellation_window_closes_at_shipped() {
    assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
    assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Cancelled));
    assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Cancelled));
    assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Cancelled));
}

#[test]
fn test_wholesale_status_graph_is_linear_with_cancel() {
    use WholesaleOrderStatus as S;

    assert!(S::Pending.can_transition_to(S::Confirmed));
    assert!(S::Confirmed.can_transition_to(S::InProduction));
    assert!(S::InProduction.can_transition_to(S::Shipped));
    assert!(S::Shipped.can_transition_to(S::Delivered));

    // No skipping ahead
    assert!(!S::Pending.can_transition_to(S::InProduction));
    assert!(!S::Confirmed.can_transition_to(S::Shipped));

    // No cancelling after shipment
    assert!(!S::Shipped.can_transition_to(S::Cancelled));
}

#[test]
fn test_status_round_trips_through_text() {
    for status in [
        WholesaleOrderStatus::Pending,
        WholesaleOrderStatus::InProduction,
        WholesaleOrderStatus::Delivered,
    ] {
        let text = status.to_string();
        assert_eq!(text.parse::<WholesaleOrderStatus>(), Ok(status));
    }
}

#[test]
fn test_item_status_requires_full_review() {
    assert_eq!(inspection::item_status(&[]), ItemInspectionStatus::None);
    assert_eq!(
        inspection::item_status(&[PhotoReview::Approved, PhotoReview::Unreviewed]),
        ItemInspectionStatus::Pending
    );
    assert_eq!(
        inspection::item_status(&[PhotoReview::Approved, PhotoReview::Approved]),
        ItemInspectionStatus::Approved
    );
    assert_eq!(
        inspection::item_status(&[PhotoReview::Approved, PhotoReview::Rejected]),
        ItemInspectionStatus::Rejected
    );
}

#[test]
fn test_ready_to_ship_needs_every_item_approved() {
    // One photoless item blocks the whole order.
    assert!(!inspection::ready_to_ship(&[
        vec![PhotoReview::Approved],
        vec![],
    ]));
    assert!(!inspection::ready_to_ship(&[
        vec![PhotoReview::Approved],
        vec![PhotoReview::Unreviewed],
    ]));
    assert!(inspection::ready_to_ship(&[
        vec![PhotoReview::Approved],
        vec![PhotoReview::Approved, PhotoReview::Approved],
    ]));
}

#[test]
fn test_photo_counts_merge_across_items() {
    let a = PhotoCounts::tally(&[PhotoReview::Approved, PhotoReview::Rejected]);
    let b = PhotoCounts::tally(&[PhotoReview::Unreviewed]);
    let merged = a.merge(b);

    assert_eq!(merged.total, 3);
    assert_eq!(merged.approved, 1);
    assert_eq!(merged.rejected, 1);
    assert_eq!(merged.unreviewed, 1);
}

#[test]
fn test_role_gates() {
    assert!(AdminRole::SuperAdmin.can_write());
    assert!(AdminRole::Admin.can_write());
    assert!(!AdminRole::Viewer.can_write());

    assert!(WholesaleRole::Owner.can_order());
    assert!(WholesaleRole::Buyer.can_order());
    assert!(!WholesaleRole::Viewer.can_order());
}

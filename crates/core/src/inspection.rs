//! Inspection-photo review tally and shipping-readiness checks.
//!
//! Wholesale order items collect quality-control photos before shipment.
//! The aggregate status of an item, and of a whole order, is a stateless
//! fold over the photo review states fetched per request; nothing here is
//! persisted and the last read wins.
//!
//! Combination rules:
//! - an item with no photos is `None`
//! - any unreviewed photo makes the item `Pending`
//! - otherwise any rejected photo makes it `Rejected`
//! - otherwise `Approved`
//!
//! An order is ready to ship only when every item has at least one photo
//! and every photo is approved.

use serde::{Deserialize, Serialize};

use crate::types::{ItemInspectionStatus, PhotoReview};

/// Photo counts by review state, for display alongside the tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoCounts {
    pub total: usize,
    pub unreviewed: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl PhotoCounts {
    /// Tally review states.
    #[must_use]
    pub fn tally(reviews: &[PhotoReview]) -> Self {
        let mut counts = Self {
            total: reviews.len(),
            ..Self::default()
        };
        for review in reviews {
            match review {
                PhotoReview::Unreviewed => counts.unreviewed += 1,
                PhotoReview::Approved => counts.approved += 1,
                PhotoReview::Rejected => counts.rejected += 1,
            }
        }
        counts
    }

    /// Merge counts from another item into this one.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            unreviewed: self.unreviewed + other.unreviewed,
            approved: self.approved + other.approved,
            rejected: self.rejected + other.rejected,
        }
    }
}

/// Aggregate status of a single order item from its photo review states.
#[must_use]
pub fn item_status(reviews: &[PhotoReview]) -> ItemInspectionStatus {
    if reviews.is_empty() {
        return ItemInspectionStatus::None;
    }
    if reviews.contains(&PhotoReview::Unreviewed) {
        return ItemInspectionStatus::Pending;
    }
    if reviews.contains(&PhotoReview::Rejected) {
        return ItemInspectionStatus::Rejected;
    }
    ItemInspectionStatus::Approved
}

/// Aggregate status of a whole order from its per-item statuses.
///
/// An item without photos counts as outstanding review work: it keeps the
/// order `Pending` unless no item has any photos at all, which is `None`.
#[must_use]
pub fn order_status(items: &[ItemInspectionStatus]) -> ItemInspectionStatus {
    if items.is_empty() || items.iter().all(|s| *s == ItemInspectionStatus::None) {
        return ItemInspectionStatus::None;
    }
    if items
        .iter()
        .any(|s| matches!(s, ItemInspectionStatus::Pending | ItemInspectionStatus::None))
    {
        return ItemInspectionStatus::Pending;
    }
    if items.contains(&ItemInspectionStatus::Rejected) {
        return ItemInspectionStatus::Rejected;
    }
    ItemInspectionStatus::Approved
}

/// Whether an order may transition to `shipped`.
///
/// Each slice in `items` holds the photo review states of one order item.
/// True only when every item has at least one photo and every photo is
/// approved.
#[must_use]
pub fn ready_to_ship(items: &[Vec<PhotoReview>]) -> bool {
    !items.is_empty()
        && items.iter().all(|reviews| {
            !reviews.is_empty() && reviews.iter().all(|r| *r == PhotoReview::Approved)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_status_no_photos() {
        assert_eq!(item_status(&[]), ItemInspectionStatus::None);
    }

    #[test]
    fn test_item_status_all_approved() {
        assert_eq!(
            item_status(&[PhotoReview::Approved, PhotoReview::Approved]),
            ItemInspectionStatus::Approved
        );
    }

    #[test]
    fn test_item_status_unreviewed_wins_over_rejected() {
        // Outstanding review work dominates: a rejection only surfaces
        // once everything has been looked at.
        assert_eq!(
            item_status(&[
                PhotoReview::Rejected,
                PhotoReview::Unreviewed,
                PhotoReview::Approved
            ]),
            ItemInspectionStatus::Pending
        );
    }

    #[test]
    fn test_item_status_rejected_after_full_review() {
        assert_eq!(
            item_status(&[PhotoReview::Approved, PhotoReview::Rejected]),
            ItemInspectionStatus::Rejected
        );
    }

    #[test]
    fn test_order_status_empty_and_all_none() {
        assert_eq!(order_status(&[]), ItemInspectionStatus::None);
        assert_eq!(
            order_status(&[ItemInspectionStatus::None, ItemInspectionStatus::None]),
            ItemInspectionStatus::None
        );
    }

    #[test]
    fn test_order_status_photoless_item_keeps_order_pending() {
        assert_eq!(
            order_status(&[ItemInspectionStatus::Approved, ItemInspectionStatus::None]),
            ItemInspectionStatus::Pending
        );
    }

    #[test]
    fn test_order_status_any_pending() {
        assert_eq!(
            order_status(&[
                ItemInspectionStatus::Approved,
                ItemInspectionStatus::Pending,
                ItemInspectionStatus::Rejected
            ]),
            ItemInspectionStatus::Pending
        );
    }

    #[test]
    fn test_order_status_any_rejected() {
        assert_eq!(
            order_status(&[
                ItemInspectionStatus::Approved,
                ItemInspectionStatus::Rejected
            ]),
            ItemInspectionStatus::Rejected
        );
    }

    #[test]
    fn test_order_status_all_approved() {
        assert_eq!(
            order_status(&[
                ItemInspectionStatus::Approved,
                ItemInspectionStatus::Approved
            ]),
            ItemInspectionStatus::Approved
        );
    }

    #[test]
    fn test_ready_to_ship_all_approved() {
        let items = vec![
            vec![PhotoReview::Approved],
            vec![PhotoReview::Approved, PhotoReview::Approved],
        ];
        assert!(ready_to_ship(&items));
    }

    #[test]
    fn test_ready_to_ship_rejects_empty_order() {
        assert!(!ready_to_ship(&[]));
    }

    #[test]
    fn test_ready_to_ship_rejects_photoless_item() {
        let items = vec![vec![PhotoReview::Approved], vec![]];
        assert!(!ready_to_ship(&items));
    }

    #[test]
    fn test_ready_to_ship_rejects_unreviewed_or_rejected() {
        assert!(!ready_to_ship(&[vec![
            PhotoReview::Approved,
            PhotoReview::Unreviewed
        ]]));
        assert!(!ready_to_ship(&[vec![
            PhotoReview::Approved,
            PhotoReview::Rejected
        ]]));
    }

    #[test]
    fn test_photo_counts_tally_and_merge() {
        let a = PhotoCounts::tally(&[
            PhotoReview::Approved,
            PhotoReview::Unreviewed,
            PhotoReview::Rejected,
        ]);
        assert_eq!(
            a,
            PhotoCounts {
                total: 3,
                unreviewed: 1,
                approved: 1,
                rejected: 1
            }
        );

        let b = PhotoCounts::tally(&[PhotoReview::Approved]);
        let merged = a.merge(b);
        assert_eq!(merged.total, 4);
        assert_eq!(merged.approved, 2);
    }

    #[test]
    fn test_tally_consistent_with_item_status() {
        let reviews = [PhotoReview::Approved, PhotoReview::Approved];
        let counts = PhotoCounts::tally(&reviews);
        assert_eq!(counts.approved, counts.total);
        assert_eq!(item_status(&reviews), ItemInspectionStatus::Approved);
    }
}

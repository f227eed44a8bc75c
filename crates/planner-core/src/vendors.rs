// ABOUTME: Attaches, detaches and annotates vendor assignments within an event.
// ABOUTME: Operations target a vendor id, optionally narrowed to one category via VendorScope.

use chrono::Utc;

use crate::category::Category;
use crate::change::ChangeKind;
use crate::command::VendorScope;
use crate::config::DuplicatePolicy;
use crate::error::LedgerError;
use crate::model::{Event, EventId, VendorAssignment, VendorId};
use crate::store::LedgerStore;

impl LedgerStore {
    /// Append a fresh assignment of `vendor_id` under `category`.
    pub fn add_vendor(
        &mut self,
        event_id: &EventId,
        vendor_id: VendorId,
        category: Category,
    ) -> Result<Event, LedgerError> {
        let event = self.require(event_id)?;

        let duplicate = event
            .assignments_for(&vendor_id)
            .any(|a| a.category == category);
        if duplicate && self.config().duplicate_policy == DuplicatePolicy::Reject {
            return Err(LedgerError::DuplicateAssignment {
                event_id: event_id.clone(),
                vendor_id,
                category,
            });
        }
        if !event.categories.contains(&category) {
            tracing::warn!(
                event_id = %event_id,
                vendor_id = %vendor_id,
                category = %category,
                "vendor added under a category the event has not selected"
            );
        }

        let assignment = VendorAssignment::new(vendor_id, category, Utc::now());
        self.commit(event_id, vec![ChangeKind::VendorAdded { assignment }]);
        self.snapshot(event_id)
    }

    /// Remove the vendor's assignments within `scope`. Removal is destructive:
    /// adding the vendor again starts from a blank assignment.
    pub fn remove_vendor(
        &mut self,
        event_id: &EventId,
        vendor_id: &VendorId,
        scope: VendorScope,
    ) -> Result<Event, LedgerError> {
        self.require_assigned(event_id, vendor_id, scope)?;
        self.commit(
            event_id,
            vec![ChangeKind::VendorRemoved {
                vendor_id: vendor_id.clone(),
                category: scope.category(),
            }],
        );
        self.snapshot(event_id)
    }

    /// Overwrite comments and agreed price on every assignment of the vendor
    /// within `scope`. Blank strings clear the field.
    pub fn update_vendor_details(
        &mut self,
        event_id: &EventId,
        vendor_id: &VendorId,
        scope: VendorScope,
        comments: Option<String>,
        agreed_price: Option<String>,
    ) -> Result<Event, LedgerError> {
        self.require_assigned(event_id, vendor_id, scope)?;
        self.commit(
            event_id,
            vec![ChangeKind::VendorDetailsUpdated {
                vendor_id: vendor_id.clone(),
                category: scope.category(),
                comments: comments.filter(|s| !s.trim().is_empty()),
                agreed_price: agreed_price.filter(|s| !s.trim().is_empty()),
            }],
        );
        self.snapshot(event_id)
    }

    fn require_assigned(
        &self,
        event_id: &EventId,
        vendor_id: &VendorId,
        scope: VendorScope,
    ) -> Result<&Event, LedgerError> {
        let event = self.require(event_id)?;
        if event
            .assignments_for(vendor_id)
            .any(|a| scope.matches(a.category))
        {
            Ok(event)
        } else {
            Err(LedgerError::VendorNotAssigned {
                event_id: event_id.clone(),
                vendor_id: vendor_id.clone(),
            })
        }
    }
}

pub(crate) fn remove_matching(event: &mut Event, vendor_id: &VendorId, scope: VendorScope) {
    event
        .vendors
        .retain(|a| !(&a.vendor_id == vendor_id && scope.matches(a.category)));
}

pub(crate) fn overwrite_details(
    event: &mut Event,
    vendor_id: &VendorId,
    scope: VendorScope,
    comments: Option<String>,
    agreed_price: Option<String>,
) {
    for assignment in event
        .vendors
        .iter_mut()
        .filter(|a| &a.vendor_id == vendor_id && scope.matches(a.category))
    {
        assignment.comments = comments.clone();
        assignment.agreed_price = agreed_price.clone();
    }
}

// ABOUTME: Enforces that at most one vendor per event category holds a finalized price.
// ABOUTME: Finalizing an assignment evicts its category siblings within the same change.

use crate::category::Category;
use crate::change::ChangeKind;
use crate::error::LedgerError;
use crate::model::{Event, EventId, VendorAssignment, VendorId};
use crate::store::LedgerStore;

impl LedgerStore {
    /// Flip the finalized flag on the vendor's first assignment (within
    /// `category` when given). Turning it on clears every other assignment in
    /// that category; turning it off touches nothing else.
    pub fn toggle_finalization(
        &mut self,
        event_id: &EventId,
        vendor_id: &VendorId,
        category: Option<Category>,
    ) -> Result<Event, LedgerError> {
        let event = self.require(event_id)?;
        let target = event
            .assignments_for(vendor_id)
            .find(|a| category.is_none_or(|c| a.category == c))
            .ok_or_else(|| LedgerError::VendorNotAssigned {
                event_id: event_id.clone(),
                vendor_id: vendor_id.clone(),
            })?;

        let kind = ChangeKind::FinalizationSet {
            vendor_id: vendor_id.clone(),
            category: target.category,
            finalized: !target.price_finalized,
        };
        tracing::debug!(event_id = %event_id, vendor_id = %vendor_id, category = %target.category, finalized = !target.price_finalized, "finalization toggled");

        self.commit(event_id, vec![kind]);
        self.snapshot(event_id)
    }
}

/// The assignment holding the finalized price in `category`, if any.
pub fn finalized_vendor(event: &Event, category: Category) -> Option<&VendorAssignment> {
    event.assignments_in(category).find(|a| a.price_finalized)
}

/// Verify that no category has more than one finalized assignment. Returns
/// the first offending category.
pub fn check_exclusivity(event: &Event) -> Result<(), Category> {
    for category in Category::ALL {
        if event
            .assignments_in(category)
            .filter(|a| a.price_finalized)
            .count()
            > 1
        {
            return Err(category);
        }
    }
    Ok(())
}

/// Set the flag on the first assignment of `vendor_id` in `category`; when
/// setting it, clear it on every other assignment of that category.
pub(crate) fn set_finalized(
    event: &mut Event,
    vendor_id: &VendorId,
    category: Category,
    finalized: bool,
) {
    let Some(target) = event
        .vendors
        .iter()
        .position(|a| &a.vendor_id == vendor_id && a.category == category)
    else {
        return;
    };

    for (i, assignment) in event.vendors.iter_mut().enumerate() {
        if i == target {
            assignment.price_finalized = finalized;
        } else if finalized && assignment.category == category {
            assignment.price_finalized = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::NewEvent;
    use crate::config::LedgerConfig;

    fn setup() -> (LedgerStore, EventId) {
        let mut store = LedgerStore::new(LedgerConfig::default());
        let created = store
            .create_event(NewEvent {
                id: Some("wedding".to_string()),
                categories: vec!["Venue".to_string(), "Catering".to_string()],
                ..Default::default()
            })
            .unwrap();
        (store, created.event.id)
    }

    fn finalized(event: &Event, vendor: &str, category: Category) -> bool {
        event
            .vendors
            .iter()
            .find(|a| a.vendor_id.as_str() == vendor && a.category == category)
            .map(|a| a.price_finalized)
            .unwrap()
    }

    #[test]
    fn finalizing_second_vendor_evicts_first() {
        let (mut store, id) = setup();
        let seven = VendorId::from("7");
        let nine = VendorId::from("9");

        store.add_vendor(&id, seven.clone(), Category::Venue).unwrap();
        let event = store.toggle_finalization(&id, &seven, None).unwrap();
        assert!(finalized(&event, "7", Category::Venue));

        store.add_vendor(&id, nine.clone(), Category::Venue).unwrap();
        let event = store.toggle_finalization(&id, &nine, None).unwrap();

        assert!(!finalized(&event, "7", Category::Venue));
        assert!(finalized(&event, "9", Category::Venue));
        assert_eq!(
            finalized_vendor(&event, Category::Venue).map(|a| a.vendor_id.as_str()),
            Some("9")
        );
    }

    #[test]
    fn unfinalizing_leaves_siblings_alone() {
        let (mut store, id) = setup();
        let seven = VendorId::from("7");
        let nine = VendorId::from("9");
        store.add_vendor(&id, seven.clone(), Category::Venue).unwrap();
        store.add_vendor(&id, nine.clone(), Category::Venue).unwrap();

        store.toggle_finalization(&id, &seven, None).unwrap();
        let event = store.toggle_finalization(&id, &seven, None).unwrap();

        assert!(!finalized(&event, "7", Category::Venue));
        assert!(!finalized(&event, "9", Category::Venue));
        assert!(finalized_vendor(&event, Category::Venue).is_none());
    }

    #[test]
    fn other_categories_are_unaffected() {
        let (mut store, id) = setup();
        let seven = VendorId::from("7");
        let twelve = VendorId::from("12");
        store.add_vendor(&id, twelve.clone(), Category::Catering).unwrap();
        store.add_vendor(&id, seven.clone(), Category::Venue).unwrap();

        store.toggle_finalization(&id, &twelve, None).unwrap();
        let event = store.toggle_finalization(&id, &seven, None).unwrap();

        assert!(finalized(&event, "12", Category::Catering));
        assert!(finalized(&event, "7", Category::Venue));
    }

    #[test]
    fn vendor_in_two_categories_targets_first_match_unless_scoped() {
        let (mut store, id) = setup();
        let seven = VendorId::from("7");
        store.add_vendor(&id, seven.clone(), Category::Venue).unwrap();
        store.add_vendor(&id, seven.clone(), Category::Catering).unwrap();

        let event = store.toggle_finalization(&id, &seven, None).unwrap();
        assert!(finalized(&event, "7", Category::Venue));
        assert!(!finalized(&event, "7", Category::Catering));

        let event = store
            .toggle_finalization(&id, &seven, Some(Category::Catering))
            .unwrap();
        assert!(finalized(&event, "7", Category::Venue));
        assert!(finalized(&event, "7", Category::Catering));
    }

    #[test]
    fn toggling_unassigned_vendor_fails() {
        let (mut store, id) = setup();
        let err = store
            .toggle_finalization(&id, &VendorId::from("404"), None)
            .unwrap_err();
        assert!(matches!(err, LedgerError::VendorNotAssigned { .. }));
    }

    #[test]
    fn exclusivity_holds_after_any_toggle_sequence() {
        let (mut store, id) = setup();
        let vendors = ["1", "2", "3", "4"];
        for (n, v) in vendors.iter().enumerate() {
            let category = if n % 2 == 0 {
                Category::Venue
            } else {
                Category::Catering
            };
            store.add_vendor(&id, VendorId::from(*v), category).unwrap();
            store.add_vendor(&id, VendorId::from(*v), Category::Venue).unwrap();
        }

        let sequence = ["1", "2", "2", "3", "1", "4", "4", "3", "2", "1", "1", "4"];
        for (step, v) in sequence.iter().enumerate() {
            let category = if step % 3 == 0 { Some(Category::Venue) } else { None };
            let event = store
                .toggle_finalization(&id, &VendorId::from(*v), category)
                .unwrap();
            assert_eq!(check_exclusivity(&event), Ok(()), "violated at step {}", step);
        }
    }

    #[test]
    fn update_event_cannot_bypass_exclusivity() {
        let (mut store, id) = setup();
        store.add_vendor(&id, VendorId::from("7"), Category::Venue).unwrap();
        store.add_vendor(&id, VendorId::from("9"), Category::Venue).unwrap();

        let err = store
            .update_event(&id, |e| {
                let mut next = e.clone();
                for a in &mut next.vendors {
                    a.price_finalized = true;
                }
                next
            })
            .unwrap_err();

        assert_eq!(err, LedgerError::FinalizationConflict(Category::Venue));
        assert!(finalized_vendor(store.find_event(&id).unwrap(), Category::Venue).is_none());
    }
}

// ABOUTME: Defines LedgerState, the materialized set of events built by folding changes.
// ABOUTME: apply() replaces the affected Event record with an updated copy in one step.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::budget;
use crate::change::{Change, ChangeKind};
use crate::command::VendorScope;
use crate::finalization;
use crate::model::{Event, EventId};
use crate::vendors;

/// All events known to the ledger, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    pub events: BTreeMap<EventId, Event>,
    pub last_seq: u64,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.events.get(id)
    }

    /// Apply a single change. Changes for unknown events are ignored; the
    /// store validates existence before producing them.
    pub fn apply(&mut self, change: &Change) {
        self.last_seq = change.seq;

        match &change.kind {
            ChangeKind::EventCreated { event, .. } | ChangeKind::EventReplaced { event } => {
                self.events.insert(change.event_id.clone(), event.clone());
            }

            ChangeKind::EventDeleted => {
                self.events.remove(&change.event_id);
            }

            kind => {
                let Some(current) = self.events.get(&change.event_id) else {
                    tracing::warn!(event_id = %change.event_id, seq = change.seq, "change for unknown event ignored");
                    return;
                };
                let mut next = current.clone();
                apply_to_event(&mut next, kind);
                next.updated_at = change.timestamp;
                debug_assert!(finalization::check_exclusivity(&next).is_ok());
                self.events.insert(change.event_id.clone(), next);
            }
        }
    }
}

/// Fold one record-level change into a working copy of an event.
fn apply_to_event(event: &mut Event, kind: &ChangeKind) {
    match kind {
        ChangeKind::DetailsUpdated {
            name,
            event_type,
            date,
            location,
            description,
        } => {
            if let Some(n) = name {
                event.name = n.clone();
            }
            if let Some(t) = event_type {
                event.event_type = t.clone();
            }
            if let Some(d) = date {
                event.date = *d;
            }
            if let Some(l) = location {
                event.location = l.clone();
            }
            if let Some(d) = description {
                event.description = Some(d.clone()).filter(|s| !s.is_empty());
            }
        }

        ChangeKind::StatusChanged { status } => {
            event.status = *status;
        }

        ChangeKind::VendorAdded { assignment } => {
            event.vendors.push(assignment.clone());
        }

        ChangeKind::VendorRemoved {
            vendor_id,
            category,
        } => {
            vendors::remove_matching(event, vendor_id, VendorScope::from(*category));
        }

        ChangeKind::VendorDetailsUpdated {
            vendor_id,
            category,
            comments,
            agreed_price,
        } => {
            vendors::overwrite_details(
                event,
                vendor_id,
                VendorScope::from(*category),
                comments.clone(),
                agreed_price.clone(),
            );
        }

        ChangeKind::FinalizationSet {
            vendor_id,
            category,
            finalized,
        } => {
            finalization::set_finalized(event, vendor_id, *category, *finalized);
        }

        ChangeKind::CategoryBudgetSet { category, amount } => {
            budget::set_category_amount(event, *category, *amount);
        }

        ChangeKind::SpendRecorded { amount } => {
            event.spent += amount;
        }

        ChangeKind::ProgressSynced { stats } => {
            event.tasks = *stats;
        }

        ChangeKind::EventCreated { .. }
        | ChangeKind::EventReplaced { .. }
        | ChangeKind::EventDeleted => {}
    }
}

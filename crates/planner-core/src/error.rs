// ABOUTME: Typed errors returned by ledger commands and queries.
// ABOUTME: Every variant is recoverable; the ledger is left unchanged when one is returned.

use thiserror::Error;

use crate::category::Category;
use crate::model::{EventId, EventStatus, VendorId};

/// Errors that can occur when validating or applying a ledger command.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    #[error("event already exists: {0}")]
    DuplicateEvent(EventId),

    #[error("vendor {vendor_id} is not assigned to event {event_id}")]
    VendorNotAssigned { event_id: EventId, vendor_id: VendorId },

    #[error("vendor {vendor_id} is already assigned to {category} in event {event_id}")]
    DuplicateAssignment {
        event_id: EventId,
        vendor_id: VendorId,
        category: Category,
    },

    #[error("budget is not a non-negative number: {0:?}")]
    InvalidBudget(String),

    #[error("amount must be a finite, non-negative number: {0}")]
    InvalidAmount(f64),

    #[error("date is not in YYYY-MM-DD form: {0:?}")]
    InvalidDate(String),

    #[error("unknown category: {0:?}")]
    UnknownCategory(String),

    #[error("more than one finalized price in {0}")]
    FinalizationConflict(Category),

    #[error("cannot move event from {from} to {to}")]
    InvalidStatusTransition { from: EventStatus, to: EventStatus },
}

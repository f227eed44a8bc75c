// ABOUTME: Defines the Change envelope and all change kinds produced by validated commands.
// ABOUTME: Changes are facts that LedgerState folds in; applying them cannot fail.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::model::{Event, EventId, EventStatus, VendorAssignment, VendorId};
use crate::progress::TaskStats;
use crate::tasks::Task;

/// A sequenced, timestamped change to one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub seq: u64,
    pub event_id: EventId,
    pub timestamp: DateTime<Utc>,
    pub kind: ChangeKind,
}

/// Everything that can happen to an event. Each variant carries values that
/// have already been validated against the state it will be applied to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChangeKind {
    EventCreated {
        event: Event,
        initial_tasks: Vec<Task>,
    },
    EventReplaced {
        event: Event,
    },
    DetailsUpdated {
        name: Option<String>,
        event_type: Option<String>,
        date: Option<NaiveDate>,
        location: Option<String>,
        description: Option<String>,
    },
    StatusChanged {
        status: EventStatus,
    },
    EventDeleted,
    VendorAdded {
        assignment: VendorAssignment,
    },
    VendorRemoved {
        vendor_id: VendorId,
        category: Option<Category>,
    },
    VendorDetailsUpdated {
        vendor_id: VendorId,
        category: Option<Category>,
        comments: Option<String>,
        agreed_price: Option<String>,
    },
    /// Sets the first assignment of `vendor_id` under `category`. When
    /// `finalized` is true every sibling in that category is cleared.
    FinalizationSet {
        vendor_id: VendorId,
        category: Category,
        finalized: bool,
    },
    CategoryBudgetSet {
        category: Category,
        amount: f64,
    },
    SpendRecorded {
        amount: f64,
    },
    ProgressSynced {
        stats: TaskStats,
    },
}

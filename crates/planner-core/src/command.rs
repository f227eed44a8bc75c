// ABOUTME: Defines the Command enum, the only write surface of the planning ledger.
// ABOUTME: Commands are intent-based inputs that get validated and converted into changes.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::model::{EventId, EventStatus, VendorId};
use crate::tasks::Task;

/// A budget as supplied by a form: either a JSON number or free text such as "100000".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BudgetInput {
    Number(f64),
    Text(String),
}

impl From<f64> for BudgetInput {
    fn from(value: f64) -> Self {
        BudgetInput::Number(value)
    }
}

impl From<&str> for BudgetInput {
    fn from(value: &str) -> Self {
        BudgetInput::Text(value.to_string())
    }
}

/// Loosely typed input for creating an event. Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(alias = "type")]
    pub event_type: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "totalBudget")]
    pub total_budget: Option<BudgetInput>,
    pub categories: Vec<String>,
}

/// Partial update of an event's descriptive fields. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventDetailsPatch {
    pub name: Option<String>,
    #[serde(alias = "type")]
    pub event_type: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Which assignments of a vendor an operation touches. Commands carry it as
/// an optional `category` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VendorScope {
    /// Every assignment of the vendor, whatever the category.
    #[default]
    All,
    /// Only the assignment(s) under one category.
    Category(Category),
}

impl VendorScope {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            VendorScope::All => true,
            VendorScope::Category(c) => *c == category,
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            VendorScope::All => None,
            VendorScope::Category(c) => Some(*c),
        }
    }
}

impl From<Option<Category>> for VendorScope {
    fn from(category: Option<Category>) -> Self {
        category.map_or(VendorScope::All, VendorScope::Category)
    }
}

/// A command representing a desired mutation of the ledger. Commands are
/// validated and translated into one or more changes by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    CreateEvent {
        event: NewEvent,
    },
    UpdateDetails {
        event_id: EventId,
        patch: EventDetailsPatch,
    },
    SetStatus {
        event_id: EventId,
        status: EventStatus,
    },
    DeleteEvent {
        event_id: EventId,
    },
    AddVendor {
        event_id: EventId,
        vendor_id: VendorId,
        category: Category,
    },
    RemoveVendor {
        event_id: EventId,
        vendor_id: VendorId,
        #[serde(default)]
        category: Option<Category>,
    },
    UpdateVendorDetails {
        event_id: EventId,
        vendor_id: VendorId,
        #[serde(default)]
        category: Option<Category>,
        #[serde(default)]
        comments: Option<String>,
        #[serde(default)]
        agreed_price: Option<String>,
    },
    ToggleFinalization {
        event_id: EventId,
        vendor_id: VendorId,
        #[serde(default)]
        category: Option<Category>,
    },
    UpdateCategoryBudget {
        event_id: EventId,
        category: Category,
        amount: f64,
    },
    RecordSpend {
        event_id: EventId,
        amount: f64,
    },
    SyncProgress {
        tasks: Vec<Task>,
    },
}

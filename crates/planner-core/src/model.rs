// ABOUTME: Defines the Event record and the values it owns: vendor assignments and category budgets.
// ABOUTME: Also holds the id newtypes and the EventStatus lifecycle enum.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::category::Category;
use crate::progress::TaskStats;

/// Identifier of an event. Caller-supplied or generated from a ULID.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh id backed by a ULID, so generated ids sort by creation time.
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier of a vendor in the external catalog. The ledger never owns vendors.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorId(String);

impl VendorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VendorId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Where an event is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Planning,
    Active,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Planning => "planning",
            EventStatus::Active => "active",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }

    /// Whether an event may move from `self` to `to`. Staying put is always allowed.
    pub fn can_transition_to(&self, to: EventStatus) -> bool {
        use EventStatus::*;
        matches!(
            (*self, to),
            (Planning, Active)
                | (Planning | Active, Completed)
                | (Planning | Active, Cancelled)
                | (Cancelled, Planning)
        ) || *self == to
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One vendor linked to one event within one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorAssignment {
    pub vendor_id: VendorId,
    pub category: Category,
    pub added_at: DateTime<Utc>,
    pub comments: Option<String>,
    pub agreed_price: Option<String>,
    pub price_finalized: bool,
}

impl VendorAssignment {
    /// A fresh assignment: no comments, no price, not finalized.
    pub fn new(vendor_id: VendorId, category: Category, added_at: DateTime<Utc>) -> Self {
        Self {
            vendor_id,
            category,
            added_at,
            comments: None,
            agreed_price: None,
            price_finalized: false,
        }
    }

    /// Parse the agreed price as a number, ignoring currency symbols and
    /// thousands separators. Returns None when no usable number is present.
    pub fn agreed_amount(&self) -> Option<f64> {
        let raw = self.agreed_price.as_deref()?;
        let cleaned: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();
        cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

/// The allocation for one category within one event.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryBudget {
    pub amount: f64,
    pub percentage: f64,
}

/// One occasion being planned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub event_type: String,
    pub date: NaiveDate,
    pub location: String,
    pub status: EventStatus,
    pub description: Option<String>,
    pub budget: f64,
    pub spent: f64,
    pub tasks: TaskStats,
    pub categories: Vec<Category>,
    pub category_budgets: BTreeMap<Category, CategoryBudget>,
    pub vendors: Vec<VendorAssignment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Integer completion percentage derived from the task counts.
    pub fn progress(&self) -> u8 {
        self.tasks.progress()
    }

    /// All assignments for the given vendor, in insertion order.
    pub fn assignments_for<'a>(
        &'a self,
        vendor_id: &'a VendorId,
    ) -> impl Iterator<Item = &'a VendorAssignment> + 'a {
        self.vendors.iter().filter(move |a| &a.vendor_id == vendor_id)
    }

    /// All assignments in the given category, in insertion order.
    pub fn assignments_in(&self, category: Category) -> impl Iterator<Item = &VendorAssignment> {
        self.vendors.iter().filter(move |a| a.category == category)
    }
}

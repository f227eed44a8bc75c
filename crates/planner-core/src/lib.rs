// ABOUTME: Core library for the planner: the event planning ledger and its supporting types.
// ABOUTME: Covers events, vendor assignments, category budgets, price finalization and task progress.

pub mod actor;
pub mod budget;
pub mod catalog;
pub mod category;
pub mod change;
pub mod command;
pub mod config;
pub mod error;
pub mod export;
pub mod finalization;
pub mod model;
pub mod progress;
pub mod script;
pub mod state;
pub mod store;
pub mod summary;
pub mod tasks;
pub mod vendors;

pub use category::Category;
pub use change::{Change, ChangeKind};
pub use command::{BudgetInput, Command, EventDetailsPatch, NewEvent, VendorScope};
pub use config::{DuplicatePolicy, LedgerConfig};
pub use error::LedgerError;
pub use model::{CategoryBudget, Event, EventId, EventStatus, VendorAssignment, VendorId};
pub use progress::TaskStats;
pub use state::LedgerState;
pub use store::{CreatedEvent, LedgerStore};
pub use summary::EventSummary;
pub use tasks::{ChecklistGenerator, Task, TaskBoard, TaskGenerator};

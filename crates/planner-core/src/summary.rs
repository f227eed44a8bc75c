// ABOUTME: Builds EventSummary, the derived read model handed to display collaborators.
// ABOUTME: Joins an Event with vendor catalog names and derived progress and budget figures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::budget::{BudgetSummary, budget_summary, category_budget};
use crate::catalog::VendorCatalog;
use crate::category::Category;
use crate::model::{Event, EventStatus};

/// One vendor line within a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorLine {
    pub vendor_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreed_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub finalized: bool,
}

/// Allocation and vendors for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    pub amount: f64,
    pub percentage: f64,
    pub vendors: Vec<VendorLine>,
}

/// Everything a screen needs to show one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: String,
    pub name: String,
    pub event_type: String,
    pub date: NaiveDate,
    pub location: String,
    pub status: EventStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub progress: u8,
    pub budget: BudgetSummary,
    pub categories: Vec<CategorySummary>,
}

impl EventSummary {
    /// Summarize an event. Categories appear in selection order, followed by
    /// any category that only has a budget or vendors.
    pub fn new(event: &Event, catalog: &dyn VendorCatalog) -> Self {
        let mut order: Vec<Category> = event.categories.clone();
        let extra = event
            .category_budgets
            .keys()
            .copied()
            .chain(event.vendors.iter().map(|a| a.category));
        for category in extra {
            if !order.contains(&category) {
                order.push(category);
            }
        }

        let categories = order
            .into_iter()
            .map(|category| {
                let budget = category_budget(event, category);
                let vendors = event
                    .assignments_in(category)
                    .map(|a| VendorLine {
                        vendor_id: a.vendor_id.to_string(),
                        name: catalog.display_name(&a.vendor_id),
                        agreed_price: a.agreed_price.clone(),
                        comments: a.comments.clone(),
                        finalized: a.price_finalized,
                    })
                    .collect();
                CategorySummary {
                    category,
                    amount: budget.amount,
                    percentage: budget.percentage,
                    vendors,
                }
            })
            .collect();

        Self {
            id: event.id.to_string(),
            name: event.name.clone(),
            event_type: event.event_type.clone(),
            date: event.date,
            location: event.location.clone(),
            status: event.status,
            description: event.description.clone(),
            total_tasks: event.tasks.total,
            completed_tasks: event.tasks.completed,
            progress: event.progress(),
            budget: budget_summary(event),
            categories,
        }
    }
}

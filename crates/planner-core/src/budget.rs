// ABOUTME: Tracks per-category budget allocation, the event total, and advisory spend.
// ABOUTME: Category writes move the total by exactly the delta and renormalize every percentage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::change::ChangeKind;
use crate::error::LedgerError;
use crate::finalization::finalized_vendor;
use crate::model::{CategoryBudget, Event, EventId};
use crate::store::LedgerStore;

/// Budget figures for one event, derived on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub total: f64,
    pub allocated: f64,
    pub unallocated: f64,
    pub spent: f64,
    /// `total - spent`; negative when the event is over budget.
    pub remaining: f64,
    /// Agreed price of the finalized vendor per category, where it parses.
    pub committed: BTreeMap<Category, f64>,
}

impl LedgerStore {
    /// Set one category's allocation. The event total moves by
    /// `new_amount - old_amount`, where an unbudgeted category counts as 0.
    pub fn update_category_budget(
        &mut self,
        event_id: &EventId,
        category: Category,
        new_amount: f64,
    ) -> Result<Event, LedgerError> {
        validate_amount(new_amount)?;
        let event = self.require(event_id)?;
        let old_amount = category_budget(event, category).amount;
        let next_total = event.budget + new_amount - old_amount;
        if next_total < 0.0 {
            return Err(LedgerError::InvalidBudget(next_total.to_string()));
        }
        self.commit(
            event_id,
            vec![ChangeKind::CategoryBudgetSet {
                category,
                amount: new_amount,
            }],
        );
        self.snapshot(event_id)
    }

    /// Add to the event's advisory spend.
    pub fn record_spend(&mut self, event_id: &EventId, amount: f64) -> Result<Event, LedgerError> {
        validate_amount(amount)?;
        self.require(event_id)?;
        self.commit(event_id, vec![ChangeKind::SpendRecorded { amount }]);
        self.snapshot(event_id)
    }
}

pub(crate) fn validate_amount(amount: f64) -> Result<(), LedgerError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount(amount))
    }
}

pub(crate) fn set_category_amount(event: &mut Event, category: Category, new_amount: f64) {
    let old_amount = event
        .category_budgets
        .get(&category)
        .map_or(0.0, |b| b.amount);
    let delta = new_amount - old_amount;

    event.budget += delta;
    event.category_budgets.entry(category).or_default().amount = new_amount;
    renormalize(event);
}

/// Recompute every category's share of the current total.
pub(crate) fn renormalize(event: &mut Event) {
    let total = event.budget;
    for budget in event.category_budgets.values_mut() {
        budget.percentage = percentage_of(budget.amount, total);
    }
}

fn percentage_of(amount: f64, total: f64) -> f64 {
    if total > 0.0 {
        amount / total * 100.0
    } else {
        0.0
    }
}

/// Summarize totals, allocation, spend and finalized commitments.
pub fn budget_summary(event: &Event) -> BudgetSummary {
    let allocated: f64 = event.category_budgets.values().map(|b| b.amount).sum();
    let committed = event
        .categories
        .iter()
        .chain(event.category_budgets.keys())
        .filter_map(|c| {
            finalized_vendor(event, *c)
                .and_then(|a| a.agreed_amount())
                .map(|amount| (*c, amount))
        })
        .collect();

    BudgetSummary {
        total: event.budget,
        allocated,
        unallocated: (event.budget - allocated).max(0.0),
        spent: event.spent,
        remaining: event.budget - event.spent,
        committed,
    }
}

/// Budget of one category, zero when it was never set.
pub fn category_budget(event: &Event, category: Category) -> CategoryBudget {
    event
        .category_budgets
        .get(&category)
        .copied()
        .unwrap_or_default()
}

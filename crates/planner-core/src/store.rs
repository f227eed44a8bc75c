// ABOUTME: LedgerStore owns the authoritative event collection and is the single writer to it.
// ABOUTME: Commands are validated against current state, turned into changes, then applied atomically.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};

use crate::category::parse_categories;
use crate::change::{Change, ChangeKind};
use crate::command::{BudgetInput, Command, EventDetailsPatch, NewEvent};
use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::budget;
use crate::finalization;
use crate::model::{Event, EventId, EventStatus};
use crate::progress::{self, TaskStats};
use crate::state::LedgerState;
use crate::tasks::{ChecklistGenerator, Task, TaskGenerator};

/// The result of creating an event: the stored record and the tasks the
/// generator produced for it. The caller keeps the tasks.
#[derive(Debug, Clone)]
pub struct CreatedEvent {
    pub event: Event,
    pub tasks: Vec<Task>,
}

/// Holds every event and applies mutations one at a time. Readers only ever
/// get shared references or owned copies.
pub struct LedgerStore {
    config: LedgerConfig,
    generator: Box<dyn TaskGenerator>,
    state: LedgerState,
    /// Collects the changes committed while `execute` runs a command.
    recording: Option<Vec<Change>>,
}

impl LedgerStore {
    /// Create an empty store using the checklist task generator.
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_generator(config, ChecklistGenerator)
    }

    pub fn with_generator(config: LedgerConfig, generator: impl TaskGenerator + 'static) -> Self {
        Self {
            config,
            generator: Box::new(generator),
            state: LedgerState::new(),
            recording: None,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Look up an event. A missing id is an ordinary outcome, not an error.
    pub fn find_event(&self, id: &EventId) -> Option<&Event> {
        self.state.event(id)
    }

    /// Events ordered by id.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.state.events.values()
    }

    pub fn len(&self) -> usize {
        self.state.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.events.is_empty()
    }

    /// Run any command and return the changes it produced. A failed command
    /// produces none.
    pub fn execute(&mut self, cmd: Command) -> Result<Vec<Change>, LedgerError> {
        self.recording = Some(Vec::new());
        let result = self.dispatch(cmd);
        let changes = self.recording.take().unwrap_or_default();
        result.map(|()| changes)
    }

    fn dispatch(&mut self, cmd: Command) -> Result<(), LedgerError> {
        match cmd {
            Command::CreateEvent { event } => {
                self.create_event(event)?;
            }
            Command::UpdateDetails { event_id, patch } => {
                self.update_details(&event_id, patch)?;
            }
            Command::SetStatus { event_id, status } => {
                self.set_status(&event_id, status)?;
            }
            Command::DeleteEvent { event_id } => {
                self.delete_event(&event_id)?;
            }
            Command::AddVendor {
                event_id,
                vendor_id,
                category,
            } => {
                self.add_vendor(&event_id, vendor_id, category)?;
            }
            Command::RemoveVendor {
                event_id,
                vendor_id,
                category,
            } => {
                self.remove_vendor(&event_id, &vendor_id, category.into())?;
            }
            Command::UpdateVendorDetails {
                event_id,
                vendor_id,
                category,
                comments,
                agreed_price,
            } => {
                self.update_vendor_details(
                    &event_id,
                    &vendor_id,
                    category.into(),
                    comments,
                    agreed_price,
                )?;
            }
            Command::ToggleFinalization {
                event_id,
                vendor_id,
                category,
            } => {
                self.toggle_finalization(&event_id, &vendor_id, category)?;
            }
            Command::UpdateCategoryBudget {
                event_id,
                category,
                amount,
            } => {
                self.update_category_budget(&event_id, category, amount)?;
            }
            Command::RecordSpend { event_id, amount } => {
                self.record_spend(&event_id, amount)?;
            }
            Command::SyncProgress { tasks } => {
                self.sync_progress(&tasks);
            }
        }

        Ok(())
    }

    /// Build an event from loosely typed input, ask the task generator for
    /// its initial tasks and store it.
    pub fn create_event(&mut self, input: NewEvent) -> Result<CreatedEvent, LedgerError> {
        let id = match input.id.filter(|s| !s.trim().is_empty()) {
            Some(id) => EventId::new(id),
            None => EventId::generate(),
        };
        if self.state.events.contains_key(&id) {
            return Err(LedgerError::DuplicateEvent(id));
        }

        let budget = parse_budget(input.total_budget.as_ref())?;
        let date = match input.date.as_deref() {
            Some(raw) => parse_date(raw)?,
            None => Utc::now().date_naive(),
        };
        let categories = parse_categories(&input.categories)?;

        let tasks = self.generator.generate(&id, date, &categories);
        let now = Utc::now();
        let event = Event {
            id: id.clone(),
            name: non_blank(input.name).unwrap_or_else(|| "Untitled Event".to_string()),
            event_type: non_blank(input.event_type).unwrap_or_else(|| "Event".to_string()),
            date,
            location: non_blank(input.location)
                .unwrap_or_else(|| self.config.default_location.clone()),
            status: EventStatus::Planning,
            description: non_blank(input.description),
            budget,
            spent: 0.0,
            tasks: TaskStats::new(tasks.len() as u32, 0),
            categories,
            category_budgets: BTreeMap::new(),
            vendors: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        tracing::info!(event_id = %id, tasks = tasks.len(), "event created");
        self.commit(
            &id,
            vec![ChangeKind::EventCreated {
                event: event.clone(),
                initial_tasks: tasks.clone(),
            }],
        );

        Ok(CreatedEvent { event, tasks })
    }

    /// Apply a pure transformation to one event and store the result. The id,
    /// creation time and task counts cannot be changed by the mutator. Amounts
    /// must stay finite and non-negative, and the result must still hold at
    /// most one finalized price per category.
    pub fn update_event<F>(&mut self, id: &EventId, mutator: F) -> Result<Event, LedgerError>
    where
        F: FnOnce(&Event) -> Event,
    {
        let current = self.require(id)?;
        let mut next = mutator(current);
        next.id = current.id.clone();
        next.created_at = current.created_at;
        next.tasks = current.tasks;
        next.updated_at = Utc::now();

        let amounts = [next.budget, next.spent]
            .into_iter()
            .chain(next.category_budgets.values().map(|b| b.amount));
        for amount in amounts {
            budget::validate_amount(amount)?;
        }
        finalization::check_exclusivity(&next).map_err(LedgerError::FinalizationConflict)?;

        self.commit(id, vec![ChangeKind::EventReplaced { event: next }]);
        self.snapshot(id)
    }

    /// Patch descriptive fields, validating the date like creation does.
    pub fn update_details(
        &mut self,
        id: &EventId,
        patch: EventDetailsPatch,
    ) -> Result<Event, LedgerError> {
        self.require(id)?;
        let date = patch.date.as_deref().map(parse_date).transpose()?;
        self.commit(
            id,
            vec![ChangeKind::DetailsUpdated {
                name: non_blank(patch.name),
                event_type: non_blank(patch.event_type),
                date,
                location: non_blank(patch.location),
                description: patch.description,
            }],
        );
        self.snapshot(id)
    }

    /// Move an event through its lifecycle.
    pub fn set_status(&mut self, id: &EventId, status: EventStatus) -> Result<Event, LedgerError> {
        let current = self.require(id)?;
        let from = current.status;
        if from == status {
            return Ok(current.clone());
        }
        if !from.can_transition_to(status) {
            return Err(LedgerError::InvalidStatusTransition { from, to: status });
        }
        self.commit(id, vec![ChangeKind::StatusChanged { status }]);
        self.snapshot(id)
    }

    /// Remove an event and return the record as it was.
    pub fn delete_event(&mut self, id: &EventId) -> Result<Event, LedgerError> {
        let removed = self.require(id)?.clone();
        tracing::info!(event_id = %id, "event deleted");
        self.commit(id, vec![ChangeKind::EventDeleted]);
        Ok(removed)
    }

    /// Recompute task counts for every event from the full task list. Events
    /// without tasks drop to zero. Returns the ids whose counts changed, so a
    /// second call with the same list returns nothing.
    pub fn sync_progress(&mut self, tasks: &[Task]) -> Vec<EventId> {
        let stats = progress::aggregate(tasks);
        let changed: Vec<(EventId, TaskStats)> = self
            .state
            .events
            .values()
            .filter_map(|event| {
                let next = stats.get(&event.id).copied().unwrap_or_default();
                (next != event.tasks).then(|| (event.id.clone(), next))
            })
            .collect();

        for (id, stats) in &changed {
            self.commit(id, vec![ChangeKind::ProgressSynced { stats: *stats }]);
        }
        if !changed.is_empty() {
            tracing::debug!(events = changed.len(), "task progress synced");
        }
        changed.into_iter().map(|(id, _)| id).collect()
    }

    /// Fetch an event or fail with `EventNotFound`.
    pub(crate) fn require(&self, id: &EventId) -> Result<&Event, LedgerError> {
        self.state
            .event(id)
            .ok_or_else(|| LedgerError::EventNotFound(id.clone()))
    }

    /// Owned copy of an event after a change was applied.
    pub(crate) fn snapshot(&self, id: &EventId) -> Result<Event, LedgerError> {
        self.require(id).cloned()
    }

    /// Sequence, timestamp and apply a batch of validated changes. All of them
    /// land before any reader can observe the state again.
    pub(crate) fn commit(&mut self, id: &EventId, kinds: Vec<ChangeKind>) -> Vec<Change> {
        let now = Utc::now();
        let changes: Vec<Change> = kinds
            .into_iter()
            .map(|kind| {
                let seq = self.state.last_seq + 1;
                let change = Change {
                    seq,
                    event_id: id.clone(),
                    timestamp: now,
                    kind,
                };
                self.state.apply(&change);
                change
            })
            .collect();

        for change in &changes {
            tracing::debug!(event_id = %id, seq = change.seq, "change applied");
        }
        if let Some(recording) = self.recording.as_mut() {
            recording.extend(changes.iter().cloned());
        }
        changes
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Parse a budget from a number or numeric text. Blank or missing input is 0;
/// anything else that is not a finite, non-negative number is rejected.
pub(crate) fn parse_budget(input: Option<&BudgetInput>) -> Result<f64, LedgerError> {
    let value = match input {
        None => return Ok(0.0),
        Some(BudgetInput::Number(n)) => *n,
        Some(BudgetInput::Text(raw)) => {
            let cleaned: String = raw
                .trim()
                .chars()
                .filter(|c| *c != ',' && *c != '_')
                .collect();
            if cleaned.is_empty() {
                return Ok(0.0);
            }
            cleaned
                .parse::<f64>()
                .map_err(|_| LedgerError::InvalidBudget(raw.clone()))?
        }
    };

    if !value.is_finite() || value < 0.0 {
        let shown = match input {
            Some(BudgetInput::Text(raw)) => raw.clone(),
            _ => value.to_string(),
        };
        return Err(LedgerError::InvalidBudget(shown));
    }
    Ok(value)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| LedgerError::InvalidDate(raw.to_string()))
}

// ABOUTME: Task records consumed by the ledger, plus the generator seam called on event creation.
// ABOUTME: Ships a checklist generator and an in-memory TaskBoard standing in for the task collaborator.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::model::EventId;

/// A to-do item belonging to an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub event_id: EventId,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub category: Option<Category>,
    pub completed: bool,
}

impl Task {
    pub fn new(id: impl Into<String>, event_id: EventId, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            event_id,
            title: title.into(),
            due_date: None,
            category: None,
            completed: false,
        }
    }
}

/// Produces the initial task set for a newly created event. Called exactly
/// once per `CreateEvent`.
pub trait TaskGenerator: Send + Sync {
    fn generate(&self, event_id: &EventId, date: NaiveDate, categories: &[Category]) -> Vec<Task>;
}

/// (title, days before the event) for tasks every event gets.
const GENERAL_TASKS: &[(&str, u64)] = &[
    ("Set the overall budget", 180),
    ("Draft the guest list", 150),
    ("Confirm final guest count", 14),
];

fn category_tasks(category: Category) -> &'static [(&'static str, u64)] {
    match category {
        Category::Venue => &[("Shortlist venues", 160), ("Book the venue", 120)],
        Category::Catering => &[("Schedule a tasting", 90), ("Finalize the menu", 30)],
        Category::Photography => &[("Review photographer portfolios", 120), ("Agree on a shot list", 21)],
        Category::Videography => &[("Book a videographer", 110), ("Share the run of show", 14)],
        Category::Decoration => &[("Pick a theme and palette", 100), ("Confirm decor setup time", 10)],
        Category::Entertainment => &[("Book entertainment", 90), ("Send the playlist", 14)],
        Category::Attire => &[("Order outfits", 120), ("Final fitting", 7)],
        Category::Invitations => &[("Design invitations", 100), ("Send invitations", 60)],
    }
}

/// Generates a fixed checklist: general planning tasks plus two tasks for
/// each selected category. Due dates count back from the event date.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChecklistGenerator;

impl TaskGenerator for ChecklistGenerator {
    fn generate(&self, event_id: &EventId, date: NaiveDate, categories: &[Category]) -> Vec<Task> {
        let general = GENERAL_TASKS.iter().map(|(title, days)| (None, *title, *days));
        let per_category = categories.iter().flat_map(|c| {
            category_tasks(*c)
                .iter()
                .map(move |(title, days)| (Some(*c), *title, *days))
        });

        general
            .chain(per_category)
            .enumerate()
            .map(|(n, (category, title, days_before))| Task {
                id: format!("{}-{}", event_id, n + 1),
                event_id: event_id.clone(),
                title: title.to_string(),
                due_date: date.checked_sub_days(Days::new(days_before)),
                category,
                completed: false,
            })
            .collect()
    }
}

/// In-memory task collection. The ledger never owns tasks; hosts that have
/// no task service of their own can keep them here and hand the slice to
/// `LedgerStore::sync_progress` after every change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn extend(&mut self, tasks: impl IntoIterator<Item = Task>) {
        self.tasks.extend(tasks);
    }

    /// Mark a task complete. Returns false if no task has that id.
    pub fn complete(&mut self, task_id: &str) -> bool {
        self.set_completed(task_id, true)
    }

    /// Mark a task incomplete. Returns false if no task has that id.
    pub fn reopen(&mut self, task_id: &str) -> bool {
        self.set_completed(task_id, false)
    }

    /// Drop every task owned by the given event.
    pub fn remove_event(&mut self, event_id: &EventId) {
        self.tasks.retain(|t| &t.event_id != event_id);
    }

    fn set_completed(&mut self, task_id: &str, completed: bool) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                task.completed = completed;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn checklist_has_general_and_category_tasks() {
        let id = EventId::from("wedding");
        let tasks = ChecklistGenerator.generate(
            &id,
            date("2027-06-12"),
            &[Category::Venue, Category::Catering],
        );

        assert_eq!(tasks.len(), GENERAL_TASKS.len() + 4);
        assert!(tasks.iter().all(|t| t.event_id == id && !t.completed));
        assert_eq!(
            tasks.iter().filter(|t| t.category == Some(Category::Venue)).count(),
            2
        );
        assert_eq!(tasks[0].id, "wedding-1");
        assert_eq!(tasks[0].due_date, Some(date("2026-12-14")));
    }

    #[test]
    fn checklist_ids_are_unique() {
        let tasks = ChecklistGenerator.generate(
            &EventId::from("e"),
            date("2027-01-01"),
            &Category::ALL,
        );
        let mut ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), tasks.len());
    }

    #[test]
    fn board_completes_and_reopens() {
        let mut board = TaskBoard::new();
        board.extend(vec![Task::new("t1", EventId::from("e"), "Call venue")]);

        assert!(board.complete("t1"));
        assert!(board.tasks()[0].completed);
        assert!(board.reopen("t1"));
        assert!(!board.tasks()[0].completed);
        assert!(!board.complete("missing"));
    }

    #[test]
    fn board_removes_event_tasks() {
        let mut board = TaskBoard::new();
        board.extend(vec![
            Task::new("a1", EventId::from("a"), "One"),
            Task::new("b1", EventId::from("b"), "Two"),
        ]);

        board.remove_event(&EventId::from("a"));

        assert_eq!(board.tasks().len(), 1);
        assert_eq!(board.tasks()[0].id, "b1");
    }
}

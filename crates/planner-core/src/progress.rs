// ABOUTME: Derives per-event task counts and completion percentage from an external task list.
// ABOUTME: The derivation is pure; the store decides when to fold the result back into events.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::EventId;
use crate::tasks::Task;

/// Task counts for one event. Progress is always computed from these,
/// never stored alongside them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: u32,
    pub completed: u32,
}

impl TaskStats {
    pub fn new(total: u32, completed: u32) -> Self {
        Self { total, completed }
    }

    /// `round(100 * completed / total)`, or 0 when there are no tasks.
    pub fn progress(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = (100.0 * f64::from(self.completed) / f64::from(self.total)).round();
        pct.clamp(0.0, 100.0) as u8
    }
}

/// Count total and completed tasks per owning event.
pub fn aggregate<'a, I>(tasks: I) -> BTreeMap<EventId, TaskStats>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut stats: BTreeMap<EventId, TaskStats> = BTreeMap::new();
    for task in tasks {
        let entry = stats.entry(task.event_id.clone()).or_default();
        entry.total += 1;
        if task.completed {
            entry.completed += 1;
        }
    }
    stats
}


#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, event: &str, completed: bool) -> Task {
        let mut t = Task::new(id, EventId::from(event), format!("Task {}", id));
        t.completed = completed;
        t
    }

    #[test]
    fn progress_is_zero_without_tasks() {
        assert_eq!(TaskStats::default().progress(), 0);
    }

    #[test]
    fn progress_rounds_to_nearest() {
        assert_eq!(TaskStats::new(3, 1).progress(), 33);
        assert_eq!(TaskStats::new(3, 2).progress(), 67);
        assert_eq!(TaskStats::new(8, 1).progress(), 13);
        assert_eq!(TaskStats::new(4, 4).progress(), 100);
    }

    #[test]
    fn aggregate_groups_by_event() {
        let tasks = vec![
            task("1", "a", true),
            task("2", "a", false),
            task("3", "b", true),
            task("4", "a", true),
        ];

        let stats = aggregate(&tasks);

        assert_eq!(stats[&EventId::from("a")], TaskStats::new(3, 2));
        assert_eq!(stats[&EventId::from("b")], TaskStats::new(1, 1));
        assert_eq!(stats.len(), 2);
    }

    #[test]
    fn aggregate_is_idempotent() {
        let tasks = vec![task("1", "a", true), task("2", "a", false)];
        assert_eq!(aggregate(&tasks), aggregate(&tasks));
    }

    #[test]
    fn ten_tasks_four_done_is_forty_percent() {
        let mut tasks: Vec<Task> = (0..10)
            .map(|i| task(&i.to_string(), "e", i < 4))
            .collect();
        let id = EventId::from("e");
        assert_eq!(aggregate(&tasks)[&id].progress(), 40);

        tasks[4].completed = true;
        assert_eq!(aggregate(&tasks)[&id].progress(), 50);
    }
}

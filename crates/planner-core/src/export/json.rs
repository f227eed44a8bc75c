// ABOUTME: Exports event summaries as pretty-printed JSON for UI collaborators.

use crate::summary::EventSummary;

/// Export summaries as a JSON array.
pub fn export_json(summaries: &[EventSummary]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summaries)
}

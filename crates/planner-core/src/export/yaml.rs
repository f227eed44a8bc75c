// ABOUTME: Exports event summaries as a YAML document with a top-level events list.
// ABOUTME: Uses serde_yaml over the summary types so field order follows the structs.

use serde::Serialize;

use crate::summary::EventSummary;

#[derive(Debug, Serialize)]
struct YamlExport<'a> {
    version: u32,
    events: &'a [EventSummary],
}

/// Export summaries as YAML.
pub fn export_yaml(summaries: &[EventSummary]) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&YamlExport {
        version: 1,
        events: summaries,
    })
}

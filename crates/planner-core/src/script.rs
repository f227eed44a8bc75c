// ABOUTME: Replays a JSON-lines script of ledger commands and task steps against a ledger actor.
// ABOUTME: Task steps update a TaskBoard and re-sync progress so the ledger sees every change.

use serde::Deserialize;
use thiserror::Error;

use crate::actor::{ActorError, LedgerHandle};
use crate::change::ChangeKind;
use crate::command::Command;
use crate::tasks::TaskBoard;

/// Errors raised while replaying a script, tagged with the 1-based line number.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: invalid step: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: {source}")]
    Ledger {
        line: usize,
        #[source]
        source: ActorError,
    },

    #[error("line {line}: unknown task {task_id}")]
    UnknownTask { line: usize, task_id: String },
}

/// Steps that act on tasks rather than on the ledger itself.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
enum TaskStep {
    CompleteTask { task_id: String },
    ReopenTask { task_id: String },
}

/// One line of a script.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    Ledger(Command),
    CompleteTask(String),
    ReopenTask(String),
}

/// Parse one script line. Blank lines and lines starting with `#` yield None.
pub fn parse_line(line: &str) -> Result<Option<ScriptStep>, serde_json::Error> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let value: serde_json::Value = serde_json::from_str(trimmed)?;
    let is_task_step = matches!(
        value.get("type").and_then(|t| t.as_str()),
        Some("CompleteTask" | "ReopenTask")
    );

    let step = if is_task_step {
        match serde_json::from_value(value)? {
            TaskStep::CompleteTask { task_id } => ScriptStep::CompleteTask(task_id),
            TaskStep::ReopenTask { task_id } => ScriptStep::ReopenTask(task_id),
        }
    } else {
        ScriptStep::Ledger(serde_json::from_value(value)?)
    };
    Ok(Some(step))
}

/// Replay `script` line by line, stopping at the first failing step. Returns
/// the number of steps applied.
pub async fn run_script(
    handle: &LedgerHandle,
    board: &mut TaskBoard,
    script: &str,
) -> Result<usize, ScriptError> {
    let mut applied = 0;

    for (idx, raw) in script.lines().enumerate() {
        let line = idx + 1;
        let Some(step) = parse_line(raw).map_err(|source| ScriptError::Parse { line, source })?
        else {
            continue;
        };

        match step {
            ScriptStep::Ledger(cmd) => {
                let changes = handle
                    .send_command(cmd)
                    .await
                    .map_err(|source| ScriptError::Ledger { line, source })?;
                for change in changes {
                    match change.kind {
                        ChangeKind::EventCreated { initial_tasks, .. } => board.extend(initial_tasks),
                        ChangeKind::EventDeleted => board.remove_event(&change.event_id),
                        _ => {}
                    }
                }
            }
            ScriptStep::CompleteTask(task_id) | ScriptStep::ReopenTask(task_id)
                if !board.tasks().iter().any(|t| t.id == task_id) =>
            {
                return Err(ScriptError::UnknownTask { line, task_id });
            }
            ScriptStep::CompleteTask(task_id) => {
                board.complete(&task_id);
                sync(handle, board, line).await?;
            }
            ScriptStep::ReopenTask(task_id) => {
                board.reopen(&task_id);
                sync(handle, board, line).await?;
            }
        }

        applied += 1;
        tracing::debug!(line, "script step applied");
    }

    Ok(applied)
}

async fn sync(handle: &LedgerHandle, board: &TaskBoard, line: usize) -> Result<(), ScriptError> {
    handle
        .send_command(Command::SyncProgress {
            tasks: board.tasks().to_vec(),
        })
        .await
        .map_err(|source| ScriptError::Ledger { line, source })?;
    Ok(())
}

// ABOUTME: Async actor that owns a LedgerStore and processes commands one at a time via tokio channels.
// ABOUTME: Provides LedgerHandle for sending commands, subscribing to changes, and reading state.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{RwLock, RwLockReadGuard, broadcast, mpsc, oneshot};

use crate::change::Change;
use crate::command::Command;
use crate::error::LedgerError;
use crate::state::LedgerState;
use crate::store::LedgerStore;

/// Errors that can occur when sending commands to the actor.
#[derive(Debug, Error)]
pub enum ActorError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("actor channel closed")]
    ChannelClosed,
}

/// Message type sent through the command channel: a command paired with
/// a oneshot sender for the response.
type CommandMessage = (Command, oneshot::Sender<Result<Vec<Change>, LedgerError>>);

/// Public handle for interacting with a ledger actor. Cheap to clone.
#[derive(Clone)]
pub struct LedgerHandle {
    cmd_tx: mpsc::Sender<CommandMessage>,
    change_tx: broadcast::Sender<Change>,
    store: Arc<RwLock<LedgerStore>>,
}

impl LedgerHandle {
    /// Send a command to the actor and await the resulting changes.
    pub async fn send_command(&self, cmd: Command) -> Result<Vec<Change>, ActorError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send((cmd, tx))
            .await
            .map_err(|_| ActorError::ChannelClosed)?;
        let result = rx.await.map_err(|_| ActorError::ChannelClosed)?;
        Ok(result?)
    }

    /// Subscribe to the stream of applied changes.
    pub fn subscribe(&self) -> broadcast::Receiver<Change> {
        self.change_tx.subscribe()
    }

    /// Read access to the materialized state. Every command runs under a
    /// single write lock, so readers see whole commands only.
    pub async fn read_state(&self) -> RwLockReadGuard<'_, LedgerState> {
        RwLockReadGuard::map(self.store.read().await, LedgerStore::state)
    }
}

/// Spawn a ledger actor owning `store` and return the handle for it.
pub fn spawn(store: LedgerStore) -> LedgerHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel::<CommandMessage>(64);
    let (change_tx, _) = broadcast::channel::<Change>(256);
    let store = Arc::new(RwLock::new(store));

    let handle = LedgerHandle {
        cmd_tx,
        change_tx: change_tx.clone(),
        store: Arc::clone(&store),
    };

    let actor = LedgerActor {
        store,
        cmd_rx,
        change_tx,
    };

    tokio::spawn(actor.run());

    handle
}

/// The internal actor that processes commands in a loop.
struct LedgerActor {
    store: Arc<RwLock<LedgerStore>>,
    cmd_rx: mpsc::Receiver<CommandMessage>,
    change_tx: broadcast::Sender<Change>,
}

impl LedgerActor {
    async fn run(mut self) {
        while let Some((cmd, reply_tx)) = self.cmd_rx.recv().await {
            let result = self.process_command(cmd).await;
            // The caller may have dropped their receiver
            let _ = reply_tx.send(result);
        }
        tracing::debug!("ledger actor stopped");
    }

    async fn process_command(&mut self, cmd: Command) -> Result<Vec<Change>, LedgerError> {
        let changes = self.store.write().await.execute(cmd)?;

        for change in &changes {
            // No active subscribers is fine
            let _ = self.change_tx.send(change.clone());
        }

        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::change::ChangeKind;
    use crate::command::{BudgetInput, NewEvent};
    use crate::config::LedgerConfig;
    use crate::model::{EventId, VendorId};

    fn create_command() -> Command {
        Command::CreateEvent {
            event: NewEvent {
                id: Some("wedding".to_string()),
                total_budget: Some(BudgetInput::from("100000")),
                categories: vec!["Venue".to_string()],
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn actor_processes_create_event() {
        let handle = spawn(LedgerStore::new(LedgerConfig::default()));

        let changes = handle.send_command(create_command()).await.unwrap();

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].seq, 1);
        let state = handle.read_state().await;
        let event = state.event(&EventId::from("wedding")).expect("event stored");
        assert_eq!(event.budget, 100000.0);
    }

    #[tokio::test]
    async fn actor_broadcasts_changes() {
        let handle = spawn(LedgerStore::new(LedgerConfig::default()));
        let mut rx = handle.subscribe();

        handle.send_command(create_command()).await.unwrap();

        let change = rx.recv().await.expect("should receive broadcast change");
        assert_eq!(change.event_id, EventId::from("wedding"));
        assert!(matches!(change.kind, ChangeKind::EventCreated { .. }));
    }

    #[tokio::test]
    async fn actor_surfaces_ledger_errors() {
        let handle = spawn(LedgerStore::new(LedgerConfig::default()));

        let err = handle
            .send_command(Command::AddVendor {
                event_id: EventId::from("ghost"),
                vendor_id: VendorId::from("7"),
                category: Category::Venue,
            })
            .await
            .unwrap_err();

        assert!(
            matches!(err, ActorError::Ledger(LedgerError::EventNotFound(_))),
            "expected EventNotFound, got: {}",
            err
        );
    }

    #[tokio::test]
    async fn finalization_is_never_observed_half_applied() {
        let handle = spawn(LedgerStore::new(LedgerConfig::default()));
        handle.send_command(create_command()).await.unwrap();
        let id = EventId::from("wedding");
        for vendor in ["7", "9"] {
            handle
                .send_command(Command::AddVendor {
                    event_id: id.clone(),
                    vendor_id: VendorId::from(vendor),
                    category: Category::Venue,
                })
                .await
                .unwrap();
        }

        for vendor in ["7", "9", "7", "9"] {
            handle
                .send_command(Command::ToggleFinalization {
                    event_id: id.clone(),
                    vendor_id: VendorId::from(vendor),
                    category: None,
                })
                .await
                .unwrap();
            let state = handle.read_state().await;
            let event = state.event(&id).unwrap();
            let finalized: Vec<&str> = event
                .vendors
                .iter()
                .filter(|a| a.price_finalized)
                .map(|a| a.vendor_id.as_str())
                .collect();
            assert_eq!(finalized, vec![vendor]);
        }
    }
}

//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! applying actions, reading the session, and streaming change batches.
use tokio::sync::{broadcast, mpsc, oneshot};

use encounter_core::{Action, EncounterSession, StateChange};

use super::errors::{Result, RuntimeError};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<Vec<StateChange>>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<Vec<StateChange>>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    /// Apply one action and return the changes it committed.
    ///
    /// A rejected action comes back as [`RuntimeError::Action`] and leaves the
    /// session untouched; nothing is broadcast for it.
    pub async fn apply_action(&self, action: Action) -> Result<Vec<StateChange>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::ApplyAction {
                action,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Clone of the current session.
    pub async fn snapshot(&self) -> Result<EncounterSession> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Persist the current session through the configured repository.
    pub async fn save(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Save { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Subscribe to committed change batches, one per accepted action.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let mut changes = handle.subscribe();
    /// while let Ok(batch) = changes.recv().await {
    ///     for change in batch {
    ///         println!("{}", change.kind());
    ///     }
    /// }
    /// ```
    pub fn subscribe(&self) -> broadcast::Receiver<Vec<StateChange>> {
        self.event_tx.subscribe()
    }
}

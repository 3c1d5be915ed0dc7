//! Session worker that owns the authoritative [`EncounterEngine`].
//!
//! Receives commands from [`crate::RuntimeHandle`], applies actions through
//! the engine, records accepted actions, and broadcasts change batches.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, error, info};

use encounter_core::{Action, EncounterEngine, EncounterSession, StateChange};

use crate::api::{Result, RuntimeError};
use crate::repository::{ActionLog, ActionLogEntry, SessionRepository};

/// Commands that can be sent to the session worker
pub enum Command {
    /// Apply an action atomically.
    ApplyAction {
        action: Action,
        reply: oneshot::Sender<Result<Vec<StateChange>>>,
    },
    /// Query the current session (read-only clone).
    Snapshot {
        reply: oneshot::Sender<EncounterSession>,
    },
    /// Persist the current session.
    Save { reply: oneshot::Sender<Result<()>> },
}

/// Background task that processes session commands.
pub struct SessionWorker {
    engine: EncounterEngine,
    session_id: String,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<Vec<StateChange>>,
    repository: Option<Arc<dyn SessionRepository>>,
    action_log: Option<ActionLog>,
    autosave: bool,
}

impl SessionWorker {
    pub fn new(
        engine: EncounterEngine,
        session_id: String,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<Vec<StateChange>>,
    ) -> Self {
        Self {
            engine,
            session_id,
            command_rx,
            event_tx,
            repository: None,
            action_log: None,
            autosave: false,
        }
    }

    pub fn with_repository(mut self, repository: Arc<dyn SessionRepository>, autosave: bool) -> Self {
        self.repository = Some(repository);
        self.autosave = autosave;
        self
    }

    pub fn with_action_log(mut self, log: ActionLog) -> Self {
        self.action_log = Some(log);
        self
    }

    /// Main worker loop. Ends once every handle has been dropped.
    pub async fn run(mut self) {
        info!(session = %self.session_id, "session worker started");
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }

        if let Some(log) = self.action_log.as_mut()
            && let Err(error) = log.flush()
        {
            error!(session = %self.session_id, %error, "failed to flush action log");
        }
        info!(session = %self.session_id, "session worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::ApplyAction { action, reply } => {
                let result = self.apply_action(action);
                let _ = reply.send(result);
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.engine.current_snapshot().clone());
            }
            Command::Save { reply } => {
                let _ = reply.send(self.save());
            }
        }
    }

    fn apply_action(&mut self, action: Action) -> Result<Vec<StateChange>> {
        let changes = self.engine.apply_action(&action)?;

        // The engine has committed; persistence failures below are reported
        // but do not undo the action.
        if let Err(error) = self.record(&action) {
            // Later entries would leave a gap, so the log stops here.
            error!(session = %self.session_id, %error, "failed to record action, action log disabled");
            self.action_log = None;
        }
        if self.autosave
            && let Err(error) = self.save()
        {
            error!(session = %self.session_id, %error, "autosave failed");
        }

        if self.event_tx.send(changes.clone()).is_err() {
            debug!(session = %self.session_id, "no subscribers for change batch");
        }
        Ok(changes)
    }

    fn record(&mut self, action: &Action) -> Result<()> {
        let Some(log) = self.action_log.as_mut() else {
            return Ok(());
        };
        let session = self.engine.current_snapshot();
        let entry = ActionLogEntry {
            sequence: log.next_sequence(),
            round: session.round(),
            action: action.clone(),
            digest: hex::encode(session.digest()?),
        };
        log.append(&entry)?;
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let repository = self
            .repository
            .as_ref()
            .ok_or(RuntimeError::RepositoryNotConfigured)?;
        repository.save(&self.session_id, self.engine.current_snapshot())?;
        Ok(())
    }
}

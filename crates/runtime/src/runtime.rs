//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive an encounter.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::info;

use encounter_content::ContentFactory;
use encounter_core::{
    EncounterContext, EncounterEngine, EncounterSession, PlayerSnapshot, SeedSource, StateChange,
};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::repository::{ActionLog, FileSessionRepository, SessionRepository};
use crate::workers::{Command, SessionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub session_id: String,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Directory for file snapshots; used when no repository is injected.
    pub snapshot_dir: Option<PathBuf>,
    /// Save after every accepted action.
    pub autosave: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            session_id: "encounter".to_string(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            snapshot_dir: None,
            autosave: false,
        }
    }
}

/// Main runtime that hosts one encounter session
///
/// Design: Runtime owns the worker task.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    opening: Vec<StateChange>,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to committed change batches
    pub fn subscribe(&self) -> broadcast::Receiver<Vec<StateChange>> {
        self.handle.subscribe()
    }

    /// Changes produced by the opening intent reveal.
    ///
    /// Empty when the runtime resumed an existing session.
    pub fn opening_changes(&self) -> &[StateChange] {
        &self.opening
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker to drain; clones of the handle held elsewhere keep
    /// it alive until they are dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

enum Origin {
    Context(Box<EncounterContext>),
    Session(Box<EncounterSession>),
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    origin: Option<Origin>,
    repository: Option<Arc<dyn SessionRepository>>,
    action_log: Option<ActionLog>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            origin: None,
            repository: None,
            action_log: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Start a new encounter from a construction context
    pub fn context(mut self, context: EncounterContext) -> Self {
        self.origin = Some(Origin::Context(Box::new(context)));
        self
    }

    /// Start a new encounter from a content directory
    pub fn content(
        self,
        factory: &ContentFactory,
        encounter: &str,
        player: PlayerSnapshot,
        seed: SeedSource,
    ) -> Result<Self> {
        let context = factory
            .build_context(encounter, player, seed)
            .map_err(|error| RuntimeError::Content(format!("{:#}", error)))?;
        Ok(self.context(context))
    }

    /// Resume a previously saved session
    pub fn session(mut self, session: EncounterSession) -> Self {
        self.origin = Some(Origin::Session(Box::new(session)));
        self
    }

    /// Set the session repository used by `save` and autosave.
    ///
    /// Takes precedence over `RuntimeConfig::snapshot_dir`.
    pub fn repository(mut self, repository: Arc<dyn SessionRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Record every accepted action to `log`
    pub fn action_log(mut self, log: ActionLog) -> Self {
        self.action_log = Some(log);
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let (engine, opening) = match self.origin.ok_or(RuntimeError::MissingSession)? {
            Origin::Context(context) => EncounterEngine::start(*context)?,
            Origin::Session(session) => (EncounterEngine::resume(*session)?, Vec::new()),
        };

        let repository = match (self.repository, &self.config.snapshot_dir) {
            (Some(repository), _) => Some(repository),
            (None, Some(dir)) => {
                Some(Arc::new(FileSessionRepository::new(dir)?) as Arc<dyn SessionRepository>)
            }
            (None, None) => None,
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (event_tx, _event_rx) =
            broadcast::channel::<Vec<StateChange>>(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_tx.clone());

        let mut worker = SessionWorker::new(
            engine,
            self.config.session_id.clone(),
            command_rx,
            event_tx,
        );
        if let Some(repository) = repository {
            worker = worker.with_repository(repository, self.config.autosave);
        }
        if let Some(log) = self.action_log {
            worker = worker.with_action_log(log);
        }

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        info!(session = %self.config.session_id, "runtime started");

        Ok(Runtime {
            handle,
            opening,
            worker_handle,
        })
    }
}

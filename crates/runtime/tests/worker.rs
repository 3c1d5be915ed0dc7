//! Runtime worker behaviour: command serialisation, broadcasts, persistence.

mod common;

use std::sync::Arc;

use encounter_core::{Action, AdversaryId, SeedSource, SnapshotCodec};
use encounter_runtime::{
    ActionLog, FileSessionRepository, InMemorySessionRepository, Runtime, RuntimeConfig,
    RuntimeError, SessionRepository, init_tracing, replay, verify_log,
};
use tokio::sync::broadcast::error::TryRecvError;

use common::{context, factory, next_action, player};

#[tokio::test]
async fn accepted_actions_are_broadcast() {
    init_tracing();
    let runtime = Runtime::builder().context(context(7)).build().await.expect("runtime");
    assert!(!runtime.opening_changes().is_empty());

    let handle = runtime.handle();
    let mut changes = handle.subscribe();

    let session = handle.snapshot().await.expect("snapshot");
    let applied = handle
        .apply_action(next_action(&session))
        .await
        .expect("attack accepted");

    let received = changes.recv().await.expect("batch");
    assert_eq!(received, applied);

    drop(handle);
    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn rejected_actions_change_nothing_and_broadcast_nothing() {
    let runtime = Runtime::builder().context(context(7)).build().await.expect("runtime");
    let handle = runtime.handle();
    let mut changes = handle.subscribe();

    let before = handle.snapshot().await.expect("snapshot");
    let error = handle
        .apply_action(Action::attack(AdversaryId(99)))
        .await
        .unwrap_err();
    assert!(error.is_rejection(), "{error}");

    let after = handle.snapshot().await.expect("snapshot");
    assert_eq!(
        SnapshotCodec::serialize(&before).expect("encode"),
        SnapshotCodec::serialize(&after).expect("encode")
    );
    assert!(matches!(changes.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn content_builder_reports_unknown_encounters() {
    let result = Runtime::builder().content(&factory(), "nowhere", player(), SeedSource::Seed(1));
    assert!(matches!(result, Err(RuntimeError::Content(_))));
}

#[tokio::test]
async fn building_without_a_session_fails() {
    let result = Runtime::builder().build().await;
    assert!(matches!(result, Err(RuntimeError::MissingSession)));
}

#[tokio::test]
async fn save_requires_a_repository() {
    let runtime = Runtime::builder().context(context(3)).build().await.expect("runtime");
    let error = runtime.handle().save().await.unwrap_err();
    assert!(matches!(error, RuntimeError::RepositoryNotConfigured));
}

#[tokio::test]
async fn saved_session_resumes_identically() {
    let repository = Arc::new(InMemorySessionRepository::new());
    let runtime = Runtime::builder()
        .context(context(21))
        .repository(repository.clone())
        .build()
        .await
        .expect("runtime");
    let handle = runtime.handle();

    let session = handle.snapshot().await.expect("snapshot");
    handle.apply_action(next_action(&session)).await.expect("accepted");
    handle.save().await.expect("save");
    let live = handle.snapshot().await.expect("snapshot");

    let loaded = repository
        .load("encounter")
        .expect("load")
        .expect("session saved");
    assert_eq!(loaded.digest().expect("digest"), live.digest().expect("digest"));

    let resumed = Runtime::builder().session(loaded).build().await.expect("resume");
    assert!(resumed.opening_changes().is_empty());
    let resumed_handle = resumed.handle();

    let action = next_action(&live);
    let expected = handle.apply_action(action.clone()).await;
    let actual = resumed_handle.apply_action(action).await;
    match (expected, actual) {
        (Ok(expected), Ok(actual)) => assert_eq!(expected, actual),
        (Err(expected), Err(actual)) => assert_eq!(expected.to_string(), actual.to_string()),
        (expected, actual) => panic!("diverged: {expected:?} vs {actual:?}"),
    }
}

#[tokio::test]
async fn autosave_writes_snapshot_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = RuntimeConfig {
        session_id: "crypt-run".to_string(),
        snapshot_dir: Some(dir.path().to_path_buf()),
        autosave: true,
        ..RuntimeConfig::default()
    };
    let runtime = Runtime::builder()
        .config(config)
        .context(context(5))
        .build()
        .await
        .expect("runtime");
    let handle = runtime.handle();

    let session = handle.snapshot().await.expect("snapshot");
    handle.apply_action(next_action(&session)).await.expect("accepted");
    let live = handle.snapshot().await.expect("snapshot");

    let repository = FileSessionRepository::new(dir.path()).expect("repository");
    assert_eq!(repository.list_sessions().expect("list"), vec!["crypt-run".to_string()]);
    let stored = repository.load("crypt-run").expect("load").expect("autosaved");
    assert_eq!(stored.digest().expect("digest"), live.digest().expect("digest"));
}

#[tokio::test]
async fn action_log_verifies_against_replay() {
    let dir = tempfile::tempdir().expect("temp dir");
    let log = ActionLog::create(dir.path(), "actions.jsonl").expect("log");
    let path = log.path().to_path_buf();

    let runtime = Runtime::builder()
        .context(context(42))
        .action_log(log)
        .build()
        .await
        .expect("runtime");
    let handle = runtime.handle();

    let mut accepted = Vec::new();
    for _ in 0..8 {
        let session = handle.snapshot().await.expect("snapshot");
        if session.outcome().is_terminal() {
            break;
        }
        let action = next_action(&session);
        if handle.apply_action(action.clone()).await.is_ok() {
            accepted.push(action);
        }
    }
    let live = handle.snapshot().await.expect("snapshot");
    drop(handle);
    runtime.shutdown().await.expect("shutdown");

    let entries = ActionLog::read_all(&path).expect("read log");
    assert_eq!(entries.len(), accepted.len());
    assert!(entries.iter().enumerate().all(|(i, e)| e.sequence == i as u64));

    let verified = verify_log(context(42), &entries).expect("log verifies");
    assert_eq!(verified.digest().expect("digest"), live.digest().expect("digest"));

    let replayed = replay(context(42), &accepted).expect("replay");
    assert_eq!(replayed.session.digest().expect("digest"), live.digest().expect("digest"));

    let mut tampered = entries.clone();
    if let Some(last) = tampered.last_mut() {
        last.digest = "ff".repeat(32);
        assert!(matches!(
            verify_log(context(42), &tampered),
            Err(RuntimeError::DigestMismatch { .. })
        ));
    }
}

#[tokio::test]
async fn logged_actions_are_readable_while_the_worker_runs() {
    let dir = tempfile::tempdir().expect("temp dir");
    let log = ActionLog::create(dir.path(), "actions.jsonl").expect("log");
    let path = log.path().to_path_buf();

    let runtime = Runtime::builder()
        .context(context(11))
        .action_log(log)
        .build()
        .await
        .expect("runtime");
    let handle = runtime.handle();

    for _ in 0..2 {
        let session = handle.snapshot().await.expect("snapshot");
        handle
            .apply_action(next_action(&session))
            .await
            .expect("action accepted");
        let entries = ActionLog::read_all(&path).expect("read log");
        let live = handle.snapshot().await.expect("snapshot");
        let last = entries.last().expect("entry written");
        assert_eq!(last.sequence + 1, entries.len() as u64);
        assert_eq!(last.digest, hex::encode(live.digest().expect("digest")));
    }

    drop(handle);
    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn replay_reports_the_rejected_index() {
    let actions = [Action::end_turn(), Action::attack(AdversaryId(99))];
    match replay(context(1), &actions) {
        Err(RuntimeError::ReplayRejected { index, .. }) => assert_eq!(index, 1),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn concurrent_callers_are_serialised() {
    let runtime = Runtime::builder().context(context(9)).build().await.expect("runtime");

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let handle = runtime.handle();
        tasks.push(tokio::spawn(async move {
            handle.apply_action(Action::defend()).await
        }));
    }
    for task in tasks {
        let result = task.await.expect("task joined");
        if let Err(error) = result {
            assert!(error.is_rejection(), "{error}");
        }
    }

    let session = runtime.handle().snapshot().await.expect("snapshot");
    session.check_invariants().expect("consistent session");
}

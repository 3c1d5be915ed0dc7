mod common;

use common::{run, script, standard_context};
use encounter_core::{
    EncounterEngine, SnapshotCodec, SnapshotError,
    snapshot::{SNAPSHOT_MAGIC, SNAPSHOT_VERSION},
};

#[test]
fn round_trip_preserves_every_field() {
    let (engine, _) = run(standard_context(31), &script()[..9]);
    let session = engine.current_snapshot();

    let bytes = SnapshotCodec::serialize(session).expect("encodes");
    assert_eq!(&bytes[..4], &SNAPSHOT_MAGIC);
    assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), SNAPSHOT_VERSION);

    let restored = SnapshotCodec::deserialize(&bytes).expect("decodes");
    assert_eq!(&restored, session);
    assert_eq!(restored.rng(), session.rng());
    assert_eq!(restored.deck().draw_pile(), session.deck().draw_pile());
    assert_eq!(restored.deck().discard_pile(), session.deck().discard_pile());
    assert_eq!(
        SnapshotCodec::serialize(&restored).expect("encodes"),
        bytes,
        "re-encoding must be byte-identical"
    );
}

#[test]
fn resumed_session_continues_identically() {
    let actions = script();
    let (split, midpoint) = actions.split_at(8);

    let (original, _) = run(standard_context(77), split);
    let bytes = SnapshotCodec::serialize(original.current_snapshot()).expect("encodes");
    let mut resumed = EncounterEngine::from_snapshot(&bytes).expect("decodes");
    let mut continued = original.clone();

    for action in midpoint {
        assert_eq!(resumed.apply_action(action), continued.apply_action(action));
    }
    assert_eq!(
        hex::encode(resumed.current_snapshot().digest().expect("digest")),
        hex::encode(continued.current_snapshot().digest().expect("digest")),
    );
}

#[test]
fn digest_tracks_state() {
    let (a, _) = run(standard_context(5), &script()[..2]);
    let (b, _) = run(standard_context(5), &script()[..3]);
    let digest_a = a.current_snapshot().digest().expect("digest");
    assert_eq!(digest_a, a.current_snapshot().digest().expect("digest"));
    assert_ne!(digest_a, b.current_snapshot().digest().expect("digest"));
}

#[test]
fn truncated_snapshot_is_malformed() {
    let (engine, _) = run(standard_context(3), &[]);
    let bytes = SnapshotCodec::serialize(engine.current_snapshot()).expect("encodes");

    for len in [0, 5, 6, bytes.len() / 2, bytes.len() - 1] {
        let result = SnapshotCodec::deserialize(&bytes[..len]);
        assert!(
            matches!(result, Err(SnapshotError::Malformed(_))),
            "length {len} should be rejected"
        );
    }
}

#[test]
fn trailing_bytes_are_malformed() {
    let (engine, _) = run(standard_context(3), &[]);
    let mut bytes = SnapshotCodec::serialize(engine.current_snapshot()).expect("encodes");
    bytes.push(0);
    assert!(matches!(
        SnapshotCodec::deserialize(&bytes),
        Err(SnapshotError::Malformed(_))
    ));
}

#[test]
fn structurally_invalid_session_is_malformed() {
    let (engine, _) = run(standard_context(3), &[]);
    let mut bytes = SnapshotCodec::serialize(engine.current_snapshot()).expect("encodes");
    // The round counter is the first payload field.
    bytes[6..10].copy_from_slice(&0u32.to_le_bytes());

    let error = SnapshotCodec::deserialize(&bytes).unwrap_err();
    assert_eq!(
        error,
        SnapshotError::Malformed("round counter must start at 1".into())
    );
    assert!(EncounterEngine::from_snapshot(&bytes).is_err());
}

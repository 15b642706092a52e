//! # Snapshotting Store Tests
//!
//! Covers checkpoint capture, rollback, and every same-step conflict rule:
//! write/snapshot ordering under both bypass settings, the same-slot
//! snapshot+restore exception, restore-versus-set precedence, and slot
//! isolation.

use pretty_assertions::assert_eq;
use rename_core::common::error::ConfigError;
use rename_core::core::snapshot::SnapshotRegFile;
use rstest::rstest;

use crate::common::store;

/// Zero checkpoint slots are rejected at construction.
#[test]
fn zero_snapshot_slots_rejected() {
    let err = SnapshotRegFile::new(4, 1, 1, false, true, 0, None).unwrap_err();
    assert_eq!(err, ConfigError::ZeroCapacity { name: "nsnapshots" });
}

/// Reads and writes pass through to the live state.
#[test]
fn read_write_pass_through() {
    let mut s = store(4, 2, true);
    s.write(0, 2, 7, true);
    s.step();
    assert_eq!(s.read(0, 2), 7);
    assert_eq!(s.read(1, 2), 7);
}

/// A checkpoint taken in a quiet step, then restored after unrelated
/// updates, reinstates the captured state exactly. Holds under either
/// bypass setting.
#[rstest]
#[case(false)]
#[case(true)]
fn checkpoint_round_trip(#[case] bypass: bool) {
    let mut s = store(4, 2, bypass);
    s.write(0, 1, 5, true);
    s.write(1, 3, 8, true);
    s.step();

    s.snapshot(0, true);
    s.step();

    s.write(0, 1, 6, true);
    s.step();
    s.write(0, 3, 9, true);
    s.step();
    assert_eq!(s.state(), &[0, 6, 0, 9]);

    s.restore(0, true);
    s.step();
    assert_eq!(s.state(), &[0, 5, 0, 8]);
}

/// A disabled snapshot or restore request is inert.
#[test]
fn disabled_requests_are_inert() {
    let mut s = store(4, 2, true);
    s.write(0, 1, 5, true);
    s.step();

    s.snapshot(0, false);
    s.step();
    assert_eq!(s.snapshot_state(0), &[0; 4]);

    s.restore(0, false);
    s.step();
    assert_eq!(s.state(), &[0, 5, 0, 0]);
}

/// Bypass disabled: a snapshot concurrent with a write captures the state
/// *before* the write.
#[test]
fn snapshot_without_bypass_misses_inflight_write() {
    let mut s = store(4, 1, false);
    s.write(0, 1, 5, true);
    s.snapshot(0, true);
    s.step();
    assert_eq!(s.snapshot_state(0), &[0; 4]);
    assert_eq!(s.state(), &[0, 5, 0, 0], "the write itself still lands");
}

/// Bypass enabled: a snapshot concurrent with a write captures the state
/// *after* the write.
#[test]
fn snapshot_with_bypass_sees_inflight_write() {
    let mut s = store(4, 1, true);
    s.write(0, 1, 5, true);
    s.snapshot(0, true);
    s.step();
    assert_eq!(s.snapshot_state(0), &[0, 5, 0, 0]);
    assert_eq!(s.state(), &[0, 5, 0, 0]);
}

/// Bypass disabled, same slot snapshotted and restored in one step with a
/// write in flight: the implied order is snapshot, write, restore, so the
/// step must end as if the write never happened.
#[test]
fn same_slot_conflict_without_bypass_undoes_write() {
    let mut s = store(4, 2, false);
    s.write(0, 1, 5, true);
    s.step();

    s.write(0, 1, 6, true);
    s.snapshot(0, true);
    s.restore(0, true);
    s.step();

    assert_eq!(s.state()[1], 5, "in-flight write undone");
    assert_eq!(s.snapshot_state(0), &[0, 5, 0, 0], "slot holds the pre-write state");
}

/// Bypass enabled, same slot snapshotted and restored in one step with a
/// write in flight: the implied order is write, snapshot, restore, so the
/// restore is dropped and the post-write state persists.
#[test]
fn same_slot_conflict_with_bypass_drops_restore() {
    let mut s = store(4, 2, true);
    s.write(0, 1, 5, true);
    s.step();

    s.write(0, 1, 6, true);
    s.snapshot(0, true);
    s.restore(0, true);
    s.step();

    assert_eq!(s.state()[1], 6, "post-write state persists");
    assert_eq!(s.snapshot_state(0), &[0, 6, 0, 0], "slot holds the post-write state");
}

/// Snapshot and restore of *different* slots in one step: the restore pulls
/// the old contents of its source while the target captures normally.
#[test]
fn same_step_snapshot_and_restore_different_slots() {
    let mut s = store(4, 2, true);
    s.write(0, 1, 5, true);
    s.step();
    s.snapshot(0, true);
    s.step();
    s.write(0, 1, 6, true);
    s.step();

    s.snapshot(1, true);
    s.restore(0, true);
    s.step();

    assert_eq!(s.state(), &[0, 5, 0, 0], "restored from slot 0");
    assert_eq!(s.snapshot_state(1), &[0, 6, 0, 0], "slot 1 captured pre-restore state");
}

/// A restore overrides ordinary port writes latched in the same step.
#[test]
fn restore_beats_same_step_port_writes() {
    let mut s = store(4, 2, true);
    s.snapshot(0, true);
    s.step();

    s.write(0, 1, 7, true);
    s.restore(0, true);
    s.step();
    assert_eq!(s.state(), &[0; 4]);
}

/// A direct set in the same step as a restore wins for its entry; every
/// other entry still takes the checkpoint's value.
#[test]
fn set_beats_restore_for_its_entry() {
    let mut s = store(4, 2, true);
    s.write(0, 1, 5, true);
    s.write(1, 2, 6, true);
    s.step();
    s.snapshot(0, true);
    s.step();
    s.write(0, 1, 8, true);
    s.write(1, 2, 9, true);
    s.step();

    s.restore(0, true);
    s.set(2, 42);
    s.step();

    assert_eq!(s.state(), &[0, 5, 42, 0]);
}

/// A direct set with no restore behaves as a plain authoritative overwrite.
#[test]
fn set_alone_overwrites() {
    let mut s = store(4, 2, true);
    s.set(3, 11);
    s.step();
    assert_eq!(s.state(), &[0, 0, 0, 11]);
}

/// Restoring one slot never mutates another, and capturing into one slot
/// never disturbs a previously captured slot.
#[test]
fn slots_are_isolated() {
    let mut s = store(4, 3, true);
    s.write(0, 1, 5, true);
    s.step();
    s.snapshot(0, true);
    s.step();

    s.write(0, 1, 6, true);
    s.step();
    s.snapshot(1, true);
    s.step();

    assert_eq!(s.snapshot_state(0), &[0, 5, 0, 0]);
    assert_eq!(s.snapshot_state(1), &[0, 6, 0, 0]);

    s.restore(0, true);
    s.step();
    assert_eq!(s.snapshot_state(1), &[0, 6, 0, 0], "restore left slot 1 untouched");
    assert_eq!(s.snapshot_state(2), &[0; 4], "never-captured slot stays zeroed");
}

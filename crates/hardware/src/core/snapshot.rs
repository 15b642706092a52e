//! Snapshotting store: checkpoint and rollback over an addressable store.
//!
//! Wraps one [`RegFile`] (the live state) plus a fixed number of isolated
//! checkpoint buffers. On top of pass-through reads and writes it provides:
//! 1. **Snapshot:** Atomically copy the live state into a checkpoint slot.
//! 2. **Restore:** Atomically copy a checkpoint slot back over the live
//!    state, discarding everything written since it was taken.
//! 3. **Set:** Authoritative per-entry overwrite that beats a same-step
//!    restore.
//!
//! All conflict resolution between operations issued in the same step lives
//! here. The resolution rules form a fixed priority order; the branches in
//! [`SnapshotRegFile::step`] must not be reordered.

use tracing::trace;

use crate::common::error::ConfigError;
use crate::common::types::PhysReg;
use crate::core::regfile::RegFile;

/// An addressable store with atomic checkpoint and rollback.
///
/// Checkpoint slots are fully isolated from one another: restoring one slot
/// never reads or mutates any other, and taking a snapshot never mutates the
/// live state.
///
/// `write_snapshot_bypass` selects what a snapshot taken in the same step as
/// a write captures: the state *after* that write (enabled) or *before* it
/// (disabled). The flag also decides the same-step snapshot+restore conflict
/// on a single slot; see [`SnapshotRegFile::step`].
#[derive(Debug, Clone)]
pub struct SnapshotRegFile {
    /// Live state plus its read/write ports.
    regs: RegFile,
    /// Checkpoint buffers, each a full copy of the live state's capacity.
    snapshots: Vec<Vec<PhysReg>>,
    /// Externally requested direct overwrites for this step, one per entry.
    set_lane: Vec<Option<PhysReg>>,
    /// Checkpoint slot to capture at this step's commit, if any.
    snapshot_req: Option<usize>,
    /// Checkpoint slot to roll back from at this step's commit, if any.
    restore_req: Option<usize>,
    write_snapshot_bypass: bool,
}

impl SnapshotRegFile {
    /// Creates a snapshotting store of `nregs` entries and `nsnapshots`
    /// checkpoint slots.
    ///
    /// Checkpoint buffers start zeroed; only a `snapshot` ever fills them.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a zero capacity or an ill-sized
    /// `reset_values` pre-load.
    pub fn new(
        nregs: usize,
        num_read_ports: usize,
        num_write_ports: usize,
        write_read_bypass: bool,
        write_snapshot_bypass: bool,
        nsnapshots: usize,
        reset_values: Option<&[PhysReg]>,
    ) -> Result<Self, ConfigError> {
        if nsnapshots == 0 {
            return Err(ConfigError::ZeroCapacity { name: "nsnapshots" });
        }
        let regs = RegFile::new(
            nregs,
            num_read_ports,
            num_write_ports,
            write_read_bypass,
            reset_values,
        )?;
        Ok(Self {
            regs,
            snapshots: vec![vec![0; nregs]; nsnapshots],
            set_lane: vec![None; nregs],
            snapshot_req: None,
            restore_req: None,
            write_snapshot_bypass,
        })
    }

    /// Reads the live state through a read port (pass-through).
    pub fn read(&self, port: usize, addr: usize) -> PhysReg {
        self.regs.read(port, addr)
    }

    /// Latches a write to the live state on a write port (pass-through).
    pub fn write(&mut self, port: usize, addr: usize, value: PhysReg, enable: bool) {
        self.regs.write(port, addr, value, enable);
    }

    /// Latches an authoritative overwrite of one live entry for this step.
    ///
    /// A set value beats both this step's port writes and a same-step
    /// restore for its entry; other entries still restore normally.
    pub fn set(&mut self, addr: usize, value: PhysReg) {
        debug_assert!(addr < self.set_lane.len(), "set address {addr} out of range");
        self.set_lane[addr] = Some(value);
    }

    /// Requests that checkpoint slot `target` capture the live state at this
    /// step's commit.
    pub fn snapshot(&mut self, target: usize, enable: bool) {
        debug_assert!(target < self.snapshots.len(), "snapshot slot {target} out of range");
        if enable {
            self.snapshot_req = Some(target);
        }
    }

    /// Requests that the live state roll back to checkpoint slot `source` at
    /// this step's commit.
    pub fn restore(&mut self, source: usize, enable: bool) {
        debug_assert!(source < self.snapshots.len(), "restore slot {source} out of range");
        if enable {
            self.restore_req = Some(source);
        }
    }

    /// Commits the step, resolving every same-step conflict deterministically.
    ///
    /// Effective ordering: port writes, then snapshot, then restore, then
    /// set. Two cases need care when snapshot and restore hit the *same*
    /// slot in one step:
    ///
    /// - bypass disabled (order snapshot → write → restore): the step must
    ///   end as if the write never happened, so the rollback reinstates the
    ///   pre-write live state rather than the copy just taken;
    /// - bypass enabled (order write → snapshot → restore): the step must
    ///   end as if the rollback never happened, so the restore is dropped
    ///   and the post-write state persists.
    ///
    /// Independently of either case, a `set` beats a restore for its entry.
    pub fn step(&mut self) {
        let dump = if self.write_snapshot_bypass {
            self.regs.dump_with_writes()
        } else {
            self.regs.dump()
        };
        let snap = self.snapshot_req.take();
        let rest = self.restore_req.take();
        let same_slot = snap.is_some() && snap == rest;

        let restore_vector = match rest {
            Some(source) if same_slot && self.write_snapshot_bypass => {
                trace!(source, "restore dropped: same-step snapshot of the same slot");
                None
            }
            Some(source) if same_slot => {
                // The pre-write live state, not the copy captured below.
                trace!(source, "same-slot rollback undoes this step's writes");
                Some(dump.clone())
            }
            Some(source) => {
                trace!(source, "restoring checkpoint");
                Some(self.snapshots[source].clone())
            }
            None => None,
        };

        if let Some(target) = snap {
            self.snapshots[target].copy_from_slice(&dump);
            trace!(target, "checkpoint captured");
        }

        // Restore fills only entries without an external set; set wins.
        if let Some(vector) = restore_vector {
            for (addr, value) in vector.into_iter().enumerate() {
                if self.set_lane[addr].is_none() {
                    self.set_lane[addr] = Some(value);
                }
            }
        }
        let regs = &mut self.regs;
        for (addr, slot) in self.set_lane.iter_mut().enumerate() {
            if let Some(value) = slot.take() {
                regs.set(addr, value);
            }
        }

        self.regs.step();
    }

    /// Committed live state.
    pub fn state(&self) -> &[PhysReg] {
        self.regs.state()
    }

    /// Contents of one checkpoint slot.
    pub fn snapshot_state(&self, id: usize) -> &[PhysReg] {
        &self.snapshots[id]
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    /// Always false: capacity is validated positive at construction.
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// Number of checkpoint slots.
    pub fn num_snapshots(&self) -> usize {
        self.snapshots.len()
    }
}

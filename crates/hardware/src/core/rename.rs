//! Rename table: architectural-to-physical register mapping.
//!
//! Maps architectural register identifiers to physical register tags on top
//! of one [`SnapshotRegFile`], so every checkpoint and rollback primitive
//! comes for free. This layer adds exactly two things:
//! 1. **Port Naming:** The store's reads and writes become `lookup` and
//!    `update`.
//! 2. **Zero Register:** With `const_zero`, architectural register 0 maps to
//!    a fixed tag forever: lookups ignore the table and updates are dropped
//!    before they reach it, so the table's entry 0 is never written.
//!
//! The speculation controller drives `snapshot` at predicted branches and
//! `restore` on mispredictions; this table forwards both verbatim.

use tracing::debug;

use crate::common::error::ConfigError;
use crate::common::types::PhysReg;
use crate::config::RenameConfig;
use crate::core::snapshot::SnapshotRegFile;

/// Register rename table with checkpoint and rollback.
///
/// Built from a [`RenameConfig`]; all capacities and port counts are fixed
/// for the table's lifetime. Lookups observe the mapping as of the start of
/// the step; updates latch and commit at [`RenameTable::step`].
#[derive(Debug, Clone)]
pub struct RenameTable {
    table: SnapshotRegFile,
    /// Fixed tag returned for architectural register 0, when hardwired.
    zero_tag: Option<PhysReg>,
}

impl RenameTable {
    /// Builds a rename table from a validated configuration.
    ///
    /// Without an explicit `initial_map`, the table boots with the identity
    /// mapping (architectural register `a` holds physical tag `a`), the
    /// conventional reset state before any renaming has happened.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if [`RenameConfig::validate`] rejects the
    /// configuration.
    pub fn new(config: &RenameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let initial_map = config.initial_map.clone().unwrap_or_else(|| {
            (0..config.naregs).map(|a| a as PhysReg).collect()
        });
        // Lookups must see the mapping as of the start of the step, so the
        // underlying store never bypasses writes into reads.
        let table = SnapshotRegFile::new(
            config.naregs,
            config.num_lookup_ports,
            config.num_update_ports,
            false,
            config.write_snapshot_bypass,
            config.nsnapshots,
            Some(&initial_map),
        )?;
        let zero_tag = config.const_zero.then(|| (config.npregs - 1) as PhysReg);
        debug!(
            naregs = config.naregs,
            npregs = config.npregs,
            nsnapshots = config.nsnapshots,
            const_zero = config.const_zero,
            "rename table constructed"
        );
        Ok(Self { table, zero_tag })
    }

    /// Looks up the physical tag currently mapped to `areg`.
    ///
    /// Pure: reflects the mapping as of the start of the step, never this
    /// step's latched updates. With the zero register hardwired, `areg == 0`
    /// returns the fixed tag irrespective of the table's contents.
    pub fn lookup(&self, port: usize, areg: usize) -> PhysReg {
        if areg == 0 {
            if let Some(tag) = self.zero_tag {
                return tag;
            }
        }
        self.table.read(port, areg)
    }

    /// Latches a new mapping `areg -> preg` on an update port.
    ///
    /// Commits at [`RenameTable::step`] only if `enable` is true. With the
    /// zero register hardwired, updates to `areg == 0` are dropped here, so
    /// the caller's enable never reaches the store.
    pub fn update(&mut self, port: usize, areg: usize, preg: PhysReg, enable: bool) {
        let enable = enable && !(areg == 0 && self.zero_tag.is_some());
        self.table.write(port, areg, preg, enable);
    }

    /// Requests a checkpoint of the current mapping into slot `target`
    /// (forwarded verbatim).
    pub fn snapshot(&mut self, target: usize, enable: bool) {
        self.table.snapshot(target, enable);
    }

    /// Requests a rollback of the mapping to checkpoint slot `source`
    /// (forwarded verbatim).
    pub fn restore(&mut self, source: usize, enable: bool) {
        self.table.restore(source, enable);
    }

    /// Authoritative overwrite of one mapping entry (forwarded verbatim).
    ///
    /// Composition and test-injection bus only: ordinary mapping commits go
    /// through [`RenameTable::update`]. The zero-register hardwiring does
    /// not police this lane.
    pub fn set(&mut self, areg: usize, preg: PhysReg) {
        self.table.set(areg, preg);
    }

    /// Commits the step: updates, then checkpoint operations, resolved per
    /// the underlying store's priority rules.
    pub fn step(&mut self) {
        self.table.step();
    }

    /// Committed mapping table.
    ///
    /// Entry 0 is the table's stored content; with the zero register
    /// hardwired it is stale by construction and [`RenameTable::lookup`]
    /// never returns it.
    pub fn mapping(&self) -> &[PhysReg] {
        self.table.state()
    }

    /// Contents of one checkpoint slot.
    pub fn snapshot_state(&self, id: usize) -> &[PhysReg] {
        self.table.snapshot_state(id)
    }

    /// Fixed tag for architectural register 0, when hardwired.
    pub fn zero_tag(&self) -> Option<PhysReg> {
        self.zero_tag
    }

    /// Number of architectural registers (the table's address space).
    pub fn naregs(&self) -> usize {
        self.table.len()
    }

    /// Number of checkpoint slots.
    pub fn num_snapshots(&self) -> usize {
        self.table.num_snapshots()
    }
}

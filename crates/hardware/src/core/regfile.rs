//! Multi-port addressable store.
//!
//! This is the leaf storage primitive of the versioning core: a fixed-capacity
//! array of physical register tags with independent read and write ports and
//! a separate direct-write lane. It provides:
//! 1. **Combinational Reads:** Evaluated against state at the start of the
//!    step, with optional same-step write bypass.
//! 2. **Latched Writes:** Per-port requests held until the step commits.
//! 3. **Direct Lane:** An unconditional per-entry `set` bus, independent of
//!    the write ports, for authoritative overwrites by higher layers.
//!
//! All capacities and port counts are fixed at construction.

use crate::common::error::ConfigError;
use crate::common::types::{PhysReg, WriteReq};

/// Fixed-capacity storage array with independent read and write ports.
///
/// Writes latch during a step and apply when [`RegFile::step`] commits.
/// When two enabled write ports target the same entry in one step, the
/// highest port index wins; this tie-break is part of the contract, not an
/// artifact of iteration order.
#[derive(Debug, Clone)]
pub struct RegFile {
    /// Committed state, visible to reads at the start of each step.
    regs: Vec<PhysReg>,
    /// One latched request per write port.
    writes: Vec<WriteReq>,
    /// Direct-lane requests for the current step, one slot per entry.
    direct: Vec<Option<PhysReg>>,
    num_read_ports: usize,
    write_read_bypass: bool,
}

impl RegFile {
    /// Creates a store of `nregs` entries with the given port counts.
    ///
    /// `reset_values`, when supplied, pre-loads the committed state and must
    /// cover the capacity exactly; otherwise every entry starts at zero.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `nregs` is zero or `reset_values` has the
    /// wrong length.
    pub fn new(
        nregs: usize,
        num_read_ports: usize,
        num_write_ports: usize,
        write_read_bypass: bool,
        reset_values: Option<&[PhysReg]>,
    ) -> Result<Self, ConfigError> {
        if nregs == 0 {
            return Err(ConfigError::ZeroCapacity { name: "nregs" });
        }
        let regs = match reset_values {
            Some(values) if values.len() != nregs => {
                return Err(ConfigError::InitialMapLength {
                    expected: nregs,
                    got: values.len(),
                });
            }
            Some(values) => values.to_vec(),
            None => vec![0; nregs],
        };
        Ok(Self {
            regs,
            writes: vec![WriteReq::default(); num_write_ports],
            direct: vec![None; nregs],
            num_read_ports,
            write_read_bypass,
        })
    }

    /// Reads one entry through a read port.
    ///
    /// Returns the committed value as of the start of the step. With
    /// `write_read_bypass` enabled, an enabled same-step write to `addr`
    /// is forwarded instead (highest write port wins). The direct lane is
    /// never forwarded to reads; it becomes visible only after commit.
    pub fn read(&self, port: usize, addr: usize) -> PhysReg {
        debug_assert!(port < self.num_read_ports, "read port {port} out of range");
        debug_assert!(addr < self.regs.len(), "read address {addr} out of range");
        if self.write_read_bypass {
            if let Some(value) = self.writes.iter().rev().find_map(|w| w.hits(addr)) {
                return value;
            }
        }
        self.regs[addr]
    }

    /// Latches a write request on `port` for this step.
    ///
    /// The request takes effect at commit only if `enable` is true. Driving
    /// the same port twice in one step replaces the earlier request.
    pub fn write(&mut self, port: usize, addr: usize, value: PhysReg, enable: bool) {
        debug_assert!(addr < self.regs.len(), "write address {addr} out of range");
        self.writes[port] = WriteReq {
            addr,
            value,
            enable,
        };
    }

    /// Latches an unconditional direct-lane write for this step.
    ///
    /// The direct lane is independent of the write ports and overrides them:
    /// at commit, a direct value beats any port write to the same entry.
    pub fn set(&mut self, addr: usize, value: PhysReg) {
        debug_assert!(addr < self.regs.len(), "set address {addr} out of range");
        self.direct[addr] = Some(value);
    }

    /// Commits the step: applies latched writes, then the direct lane, and
    /// clears all latches.
    ///
    /// Ports apply in ascending index order, so the highest enabled port
    /// wins a same-entry conflict. Direct-lane values apply last.
    pub fn step(&mut self) {
        for i in 0..self.writes.len() {
            let req = self.writes[i];
            if req.enable {
                self.regs[req.addr] = req.value;
            }
            self.writes[i].enable = false;
        }
        for (addr, slot) in self.direct.iter_mut().enumerate() {
            if let Some(value) = slot.take() {
                self.regs[addr] = value;
            }
        }
    }

    /// Committed state, ignoring anything latched this step.
    pub fn state(&self) -> &[PhysReg] {
        &self.regs
    }

    /// Copy of the committed state.
    pub fn dump(&self) -> Vec<PhysReg> {
        self.regs.clone()
    }

    /// Copy of the state as it will stand after this step's latched port
    /// writes, before the direct lane.
    ///
    /// This is the dump bus the snapshotting layer captures from when its
    /// write-to-snapshot bypass is enabled.
    pub fn dump_with_writes(&self) -> Vec<PhysReg> {
        let mut out = self.regs.clone();
        for req in &self.writes {
            if req.enable {
                out[req.addr] = req.value;
            }
        }
        out
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    /// Always false: capacity is validated positive at construction.
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// Number of write ports.
    pub fn num_write_ports(&self) -> usize {
        self.writes.len()
    }

    /// Number of read ports.
    pub fn num_read_ports(&self) -> usize {
        self.num_read_ports
    }
}

//! Shared value and step-latch types for the storage layers.
//!
//! Every storage component in this crate evaluates in discrete steps: reads
//! are combinational against the committed state, while writes are latched
//! into per-port request slots and applied together when the component's
//! `step()` commits. The request types here are those latches.

/// A physical register tag: the value stored in the rename table for one
/// architectural register.
///
/// Tags are plain indices into the physical register file, so a `u32` is
/// wide enough for any realistic capacity.
pub type PhysReg = u32;

/// One latched write-port request for the current step.
///
/// A disabled request is inert; its `addr` and `value` fields are
/// "don't care" and carry whatever the port was last driven with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteReq {
    /// Entry to write.
    pub addr: usize,
    /// Value to write.
    pub value: PhysReg,
    /// Whether this port's write takes effect at commit.
    pub enable: bool,
}

impl WriteReq {
    /// Returns the enabled request targeting `addr`, if this is one.
    #[inline]
    pub fn hits(&self, addr: usize) -> Option<PhysReg> {
        (self.enable && self.addr == addr).then_some(self.value)
    }
}

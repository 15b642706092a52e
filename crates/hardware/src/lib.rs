//! Speculative-state versioning core for out-of-order pipelines.
//!
//! This crate implements the register-renaming state of an out-of-order
//! core: a rename table built on a snapshotting multi-port storage array
//! with atomic checkpoint and rollback. It provides:
//! 1. **Addressable Store:** A fixed-capacity array with independent read
//!    and write ports and optional same-step write-to-read bypass.
//! 2. **Snapshotting Store:** Checkpoint slots, atomic restore, and
//!    deterministic resolution of every same-step operation conflict.
//! 3. **Rename Table:** The architectural-to-physical mapping with the
//!    hardwired-zero-register special case.
//!
//! Everything evaluates in discrete steps: reads are combinational against
//! the committed state, mutating operations latch and commit atomically at
//! `step()`. Decoding, execution units, and the decision of *when* to
//! checkpoint all live in external collaborators; this crate only promises
//! that whatever was checkpointed can be reinstated exactly.

/// Common types and construction-time errors.
pub mod common;
/// Construction-time configuration.
pub mod config;
/// The storage layers: addressable store, snapshotting store, rename table.
pub mod core;

/// Configuration type; use `RenameConfig::default()` or deserialize from JSON.
pub use crate::config::RenameConfig;
/// Main entry point: the rename table with checkpoint/rollback.
pub use crate::core::rename::RenameTable;

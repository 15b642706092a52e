//! The three storage layers of the versioning core, leaves first.
//!
//! [`regfile`] is the addressable leaf, [`snapshot`] adds checkpoint and
//! rollback on top of it, and [`rename`] specializes the result into an
//! architectural-to-physical register mapping.

/// Multi-port addressable store (the leaf primitive).
pub mod regfile;

/// Snapshotting store: checkpoint/rollback and same-step conflict rules.
pub mod snapshot;

/// Rename table built on the snapshotting store.
pub mod rename;

pub use self::regfile::RegFile;
pub use self::rename::RenameTable;
pub use self::snapshot::SnapshotRegFile;

//! Construction-time error definitions.
//!
//! The versioning core is a pure state machine: once built, no operation can
//! fail during step evaluation (every same-step conflict has a specified,
//! deterministic outcome). The only fallible moment is construction, where
//! an impossible configuration must be rejected before any state exists.

use thiserror::Error;

use super::types::PhysReg;

/// Errors rejected at construction time.
///
/// These are fatal configuration mistakes, never runtime conditions: a core
/// that constructs successfully can be stepped forever without error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A capacity parameter was zero.
    #[error("capacity `{name}` must be positive")]
    ZeroCapacity {
        /// Name of the offending parameter.
        name: &'static str,
    },

    /// The supplied initial mapping does not cover the table exactly.
    #[error("initial map has {got} entries but the table holds {expected}")]
    InitialMapLength {
        /// Required entry count (the table capacity).
        expected: usize,
        /// Entries actually supplied.
        got: usize,
    },

    /// An initial-mapping entry names a physical register that does not exist.
    #[error("initial map entry {index} is physical register {preg}, but only {npregs} exist")]
    InitialMapRange {
        /// Architectural register whose mapping is out of range.
        index: usize,
        /// The out-of-range physical tag.
        preg: PhysReg,
        /// Number of physical registers available.
        npregs: usize,
    },

    /// `const_zero` needs a dedicated tag (`npregs - 1`) distinct from tag 0.
    #[error("const_zero requires at least 2 physical registers")]
    ZeroTagUnavailable,
}

//! Configuration for the speculative-state versioning core.
//!
//! This module defines the construction-time parameters of the rename table
//! and its underlying snapshotting storage. It provides:
//! 1. **Defaults:** Baseline capacities for a modest out-of-order core.
//! 2. **Structure:** A single `Deserialize` config, loadable from JSON.
//! 3. **Validation:** Early rejection of impossible configurations.
//!
//! All parameters are fixed for the lifetime of the constructed core; there
//! is no dynamic resizing.

use serde::Deserialize;

use crate::common::error::ConfigError;
use crate::common::types::PhysReg;

/// Default capacities when not explicitly overridden.
mod defaults {
    /// Architectural register count (RISC-style integer file).
    pub const NAREGS: usize = 32;

    /// Physical register count; must exceed `NAREGS` for renaming to buy
    /// anything.
    pub const NPREGS: usize = 64;

    /// Checkpoint slots: bounds the number of unresolved speculative
    /// branches in flight.
    pub const NSNAPSHOTS: usize = 4;

    /// Lookup ports (two source operands per decoded instruction).
    pub const NUM_LOOKUP_PORTS: usize = 2;

    /// Update ports (one destination allocation per decoded instruction).
    pub const NUM_UPDATE_PORTS: usize = 1;
}

/// Construction-time configuration for a [`RenameTable`](crate::core::rename::RenameTable).
///
/// Deserializable from JSON; every field has a default, so a partial
/// document works:
///
/// ```
/// use rename_core::config::RenameConfig;
///
/// let config: RenameConfig = serde_json::from_str(r#"{ "nsnapshots": 8 }"#).unwrap();
/// assert_eq!(config.nsnapshots, 8);
/// assert_eq!(config.naregs, 32);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RenameConfig {
    /// Architectural register count (the table's address space).
    #[serde(default = "RenameConfig::default_naregs")]
    pub naregs: usize,

    /// Physical register count (the range of stored tags).
    #[serde(default = "RenameConfig::default_npregs")]
    pub npregs: usize,

    /// Number of independent checkpoint slots.
    #[serde(default = "RenameConfig::default_nsnapshots")]
    pub nsnapshots: usize,

    /// Number of lookup (read) ports. May be zero.
    #[serde(default = "RenameConfig::default_num_lookup_ports")]
    pub num_lookup_ports: usize,

    /// Number of update (write) ports. May be zero.
    #[serde(default = "RenameConfig::default_num_update_ports")]
    pub num_update_ports: usize,

    /// Hardwire architectural register 0 to the constant tag `npregs - 1`:
    /// lookups of it ignore the table and updates to it are dropped.
    #[serde(default = "RenameConfig::default_const_zero")]
    pub const_zero: bool,

    /// Whether a same-step snapshot captures state after this step's updates
    /// (`true`, the hardware convention for rename tables) or before them.
    #[serde(default = "RenameConfig::default_write_snapshot_bypass")]
    pub write_snapshot_bypass: bool,

    /// Boot-time mapping, one physical tag per architectural register.
    /// Defaults to the identity mapping when absent.
    #[serde(default)]
    pub initial_map: Option<Vec<PhysReg>>,
}

impl RenameConfig {
    fn default_naregs() -> usize {
        defaults::NAREGS
    }

    fn default_npregs() -> usize {
        defaults::NPREGS
    }

    fn default_nsnapshots() -> usize {
        defaults::NSNAPSHOTS
    }

    fn default_num_lookup_ports() -> usize {
        defaults::NUM_LOOKUP_PORTS
    }

    fn default_num_update_ports() -> usize {
        defaults::NUM_UPDATE_PORTS
    }

    /// Real ISAs reserve a zero register; keep the optimization on by default.
    fn default_const_zero() -> bool {
        true
    }

    /// A checkpoint taken at a branch must include the mappings allocated in
    /// the same step as the branch, so the bypass defaults on.
    fn default_write_snapshot_bypass() -> bool {
        true
    }

    /// Checks that the configuration describes a constructible core.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for zero capacities, an initial map whose
    /// length or entries do not fit the configured register files, or a
    /// `const_zero` request without a spare tag to hardwire.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.naregs == 0 {
            return Err(ConfigError::ZeroCapacity { name: "naregs" });
        }
        if self.npregs == 0 {
            return Err(ConfigError::ZeroCapacity { name: "npregs" });
        }
        if self.nsnapshots == 0 {
            return Err(ConfigError::ZeroCapacity { name: "nsnapshots" });
        }
        if self.const_zero && self.npregs < 2 {
            return Err(ConfigError::ZeroTagUnavailable);
        }
        if let Some(map) = &self.initial_map {
            if map.len() != self.naregs {
                return Err(ConfigError::InitialMapLength {
                    expected: self.naregs,
                    got: map.len(),
                });
            }
            for (index, &preg) in map.iter().enumerate() {
                if preg as usize >= self.npregs {
                    return Err(ConfigError::InitialMapRange {
                        index,
                        preg,
                        npregs: self.npregs,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            naregs: defaults::NAREGS,
            npregs: defaults::NPREGS,
            nsnapshots: defaults::NSNAPSHOTS,
            num_lookup_ports: defaults::NUM_LOOKUP_PORTS,
            num_update_ports: defaults::NUM_UPDATE_PORTS,
            const_zero: true,
            write_snapshot_bypass: true,
            initial_map: None,
        }
    }
}

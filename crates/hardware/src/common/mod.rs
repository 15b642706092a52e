//! Common types shared across the versioning core.
//!
//! This module provides the building blocks used by every storage layer:
//! 1. **Value Types:** The physical register tag and port-request latches.
//! 2. **Error Handling:** Construction-time configuration errors.

/// Construction-time error types.
pub mod error;

/// Physical register tags and step-latch request types.
pub mod types;

pub use error::ConfigError;
pub use types::{PhysReg, WriteReq};

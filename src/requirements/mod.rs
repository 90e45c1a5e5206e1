//! Requirement detection and version checking.
//!
//! This module determines whether the external tools Trellis relies on are
//! installed and recent enough.
//!
//! # Modules
//!
//! - [`checker`] - Per-requirement checks and the aggregate report
//! - [`probe`] - PATH lookup and version output capture
//! - [`registry`] - The static, ordered table of requirements
//! - [`version`] - Version and constraint parsing

pub mod checker;
pub mod probe;
pub mod registry;
pub mod version;

pub use checker::{CheckEntry, CheckReport, RequirementChecker, RequirementResult};
pub use probe::{SystemProbe, ToolProbe};
pub use registry::{Requirement, REQUIREMENTS, REQUIREMENTS_DOCS_URL};
pub use version::{Comparator, Version, VersionConstraint};

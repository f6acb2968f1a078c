//! Layout validation for entities
//!
//! This module checks entity and member declarations against the fixed-layout rules and builds
//! the byte-occupancy map that detects underflow, overflow, misalignment and overlap. It also
//! resolves the offsets of linear layouts.
//!
//! The main entry point is [`LayoutValidator`]. [`MemoryMapBuilder`] and [`LinearLayout`] are
//! exposed for callers that want to map or place members without running the rule checks.

mod config;
mod entity;
mod layout;
mod linear;
mod member;
mod memorymap;
mod report;

pub use config::{ValidationConfig, MAX_LENGTH};
pub use layout::{duplicate_entity_ids, LayoutValidator};
pub use linear::LinearLayout;
pub use memorymap::{LayoutIssue, MapEntry, MapFinding, MemoryMap, MemoryMapBuilder};
pub use report::{ResolvedLayout, ResolvedOffset, ValidationReport};

//! Validation configuration for layout checks
//!
//! This module provides configuration presets controlling which groups of layout rules run.
//! Entity-level checks (layout declaration, layout method, block length) always run; they are
//! the preconditions everything else depends on.

/// Largest block, field, string or array length any layout may use.
pub const MAX_LENGTH: i32 = 1024;

/// Configuration for layout validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Enable per-member rule checks (type, nullability, offsets, lengths, capacities)
    pub enable_member_validation: bool,

    /// Enable the byte-occupancy pass (underflow, overflow, misalignment, overlap)
    pub enable_memory_map: bool,

    /// Upper bound of the accepted block length range (clamped to `1..=1024`)
    pub max_block_length: i32,
}

impl Default for ValidationConfig {
    /// Every rule: entity, member and memory map checks.
    fn default() -> Self {
        Self {
            enable_member_validation: true,
            enable_memory_map: true,
            max_block_length: MAX_LENGTH,
        }
    }
}

impl ValidationConfig {
    /// Creates a configuration that only runs the entity-level checks.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enable_member_validation: false,
            enable_memory_map: false,
            max_block_length: MAX_LENGTH,
        }
    }

    /// Creates a configuration running the entity and member rules without the memory map.
    ///
    /// Declarations are checked one member at a time; overlaps and block bounds are not.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            enable_member_validation: true,
            enable_memory_map: false,
            max_block_length: MAX_LENGTH,
        }
    }

    /// Sets the largest accepted block length.
    #[must_use]
    pub fn with_max_block_length(mut self, max_block_length: i32) -> Self {
        self.max_block_length = max_block_length;
        self
    }

    /// The block length bound actually applied.
    #[must_use]
    pub fn effective_max_block_length(&self) -> i32 {
        self.max_block_length.clamp(1, MAX_LENGTH)
    }
}

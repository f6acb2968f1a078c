//! # memlayout Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the memlayout library. Import it to describe entities, validate them and access
//! validated blocks.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The error type for codec operations
pub use crate::Error;

/// The result type used throughout memlayout
pub use crate::Result;

// ================================================================================================
// Layout Model
// ================================================================================================

/// Entity and member descriptors
pub use crate::model::{ByteOrder, Entity, LayoutMethod, Location, Member, MemberType, ScalarType};

// ================================================================================================
// Validation
// ================================================================================================

/// Validator entry points and configuration
pub use crate::validation::{
    LayoutValidator, MemoryMapBuilder, ResolvedLayout, ValidationConfig, ValidationReport,
};

/// Validation findings
pub use crate::diagnostics::{Diagnostic, DiagnosticId, DiagnosticSeverity, Diagnostics};

// ================================================================================================
// Codecs
// ================================================================================================

/// Fixed-width codecs
pub use crate::codec::{
    ArrayCodec, Codec, CodecRegistry, LayoutIO, MemberCodec, Scalar, StringCodec,
};

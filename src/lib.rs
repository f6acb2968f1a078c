// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # memlayout
//!
//! Validation of fixed byte-offset record layouts, and the endian-aware fixed-width codecs that
//! read and write those records in raw memory blocks.
//!
//! A record ("entity") is a fixed-size block of bytes. Each of its members occupies a byte range
//! determined either explicitly by a declared offset or computed by linear placement. Before any
//! code relies on such a layout for zero-copy access, `memlayout` checks that the layout is
//! sound: sizes are whole powers of two, every member is aligned to its own length, and no two
//! members share a byte.
//!
//! ## Features
//!
//! - **Exhaustive diagnostics** - every problem of an entity is reported in one pass, without
//!   cascading follow-up findings
//! - **Byte-occupancy map** - deterministic overlap attribution by member sequence
//! - **Linear layout** - offsets and block length computed from declaration order
//! - **Parallel validation** - many entities validated concurrently, with a cross-entity id check
//! - **Fixed-width codecs** - a static table of little- and big-endian codecs for every supported
//!   primitive, plus string and array codecs, that never allocate and never touch bytes outside
//!   their view
//!
//! ## Quick Start
//!
//! ```rust
//! use memlayout::prelude::*;
//!
//! let entity = Entity::new("Demo", "Packet")
//!     .explicit(16)
//!     .with_member(Member::scalar("id", ScalarType::U64, 1).with_offset(0))
//!     .with_member(Member::scalar("flags", ScalarType::U16, 2).with_offset(8))
//!     .with_member(Member::scalar("kind", ScalarType::U8, 3).with_offset(9));
//!
//! let report = LayoutValidator::default().validate(&entity);
//! for diagnostic in &report.diagnostics {
//!     println!("{diagnostic}");
//! }
//! assert!(!report.is_generatable());
//! assert_eq!(report.diagnostics[0].code(), "DMMB0008");
//! ```
//!
//! ## Architecture
//!
//! - [`model`] - entity and member descriptors handed in by the caller
//! - [`validation`] - the rules, the memory map and linear placement
//! - [`diagnostics`] - the findings validation produces
//! - [`codec`] - the fixed-width codecs used to access a validated block
//!
//! ## Error Handling
//!
//! Validation never fails: problems with a declaration are [`diagnostics::Diagnostic`] values.
//! The [`Error`] type only covers the codec boundary, for example a byte view of the wrong
//! length.

#[macro_use]
pub(crate) mod macros;

mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use memlayout::prelude::*;
///
/// let member = Member::scalar("value", ScalarType::F64, 1);
/// assert_eq!(member.total_length(), 8);
/// ```
pub mod prelude;

/// Entity and member descriptors.
pub mod model;

/// Diagnostics reported by layout validation.
pub mod diagnostics;

/// Layout rules, the byte-occupancy map and linear layout resolution.
///
/// # Examples
///
/// ```rust
/// use memlayout::{model::{Entity, Member, ScalarType}, validation::LayoutValidator};
///
/// let entity = Entity::new("Demo", "Point")
///     .linear()
///     .with_member(Member::scalar("x", ScalarType::F32, 1))
///     .with_member(Member::scalar("y", ScalarType::F32, 2));
///
/// let report = LayoutValidator::default().validate(&entity);
/// let layout = report.layout.expect("linear layout");
/// assert_eq!(layout.block_length, 8);
/// assert_eq!(layout.offset_of("y"), Some(4));
/// ```
pub mod validation;

/// Fixed-width codecs for member values.
pub mod codec;

/// Small numeric helpers shared by the validators.
pub mod utils;

/// `memlayout` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `memlayout` Error type
///
/// The main error type for all codec operations.
pub use error::Error;

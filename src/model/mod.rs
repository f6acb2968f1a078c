//! Immutable layout descriptors: entities, members and their type tags.
//!
//! These types are plain data. They are built once per validation pass by whatever discovers
//! record declarations (a build script, a proc-macro, a schema file loader), handed to
//! [`crate::validation::LayoutValidator`], and then discarded. Nothing in this module checks
//! anything; an [`Entity`] may describe an arbitrarily broken layout and the validator reports
//! every problem it finds.
//!
//! # Key Components
//!
//! - [`Entity`] - A record with a layout method, block length and ordered members
//! - [`Member`] - One field with type, byte order, sizes and optional declared offset
//! - [`MemberView`] - A member plus a borrowed back-reference to its entity
//! - [`ScalarType`], [`MemberType`], [`ByteOrder`], [`LayoutMethod`] - Type tags
//! - [`Location`] - Opaque source location carried into diagnostics
//!
//! # Example
//!
//! ```rust
//! use memlayout::model::{Entity, Member, ScalarType};
//!
//! let entity = Entity::new("MyOrg.Trading", "Quote")
//!     .explicit(32)
//!     .with_member(Member::scalar("price", ScalarType::F64, 1).with_offset(0))
//!     .with_member(Member::scalar("size", ScalarType::U32, 2).with_offset(8))
//!     .with_member(Member::string("symbol", 16, 3).with_offset(16));
//!
//! assert_eq!(entity.members.len(), 3);
//! assert_eq!(entity.qualified_name(), "MyOrg.Trading.Quote");
//! ```

mod entity;
mod location;
mod member;
mod types;

pub use entity::{Entity, MemberView};
pub use location::Location;
pub use member::Member;
pub use types::{ByteOrder, LayoutMethod, MemberType, ScalarType};

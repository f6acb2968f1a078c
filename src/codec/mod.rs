//! Fixed-width codecs for reading and writing member values in raw byte blocks.
//!
//! Every codec works on a caller-owned byte view of exactly its width. Codecs never read or
//! write outside that view and never allocate.
//!
//! # Key Components
//!
//! - [`LayoutIO`] - endian-aware conversion implemented by every supported primitive
//! - [`read_at`] / [`write_at`] - typed access to a field at an offset in a block
//! - [`Scalar`] - a value of any supported scalar type
//! - [`CodecRegistry`] / [`Codec`] - static table of scalar codecs keyed by type and byte order
//! - [`StringCodec`] - zero-padded UTF-8 string slots
//! - [`ArrayCodec`] - fixed-capacity arrays built from an element codec
//! - [`MemberCodec`] - the codec of a declared member
//!
//! # Examples
//!
//! ```rust
//! use memlayout::{
//!     codec::{MemberCodec, Scalar},
//!     model::{ByteOrder, Member, ScalarType},
//! };
//!
//! let member = Member::scalar("count", ScalarType::U32, 1).with_byte_order(ByteOrder::Big);
//! let mut block = [0u8; 8];
//!
//! if let Some(MemberCodec::Scalar(codec)) = MemberCodec::for_member(&member) {
//!     codec.encode(&mut block[4..8], Scalar::U32(42))?;
//!     assert_eq!(codec.decode(&block[4..8])?, Scalar::U32(42));
//! }
//! assert_eq!(block, [0, 0, 0, 0, 0, 0, 0, 42]);
//! # Ok::<(), memlayout::Error>(())
//! ```

mod array;
mod io;
mod member;
mod registry;
mod scalar;
mod string;

pub use array::{ArrayCodec, ArrayIter};
pub use io::{read_at, write_at, LayoutIO};
pub use member::MemberCodec;
pub use registry::{Codec, CodecRegistry};
pub use scalar::Scalar;
pub use string::StringCodec;

//! Endian-aware fixed-width conversion for the primitive field types.
//!
//! The [`LayoutIO`] trait is the foundation of every codec in this crate. Each implementation
//! maps a value to and from a byte array of exactly [`LayoutIO::WIDTH`] bytes in either byte
//! order. On top of that the trait provides slice-based helpers that check the view length
//! before touching a single byte, and [`read_at`] / [`write_at`] address a field inside a larger
//! block by offset.
//!
//! # Supported Types
//!
//! | Width | Types |
//! |-------|-------|
//! | 1 | `bool`, `i8`, `u8` |
//! | 2 | `i16`, `u16`, [`half::f16`] |
//! | 4 | `i32`, `u32`, `f32` |
//! | 8 | `i64`, `u64`, `f64` |
//! | 16 | `i128`, `u128`, [`rust_decimal::Decimal`], [`uguid::Guid`] |
//!
//! Single-byte types ignore the byte order.
//!
//! # Examples
//!
//! ```rust
//! use memlayout::{codec::{read_at, write_at, LayoutIO}, model::ByteOrder};
//!
//! assert_eq!(u32::encode(1, ByteOrder::Big), [0, 0, 0, 1]);
//! assert_eq!(u16::decode([0x34, 0x12], ByteOrder::Little), 0x1234);
//!
//! let mut block = [0u8; 8];
//! write_at(&mut block, 4, ByteOrder::Little, 0xAABB_u16)?;
//! assert_eq!(block, [0, 0, 0, 0, 0xBB, 0xAA, 0, 0]);
//! assert_eq!(read_at::<u16>(&block, 4, ByteOrder::Little)?, 0xAABB);
//! # Ok::<(), memlayout::Error>(())
//! ```
//!
//! # Thread Safety
//!
//! All conversions are pure functions over their arguments.

use half::f16;
use rust_decimal::Decimal;
use uguid::Guid;

use crate::{model::ByteOrder, Error, Result};

/// Fixed-width, endian-aware conversion between a value and its encoded bytes.
///
/// Implementations only supply the four raw conversions; the provided methods dispatch on
/// [`ByteOrder`] and handle byte views.
pub trait LayoutIO: Copy {
    /// Encoded width in bytes
    const WIDTH: usize;

    /// The byte array holding one encoded value
    type Bytes: Copy + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Decodes a little-endian value
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
    /// Decodes a big-endian value
    fn from_be_bytes(bytes: Self::Bytes) -> Self;

    /// Encodes the value little-endian
    fn to_le_bytes(self) -> Self::Bytes;
    /// Encodes the value big-endian
    fn to_be_bytes(self) -> Self::Bytes;

    /// Decodes `bytes` in the given byte order.
    fn decode(bytes: Self::Bytes, order: ByteOrder) -> Self {
        match order {
            ByteOrder::Little => Self::from_le_bytes(bytes),
            ByteOrder::Big => Self::from_be_bytes(bytes),
        }
    }

    /// Encodes `value` in the given byte order.
    fn encode(value: Self, order: ByteOrder) -> Self::Bytes {
        match order {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        }
    }

    /// Decodes a value from a view of exactly [`Self::WIDTH`] bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ViewLength`] if the view has any other length.
    fn read(view: &[u8], order: ByteOrder) -> Result<Self> {
        let Ok(bytes) = <Self::Bytes as TryFrom<&[u8]>>::try_from(view) else {
            return Err(Error::ViewLength {
                expected: Self::WIDTH,
                actual: view.len(),
            });
        };

        Ok(Self::decode(bytes, order))
    }

    /// Encodes `value` into a view of exactly [`Self::WIDTH`] bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ViewLength`] if the view has any other length; the view is left
    /// untouched in that case.
    fn write(view: &mut [u8], order: ByteOrder, value: Self) -> Result<()> {
        if view.len() != Self::WIDTH {
            return Err(Error::ViewLength {
                expected: Self::WIDTH,
                actual: view.len(),
            });
        }

        view.copy_from_slice(Self::encode(value, order).as_ref());
        Ok(())
    }
}

/// Reads the value of type `T` stored at `offset` within `block`.
///
/// # Errors
///
/// Returns [`Error::ViewLength`] if `block` ends before `offset + T::WIDTH`. The reported
/// `expected` length is the minimum block length that would have been accepted.
pub fn read_at<T: LayoutIO>(block: &[u8], offset: usize, order: ByteOrder) -> Result<T> {
    T::read(field(block, offset, T::WIDTH)?, order)
}

/// Writes `value` at `offset` within `block`, leaving every other byte untouched.
///
/// # Errors
///
/// Returns [`Error::ViewLength`] if `block` ends before `offset + T::WIDTH`.
pub fn write_at<T: LayoutIO>(block: &mut [u8], offset: usize, order: ByteOrder, value: T) -> Result<()> {
    let actual = block.len();
    let Some(view) = offset
        .checked_add(T::WIDTH)
        .and_then(|end| block.get_mut(offset..end))
    else {
        return Err(Error::ViewLength {
            expected: offset.saturating_add(T::WIDTH),
            actual,
        });
    };

    T::write(view, order, value)
}

fn field(block: &[u8], offset: usize, width: usize) -> Result<&[u8]> {
    offset
        .checked_add(width)
        .and_then(|end| block.get(offset..end))
        .ok_or(Error::ViewLength {
            expected: offset.saturating_add(width),
            actual: block.len(),
        })
}

macro_rules! impl_layout_io {
    ($($ty:ty => $width:literal),* $(,)?) => {
        $(
            impl LayoutIO for $ty {
                const WIDTH: usize = $width;
                type Bytes = [u8; $width];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }

                fn from_be_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_be_bytes(bytes)
                }

                fn to_le_bytes(self) -> Self::Bytes {
                    <$ty>::to_le_bytes(self)
                }

                fn to_be_bytes(self) -> Self::Bytes {
                    <$ty>::to_be_bytes(self)
                }
            }
        )*
    };
}

impl_layout_io! {
    i8 => 1, u8 => 1,
    i16 => 2, u16 => 2, f16 => 2,
    i32 => 4, u32 => 4, f32 => 4,
    i64 => 8, u64 => 8, f64 => 8,
    i128 => 16, u128 => 16,
}

impl LayoutIO for bool {
    const WIDTH: usize = 1;
    type Bytes = [u8; 1];

    // any nonzero byte reads as true
    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        bytes[0] != 0
    }

    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        bytes[0] != 0
    }

    fn to_le_bytes(self) -> Self::Bytes {
        [u8::from(self)]
    }

    fn to_be_bytes(self) -> Self::Bytes {
        [u8::from(self)]
    }
}

/// Decimals use the 16-byte serialized form: flags, then the low, middle and high words of
/// the 96-bit mantissa. Big-endian stores each of the four words big-endian.
impl LayoutIO for Decimal {
    const WIDTH: usize = 16;
    type Bytes = [u8; 16];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        Decimal::deserialize(bytes)
    }

    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        Decimal::deserialize(swap_words(bytes))
    }

    fn to_le_bytes(self) -> Self::Bytes {
        self.serialize()
    }

    fn to_be_bytes(self) -> Self::Bytes {
        swap_words(self.serialize())
    }
}

fn swap_words(mut bytes: [u8; 16]) -> [u8; 16] {
    for word in bytes.chunks_exact_mut(4) {
        word.reverse();
    }
    bytes
}

/// Little-endian is the mixed-endian in-memory GUID layout, big-endian is the RFC 4122
/// network order.
impl LayoutIO for Guid {
    const WIDTH: usize = 16;
    type Bytes = [u8; 16];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        Guid::from_bytes(bytes)
    }

    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        Guid::from_bytes(swap_guid_fields(bytes))
    }

    fn to_le_bytes(self) -> Self::Bytes {
        self.to_bytes()
    }

    fn to_be_bytes(self) -> Self::Bytes {
        swap_guid_fields(self.to_bytes())
    }
}

fn swap_guid_fields(mut bytes: [u8; 16]) -> [u8; 16] {
    bytes[0..4].reverse();
    bytes[4..6].reverse();
    bytes[6..8].reverse();
    bytes
}

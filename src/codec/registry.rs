//! Static dispatch table of the scalar codecs.

use half::f16;
use rust_decimal::Decimal;
use strum::EnumCount;
use uguid::Guid;

use crate::{
    codec::{LayoutIO, Scalar},
    model::{ByteOrder, ScalarType},
    Error, Result,
};

/// Codec for one scalar type in one byte order.
///
/// Entries live in a `static` table and are obtained through [`CodecRegistry::get`]; they are
/// plain function pointers and can be shared freely between threads.
#[derive(Debug)]
pub struct Codec {
    scalar_type: ScalarType,
    byte_order: ByteOrder,
    width: usize,
    decode: fn(&[u8]) -> Result<Scalar>,
    encode: fn(&mut [u8], Scalar) -> Result<()>,
}

impl Codec {
    /// Type handled by this codec.
    #[must_use]
    pub fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }

    /// Byte order of this codec.
    #[must_use]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Encoded width in bytes.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Decodes the value held in `view`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ViewLength`] if `view` is not exactly [`Codec::width`] bytes long.
    pub fn decode(&self, view: &[u8]) -> Result<Scalar> {
        (self.decode)(view)
    }

    /// Encodes `value` into `view`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueType`] if `value` is not of this codec's type, or
    /// [`Error::ViewLength`] if `view` is not exactly [`Codec::width`] bytes long. The view is
    /// not modified on error.
    pub fn encode(&self, view: &mut [u8], value: Scalar) -> Result<()> {
        (self.encode)(view, value)
    }
}

fn decode_le<T: LayoutIO + Into<Scalar>>(view: &[u8]) -> Result<Scalar> {
    T::read(view, ByteOrder::Little).map(Into::into)
}

fn decode_be<T: LayoutIO + Into<Scalar>>(view: &[u8]) -> Result<Scalar> {
    T::read(view, ByteOrder::Big).map(Into::into)
}

fn encode_le<T: LayoutIO + TryFrom<Scalar, Error = Error>>(view: &mut [u8], value: Scalar) -> Result<()> {
    T::write(view, ByteOrder::Little, T::try_from(value)?)
}

fn encode_be<T: LayoutIO + TryFrom<Scalar, Error = Error>>(view: &mut [u8], value: Scalar) -> Result<()> {
    T::write(view, ByteOrder::Big, T::try_from(value)?)
}

macro_rules! codec_table {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        [
            $(
                Codec {
                    scalar_type: ScalarType::$variant,
                    byte_order: ByteOrder::Little,
                    width: <$ty as LayoutIO>::WIDTH,
                    decode: decode_le::<$ty>,
                    encode: encode_le::<$ty>,
                },
                Codec {
                    scalar_type: ScalarType::$variant,
                    byte_order: ByteOrder::Big,
                    width: <$ty as LayoutIO>::WIDTH,
                    decode: decode_be::<$ty>,
                    encode: encode_be::<$ty>,
                },
            )*
        ]
    };
}

// Rows follow the `ScalarType` discriminants, little-endian first.
static CODECS: [Codec; ScalarType::COUNT * ByteOrder::COUNT] = codec_table! {
    Bool => bool,
    I8 => i8,
    U8 => u8,
    I16 => i16,
    U16 => u16,
    I32 => i32,
    U32 => u32,
    I64 => i64,
    U64 => u64,
    I128 => i128,
    U128 => u128,
    F16 => f16,
    F32 => f32,
    F64 => f64,
    Decimal => Decimal,
    Guid => Guid,
};

/// Lookup of the scalar codecs by type and byte order.
///
/// The registry holds no state; every lookup is an index into a static table.
///
/// # Examples
///
/// ```rust
/// use memlayout::{codec::{CodecRegistry, Scalar}, model::{ByteOrder, ScalarType}};
///
/// let codec = CodecRegistry::get(ScalarType::U16, ByteOrder::Big);
/// let mut view = [0u8; 2];
/// codec.encode(&mut view, Scalar::U16(0x1234))?;
/// assert_eq!(view, [0x12, 0x34]);
/// assert_eq!(codec.decode(&view)?, Scalar::U16(0x1234));
/// # Ok::<(), memlayout::Error>(())
/// ```
pub struct CodecRegistry;

impl CodecRegistry {
    /// The codec for `scalar_type` in `byte_order`.
    #[must_use]
    pub fn get(scalar_type: ScalarType, byte_order: ByteOrder) -> &'static Codec {
        &CODECS[scalar_type as usize * ByteOrder::COUNT + byte_order as usize]
    }

    /// Every registered codec.
    pub fn iter() -> impl Iterator<Item = &'static Codec> {
        CODECS.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_table_rows() {
        for scalar_type in ScalarType::iter() {
            for byte_order in ByteOrder::iter() {
                let codec = CodecRegistry::get(scalar_type, byte_order);
                assert_eq!(codec.scalar_type(), scalar_type);
                assert_eq!(codec.byte_order(), byte_order);
                assert_eq!(codec.width(), scalar_type.width());
            }
        }
        assert_eq!(CodecRegistry::iter().count(), 32);
    }

    #[test]
    fn test_type_mismatch_leaves_view() {
        let codec = CodecRegistry::get(ScalarType::I32, ByteOrder::Little);
        let mut view = [0xAA; 4];
        assert_eq!(
            codec.encode(&mut view, Scalar::U32(1)),
            Err(Error::ValueType {
                expected: ScalarType::I32,
                found: ScalarType::U32
            })
        );
        assert_eq!(view, [0xAA; 4]);
    }

    #[test]
    fn test_single_byte_ignores_order() {
        let mut le = [0u8; 1];
        let mut be = [0u8; 1];
        CodecRegistry::get(ScalarType::I8, ByteOrder::Little)
            .encode(&mut le, Scalar::I8(-3))
            .unwrap();
        CodecRegistry::get(ScalarType::I8, ByteOrder::Big)
            .encode(&mut be, Scalar::I8(-3))
            .unwrap();
        assert_eq!(le, be);
    }

    #[test]
    fn test_wrong_view() {
        let codec = CodecRegistry::get(ScalarType::Guid, ByteOrder::Big);
        assert_eq!(
            codec.decode(&[0; 15]),
            Err(Error::ViewLength {
                expected: 16,
                actual: 15
            })
        );
    }
}

//! A dynamically typed value of any supported scalar type.

use std::fmt;

use half::f16;
use rust_decimal::Decimal;
use uguid::Guid;

use crate::{model::ScalarType, Error};

/// One scalar value, as produced and consumed by the dynamic [`crate::codec::Codec`] entries.
///
/// `Scalar` is `Copy` and never allocates. Equality compares values, so float `NaN`s are
/// unequal to themselves; use [`Scalar::bit_eq`] to compare encodings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    /// `bool`
    Bool(bool),
    /// `i8`
    I8(i8),
    /// `u8`
    U8(u8),
    /// `i16`
    I16(i16),
    /// `u16`
    U16(u16),
    /// `i32`
    I32(i32),
    /// `u32`
    U32(u32),
    /// `i64`
    I64(i64),
    /// `u64`
    U64(u64),
    /// `i128`
    I128(i128),
    /// `u128`
    U128(u128),
    /// Half precision float
    F16(f16),
    /// Single precision float
    F32(f32),
    /// Double precision float
    F64(f64),
    /// 128-bit decimal
    Decimal(Decimal),
    /// GUID
    Guid(Guid),
}

impl Scalar {
    /// Type tag of the value.
    #[must_use]
    pub const fn scalar_type(&self) -> ScalarType {
        match self {
            Scalar::Bool(_) => ScalarType::Bool,
            Scalar::I8(_) => ScalarType::I8,
            Scalar::U8(_) => ScalarType::U8,
            Scalar::I16(_) => ScalarType::I16,
            Scalar::U16(_) => ScalarType::U16,
            Scalar::I32(_) => ScalarType::I32,
            Scalar::U32(_) => ScalarType::U32,
            Scalar::I64(_) => ScalarType::I64,
            Scalar::U64(_) => ScalarType::U64,
            Scalar::I128(_) => ScalarType::I128,
            Scalar::U128(_) => ScalarType::U128,
            Scalar::F16(_) => ScalarType::F16,
            Scalar::F32(_) => ScalarType::F32,
            Scalar::F64(_) => ScalarType::F64,
            Scalar::Decimal(_) => ScalarType::Decimal,
            Scalar::Guid(_) => ScalarType::Guid,
        }
    }

    /// The zero value of `scalar_type`.
    #[must_use]
    pub fn zero(scalar_type: ScalarType) -> Self {
        match scalar_type {
            ScalarType::Bool => Scalar::Bool(false),
            ScalarType::I8 => Scalar::I8(0),
            ScalarType::U8 => Scalar::U8(0),
            ScalarType::I16 => Scalar::I16(0),
            ScalarType::U16 => Scalar::U16(0),
            ScalarType::I32 => Scalar::I32(0),
            ScalarType::U32 => Scalar::U32(0),
            ScalarType::I64 => Scalar::I64(0),
            ScalarType::U64 => Scalar::U64(0),
            ScalarType::I128 => Scalar::I128(0),
            ScalarType::U128 => Scalar::U128(0),
            ScalarType::F16 => Scalar::F16(f16::ZERO),
            ScalarType::F32 => Scalar::F32(0.0),
            ScalarType::F64 => Scalar::F64(0.0),
            ScalarType::Decimal => Scalar::Decimal(Decimal::ZERO),
            ScalarType::Guid => Scalar::Guid(Guid::ZERO),
        }
    }

    /// Equality that compares floats by bit pattern, so a `NaN` equals an identical `NaN`.
    #[must_use]
    pub fn bit_eq(&self, other: &Scalar) -> bool {
        match (self, other) {
            (Scalar::F16(a), Scalar::F16(b)) => a.to_bits() == b.to_bits(),
            (Scalar::F32(a), Scalar::F32(b)) => a.to_bits() == b.to_bits(),
            (Scalar::F64(a), Scalar::F64(b)) => a.to_bits() == b.to_bits(),
            (Scalar::Decimal(a), Scalar::Decimal(b)) => a.serialize() == b.serialize(),
            _ => self == other,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::I8(v) => write!(f, "{v}"),
            Scalar::U8(v) => write!(f, "{v}"),
            Scalar::I16(v) => write!(f, "{v}"),
            Scalar::U16(v) => write!(f, "{v}"),
            Scalar::I32(v) => write!(f, "{v}"),
            Scalar::U32(v) => write!(f, "{v}"),
            Scalar::I64(v) => write!(f, "{v}"),
            Scalar::U64(v) => write!(f, "{v}"),
            Scalar::I128(v) => write!(f, "{v}"),
            Scalar::U128(v) => write!(f, "{v}"),
            Scalar::F16(v) => write!(f, "{v}"),
            Scalar::F32(v) => write!(f, "{v}"),
            Scalar::F64(v) => write!(f, "{v}"),
            Scalar::Decimal(v) => write!(f, "{v}"),
            Scalar::Guid(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_scalar_conversions {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::$variant(value)
                }
            }

            impl TryFrom<Scalar> for $ty {
                type Error = Error;

                fn try_from(value: Scalar) -> Result<Self, Self::Error> {
                    match value {
                        Scalar::$variant(inner) => Ok(inner),
                        other => Err(Error::ValueType {
                            expected: ScalarType::$variant,
                            found: other.scalar_type(),
                        }),
                    }
                }
            }
        )*
    };
}

impl_scalar_conversions! {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_zero_matches_type() {
        for scalar_type in ScalarType::iter() {
            assert_eq!(Scalar::zero(scalar_type).scalar_type(), scalar_type);
        }
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Scalar::from(7_u16), Scalar::U16(7));
        assert_eq!(u16::try_from(Scalar::U16(7)), Ok(7));
        assert_eq!(
            u16::try_from(Scalar::I16(7)),
            Err(Error::ValueType {
                expected: ScalarType::U16,
                found: ScalarType::I16
            })
        );
    }

    #[test]
    fn test_bit_eq() {
        let nan = Scalar::F32(f32::NAN);
        assert_ne!(nan, nan);
        assert!(nan.bit_eq(&nan));
        assert!(!Scalar::F32(0.0).bit_eq(&Scalar::F32(-0.0)));
        assert!(Scalar::U8(1).bit_eq(&Scalar::U8(1)));
    }
}

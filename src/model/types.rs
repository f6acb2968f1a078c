//! Type tags, byte order and layout method enumerations of the layout model.

use std::{fmt, str::FromStr};

use strum::{EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Fixed-width primitive types a member (or an array element) can have.
///
/// Each tag parses from either its Rust-style name (`u32`, `f64`, `bool`) or the portable
/// name a schema author may have written (`UInt32`, `Double`, `Boolean`). The discriminant is the
/// row index of the type in [`crate::codec::CodecRegistry`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCount, EnumString, IntoStaticStr,
)]
#[repr(u8)]
pub enum ScalarType {
    /// Boolean stored as a single byte
    #[strum(to_string = "bool", serialize = "Boolean")]
    Bool = 0,
    /// Signed 8-bit integer
    #[strum(to_string = "i8", serialize = "SByte", serialize = "Int8")]
    I8 = 1,
    /// Unsigned 8-bit integer
    #[strum(to_string = "u8", serialize = "Byte", serialize = "UInt8")]
    U8 = 2,
    /// Signed 16-bit integer
    #[strum(to_string = "i16", serialize = "Int16")]
    I16 = 3,
    /// Unsigned 16-bit integer
    #[strum(to_string = "u16", serialize = "UInt16")]
    U16 = 4,
    /// Signed 32-bit integer
    #[strum(to_string = "i32", serialize = "Int32")]
    I32 = 5,
    /// Unsigned 32-bit integer
    #[strum(to_string = "u32", serialize = "UInt32")]
    U32 = 6,
    /// Signed 64-bit integer
    #[strum(to_string = "i64", serialize = "Int64")]
    I64 = 7,
    /// Unsigned 64-bit integer
    #[strum(to_string = "u64", serialize = "UInt64")]
    U64 = 8,
    /// Signed 128-bit integer
    #[strum(to_string = "i128", serialize = "Int128")]
    I128 = 9,
    /// Unsigned 128-bit integer
    #[strum(to_string = "u128", serialize = "UInt128")]
    U128 = 10,
    /// IEEE 754 half precision float
    #[strum(to_string = "f16", serialize = "Half")]
    F16 = 11,
    /// IEEE 754 single precision float
    #[strum(to_string = "f32", serialize = "Single", serialize = "Float")]
    F32 = 12,
    /// IEEE 754 double precision float
    #[strum(to_string = "f64", serialize = "Double")]
    F64 = 13,
    /// 128-bit decimal in its 16-byte native binary form
    #[strum(to_string = "decimal", serialize = "Decimal")]
    Decimal = 14,
    /// 128-bit globally unique identifier
    #[strum(to_string = "guid", serialize = "Guid")]
    Guid = 15,
}

impl ScalarType {
    /// Encoded width of the type in bytes.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            ScalarType::Bool | ScalarType::I8 | ScalarType::U8 => 1,
            ScalarType::I16 | ScalarType::U16 | ScalarType::F16 => 2,
            ScalarType::I32 | ScalarType::U32 | ScalarType::F32 => 4,
            ScalarType::I64 | ScalarType::U64 | ScalarType::F64 => 8,
            ScalarType::I128
            | ScalarType::U128
            | ScalarType::Decimal
            | ScalarType::Guid => 16,
        }
    }

    /// True if byte order has any effect on the encoding.
    #[must_use]
    pub const fn is_order_sensitive(self) -> bool {
        self.width() > 1
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name: &'static str = self.into();
        f.write_str(name)
    }
}

/// Declared type of a member: a fixed-width scalar or a fixed-length string.
///
/// Arrays are not a separate type; they are a scalar member with `is_array` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberType {
    /// Fixed-width primitive
    Scalar(ScalarType),
    /// Zero-padded UTF-8 text of a declared length
    String,
}

impl MemberType {
    /// Encoded width of one element, `None` for strings whose width is their declared length.
    #[must_use]
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            MemberType::Scalar(scalar) => Some(scalar.width()),
            MemberType::String => None,
        }
    }
}

impl FromStr for MemberType {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" | "String" | "str" => Ok(MemberType::String),
            other => ScalarType::from_str(other).map(MemberType::Scalar),
        }
    }
}

impl fmt::Display for MemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberType::Scalar(scalar) => write!(f, "{scalar}"),
            MemberType::String => write!(f, "string"),
        }
    }
}

/// Byte order of a multi-byte member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter, EnumCount)]
#[repr(u8)]
pub enum ByteOrder {
    /// Least significant byte first
    #[default]
    Little = 0,
    /// Most significant byte first
    Big = 1,
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOrder::Little => write!(f, "LE"),
            ByteOrder::Big => write!(f, "BE"),
        }
    }
}

/// Strategy used to determine the byte offsets of an entity's members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LayoutMethod {
    /// No usable layout method was declared
    #[default]
    Undefined,
    /// Offsets are computed from declaration order
    Linear,
    /// Offsets are declared per member by the schema author
    Explicit,
}

impl LayoutMethod {
    /// True for the layout methods offsets can be determined with.
    #[must_use]
    pub const fn is_recognized(self) -> bool {
        matches!(self, LayoutMethod::Linear | LayoutMethod::Explicit)
    }
}

impl fmt::Display for LayoutMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutMethod::Undefined => write!(f, "Undefined"),
            LayoutMethod::Linear => write!(f, "Linear"),
            LayoutMethod::Explicit => write!(f, "Explicit"),
        }
    }
}

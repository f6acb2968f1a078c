//! Codec resolution for a declared member.

use crate::{
    codec::{ArrayCodec, Codec, CodecRegistry, StringCodec},
    model::{Member, MemberType},
};

/// The codec that reads and writes one member's bytes.
#[derive(Debug, Clone, Copy)]
pub enum MemberCodec {
    /// Single scalar
    Scalar(&'static Codec),
    /// Fixed-length string
    String(StringCodec),
    /// Fixed-capacity scalar array
    Array(ArrayCodec),
}

impl MemberCodec {
    /// Resolves the codec for `member` from its type, byte order and sizes.
    ///
    /// Returns `None` for members no codec exists for: unsupported type names, arrays of
    /// strings, and non-positive string lengths or array capacities. The codec width equals
    /// the member's total length for every member that passed validation.
    #[must_use]
    #[allow(clippy::cast_sign_loss)] // positive values only
    pub fn for_member(member: &Member) -> Option<Self> {
        match (member.member_type()?, member.is_array) {
            (MemberType::String, false) if member.string_length > 0 => {
                Some(MemberCodec::String(StringCodec::new(member.string_length as usize)))
            }
            (MemberType::Scalar(scalar), false) => Some(MemberCodec::Scalar(CodecRegistry::get(
                scalar,
                member.byte_order,
            ))),
            (MemberType::Scalar(scalar), true) if member.array_capacity > 0 => {
                Some(MemberCodec::Array(ArrayCodec::new(
                    CodecRegistry::get(scalar, member.byte_order),
                    member.array_capacity as usize,
                )))
            }
            _ => None,
        }
    }

    /// Bytes read and written by the codec.
    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            MemberCodec::Scalar(codec) => codec.width(),
            MemberCodec::String(codec) => codec.width(),
            MemberCodec::Array(codec) => codec.width(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ByteOrder, ScalarType};

    #[test]
    fn test_scalar_member() {
        let member = Member::scalar("a", ScalarType::I64, 1).with_byte_order(ByteOrder::Big);
        let Some(MemberCodec::Scalar(codec)) = MemberCodec::for_member(&member) else {
            panic!("expected a scalar codec");
        };
        assert_eq!(codec.scalar_type(), ScalarType::I64);
        assert_eq!(codec.byte_order(), ByteOrder::Big);
    }

    #[test]
    fn test_widths_match_total_length() {
        let members = [
            Member::scalar("a", ScalarType::Guid, 1),
            Member::string("s", 32, 2),
            Member::array("arr", ScalarType::F32, 8, 3),
        ];
        for member in &members {
            let codec = MemberCodec::for_member(member).unwrap();
            assert_eq!(codec.width() as i64, member.total_length(), "{}", member.name);
        }
    }

    #[test]
    fn test_unresolvable() {
        assert!(MemberCodec::for_member(&Member::new("a", "DateTime", 1)).is_none());
        assert!(MemberCodec::for_member(&Member::string("s", 0, 1)).is_none());
        assert!(MemberCodec::for_member(&Member::array("arr", ScalarType::U8, 0, 1)).is_none());

        let mut strings = Member::string("names", 8, 1);
        strings.is_array = true;
        strings.array_capacity = 4;
        assert!(MemberCodec::for_member(&strings).is_none());
    }
}

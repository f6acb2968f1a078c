//! Integration tests for the fixed-width codecs.
//!
//! Every codec is exercised through the registry in both byte orders with boundary values,
//! inside a buffer whose surrounding bytes are sentinels that must survive every operation.

use half::f16;
use memlayout::prelude::*;
use rust_decimal::Decimal;
use strum::IntoEnumIterator;
use uguid::{guid, Guid};

const SENTINEL: u8 = 0xA5;
const GUARD: usize = 8;

/// Representative values per type: zero, minimum, maximum and a few odd ones.
fn samples(scalar_type: ScalarType) -> Vec<Scalar> {
    match scalar_type {
        ScalarType::Bool => vec![Scalar::Bool(false), Scalar::Bool(true)],
        ScalarType::I8 => vec![Scalar::I8(0), Scalar::I8(i8::MIN), Scalar::I8(i8::MAX), Scalar::I8(-1)],
        ScalarType::U8 => vec![Scalar::U8(0), Scalar::U8(u8::MAX), Scalar::U8(0x5A)],
        ScalarType::I16 => vec![Scalar::I16(0), Scalar::I16(i16::MIN), Scalar::I16(i16::MAX)],
        ScalarType::U16 => vec![Scalar::U16(0), Scalar::U16(u16::MAX), Scalar::U16(0x1234)],
        ScalarType::I32 => vec![Scalar::I32(0), Scalar::I32(i32::MIN), Scalar::I32(i32::MAX)],
        ScalarType::U32 => vec![Scalar::U32(0), Scalar::U32(u32::MAX), Scalar::U32(0xDEAD_BEEF)],
        ScalarType::I64 => vec![Scalar::I64(0), Scalar::I64(i64::MIN), Scalar::I64(i64::MAX)],
        ScalarType::U64 => vec![Scalar::U64(0), Scalar::U64(u64::MAX)],
        ScalarType::I128 => vec![Scalar::I128(0), Scalar::I128(i128::MIN), Scalar::I128(i128::MAX)],
        ScalarType::U128 => vec![Scalar::U128(0), Scalar::U128(u128::MAX)],
        ScalarType::F16 => vec![
            Scalar::F16(f16::ZERO),
            Scalar::F16(f16::NEG_ZERO),
            Scalar::F16(f16::MIN),
            Scalar::F16(f16::MAX),
            Scalar::F16(f16::INFINITY),
            Scalar::F16(f16::NAN),
        ],
        ScalarType::F32 => vec![
            Scalar::F32(0.0),
            Scalar::F32(-0.0),
            Scalar::F32(f32::MIN),
            Scalar::F32(f32::MAX),
            Scalar::F32(f32::MIN_POSITIVE),
            Scalar::F32(f32::NEG_INFINITY),
            Scalar::F32(f32::from_bits(0x7FC0_1234)),
        ],
        ScalarType::F64 => vec![
            Scalar::F64(0.0),
            Scalar::F64(f64::MIN),
            Scalar::F64(f64::MAX),
            Scalar::F64(f64::EPSILON),
            Scalar::F64(f64::from_bits(0xFFF8_0000_0000_0001)),
        ],
        ScalarType::Decimal => vec![
            Scalar::Decimal(Decimal::ZERO),
            Scalar::Decimal(Decimal::MIN),
            Scalar::Decimal(Decimal::MAX),
            Scalar::Decimal(Decimal::new(-31_415_926_535, 10)),
        ],
        ScalarType::Guid => vec![
            Scalar::Guid(Guid::ZERO),
            Scalar::Guid(guid!("01234567-89ab-cdef-0123-456789abcdef")),
        ],
    }
}

#[test]
fn test_round_trip_all_codecs() {
    for scalar_type in ScalarType::iter() {
        for byte_order in ByteOrder::iter() {
            let codec = CodecRegistry::get(scalar_type, byte_order);
            let width = codec.width();

            for value in samples(scalar_type) {
                let mut buffer = vec![SENTINEL; width + 2 * GUARD];
                let window = GUARD..GUARD + width;

                codec.encode(&mut buffer[window.clone()], value).unwrap();
                let decoded = codec.decode(&buffer[window]).unwrap();

                assert!(
                    decoded.bit_eq(&value),
                    "{scalar_type} {byte_order}: {value} decoded as {decoded}"
                );
                assert!(buffer[..GUARD].iter().all(|&b| b == SENTINEL));
                assert!(buffer[GUARD + width..].iter().all(|&b| b == SENTINEL));
            }
        }
    }
}

#[test]
fn test_orders_mirror_for_integers() {
    let le = CodecRegistry::get(ScalarType::U64, ByteOrder::Little);
    let be = CodecRegistry::get(ScalarType::U64, ByteOrder::Big);

    let mut a = [0u8; 8];
    let mut b = [0u8; 8];
    le.encode(&mut a, Scalar::U64(0x0102_0304_0506_0708)).unwrap();
    be.encode(&mut b, Scalar::U64(0x0102_0304_0506_0708)).unwrap();

    b.reverse();
    assert_eq!(a, b);
}

#[test]
fn test_member_block_access() {
    let entity = Entity::new("MyOrg.Models", "Record")
        .explicit(32)
        .with_member(Member::scalar("Id", ScalarType::I64, 1).with_offset(0))
        .with_member(Member::string("Name", 8, 2).with_offset(8))
        .with_member(
            Member::array("Levels", ScalarType::U16, 4, 3)
                .with_offset(16)
                .with_byte_order(ByteOrder::Big),
        );

    let report = LayoutValidator::default().validate(&entity);
    let layout = report.layout.expect("clean layout");
    let mut block = vec![0u8; layout.block_length];

    for slot in &layout.offsets {
        let Some(member) = entity.member(&slot.name) else {
            panic!("unknown member {}", slot.name);
        };
        let view = &mut block[slot.offset..slot.end()];

        match MemberCodec::for_member(&member).expect("codec") {
            MemberCodec::Scalar(codec) => codec.encode(view, Scalar::I64(-2)).unwrap(),
            MemberCodec::String(codec) => codec.encode(view, "alpha").unwrap(),
            MemberCodec::Array(codec) => codec
                .encode(view, &[1_u16, 2, 3, 4].map(Scalar::U16))
                .unwrap(),
        }
    }

    assert_eq!(block[..8], [0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
    assert_eq!(&block[8..16], b"alpha\0\0\0");
    assert_eq!(block[16..24], [0, 1, 0, 2, 0, 3, 0, 4]);
    assert!(block[24..].iter().all(|&b| b == 0));

    let levels = ArrayCodec::new(CodecRegistry::get(ScalarType::U16, ByteOrder::Big), 4);
    let decoded: Vec<Scalar> = levels.decode_iter(&block[16..24]).unwrap().collect();
    assert_eq!(decoded, [1_u16, 2, 3, 4].map(Scalar::U16));
}

#[test]
fn test_codec_width_matches_slot() {
    let entity = Entity::new("MyOrg.Models", "Mixed")
        .explicit(64)
        .with_member(Member::scalar("Flag", ScalarType::Bool, 1).with_offset(0))
        .with_member(Member::scalar("Ratio", ScalarType::F16, 2).with_offset(2))
        .with_member(Member::scalar("Count", ScalarType::U32, 3).with_offset(4))
        .with_member(Member::string("Code", 8, 4).with_offset(8))
        .with_member(Member::scalar("Key", ScalarType::Guid, 5).with_offset(16))
        .with_member(Member::array("Samples", ScalarType::F64, 4, 6).with_offset(32));

    for config in [ValidationConfig::default(), ValidationConfig::minimal()] {
        let report = LayoutValidator::new(config).validate(&entity);
        assert!(report.is_generatable(), "{:?}", report.diagnostics);
        let layout = report.layout.expect("clean layout");
        assert_eq!(layout.offsets.len(), entity.members.len());

        for slot in &layout.offsets {
            let member = entity.member(&slot.name).expect("declared member");
            let codec = MemberCodec::for_member(&member).expect("codec");
            assert_eq!(codec.width(), slot.length, "{}", slot.name);
        }
    }
}

#[test]
fn test_string_slot_disagreement_blocks_generation() {
    // a 16-byte string codec in an 8-byte slot would overwrite Next
    let entity = Entity::new("MyOrg.Models", "Short")
        .explicit(16)
        .with_member(Member::string("Name", 16, 1).with_field_length(8).with_offset(0))
        .with_member(Member::scalar("Next", ScalarType::U64, 2).with_offset(8));

    for config in [ValidationConfig::default(), ValidationConfig::minimal()] {
        let report = LayoutValidator::new(config).validate(&entity);
        assert!(!report.is_generatable());
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].id, DiagnosticId::InvalidFieldLength);
        assert_eq!(report.diagnostics[0].member.as_deref(), Some("Name"));
        assert!(report.layout.is_none());
    }
}

#[test]
fn test_string_isolation() {
    let codec = StringCodec::new(8);
    let mut buffer = [SENTINEL; 8 + 2 * GUARD];

    codec.encode(&mut buffer[GUARD..GUARD + 8], "hi").unwrap();
    assert_eq!(codec.decode(&buffer[GUARD..GUARD + 8]).unwrap(), "hi");
    assert!(buffer[..GUARD].iter().all(|&b| b == SENTINEL));
    assert!(buffer[GUARD + 8..].iter().all(|&b| b == SENTINEL));
}

#[test]
fn test_wrong_view_is_an_error() {
    let codec = CodecRegistry::get(ScalarType::F32, ByteOrder::Little);
    let mut view = [SENTINEL; 5];
    assert_eq!(
        codec.encode(&mut view, Scalar::F32(1.0)),
        Err(Error::ViewLength {
            expected: 4,
            actual: 5
        })
    );
    assert_eq!(view, [SENTINEL; 5]);
}

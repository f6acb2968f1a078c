//! Property tests for layout validation and the codecs.

use memlayout::{prelude::*, utils::is_power_of_two};
use proptest::prelude::*;
use rust_decimal::Decimal;
use strum::IntoEnumIterator;

fn arb_scalar_type() -> impl Strategy<Value = ScalarType> {
    prop::sample::select(ScalarType::iter().collect::<Vec<_>>())
}

fn arb_byte_order() -> impl Strategy<Value = ByteOrder> {
    prop_oneof![Just(ByteOrder::Little), Just(ByteOrder::Big)]
}

fn arb_explicit_entity() -> impl Strategy<Value = Entity> {
    (
        prop::sample::select(vec![8, 16, 32, 64]),
        prop::collection::vec((arb_scalar_type(), 0..72_i32), 0..8),
    )
        .prop_map(|(block_length, members)| {
            members.into_iter().enumerate().fold(
                Entity::new("Prop", "Explicit").explicit(block_length),
                |entity, (i, (scalar_type, offset))| {
                    entity.with_member(
                        Member::scalar(format!("m{i}"), scalar_type, i as i32 + 1).with_offset(offset),
                    )
                },
            )
        })
}

fn arb_linear_entity() -> impl Strategy<Value = Entity> {
    prop::collection::vec((arb_scalar_type(), 1..3_i32, any::<bool>()), 0..8).prop_map(|members| {
        members.into_iter().enumerate().fold(
            Entity::new("Prop", "Linear").linear(),
            |entity, (i, (scalar_type, capacity, is_array))| {
                let sequence = i as i32 + 1;
                let member = if is_array {
                    Member::array(format!("m{i}"), scalar_type, 1 << capacity, sequence)
                } else {
                    Member::scalar(format!("m{i}"), scalar_type, sequence)
                };
                entity.with_member(member)
            },
        )
    })
}

fn assert_sound(layout: &ResolvedLayout) -> std::result::Result<(), TestCaseError> {
    for (i, a) in layout.offsets.iter().enumerate() {
        prop_assert!(a.end() <= layout.block_length);
        prop_assert_eq!(a.offset % a.length, 0);
        for b in &layout.offsets[i + 1..] {
            prop_assert!(!a.overlaps(b), "{} overlaps {}", a.name, b.name);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn block_length_accepted_iff_power_of_two_in_range(block_length in -2048_i32..4096) {
        let entity = Entity::new("Prop", "Block").explicit(block_length);
        let accepted = LayoutValidator::default().validate_entity(&entity).is_empty();
        let expected = is_power_of_two(i64::from(block_length)).is_some()
            && (1..=1024).contains(&block_length);
        prop_assert_eq!(accepted, expected);
    }

    #[test]
    fn validation_is_idempotent(entity in arb_explicit_entity()) {
        let validator = LayoutValidator::default();
        prop_assert_eq!(validator.validate(&entity), validator.validate(&entity));
    }

    #[test]
    fn clean_explicit_layouts_are_disjoint_and_aligned(entity in arb_explicit_entity()) {
        let report = LayoutValidator::default().validate(&entity);
        if report.diagnostics.is_empty() {
            let layout = report.layout.expect("clean explicit layout");
            prop_assert_eq!(layout.offsets.len(), entity.members.len());
            assert_sound(&layout)?;
        }
    }

    #[test]
    fn linear_layouts_are_sound(entity in arb_linear_entity()) {
        let report = LayoutValidator::default().validate(&entity);
        prop_assert!(report.is_generatable(), "{:?}", report.diagnostics);

        let layout = report.layout.expect("linear layout");
        prop_assert!(is_power_of_two(layout.block_length as i64).is_some());
        prop_assert_eq!(layout.offsets.len(), entity.members.len());
        assert_sound(&layout)?;
    }

    #[test]
    fn invalid_capacity_yields_one_size_diagnostic(
        capacity in (3..200_i32).prop_filter("not a power of two", |c| c & (c - 1) != 0),
        offset in 0..4_i32,
    ) {
        let entity = Entity::new("Prop", "Capacity")
            .explicit(64)
            .with_member(Member::array("values", ScalarType::U8, capacity, 1).with_offset(offset));

        let diagnostics = LayoutValidator::default().validate_entity(&entity);
        prop_assert_eq!(diagnostics.len(), 1);
        prop_assert_eq!(diagnostics[0].id, DiagnosticId::InvalidArrayCapacity);
    }

    #[test]
    fn integer_round_trip(value in any::<i128>(), order in arb_byte_order()) {
        let codec = CodecRegistry::get(ScalarType::I128, order);
        let mut view = [0u8; 16];
        codec.encode(&mut view, Scalar::I128(value))?;
        prop_assert_eq!(codec.decode(&view)?, Scalar::I128(value));
        prop_assert_eq!(i128::decode(view, order), value);
    }

    #[test]
    fn float_round_trip_preserves_bits(bits in any::<u64>(), order in arb_byte_order()) {
        let value = Scalar::F64(f64::from_bits(bits));
        let codec = CodecRegistry::get(ScalarType::F64, order);
        let mut view = [0u8; 8];
        codec.encode(&mut view, value)?;
        prop_assert!(codec.decode(&view)?.bit_eq(&value));
    }

    #[test]
    fn decimal_round_trip(mantissa in any::<i64>(), scale in 0..=28_u32, order in arb_byte_order()) {
        let value = Decimal::new(mantissa, scale);
        prop_assert_eq!(Decimal::decode(Decimal::encode(value, order), order), value);
    }

    #[test]
    fn guid_round_trip(bytes in any::<[u8; 16]>(), order in arb_byte_order()) {
        let value = uguid::Guid::from_bytes(bytes);
        prop_assert_eq!(uguid::Guid::decode(uguid::Guid::encode(value, order), order), value);
    }
}

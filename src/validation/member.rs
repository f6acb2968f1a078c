//! Member-level layout rules.
//!
//! Each rule contributes at most one diagnostic per member. Rules whose input was already
//! reported as invalid by an earlier rule are skipped, so a single bad size never produces a
//! cascade of follow-up findings.

use crate::{
    diagnostics::{Diagnostic, DiagnosticId},
    model::{LayoutMethod, MemberType, MemberView},
    utils::is_power_of_two_in_range,
    validation::{config::MAX_LENGTH, ValidationConfig},
};

/// Outcome of the member-level rules.
#[derive(Debug, Default)]
pub(crate) struct MemberFindings {
    /// Findings in rule order
    pub diagnostics: Vec<Diagnostic>,
    /// Sizes and offset are sound enough for the member to take part in the memory map
    pub layout_ready: bool,
}

/// Validator for member declarations
pub(crate) struct MemberValidator;

impl MemberValidator {
    /// Runs every member rule against `member`.
    ///
    /// The findings are computed regardless of `config.enable_member_validation`; the flag only
    /// controls whether they are reported. Map participation always follows the rules.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)] // widths are <= 16
    pub fn check(member: &MemberView<'_>, config: &ValidationConfig) -> MemberFindings {
        let mut diagnostics = Vec::new();
        let layout_method = member.layout_method();
        let member_type = member.member_type();
        let location = || member.location.clone();

        // type
        match member_type {
            None => diagnostics.push(diagnostic!(
                DiagnosticId::UnsupportedMemberType,
                location(),
                "MemberType '{}' not supported",
                member.type_name
            )),
            Some(MemberType::String) if member.is_array => diagnostics.push(diagnostic!(
                DiagnosticId::UnsupportedMemberType,
                location(),
                "Arrays of strings are not supported."
            )),
            Some(_) => {}
        }

        if member.is_nullable {
            diagnostics.push(diagnostic!(
                DiagnosticId::UnsupportedMemberType,
                location(),
                "Nullable type '{}?' is not supported.",
                member.type_name
            ));
        }

        // offset declaration
        let mut offset_ok = true;
        if layout_method == LayoutMethod::Explicit && member.declared_offset.is_none() {
            offset_ok = false;
            diagnostics.push(diagnostic!(
                DiagnosticId::MissingOffsetAttribute,
                location(),
                "Offset declaration is missing."
            ));
        }

        // lengths
        let is_string = member_type == Some(MemberType::String);
        let string_ok = !is_string || is_valid_length(member.string_length);
        let mut field_ok = is_valid_length(member.field_length);

        if !field_ok {
            diagnostics.push(diagnostic!(
                DiagnosticId::InvalidFieldLength,
                location(),
                "FieldLength ({}) is invalid. FieldLength must be a whole power of 2 between 1 and {}.",
                member.field_length,
                MAX_LENGTH
            ));
        } else if is_string {
            // the string slot is string_length bytes; both sizes must describe it
            if string_ok && member.field_length != member.string_length {
                field_ok = false;
                diagnostics.push(diagnostic!(
                    DiagnosticId::InvalidFieldLength,
                    location(),
                    "FieldLength ({}) does not match StringLength ({}).",
                    member.field_length,
                    member.string_length
                ));
            }
        } else {
            // scalar codecs are exactly as wide as their type, elements included
            let width = member_type.and_then(MemberType::fixed_width);
            if let (Some(member_type), Some(width)) = (member_type, width) {
                if member.field_length != width as i32 {
                    field_ok = false;
                    diagnostics.push(diagnostic!(
                        DiagnosticId::InvalidFieldLength,
                        location(),
                        "FieldLength ({}) does not match the {}-byte width of {}.",
                        member.field_length,
                        width,
                        member_type
                    ));
                }
            }
        }

        if !string_ok {
            diagnostics.push(diagnostic!(
                DiagnosticId::InvalidArrayCapacity,
                location(),
                "StringLength ({}) is invalid. StringLength must be a whole power of 2 between 1 and {}.",
                member.string_length,
                MAX_LENGTH
            ));
        }

        let capacity_ok = !member.is_array || is_valid_length(member.array_capacity);
        if !capacity_ok {
            diagnostics.push(diagnostic!(
                DiagnosticId::InvalidArrayCapacity,
                location(),
                "ArrayCapacity ({}) is invalid. ArrayCapacity must be a whole power of 2 between 1 and {}.",
                member.array_capacity,
                MAX_LENGTH
            ));
        }

        let mut total_ok = true;
        if member.is_array && field_ok && capacity_ok {
            let total_length = member.total_length();
            if !is_power_of_two_in_range(total_length, 1, i64::from(MAX_LENGTH)) {
                total_ok = false;
                diagnostics.push(diagnostic!(
                    DiagnosticId::InvalidArrayCapacity,
                    location(),
                    "Total length ({}) is invalid. Total length must be a whole power of 2 between 1 and {}.",
                    total_length,
                    MAX_LENGTH
                ));
            }
        }

        // offset value
        if layout_method == LayoutMethod::Explicit {
            if let Some(offset) = member.declared_offset {
                if offset < 0 {
                    offset_ok = false;
                    diagnostics.push(diagnostic!(
                        DiagnosticId::InvalidFieldOffset,
                        location(),
                        "FieldOffset ({}) must be >= 0",
                        offset
                    ));
                }
            }
        }

        for diagnostic in &mut diagnostics {
            diagnostic.member = Some(member.name.clone());
        }

        MemberFindings {
            diagnostics: if config.enable_member_validation {
                diagnostics
            } else {
                Vec::new()
            },
            layout_ready: field_ok && string_ok && capacity_ok && total_ok && offset_ok,
        }
    }
}

fn is_valid_length(value: i32) -> bool {
    is_power_of_two_in_range(i64::from(value), 1, i64::from(MAX_LENGTH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entity, Member, ScalarType};

    fn check(entity: &Entity, config: &ValidationConfig) -> MemberFindings {
        let view = entity.members_by_sequence()[0];
        MemberValidator::check(&view, config)
    }

    fn ids(findings: &MemberFindings) -> Vec<DiagnosticId> {
        findings.diagnostics.iter().map(|d| d.id).collect()
    }

    fn explicit(member: Member) -> Entity {
        Entity::new("ns", "E").explicit(64).with_member(member)
    }

    #[test]
    fn test_valid_scalar() {
        let findings = check(
            &explicit(Member::scalar("a", ScalarType::U64, 1).with_offset(8)),
            &ValidationConfig::default(),
        );
        assert!(findings.diagnostics.is_empty());
        assert!(findings.layout_ready);
    }

    #[test]
    fn test_unsupported_type_does_not_block_layout() {
        let findings = check(
            &explicit(Member::new("a", "DateTime", 1).with_field_length(8).with_offset(0)),
            &ValidationConfig::default(),
        );
        assert_eq!(ids(&findings), [DiagnosticId::UnsupportedMemberType]);
        assert!(findings.layout_ready);
        assert_eq!(findings.diagnostics[0].member.as_deref(), Some("a"));
    }

    #[test]
    fn test_nullable() {
        let findings = check(
            &explicit(Member::scalar("a", ScalarType::I32, 1).with_offset(0).nullable()),
            &ValidationConfig::default(),
        );
        assert_eq!(ids(&findings), [DiagnosticId::UnsupportedMemberType]);
        assert!(findings.diagnostics[0].message.contains("'i32?'"));
    }

    #[test]
    fn test_missing_offset_only_for_explicit() {
        let findings = check(
            &explicit(Member::scalar("a", ScalarType::I32, 1)),
            &ValidationConfig::default(),
        );
        assert_eq!(ids(&findings), [DiagnosticId::MissingOffsetAttribute]);
        assert!(!findings.layout_ready);

        let linear = Entity::new("ns", "E").linear().with_member(Member::scalar("a", ScalarType::I32, 1));
        let findings = check(&linear, &ValidationConfig::default());
        assert!(findings.diagnostics.is_empty());
        assert!(findings.layout_ready);
    }

    #[test]
    fn test_invalid_field_length() {
        let findings = check(
            &explicit(Member::new("a", "u32", 1).with_field_length(3).with_offset(0)),
            &ValidationConfig::default(),
        );
        assert_eq!(ids(&findings), [DiagnosticId::InvalidFieldLength]);
        assert!(!findings.layout_ready);
    }

    #[test]
    fn test_type_width_mismatch() {
        let member = Member::scalar("a", ScalarType::U32, 1).with_field_length(8).with_offset(0);

        for config in [ValidationConfig::default(), ValidationConfig::minimal()] {
            let findings = check(&explicit(member.clone()), &config);
            assert_eq!(ids(&findings), [DiagnosticId::InvalidFieldLength]);
            assert!(findings.diagnostics[0].message.contains("4-byte width of u32"));
            assert!(!findings.layout_ready);
        }

        let array = Member::array("arr", ScalarType::U16, 4, 1).with_field_length(4).with_offset(0);
        let findings = check(&explicit(array), &ValidationConfig::default());
        assert_eq!(ids(&findings), [DiagnosticId::InvalidFieldLength]);
        assert!(!findings.layout_ready);
    }

    #[test]
    fn test_invalid_string_length() {
        let findings = check(
            &explicit(Member::string("s", 12, 1).with_field_length(16).with_offset(0)),
            &ValidationConfig::default(),
        );
        assert_eq!(ids(&findings), [DiagnosticId::InvalidArrayCapacity]);
        assert!(findings.diagnostics[0].message.starts_with("StringLength (12)"));
    }

    #[test]
    fn test_string_field_length_mismatch() {
        let member = Member::string("s", 16, 1).with_field_length(8).with_offset(0);
        for config in [ValidationConfig::default(), ValidationConfig::minimal()] {
            let findings = check(&explicit(member.clone()), &config);
            assert_eq!(ids(&findings), [DiagnosticId::InvalidFieldLength]);
            assert!(findings.diagnostics[0].message.contains("StringLength (16)"));
            assert!(!findings.layout_ready);
        }
    }

    #[test]
    fn test_array_capacity_reports_once() {
        let findings = check(
            &explicit(Member::array("arr", ScalarType::U32, 3, 1).with_offset(0)),
            &ValidationConfig::default(),
        );
        assert_eq!(ids(&findings), [DiagnosticId::InvalidArrayCapacity]);
        assert!(!findings.layout_ready);
    }

    #[test]
    fn test_array_total_length() {
        let findings = check(
            &explicit(Member::array("arr", ScalarType::U128, 128, 1).with_offset(0)),
            &ValidationConfig::default(),
        );
        assert_eq!(ids(&findings), [DiagnosticId::InvalidArrayCapacity]);
        assert!(findings.diagnostics[0].message.starts_with("Total length (2048)"));
        assert!(!findings.layout_ready);
    }

    #[test]
    fn test_array_of_strings() {
        let mut member = Member::string("names", 8, 1).with_offset(0);
        member.is_array = true;
        member.array_capacity = 2;
        let findings = check(&explicit(member), &ValidationConfig::default());
        assert_eq!(ids(&findings), [DiagnosticId::UnsupportedMemberType]);
    }

    #[test]
    fn test_negative_offset() {
        let findings = check(
            &explicit(Member::scalar("a", ScalarType::U8, 1).with_offset(-1)),
            &ValidationConfig::default(),
        );
        assert_eq!(ids(&findings), [DiagnosticId::InvalidFieldOffset]);
        assert!(!findings.layout_ready);
    }

    #[test]
    fn test_disabled_reporting_keeps_readiness() {
        let findings = check(
            &explicit(Member::scalar("a", ScalarType::U8, 1).with_offset(-1)),
            &ValidationConfig::disabled(),
        );
        assert!(findings.diagnostics.is_empty());
        assert!(!findings.layout_ready);
    }

    #[test]
    fn test_rule_order() {
        let member = Member::new("a", "Object", 1).nullable().with_field_length(3);
        let findings = check(&explicit(member), &ValidationConfig::default());
        assert_eq!(
            ids(&findings),
            [
                DiagnosticId::UnsupportedMemberType,
                DiagnosticId::UnsupportedMemberType,
                DiagnosticId::MissingOffsetAttribute,
                DiagnosticId::InvalidFieldLength,
            ]
        );
    }
}

//! Entity-level layout rules.
//!
//! These are the preconditions for everything else: without a recognized layout method there
//! is no way to determine offsets, and without a valid explicit block length there is no block
//! to map members into.

use crate::{
    diagnostics::{Diagnostic, DiagnosticId},
    model::{Entity, LayoutMethod},
    utils::is_power_of_two_in_range,
    validation::ValidationConfig,
};

/// Outcome of the entity-level rules.
#[derive(Debug, Default)]
pub(crate) struct EntityFindings {
    /// Findings in rule order
    pub diagnostics: Vec<Diagnostic>,
    /// The member memory map can be built for this entity
    pub map_ready: bool,
}

/// Validator for entity layout declarations
pub(crate) struct EntityValidator;

impl EntityValidator {
    /// Runs the layout declaration, layout method and block length rules.
    pub fn check(entity: &Entity, config: &ValidationConfig) -> EntityFindings {
        let mut findings = EntityFindings::default();

        if let Some(diagnostic) = Self::check_has_layout(entity) {
            findings.diagnostics.push(diagnostic);
            return findings;
        }

        if let Some(diagnostic) = Self::check_layout_method(entity) {
            findings.diagnostics.push(diagnostic);
            return findings;
        }

        if let Some(diagnostic) = Self::check_block_length(entity, config) {
            findings.diagnostics.push(diagnostic);
            return findings;
        }

        findings.map_ready = true;
        findings
    }

    fn check_has_layout(entity: &Entity) -> Option<Diagnostic> {
        if entity.has_layout {
            return None;
        }

        Some(diagnostic!(
            DiagnosticId::MissingLayoutAttribute,
            entity.location.clone(),
            "Layout declaration is missing on entity '{}'.",
            entity.qualified_name()
        ))
    }

    fn check_layout_method(entity: &Entity) -> Option<Diagnostic> {
        match entity.layout_method {
            LayoutMethod::Linear | LayoutMethod::Explicit => None,
            LayoutMethod::Undefined => Some(diagnostic!(
                DiagnosticId::InvalidLayoutMethod,
                entity.location.clone(),
                "LayoutMethod is not defined."
            )),
        }
    }

    fn check_block_length(entity: &Entity, config: &ValidationConfig) -> Option<Diagnostic> {
        if entity.layout_method != LayoutMethod::Explicit {
            return None;
        }

        let maximum = config.effective_max_block_length();
        if is_power_of_two_in_range(i64::from(entity.block_length), 1, i64::from(maximum)) {
            return None;
        }

        Some(diagnostic!(
            DiagnosticId::InvalidBlockLength,
            entity.location.clone(),
            "BlockLength ({}) is invalid. BlockLength must be a whole power of 2 between 1 and {}.",
            entity.block_length,
            maximum
        ))
    }
}

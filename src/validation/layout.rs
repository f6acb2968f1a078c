//! The layout validator: entity rules, member rules and the memory map pass in one place.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::{
    diagnostics::{Diagnostic, DiagnosticId, Diagnostics},
    model::{Entity, LayoutMethod, MemberView},
    validation::{
        entity::EntityValidator,
        linear::LinearLayout,
        member::MemberValidator,
        memorymap::MemoryMapBuilder,
        report::{ResolvedLayout, ResolvedOffset, ValidationReport},
        ValidationConfig,
    },
};

/// Validates the fixed byte layout of entities.
///
/// Validation never fails. Every problem found in a declaration is returned as a
/// [`Diagnostic`], and all applicable rules run in a single pass so every problem of an entity
/// is reported at once. A rule whose precondition was already reported is skipped for that
/// target:
///
/// - without a layout declaration only `MissingLayoutAttribute` is reported
/// - an undefined layout method or an invalid explicit block length stops before the members
///   are mapped
/// - a member whose offset or sizes were reported does not take part in the memory map
///
/// With member validation disabled a member can be left out of the map without a finding; the
/// report then carries no layout rather than a partial one.
///
/// # Examples
///
/// ```rust
/// use memlayout::prelude::*;
///
/// let entity = Entity::new("Demo", "Header")
///     .explicit(4)
///     .with_member(Member::scalar("a", ScalarType::U32, 1).with_offset(0))
///     .with_member(Member::scalar("b", ScalarType::U32, 2).with_offset(0));
///
/// let diagnostics = LayoutValidator::default().validate_entity(&entity);
/// assert_eq!(diagnostics.len(), 1);
/// assert_eq!(diagnostics[0].id, DiagnosticId::MemberLayoutIssue);
/// assert_eq!(diagnostics[0].member.as_deref(), Some("b"));
/// assert_eq!(diagnostics[0].related_sequence, Some(1));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutValidator {
    config: ValidationConfig,
}

impl LayoutValidator {
    /// Creates a validator with the given configuration.
    #[must_use]
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// The configuration this validator runs with.
    #[must_use]
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validates one entity and returns its diagnostics in emission order.
    #[must_use]
    pub fn validate_entity(&self, entity: &Entity) -> Vec<Diagnostic> {
        self.validate(entity).diagnostics
    }

    /// Validates one entity and returns the diagnostics together with its resolved layout.
    ///
    /// Linear entities carry their resolved layout whenever the layout method and members
    /// allowed offsets to be computed. Explicit entities carry their declared layout only when
    /// no error was reported.
    #[must_use]
    #[tracing::instrument(name = "validate", skip_all, fields(entity = %entity.qualified_name()))]
    pub fn validate(&self, entity: &Entity) -> ValidationReport {
        let entity_findings = EntityValidator::check(entity, &self.config);
        let mut diagnostics = entity_findings.diagnostics;
        let mut layout = None;

        if entity.has_layout {
            let mut ready = Vec::new();
            let mut unreported = false;
            for view in entity.members_by_sequence() {
                let findings = MemberValidator::check(&view, &self.config);
                if findings.layout_ready {
                    ready.push(view);
                } else if findings.diagnostics.is_empty() {
                    unreported = true;
                }
                diagnostics.extend(findings.diagnostics);
            }

            if entity_findings.map_ready {
                let (resolved, map_diagnostics) = self.map_members(entity, &ready);
                diagnostics.extend(map_diagnostics);
                if !unreported {
                    layout = Some(resolved);
                }
            }
        }

        if entity.layout_method == LayoutMethod::Explicit
            && diagnostics.iter().any(Diagnostic::is_error)
        {
            layout = None;
        }

        tracing::debug!(
            diagnostics = diagnostics.len(),
            block_length = layout.as_ref().map(|layout| layout.block_length),
            "entity validated"
        );

        ValidationReport {
            entity: entity.qualified_name(),
            diagnostics,
            layout,
        }
    }

    /// Validates `entities` in parallel and runs the cross-entity id check.
    ///
    /// Reports are returned in input order. A duplicate id is reported on every entity after the
    /// first one carrying it.
    #[must_use]
    pub fn validate_all(&self, entities: &[Entity]) -> Vec<ValidationReport> {
        let mut reports: Vec<ValidationReport> =
            entities.par_iter().map(|entity| self.validate(entity)).collect();

        for (index, diagnostic) in duplicate_entity_ids(entities) {
            reports[index].diagnostics.push(diagnostic);
            if entities[index].layout_method == LayoutMethod::Explicit {
                reports[index].layout = None;
            }
        }

        reports
    }

    /// Validates `entities` in parallel, appending every finding to `sink`.
    ///
    /// The order of findings across entities is unspecified; the findings of one entity keep
    /// their emission order.
    pub fn validate_all_into(&self, entities: &[Entity], sink: &Diagnostics) {
        entities
            .par_iter()
            .for_each(|entity| sink.extend(self.validate_entity(entity)));

        sink.extend(
            duplicate_entity_ids(entities)
                .into_iter()
                .map(|(_, diagnostic)| diagnostic),
        );
    }

    fn map_members(&self, entity: &Entity, ready: &[MemberView<'_>]) -> (ResolvedLayout, Vec<Diagnostic>) {
        let layout = match entity.layout_method {
            LayoutMethod::Linear => {
                let mut layout = LinearLayout::resolve(ready.iter().map(|view| view.member));
                layout.block_length = layout.block_length.min(self.max_block_length());
                layout
            }
            _ => declared_layout(entity, ready),
        };

        if !self.config.enable_memory_map {
            return (layout, Vec::new());
        }

        let entries = layout.offsets.iter().filter_map(|slot| {
            ready
                .iter()
                .find(|view| view.sequence == slot.sequence && view.name == slot.name)
                .map(|view| slot.map_entry(&view.member.location))
        });
        let map = MemoryMapBuilder::new(layout.block_length).build(entries);

        (layout, map.diagnostics())
    }

    #[allow(clippy::cast_sign_loss)] // clamped to 1..=1024
    fn max_block_length(&self) -> usize {
        self.config.effective_max_block_length() as usize
    }
}

/// Declared offsets of the members that may take part in the map, in sequence order.
///
/// The map itself decides whether a declared range is usable, so offsets are kept exactly as
/// declared here.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)] // readiness implies offset >= 0
fn declared_layout(entity: &Entity, ready: &[MemberView<'_>]) -> ResolvedLayout {
    let offsets = ready
        .iter()
        .filter(|view| view.total_length() > 0)
        .filter_map(|view| {
            view.declared_offset.map(|offset| ResolvedOffset {
                name: view.name.clone(),
                sequence: view.sequence,
                offset: offset as usize,
                length: view.total_length() as usize,
            })
        })
        .collect();

    ResolvedLayout {
        block_length: entity.block_length.max(0) as usize,
        offsets,
    }
}

/// Finds entities reusing an id already carried by an earlier entity.
///
/// Returns the index of each offending entity with its `DuplicateEntityId` diagnostic. Entities
/// without an id are ignored.
#[must_use]
pub fn duplicate_entity_ids(entities: &[Entity]) -> Vec<(usize, Diagnostic)> {
    let mut first_use: HashMap<&str, usize> = HashMap::new();
    let mut duplicates = Vec::new();

    for (index, entity) in entities.iter().enumerate() {
        let Some(id) = entity.entity_id.as_deref() else {
            continue;
        };

        match first_use.get(id) {
            Some(&first) => duplicates.push((
                index,
                diagnostic!(
                    DiagnosticId::DuplicateEntityId,
                    entity.location.clone(),
                    "Entity id '{}' is already used by entity '{}'.",
                    id,
                    entities[first].qualified_name()
                ),
            )),
            None => {
                first_use.insert(id, index);
            }
        }
    }

    duplicates
}

//! # Byte-Occupancy Map for Entity Blocks
//!
//! This module builds a per-byte ownership map of an entity's backing block and detects the
//! four ways a member can fail to occupy its bytes cleanly:
//!
//! - **Underflow**: the member starts before byte 0
//! - **Overflow**: the member ends after the last byte of the block
//! - **Misalignment**: the offset is not a multiple of the member's total length
//! - **Overlap**: a byte in the member's range is already owned by another member
//!
//! ## Ownership and Tie-Breaking
//!
//! Members are stamped strictly in ascending sequence order, so when two members contend for
//! the same byte the earlier-declared member always owns it and the overlap is attributed to
//! the later one, naming the owner's sequence. Scanning of a member stops at its first
//! contested byte; bytes it stamped before that point stay stamped.
//!
//! A member that fails the underflow, overflow or alignment rule is skipped entirely and
//! does not stamp any byte. Members with a non-positive total length take no part.
//!
//! ## Complexity
//!
//! One linear pass: `O(block_length + sum of member lengths)`, with the member lengths bounded
//! by the block length for every member that reaches the scan. The block length itself never
//! exceeds [`MAX_LENGTH`]; a longer block is mapped as `MAX_LENGTH` bytes and members past it
//! are reported as overflowing.
//!
//! ## Thread Safety
//!
//! [`MemoryMapBuilder`] is a stateless value; each build allocates its own map.

use std::fmt;

use crate::{
    diagnostics::{Diagnostic, DiagnosticId},
    model::{Entity, LayoutMethod, Location},
    validation::{config::MAX_LENGTH, linear::LinearLayout},
};

/// One member's claim on the block, in the form the map builder consumes.
#[derive(Debug, Clone)]
pub struct MapEntry<'a> {
    /// Member name
    pub name: &'a str,
    /// Member sequence; the tie-break for contested bytes
    pub sequence: i32,
    /// Resolved or declared offset
    pub offset: i64,
    /// Total length in bytes
    pub length: i64,
    /// Source location used in findings
    pub location: &'a Location,
}

/// What went wrong with a member's byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutIssue {
    /// The member starts before the start of the block
    Underflow,
    /// The member ends beyond the end of the block
    Overflow,
    /// `offset mod length != 0`
    Misaligned {
        /// Declared offset
        offset: i64,
        /// Total length of the member
        length: i64,
    },
    /// A byte of the range is owned by the member with sequence `owner`
    Overlap {
        /// Sequence of the member owning the contested byte
        owner: i32,
    },
}

impl fmt::Display for LayoutIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutIssue::Underflow => write!(f, "This member extends before the start of the block."),
            LayoutIssue::Overflow => write!(f, "This member extends beyond the end of the block."),
            LayoutIssue::Misaligned { offset, length } => write!(
                f,
                "This member is incorrectly aligned. FieldOffset ({offset}) modulo total length ({length}) must be 0."
            ),
            LayoutIssue::Overlap { owner } => write!(
                f,
                "This member overlaps memory assigned to another member (sequence {owner})."
            ),
        }
    }
}

/// A layout issue attributed to one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapFinding {
    /// Name of the offending member
    pub member: String,
    /// Sequence of the offending member
    pub sequence: i32,
    /// Location of the offending member
    pub location: Location,
    /// The issue found
    pub issue: LayoutIssue,
}

impl MapFinding {
    /// Converts the finding into a `MemberLayoutIssue` diagnostic.
    #[must_use]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = diagnostic!(
            DiagnosticId::MemberLayoutIssue,
            self.location.clone(),
            "{}",
            self.issue
        )
        .with_member(self.member.clone());

        match self.issue {
            LayoutIssue::Overlap { owner } => diagnostic.with_related_sequence(owner),
            _ => diagnostic,
        }
    }
}

/// The result of a memory map build: byte owners and the findings in sequence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryMap {
    owners: Vec<Option<i32>>,
    findings: Vec<MapFinding>,
}

impl MemoryMap {
    /// Size of the mapped block in bytes.
    #[must_use]
    pub fn block_length(&self) -> usize {
        self.owners.len()
    }

    /// Sequence of the member owning `byte`, `None` if unassigned or out of range.
    #[must_use]
    pub fn owner_of(&self, byte: usize) -> Option<i32> {
        self.owners.get(byte).copied().flatten()
    }

    /// Number of bytes owned by some member.
    #[must_use]
    pub fn occupied_bytes(&self) -> usize {
        self.owners.iter().filter(|owner| owner.is_some()).count()
    }

    /// Findings in the order the members were processed.
    #[must_use]
    pub fn findings(&self) -> &[MapFinding] {
        &self.findings
    }

    /// True if no member had an issue.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Converts all findings into diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.findings.iter().map(MapFinding::to_diagnostic).collect()
    }
}

/// Builds the byte-occupancy map of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryMapBuilder {
    block_length: usize,
}

impl MemoryMapBuilder {
    /// Creates a builder for a block of `block_length` bytes, capped at [`MAX_LENGTH`].
    #[must_use]
    #[allow(clippy::cast_sign_loss)] // MAX_LENGTH is positive
    pub fn new(block_length: usize) -> Self {
        Self {
            block_length: block_length.min(MAX_LENGTH as usize),
        }
    }

    /// Stamps every entry into a fresh map, in ascending sequence order.
    ///
    /// Entries with equal sequence keep their input order.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // range checked above the casts
    pub fn build<'a>(&self, entries: impl IntoIterator<Item = MapEntry<'a>>) -> MemoryMap {
        let mut entries: Vec<MapEntry<'a>> = entries.into_iter().collect();
        entries.sort_by_key(|entry| entry.sequence);

        let block_length = self.block_length as i64;
        let mut owners: Vec<Option<i32>> = vec![None; self.block_length];
        let mut findings = Vec::new();

        for entry in entries {
            if entry.length <= 0 {
                continue;
            }

            let issue = if entry.offset < 0 {
                Some(LayoutIssue::Underflow)
            } else if entry.offset + entry.length > block_length {
                Some(LayoutIssue::Overflow)
            } else if entry.offset % entry.length != 0 {
                Some(LayoutIssue::Misaligned {
                    offset: entry.offset,
                    length: entry.length,
                })
            } else {
                let start = entry.offset as usize;
                let end = start + entry.length as usize;
                let mut conflict = None;

                for owner in &mut owners[start..end] {
                    if let Some(existing) = *owner {
                        conflict = Some(LayoutIssue::Overlap { owner: existing });
                        break;
                    }
                    *owner = Some(entry.sequence);
                }

                conflict
            };

            if let Some(issue) = issue {
                tracing::trace!(
                    member = entry.name,
                    sequence = entry.sequence,
                    issue = ?issue,
                    "memory map finding"
                );

                findings.push(MapFinding {
                    member: entry.name.to_string(),
                    sequence: entry.sequence,
                    location: entry.location.clone(),
                    issue,
                });
            }
        }

        MemoryMap { owners, findings }
    }

    /// Maps an entity directly from its declaration, without the member rule checks.
    ///
    /// Explicit entities use their declared offsets; members without a declared offset are
    /// left out. Linear entities are resolved first and mapped over the resolved block. An
    /// undefined layout, or an explicit block length outside `1..=MAX_LENGTH`, yields an empty
    /// map with no findings.
    #[must_use]
    #[allow(clippy::cast_sign_loss)] // block_length > 0 verified above
    pub fn from_entity(entity: &Entity) -> MemoryMap {
        match entity.layout_method {
            LayoutMethod::Explicit if (1..=MAX_LENGTH).contains(&entity.block_length) => {
                Self::new(entity.block_length as usize).build(entity.members.iter().filter_map(
                    |member| {
                        member.declared_offset.map(|offset| MapEntry {
                            name: &member.name,
                            sequence: member.sequence,
                            offset: i64::from(offset),
                            length: member.total_length(),
                            location: &member.location,
                        })
                    },
                ))
            }
            LayoutMethod::Linear => {
                let layout = LinearLayout::resolve(entity.members.iter());
                Self::new(layout.block_length).build(layout.offsets.iter().filter_map(|slot| {
                    entity
                        .members
                        .iter()
                        .find(|member| member.sequence == slot.sequence && member.name == slot.name)
                        .map(|member| slot.map_entry(&member.location))
                }))
            }
            _ => Self::new(0).build(std::iter::empty()),
        }
    }
}

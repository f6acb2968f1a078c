//! Validation results: diagnostics plus the resolved layout of an entity.

use crate::{
    diagnostics::{Diagnostic, DiagnosticId},
    model::Location,
    validation::memorymap::MapEntry,
};

/// The byte range assigned to one member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedOffset {
    /// Member name
    pub name: String,
    /// Member sequence
    pub sequence: i32,
    /// Offset of the first byte within the block
    pub offset: usize,
    /// Total length in bytes
    pub length: usize,
}

impl ResolvedOffset {
    /// One past the last byte of the range.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// True if the two byte ranges share at least one byte.
    #[must_use]
    pub fn overlaps(&self, other: &ResolvedOffset) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }

    /// The range in the form the memory map builder consumes.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)] // layouts are bounded far below i64::MAX
    pub fn map_entry<'a>(&'a self, location: &'a Location) -> MapEntry<'a> {
        MapEntry {
            name: &self.name,
            sequence: self.sequence,
            offset: self.offset as i64,
            length: self.length as i64,
            location,
        }
    }
}

/// Block length and member offsets of an entity.
///
/// Offsets are listed in ascending member sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedLayout {
    /// Size of the backing block in bytes
    pub block_length: usize,
    /// Byte range of every member that took part in the layout
    pub offsets: Vec<ResolvedOffset>,
}

impl ResolvedLayout {
    /// Byte range of the member called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResolvedOffset> {
        self.offsets.iter().find(|slot| slot.name == name)
    }

    /// Offset of the member called `name`.
    #[must_use]
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.get(name).map(|slot| slot.offset)
    }
}

/// Everything validation produced for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Qualified name of the validated entity
    pub entity: String,
    /// Findings in emission order
    pub diagnostics: Vec<Diagnostic>,
    /// The layout the memory map was built from, if the map pass ran over every member
    pub layout: Option<ResolvedLayout>,
}

impl ValidationReport {
    /// True if no error-severity diagnostic was reported, so accessors may be generated.
    #[must_use]
    pub fn is_generatable(&self) -> bool {
        !self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Diagnostics with the given id.
    pub fn by_id(&self, id: DiagnosticId) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(name: &str, offset: usize, length: usize) -> ResolvedOffset {
        ResolvedOffset {
            name: name.to_string(),
            sequence: 1,
            offset,
            length,
        }
    }

    #[test]
    fn test_overlaps() {
        assert!(slot("a", 0, 4).overlaps(&slot("b", 2, 2)));
        assert!(slot("a", 4, 4).overlaps(&slot("b", 0, 8)));
        assert!(!slot("a", 0, 4).overlaps(&slot("b", 4, 4)));
        assert!(!slot("a", 8, 8).overlaps(&slot("b", 0, 8)));
    }

    #[test]
    fn test_layout_lookup() {
        let layout = ResolvedLayout {
            block_length: 8,
            offsets: vec![slot("a", 0, 4), slot("b", 4, 2)],
        };
        assert_eq!(layout.offset_of("b"), Some(4));
        assert_eq!(layout.get("a").map(ResolvedOffset::end), Some(4));
        assert_eq!(layout.offset_of("c"), None);
    }
}

//! Diagnostics produced by layout validation.
//!
//! Validation never fails with an error. Every rule violation found in an entity or member
//! declaration becomes a [`Diagnostic`]: a structured, compiler-style finding carrying a stable
//! code, a severity, a source location and a human-readable message. The consuming build step
//! surfaces them to the schema author and refuses to generate accessors for any entity with an
//! [`DiagnosticSeverity::Error`] finding.
//!
//! # Key Components
//!
//! - [`Diagnostic`] - Individual finding with id, severity, category, location and message
//! - [`DiagnosticId`] - The fixed taxonomy of findings with their stable codes
//! - [`DiagnosticSeverity`] - Severity level (Info, Warning, Error)
//! - [`DiagnosticCategory`] - Category of the diagnostic source
//! - [`Diagnostics`] - Thread-safe container for aggregating findings across entities
//!
//! # Usage Examples
//!
//! ```rust
//! use memlayout::diagnostics::{Diagnostic, DiagnosticId, Diagnostics};
//! use memlayout::model::Location;
//!
//! let diagnostics = Diagnostics::new();
//! diagnostics.push(Diagnostic::from_id(
//!     DiagnosticId::InvalidBlockLength,
//!     Location::new("quote.rs", 4, 1),
//!     "BlockLength (3) is invalid.",
//! ));
//!
//! assert!(diagnostics.has_errors());
//! for entry in diagnostics.iter() {
//!     println!("{entry}");
//! }
//! ```
//!
//! # Thread Safety
//!
//! All types in this module are [`Send`] and [`Sync`]. The [`Diagnostics`] container uses
//! `boxcar::Vec` internally, so entities validated on different threads can append findings
//! to one shared container without coordination.

use std::fmt::{self, Write};

use strum::{EnumCount, EnumIter};

use crate::model::Location;

/// Severity level of a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticSeverity {
    /// Informational message, not indicating a problem.
    Info,

    /// Something suspicious that does not block accessor generation.
    Warning,

    /// An invalid layout. Accessors are not generated for the entity.
    Error,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Info => write!(f, "info"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Error => write!(f, "error"),
        }
    }
}

/// Category indicating the source or type of diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    /// A schema design rule was violated.
    Design,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Design => write!(f, "Design"),
        }
    }
}

/// The taxonomy of layout findings.
///
/// Codes are stable and may be matched on by tooling that consumes rendered diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum DiagnosticId {
    /// Explicit block length is not a power of two in range.
    InvalidBlockLength,
    /// Declared member offset is negative.
    InvalidFieldOffset,
    /// Field length is not a power of two in range, or does not match the type.
    InvalidFieldLength,
    /// The declared layout method is not recognized.
    InvalidLayoutMethod,
    /// The entity carries no layout declaration.
    MissingLayoutAttribute,
    /// An explicit-layout member has no declared offset.
    MissingOffsetAttribute,
    /// Member type is outside the supported set, or nullable.
    UnsupportedMemberType,
    /// Underflow, overflow, misalignment or overlap in the memory map.
    MemberLayoutIssue,
    /// String length, array capacity or total array length is invalid.
    InvalidArrayCapacity,
    /// Two entities share the same entity id.
    DuplicateEntityId,
}

impl DiagnosticId {
    /// Stable diagnostic code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            DiagnosticId::InvalidBlockLength => "DMMB0001",
            DiagnosticId::InvalidFieldOffset => "DMMB0002",
            DiagnosticId::InvalidFieldLength => "DMMB0003",
            DiagnosticId::InvalidLayoutMethod => "DMMB0004",
            DiagnosticId::MissingLayoutAttribute => "DMMB0005",
            DiagnosticId::MissingOffsetAttribute => "DMMB0006",
            DiagnosticId::UnsupportedMemberType => "DMMB0007",
            DiagnosticId::MemberLayoutIssue => "DMMB0008",
            DiagnosticId::InvalidArrayCapacity => "DMMB0009",
            DiagnosticId::DuplicateEntityId => "DMMB0011",
        }
    }

    /// Short title shown next to the code.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            DiagnosticId::InvalidBlockLength => "Invalid block length",
            DiagnosticId::InvalidFieldOffset => "Invalid field offset",
            DiagnosticId::InvalidFieldLength => "Invalid field length",
            DiagnosticId::InvalidLayoutMethod => "Invalid layout method",
            DiagnosticId::MissingLayoutAttribute => "Missing layout declaration",
            DiagnosticId::MissingOffsetAttribute => "Missing offset declaration",
            DiagnosticId::UnsupportedMemberType => "Unsupported member type",
            DiagnosticId::MemberLayoutIssue => "Member layout issue",
            DiagnosticId::InvalidArrayCapacity => "Invalid array capacity",
            DiagnosticId::DuplicateEntityId => "Duplicate entity id",
        }
    }

    /// Severity every finding of this kind is reported with.
    #[must_use]
    pub const fn severity(self) -> DiagnosticSeverity {
        DiagnosticSeverity::Error
    }

    /// Category every finding of this kind is reported with.
    #[must_use]
    pub const fn category(self) -> DiagnosticCategory {
        DiagnosticCategory::Design
    }
}

impl fmt::Display for DiagnosticId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single diagnostic entry with context information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Which rule produced the finding.
    pub id: DiagnosticId,

    /// Severity level of this diagnostic.
    pub severity: DiagnosticSeverity,

    /// Category indicating the source of this diagnostic.
    pub category: DiagnosticCategory,

    /// Source location of the offending declaration.
    pub location: Location,

    /// Human-readable description of the issue.
    pub message: String,

    /// Name of the member the finding is attributed to, if any.
    pub member: Option<String>,

    /// Sequence number of another member involved, e.g. the owner of overlapped bytes.
    pub related_sequence: Option<i32>,
}

impl Diagnostic {
    /// Creates a new diagnostic entry with the severity and category of `id`.
    ///
    /// # Arguments
    ///
    /// * `id` - Rule that produced the finding
    /// * `location` - Source location of the declaration
    /// * `message` - Human-readable description
    pub fn from_id(id: DiagnosticId, location: Location, message: impl Into<String>) -> Self {
        Self {
            id,
            severity: id.severity(),
            category: id.category(),
            location,
            message: message.into(),
            member: None,
            related_sequence: None,
        }
    }

    /// Attributes the diagnostic to a member.
    #[must_use]
    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.member = Some(member.into());
        self
    }

    /// Adds the sequence number of a related member.
    #[must_use]
    pub fn with_related_sequence(mut self, sequence: i32) -> Self {
        self.related_sequence = Some(sequence);
        self
    }

    /// Stable diagnostic code, e.g. `DMMB0008`.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.id.code()
    }

    /// Short title of the rule.
    #[must_use]
    pub fn title(&self) -> &'static str {
        self.id.title()
    }

    /// True for error severity.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}: {}",
            self.location, self.severity, self.id, self.message
        )
    }
}

/// Thread-safe container for collecting diagnostic entries.
///
/// Uses `boxcar::Vec` internally for lock-free concurrent append operations.
/// Entries keep the order in which they were pushed.
#[derive(Debug)]
pub struct Diagnostics {
    entries: boxcar::Vec<Diagnostic>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics {
    /// Creates a new empty diagnostics container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: boxcar::Vec::new(),
        }
    }

    /// Adds a diagnostic entry.
    pub fn push(&self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Adds every entry of `diagnostics`, preserving their order.
    pub fn extend(&self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.entries.push(diagnostic);
        }
    }

    /// Returns true if any diagnostics have been collected.
    pub fn has_any(&self) -> bool {
        self.entries.count() > 0
    }

    /// Returns true if any error-level diagnostics have been collected.
    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, d)| d.severity == DiagnosticSeverity::Error)
    }

    /// Returns the total number of diagnostics.
    pub fn count(&self) -> usize {
        self.entries.count()
    }

    /// Returns the number of diagnostics with the given severity.
    pub fn count_severity(&self, severity: DiagnosticSeverity) -> usize {
        self.entries
            .iter()
            .filter(|(_, d)| d.severity == severity)
            .count()
    }

    /// Returns the number of error-level diagnostics.
    pub fn error_count(&self) -> usize {
        self.count_severity(DiagnosticSeverity::Error)
    }

    /// Returns an iterator over all diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().map(|(_, d)| d)
    }

    /// Returns diagnostics with the given id.
    pub fn by_id(&self, id: DiagnosticId) -> Vec<&Diagnostic> {
        self.iter().filter(|d| d.id == id).collect()
    }

    /// Copies all entries into a plain vector.
    pub fn to_vec(&self) -> Vec<Diagnostic> {
        self.iter().cloned().collect()
    }

    /// Formats a summary of all diagnostics for display.
    pub fn summary(&self) -> String {
        let mut output = String::new();

        let _ = writeln!(
            output,
            "Diagnostics: {} error(s), {} warning(s), {} info(s)",
            self.error_count(),
            self.count_severity(DiagnosticSeverity::Warning),
            self.count_severity(DiagnosticSeverity::Info)
        );

        for diag in self.iter() {
            let _ = writeln!(output, "  {diag}");
        }

        output
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

use std::fmt;

/// Opaque source location of a declaration, as supplied by the discovery collaborator.
///
/// Only carried through to diagnostics; the validators never interpret it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Location {
    /// Source file the declaration came from
    pub file: Option<String>,
    /// 1-based line number
    pub line: Option<u32>,
    /// 1-based column number
    pub column: Option<u32>,
}

impl Location {
    /// Creates a location pointing at `file:line:column`.
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: Some(file.into()),
            line: Some(line),
            column: Some(column),
        }
    }

    /// A location for declarations without source information.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line, self.column) {
            (Some(file), Some(line), Some(column)) => write!(f, "{file}:{line}:{column}"),
            (Some(file), Some(line), None) => write!(f, "{file}:{line}"),
            (Some(file), None, _) => write!(f, "{file}"),
            (None, Some(line), _) => write!(f, "<unknown>:{line}"),
            (None, None, _) => write!(f, "<unknown>"),
        }
    }
}

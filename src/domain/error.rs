//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors describe malformed tree files and unsavable trees.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("line {line}: unexpected end of tree file, expected {expected}")]
    UnexpectedEof { line: usize, expected: &'static str },

    #[error("line {line}: blank line where a node tag was expected")]
    MissingTag { line: usize },

    #[error("line {line}: unknown node tag '{tag}' (expected 'Leaf' or 'Internal node')")]
    UnknownTag { line: usize, tag: String },

    #[error("line {line}: unexpected content after a complete tree")]
    TrailingContent { line: usize },

    #[error("line {line}: tree nested deeper than {max_depth} levels")]
    TooDeep { line: usize, max_depth: usize },

    #[error("label spans multiple lines: {label:?}")]
    MultilineLabel { label: String },

    #[error("label has leading or trailing whitespace: {label:?}")]
    PaddedLabel { label: String },

    #[error("line {line}: failed to read tree file")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

impl DomainError {
    /// True for errors caused by the file content rather than by reading it.
    pub fn is_format_error(&self) -> bool {
        !matches!(self, DomainError::Read { .. })
    }
}

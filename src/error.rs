use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::layout::CorpusRole;

/// Failures of a single compare run.
#[derive(Debug)]
pub enum CompareError {
    /// A positional operand was missing or empty.
    Usage { missing: &'static str },
    /// A corpus file is missing or unreadable.
    FileAccess {
        role: CorpusRole,
        path: PathBuf,
        source: io::Error,
    },
    /// A secondary corpus ran out of lines before the original did.
    IndexOutOfRange {
        role: CorpusRole,
        path: PathBuf,
        index: usize,
        len: usize,
    },
    /// Line counts differ (only raised by the strict check).
    LineCountMismatch {
        role: CorpusRole,
        path: PathBuf,
        expected: usize,
        found: usize,
    },
    /// Writing the report failed.
    Output(io::Error),
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareError::Usage { missing } => write!(f, "missing argument: <{missing}>"),
            CompareError::FileAccess { role, path, .. } => {
                write!(f, "cannot read {} corpus {}", role.label(), path.display())
            }
            CompareError::IndexOutOfRange {
                role,
                path,
                index,
                len,
            } => write!(
                f,
                "line {} out of range for {} corpus {} ({} lines)",
                index + 1,
                role.label(),
                path.display(),
                len
            ),
            CompareError::LineCountMismatch {
                role,
                path,
                expected,
                found,
            } => write!(
                f,
                "invalid line count for {} ({}): expected {}, found {}",
                role.label(),
                path.display(),
                expected,
                found
            ),
            CompareError::Output(e) => write!(f, "write report: {e}"),
        }
    }
}

impl std::error::Error for CompareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompareError::FileAccess { source, .. } => Some(source),
            CompareError::Output(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CompareError {
    fn from(e: io::Error) -> Self {
        CompareError::Output(e)
    }
}

pub type CompareResult<T> = Result<T, CompareError>;

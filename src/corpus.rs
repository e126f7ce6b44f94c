use std::path::{Path, PathBuf};

use crate::error::{CompareError, CompareResult};
use crate::layout::CorpusRole;
use crate::textutil::split_lines_keep_ends;

/// One corpus file, read eagerly. Lines keep their terminators.
#[derive(Clone, Debug)]
pub struct CorpusFile {
    role: CorpusRole,
    path: PathBuf,
    lines: Vec<String>,
}

impl CorpusFile {
    pub fn read(role: CorpusRole, path: &Path) -> CompareResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CompareError::FileAccess {
            role,
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(role, path, &text))
    }

    pub fn from_text(role: CorpusRole, path: &Path, text: &str) -> Self {
        Self {
            role,
            path: path.to_path_buf(),
            lines: split_lines_keep_ends(text),
        }
    }

    pub fn role(&self) -> CorpusRole {
        self.role
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> CompareResult<&str> {
        self.lines
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| CompareError::IndexOutOfRange {
                role: self.role,
                path: self.path.clone(),
                index,
                len: self.lines.len(),
            })
    }
}

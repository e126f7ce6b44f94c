use serde::Serialize;

use crate::corpus::CorpusFile;
use crate::error::{CompareError, CompareResult};
use crate::layout::{CorpusPaths, CorpusRole};
use crate::textutil::trim_line_end;

/// The four lines sharing one index, terminators removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AlignedRecord<'a> {
    pub index: usize,
    pub original: &'a str,
    pub human: &'a str,
    pub mmt: &'a str,
    pub gt: &'a str,
}

impl<'a> AlignedRecord<'a> {
    pub fn fields(&self) -> [(CorpusRole, &'a str); 4] {
        [
            (CorpusRole::Original, self.original),
            (CorpusRole::Human, self.human),
            (CorpusRole::Mmt, self.mmt),
            (CorpusRole::Gt, self.gt),
        ]
    }
}

/// The four corpora of one run. The original drives the record count.
#[derive(Clone, Debug)]
pub struct CorpusSet {
    original: CorpusFile,
    reference: CorpusFile,
    mmt: CorpusFile,
    gt: CorpusFile,
}

impl CorpusSet {
    /// Reads all four files before returning; the first unreadable one aborts.
    pub fn load(paths: &CorpusPaths) -> CompareResult<Self> {
        Ok(Self {
            original: CorpusFile::read(CorpusRole::Original, &paths.original)?,
            reference: CorpusFile::read(CorpusRole::Human, &paths.reference)?,
            mmt: CorpusFile::read(CorpusRole::Mmt, &paths.mmt)?,
            gt: CorpusFile::read(CorpusRole::Gt, &paths.gt)?,
        })
    }

    pub fn from_corpora(
        original: CorpusFile,
        reference: CorpusFile,
        mmt: CorpusFile,
        gt: CorpusFile,
    ) -> Self {
        Self {
            original,
            reference,
            mmt,
            gt,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.original.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    pub fn corpus(&self, role: CorpusRole) -> &CorpusFile {
        match role {
            CorpusRole::Original => &self.original,
            CorpusRole::Human => &self.reference,
            CorpusRole::Mmt => &self.mmt,
            CorpusRole::Gt => &self.gt,
        }
    }

    pub fn secondaries(&self) -> [&CorpusFile; 3] {
        [&self.reference, &self.mmt, &self.gt]
    }

    pub fn record(&self, index: usize) -> CompareResult<AlignedRecord<'_>> {
        Ok(AlignedRecord {
            index,
            original: trim_line_end(self.original.line(index)?),
            human: trim_line_end(self.reference.line(index)?),
            mmt: trim_line_end(self.mmt.line(index)?),
            gt: trim_line_end(self.gt.line(index)?),
        })
    }

    pub fn records(&self) -> impl Iterator<Item = CompareResult<AlignedRecord<'_>>> + '_ {
        (0..self.len()).map(move |index| self.record(index))
    }

    /// Secondary corpora whose line count differs from the original.
    pub fn mismatches(&self) -> Vec<&CorpusFile> {
        let expected = self.len();
        self.secondaries()
            .into_iter()
            .filter(|c| c.len() != expected)
            .collect()
    }

    pub fn check_line_counts(&self) -> CompareResult<()> {
        match self.mismatches().first() {
            Some(corpus) => Err(CompareError::LineCountMismatch {
                role: corpus.role(),
                path: corpus.path().to_path_buf(),
                expected: self.len(),
                found: corpus.len(),
            }),
            None => Ok(()),
        }
    }
}

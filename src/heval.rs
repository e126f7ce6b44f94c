use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::align::CorpusSet;
use crate::corpus::CorpusFile;
use crate::layout::{CorpusRole, GOOGLE_TRANSLATE_DIR, MMT_DIR};
use crate::textutil::{replace_separator, trim_line_end};

/// Writes corpora as `id<sep>lang<sep>text` lines for a manual rating tool.
pub struct HumanEvaluationWriter {
    separator: char,
}

impl Default for HumanEvaluationWriter {
    fn default() -> Self {
        Self { separator: '\t' }
    }
}

impl HumanEvaluationWriter {
    pub fn write_corpus(
        &self,
        corpus: &CorpusFile,
        lang: &str,
        output: &Path,
    ) -> anyhow::Result<()> {
        let file = std::fs::File::create(output)
            .with_context(|| format!("create heval file: {}", output.display()))?;
        let mut out = BufWriter::new(file);
        for (line_id, line) in corpus.lines().iter().enumerate() {
            let text = replace_separator(trim_line_end(line), self.separator);
            writeln!(out, "{line_id}{sep}{lang}{sep}{text}", sep = self.separator)
                .with_context(|| format!("write heval file: {}", output.display()))?;
        }
        out.flush()
            .with_context(|| format!("write heval file: {}", output.display()))?;
        Ok(())
    }

    /// Exports all four corpora into `dir`, returning the written paths in role order.
    pub fn export(
        &self,
        corpora: &CorpusSet,
        source_lang: &str,
        target_lang: &str,
        dir: &Path,
    ) -> anyhow::Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create heval dir: {}", dir.display()))?;

        let mut written = Vec::with_capacity(CorpusRole::ALL.len());
        for role in CorpusRole::ALL {
            let (name, lang) = export_name(role, source_lang, target_lang);
            let path = dir.join(name);
            self.write_corpus(corpora.corpus(role), lang, &path)?;
            written.push(path);
        }
        Ok(written)
    }
}

fn export_name<'a>(
    role: CorpusRole,
    source_lang: &'a str,
    target_lang: &'a str,
) -> (String, &'a str) {
    match role {
        CorpusRole::Original => (format!("source.{source_lang}"), source_lang),
        CorpusRole::Human => (format!("reference.{target_lang}"), target_lang),
        CorpusRole::Mmt => (format!("{MMT_DIR}.{target_lang}"), target_lang),
        CorpusRole::Gt => (format!("{GOOGLE_TRANSLATE_DIR}.{target_lang}"), target_lang),
    }
}

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Translator output directories, named after the evaluator's translator ids.
pub const MMT_DIR: &str = "MMT";
pub const GOOGLE_TRANSLATE_DIR: &str = "Google_Translate";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CorpusRole {
    Original,
    Human,
    Mmt,
    Gt,
}

impl CorpusRole {
    pub const ALL: [CorpusRole; 4] = [
        CorpusRole::Original,
        CorpusRole::Human,
        CorpusRole::Mmt,
        CorpusRole::Gt,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CorpusRole::Original => "ORIGINAL",
            CorpusRole::Human => "HUMAN",
            CorpusRole::Mmt => "MMT",
            CorpusRole::Gt => "GT",
        }
    }
}

/// Naming convention of the evaluation working directory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CorpusLayout {
    /// Merged `source.<src>` and `reference.<tgt>` next to the translations.
    #[default]
    SourceReference,
    /// Per-domain `references/<domain>.<lang>` files.
    References,
}

impl CorpusLayout {
    pub fn name(self) -> &'static str {
        match self {
            CorpusLayout::SourceReference => "source-reference",
            CorpusLayout::References => "references",
        }
    }

    pub fn resolve(
        self,
        base_dir: &Path,
        domain: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> CorpusPaths {
        let evaluate = base_dir.join("tmp").join("evaluate");
        let translations = evaluate.join("translations");

        let (original, reference) = match self {
            CorpusLayout::SourceReference => (
                evaluate.join(format!("source.{source_lang}")),
                evaluate.join(format!("reference.{target_lang}")),
            ),
            CorpusLayout::References => {
                let refs = evaluate.join("references");
                (
                    refs.join(format!("{domain}.{source_lang}")),
                    refs.join(format!("{domain}.{target_lang}")),
                )
            }
        };

        let output_name = format!("{domain}.{target_lang}");
        CorpusPaths {
            original,
            reference,
            mmt: translations.join(MMT_DIR).join(&output_name),
            gt: translations.join(GOOGLE_TRANSLATE_DIR).join(&output_name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorpusPaths {
    pub original: PathBuf,
    pub reference: PathBuf,
    pub mmt: PathBuf,
    pub gt: PathBuf,
}

impl CorpusPaths {
    pub fn get(&self, role: CorpusRole) -> &Path {
        match role {
            CorpusRole::Original => &self.original,
            CorpusRole::Human => &self.reference,
            CorpusRole::Mmt => &self.mmt,
            CorpusRole::Gt => &self.gt,
        }
    }
}

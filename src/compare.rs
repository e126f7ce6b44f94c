use std::io::Write;

use anyhow::Context;

use crate::align::CorpusSet;
use crate::config::CompareConfig;
use crate::console::ConsoleLog;
use crate::error::{CompareError, CompareResult};
use crate::heval::HumanEvaluationWriter;
use crate::layout::CorpusRole;
use crate::report::ReportWriter;

const PROGRESS_EVERY: usize = 10_000;

/// The three positional operands, validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompareRequest {
    pub domain: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl CompareRequest {
    pub fn new(
        domain: Option<String>,
        source_lang: Option<String>,
        target_lang: Option<String>,
    ) -> CompareResult<Self> {
        Ok(Self {
            domain: required(domain, "DOMAIN")?,
            source_lang: required(source_lang, "SOURCE_LANG")?,
            target_lang: required(target_lang, "TARGET_LANG")?,
        })
    }
}

fn required(value: Option<String>, name: &'static str) -> CompareResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CompareError::Usage { missing: name }),
    }
}

/// Line count of the original corpus and how many records reached the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompareSummary {
    pub total_lines: usize,
    pub records_written: usize,
}

/// Loads the four corpora and writes one report record per line of the original.
///
/// All files are read before anything is written. A short secondary corpus fails at the
/// first missing index; records before it have already been written to `out`.
pub fn run_compare<W: Write>(
    request: &CompareRequest,
    cfg: &CompareConfig,
    out: W,
    log: &ConsoleLog,
) -> anyhow::Result<CompareSummary> {
    let paths = cfg.layout.resolve(
        &cfg.base_dir,
        &request.domain,
        &request.source_lang,
        &request.target_lang,
    );
    log.info(format!(
        "layout={} base_dir={}",
        cfg.layout.name(),
        cfg.base_dir.display()
    ));
    for role in CorpusRole::ALL {
        log.info(format!("{:<8} {}", role.label(), paths.get(role).display()));
    }

    let corpora = CorpusSet::load(&paths)?;
    let counts = CorpusRole::ALL
        .iter()
        .map(|r| format!("{}={}", r.label(), corpora.corpus(*r).len()))
        .collect::<Vec<_>>()
        .join(" ");
    log.info(format!("line counts: {counts}"));

    if cfg.check_line_counts {
        corpora.check_line_counts()?;
    } else {
        for corpus in corpora.mismatches() {
            log.warn(format!(
                "{} has {} lines, {} has {}",
                corpus.role().label(),
                corpus.len(),
                CorpusRole::Original.label(),
                corpora.len()
            ));
        }
    }

    if let Some(dir) = cfg.heval_dir.as_ref() {
        let written = HumanEvaluationWriter::default()
            .export(&corpora, &request.source_lang, &request.target_lang, dir)
            .context("human evaluation export")?;
        log.info(format!(
            "human evaluation export: {} files in {}",
            written.len(),
            dir.display()
        ));
    }

    let total = cfg
        .max_records
        .map_or(corpora.len(), |n| n.min(corpora.len()));
    let mut report = ReportWriter::new(out, cfg.format);
    for record in corpora.records().take(total) {
        let record = record?;
        report.write_record(&record)?;
        let done = record.index + 1;
        if done % PROGRESS_EVERY == 0 {
            log.progress("records", done, total);
        }
    }
    let records_written = report.finish()?;

    Ok(CompareSummary {
        total_lines: corpora.len(),
        records_written,
    })
}

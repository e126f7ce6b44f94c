use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser};

use mmt_compare::config::{init_default_config, CompareConfig, ConfigOverrides};
use mmt_compare::console::ConsoleLog;
use mmt_compare::layout::CorpusLayout;
use mmt_compare::report::ReportFormat;
use mmt_compare::{run_compare, CompareError, CompareRequest};

#[derive(Parser, Debug)]
#[command(name = "mmt-compare")]
#[command(
    about = "Print source, reference, MMT and Google Translate lines side by side",
    long_about = None
)]
struct Args {
    /// Write a default mmt-compare.toml, then exit
    #[arg(long)]
    init_config: bool,

    /// Directory for --init-config (default: current directory)
    #[arg(long, value_name = "DIR")]
    init_config_dir: Option<PathBuf>,

    /// Overwrite an existing config with --init-config
    #[arg(long)]
    force: bool,

    /// Domain (corpus) name, e.g. news
    #[arg(value_name = "DOMAIN")]
    domain: Option<String>,

    /// Source language code, e.g. en
    #[arg(value_name = "SOURCE_LANG")]
    source_lang: Option<String>,

    /// Target language code, e.g. it
    #[arg(value_name = "TARGET_LANG")]
    target_lang: Option<String>,

    /// Config file path (default: search for mmt-compare.toml upwards)
    #[arg(long, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Directory containing tmp/evaluate (default: current directory)
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// File naming convention under tmp/evaluate
    #[arg(long, value_enum)]
    layout: Option<CorpusLayout>,

    /// Report format
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,

    /// Fail before printing if the four files differ in line count
    #[arg(long, overrides_with = "no_check_line_counts")]
    check_line_counts: bool,

    /// Print up to the first short file even if the config enables the check
    #[arg(long, overrides_with = "check_line_counts")]
    no_check_line_counts: bool,

    /// Print at most N records
    #[arg(long, value_name = "N")]
    max_records: Option<usize>,

    /// Also write tab-separated human evaluation files into DIR
    #[arg(long, value_name = "DIR")]
    heval_dir: Option<PathBuf>,

    /// No status messages on stderr
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    if args.init_config {
        let dir = args
            .init_config_dir
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        let cfg_path = init_default_config(&dir, args.force).context("init default config")?;
        eprintln!("Wrote config: {}", cfg_path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let quiet = args.quiet;
    let (request, cfg) = match prepare(args)? {
        Invocation::Usage(err) => {
            eprintln!("error: {err}\n");
            eprintln!("{}", Args::command().render_usage());
            eprintln!(
                "\nEXAMPLE:\n  mmt-compare news en it\n\nReads tmp/evaluate/... under --base-dir (see --help for layouts).\n"
            );
            return Ok(ExitCode::from(2));
        }
        Invocation::Run { request, cfg } => (request, cfg),
    };

    let log = ConsoleLog::new(!quiet);
    if let Some(p) = cfg.config_path.as_ref() {
        log.info(format!("config: {}", p.display()));
    }

    let stdout = BufWriter::new(io::stdout().lock());
    let summary = run_compare(&request, &cfg, stdout, &log)?;
    log.info(format!(
        "done: {} of {} records",
        summary.records_written, summary.total_lines
    ));
    Ok(ExitCode::SUCCESS)
}

enum Invocation {
    Usage(CompareError),
    Run {
        request: CompareRequest,
        cfg: CompareConfig,
    },
}

/// Validates the operands first; config and corpora are only touched for a valid request.
fn prepare(args: Args) -> anyhow::Result<Invocation> {
    let request = match CompareRequest::new(args.domain, args.source_lang, args.target_lang) {
        Ok(r) => r,
        Err(err) => return Ok(Invocation::Usage(err)),
    };

    let check_line_counts = if args.check_line_counts {
        Some(true)
    } else if args.no_check_line_counts {
        Some(false)
    } else {
        None
    };
    let overrides = ConfigOverrides {
        base_dir: args.base_dir,
        layout: args.layout,
        format: args.format,
        check_line_counts,
        max_records: args.max_records,
        heval_dir: args.heval_dir,
    };
    let cfg = CompareConfig::load(args.config, overrides).context("build config")?;
    Ok(Invocation::Run { request, cfg })
}

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use serde::Deserialize;

use crate::layout::CorpusLayout;
use crate::report::ReportFormat;

pub const DEFAULT_CONFIG_FILENAME: &str = "mmt-compare.toml";
pub const CONFIG_ENV: &str = "MMT_COMPARE_CONFIG";
pub const BASE_DIR_ENV: &str = "MMT_COMPARE_BASE_DIR";

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub corpus: CorpusSection,
    #[serde(default)]
    pub report: ReportSection,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct CorpusSection {
    /// Directory holding `tmp/evaluate`. Relative paths are taken from the config file's directory.
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
    #[serde(default)]
    pub layout: Option<CorpusLayout>,
    #[serde(default)]
    pub check_line_counts: Option<bool>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct ReportSection {
    #[serde(default)]
    pub format: Option<ReportFormat>,
    /// Print at most N records; 0 means no limit.
    #[serde(default)]
    pub max_records: Option<usize>,
    #[serde(default)]
    pub heval_dir: Option<PathBuf>,
}

/// Settings given on the command line; they win over env and file.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub base_dir: Option<PathBuf>,
    pub layout: Option<CorpusLayout>,
    pub format: Option<ReportFormat>,
    pub check_line_counts: Option<bool>,
    pub max_records: Option<usize>,
    pub heval_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompareConfig {
    pub config_path: Option<PathBuf>,
    pub base_dir: PathBuf,
    pub layout: CorpusLayout,
    pub format: ReportFormat,
    pub check_line_counts: bool,
    pub max_records: Option<usize>,
    pub heval_dir: Option<PathBuf>,
}

impl CompareConfig {
    pub fn load(config_path: Option<PathBuf>, overrides: ConfigOverrides) -> anyhow::Result<Self> {
        let cwd = std::env::current_dir().context("current dir")?;

        let explicit = config_path.or_else(|| {
            std::env::var_os(CONFIG_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        });
        let cfg_file = match explicit {
            Some(p) if !p.exists() => {
                return Err(anyhow!("config not found: {}", p.display()));
            }
            Some(p) => Some(p),
            None => find_default_config(&cwd, DEFAULT_CONFIG_FILENAME),
        };

        let file_cfg = match cfg_file.as_ref() {
            Some(p) => load_config(p)?,
            None => AppConfig::default(),
        };
        let env_base_dir = std::env::var_os(BASE_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Ok(Self::from_parts(
            &file_cfg,
            cfg_file.as_deref(),
            overrides,
            env_base_dir,
            &cwd,
        ))
    }

    /// Merges CLI, env and file settings without touching the process environment.
    pub fn from_parts(
        file_cfg: &AppConfig,
        cfg_path: Option<&Path>,
        overrides: ConfigOverrides,
        env_base_dir: Option<PathBuf>,
        cwd: &Path,
    ) -> Self {
        let cfg_dir = cfg_path
            .and_then(|p| p.parent())
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(cwd);
        let from_file = |p: &PathBuf| {
            if p.is_relative() {
                cfg_dir.join(p)
            } else {
                p.clone()
            }
        };

        let base_dir = overrides
            .base_dir
            .or(env_base_dir)
            .or_else(|| file_cfg.corpus.base_dir.as_ref().map(from_file))
            .unwrap_or_else(|| cwd.to_path_buf());
        let layout = overrides
            .layout
            .or(file_cfg.corpus.layout)
            .unwrap_or_default();
        let format = overrides
            .format
            .or(file_cfg.report.format)
            .unwrap_or_default();
        let check_line_counts = overrides
            .check_line_counts
            .or(file_cfg.corpus.check_line_counts)
            .unwrap_or(false);
        let max_records = overrides
            .max_records
            .or(file_cfg.report.max_records)
            .filter(|n| *n > 0);
        let heval_dir = overrides
            .heval_dir
            .or_else(|| file_cfg.report.heval_dir.as_ref().map(from_file));

        Self {
            config_path: cfg_path.map(Path::to_path_buf),
            base_dir,
            layout,
            format,
            check_line_counts,
            max_records,
            heval_dir,
        }
    }
}

pub fn find_file_upwards(start_dir: &Path, filename: &str, max_levels: usize) -> Option<PathBuf> {
    let mut dir = start_dir;
    for _ in 0..=max_levels {
        let candidate = dir.join(filename);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
    None
}

pub fn find_default_config(cwd: &Path, filename: &str) -> Option<PathBuf> {
    if let Some(p) = find_file_upwards(cwd, filename, 8) {
        return Some(p);
    }
    let exe = std::env::current_exe().ok()?;
    find_file_upwards(exe.parent()?, filename, 10)
}

pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: AppConfig = toml::from_str(&text)
        .with_context(|| format!("parse config toml: {}", path.display()))?;
    Ok(cfg)
}

pub fn init_default_config(dir: &Path, force: bool) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create config dir: {}", dir.display()))?;
    let cfg_path = dir.join(DEFAULT_CONFIG_FILENAME);
    if cfg_path.exists() && !force {
        return Ok(cfg_path);
    }
    std::fs::write(&cfg_path, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("write config: {}", cfg_path.display()))?;
    Ok(cfg_path)
}

const DEFAULT_CONFIG_TOML: &str = r#"[corpus]
# Directory that contains tmp/evaluate (relative to this file).
base_dir = "."

# "source-reference": tmp/evaluate/source.<src> + tmp/evaluate/reference.<tgt>
# "references":       tmp/evaluate/references/<domain>.<src|tgt>
layout = "source-reference"

# Fail before printing when the four files have different line counts.
check_line_counts = false

[report]
# "text" or "json" (one object per line)
format = "text"

# max_records = 100

# Tab-separated id/lang/text export for human evaluation.
# heval_dir = "heval"
"#;

#[cfg(test)]
mod tests {
    use super::{
        init_default_config, load_config, AppConfig, CompareConfig, ConfigOverrides,
        DEFAULT_CONFIG_FILENAME,
    };
    use crate::layout::CorpusLayout;
    use crate::report::ReportFormat;
    use std::path::{Path, PathBuf};

    fn parse(text: &str) -> AppConfig {
        toml::from_str(text).expect("toml")
    }

    #[test]
    fn defaults_without_file() {
        let cfg = CompareConfig::from_parts(
            &AppConfig::default(),
            None,
            ConfigOverrides::default(),
            None,
            Path::new("/work"),
        );
        assert_eq!(cfg.base_dir, PathBuf::from("/work"));
        assert_eq!(cfg.layout, CorpusLayout::SourceReference);
        assert_eq!(cfg.format, ReportFormat::Text);
        assert!(!cfg.check_line_counts);
        assert_eq!(cfg.max_records, None);
        assert_eq!(cfg.heval_dir, None);
    }

    #[test]
    fn file_paths_are_relative_to_config_dir() {
        let file = parse(
            r#"
[corpus]
base_dir = "engines/default"
layout = "references"
check_line_counts = true

[report]
format = "json"
max_records = 5
heval_dir = "heval"
"#,
        );
        let cfg = CompareConfig::from_parts(
            &file,
            Some(Path::new("/etc/mmt/mmt-compare.toml")),
            ConfigOverrides::default(),
            None,
            Path::new("/work"),
        );
        assert_eq!(cfg.base_dir, PathBuf::from("/etc/mmt/engines/default"));
        assert_eq!(cfg.layout, CorpusLayout::References);
        assert_eq!(cfg.format, ReportFormat::Json);
        assert!(cfg.check_line_counts);
        assert_eq!(cfg.max_records, Some(5));
        assert_eq!(cfg.heval_dir, Some(PathBuf::from("/etc/mmt/heval")));
    }

    #[test]
    fn cli_beats_env_beats_file() {
        let file = parse("[corpus]\nbase_dir = \"/from/file\"\n[report]\nmax_records = 3\n");
        let cfg_path = Path::new("/cfg/mmt-compare.toml");

        let cfg = CompareConfig::from_parts(
            &file,
            Some(cfg_path),
            ConfigOverrides::default(),
            Some(PathBuf::from("/from/env")),
            Path::new("/work"),
        );
        assert_eq!(cfg.base_dir, PathBuf::from("/from/env"));

        let overrides = ConfigOverrides {
            base_dir: Some(PathBuf::from("/from/cli")),
            layout: Some(CorpusLayout::References),
            max_records: Some(0),
            ..ConfigOverrides::default()
        };
        let cfg = CompareConfig::from_parts(
            &file,
            Some(cfg_path),
            overrides,
            Some(PathBuf::from("/from/env")),
            Path::new("/work"),
        );
        assert_eq!(cfg.base_dir, PathBuf::from("/from/cli"));
        assert_eq!(cfg.layout, CorpusLayout::References);
        assert_eq!(cfg.max_records, None);
    }

    #[test]
    fn cli_can_switch_line_count_check_either_way() {
        let strict = parse("[corpus]\ncheck_line_counts = true\n");
        let off = ConfigOverrides {
            check_line_counts: Some(false),
            ..ConfigOverrides::default()
        };
        let cfg = CompareConfig::from_parts(&strict, None, off, None, Path::new("/work"));
        assert!(!cfg.check_line_counts);

        let cfg = CompareConfig::from_parts(
            &strict,
            None,
            ConfigOverrides::default(),
            None,
            Path::new("/work"),
        );
        assert!(cfg.check_line_counts);

        let on = ConfigOverrides {
            check_line_counts: Some(true),
            ..ConfigOverrides::default()
        };
        let cfg = CompareConfig::from_parts(&AppConfig::default(), None, on, None, Path::new("/work"));
        assert!(cfg.check_line_counts);
    }

    #[test]
    fn unknown_layout_is_rejected() {
        let err = toml::from_str::<AppConfig>("[corpus]\nlayout = \"sideways\"\n");
        assert!(err.is_err());
    }

    #[test]
    fn init_writes_loadable_default_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = init_default_config(dir.path(), false).expect("init");
        assert_eq!(path, dir.path().join(DEFAULT_CONFIG_FILENAME));

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.corpus.layout, Some(CorpusLayout::SourceReference));
        assert_eq!(cfg.report.format, Some(ReportFormat::Text));

        std::fs::write(&path, "[report]\nformat = \"json\"\n").expect("edit");
        init_default_config(dir.path(), false).expect("init again");
        let kept = load_config(&path).expect("load");
        assert_eq!(kept.report.format, Some(ReportFormat::Json));

        init_default_config(dir.path(), true).expect("force");
        let reset = load_config(&path).expect("load");
        assert_eq!(reset.report.format, Some(ReportFormat::Text));
    }

    #[test]
    fn broken_toml_names_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(DEFAULT_CONFIG_FILENAME);
        std::fs::write(&path, "[corpus\n").expect("write");
        let err = load_config(&path).unwrap_err();
        assert!(format!("{err}").contains(DEFAULT_CONFIG_FILENAME));
    }
}

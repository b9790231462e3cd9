//! modgraph CLI: validate the imports of a set of ES module files.
//!
//! Settings come from an optional `modgraph.toml` and then from flags, which
//! win. Results go to the given writer; the binary maps them to exit codes:
//!
//! - `0`: every import resolves
//! - `1`: unresolved imports, one `<file>: <message>` line each
//! - `2`: a file could not be read or parsed

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use modgraph_kernel::{
    validate_imports, CheckConfig, CheckError, DefaultNameResolver, ModuleRegistry, Namespaced,
    ValidationError, Whitelist,
};

/// Every import resolved.
pub const EXIT_OK: u8 = 0;
/// At least one import is unresolved.
pub const EXIT_UNRESOLVED: u8 = 1;
/// Analysis could not complete.
pub const EXIT_FATAL: u8 = 2;

/// Project config file looked up in the root when `--config` is absent.
pub const CONFIG_FILE: &str = "modgraph.toml";

#[derive(Debug, Parser)]
#[command(name = "modgraph")]
#[command(about = "Check that every ES module import resolves to a known export", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Source files to analyze
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Project root module names are relative to [default: current directory]
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Source extension stripped from module names [default: .js]
    #[arg(long = "ext")]
    pub extension: Option<String>,

    /// External module and its exports, e.g. `resolver=default` (repeatable)
    #[arg(long = "whitelist", value_name = "NAME=EXPORTS", value_parser = parse_whitelist_entry)]
    pub whitelist: Vec<WhitelistEntry>,

    /// Prefix for every module name, e.g. `appkit/`
    #[arg(long)]
    pub namespace: Option<String>,

    /// Config file [default: <cwd>/modgraph.toml if present]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Maximum number of files analyzed at once
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Human)]
    pub format: Format,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Human,
    Json,
}

/// One `--whitelist NAME=EXPORTS` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhitelistEntry {
    pub name: String,
    pub exports: Vec<String>,
}

fn parse_whitelist_entry(raw: &str) -> Result<WhitelistEntry, String> {
    let (name, exports) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=EXPORTS, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing module name in {raw:?}"));
    }
    Ok(WhitelistEntry {
        name: name.to_string(),
        exports: exports
            .split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

/// Contents of `modgraph.toml`.
///
/// ```toml
/// extension = ".js"
/// namespace = "appkit/"
/// jobs = 8
///
/// [whitelist]
/// resolver = ["default"]
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub extension: Option<String>,
    pub namespace: Option<String>,
    pub jobs: Option<usize>,
    #[serde(default)]
    pub whitelist: Whitelist,
}

impl ProjectConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config {}", path.display()))
    }
}

/// Resolve flags and config file into a check configuration and the list
/// of files to analyze. Relative paths on the command line are taken
/// relative to `invocation_dir`.
pub fn resolve(cli: &Cli, invocation_dir: &Path) -> Result<(CheckConfig, Vec<PathBuf>)> {
    let root = match &cli.cwd {
        Some(cwd) => invocation_dir.join(cwd),
        None => invocation_dir.to_path_buf(),
    };

    let project = match &cli.config {
        Some(path) => ProjectConfig::load(&invocation_dir.join(path))?,
        None => {
            let default_path = root.join(CONFIG_FILE);
            if default_path.is_file() {
                ProjectConfig::load(&default_path)?
            } else {
                ProjectConfig::default()
            }
        }
    };
    debug!(?project, root = %root.display(), "resolved project config");

    let mut whitelist = project.whitelist;
    whitelist.extend(
        cli.whitelist
            .iter()
            .map(|entry| (entry.name.clone(), entry.exports.clone()))
            .collect(),
    );

    let mut config = CheckConfig::new(&root).with_whitelist(whitelist);
    if let Some(extension) = cli.extension.clone().or(project.extension) {
        if !extension.starts_with('.') {
            bail!("extension must start with '.', got {extension:?}");
        }
        config = config.with_extension(extension);
    }
    if let Some(prefix) = cli.namespace.clone().or(project.namespace) {
        config = config.with_resolver(Namespaced::new(prefix, DefaultNameResolver));
    }
    if let Some(jobs) = cli.jobs.or(project.jobs) {
        config = config.with_concurrency(jobs);
    }

    // Files as typed are relative to the invocation directory, which is
    // only the project root when --cwd is absent.
    let files = cli
        .files
        .iter()
        .map(|file| {
            if root == invocation_dir {
                file.clone()
            } else {
                invocation_dir.join(file)
            }
        })
        .collect();

    Ok((config, files))
}

#[derive(Serialize)]
struct JsonReport<'a> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    modules: Option<&'a ModuleRegistry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [ValidationError]>,
}

/// Analyze, validate and report. Returns the process exit code; fatal
/// analysis errors come back as `Err`.
pub async fn run(cli: &Cli, invocation_dir: &Path, out: &mut dyn Write) -> Result<u8> {
    let (config, files) = resolve(cli, invocation_dir)?;
    info!(files = files.len(), root = %config.cwd.display(), "checking imports");

    match validate_imports(&files, &config).await {
        Ok(registry) => {
            report_clean(cli.format, &registry, out)?;
            Ok(EXIT_OK)
        }
        Err(CheckError::Unresolved(errors)) => {
            report_unresolved(cli.format, &errors, out)?;
            Ok(EXIT_UNRESOLVED)
        }
        Err(err) => Err(err.into()),
    }
}

fn report_clean(format: Format, registry: &ModuleRegistry, out: &mut dyn Write) -> Result<()> {
    match format {
        Format::Human => writeln!(
            out,
            "{} module(s) checked, all imports resolve",
            registry.len()
        )?,
        Format::Json => {
            let report = JsonReport {
                ok: true,
                modules: Some(registry),
                errors: None,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
    }
    Ok(())
}

fn report_unresolved(format: Format, errors: &[ValidationError], out: &mut dyn Write) -> Result<()> {
    match format {
        Format::Human => {
            for error in errors {
                writeln!(out, "{}: {}", error.file_path().display(), error)?;
            }
            writeln!(out, "{} unresolved import(s)", errors.len())?;
        }
        Format::Json => {
            let report = JsonReport {
                ok: false,
                modules: None,
                errors: Some(errors),
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitelist_flag_parses() {
        assert_eq!(
            parse_whitelist_entry("resolver=default, named"),
            Ok(WhitelistEntry {
                name: "resolver".into(),
                exports: vec!["default".into(), "named".into()],
            })
        );
        assert_eq!(
            parse_whitelist_entry("empty="),
            Ok(WhitelistEntry {
                name: "empty".into(),
                exports: vec![],
            })
        );
        assert!(parse_whitelist_entry("noequals").is_err());
        assert!(parse_whitelist_entry("=default").is_err());
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "modgraph",
            "--ext",
            ".mjs",
            "--whitelist",
            "resolver=default",
            "--whitelist",
            "lodash=map,filter",
            "--namespace",
            "appkit/",
            "--format",
            "json",
            "-vv",
            "a.mjs",
            "b.mjs",
        ])
        .expect("parse");

        assert_eq!(cli.files.len(), 2);
        assert_eq!(cli.extension.as_deref(), Some(".mjs"));
        assert_eq!(cli.whitelist.len(), 2);
        assert_eq!(cli.format, Format::Json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn files_are_required() {
        assert!(Cli::try_parse_from(["modgraph"]).is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "extension = \".ts\"\nnamespace = \"file/\"\n\n[whitelist]\nresolver = [\"default\"]\nshared = [\"a\"]\n",
        )
        .expect("write config");

        let cli = Cli::try_parse_from([
            "modgraph",
            "--namespace",
            "flag/",
            "--whitelist",
            "shared=b",
            "x.ts",
        ])
        .expect("parse");
        let (config, files) = resolve(&cli, dir.path()).expect("resolve");

        assert_eq!(config.extension, ".ts");
        assert_eq!(config.whitelist.get("resolver"), Some(&["default".to_string()][..]));
        assert_eq!(config.whitelist.get("shared"), Some(&["b".to_string()][..]));
        assert_eq!(
            config
                .resolver
                .module_name(&dir.path().join("x.ts"), &config.name_context()),
            "flag/x"
        );
        assert_eq!(files, vec![PathBuf::from("x.ts")]);
    }

    #[test]
    fn cwd_flag_keeps_files_relative_to_invocation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cli = Cli::try_parse_from(["modgraph", "--cwd", "src", "src/a.js"]).expect("parse");
        let (config, files) = resolve(&cli, dir.path()).expect("resolve");

        assert_eq!(config.cwd, dir.path().join("src"));
        assert_eq!(files, vec![dir.path().join("src/a.js")]);
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "extensions = \".js\"\n").expect("write config");

        let err = ProjectConfig::load(&path).expect_err("unknown key");
        assert!(format!("{err:#}").contains("custom.toml"));
    }

    #[test]
    fn extension_must_start_with_dot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cli = Cli::try_parse_from(["modgraph", "--ext", "js", "a.js"]).expect("parse");
        assert!(resolve(&cli, dir.path()).is_err());
    }
}

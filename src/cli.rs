//! Command-line interface for react-tsdoc.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use walkdir::WalkDir;

use crate::analysis::CompilationUnit;
use crate::config::{self, Config};
use crate::docgen;
use crate::error::{DocgenError, Result};
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &["node_modules"];

/// Generate prop documentation for React function components.
///
/// Reads TypeScript/TSX sources, finds the exported component of each file
/// and documents its props from the declared types, destructuring defaults
/// and TSDoc comments.
#[derive(Parser)]
#[command(name = "react-tsdoc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate documentation for a file or directory
    #[command(visible_alias = "gen")]
    Generate(GenerateArgs),
    /// Create a react-tsdoc.yaml config file
    Init(InitArgs),
}

/// Arguments for the generate command.
#[derive(Parser)]
pub struct GenerateArgs {
    /// Path to document (file or directory)
    pub path: PathBuf,

    /// Write JSON to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: json or pretty
    #[arg(short, long, default_value = "json")]
    pub format: String,

    /// Indent JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "react-tsdoc.yaml")]
    pub output: PathBuf,
}

/// Collect source files under `root` in a deterministic order.
///
/// Hidden directories and `node_modules` are skipped, as are files matching
/// the config's `excluded_paths` (matched against the path relative to
/// `base_dir`).
pub fn collect_files(root: &Path, base_dir: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            // Skip hidden directories
            !name.starts_with('.') && !SKIPPED_DIRS.iter().any(|d| *d == name)
        })
    {
        let entry = entry.map_err(|err| DocgenError::Io {
            path: err.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
            source: err.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !config.handles_extension(ext) {
            continue;
        }
        let relative = path.strip_prefix(base_dir).unwrap_or(path);
        if config.is_path_excluded(relative) {
            tracing::debug!(path = %relative.display(), "excluded by config");
            continue;
        }
        files.push(path.to_path_buf());
    }

    Ok(files)
}

/// Resolve the config: explicit path, then auto-discovery, then defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<(Config, Option<PathBuf>)> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => config::discover(&std::env::current_dir()?),
    };

    let config = match &path {
        Some(p) => Config::parse_file(p)
            .with_context(|| format!("failed to parse config {}", p.display()))?,
        None => Config::default(),
    };
    config::validate(&config).context("invalid config")?;

    Ok((config, path))
}

fn progress_bar(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

/// Run the generate command.
pub fn run_generate(args: &GenerateArgs) -> anyhow::Result<i32> {
    // Validate format
    if args.format != "json" && args.format != "pretty" {
        eprintln!(
            "Error: invalid format {:?}, must be 'json' or 'pretty'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let (config, config_path) = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return Ok(EXIT_ERROR);
        }
    };

    // Resolve path
    let abs_path = match args.path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };
    let base_dir = std::env::current_dir()?.canonicalize()?;

    let started = Instant::now();

    let files = if abs_path.is_dir() {
        collect_files(&abs_path, &base_dir, &config)?
    } else {
        vec![abs_path.clone()]
    };

    if files.is_empty() {
        eprintln!("Warning: no files to document");
    }

    let unit = CompilationUnit::load(&base_dir, &files)?;
    let options = config.doc_options();

    let docs = match &args.output {
        Some(_) => {
            let bar = progress_bar(unit.targets().len());
            let docs = docgen::generate_docs_with_progress(&unit, &options, |_, file| {
                bar.set_message(unit.relative_path(file));
                bar.inc(1);
            });
            match &docs {
                Ok(_) => bar.finish_and_clear(),
                Err(_) => bar.abandon(),
            }
            docs?
        }
        None => docgen::generate_docs(&unit, &options)?,
    };

    let pretty_json = args.pretty || config.pretty;

    if let Some(output) = &args.output {
        report::write_json_file(output, &docs, pretty_json)
            .with_context(|| format!("failed to write {}", output.display()))?;
    }

    match (args.format.as_str(), &args.output) {
        ("pretty", _) => {
            let config_path = config_path.map(|p| p.to_string_lossy().to_string());
            report::write_pretty(
                &args.path.to_string_lossy(),
                config_path.as_deref(),
                &docs,
                unit.targets().len(),
            );
        }
        (_, None) => report::write_json(&docs, pretty_json)?,
        (_, Some(_)) => {}
    }

    if let Some(output) = &args.output {
        println!(
            "Wrote {} component(s) to {}",
            docs.len(),
            output.display()
        );
        println!("Finished in {:.2?}", started.elapsed());
    }

    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Check if output already exists
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, config::TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to customize for your project", args.output.display());
    println!("  2. Run: react-tsdoc generate src --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "export {};\n").unwrap();
    }

    #[test]
    fn test_collect_files_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(root, "src/b/Card.tsx");
        touch(root, "src/a/Button.tsx");
        touch(root, "src/a/types.ts");
        touch(root, "src/a/styles.css");
        touch(root, "src/a/Button.test.tsx");
        touch(root, "node_modules/react/index.ts");
        touch(root, ".cache/Old.tsx");

        let config = Config {
            excluded_paths: vec!["**/*.test.tsx".to_string()],
            ..Config::default()
        };
        let files = collect_files(root, root, &config).unwrap();
        let relative: Vec<String> = files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(
            relative,
            vec!["src/a/Button.tsx", "src/a/types.ts", "src/b/Card.tsx"]
        );
    }

    #[test]
    fn test_collect_files_respects_extensions() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "A.tsx");
        touch(temp.path(), "b.ts");

        let config = Config {
            extensions: vec!["tsx".to_string()],
            ..Config::default()
        };
        let files = collect_files(temp.path(), temp.path(), &config).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("A.tsx"));
    }

    #[test]
    fn test_init_writes_template() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("conf").join("react-tsdoc.yaml");
        let args = InitArgs {
            output: output.clone(),
        };

        assert_eq!(run_init(&args).unwrap(), EXIT_SUCCESS);
        assert_eq!(fs::read_to_string(&output).unwrap(), config::TEMPLATE);
        assert_eq!(run_init(&args).unwrap(), EXIT_ERROR);
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "react-tsdoc", "-v", "generate", "src", "-o", "docs.json", "--pretty",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.path, PathBuf::from("src"));
                assert_eq!(args.output, Some(PathBuf::from("docs.json")));
                assert!(args.pretty);
                assert_eq!(args.format, "json");
            }
            Commands::Init(_) => panic!("expected generate"),
        }
    }
}

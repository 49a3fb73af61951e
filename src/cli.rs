//! Command-line interface for prosecheck.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::{self, AnalysisConfig, GENRES};
use crate::detect::{AnalysisResult, Category, Runner};
use crate::report;
use crate::summary;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Default output path for `init`.
const DEFAULT_CONFIG_OUTPUT: &str = "prosecheck.yaml";

/// Annotated configuration template written by `init`.
const CONFIG_TEMPLATE: &str = include_str!("templates/default.yaml");

/// Manuscript prose-quality analyzer.
///
/// Prosecheck flags complex sentences, passive voice with a named agent,
/// unusual dialogue tags, filter words, telling instead of showing, weak
/// verbs, overused words, unclear pronouns and repeated sentence openings.
#[derive(Parser)]
#[command(name = "prosecheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a manuscript file or directory
    Check(CheckArgs),
    /// Write an annotated configuration file
    Init(InitArgs),
    /// List genre presets and their target grades
    Genres,
    /// List issue categories and what they flag
    Categories,
}

/// Arguments for the check command.
#[derive(Parser)]
pub struct CheckArgs {
    /// Path to check (file or directory)
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Target reading grade; sentences above it are complex
    #[arg(short, long)]
    pub grade: Option<f64>,

    /// Genre preset that sets the target grade (see `prosecheck genres`)
    #[arg(long, conflicts_with = "grade")]
    pub genre: Option<String>,

    /// Built-in language bundle: en, de or pl
    #[arg(short, long)]
    pub language: Option<String>,

    /// Custom heuristic bundle YAML file
    #[arg(long)]
    pub bundle: Option<PathBuf>,

    /// Category to skip; may be repeated
    #[arg(long, value_name = "CATEGORY")]
    pub disable: Vec<Category>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Maximum acceptable number of issues (exit 1 if exceeded)
    #[arg(long)]
    pub max_issues: Option<usize>,

    /// Abandon the analysis of a file after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_OUTPUT)]
    pub output: PathBuf,
}

/// Load the configuration named on the command line, or discover one.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<AnalysisConfig> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => config::discover(),
    };
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            AnalysisConfig::parse_file(&path)
                .with_context(|| format!("failed to load config {}", path.display()))
        }
        None => Ok(AnalysisConfig::default()),
    }
}

/// Apply command-line overrides on top of the loaded configuration.
fn apply_overrides(config: &mut AnalysisConfig, args: &CheckArgs) {
    if let Some(grade) = args.grade {
        config.target_grade = grade;
        config.genre = None;
    }
    if let Some(genre) = &args.genre {
        config.genre = Some(genre.clone());
    }
    if let Some(language) = &args.language {
        config.language = language.clone();
    }
    if let Some(bundle) = &args.bundle {
        config.bundle_path = Some(bundle.clone());
    }
    for category in &args.disable {
        config.categories.set(*category, false);
    }
}

/// Collect manuscript files under a directory.
fn collect_files(root: &Path, config: &AnalysisConfig) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            // Skip hidden directories
            let name = e.file_name().to_string_lossy();
            !(e.depth() > 0 && e.file_type().is_dir() && name.starts_with('.'))
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !config.has_checked_extension(path) {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        if config.is_path_excluded(relative) {
            info!(path = %path.display(), "excluded by config");
            continue;
        }
        files.push(path.to_path_buf());
    }

    Ok(files)
}

/// One analyzed file.
struct Checked {
    path: String,
    text: String,
    result: AnalysisResult,
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.green/dim}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("█▓░"));
    }
    pb
}

/// Run the check command.
pub fn run_check(args: &CheckArgs) -> anyhow::Result<i32> {
    // Validate format
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return Ok(EXIT_ERROR);
        }
    };
    apply_overrides(&mut config, args);

    let runner = match Runner::new(config) {
        Ok(r) => Arc::new(r),
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    // Check path exists
    let metadata = match std::fs::metadata(&args.path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let files = if metadata.is_dir() {
        collect_files(&args.path, runner.config())?
    } else {
        vec![args.path.clone()]
    };

    if files.is_empty() {
        eprintln!("Warning: no files to check");
        return Ok(EXIT_SUCCESS);
    }

    let timeout = args.timeout_secs.map(Duration::from_secs);
    let rt = match timeout {
        Some(_) => Some(tokio::runtime::Runtime::new().context("failed to start runtime")?),
        None => None,
    };

    let pb = (args.format == "pretty" && files.len() > 1).then(|| progress_bar(files.len()));

    let mut checked = Vec::with_capacity(files.len());
    for path in &files {
        let shown = path.to_string_lossy().to_string();
        if let Some(pb) = &pb {
            pb.set_message(shown.clone());
        }

        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) => {
                warn!(path = %shown, error = %e, "skipping unreadable file");
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
                continue;
            }
        };

        let analysis = match (&rt, timeout) {
            (Some(rt), Some(limit)) => {
                rt.block_on(Arc::clone(&runner).analyze_with_timeout(text.clone(), limit))
            }
            _ => runner.analyze(&text),
        };
        let result = match analysis {
            Ok(r) => r,
            Err(e) => {
                if let Some(pb) = &pb {
                    pb.finish_and_clear();
                }
                eprintln!("Error: {}: {}", shown, e);
                return Ok(EXIT_ERROR);
            }
        };

        checked.push(Checked {
            path: shown,
            text,
            result,
        });
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }

    let total_issues: usize = checked.iter().map(|c| c.result.total_issues()).sum();
    let passed = args.max_issues.map(|max| total_issues <= max).unwrap_or(true);
    let single = checked.len() == 1;

    match args.format.as_str() {
        "json" => {
            let files = checked
                .iter()
                .map(|c| {
                    let max = if single { args.max_issues } else { None };
                    let s = summary::calculate(&c.result, max);
                    report::file_report(&c.path, &c.text, &c.result, &s)
                })
                .collect();
            report::write_json(&report::json_report(files, args.max_issues))?;
        }
        _ => {
            report::write_header();
            let mut flagged: Vec<Category> = Vec::new();
            for c in &checked {
                let max = if single { args.max_issues } else { None };
                let s = summary::calculate(&c.result, max);
                report::write_pretty(&c.path, &c.text, &c.result, &s);
                for (category, spans) in &c.result.spans {
                    if !spans.is_empty() && !flagged.contains(category) {
                        flagged.push(*category);
                    }
                }
            }
            flagged.sort();
            report::write_legend(&flagged);
            report::write_final_status(total_issues, args.max_issues, passed);
            println!();
        }
    }

    // Return appropriate exit code
    if passed {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
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

    if let Err(e) = std::fs::write(&args.output, CONFIG_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to set your target grade or genre", args.output.display());
    println!("  2. Run: prosecheck check manuscript.txt --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}

/// List genre presets.
pub fn list_genres() -> anyhow::Result<i32> {
    println!("Genre presets:");
    println!();
    for (name, grade) in GENRES {
        println!("  {:<20} grade {:.0}", name, grade);
    }
    println!();
    println!("Usage:");
    println!("  prosecheck check <PATH> --genre \"Hard Sci-Fi\"");
    Ok(EXIT_SUCCESS)
}

/// List issue categories.
pub fn list_categories() -> anyhow::Result<i32> {
    println!("Categories:");
    println!();
    for category in Category::ALL {
        println!("  {:<20} {}", category.as_str(), category.title());
        println!("  {:<20} {}", "", category.description());
        println!();
    }
    println!("Disable one with: prosecheck check <PATH> --disable <CATEGORY>");
    Ok(EXIT_SUCCESS)
}

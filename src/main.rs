use std::collections::HashSet;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{ArgAction, Parser};
use sc::{Config, Language, run_with_config, syntax};
use tracing_subscriber::EnvFilter;

/// sc - strip code.
///
/// Remove comments, logging calls and blank lines from source files. By
/// default it:
///
///   - strips line and block comments, keeping string literals intact
///   - drops blank lines left behind
///   - respects .gitignore / .ignore / git exclude files
#[derive(Parser, Debug)]
#[command(
    name = "sc",
    author,
    version,
    about = "Strip comments, logging calls and blank lines from source files",
    long_about = r#"Strip comments, logging calls and blank lines from source files.

Supported languages: lua, typescript, html, css. The language is picked
from the file extension unless --lang is given; anything unknown is
treated as lua.

By default it:
  • strips line and block comments, keeping string literals intact
  • drops blank lines left behind
  • respects .gitignore / .ignore / git exclude files

Typical usage:
  sc src
  sc -t lua --remove-logs scripts
  cat init.lua | sc -
"#
)]
struct Args {
    /// File extensions / types to include (e.g. lua, ts).
    ///
    /// Can be repeated or comma-separated. Defaults to every extension of a
    /// supported language.
    #[arg(
        short = 't',
        long = "type",
        alias = "ext",
        value_name = "EXT",
        action = ArgAction::Append,
        value_delimiter = ','
    )]
    exts: Vec<String>,

    /// Paths to process (files or directories, `-` for stdin). Defaults to
    /// current directory.
    #[arg(value_name = "PATH", default_value = ".")]
    paths: Vec<PathBuf>,

    /// Language id to use for every input instead of detecting it.
    ///
    /// Unknown ids are stripped as lua; --remove-logs leaves them untouched.
    #[arg(short = 'l', long = "lang", value_name = "ID")]
    lang: Option<String>,

    /// Remove lines containing logging calls (print, console.log, ...).
    #[arg(long = "remove-logs")]
    remove_logs: bool,

    /// Do not strip comments or blank lines.
    #[arg(long = "no-strip")]
    no_strip: bool,

    /// Print the number of blank lines per input instead of its content.
    #[arg(long = "count-blank")]
    count_blank: bool,

    /// Print the supported languages and their delimiters as JSON, then exit.
    #[arg(long = "list-languages")]
    list_languages: bool,

    /// Follow symbolic links during traversal.
    #[arg(long = "follow-symlinks")]
    follow_symlinks: bool,

    /// Disable reading .gitignore / .ignore / git exclude files.
    #[arg(long = "no-gitignore")]
    no_gitignore: bool,

    /// Additional glob patterns to exclude (files or directories).
    ///
    /// Patterns are evaluated relative to each PATH root, e.g.:
    ///
    ///   sc --exclude 'vendor/**,*.min.js'
    #[arg(
        long = "exclude",
        short = 'E',
        value_name = "GLOB",
        action = ArgAction::Append,
        value_delimiter = ','
    )]
    excludes: Vec<String>,

    /// Maximum file size to process, in bytes (skip larger files).
    #[arg(long = "max-bytes", value_name = "N")]
    max_bytes: Option<u64>,

    /// Output as a JSON array of objects
    /// { "path", "file_name", "language", "content" }, or { "path", "blank_lines" }
    /// with --count-blank.
    #[arg(long = "json")]
    json: bool,

    /// Print an explicit END marker after each file.
    #[arg(long = "end-marker")]
    end_marker: bool,
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let args = Args::parse();

    if args.list_languages {
        println!("{}", serde_json::to_string_pretty(&syntax::registry())?);
        return Ok(());
    }

    // Normalise extensions to lowercase, no leading dot.
    let mut ext_set = HashSet::new();
    for e in &args.exts {
        let norm = e.trim().trim_start_matches('.').to_ascii_lowercase();
        if !norm.is_empty() {
            ext_set.insert(norm);
        }
    }

    if ext_set.is_empty() {
        if !args.exts.is_empty() {
            bail!("No valid extensions provided (after normalisation).");
        }
        ext_set.extend(Language::known_extensions().iter().map(|e| e.to_string()));
    }

    let cfg = Config {
        exts: ext_set,
        paths: args.paths,
        lang: args.lang,
        strip: !args.no_strip,
        remove_logs: args.remove_logs,
        count_blank: args.count_blank,
        follow_symlinks: args.follow_symlinks,
        no_gitignore: args.no_gitignore,
        json: args.json,
        excludes: args.excludes,
        max_bytes: args.max_bytes,
        end_marker: args.end_marker,
    };

    run_with_config(cfg)
}

use std::collections::HashSet;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder};
use tracing::{debug, error, warn};

pub mod lines;
pub mod logging;
pub mod scanner;
pub mod syntax;

pub use crate::lines::{compact, count_blank_lines};
pub use crate::logging::{remove_logging_for, remove_logging_statements};
pub use crate::syntax::{Language, SyntaxConfig};

/// Strip comments and blank lines from `input`.
///
/// `id` is resolved through the syntax registry; a missing or unknown id
/// falls back to Lua.
pub fn strip(input: &str, id: Option<&str>) -> String {
    strip_with(input, Language::resolve(id))
}

/// Like [`strip`], for an already resolved language.
pub fn strip_with(input: &str, lang: Language) -> String {
    compact(&scanner::strip_comments(input, lang.syntax()))
}

/// Path argument that reads the source from stdin.
pub const STDIN_PATH: &str = "-";

/// Configuration passed from the CLI layer (main.rs) into the core logic.
#[derive(Debug)]
pub struct Config {
    pub exts: HashSet<String>,
    pub paths: Vec<PathBuf>,
    /// Forced language id; otherwise detected per file extension.
    pub lang: Option<String>,
    pub strip: bool,
    pub remove_logs: bool,
    pub count_blank: bool,
    pub follow_symlinks: bool,
    pub no_gitignore: bool,
    pub json: bool,
    pub excludes: Vec<String>,
    pub max_bytes: Option<u64>,
    pub end_marker: bool,
}

impl Config {
    /// Run the enabled text passes: comment stripping, then logging removal.
    pub fn transform(&self, text: &str, lang: Language) -> String {
        let mut text = if self.strip {
            strip_with(text, lang)
        } else {
            text.to_string()
        };
        if self.remove_logs {
            // A forced id keeps its own rule: unknown ids leave logging alone.
            text = match self.lang.as_deref() {
                Some(id) => remove_logging_statements(&text, Some(id)),
                None => remove_logging_for(&text, lang),
            };
        }
        text
    }
}

#[derive(serde::Serialize)]
struct FileEntry<'a> {
    path: &'a str,
    file_name: &'a str,
    language: &'static str,
    content: String,
}

#[derive(serde::Serialize)]
struct BlankCountEntry<'a> {
    path: &'a str,
    blank_lines: usize,
}

/// One input read from disk or stdin, ready to be processed.
#[derive(Debug)]
struct Source<'a> {
    display_path: &'a str,
    file_name: &'a str,
    language: Language,
    text: String,
}

pub fn run_with_config(cfg: Config) -> Result<()> {
    let exclude_globset = build_exclude_globset(&cfg.excludes)?;

    let mut had_error = false;
    let mut first_file = true;

    if cfg.json {
        println!("[");
    }

    for raw_root in &cfg.paths {
        if raw_root.as_os_str() == STDIN_PATH {
            let mut text = String::new();
            if let Err(err) = io::stdin().read_to_string(&mut text) {
                error!("Error reading stdin: {err}");
                had_error = true;
                continue;
            }
            let source = Source {
                display_path: "<stdin>",
                file_name: "<stdin>",
                language: resolve_language(cfg.lang.as_deref(), None),
                text,
            };
            if let Err(err) = emit(&cfg, &source, &mut first_file) {
                error!("Error printing <stdin>: {:#}", err);
                had_error = true;
            }
            continue;
        }

        // Canonicalise roots so running from arbitrary working dirs is reliable.
        let canon_root = match raw_root.canonicalize() {
            Ok(p) => p,
            Err(e) => {
                warn!("Skipping root {:?}: {}", raw_root, e);
                had_error = true;
                continue;
            }
        };

        let mut builder = WalkBuilder::new(&canon_root);
        builder.follow_links(cfg.follow_symlinks);

        // Helps avoid edge cases where process CWD is invalid and global ignores need a base.
        builder.current_dir(canon_root.clone());

        if cfg.no_gitignore {
            builder
                .git_ignore(false)
                .git_exclude(false)
                .git_global(false)
                .ignore(false);
        } else {
            builder
                .git_ignore(true)
                .git_exclude(true)
                .git_global(true)
                .ignore(true)
                .require_git(false);
        }

        // Values moved into the 'static filter closure must be owned separately.
        let root_for_filter = canon_root.clone();
        let exclude_globset = exclude_globset.clone();

        builder.filter_entry(move |entry: &DirEntry| {
            // Always keep the root.
            if entry.depth() == 0 {
                return true;
            }

            // Apply user exclude globs, relative to the current root.
            if let Some(ref gs) = exclude_globset {
                let path = entry.path();
                let rel = path.strip_prefix(&root_for_filter).unwrap_or(path);
                let rel_norm = normalize_for_matching(rel);

                if gs.is_match(&rel_norm) {
                    return false;
                }

                // Directories also get a trailing slash so `tests/**` prunes the subtree.
                if entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false)
                    && !rel_norm.ends_with('/')
                {
                    let rel_dir = format!("{rel_norm}/");
                    if gs.is_match(&rel_dir) {
                        return false;
                    }
                }
            }

            true
        });

        for result in builder.build() {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    error!("Walk error: {err}");
                    had_error = true;
                    continue;
                }
            };

            if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
                continue;
            }

            let path = entry.path();
            if !matches_ext(path, &cfg.exts) {
                continue;
            }

            let display_path = make_display_path(&canon_root, path);

            if let Some(limit) = cfg.max_bytes
                && let Ok(meta) = fs::metadata(path)
                && meta.len() > limit
            {
                warn!(
                    "Skipping {} (size {} bytes > max {} bytes)",
                    display_path,
                    meta.len(),
                    limit
                );
                continue;
            }

            let text = match read_source(path, &display_path) {
                Ok(text) => text,
                Err(err) => {
                    error!("Error reading {}: {:#}", display_path, err);
                    had_error = true;
                    continue;
                }
            };

            let file_name = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned();
            let ext = path.extension().and_then(|s| s.to_str());
            let source = Source {
                display_path: &display_path,
                file_name: &file_name,
                language: resolve_language(cfg.lang.as_deref(), ext),
                text,
            };

            if let Err(err) = emit(&cfg, &source, &mut first_file) {
                error!("Error printing {}: {:#}", display_path, err);
                had_error = true;
            }
        }
    }

    if cfg.json {
        println!("\n]");
    }

    if had_error {
        anyhow::bail!("One or more files could not be processed. See stderr for details.");
    }

    Ok(())
}

/// Pick the language for one input: a forced id wins, then the extension,
/// then the registry default.
pub fn resolve_language(forced: Option<&str>, ext: Option<&str>) -> Language {
    if let Some(id) = forced {
        let lang = Language::resolve(Some(id));
        if Language::from_id(id).is_none() {
            debug!("Unknown language {id:?}, falling back to {}", lang.id());
        }
        return lang;
    }

    match ext.and_then(Language::from_extension) {
        Some(lang) => lang,
        None => {
            let lang = Language::default();
            debug!("No language for extension {ext:?}, using {}", lang.id());
            lang
        }
    }
}

/// Build a GlobSet from the user–provided `--exclude` patterns.
/// Returns `Ok(None)` if there are no patterns.
fn build_exclude_globset(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();

    for pat in patterns {
        let pat = pat.trim();
        if pat.is_empty() {
            continue;
        }

        let glob =
            Glob::new(pat).with_context(|| format!("Invalid --exclude glob pattern: {pat}"))?;
        builder.add(glob);
    }

    let set = builder
        .build()
        .context("Failed to build exclude glob set")?;

    Ok(Some(set))
}

/// Case-insensitive extension match, using the provided extension set.
pub fn matches_ext(path: &Path, exts: &HashSet<String>) -> bool {
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => exts.contains(&ext.to_ascii_lowercase()),
        None => false,
    }
}

/// Produce a display path relative to `root` (stable regardless of current working directory).
pub fn make_display_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);

    // If root is a file and path == root, rel is empty.
    if rel.as_os_str().is_empty() {
        return path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
    }

    normalize_for_matching(rel)
}

fn read_source(path: &Path, display_path: &str) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", display_path))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Print one processed input in the configured output format.
fn emit(cfg: &Config, source: &Source<'_>, first_file: &mut bool) -> Result<()> {
    if cfg.json {
        if !*first_file {
            println!(",");
        }
        *first_file = false;
        return print_json(cfg, source);
    }

    if cfg.count_blank {
        println!(
            "{}: {}",
            source.display_path,
            count_blank_lines(&source.text)
        );
        return Ok(());
    }

    print_text(cfg, source);
    Ok(())
}

/// Print a single input with header (and optional end marker).
fn print_text(cfg: &Config, source: &Source<'_>) {
    let text = cfg.transform(&source.text, source.language);

    println!("========== FILE: {} ==========", source.display_path);
    print!("{text}");

    // Ensure there is a trailing newline before the separator between files.
    if !text.ends_with('\n') {
        println!();
    }

    if cfg.end_marker {
        println!("========== END FILE: {} ==========\n", source.display_path);
    } else {
        println!();
    }
}

fn print_json(cfg: &Config, source: &Source<'_>) -> Result<()> {
    let json = if cfg.count_blank {
        serde_json::to_string(&BlankCountEntry {
            path: source.display_path,
            blank_lines: count_blank_lines(&source.text),
        })?
    } else {
        serde_json::to_string(&FileEntry {
            path: source.display_path,
            file_name: source.file_name,
            language: source.language.id(),
            content: cfg.transform(&source.text, source.language),
        })?
    };
    print!("{}", json);

    Ok(())
}

/// Convert paths to a stable, slash-separated form for matching/printing.
fn normalize_for_matching(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

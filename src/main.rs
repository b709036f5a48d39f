//! docblock: generate HTML or JSON documentation from `/** ... */` comments.
//!
//! Two modes:
//!
//! - **stdin mode**: `docblock < file.js`
//! - **file mode**: `docblock -o docs/api src/*.js`

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use docblock::parser::{self, LeadingText, ParseOptions};
use docblock::render;
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "docblock",
    about = "Generate documentation from Javadoc-style comment blocks"
)]
struct Cli {
    /// Input files (glob patterns and directories supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: html (default), json
    #[arg(short = 'f', long, default_value = "html")]
    format: String,

    /// Treat dotted member paths (Object.prototype.foo) as one name
    #[arg(long)]
    dotted_names: bool,

    /// Where text before the first @command goes
    #[arg(long, value_enum, default_value_t = LeadingText::Brief)]
    leading_text: LeadingText,

    /// Warn on empty @brief, @description and @feature instead of accepting them
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            dotted_names: self.dotted_names,
            leading_text: self.leading_text,
            strict: self.strict,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.files.is_empty() {
        return stdin_mode(&cli);
    }

    file_mode(&cli)
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

/// stdin mode: read from stdin, render to stdout.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let doc = docblock::Document {
        records: parser::parse(&input, &cli.parse_options()),
        ..Default::default()
    };
    let renderer = render::create_renderer(&cli.format)?;
    print!("{}", renderer.render(&doc)?);
    Ok(())
}

/// file mode: process every input file, writing one output file each.
fn file_mode(cli: &Cli) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    // Fail on a bad format before touching the filesystem
    let renderer = render::create_renderer(&cli.format)?;
    let ext = renderer.file_extension();

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let options = cli.parse_options();
    let mut written = HashSet::new();
    for path in expand_inputs(&cli.files, SUPPORTED_EXTENSIONS)? {
        let content = match parser::read_source(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("skipping {}: {}", path.display(), err);
                continue;
            }
        };

        let doc = parser::parse_document(&path, &content, &options);
        let warnings: usize = doc.records.iter().map(|r| r.diagnostics.len()).sum();
        tracing::info!(
            file = %path.display(),
            records = doc.records.len(),
            warnings,
            "parsed"
        );

        // Nothing documented, nothing to write
        if doc.records.is_empty() {
            continue;
        }

        let name = derive_output_name(&path);
        let out_path = unique_output_path(output_dir, &name, ext, &mut written);
        if out_path != output_dir.join(format!("{}.{}", name, ext)) {
            tracing::warn!(
                "{} shares its output name with an earlier file, writing {}",
                path.display(),
                out_path.display()
            );
        }
        fs::write(&out_path, renderer.render(&doc)?)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }

    Ok(())
}

/// File extensions recognized as source files when scanning directories.
const SUPPORTED_EXTENSIONS: &[&str] = &[
    "js", "mjs", "cjs", "jsx", "ts", "tsx", "java", "kt", "c", "h", "cc", "cpp", "hpp",
];

/// Resolve command-line inputs to a sorted, deduplicated file list.
///
/// Each input is a file, a directory (scanned non-recursively for files
/// whose extension is in `extensions`) or a glob pattern.
fn expand_inputs(inputs: &[String], extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();
    for input in inputs {
        let path = Path::new(input);
        if path.is_file() {
            files.insert(path.to_path_buf());
        } else if path.is_dir() {
            files.extend(scan_dir(path, extensions)?);
        } else {
            let before = files.len();
            for entry in glob::glob(input).with_context(|| format!("invalid glob pattern: {}", input))? {
                match entry {
                    Ok(p) if p.is_file() => {
                        files.insert(p);
                    }
                    Ok(_) => {}
                    Err(err) => tracing::debug!("unreadable glob match: {}", err),
                }
            }
            if files.len() == before {
                tracing::warn!("no files matched: {}", input);
            }
        }
    }
    Ok(files.into_iter().collect())
}

/// Files directly inside `dir` with one of `extensions`.
fn scan_dir(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read directory: {}", dir.display()))?;
    Ok(entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && has_extension(p, extensions))
        .collect())
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.contains(&ext))
}

/// First free `<stem>.<ext>`, `<stem>-2.<ext>`, ... in `dir`, recorded in
/// `written` so later files with the same stem move on.
fn unique_output_path(dir: &Path, stem: &str, ext: &str, written: &mut HashSet<PathBuf>) -> PathBuf {
    let mut candidate = dir.join(format!("{}.{}", stem, ext));
    let mut n = 2;
    while written.contains(&candidate) {
        candidate = dir.join(format!("{}-{}.{}", stem, n, ext));
        n += 1;
    }
    written.insert(candidate.clone());
    candidate
}

/// Output file name (without extension) for a source path.
/// "src/math.js" → "math"
fn derive_output_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "index".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_from_js() {
        assert_eq!(derive_output_name(Path::new("src/math.js")), "math");
        assert_eq!(derive_output_name(Path::new("math.js")), "math");
    }

    #[test]
    fn output_name_keeps_inner_dots() {
        assert_eq!(derive_output_name(Path::new("lib/util.test.ts")), "util.test");
    }

    #[test]
    fn output_name_no_extension() {
        assert_eq!(derive_output_name(Path::new("Makefile")), "Makefile");
    }

    #[test]
    fn expand_directory_filters_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.js"), "").unwrap();
        fs::write(dir.path().join("a.java"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files =
            expand_inputs(&[dir.path().to_string_lossy().to_string()], SUPPORTED_EXTENSIONS).unwrap();
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["a.java", "b.js"]);
    }

    #[test]
    fn expand_dedups_overlapping_patterns() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("one.js");
        fs::write(&file, "").unwrap();
        let as_file = file.to_string_lossy().to_string();
        let as_glob = format!("{}/*.js", dir.path().display());

        let files = expand_inputs(&[as_file, as_glob], SUPPORTED_EXTENSIONS).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn scan_dir_uses_given_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.js"), "").unwrap();
        fs::write(dir.path().join("b.kt"), "").unwrap();
        fs::create_dir(dir.path().join("nested.js")).unwrap();

        let files = scan_dir(dir.path(), &["kt"]).unwrap();
        assert_eq!(files, vec![dir.path().join("b.kt")]);
    }

    #[test]
    fn unique_output_path_numbers_repeats() {
        let mut written = HashSet::new();
        let dir = Path::new("out");
        assert_eq!(unique_output_path(dir, "util", "html", &mut written), dir.join("util.html"));
        assert_eq!(unique_output_path(dir, "util", "html", &mut written), dir.join("util-2.html"));
        assert_eq!(unique_output_path(dir, "util", "html", &mut written), dir.join("util-3.html"));
        assert_eq!(unique_output_path(dir, "math", "html", &mut written), dir.join("math.html"));
    }
}

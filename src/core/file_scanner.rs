//! Source file discovery under the configured include directories.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;
use crate::core::parsers::source::is_source_file;

/// Patterns without wildcards are literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Scan options, mirroring the file-selection part of the config.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions<'a> {
    pub includes: &'a [String],
    pub ignores: &'a [String],
    pub ignore_test_files: bool,
    pub verbose: bool,
}

#[derive(Debug, Default)]
pub struct ScanResult {
    /// Source files, ordered by path.
    pub files: BTreeSet<PathBuf>,
    /// Entries that could not be read while walking.
    pub skipped_count: usize,
}

fn warn(message: impl std::fmt::Display) {
    eprintln!("{} {}", "warning:".bold().yellow(), message);
}

pub fn scan_files(base_dir: &Path, options: ScanOptions<'_>) -> ScanResult {
    let verbose = options.verbose;
    let mut result = ScanResult::default();

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in options.ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) if verbose => warn(format!("Invalid ignore pattern '{}': {}", p, e)),
                Err(_) => {}
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    if options.ignore_test_files {
        glob_patterns.extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
    }

    for dir in include_dirs(base_dir, options.includes, verbose) {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    result.skipped_count += 1;
                    if verbose {
                        warn(format!("Cannot access path: {}", e));
                    }
                    continue;
                }
            };
            let path = entry.path();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            let path_str = path.to_string_lossy();
            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if path.is_file() && is_source_file(path) {
                result.files.insert(path.to_path_buf());
            }
        }
    }

    result
}

fn include_dirs(base_dir: &Path, includes: &[String], verbose: bool) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![base_dir.to_path_buf()];
    }

    let mut paths = Vec::new();
    for inc in includes {
        if is_glob_pattern(inc) {
            let full_pattern = base_dir.join(inc);
            match glob(&full_pattern.to_string_lossy()) {
                Ok(entries) => paths.extend(entries.flatten().filter(|entry| entry.is_dir())),
                Err(e) if verbose => warn(format!("Invalid glob pattern '{}': {}", inc, e)),
                Err(_) => {}
            }
        } else {
            let path = base_dir.join(inc);
            if path.exists() {
                paths.push(path);
            } else if verbose {
                warn(format!("Include path does not exist: {}", path.display()));
            }
        }
    }
    paths
}

//! Source-file discovery: include/ignore/test-file glob walking.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct ScanResult {
    pub files: HashSet<String>,
    pub skipped_count: usize,
}

pub fn scan_files(
    base_dir: &Path,
    includes: &[String],
    ignore_patterns: &[String],
    ignore_test_files: bool,
    verbose: bool,
) -> ScanResult {
    let mut files: HashSet<String> = HashSet::new();
    let mut skipped_count = 0;

    // Separate ignore patterns into literal paths and glob patterns
    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    // Process user-defined ignore patterns
    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            // Literal path mode: convert to absolute path for prefix matching
            let path = base_dir.join(p);
            literal_ignore_paths.push(path);
        }
    }

    // Add test file patterns (these are always glob patterns)
    if ignore_test_files {
        for p in TEST_FILE_PATTERNS {
            if let Ok(pattern) = Pattern::new(p) {
                glob_patterns.push(pattern);
            }
        }
    }

    let dirs_to_scan: Vec<PathBuf> = if includes.is_empty() {
        vec![base_dir.to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for inc in includes {
            if is_glob_pattern(inc) {
                // Glob mode: expand pattern to matching directories
                let full_pattern = base_dir.join(inc);
                let pattern_str = full_pattern.to_string_lossy();
                match glob(&pattern_str) {
                    Ok(entries) => {
                        for entry in entries.flatten() {
                            if entry.is_dir() {
                                paths.push(entry);
                            }
                        }
                    }
                    Err(e) => {
                        if verbose {
                            eprintln!(
                                "{} Invalid glob pattern '{}': {}",
                                "warning:".bold().yellow(),
                                inc,
                                e
                            );
                        }
                    }
                }
            } else {
                // Literal path mode: use as-is
                let path = base_dir.join(inc);
                if path.exists() {
                    paths.push(path);
                } else if verbose {
                    eprintln!(
                        "{} Include path does not exist: {}",
                        "warning:".bold().yellow(),
                        path.display()
                    );
                }
            }
        }
        paths
    };

    for dir in dirs_to_scan {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();
            let path_str = path.to_string_lossy();

            // Check if path matches any literal ignore path (prefix match)
            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            // Check if path matches any glob pattern
            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if path.is_file() && is_scannable_file(path) {
                files.insert(path_str.into());
            }
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}

fn is_scannable_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tsx" | "ts" | "jsx" | "js")
    )
}

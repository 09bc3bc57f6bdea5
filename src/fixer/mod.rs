//! Duplicate-import fixer
//!
//! Walks a source tree and, in every file that imports the configured module
//! more than once, removes the redundant simple-form default import
//! (`import React from 'react';`).
//!
//! # Examples
//!
//! ```no_run
//! use regtools::config::FixerConfig;
//! use regtools::fixer::Fixer;
//!
//! let fixer = Fixer::from_config(&FixerConfig::default()).unwrap();
//! let report = fixer.run("./frontend").unwrap();
//! println!("{} file(s) fixed", report.modified.len());
//! ```

mod rule;

pub use rule::{FixedSource, ImportRule};

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::config::FixerConfig;

/// Errors that can occur while fixing imports
#[derive(Debug, Error)]
pub enum FixError {
    /// Root path does not exist
    #[error("root path does not exist: {0}")]
    RootNotFound(PathBuf),

    /// Root path is not a directory
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Import pattern failed to compile
    #[error("invalid import pattern: {0}")]
    InvalidPattern(String),

    /// IO error during file operations
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Error walking directory tree
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// What happened to a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixOutcome {
    /// Nothing to remove
    Unchanged,
    /// The given 1-based line was removed
    Removed {
        /// Removed line number
        line: usize,
    },
}

/// A file whose redundant import was removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedFile {
    /// File path
    pub path: PathBuf,
    /// Removed 1-based line number
    pub line: usize,
}

/// A file that could not be processed
#[derive(Debug, Clone)]
pub struct FailedFile {
    /// File path (or the directory that could not be read)
    pub path: PathBuf,
    /// Error description
    pub error: String,
}

/// Summary of a fixer run
#[derive(Debug, Clone, Default)]
pub struct FixReport {
    /// Number of candidate source files inspected
    pub scanned: usize,
    /// Files that were (or, in a dry run, would be) rewritten
    pub modified: Vec<FixedFile>,
    /// Files skipped because of an error
    pub failed: Vec<FailedFile>,
}

impl FixReport {
    /// Whether every candidate file was processed
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Fix a single file in place.
///
/// With `dry_run` the file is inspected but never written.
pub fn fix_file(rule: &ImportRule, path: &Path, dry_run: bool) -> Result<FixOutcome, FixError> {
    let content = fs::read_to_string(path)?;

    let Some(fixed) = rule.fix_source(&content) else {
        return Ok(FixOutcome::Unchanged);
    };

    if !dry_run {
        fs::write(path, fixed.content)?;
    }

    Ok(FixOutcome::Removed { line: fixed.line })
}

/// Walks a tree and applies an [`ImportRule`] to every source file
#[derive(Debug, Clone)]
pub struct Fixer {
    rule: ImportRule,
    extensions: Vec<String>,
    skip_dirs: Vec<String>,
    dry_run: bool,
}

impl Fixer {
    /// Create a fixer for the given rule, extensions and skipped directory names
    #[must_use]
    pub const fn new(rule: ImportRule, extensions: Vec<String>, skip_dirs: Vec<String>) -> Self {
        Self {
            rule,
            extensions,
            skip_dirs,
            dry_run: false,
        }
    }

    /// Create a fixer from configuration
    pub fn from_config(config: &FixerConfig) -> Result<Self, FixError> {
        let rule = ImportRule::new(&config.module, &config.default_name)?;
        Ok(Self::new(rule, config.extensions.clone(), config.skip_dirs.clone()))
    }

    /// Report what would change without writing any file
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The rule applied to each file
    #[must_use]
    pub const fn rule(&self) -> &ImportRule {
        &self.rule
    }

    /// Process every candidate file under `root`.
    ///
    /// Only a bad root aborts the run. Per-file and per-directory errors are
    /// logged and collected in [`FixReport::failed`].
    pub fn run(&self, root: impl AsRef<Path>) -> Result<FixReport, FixError> {
        let root = root.as_ref();

        if !root.exists() {
            return Err(FixError::RootNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(FixError::NotADirectory(root.to_path_buf()));
        }

        let mut report = FixReport::default();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !self.is_skipped_dir(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                    log::warn!("Cannot read {}: {err}", path.display());
                    report.failed.push(FailedFile {
                        path,
                        error: FixError::from(err).to_string(),
                    });
                    continue;
                },
            };

            // Symlinked files are processed; symlinked directories are not descended
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file || !self.is_candidate(entry.path()) {
                continue;
            }

            report.scanned += 1;
            let path = entry.path();

            match fix_file(&self.rule, path, self.dry_run) {
                Ok(FixOutcome::Removed { line }) => {
                    log::debug!("Removed line {line} from {}", path.display());
                    report.modified.push(FixedFile {
                        path: path.to_path_buf(),
                        line,
                    });
                },
                Ok(FixOutcome::Unchanged) => {
                    log::debug!("No change: {}", path.display());
                },
                Err(err) => {
                    log::warn!("Skipping {}: {err}", path.display());
                    report.failed.push(FailedFile {
                        path: path.to_path_buf(),
                        error: err.to_string(),
                    });
                },
            }
        }

        Ok(report)
    }

    /// Check if a path has one of the configured extensions
    fn is_candidate(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    /// Check if an entry is a directory that must not be descended into
    fn is_skipped_dir(&self, entry: &walkdir::DirEntry) -> bool {
        entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.skip_dirs.iter().any(|d| d == name))
    }
}

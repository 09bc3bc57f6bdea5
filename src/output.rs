//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use crate::fixer::FixReport;
use crate::verifier::{Selection, Verification, VerificationSummary, VerifyError, report_value};

/// Filled fields listed in the human report
const MAX_FILLED_SHOWN: usize = 20;

/// Empty fields listed in the human report
const MAX_EMPTY_SHOWN: usize = 15;

const BANNER_WIDTH: usize = 60;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of a fix-imports run
#[derive(Debug, Serialize)]
pub struct FixResult {
    /// Directory that was scanned
    pub root: String,
    /// Whether files were left untouched
    pub dry_run: bool,
    /// Module whose imports were inspected
    pub module: String,
    /// Number of candidate files inspected
    pub files_scanned: usize,
    /// Files whose redundant import was removed
    pub fixed: Vec<FixedEntry>,
    /// Files that could not be processed
    pub failed: Vec<FailedEntry>,
}

/// A fixed file
#[derive(Debug, Serialize)]
pub struct FixedEntry {
    /// File path
    pub file: String,
    /// Removed 1-based line number
    pub line: usize,
}

/// A file that failed
#[derive(Debug, Serialize)]
pub struct FailedEntry {
    /// File path
    pub file: String,
    /// Error description
    pub error: String,
}

impl FixResult {
    /// Build from a fixer report
    #[must_use]
    pub fn from_report(root: &Path, module: &str, report: &FixReport, dry_run: bool) -> Self {
        Self {
            root: root.display().to_string(),
            dry_run,
            module: module.to_string(),
            files_scanned: report.scanned,
            fixed: report
                .modified
                .iter()
                .map(|f| FixedEntry {
                    file: f.path.display().to_string(),
                    line: f.line,
                })
                .collect(),
            failed: report
                .failed
                .iter()
                .map(|f| FailedEntry {
                    file: f.path.display().to_string(),
                    error: f.error.clone(),
                })
                .collect(),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        let verb = if self.dry_run { "Would fix" } else { "Fixed" };
        for f in &self.fixed {
            println!(
                "{} duplicate {} import in {} (line {})",
                verb.green(),
                self.module,
                f.file,
                f.line
            );
        }

        if !self.failed.is_empty() {
            println!("\nFailed:");
            for f in &self.failed {
                println!("  {} {}: {}", "x".red(), f.file, f.error);
            }
        }

        println!(
            "\nScanned {} file(s), {} {}{}",
            self.files_scanned,
            verb.to_lowercase(),
            self.fixed.len(),
            if self.failed.is_empty() {
                String::new()
            } else {
                format!(", {} failed", self.failed.len())
            }
        );
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// A field shown in the verification report
#[derive(Debug, Serialize)]
pub struct FieldEntry {
    /// Column name
    pub name: String,
    /// Stored value; string values are truncated in human output
    pub value: Value,
}

/// Result of a successful verification
#[derive(Debug, Serialize)]
pub struct VerifyResult {
    /// Summary mapping
    #[serde(flatten)]
    pub summary: VerificationSummary,
    /// Customer full name
    pub full_name: Option<String>,
    /// Creation timestamp
    pub created_at: Option<String>,
    /// Filled fields with their values, in column order
    pub filled_fields: Vec<FieldEntry>,
    /// Empty field names, in column order
    pub empty_fields: Vec<String>,
}

impl From<&Verification> for VerifyResult {
    fn from(v: &Verification) -> Self {
        let filled_fields = v
            .completeness
            .filled
            .iter()
            .map(|name| FieldEntry {
                name: name.clone(),
                value: v.record.get(name).cloned().unwrap_or(Value::Null),
            })
            .collect();

        Self {
            summary: v.summary(),
            full_name: v.customer.full_name.clone(),
            created_at: v.customer.created_at.clone(),
            filled_fields,
            empty_fields: v.completeness.empty.clone(),
        }
    }
}

fn banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(BANNER_WIDTH))
}

fn or_none(value: Option<&str>) -> &str {
    value.unwrap_or("None")
}

impl VerifyResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                if let Err(err) = self.write_human(&mut io::stdout().lock()) {
                    log::debug!("Failed to write report: {err}");
                }
            },
            OutputMode::Json => self.render_json(),
        }
    }

    /// Write the human-readable report
    pub fn write_human(&self, out: &mut impl Write) -> io::Result<()> {
        let s = &self.summary;
        let ok = "✓".green();
        let warn = "!".yellow();

        banner(out)?;
        writeln!(out, "{}", "DATABASE VERIFICATION REPORT".bold())?;
        banner(out)?;

        match &s.selection {
            Selection::Id => {
                writeln!(out, "{ok} Customer Found: {}", s.customer_id)?;
                writeln!(out, "   Created At: {}", or_none(self.created_at.as_deref()))?;
                writeln!(out, "   Full Name: {}", or_none(self.full_name.as_deref()))?;
            },
            Selection::Recent { minutes_back } => {
                writeln!(out, "{ok} Most Recent Customer (last {minutes_back} minutes):")?;
                writeln!(out, "   Customer ID: {}", s.customer_id)?;
                writeln!(out, "   Full Name: {}", or_none(self.full_name.as_deref()))?;
                writeln!(out, "   Created At: {}", or_none(self.created_at.as_deref()))?;
            },
            Selection::TestPrefix {
                minutes_back,
                prefix,
            } => {
                writeln!(out, "{warn} No customers created in the last {minutes_back} minutes")?;
                writeln!(out, "   Checking for {prefix} customers...")?;
                writeln!(out, "{ok} Found {prefix} customer: {}", s.customer_id)?;
                writeln!(out, "   Full Name: {}", or_none(self.full_name.as_deref()))?;
                writeln!(out, "   Created At: {}", or_none(self.created_at.as_deref()))?;
            },
        }
        writeln!(out)?;

        writeln!(out, "Field Completeness Analysis:")?;
        writeln!(out, "   Total Fields: {}", s.total_fields)?;
        writeln!(out, "   Filled Fields: {}", s.filled_count)?;
        writeln!(out, "   Empty Fields: {}", s.total_fields - s.filled_count)?;
        writeln!(out, "   Completeness: {:.1}%", s.completeness)?;
        writeln!(out)?;

        writeln!(out, "{ok} Sample Filled Fields (first {MAX_FILLED_SHOWN}):")?;
        for field in self.filled_fields.iter().take(MAX_FILLED_SHOWN) {
            writeln!(out, "   - {}: {}", field.name, report_value(&field.value))?;
        }
        if self.filled_fields.len() > MAX_FILLED_SHOWN {
            writeln!(out, "   ... and {} more", self.filled_fields.len() - MAX_FILLED_SHOWN)?;
        }
        writeln!(out)?;

        if !self.empty_fields.is_empty() {
            writeln!(out, "{warn} Empty Fields ({}):", self.empty_fields.len())?;
            for field in self.empty_fields.iter().take(MAX_EMPTY_SHOWN) {
                writeln!(out, "   - {field}")?;
            }
            if self.empty_fields.len() > MAX_EMPTY_SHOWN {
                writeln!(out, "   ... and {} more", self.empty_fields.len() - MAX_EMPTY_SHOWN)?;
            }
            writeln!(out)?;
        }

        if s.missing_key_fields.is_empty() {
            writeln!(out, "{ok} All key fields are present")?;
        } else {
            writeln!(out, "{warn} Missing Key Fields: {}", s.missing_key_fields.join(", "))?;
        }

        banner(out)
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// A failed verification
#[derive(Debug, Serialize)]
pub struct VerifyFailure {
    /// Always false
    pub success: bool,
    /// Error kind (`NOT_FOUND`, `CONNECTION_FAILED`, `QUERY_FAILED`)
    pub kind: String,
    /// Human-readable message
    pub message: String,
}

impl From<&VerifyError> for VerifyFailure {
    fn from(err: &VerifyError) -> Self {
        Self {
            success: false,
            kind: err.kind().as_str().to_string(),
            message: err.to_string(),
        }
    }
}

impl VerifyFailure {
    /// Render the failure based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                if let Err(err) = self.write_human(&mut io::stdout().lock()) {
                    log::debug!("Failed to write error: {err}");
                }
            },
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }

    /// Write the one-line error report
    pub fn write_human(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(
            out,
            "{} Database verification error: {}: {}",
            "✗".red(),
            self.kind,
            self.message
        )
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}

//! Import-line recognition and the single-line removal plan
//!
//! # Examples
//!
//! ```
//! use regtools::fixer::ImportRule;
//!
//! let rule = ImportRule::new("react", "React").unwrap();
//! let source = "import React from 'react';\nimport { useState } from \"react\";\n";
//!
//! let fixed = rule.fix_source(source).unwrap();
//! assert_eq!(fixed.line, 1);
//! assert_eq!(fixed.content, "import { useState } from \"react\";\n");
//! ```

use regex::Regex;

use super::FixError;

/// Recognizes imports of one module and its canonical default-import form
#[derive(Debug, Clone)]
pub struct ImportRule {
    /// Module specifier, e.g. `react`
    module: String,

    /// Any `import ... from '<module>'` line
    pattern: Regex,

    /// Normalized simple form: `import React from 'react'`
    canonical: String,
}

/// Result of removing the redundant import from source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSource {
    /// 1-based line number that was removed
    pub line: usize,
    /// Source text without that line
    pub content: String,
}

impl ImportRule {
    /// Build a rule for `module` whose canonical form binds `default_name`
    pub fn new(module: &str, default_name: &str) -> Result<Self, FixError> {
        let pattern = format!(
            r#"^\s*import\s+.+?\s+from\s+['"]{}['"]\s*;?\s*$"#,
            regex::escape(module)
        );
        let pattern = Regex::new(&pattern).map_err(|e| FixError::InvalidPattern(e.to_string()))?;

        Ok(Self {
            module: module.to_string(),
            pattern,
            canonical: format!("import {default_name} from '{module}'"),
        })
    }

    /// The module specifier this rule inspects
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Whether `line` imports anything from the module
    #[must_use]
    pub fn is_module_import(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }

    /// Whether `line` is the canonical simple form.
    ///
    /// Surrounding whitespace, one trailing semicolon and the quote style
    /// are ignored.
    #[must_use]
    pub fn is_simple_form(&self, line: &str) -> bool {
        let trimmed = line.trim();
        let trimmed = trimmed.strip_suffix(';').map_or(trimmed, str::trim_end);
        trimmed.replace('"', "'") == self.canonical
    }

    /// Index of the line to remove, if any.
    ///
    /// A line is only removed when the module is imported more than once and
    /// one of those imports is the simple form. Only the first simple-form
    /// line is chosen.
    #[must_use]
    pub fn plan_removal<S: AsRef<str>>(&self, lines: &[S]) -> Option<usize> {
        let matches: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| self.is_module_import(line.as_ref()))
            .map(|(idx, _)| idx)
            .collect();

        if matches.len() <= 1 {
            return None;
        }

        lines.iter().position(|line| self.is_simple_form(line.as_ref()))
    }

    /// Remove the redundant import from `content`.
    ///
    /// Line terminators of the remaining lines are kept as they were.
    #[must_use]
    pub fn fix_source(&self, content: &str) -> Option<FixedSource> {
        let lines: Vec<&str> = content.split_inclusive('\n').collect();
        let idx = self.plan_removal(&lines)?;

        let mut fixed = String::with_capacity(content.len());
        for (i, line) in lines.iter().enumerate() {
            if i != idx {
                fixed.push_str(line);
            }
        }

        Some(FixedSource {
            line: idx + 1,
            content: fixed,
        })
    }
}

//! Remove redundant default imports from a source tree

use std::path::Path;
use std::process::ExitCode;

use regtools::config::Config;
use regtools::fixer::{FixError, Fixer};
use regtools::output::{FixResult, OperationResult, OutputMode};

/// Run the duplicate-import fixer
pub fn fix_imports(
    root: Option<&Path>,
    dry_run: bool,
    config: &Config,
    mode: OutputMode,
) -> anyhow::Result<ExitCode> {
    let root = root.unwrap_or(config.fixer.root.as_path());
    let fixer = Fixer::from_config(&config.fixer)?.dry_run(dry_run);

    log::info!("Scanning {} for duplicate {} imports", root.display(), fixer.rule().module());

    let report = match fixer.run(root) {
        Ok(report) => report,
        Err(err @ (FixError::RootNotFound(_) | FixError::NotADirectory(_))) => {
            let result = OperationResult {
                success: false,
                message: err.to_string(),
            };
            result.render(mode);
            return Ok(ExitCode::FAILURE);
        },
        Err(err) => return Err(err.into()),
    };

    FixResult::from_report(root, fixer.rule().module(), &report, dry_run).render(mode);

    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

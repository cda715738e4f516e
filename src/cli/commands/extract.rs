use std::time::Instant;

use anyhow::Result;

use super::super::{
    args::ExtractCommand,
    exit_status::ExitStatus,
    report::{self, ExtractSummary},
};
use crate::{
    core::{ExtractContext, po},
    issues::Severity,
};

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let started = Instant::now();
    let args = &cmd.args;

    let ctx = ExtractContext::new(&args.common)?;
    let result = ctx.extract()?;

    // Issues never block the template: conflicting occurrences are already skipped
    if !args.dry_run {
        let catalog = po::create_catalog(&result.catalog, &ctx.config.headers);
        po::write_catalog(&catalog, &ctx.output_path)?;
    }

    report::report(&result.issues);
    report::print_extract(&ExtractSummary {
        stats: result.stats(),
        output_path: ctx.output_path.display().to_string(),
        dry_run: args.dry_run,
        elapsed: started.elapsed(),
    });

    let has_errors = result
        .issues
        .iter()
        .any(|issue| issue.severity() == Severity::Error);
    Ok(if has_errors {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    })
}

//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format, followed by the extraction
//! statistics. Kept separate from core logic so glotx can be used as a library.

use std::{
    io::{self, Write},
    time::Duration,
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::catalog::ExtractionStats;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Set to disable the elapsed time line (stable test output).
pub const DISABLE_TIMING_ENV: &str = "GLOTX_DISABLE_TIMING";

/// What a finished `extract` run reports.
#[derive(Debug)]
pub struct ExtractSummary {
    pub stats: ExtractionStats,
    pub output_path: String,
    /// True if the template was not written (`--dry-run`).
    pub dry_run: bool,
    pub elapsed: Duration,
}

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_problems(&sorted, writer);
}

pub fn print_extract(summary: &ExtractSummary) {
    print_extract_to(summary, timing_enabled(), &mut io::stdout().lock());
}

/// Print the statistics table and the output line.
pub fn print_extract_to<W: Write>(summary: &ExtractSummary, show_timing: bool, writer: &mut W) {
    let stats = &summary.stats;
    let rows = [
        ("Files parsed", stats.parsed_files),
        ("Files with messages", stats.parsed_files_with_messages),
        ("Messages", stats.messages),
        ("Plural messages", stats.plural_messages),
        ("Contexts", stats.contexts),
        ("Message usages", stats.message_usages),
    ];
    print_table(&rows, writer);

    let _ = writeln!(writer);
    let line = if summary.dry_run {
        format!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Dry run: would write {} {} to {}",
                stats.messages,
                plural(stats.messages, "message", "messages"),
                summary.output_path
            )
            .green()
        )
    } else {
        format!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Wrote {} {} to {}",
                stats.messages,
                plural(stats.messages, "message", "messages"),
                summary.output_path
            )
            .green()
        )
    };
    let _ = writeln!(writer, "{}", line);

    if show_timing {
        let _ = writeln!(
            writer,
            "{}",
            format!("Finished in {:.2}s", summary.elapsed.as_secs_f64()).dimmed()
        );
    }
}

fn timing_enabled() -> bool {
    std::env::var_os(DISABLE_TIMING_ENV).is_none()
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

/// Two-column table, labels padded to the widest label.
fn print_table<W: Write>(rows: &[(&str, usize)], writer: &mut W) {
    let label_width = rows
        .iter()
        .map(|(label, _)| UnicodeWidthStr::width(*label))
        .max()
        .unwrap_or(0);
    let value_width = rows
        .iter()
        .map(|(_, value)| value.to_string().len())
        .max()
        .unwrap_or(1);

    for (label, value) in rows {
        let padding = label_width - UnicodeWidthStr::width(*label);
        let _ = writeln!(
            writer,
            "  {}{:padding$}  {:>value_width$}",
            label.bold(),
            "",
            value,
            padding = padding,
            value_width = value_width
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();

    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Clickable location: --> path:line
    match loc {
        ReportLocation::Source { path, line } => {
            let _ = writeln!(writer, "  {} {}:{}", "-->".blue(), path, line);
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_problems<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} {} ({} {}, {} {})\n",
        FAILURE_MARK.red(),
        issues.len(),
        plural(issues.len(), "problem", "problems"),
        total_errors,
        plural(total_errors, "error", "errors").red(),
        total_warnings,
        plural(total_warnings, "warning", "warnings").yellow()
    );
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source { line, .. } => Some(line),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// Tests
// ============================================================

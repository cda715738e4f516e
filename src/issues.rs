//! Issue types for extraction results.
//!
//! Issues are problems that did not stop the run but must be reported:
//! the catalog is still written. Errors fail the run, warnings do not.

use enum_dispatch::enum_dispatch;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    PluralConflict,
    ParseError,
    SkippedCall,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::PluralConflict => write!(f, "plural-conflict"),
            Rule::ParseError => write!(f, "parse-error"),
            Rule::SkippedCall => write!(f, "skipped-call"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// An occurrence whose plural form contradicts the one already in the catalog.
///
/// The occurrence was skipped; the first plural form seen is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralConflictIssue {
    pub file_path: String,
    pub line: usize,
    pub text: String,
    /// Plural form already in the catalog.
    pub existing: String,
    /// Plural form of the rejected occurrence.
    pub incoming: String,
}

impl PluralConflictIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::PluralConflict
    }

    /// Build from a `path:line` message reference.
    pub fn at_reference(reference: &str, text: String, existing: String, incoming: String) -> Self {
        let (file_path, line) = split_reference(reference);
        Self {
            file_path,
            line,
            text,
            existing,
            incoming,
        }
    }
}

/// A recognized translation call that produced no message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCallIssue {
    pub file_path: String,
    pub line: usize,
    pub callee: String,
    pub reason: String,
}

impl SkippedCallIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::SkippedCall
    }

    pub fn at_reference(reference: &str, callee: String, reason: String) -> Self {
        let (file_path, line) = split_reference(reference);
        Self {
            file_path,
            line,
            callee,
            reason,
        }
    }
}

/// `path:line` to its parts; line 0 when there is none.
fn split_reference(reference: &str) -> (String, usize) {
    match reference.rsplit_once(':') {
        Some((path, line)) => match line.parse() {
            Ok(line) => (path.to_string(), line),
            Err(_) => (reference.to_string(), 0),
        },
        None => (reference.to_string(), 0),
    }
}

/// File could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    PluralConflict(PluralConflictIssue),
    ParseError(ParseErrorIssue),
    SkippedCall(SkippedCallIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::PluralConflict(_) => PluralConflictIssue::severity(),
            Issue::ParseError(_) => ParseErrorIssue::severity(),
            Issue::SkippedCall(_) => SkippedCallIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::PluralConflict(_) => PluralConflictIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
            Issue::SkippedCall(_) => SkippedCallIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A line in a source file.
    Source { path: &'a str, line: usize },
    /// File-level only (no line context).
    File { path: &'a str },
}

impl ReportLocation<'_> {
    pub fn path(&self) -> &str {
        match self {
            ReportLocation::Source { path, .. } | ReportLocation::File { path } => path,
        }
    }

    /// 1-based line, 0 for file-level locations.
    pub fn line(&self) -> usize {
        match self {
            ReportLocation::Source { line, .. } => *line,
            ReportLocation::File { .. } => 0,
        }
    }
}

/// Trait for types that can be reported to CLI.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

impl Report for PluralConflictIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source {
            path: &self.file_path,
            line: self.line,
        }
    }

    fn message(&self) -> String {
        format!("incompatible plurals found for '{}'", self.text)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "kept '{}', skipped '{}'",
            self.existing, self.incoming
        ))
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for SkippedCallIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source {
            path: &self.file_path,
            line: self.line,
        }
    }

    fn message(&self) -> String {
        format!("skipped {}() call", self.callee)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(self.reason.clone())
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let (a, b) = (self.location(), other.location());
        a.path()
            .cmp(b.path())
            .then_with(|| a.line().cmp(&b.line()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================

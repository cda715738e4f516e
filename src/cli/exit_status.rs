use std::process::ExitCode;

/// Exit status of a glotx invocation.
///
/// - `Success` (0): template written (or dry run) with no issues
/// - `Failure` (1): the run completed but reported issues (unparsable files,
///   plural conflicts), or `init` found an existing config
/// - `Error` (2): the run could not complete (invalid config, write failure)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

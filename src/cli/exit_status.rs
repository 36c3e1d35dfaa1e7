use std::process::ExitCode;

/// Exit status for CLI commands, following common conventions for compiler
/// and linter tools.
///
/// - `Success` (0): Command completed, every call site compiled
/// - `Failure` (1): Command completed but some call sites failed to compile
/// - `Error` (2): Command failed due to internal error (parse error, config error, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed, every call site compiled.
    Success,
    /// Command completed but some call sites failed to compile.
    Failure,
    /// Command failed due to internal error (parse error, config error, etc.).
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_statuses_are_distinct() {
        assert_ne!(ExitStatus::Success, ExitStatus::Failure);
        assert_ne!(ExitStatus::Failure, ExitStatus::Error);

        // Conversion is defined for every status.
        for status in [ExitStatus::Success, ExitStatus::Failure, ExitStatus::Error] {
            let _: ExitCode = status.into();
        }
    }
}

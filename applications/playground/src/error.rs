use moonplay_framework::orchestrator::RunError;
use std::{
    fmt::{self, Display},
    process::ExitCode,
};

pub(crate) type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug)]
pub(crate) enum ApplicationError {
    /// the command line could not be understood
    Usage(String),
    /// a requested sample or shared snippet could not be loaded
    Load(String),
    /// the handshake with the player failed
    Run(RunError),
    /// the snippet-hosting API rejected the share
    ShareFailed,
    /// the documentation server could not be started or crashed
    ServeDocs(String),
}

impl Display for ApplicationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationError::Usage(message) => write!(formatter, "{message}"),
            ApplicationError::Load(what) => write!(formatter, "failed to load {what}"),
            ApplicationError::Run(error) => write!(formatter, "run failed: {error}"),
            ApplicationError::ShareFailed => {
                formatter.write_str("could not share the current code")
            }
            ApplicationError::ServeDocs(message) => {
                write!(formatter, "documentation server failed: {message}")
            }
        }
    }
}

impl From<RunError> for ApplicationError {
    fn from(error: RunError) -> Self {
        ApplicationError::Run(error)
    }
}

impl From<ApplicationError> for ExitCode {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::Usage(_) => ExitCode::from(2),
            ApplicationError::Load(_)
            | ApplicationError::Run(_)
            | ApplicationError::ShareFailed
            | ApplicationError::ServeDocs(_) => ExitCode::FAILURE,
        }
    }
}

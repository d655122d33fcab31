use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors from the outer surfaces: the command line and interactive commands.
///
/// The dashboard component itself never fails; invalid adds are ignored.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),
    #[error("'{command}' expects {expected}")]
    MissingArgument { command: &'static str, expected: &'static str },
    #[error("zone '{0}' is already displayed")]
    ZoneUnavailable(String),
    #[error("invalid timestamp '{0}' (expected YYYY-MM-DDTHH:MM:SS)")]
    InvalidTimestamp(String),
    #[error("invalid column count '{0}' (expected a positive integer)")]
    InvalidColumns(String),
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

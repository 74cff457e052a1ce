use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexerError {
    CommandNotFound(String),
    LaunchFailed {
        command: String,
        reason: String,
    },
    TimedOut {
        command: String,
        timeout_ms: u64,
    },
    Failed {
        command: String,
        reason: String,
    },
}

impl Display for IndexerError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::CommandNotFound(command) => write!(f, "{command} is not available"),
            Self::LaunchFailed {
                command,
                reason,
            } => {
                write!(f, "failed to launch {command}: {reason}")
            },
            Self::TimedOut {
                command,
                timeout_ms,
            } => {
                write!(f, "{command} did not answer within {timeout_ms} ms")
            },
            Self::Failed {
                command,
                reason,
            } => {
                write!(f, "{command} failed: {reason}")
            },
        }
    }
}

impl std::error::Error for IndexerError {}

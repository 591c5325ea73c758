pub mod logging_command;
pub mod recording;

pub use logging_command::LoggingCommandSink;
pub use recording::{RecordedAssignment, RecordingSink};

use std::fmt;

use crate::domain::VariableName;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskResult {
    Succeeded,
    Failed,
}

impl fmt::Display for TaskResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => write!(f, "Succeeded"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

#[derive(Debug)]
pub struct SinkError(pub String);

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to reach the pipeline host: {}", self.0)
    }
}

impl std::error::Error for SinkError {}

impl From<std::io::Error> for SinkError {
    fn from(e: std::io::Error) -> Self {
        Self(e.to_string())
    }
}

/// The pipeline host's side of a run: variables, error issues and the final result.
pub trait VariableSink: Send {
    fn set_variable(
        &mut self,
        name: &VariableName,
        value: &str,
        is_secret: bool,
    ) -> Result<(), SinkError>;

    fn log_error(&mut self, message: &str) -> Result<(), SinkError>;

    fn set_result(&mut self, result: TaskResult, message: &str) -> Result<(), SinkError>;
}

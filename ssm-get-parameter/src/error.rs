use std::fmt;

use crate::{
    configs::ConfigError, messages::Message, pipeline::SinkError, store::StoreError,
};

#[derive(Debug)]
pub enum TaskError {
    Config(ConfigError),
    Store(StoreError),
    Host(SinkError),
    EmptyVariableName(String),
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{}", e),
            Self::Store(e) => write!(f, "{}", e),
            Self::Host(e) => write!(f, "{}", e),
            Self::EmptyVariableName(parameter_name) => {
                write!(f, "{}", Message::ErrorEmptyVariableName(parameter_name))
            }
        }
    }
}

impl std::error::Error for TaskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Store(e) => Some(e),
            Self::Host(e) => Some(e),
            Self::EmptyVariableName(_) => None,
        }
    }
}

impl From<ConfigError> for TaskError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<StoreError> for TaskError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<SinkError> for TaskError {
    fn from(e: SinkError) -> Self {
        Self::Host(e)
    }
}

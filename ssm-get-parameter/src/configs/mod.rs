pub mod audit;
pub mod aws;
pub mod environment;
pub mod task;

pub use audit::{AuditConfig, AuditLogFormat};
pub use aws::AwsConnectionConfig;
pub use task::{NameTransform, NamingOptions, ReadMode, ReadModeKind, TaskParameters};

use std::fmt;

use crate::messages::Message;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownReadMode(String),
    MissingInput(String),
    InvalidInput {
        name: String,
        value: String,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownReadMode(mode) => write!(f, "{}", Message::UnknownReadMode(mode)),
            Self::MissingInput(name) => write!(f, "Input required: {}", name),
            Self::InvalidInput {
                name,
                value,
                reason,
            } => write!(f, "Invalid value '{}' for input {}: {}", value, name, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

#[async_trait::async_trait]
pub trait Configs: Sized {
    async fn load() -> Result<Self, ConfigError>;
}

#[derive(Debug, Clone)]
pub struct TaskConfig {
    pub task_parameters: TaskParameters,
    pub aws_connection: AwsConnectionConfig,
    pub audit_config: AuditConfig,
}

#[async_trait::async_trait]
impl Configs for TaskConfig {
    async fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            task_parameters: TaskParameters::load().await?,
            aws_connection: AwsConnectionConfig::load().await?,
            audit_config: AuditConfig::load().await?,
        })
    }
}

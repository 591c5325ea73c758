use std::fmt;

use super::{ConfigError, Configs, environment::env_or};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuditLogFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for AuditLogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for AuditLogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid audit log format: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditConfig {
    pub log_format: AuditLogFormat,
}

#[async_trait::async_trait]
impl Configs for AuditConfig {
    async fn load() -> Result<Self, ConfigError> {
        let value = env_or("AUDIT_LOG_FORMAT", "text");
        let log_format = value
            .parse::<AuditLogFormat>()
            .map_err(|reason| ConfigError::InvalidInput {
                name: "AUDIT_LOG_FORMAT".to_string(),
                value,
                reason,
            })?;
        Ok(AuditConfig { log_format })
    }
}

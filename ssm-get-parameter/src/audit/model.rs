use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{configs::ReadModeKind, domain::VariableName};

pub const AUDIT_TARGET: &str = "ssm_get_parameter::audit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditOperation {
    SetVariable,
}

impl fmt::Display for AuditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetVariable => write!(f, "SET_VARIABLE"),
        }
    }
}

/// One variable handed to the pipeline. Values are never part of the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLog {
    pub operation: AuditOperation,
    pub read_mode: String,
    pub variable_name: VariableName,
    pub parameter_name: String,
    pub is_secret: bool,
    pub placeholder_value: bool,
    pub timestamp: chrono::DateTime<Utc>,
}

impl AuditLog {
    pub fn set_variable(
        read_mode: ReadModeKind,
        variable_name: &VariableName,
        parameter_name: &str,
        is_secret: bool,
        placeholder_value: bool,
    ) -> Self {
        Self {
            operation: AuditOperation::SetVariable,
            read_mode: read_mode.to_string(),
            variable_name: variable_name.clone(),
            parameter_name: parameter_name.to_string(),
            is_secret,
            placeholder_value,
            timestamp: Utc::now(),
        }
    }
}

#[async_trait::async_trait]
pub trait AuditLogger: Send + Sync {
    async fn log(&self, audit_log: AuditLog);
}

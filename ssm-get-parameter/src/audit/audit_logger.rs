use serde_json::{Value, json};
use tracing::info;

use crate::{
    audit::model::{AUDIT_TARGET, AuditLog, AuditLogger},
    configs::{AuditConfig, AuditLogFormat},
};

#[derive(Clone)]
pub struct BaseAuditLogger {
    config: AuditConfig,
}

impl BaseAuditLogger {
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    pub fn render_json(&self, audit_log: &AuditLog) -> Value {
        json!({
            "operation": audit_log.operation,
            "read_mode": audit_log.read_mode,
            "variable": audit_log.variable_name,
            "parameter": audit_log.parameter_name,
            "secret": audit_log.is_secret,
            "placeholder": audit_log.placeholder_value,
            "timestamp": audit_log.timestamp.to_rfc3339(),
        })
    }

    pub fn render_text(&self, audit_log: &AuditLog) -> String {
        let summary = format!(
            "{} {} <- {}",
            audit_log.operation, audit_log.variable_name, audit_log.parameter_name
        );

        let log_parts = [
            format!("audit.operation={}", audit_log.operation),
            format!("audit.read_mode={}", audit_log.read_mode),
            format!("audit.variable={}", audit_log.variable_name),
            format!("audit.parameter={}", audit_log.parameter_name),
            format!("audit.secret={}", audit_log.is_secret),
            format!("audit.placeholder={}", audit_log.placeholder_value),
            format!("audit.timestamp={}", audit_log.timestamp.to_rfc3339()),
        ];

        format!("{} | {}", summary, log_parts.join(" "))
    }
}

#[async_trait::async_trait]
impl AuditLogger for BaseAuditLogger {
    async fn log(&self, audit_log: AuditLog) {
        match self.config.log_format {
            AuditLogFormat::Json => info!(target: AUDIT_TARGET, "{}", self.render_json(&audit_log)),
            AuditLogFormat::Text => info!(target: AUDIT_TARGET, "{}", self.render_text(&audit_log)),
        }
    }
}
